//! The generic per-line tokenizer.
//!
//! Classifies every code point of one line into a [`TokenKind`]. Comments
//! and literals come from the lexical [`regions`](crate::lexical::regions)
//! scanner, so the tokenizer and the cross-line state never disagree about
//! where a string or comment starts. Code regions are split into words,
//! numbers, punctuation and operators.

use tilde_theme::{Theme, TokenKind};

use crate::colored::ColoredLine;
use crate::error::LexError;
use crate::keywords::Keywords;
use crate::lexical::{LexicalSyntax, Region, Resume, regions};

/// Lines longer than this are not tokenized.
pub const MAX_LINE_CHARS: usize = 16_384;

/// Token kinds for `chars`, one per code point.
///
/// # Errors
///
/// [`LexError::TooLong`] past [`MAX_LINE_CHARS`], [`LexError::Nul`] on a NUL
/// code point.
pub fn tokenize(
    chars: &[char],
    syntax: &LexicalSyntax,
    keywords: &Keywords,
    resume: Resume,
) -> Result<Vec<TokenKind>, LexError> {
    if chars.len() > MAX_LINE_CHARS {
        return Err(LexError::TooLong {
            len: chars.len(),
            limit: MAX_LINE_CHARS,
        });
    }
    if let Some(column) = chars.iter().position(|&c| c == '\0') {
        return Err(LexError::Nul { column });
    }

    let (regions, _) = regions(chars, syntax, resume);
    let mut kinds = vec![TokenKind::Plain; chars.len()];
    let mut i = 0;
    while i < chars.len() {
        match regions[i] {
            Region::LineComment | Region::BlockComment => kinds[i] = TokenKind::Comment,
            Region::String | Region::RawString => kinds[i] = TokenKind::String,
            Region::Char => kinds[i] = TokenKind::Char,
            Region::Code => {
                let end = code_run_end(&regions, i);
                lex_code(&chars[i..end], keywords, &mut kinds[i..end]);
                i = end;
                continue;
            }
        }
        i += 1;
    }
    Ok(kinds)
}

/// Tokenize and color a line in one go.
///
/// # Errors
///
/// See [`tokenize`].
pub fn highlight(
    chars: &[char],
    syntax: &LexicalSyntax,
    keywords: &Keywords,
    resume: Resume,
    theme: &Theme,
) -> Result<ColoredLine, LexError> {
    let kinds = tokenize(chars, syntax, keywords, resume)?;
    Ok(colorize(chars, &kinds, theme))
}

/// Turn token kinds into colors.
#[must_use]
pub fn colorize(chars: &[char], kinds: &[TokenKind], theme: &Theme) -> ColoredLine {
    let mut line = ColoredLine::new(theme.bg);
    for (&ch, &kind) in chars.iter().zip(kinds) {
        line.push(ch, theme.token(kind));
    }
    line
}

fn code_run_end(regions: &[Region], start: usize) -> usize {
    regions[start..]
        .iter()
        .position(|&r| r != Region::Code)
        .map_or(regions.len(), |n| start + n)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Classify one run of code. `out` is the same length as `run`.
fn lex_code(run: &[char], keywords: &Keywords, out: &mut [TokenKind]) {
    let mut i = 0;
    while i < run.len() {
        let c = run[i];
        let start = i;
        let kind = if c.is_ascii_digit() {
            i = number_end(run, i);
            TokenKind::Number
        } else if c.is_alphabetic() || c == '_' {
            while i < run.len() && is_word_char(run[i]) {
                i += 1;
            }
            let word: String = run[start..i].iter().collect();
            keywords.classify(&word).unwrap_or_else(|| {
                if c.is_uppercase() {
                    TokenKind::Type
                } else {
                    TokenKind::Plain
                }
            })
        } else {
            i += 1;
            match c {
                '(' | ')' | '[' | ']' | '{' | '}' | ',' | ';' | ':' | '.' => TokenKind::Punctuation,
                '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|' | '^' | '~' | '?' => {
                    TokenKind::Operator
                }
                _ => TokenKind::Plain,
            }
        };
        out[start..i].fill(kind);
    }
}

/// End of a numeric literal starting at `start`: decimal with `_`
/// separators, `0x` hex, one fractional part (never `..`), an exponent, and
/// a type suffix.
fn number_end(run: &[char], start: usize) -> usize {
    let at = |k: usize| run.get(k).copied().unwrap_or(' ');
    let mut i = start;

    if at(i) == '0' && matches!(at(i + 1), 'x' | 'X') && at(i + 2).is_ascii_hexdigit() {
        i += 2;
        while at(i).is_ascii_hexdigit() || at(i) == '_' {
            i += 1;
        }
        return i;
    }

    while at(i).is_ascii_digit() || at(i) == '_' {
        i += 1;
    }
    if at(i) == '.' && at(i + 1).is_ascii_digit() {
        i += 1;
        while at(i).is_ascii_digit() || at(i) == '_' {
            i += 1;
        }
    }
    if matches!(at(i), 'e' | 'E') {
        let sign = usize::from(matches!(at(i + 1), '+' | '-'));
        if at(i + 1 + sign).is_ascii_digit() {
            i += 1 + sign;
            while at(i).is_ascii_digit() {
                i += 1;
            }
        }
    }
    // Suffixes: 10u8, 1.5f32, 3L
    while i < run.len() && is_word_char(run[i]) {
        i += 1;
    }
    i
}
