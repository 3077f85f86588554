//! Rendered man page highlighting.
//!
//! Input is `man` output: overstrike sequences (`x^Hx`) already in the text,
//! section headers in capitals at the left margin, option lists indented
//! under them.

use tilde_term::color::CellColor;
use tilde_theme::Theme;

use crate::colored::ColoredLine;

/// Resolve backspace overstrikes: each `^H` deletes the code point before it.
#[must_use]
pub fn strip_overstrike(line: &str) -> String {
    let mut out: Vec<char> = Vec::with_capacity(line.len());
    for ch in line.chars() {
        if ch == '\u{8}' {
            out.pop();
        } else {
            out.push(ch);
        }
    }
    out.into_iter().collect()
}

/// Highlight one line of a man page.
///
/// The first and last lines of the page carry the wide-spaced title and
/// footer; `first` / `last` say whether this is one of them.
#[must_use]
pub fn highlight(line: &str, first: bool, last: bool, theme: &Theme) -> ColoredLine {
    let line = strip_overstrike(line);
    let man = &theme.man;
    let trimmed = line.trim();
    let has_letters = trimmed.chars().any(char::is_alphabetic);

    if (first || last) && trimmed.matches("  ").count() > 10 {
        return ColoredLine::uniform(&line, theme.comment, theme.bg);
    }
    if has_letters && !line.starts_with(' ') && !trimmed.starts_with('-') && !has_lowercase(trimmed) {
        return ColoredLine::uniform(&line, man.section, theme.bg);
    }
    let chars: Vec<char> = line.chars().collect();
    if trimmed.starts_with('-') {
        if trimmed.matches(' ').count() <= 1 {
            return ColoredLine::uniform(&line, man.flag, theme.bg);
        }
        return ColoredLine::from_colors(&chars, &option_colors(&chars, theme), theme.bg);
    }
    if has_letters && !has_lowercase(trimmed) {
        return ColoredLine::uniform(&line, man.text, theme.bg);
    }
    ColoredLine::from_colors(&chars, &text_colors(&chars, theme), theme.bg)
}

fn has_lowercase(s: &str) -> bool {
    s.chars().any(char::is_lowercase)
}

/// An option list entry: `-f, --force [WHEN]    description`.
///
/// Words starting with `-` or `[` are flags until a gap of two or more
/// spaces; the description after the gap is normal text. Anything after a
/// closing `]` before the gap is dimmed.
fn option_colors(chars: &[char], theme: &Theme) -> Vec<CellColor> {
    let man = &theme.man;
    let mut colors = Vec::with_capacity(chars.len());
    let mut in_flag = false;
    let mut described = false;
    let mut seen_text = false;
    let mut spaces = 0;
    let mut color = man.text;

    for (i, &c) in chars.iter().enumerate() {
        let prev = if i == 0 { ' ' } else { chars[i - 1] };
        if c == ' ' {
            spaces += 1;
            in_flag = false;
            if seen_text && spaces >= 2 {
                described = true;
            }
        } else {
            spaces = 0;
            seen_text = true;
        }

        if described {
            color = theme.fg;
        } else if c != ' ' && prev == ' ' && matches!(c, '-' | '[' | '_') {
            in_flag = true;
            color = man.flag;
        } else if c == ']' {
            colors.push(man.flag);
            color = theme.comment;
            continue;
        } else if !in_flag && c != ' ' && prev == ' ' {
            color = man.text;
        }
        colors.push(color);
    }
    colors
}

/// Running text: numbers and `<placeholders>` in italics color, shell-ish
/// symbols in the flag color, e-mail style `@` dimmed, capitalized words in
/// the accent color.
fn text_colors(chars: &[char], theme: &Theme) -> Vec<CellColor> {
    let man = &theme.man;
    let mut colors = vec![man.text; chars.len()];
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let prev_is_word = i > 0 && (chars[i - 1].is_alphanumeric() || chars[i - 1] == '_');

        if c.is_ascii_digit() && !prev_is_word {
            let end = scan(chars, i, |c| c.is_ascii_hexdigit() || c == '.');
            colors[i..end].fill(man.italics);
            i = end;
        } else if c == '<' {
            let end = (i + 1..chars.len())
                .find(|&j| chars[j] == '>')
                .map_or(chars.len(), |j| j + 1);
            colors[i..end].fill(man.italics);
            i = end;
        } else if c == '@' {
            colors[i] = theme.comment;
            let end = scan(chars, i + 1, |c| !c.is_whitespace());
            colors[i + 1..end].fill(man.italics);
            i = end;
        } else if matches!(c, '*' | '$' | '%' | '!' | '/' | '=' | '-') && !prev_is_word {
            colors[i] = man.flag;
            i += 1;
        } else if c.is_alphabetic() {
            let end = scan(chars, i, |c| c.is_alphanumeric() || c == '_');
            let word = &chars[i..end];
            let upper = word.iter().filter(|c| c.is_uppercase()).count();
            if upper >= 2 && !word.iter().any(|c| c.is_lowercase()) {
                colors[i..end].fill(theme.markup.image);
            }
            i = end;
        } else {
            i += 1;
        }
    }
    colors
}

fn scan(chars: &[char], from: usize, keep: impl Fn(char) -> bool) -> usize {
    (from..chars.len()).find(|&j| !keep(chars[j])).unwrap_or(chars.len())
}
