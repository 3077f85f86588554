//! Lexical state — comments, strings and bracket nesting across lines.
//!
//! Highlighting one line correctly needs to know what the lines above it
//! left open: a block comment, a multi-line string, unbalanced brackets.
//! [`LexicalState`] is that knowledge, small enough to copy, and
//! [`LexicalState::advance`] is the pure transition that moves it past one
//! line. Replaying lines `0..k` from the default state always yields the
//! state entering line `k`.
//!
//! Scanning is line-oriented and heuristic. There is no parser:
//!
//! 1. A trimmed line starting with the single-line comment marker (or
//!    holding nothing but a `/* ... */` comment) is a comment line, unless
//!    it sits inside a block comment or multi-line string.
//! 2. Otherwise the line is split into [`Region`]s by a small scanner that
//!    skips string and character literals, stops at a comment marker, and
//!    notices block comments and raw strings opening or closing.
//! 3. Brackets are counted in the code regions only. A close with no open
//!    raises the unmatched signal and resets both counters to zero.
//!
//! [`LexicalCache`] keeps a checkpoint every 64 lines so a redraw deep in a
//! file replays at most 63 lines.

use tracing::{debug, trace};

use crate::document::Document;
use crate::markdown;
use crate::mode::Mode;

// ---------------------------------------------------------------------------
// LexicalSyntax
// ---------------------------------------------------------------------------

/// The lexical markers of one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalSyntax {
    /// Starts a comment running to the end of the line.
    pub line: Option<&'static str>,
    /// Opens and closes a block comment.
    pub block: Option<(&'static str, &'static str)>,
    /// Opens and closes a string that may span lines.
    pub raw: Option<&'static str>,
    /// Characters that open (and close) single-line string literals.
    pub string_quotes: &'static str,
    /// `'x'` is a character literal rather than a quote.
    pub char_literals: bool,
    /// Markdown-style ``` fences.
    pub fenced: bool,
    /// Count brackets at all. Off for prose.
    pub track_brackets: bool,
}

impl LexicalSyntax {
    #[must_use]
    pub const fn for_mode(mode: Mode) -> Self {
        let string_quotes = match mode {
            Mode::Vim => "'",
            Mode::Git | Mode::ManPage | Mode::Markdown | Mode::Text => "",
            Mode::Amber
            | Mode::CMake
            | Mode::Config
            | Mode::Erlang
            | Mode::JavaScript
            | Mode::Lua
            | Mode::Make
            | Mode::Nim
            | Mode::Prolog
            | Mode::Python
            | Mode::Shell
            | Mode::Sql
            | Mode::Teal
            | Mode::Terra
            | Mode::TypeScript => "\"'",
            _ => "\"",
        };
        Self {
            line: mode.single_line_comment_marker(),
            block: mode.block_comment_markers(),
            raw: mode.raw_string_delimiter(),
            string_quotes,
            char_literals: matches!(
                mode,
                Mode::C
                    | Mode::Cpp
                    | Mode::CSharp
                    | Mode::Go
                    | Mode::Java
                    | Mode::Kotlin
                    | Mode::Rust
                    | Mode::Scala
                    | Mode::Zig
            ),
            fenced: matches!(mode, Mode::Markdown),
            track_brackets: !mode.is_prose(),
        }
    }

    /// Whether a trimmed line is a comment line on its own: it starts with
    /// the line marker, or is one self-contained block comment.
    #[must_use]
    pub fn is_single_line_comment(&self, trimmed: &str) -> bool {
        if self.line.is_some_and(|marker| starts_with_marker(trimmed, marker)) {
            return true;
        }
        if let Some((open, close)) = self.block {
            return trimmed.len() >= open.len() + close.len()
                && trimmed.starts_with(open)
                && trimmed.ends_with(close);
        }
        false
    }
}

/// Alphabetic markers (`REM`) are matched case-insensitively and must be
/// followed by whitespace or the end of the line.
fn starts_with_marker(trimmed: &str, marker: &str) -> bool {
    if !marker.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return trimmed.starts_with(marker);
    }
    let Some(head) = trimmed.get(..marker.len()) else {
        return false;
    };
    head.eq_ignore_ascii_case(marker)
        && trimmed[marker.len()..]
            .chars()
            .next()
            .is_none_or(char::is_whitespace)
}

// ---------------------------------------------------------------------------
// Region scanner
// ---------------------------------------------------------------------------

/// Where a line begins, lexically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resume {
    Code,
    BlockComment,
    RawString(&'static str),
}

/// Where a line ends, lexically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanEnd {
    Code,
    LineComment,
    BlockComment,
    RawString(&'static str),
}

/// What one code point of a line is part of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Code,
    LineComment,
    BlockComment,
    String,
    Char,
    RawString,
}

/// Split a line into regions, one per code point, starting from `resume`.
#[must_use]
pub fn regions(chars: &[char], syntax: &LexicalSyntax, resume: Resume) -> (Vec<Region>, ScanEnd) {
    let n = chars.len();
    let mut out = Vec::with_capacity(n);
    let mut state = resume;
    let mut i = 0;
    let (inline_marker, word_marker) = match syntax.line {
        Some(m) if m.starts_with(|c: char| c.is_ascii_alphabetic()) => (None, Some(m)),
        other => (other, None),
    };
    let first_code = if resume == Resume::Code {
        chars.iter().position(|c| !c.is_whitespace())
    } else {
        None
    };

    while i < n {
        match state {
            Resume::BlockComment => {
                let close = syntax.block.map_or("*/", |(_, close)| close);
                let Some(at) = find_from(chars, i, close) else {
                    out.resize(n, Region::BlockComment);
                    return (out, ScanEnd::BlockComment);
                };
                let end = at + close.chars().count();
                out.resize(end, Region::BlockComment);
                i = end;
                state = Resume::Code;
            }
            Resume::RawString(delim) => {
                let Some(at) = find_from(chars, i, delim) else {
                    out.resize(n, Region::RawString);
                    return (out, ScanEnd::RawString(delim));
                };
                let end = at + delim.chars().count();
                out.resize(end, Region::RawString);
                i = end;
                state = Resume::Code;
            }
            Resume::Code => {
                let word_comment = first_code == Some(i)
                    && word_marker.is_some_and(|m| starts_with_word(chars, i, m));
                if word_comment || inline_marker.is_some_and(|m| starts_at(chars, i, m)) {
                    out.resize(n, Region::LineComment);
                    return (out, ScanEnd::LineComment);
                }
                if let Some((open, _)) = syntax.block.filter(|(open, _)| starts_at(chars, i, open)) {
                    let end = i + open.chars().count();
                    out.resize(end, Region::BlockComment);
                    i = end;
                    state = Resume::BlockComment;
                    continue;
                }
                if let Some(delim) = syntax.raw.filter(|delim| starts_at(chars, i, delim)) {
                    let end = i + delim.chars().count();
                    out.resize(end, Region::RawString);
                    i = end;
                    state = Resume::RawString(delim);
                    continue;
                }
                let ch = chars[i];
                if syntax.string_quotes.contains(ch) {
                    let end = string_end(chars, i);
                    out.resize(end, Region::String);
                    i = end;
                    continue;
                }
                let literal = if ch == '\'' && syntax.char_literals {
                    char_literal_end(chars, i)
                } else {
                    None
                };
                if let Some(end) = literal {
                    out.resize(end, Region::Char);
                    i = end;
                    continue;
                }
                out.push(Region::Code);
                i += 1;
            }
        }
    }

    let end = match state {
        Resume::Code => ScanEnd::Code,
        Resume::BlockComment => ScanEnd::BlockComment,
        Resume::RawString(delim) => ScanEnd::RawString(delim),
    };
    (out, end)
}

fn starts_at(chars: &[char], at: usize, pat: &str) -> bool {
    let mut k = at;
    for p in pat.chars() {
        if chars.get(k) != Some(&p) {
            return false;
        }
        k += 1;
    }
    true
}

/// `word` at `at`, ignoring ASCII case, followed by whitespace or the end.
fn starts_with_word(chars: &[char], at: usize, word: &str) -> bool {
    let mut k = at;
    for w in word.chars() {
        if !chars.get(k).is_some_and(|c| c.eq_ignore_ascii_case(&w)) {
            return false;
        }
        k += 1;
    }
    chars.get(k).is_none_or(|c| c.is_whitespace())
}

fn find_from(chars: &[char], from: usize, pat: &str) -> Option<usize> {
    (from..chars.len()).find(|&i| starts_at(chars, i, pat))
}

/// One past the closing quote, or the end of the line. Backslash escapes.
fn string_end(chars: &[char], open: usize) -> usize {
    let quote = chars[open];
    let mut j = open + 1;
    while j < chars.len() {
        match chars[j] {
            '\\' => j += 2,
            c if c == quote => return j + 1,
            _ => j += 1,
        }
    }
    chars.len()
}

/// `'x'` or a short escape like `'\n'` / `'\u{1F600}'`. Anything else
/// (lifetimes, apostrophes) is not a literal.
fn char_literal_end(chars: &[char], open: usize) -> Option<usize> {
    match chars.get(open + 1)? {
        '\\' => (open + 3..chars.len().min(open + 12))
            .find(|&j| chars[j] == '\'')
            .map(|j| j + 1),
        '\'' => None,
        _ => (chars.get(open + 2) == Some(&'\'')).then_some(open + 3),
    }
}

// ---------------------------------------------------------------------------
// Bracket walk
// ---------------------------------------------------------------------------

/// Result of walking the brackets of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketWalk {
    pub parens: u32,
    pub brackets: u32,
    /// A close bracket had no open. Counters were reset to zero and the rest
    /// of the line was ignored.
    pub unmatched: bool,
}

/// Walk the brackets in the code regions of a line, starting from the
/// counters entering it.
///
/// `paint(index, depth)` is called for every bracket before the first
/// unmatched one. An open bracket gets the combined depth before it; a
/// close bracket the depth after it, so a pair shares one depth.
pub fn walk_brackets(
    chars: &[char],
    regions: &[Region],
    parens: u32,
    brackets: u32,
    mut paint: impl FnMut(usize, u32),
) -> BracketWalk {
    let mut walk = BracketWalk {
        parens,
        brackets,
        unmatched: false,
    };
    for (i, (&ch, &region)) in chars.iter().zip(regions).enumerate() {
        if region != Region::Code {
            continue;
        }
        match ch {
            '(' => {
                paint(i, walk.parens + walk.brackets);
                walk.parens += 1;
            }
            '[' | '{' => {
                paint(i, walk.parens + walk.brackets);
                walk.brackets += 1;
            }
            ')' if walk.parens > 0 => {
                walk.parens -= 1;
                paint(i, walk.parens + walk.brackets);
            }
            ']' | '}' if walk.brackets > 0 => {
                walk.brackets -= 1;
                paint(i, walk.parens + walk.brackets);
            }
            ')' | ']' | '}' => {
                walk.parens = 0;
                walk.brackets = 0;
                walk.unmatched = true;
                break;
            }
            _ => {}
        }
    }
    walk
}

// ---------------------------------------------------------------------------
// LexicalState
// ---------------------------------------------------------------------------

/// The lexical context entering a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LexicalState {
    /// The line just classified was a single-line comment.
    pub single_line_comment: bool,
    pub in_block_comment: bool,
    /// The delimiter of the open multi-line string, if any.
    pub raw_delimiter: Option<&'static str>,
    /// The multi-line string was opened by the line just classified.
    pub newly_started: bool,
    pub parens: u32,
    pub brackets: u32,
    pub in_code_fence: bool,
    /// Whether the previous two lines were list items, most recent first.
    pub list_lookback: [bool; 2],
}

/// How a line should be colored, as far as lexical context goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineClass {
    /// Ordinary code, including lines that open or close a block comment or
    /// multi-line string.
    Code,
    /// A comment line (rule 1).
    LineComment,
    /// Entirely inside a block comment.
    BlockComment,
    /// Entirely inside a multi-line string.
    RawString,
}

/// Side signals of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signals {
    /// A close bracket without an open; both counters were reset.
    pub unmatched: bool,
    /// The line opened or closed a code fence.
    pub fence_toggled: bool,
}

/// The outcome of advancing past one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The state entering the next line.
    pub state: LexicalState,
    pub class: LineClass,
    /// Where the line began.
    pub resume: Resume,
    pub signals: Signals,
}

impl LexicalState {
    /// Inside a multi-line string.
    #[inline]
    #[must_use]
    pub const fn in_raw_string(&self) -> bool {
        self.raw_delimiter.is_some()
    }

    /// Where the next line begins.
    #[must_use]
    pub const fn resume(&self) -> Resume {
        if self.in_block_comment {
            Resume::BlockComment
        } else if let Some(delim) = self.raw_delimiter {
            Resume::RawString(delim)
        } else {
            Resume::Code
        }
    }

    /// Advance past `line`.
    #[must_use]
    pub fn advance(&self, line: &str, syntax: &LexicalSyntax) -> Transition {
        let trimmed = line.trim();
        let resume = self.resume();
        let mut next = *self;
        let mut signals = Signals::default();
        next.single_line_comment = false;
        next.newly_started = false;

        if syntax.fenced {
            if markdown::is_fence(trimmed) {
                next.in_code_fence = !self.in_code_fence;
                signals.fence_toggled = true;
            }
            next.list_lookback = [markdown::is_list_item(trimmed), self.list_lookback[0]];
        }

        if resume == Resume::Code && syntax.is_single_line_comment(trimmed) {
            next.single_line_comment = true;
            return Transition {
                state: next,
                class: LineClass::LineComment,
                resume,
                signals,
            };
        }

        let chars: Vec<char> = trimmed.chars().collect();
        let (regions, end) = regions(&chars, syntax, resume);

        if syntax.track_brackets {
            let walk = walk_brackets(&chars, &regions, self.parens, self.brackets, |_, _| {});
            next.parens = walk.parens;
            next.brackets = walk.brackets;
            signals.unmatched = walk.unmatched;
        }

        next.in_block_comment = end == ScanEnd::BlockComment;
        next.raw_delimiter = match end {
            ScanEnd::RawString(delim) => {
                next.newly_started = resume != Resume::RawString(delim);
                Some(delim)
            }
            _ => None,
        };

        let class = match (resume, end) {
            (Resume::BlockComment, ScanEnd::BlockComment) => LineClass::BlockComment,
            (Resume::RawString(_), ScanEnd::RawString(_)) => LineClass::RawString,
            _ => LineClass::Code,
        };

        Transition {
            state: next,
            class,
            resume,
            signals,
        }
    }
}

// ---------------------------------------------------------------------------
// LexicalCache
// ---------------------------------------------------------------------------

/// Lines between checkpoints.
pub const CHECKPOINT_INTERVAL: usize = 64;

/// Checkpoints of the lexical state entering every `interval`-th line.
///
/// Filled lazily as render passes ask for deeper lines; truncated when a
/// line is edited; cleared when the mode changes.
#[derive(Debug, Clone)]
pub struct LexicalCache {
    interval: usize,
    checkpoints: Vec<LexicalState>,
}

impl LexicalCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(CHECKPOINT_INTERVAL)
    }

    /// A cache with a custom checkpoint spacing (at least 1).
    #[must_use]
    pub fn with_interval(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            checkpoints: vec![LexicalState::default()],
        }
    }

    /// Number of stored checkpoints, including line 0.
    #[must_use]
    pub fn checkpoints(&self) -> usize {
        self.checkpoints.len()
    }

    /// The state entering `line`, replaying from the nearest checkpoint.
    ///
    /// Checkpoints are only stored up to the end of `doc`.
    pub fn state_at(&mut self, doc: &Document, line: usize, syntax: &LexicalSyntax) -> LexicalState {
        let end = doc.line_count();
        if line > end {
            // Past the end every line is empty, and two of them settle the
            // list lookback.
            let mut state = self.state_at(doc, end, syntax);
            for _ in 0..(line - end).min(2) {
                state = state.advance("", syntax).state;
            }
            return state;
        }
        let wanted = line / self.interval;
        while self.checkpoints.len() <= wanted {
            let k = self.checkpoints.len() - 1;
            let start = k * self.interval;
            let mut state = self.checkpoints[k];
            for l in start..start + self.interval {
                state = state.advance(&doc.line(l), syntax).state;
            }
            self.checkpoints.push(state);
            trace!(checkpoint = k + 1, line = start + self.interval, "lexical checkpoint filled");
        }
        let mut state = self.checkpoints[wanted];
        for l in wanted * self.interval..line {
            state = state.advance(&doc.line(l), syntax).state;
        }
        state
    }

    /// Drop every checkpoint that depends on `line`.
    pub fn invalidate_from(&mut self, line: usize) {
        let keep = line / self.interval + 1;
        if self.checkpoints.len() > keep {
            debug!(line, dropped = self.checkpoints.len() - keep, "lexical cache invalidated");
            self.checkpoints.truncate(keep);
        }
    }

    /// Forget everything but the start of the document.
    pub fn clear(&mut self) {
        debug!(dropped = self.checkpoints.len() - 1, "lexical cache cleared");
        self.checkpoints.truncate(1);
    }
}

impl Default for LexicalCache {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
