//! Document — the lines the renderer draws.
//!
//! A `Document` wraps a [`ropey::Rope`] and exposes it the way the rendering
//! core wants to see it: an ordered run of lines addressed by a zero-based
//! index, with no line terminators and no gaps.
//!
//! # Design choices
//!
//! - **Lookups never fail.** Asking for a line past the end returns the empty
//!   string. The renderer pads short documents with blank rows and never has
//!   to special-case "no such line".
//!
//! - **An empty document has one empty line.** This matches ropey (and how
//!   editors display an empty file), so `line_count()` is always at least 1.
//!
//! - **Line edits shift what follows.** `insert_line`, `remove_line` and
//!   `set_line` operate on whole lines; the rope takes care of keeping the
//!   rest contiguous.

use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use ropey::{Rope, RopeSlice};

// ---------------------------------------------------------------------------
// Line ending detection
// ---------------------------------------------------------------------------

/// Line ending style of a document.
///
/// Detected on load by scanning for the first occurrence. Used as the
/// terminator for lines inserted later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
    /// `\r`
    Cr,
}

impl LineEnding {
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// Detect the line ending style from the first line break in `text`.
    /// Returns `Lf` if there is none.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        for (i, &byte) in bytes.iter().enumerate() {
            match byte {
                b'\n' => return Self::Lf,
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => return Self::CrLf,
                b'\r' => return Self::Cr,
                _ => {}
            }
        }
        Self::Lf
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => f.write_str("LF"),
            Self::CrLf => f.write_str("CRLF"),
            Self::Cr => f.write_str("CR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// An in-memory document: lines of text backed by a rope.
#[derive(Clone)]
pub struct Document {
    rope: Rope,
    line_ending: LineEnding,
}

impl Document {
    /// An empty document (one empty line).
    #[must_use]
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            line_ending: LineEnding::Lf,
        }
    }

    /// Create a document from a string.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            line_ending: LineEnding::detect(text),
            rope: Rope::from_str(text),
        }
    }

    /// Create a document from lines, joined with `\n`.
    #[must_use]
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let text = lines.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n");
        Self::from_text(&text)
    }

    /// Load a document from a UTF-8 file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    // -- Text access --------------------------------------------------------

    /// Number of lines. Always at least 1.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// The line at `index` without its terminator. Empty past the end.
    #[must_use]
    pub fn line(&self, index: usize) -> String {
        self.content(index).map_or_else(String::new, |slice| slice.to_string())
    }

    /// Number of characters in the line at `index`, excluding the terminator.
    #[must_use]
    pub fn line_len(&self, index: usize) -> usize {
        self.content(index).map_or(0, |slice| slice.len_chars())
    }

    /// The detected line ending style.
    #[inline]
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Collect the whole document into a `String`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    // -- Line editing -------------------------------------------------------

    /// Insert `text` as a new line at `index`, shifting later lines down.
    ///
    /// An index past the end appends after the last line.
    pub fn insert_line(&mut self, index: usize, text: &str) {
        let ending = self.line_ending.as_str();
        if index < self.line_count() {
            let at = self.rope.line_to_char(index);
            self.rope.insert(at, &format!("{text}{ending}"));
        } else {
            let at = self.rope.len_chars();
            self.rope.insert(at, &format!("{ending}{text}"));
        }
    }

    /// Remove the line at `index`, shifting later lines up.
    ///
    /// Returns `false` (and does nothing) when `index` is past the end.
    /// Removing the only line leaves one empty line.
    pub fn remove_line(&mut self, index: usize) -> bool {
        let count = self.line_count();
        if index >= count {
            return false;
        }
        let start = self.rope.line_to_char(index);
        if index + 1 < count {
            let end = self.rope.line_to_char(index + 1);
            self.rope.remove(start..end);
        } else if index > 0 {
            // Last line: drop the terminator of the line before it instead.
            let prev = self.rope.line(index - 1);
            let terminator = prev.len_chars() - content_len(prev);
            self.rope.remove(start - terminator..self.rope.len_chars());
        } else {
            self.rope.remove(..);
        }
        true
    }

    /// Replace the content of the line at `index`, keeping its terminator.
    ///
    /// Setting a line past the end first appends empty lines up to it.
    pub fn set_line(&mut self, index: usize, text: &str) {
        while index >= self.line_count() {
            let at = self.rope.len_chars();
            self.rope.insert(at, self.line_ending.as_str());
        }
        let start = self.rope.line_to_char(index);
        let len = content_len(self.rope.line(index));
        self.rope.remove(start..start + len);
        self.rope.insert(start, text);
    }

    fn content(&self, index: usize) -> Option<RopeSlice<'_>> {
        if index >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(index);
        Some(line.slice(..content_len(line)))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Document {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_text(s))
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("lines", &self.line_count())
            .field("chars", &self.rope.len_chars())
            .field("line_ending", &self.line_ending)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Whether ropey treats `ch` as a line break.
const fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Length of a rope line in chars, excluding its terminator (`\r\n` counts
/// as one terminator).
fn content_len(line: RopeSlice<'_>) -> usize {
    let total = line.len_chars();
    if total == 0 {
        return 0;
    }
    let last = line.char(total - 1);
    if !is_line_break(last) {
        return total;
    }
    if last == '\n' && total >= 2 && line.char(total - 2) == '\r' {
        total - 2
    } else {
        total - 1
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
