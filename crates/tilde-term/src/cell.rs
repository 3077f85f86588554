// SPDX-License-Identifier: MIT
//
// Cell — the atomic unit of terminal rendering.
//
// Every character position on screen is a Cell: one Unicode code point and
// a foreground and background color. The rendering core produces these; the
// output module encodes them.
//
// Wide characters (CJK, some emoji) occupy two columns. The first cell
// holds the code point; the second is a continuation cell (ch = 0). Output
// skips continuation cells but still honors their background.

use crate::color::CellColor;

// ─── Cell ────────────────────────────────────────────────────────────────────

/// A single terminal cell.
///
/// # Layout (12 bytes)
///
/// ```text
/// ┌──────────┬──────────┬──────────┐
/// │ ch: u32  │ fg       │ bg       │
/// │ 4 bytes  │ 4 bytes  │ 4 bytes  │
/// └──────────┴──────────┴──────────┘
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unicode code point to display. `0` marks a continuation cell.
    pub ch: u32,

    /// Foreground (text) color.
    pub fg: CellColor,

    /// Background color.
    pub bg: CellColor,
}

/// Continuation marker: the second column of a wide character.
const CONTINUATION: u32 = 0;

const SPACE: u32 = b' ' as u32;

impl Cell {
    /// An empty cell: space character, default colors.
    pub const EMPTY: Self = Self {
        ch: SPACE,
        fg: CellColor::Default,
        bg: CellColor::Default,
    };

    /// Create a cell with colors.
    #[inline]
    #[must_use]
    pub const fn colored(ch: char, fg: CellColor, bg: CellColor) -> Self {
        Self {
            ch: ch as u32,
            fg,
            bg,
        }
    }

    /// Create a continuation cell for the second column of a wide character.
    #[inline]
    #[must_use]
    pub const fn continuation(fg: CellColor, bg: CellColor) -> Self {
        Self {
            ch: CONTINUATION,
            fg,
            bg,
        }
    }

    // ─── Queries ──────────────────────────────────────────────────────────

    /// Whether this is a continuation cell.
    #[inline]
    #[must_use]
    pub const fn is_continuation(self) -> bool {
        self.ch == CONTINUATION
    }

    /// Whether this cell is visually empty (space, default colors).
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.ch == SPACE && self.fg.is_default() && self.bg.is_default()
    }

    /// The code point as a `char`. `None` for continuation cells.
    #[inline]
    #[must_use]
    pub const fn character(self) -> Option<char> {
        if self.ch == CONTINUATION {
            return None;
        }
        char::from_u32(self.ch)
    }

    // ─── Builders ─────────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn with_bg(self, bg: CellColor) -> Self {
        Self { bg, ..self }
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_continuation() {
            return write!(f, "Cell(continuation)");
        }
        let ch = char::from_u32(self.ch).unwrap_or('?');
        write!(f, "Cell({ch:?}")?;
        if !self.fg.is_default() {
            write!(f, ", fg={:?}", self.fg)?;
        }
        if !self.bg.is_default() {
            write!(f, ", bg={:?}", self.bg)?;
        }
        write!(f, ")")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
