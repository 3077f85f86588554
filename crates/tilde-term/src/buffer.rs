// SPDX-License-Identifier: MIT
//
// FrameBuffer — the 2D cell grid the rendering core paints to.
//
// Design:
//
//   - Flat `Vec<Cell>` with row-major indexing. A row's cells are contiguous,
//     so left-to-right painting and output are linear scans.
//
//   - The core does not know about FrameBuffer. It paints through the
//     `Surface` trait: write a run of text, write one cell, query the size.
//     Anything that can honor those four calls can be drawn on.
//
//   - Wide characters occupy two columns. The first cell holds the code
//     point; the second is a continuation cell (ch = 0). Writes that land on
//     half of an existing wide character break it so no orphaned halves
//     survive.
//
// Memory: 200×50 terminal = 10,000 cells × 16 bytes = 160 KB. Trivial.

use unicode_width::UnicodeWidthChar;

use crate::cell::Cell;
use crate::color::CellColor;

// ─── Surface ────────────────────────────────────────────────────────────────────

/// A terminal display abstraction that colored cells are written to.
///
/// Coordinates are absolute `(column, row)` pairs. Writes outside the surface
/// are silently dropped.
pub trait Surface {
    /// Width in columns.
    fn width(&self) -> u16;

    /// Height in rows.
    fn height(&self) -> u16;

    /// Write a single code point at `(x, y)`.
    ///
    /// Wide characters also claim the column to their right.
    fn write_cell(&mut self, x: u16, y: u16, fg: CellColor, bg: CellColor, ch: char);

    /// Write a run of text starting at `(x, y)`, stopping at the right edge.
    ///
    /// Returns the number of columns consumed.
    fn write(&mut self, x: u16, y: u16, fg: CellColor, bg: CellColor, text: &str) -> u16 {
        let width = self.width();
        let mut col = x;
        for ch in text.chars() {
            if col >= width {
                break;
            }
            let w = char_width(ch);
            if w == 0 {
                continue;
            }
            self.write_cell(col, y, fg, bg, ch);
            // char_width is 1 or 2 here.
            #[allow(clippy::cast_possible_truncation)]
            let w = w as u16;
            col = col.saturating_add(w);
        }
        col.saturating_sub(x)
    }
}

// ─── FrameBuffer ────────────────────────────────────────────────────────────────

/// A 2D grid of cells representing one terminal frame.
///
/// # Examples
///
/// ```
/// use tilde_term::buffer::{FrameBuffer, Surface};
/// use tilde_term::color::CellColor;
///
/// let mut buf = FrameBuffer::new(80, 24);
/// buf.write_cell(5, 3, CellColor::RED, CellColor::Default, 'X');
/// assert_eq!(buf.get(5, 3).unwrap().character(), Some('X'));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    // ─── Construction ────────────────────────────────────────────────────

    /// Create a buffer filled with empty cells (space, default colors).
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; size],
        }
    }

    /// Create a buffer filled with spaces on the given background.
    #[must_use]
    pub fn with_bg(width: u16, height: u16, bg: CellColor) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY.with_bg(bg); size],
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Whether `(x, y)` is within the buffer.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a cell reference, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// The raw cell slice, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// A single row as a slice. Returns `None` if `y` is out of bounds.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            Some(&self.cells[start..start + usize::from(self.width)])
        } else {
            None
        }
    }

    /// The visible text of a row: continuation cells skipped.
    ///
    /// Handy for tests and for plain (colorless) dumps of a frame.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).map_or_else(String::new, |row| {
            row.iter().filter_map(|c| c.character()).collect()
        })
    }

    /// Break any wide character that touches position `(x, y)`.
    fn break_wide_char_at(&mut self, x: u16, y: u16) {
        let idx = self.index(x, y);

        if self.cells[idx].is_continuation() && x > 0 {
            let prev = self.index(x - 1, y);
            self.cells[prev].ch = u32::from(b' ');
        }

        if x + 1 < self.width {
            let next = self.index(x + 1, y);
            if self.cells[next].is_continuation() {
                self.cells[next] = Cell::EMPTY.with_bg(self.cells[next].bg);
            }
        }
    }
}

impl Surface for FrameBuffer {
    #[inline]
    fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    fn height(&self) -> u16 {
        self.height
    }

    fn write_cell(&mut self, x: u16, y: u16, fg: CellColor, bg: CellColor, ch: char) {
        if !self.in_bounds(x, y) {
            return;
        }
        self.break_wide_char_at(x, y);

        if char_width(ch) == 2 {
            // Half a wide character is display garbage; show a space.
            if x + 1 >= self.width {
                let idx = self.index(x, y);
                self.cells[idx] = Cell::colored(' ', fg, bg);
                return;
            }
            self.break_wide_char_at(x + 1, y);
            let idx = self.index(x, y);
            self.cells[idx] = Cell::colored(ch, fg, bg);
            self.cells[idx + 1] = Cell::continuation(fg, bg);
            return;
        }

        let idx = self.index(x, y);
        self.cells[idx] = Cell::colored(ch, fg, bg);
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", self.width, self.height)
    }
}

// ─── Text Width Utilities ───────────────────────────────────────────────────────

/// Display width of a character in terminal columns.
///
/// 0 for control and zero-width characters, 2 for wide characters.
///
/// ```
/// use tilde_term::buffer::char_width;
///
/// assert_eq!(char_width('a'), 1);
/// assert_eq!(char_width('中'), 2);
/// assert_eq!(char_width('\n'), 0);
/// ```
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Display width of a string in terminal columns.
///
/// ```
/// use tilde_term::buffer::string_width;
///
/// assert_eq!(string_width("hello"), 5);
/// assert_eq!(string_width("a中b"), 4);
/// ```
#[must_use]
pub fn string_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

// ─── Tests ──────────────────────────────────────────────────────────────────────
