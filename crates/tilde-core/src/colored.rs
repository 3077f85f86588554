//! Colored lines — what every highlighter produces.
//!
//! A [`ColoredLine`] is one code point per cell, each with its own
//! foreground and background. The render pipeline copies these cells onto
//! the surface; overlays (rainbow brackets, search matches) repaint
//! foregrounds in place.

use std::ops::Range;

use tilde_term::color::CellColor;

/// One code point with its colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColoredCell {
    pub ch: char,
    pub fg: CellColor,
    pub bg: CellColor,
}

impl ColoredCell {
    #[inline]
    #[must_use]
    pub const fn new(ch: char, fg: CellColor, bg: CellColor) -> Self {
        Self { ch, fg, bg }
    }
}

/// An ordered run of colored cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredLine {
    cells: Vec<ColoredCell>,
    bg: CellColor,
}

impl ColoredLine {
    /// An empty line whose pushed cells get background `bg`.
    #[must_use]
    pub const fn new(bg: CellColor) -> Self {
        Self {
            cells: Vec::new(),
            bg,
        }
    }

    /// A whole line in one color.
    #[must_use]
    pub fn uniform(text: &str, fg: CellColor, bg: CellColor) -> Self {
        let mut line = Self::new(bg);
        line.push_str(text, fg);
        line
    }

    /// Build from parallel code points and foregrounds.
    #[must_use]
    pub fn from_colors(chars: &[char], colors: &[CellColor], bg: CellColor) -> Self {
        Self {
            cells: chars
                .iter()
                .zip(colors)
                .map(|(&ch, &fg)| ColoredCell::new(ch, fg, bg))
                .collect(),
            bg,
        }
    }

    #[inline]
    pub fn push(&mut self, ch: char, fg: CellColor) {
        self.cells.push(ColoredCell::new(ch, fg, self.bg));
    }

    pub fn push_str(&mut self, text: &str, fg: CellColor) {
        for ch in text.chars() {
            self.push(ch, fg);
        }
    }

    /// Repaint the foreground of the cells in `range`. Out-of-range parts
    /// are ignored.
    pub fn paint(&mut self, range: Range<usize>, fg: CellColor) {
        let end = range.end.min(self.cells.len());
        let start = range.start.min(end);
        for cell in &mut self.cells[start..end] {
            cell.fg = fg;
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[ColoredCell] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [ColoredCell] {
        &mut self.cells
    }

    #[inline]
    #[must_use]
    pub const fn bg(&self) -> CellColor {
        self.bg
    }

    /// The code points, without colors.
    #[must_use]
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }
}
