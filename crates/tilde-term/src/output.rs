// SPDX-License-Identifier: MIT
//
// Output buffering and stateful cell encoding.
//
//   OutputBuffer — accumulates all ANSI bytes in memory so a whole frame goes
//   out in a single write() call.
//
//   CellWriter — remembers the last emitted colors and skips
//   escape sequences that would not change anything. A run of same-styled
//   cells costs one SGR sequence, not one per cell.
//
// `write_frame` ties the two together: it walks a FrameBuffer row by row and
// streams the rows as lines, for printing a rendered screen into a pipe or
// the scrollback.

use std::io::{self, Write};

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::cell::Cell;
use crate::color::CellColor;

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// A byte buffer that accumulates ANSI output for a single `write()`.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// Create an empty buffer with default capacity (16 KB).
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Write a Unicode code point as UTF-8. Invalid code points produce `?`.
    pub fn write_codepoint(&mut self, cp: u32) {
        match char::from_u32(cp) {
            Some(ch) if cp != 0 => {
                let mut enc = [0u8; 4];
                self.buf.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
            }
            _ => self.buf.push(b'?'),
        }
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to `w` and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Real flushing happens in flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── CellWriter ──────────────────────────────────────────────────────────────

/// Stateful cell encoder that skips redundant SGR sequences: a color is
/// emitted only when it differs from the last one written.
#[allow(clippy::struct_field_names)]
pub struct CellWriter {
    last_fg: Option<CellColor>,
    last_bg: Option<CellColor>,
}

impl CellWriter {
    /// Create a writer with no tracked state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
        }
    }

    /// Forget tracked state. Call after anything else touched the terminal.
    pub fn reset_state(&mut self) {
        *self = Self::new();
    }

    /// Emit the style changes needed for `cell`, then its character.
    ///
    /// Continuation cells produce no output: the wide character before them
    /// already covered both columns.
    pub fn render_cell(&mut self, out: &mut OutputBuffer, cell: &Cell) {
        if cell.is_continuation() {
            return;
        }
        self.apply_style(out, cell);
        out.write_codepoint(cell.ch);
    }

    /// Reset the terminal style and forget tracked state.
    pub fn finish(&mut self, out: &mut OutputBuffer) {
        ansi::reset(out).ok();
        self.reset_state();
    }

    fn apply_style(&mut self, out: &mut OutputBuffer, cell: &Cell) {
        if self.last_fg != Some(cell.fg) {
            ansi::fg(out, cell.fg).ok();
            self.last_fg = Some(cell.fg);
        }

        if self.last_bg != Some(cell.bg) {
            ansi::bg(out, cell.bg).ok();
            self.last_bg = Some(cell.bg);
        }
    }
}

impl Default for CellWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Frames ──────────────────────────────────────────────────────────────────

/// Encode a whole frame into `out`, one line per row. With color each row
/// ends in a style reset.
///
/// With `color` false only the characters are written, which is what a
/// `NO_COLOR` environment or a dumb pipe wants.
pub fn write_frame(out: &mut OutputBuffer, frame: &FrameBuffer, color: bool) {
    let mut writer = CellWriter::new();
    let mut y: u16 = 0;
    while let Some(row) = frame.row(y) {
        for cell in row {
            if color {
                writer.render_cell(out, cell);
            } else if let Some(ch) = cell.character() {
                out.write_codepoint(u32::from(ch));
            }
        }
        if color {
            writer.finish(out);
        }
        out.buf.push(b'\n');
        y += 1;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
