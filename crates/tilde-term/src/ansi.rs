// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit — that's the `CellWriter`'s job. This
// module only knows the byte-level encoding.

use std::io::{self, Write};

use crate::color::CellColor;

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Reset all SGR attributes to terminal defaults (SGR 0).
///
/// The stateful writer must invalidate its tracked state after this.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Colors ──────────────────────────────────────────────────────────────────

/// Set the foreground color.
///
/// Compact SGR codes for the 16 classic colors (30–37, 90–97), the 256-color
/// form for palette indices 16–255, and 24-bit `TrueColor` for RGB.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 30 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 82 + u16::from(idx))
            } else {
                write!(w, "\x1b[38;5;{idx}m")
            }
        }
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

/// Set the background color. Same encoding strategy as [`fg`].
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[49m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 40 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 92 + u16::from(idx))
            } else {
                write!(w, "\x1b[48;5;{idx}m")
            }
        }
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn emit(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn fg_encodings() {
        assert_eq!(emit(|w| fg(w, CellColor::Default)), "\x1b[39m");
        assert_eq!(emit(|w| fg(w, CellColor::RED)), "\x1b[31m");
        assert_eq!(emit(|w| fg(w, CellColor::LIGHT_RED)), "\x1b[91m");
        assert_eq!(emit(|w| fg(w, CellColor::Ansi256(200))), "\x1b[38;5;200m");
        assert_eq!(emit(|w| fg(w, CellColor::Rgb(1, 2, 3))), "\x1b[38;2;1;2;3m");
    }

    #[test]
    fn bg_encodings() {
        assert_eq!(emit(|w| bg(w, CellColor::Default)), "\x1b[49m");
        assert_eq!(emit(|w| bg(w, CellColor::BLUE)), "\x1b[44m");
        assert_eq!(emit(|w| bg(w, CellColor::WHITE)), "\x1b[107m");
        assert_eq!(emit(|w| bg(w, CellColor::Ansi256(17))), "\x1b[48;5;17m");
        assert_eq!(emit(|w| bg(w, CellColor::Rgb(9, 8, 7))), "\x1b[48;2;9;8;7m");
    }

    #[test]
    fn reset_sequence() {
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }
}
