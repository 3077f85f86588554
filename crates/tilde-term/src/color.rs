// SPDX-License-Identifier: MIT
//
// Terminal colors.
//
// A theme hands the rendering core opaque color values and the core passes
// them through untouched until they reach a cell. `CellColor` is that value:
// small, `Copy`, cheap to compare, and directly encodable as an SGR
// parameter. No color math happens on the render path.

use std::fmt;

// ─── CellColor ───────────────────────────────────────────────────────────────

/// Compact color for terminal cell storage.
///
/// This is what gets written to the [`FrameBuffer`](crate::FrameBuffer) and
/// converted to ANSI escape sequences on output.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// ANSI 256-color palette index. Indices 0–15 are the classic
    /// terminal colors and follow the user's terminal palette.
    Ansi256(u8),

    /// Terminal default color (inherits from terminal settings).
    #[default]
    Default,
}

impl CellColor {
    pub const BLACK: Self = Self::Ansi256(0);
    pub const RED: Self = Self::Ansi256(1);
    pub const GREEN: Self = Self::Ansi256(2);
    pub const YELLOW: Self = Self::Ansi256(3);
    pub const BLUE: Self = Self::Ansi256(4);
    pub const MAGENTA: Self = Self::Ansi256(5);
    pub const CYAN: Self = Self::Ansi256(6);
    pub const LIGHT_GRAY: Self = Self::Ansi256(7);
    pub const DARK_GRAY: Self = Self::Ansi256(8);
    pub const LIGHT_RED: Self = Self::Ansi256(9);
    pub const LIGHT_GREEN: Self = Self::Ansi256(10);
    pub const LIGHT_YELLOW: Self = Self::Ansi256(11);
    pub const LIGHT_BLUE: Self = Self::Ansi256(12);
    pub const LIGHT_MAGENTA: Self = Self::Ansi256(13);
    pub const LIGHT_CYAN: Self = Self::Ansi256(14);
    pub const WHITE: Self = Self::Ansi256(15);

    /// Whether this is the terminal default color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_default() {
        assert!(CellColor::default().is_default());
        assert!(!CellColor::RED.is_default());
        assert!(!CellColor::Rgb(0, 0, 0).is_default());
    }

    #[test]
    fn cell_color_is_4_bytes() {
        assert_eq!(std::mem::size_of::<CellColor>(), 4);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", CellColor::Rgb(255, 0, 16)), "#ff0010");
        assert_eq!(format!("{:?}", CellColor::Ansi256(42)), "ansi(42)");
        assert_eq!(format!("{}", CellColor::Default), "default");
    }
}
