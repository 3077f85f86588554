// SPDX-License-Identifier: MIT
//
// tilde-term — the terminal surface for tilde.
//
// Everything the rendering core draws lands in a `FrameBuffer`: a flat grid
// of `Cell`s, each one code point plus resolved foreground and background
// colors. The core only sees the `Surface` trait (write a run of text, write
// one cell, ask for width and height), so tests can paint into a plain
// framebuffer and inspect it cell by cell.
//
// Getting a frame onto a real terminal is the job of `output`, which walks
// the grid and emits SGR sequences only when the style actually changes.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod output;
pub mod terminal;

pub use buffer::{FrameBuffer, Surface};
pub use cell::Cell;
pub use color::CellColor;
