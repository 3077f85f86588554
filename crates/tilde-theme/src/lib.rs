//! # tilde-theme — color themes for the rendering core
//!
//! A theme is a bag of pre-resolved terminal colors. The rendering core
//! never does color math: it asks the theme for "the comment color" or "the
//! third rainbow color" and writes the returned [`CellColor`] into a cell.
//!
//! # Architecture
//!
//! ```text
//! TokenKind (from the tokenizer)
//!     │
//!     ▼
//! syntax.rs:  SyntaxPalette — one color per token kind
//!     │
//!     ▼
//! theme.rs:   Theme — syntax palette + UI colors + markup/man/git accents
//!     │
//!     ▼
//! builtin.rs: named presets ("default", "light", "terminal", ...)
//! ```
//!
//! [`CellColor`]: tilde_term::CellColor

pub mod builtin;
pub mod syntax;
pub mod theme;

pub use builtin::{builtin_names, builtin_theme};
pub use syntax::{SyntaxPalette, TokenKind};
pub use theme::{GitPalette, ManPalette, MarkupPalette, Theme};
