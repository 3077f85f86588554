//! Error types for the rendering core.
//!
//! Nothing here is fatal to the editor. A [`RenderError::InvalidRange`] is
//! rejected before any cell is written; everything else degrades: a
//! [`LexError`] turns one row into plain text, a [`PositionError`] tells a
//! caller the cursor could not move, and an [`OptionError`] rejects one
//! `:set` directive.

use thiserror::Error;

/// Errors from a render pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The requested row range is empty or inverted.
    #[error("invalid line range: from ({from}) must be less than to ({to})")]
    InvalidRange { from: usize, to: usize },

    /// The pass completed but some rows mix code points whose display width
    /// does not match their count, so columns on screen may be off.
    #[error("unsupported unicode on {} line(s), first at line {}", .lines.len(), .lines.first().map_or(0, |l| l + 1))]
    UnsupportedUnicode { lines: Vec<usize> },
}

/// Errors from the per-line tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("line too long to tokenize: {len} characters (limit {limit})")]
    TooLong { len: usize, limit: usize },

    #[error("NUL character at column {column}")]
    Nul { column: usize },
}

/// Errors from cursor and coordinate operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The screen column lies past the end of the line's data. `len` is the
    /// line length in characters, the closest valid data position.
    #[error("position is after data (line has {len} characters)")]
    AfterData { len: usize },

    #[error("already at the top of the viewport")]
    AtTop,

    #[error("already at the bottom of the viewport")]
    AtBottom,
}

/// Errors from applying `:set` directives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("unknown option: {0}")]
    Unknown(String),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },

    #[error("{0} is not a boolean option")]
    NotBoolean(String),

    #[error("{0} is a boolean option and takes no value")]
    NotNumeric(String),
}
