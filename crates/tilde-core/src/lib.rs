//! # tilde-core — the rendering core of the tilde editor
//!
//! Turns a range of document lines into colored cells on a terminal
//! surface:
//!
//! - **[`document`]** — rope-backed line storage
//! - **[`position`]** — screen/data coordinates, tab expansion, scrolling
//! - **[`mode`]** — language modes and their lexical markers
//! - **[`lexical`]** — the cross-line lexical state and its checkpoint cache
//! - **[`tokenize`]** — the generic per-line tokenizer
//! - **[`dispatch`]** — per-mode highlighting strategies
//! - **[`markdown`]**, **[`manpage`]**, **[`git`]** — format highlighters
//! - **[`rainbow`]**, **[`search`]** — overlays
//! - **[`options`]** — render options and `:set`
//! - **[`render`]** — the `Session` and its render pass
//!
//! ```text
//! Document ──► LexicalCache ──► LexicalState::advance (once per row)
//!     │                                │
//!     ▼                                ▼
//! tokenize ──► dispatch ──► rainbow ──► search ──► Surface (tilde-term)
//! ```

pub mod colored;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod git;
pub mod keywords;
pub mod lexical;
pub mod manpage;
pub mod markdown;
pub mod mode;
pub mod options;
pub mod position;
pub mod rainbow;
pub mod render;
pub mod search;
pub mod tokenize;

pub use colored::{ColoredCell, ColoredLine};
pub use document::{Document, LineEnding};
pub use error::{LexError, OptionError, PositionError, RenderError};
pub use lexical::{LexicalCache, LexicalState, LexicalSyntax, LineClass, Transition};
pub use mode::Mode;
pub use options::{RenderOptions, SetDirective};
pub use position::Position;
pub use render::{FallbackOutput, RenderReport, Session, SharedSession, StderrFallback};
