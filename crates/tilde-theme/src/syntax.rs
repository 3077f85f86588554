//! Syntax token colors.
//!
//! The tokenizer in `tilde-core` classifies every code point of a line into
//! a [`TokenKind`]; the [`SyntaxPalette`] turns that kind into a color.
//! Comments are deliberately absent here: comment colors live on the
//! [`Theme`](crate::Theme) because the block-comment and raw-string
//! colorizers use them without going through the tokenizer.

use tilde_term::color::CellColor;

// ---------------------------------------------------------------------------
// TokenKind
// ---------------------------------------------------------------------------

/// What a run of characters in a line of code is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifiers, whitespace, anything unclassified.
    Plain,
    /// Language keywords (`fn`, `if`, `return`, ...).
    Keyword,
    /// Capitalized identifiers and builtin type names.
    Type,
    /// String literals, quotes included.
    String,
    /// Character literals, quotes included.
    Char,
    /// Numeric literals.
    Number,
    /// `true`/`false` and their config-file cousins.
    Boolean,
    /// Line or inline block comments.
    Comment,
    /// Brackets, separators.
    Punctuation,
    /// Operators (`+`, `==`, `->`, ...).
    Operator,
}

// ---------------------------------------------------------------------------
// SyntaxPalette
// ---------------------------------------------------------------------------

/// One color per token kind (except comments, see module docs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxPalette {
    pub plain: CellColor,
    pub keyword: CellColor,
    pub type_name: CellColor,
    pub string: CellColor,
    pub char: CellColor,
    pub number: CellColor,
    pub boolean: CellColor,
    pub punctuation: CellColor,
    pub operator: CellColor,
}

impl SyntaxPalette {
    /// Dark-background palette using the 16 classic ANSI colors.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            plain: CellColor::LIGHT_GRAY,
            keyword: CellColor::LIGHT_RED,
            type_name: CellColor::LIGHT_MAGENTA,
            string: CellColor::LIGHT_YELLOW,
            char: CellColor::LIGHT_GREEN,
            number: CellColor::LIGHT_CYAN,
            boolean: CellColor::LIGHT_YELLOW,
            punctuation: CellColor::LIGHT_BLUE,
            operator: CellColor::RED,
        }
    }

    /// Light-background palette.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            plain: CellColor::BLACK,
            keyword: CellColor::RED,
            type_name: CellColor::MAGENTA,
            string: CellColor::BLUE,
            char: CellColor::GREEN,
            number: CellColor::CYAN,
            boolean: CellColor::BLUE,
            punctuation: CellColor::DARK_GRAY,
            operator: CellColor::RED,
        }
    }

    /// Every kind in one color.
    #[must_use]
    pub const fn uniform(color: CellColor) -> Self {
        Self {
            plain: color,
            keyword: color,
            type_name: color,
            string: color,
            char: color,
            number: color,
            boolean: color,
            punctuation: color,
            operator: color,
        }
    }

    /// The color for a token kind. `comment` is supplied by the caller.
    #[must_use]
    pub const fn color(&self, kind: TokenKind, comment: CellColor) -> CellColor {
        match kind {
            TokenKind::Plain => self.plain,
            TokenKind::Keyword => self.keyword,
            TokenKind::Type => self.type_name,
            TokenKind::String => self.string,
            TokenKind::Char => self.char,
            TokenKind::Number => self.number,
            TokenKind::Boolean => self.boolean,
            TokenKind::Comment => comment,
            TokenKind::Punctuation => self.punctuation,
            TokenKind::Operator => self.operator,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
