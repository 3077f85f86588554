//! Theme assembly — every color the rendering core can ask for.
//!
//! Colors are terminal-ready `CellColor` values. The core treats them as
//! opaque: it copies them into cells and compares them for equality (search
//! highlighting normalizes space cells to `fg`), nothing else.

use tilde_term::color::CellColor;

use crate::syntax::{SyntaxPalette, TokenKind};

// ---------------------------------------------------------------------------
// Accent palettes
// ---------------------------------------------------------------------------

/// Colors for Markdown and other lightweight markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupPalette {
    /// `#` headings.
    pub heading: CellColor,
    /// Running text.
    pub text: CellColor,
    /// List bullets and numbers.
    pub list: CellColor,
    /// Fenced and indented code.
    pub code: CellColor,
    /// `>` block quotes (also used by config files).
    pub quote: CellColor,
    /// `[links](...)`.
    pub link: CellColor,
    /// `*emphasis*` and `` `inline code` ``.
    pub emphasis: CellColor,
    /// `![images](...)` and upper-case words in man pages.
    pub image: CellColor,
    /// `---` rules and table pipes.
    pub rule: CellColor,
}

/// Colors for rendered man pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManPalette {
    /// `NAME`, `SYNOPSIS`, ... section headers.
    pub section: CellColor,
    /// `-f`, `--flag`, `[optional]` tokens.
    pub flag: CellColor,
    /// Descriptive text.
    pub text: CellColor,
    /// Numbers and `<placeholders>`.
    pub italics: CellColor,
}

/// Colors for git commit messages and rebase todo lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GitPalette {
    /// The summary line.
    pub subject: CellColor,
    /// The part of the summary line past the recommended length.
    pub overlong: CellColor,
    /// `Signed-off-by:`-style trailer keys.
    pub trailer: CellColor,
    /// `pick`, `squash`, ... in rebase todo lists.
    pub command: CellColor,
    /// Commit hashes in rebase todo lists.
    pub hash: CellColor,
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// A complete color theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Name of this theme (e.g., "default", "light").
    pub name: String,

    /// Whether this is a dark theme.
    pub is_dark: bool,

    // ── Base ──────────────────────────────────────────────────
    /// Default text color; also used for padding and plain rows.
    pub fg: CellColor,
    /// Background of every cell the core writes.
    pub bg: CellColor,
    /// Foreground of search matches. The background is left alone.
    pub search_fg: CellColor,

    // ── Lexical context ───────────────────────────────────────
    /// Single-line comments.
    pub comment: CellColor,
    /// Lines inside a block comment.
    pub multiline_comment: CellColor,
    /// Lines inside a multi-line (raw) string.
    pub multiline_string: CellColor,

    // ── Code ──────────────────────────────────────────────────
    pub syntax: SyntaxPalette,
    /// Bracket colors by nesting depth, cycled.
    pub rainbow: Vec<CellColor>,

    // ── Formats ───────────────────────────────────────────────
    pub markup: MarkupPalette,
    pub man: ManPalette,
    pub git: GitPalette,
}

impl Theme {
    /// The default theme: light text on the terminal's dark background.
    #[must_use]
    pub fn dark() -> Self {
        use CellColor as C;

        Self {
            name: "default".to_string(),
            is_dark: true,
            fg: C::LIGHT_BLUE,
            bg: C::Default,
            search_fg: C::LIGHT_MAGENTA,
            comment: C::DARK_GRAY,
            multiline_comment: C::DARK_GRAY,
            multiline_string: C::MAGENTA,
            syntax: SyntaxPalette::dark(),
            rainbow: vec![
                C::LIGHT_RED,
                C::LIGHT_YELLOW,
                C::LIGHT_GREEN,
                C::LIGHT_CYAN,
                C::LIGHT_BLUE,
                C::LIGHT_MAGENTA,
            ],
            markup: MarkupPalette {
                heading: C::LIGHT_RED,
                text: C::LIGHT_BLUE,
                list: C::LIGHT_CYAN,
                code: C::LIGHT_GREEN,
                quote: C::YELLOW,
                link: C::MAGENTA,
                emphasis: C::WHITE,
                image: C::LIGHT_YELLOW,
                rule: C::LIGHT_GRAY,
            },
            man: ManPalette {
                section: C::LIGHT_RED,
                flag: C::RED,
                text: C::LIGHT_BLUE,
                italics: C::WHITE,
            },
            git: GitPalette {
                subject: C::LIGHT_GREEN,
                overlong: C::LIGHT_RED,
                trailer: C::LIGHT_CYAN,
                command: C::LIGHT_RED,
                hash: C::LIGHT_BLUE,
            },
        }
    }

    /// Dark text for light terminal backgrounds.
    #[must_use]
    pub fn light() -> Self {
        use CellColor as C;

        Self {
            name: "light".to_string(),
            is_dark: false,
            fg: C::BLACK,
            bg: C::Default,
            search_fg: C::RED,
            comment: C::DARK_GRAY,
            multiline_comment: C::DARK_GRAY,
            multiline_string: C::MAGENTA,
            syntax: SyntaxPalette::light(),
            rainbow: vec![C::RED, C::MAGENTA, C::BLUE, C::CYAN, C::GREEN],
            markup: MarkupPalette {
                heading: C::RED,
                text: C::BLACK,
                list: C::BLUE,
                code: C::GREEN,
                quote: C::MAGENTA,
                link: C::BLUE,
                emphasis: C::DARK_GRAY,
                image: C::MAGENTA,
                rule: C::DARK_GRAY,
            },
            man: ManPalette {
                section: C::RED,
                flag: C::BLUE,
                text: C::BLACK,
                italics: C::MAGENTA,
            },
            git: GitPalette {
                subject: C::GREEN,
                overlong: C::RED,
                trailer: C::BLUE,
                command: C::RED,
                hash: C::BLUE,
            },
        }
    }

    /// Terminal defaults everywhere except comments and search matches.
    ///
    /// The rainbow is empty, so bracket coloring is a no-op with this theme.
    #[must_use]
    pub fn terminal() -> Self {
        use CellColor::Default;

        Self {
            name: "terminal".to_string(),
            is_dark: true,
            fg: Default,
            bg: Default,
            search_fg: CellColor::YELLOW,
            comment: CellColor::DARK_GRAY,
            multiline_comment: CellColor::DARK_GRAY,
            multiline_string: Default,
            syntax: SyntaxPalette::uniform(Default),
            rainbow: Vec::new(),
            markup: MarkupPalette {
                heading: Default,
                text: Default,
                list: Default,
                code: Default,
                quote: CellColor::DARK_GRAY,
                link: Default,
                emphasis: Default,
                image: Default,
                rule: Default,
            },
            man: ManPalette {
                section: Default,
                flag: Default,
                text: Default,
                italics: Default,
            },
            git: GitPalette {
                subject: Default,
                overlong: CellColor::RED,
                trailer: Default,
                command: Default,
                hash: Default,
            },
        }
    }

    /// Color for a token kind, with comments resolved against this theme.
    #[inline]
    #[must_use]
    pub const fn token(&self, kind: TokenKind) -> CellColor {
        self.syntax.color(kind, self.comment)
    }

    /// Rainbow color for a nesting depth, or `None` when the rainbow is empty.
    #[must_use]
    pub fn rainbow_color(&self, depth: usize) -> Option<CellColor> {
        if self.rainbow.is_empty() {
            return None;
        }
        Some(self.rainbow[depth % self.rainbow.len()])
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
