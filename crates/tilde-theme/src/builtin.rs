//! Named preset themes.

use crate::theme::Theme;

/// Look up a builtin theme by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_theme(name: &str) -> Option<Theme> {
    match name {
        "default" | "dark" => Some(Theme::dark()),
        "light" => Some(Theme::light()),
        "terminal" => Some(Theme::terminal()),
        _ => None,
    }
}

/// List all available builtin theme names.
#[must_use]
pub const fn builtin_names() -> &'static [&'static str] {
    &["default", "dark", "light", "terminal"]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
