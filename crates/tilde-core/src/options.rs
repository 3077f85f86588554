//! Render options and the `:set` system.
//!
//! [`RenderOptions`] holds everything a render pass can be told to do
//! differently; [`parse_set`] turns the arguments of a `:set` command into
//! [`SetDirective`]s and [`RenderOptions::apply`] carries them out.
//!
//! # Supported syntax
//!
//! | Syntax           | Effect                        |
//! |------------------|-------------------------------|
//! | `:set option`    | Enable boolean / show numeric |
//! | `:set nooption`  | Disable boolean               |
//! | `:set option!`   | Toggle boolean                |
//! | `:set option?`   | Query current value           |
//! | `:set option=N`  | Assign numeric value          |
//! | `:set`           | Show changed options          |
//! | `:set all`       | Show all options              |
//!
//! # Option names
//!
//! | Full name  | Abbrev | Type    | Default               |
//! |------------|--------|---------|-----------------------|
//! | `syntax`   | `syn`  | bool    | true                  |
//! | `rainbow`  | `rb`   | bool    | true, false for prose |
//! | `hlsearch` | `hls`  | bool    | true                  |
//! | `tabstop`  | `ts`   | 1–32    | per mode              |

use std::fmt::Write as _;

use crate::error::OptionError;
use crate::mode::Mode;
use crate::position::MAX_TAB_WIDTH;

/// A parsed `:set` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    /// `:set option`
    On(String),

    /// `:set nooption`
    Off(String),

    /// `:set option!`
    Toggle(String),

    /// `:set option?`
    Query(String),

    /// `:set option=value`
    Assign(String, String),

    /// `:set` with no arguments.
    ShowChanged,

    /// `:set all`
    ShowAll,
}

/// Canonical name of a boolean option, for full names and abbreviations.
fn bool_option(name: &str) -> Option<&'static str> {
    match name {
        "syntax" | "syn" => Some("syntax"),
        "rainbow" | "rb" => Some("rainbow"),
        "hlsearch" | "hls" => Some("hlsearch"),
        _ => None,
    }
}

/// Canonical name of a numeric option.
fn numeric_option(name: &str) -> Option<&'static str> {
    match name {
        "tabstop" | "ts" => Some("tabstop"),
        _ => None,
    }
}

/// Returns `true` if `name` is a known boolean option (full name or abbreviation).
#[must_use]
pub fn is_bool_option(name: &str) -> bool {
    bool_option(name).is_some()
}

/// Returns `true` if `name` is a known numeric option (full name or abbreviation).
#[must_use]
pub fn is_numeric_option(name: &str) -> bool {
    numeric_option(name).is_some()
}

/// Parse the full `:set` arguments string into directives.
///
/// An empty argument string produces [`SetDirective::ShowChanged`].
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return vec![SetDirective::ShowChanged];
    }
    trimmed.split_whitespace().map(parse_set_arg).collect()
}

/// Parse a single `:set` argument into a directive.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if arg == "all" {
        return SetDirective::ShowAll;
    }
    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.to_string(), value.to_string());
    }
    if let Some(name) = arg.strip_suffix('?') {
        return SetDirective::Query(name.to_string());
    }
    if let Some(name) = arg.strip_suffix('!') {
        return SetDirective::Toggle(name.to_string());
    }
    // `nosyntax`, but not a name that merely starts with "no".
    if let Some(name) = arg.strip_prefix("no").filter(|n| is_bool_option(n)) {
        return SetDirective::Off(name.to_string());
    }
    if is_numeric_option(arg) {
        return SetDirective::Query(arg.to_string());
    }
    SetDirective::On(arg.to_string())
}

/// Format a boolean option for display: `"name"` or `"noname"`.
#[must_use]
pub fn format_bool(name: &str, value: bool) -> String {
    if value {
        name.to_string()
    } else {
        format!("no{name}")
    }
}

// ---------------------------------------------------------------------------
// RenderOptions
// ---------------------------------------------------------------------------

/// How a render pass draws lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Columns per tab, `1..=MAX_TAB_WIDTH`. A render pass clamps values
    /// set directly.
    pub tab_width: usize,
    pub syntax_highlight: bool,
    pub rainbow: bool,
    pub hlsearch: bool,
    /// Force the plain path, as if `NO_COLOR` were set.
    pub color_disabled: bool,
    /// Shown in the first column of every expanded tab.
    pub tab_marker: Option<char>,
    mode: Mode,
}

impl RenderOptions {
    /// Defaults for a mode.
    #[must_use]
    pub const fn for_mode(mode: Mode) -> Self {
        let (_, tab_width) = mode.tabs_spaces();
        Self {
            tab_width,
            syntax_highlight: true,
            rainbow: !mode.is_prose(),
            hlsearch: true,
            color_disabled: false,
            tab_marker: if matches!(mode, Mode::Make) { Some('·') } else { None },
            mode,
        }
    }

    /// The mode the defaults were taken from.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Apply one directive. Queries and listings return the text to show.
    ///
    /// # Errors
    ///
    /// [`OptionError`] for unknown names, tab widths outside
    /// `1..=MAX_TAB_WIDTH`, and directives that do not fit the option's type.
    pub fn apply(&mut self, directive: &SetDirective) -> Result<Option<String>, OptionError> {
        match directive {
            SetDirective::On(name) => self.set_bool(name, |_| true).map(|()| None),
            SetDirective::Off(name) => self.set_bool(name, |_| false).map(|()| None),
            SetDirective::Toggle(name) => self.set_bool(name, |v| !v).map(|()| None),
            SetDirective::Query(name) => self.query(name).map(Some),
            SetDirective::Assign(name, value) => self.assign(name, value).map(|()| None),
            SetDirective::ShowChanged => Ok(Some(self.listing(true))),
            SetDirective::ShowAll => Ok(Some(self.listing(false))),
        }
    }

    /// Parse and apply a whole `:set` argument string, stopping at the first
    /// error. Returns the collected output lines.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub fn apply_str(&mut self, args: &str) -> Result<Vec<String>, OptionError> {
        let mut out = Vec::new();
        for directive in parse_set(args) {
            if let Some(text) = self.apply(&directive)? {
                out.push(text);
            }
        }
        Ok(out)
    }

    fn bool_slot(&mut self, name: &str) -> Result<&mut bool, OptionError> {
        match bool_option(name) {
            Some("syntax") => Ok(&mut self.syntax_highlight),
            Some("rainbow") => Ok(&mut self.rainbow),
            Some("hlsearch") => Ok(&mut self.hlsearch),
            _ if is_numeric_option(name) => Err(OptionError::NotBoolean(name.to_string())),
            _ => Err(OptionError::Unknown(name.to_string())),
        }
    }

    fn set_bool(&mut self, name: &str, f: impl FnOnce(bool) -> bool) -> Result<(), OptionError> {
        let slot = self.bool_slot(name)?;
        *slot = f(*slot);
        Ok(())
    }

    fn query(&self, name: &str) -> Result<String, OptionError> {
        if let Some(canonical) = bool_option(name) {
            return Ok(format_bool(canonical, self.bool_value(canonical)));
        }
        if numeric_option(name).is_some() {
            return Ok(format!("tabstop={}", self.tab_width));
        }
        Err(OptionError::Unknown(name.to_string()))
    }

    fn assign(&mut self, name: &str, value: &str) -> Result<(), OptionError> {
        if is_bool_option(name) {
            return Err(OptionError::NotNumeric(name.to_string()));
        }
        if numeric_option(name).is_none() {
            return Err(OptionError::Unknown(name.to_string()));
        }
        match value.parse::<usize>() {
            Ok(n) if (1..=MAX_TAB_WIDTH).contains(&n) => {
                self.tab_width = n;
                Ok(())
            }
            _ => Err(OptionError::InvalidValue {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    fn bool_value(&self, canonical: &str) -> bool {
        match canonical {
            "syntax" => self.syntax_highlight,
            "rainbow" => self.rainbow,
            _ => self.hlsearch,
        }
    }

    /// Space-separated options, all of them or only those that differ from
    /// the mode's defaults.
    fn listing(&self, changed_only: bool) -> String {
        let defaults = Self::for_mode(self.mode);
        let mut out = String::new();
        for name in ["hlsearch", "rainbow", "syntax"] {
            let value = self.bool_value(name);
            if !changed_only || value != defaults.bool_value(name) {
                let _ = write!(out, "{} ", format_bool(name, value));
            }
        }
        if !changed_only || self.tab_width != defaults.tab_width {
            let _ = write!(out, "tabstop={}", self.tab_width);
        }
        out.trim_end().to_string()
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::for_mode(Mode::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
