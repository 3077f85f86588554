//! Per-mode highlighting policy.
//!
//! Every mode maps to one [`Strategy`]. A strategy looks at a line (already
//! tokenized into `base` by the generic tokenizer) and either returns a
//! fully colored line or declines, in which case the generic policy colors
//! it from the lexical class of the line.
//!
//! Strategies never touch bracket counters: those were updated by
//! [`LexicalState::advance`](crate::lexical::LexicalState::advance) before
//! dispatch runs.

use tilde_theme::Theme;

use crate::colored::ColoredLine;
use crate::git;
use crate::lexical::{LexicalState, LineClass, Transition};
use crate::manpage;
use crate::markdown;
use crate::mode::Mode;

/// A named highlighting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// No block comments; `> ` quoted lines.
    Config,
    /// `///`, `//!` doc comments and Zig `\\` string lines.
    DocComment,
    /// Comment-led lines are comments, whole.
    LineCommentOnly,
    /// A trailing comment after code, split at the single marker.
    PairedSingleLine,
    /// Markdown.
    Fenced,
    /// Rendered man pages.
    Preformatted,
    /// Commit messages and rebase todo lists.
    Commit,
    /// Lexical class only.
    Generic,
}

/// The strategy for a mode.
#[must_use]
pub const fn strategy_for(mode: Mode) -> Strategy {
    match mode {
        Mode::Config | Mode::Json | Mode::Shell | Mode::CMake | Mode::Make => Strategy::Config,
        Mode::Rust | Mode::Zig | Mode::C | Mode::Cpp | Mode::CSharp => Strategy::DocComment,
        Mode::Ada
        | Mode::Agda
        | Mode::Elm
        | Mode::Haskell
        | Mode::Lua
        | Mode::Sql
        | Mode::Teal
        | Mode::Terra
        | Mode::Amber
        | Mode::Nroff => Strategy::LineCommentOnly,
        Mode::Vim
        | Mode::Lisp
        | Mode::Clojure
        | Mode::Assembly
        | Mode::Basic
        | Mode::Erlang
        | Mode::Prolog => Strategy::PairedSingleLine,
        Mode::Markdown => Strategy::Fenced,
        Mode::ManPage => Strategy::Preformatted,
        Mode::Git => Strategy::Commit,
        _ => Strategy::Generic,
    }
}

/// What a strategy produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Handled(ColoredLine),
    NotHandled,
}

/// Everything a strategy may look at besides the line itself.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub mode: Mode,
    pub theme: &'a Theme,
    /// Zero-based index of the line in the document.
    pub line_index: usize,
    pub line_count: usize,
    /// The state entering the line.
    pub entering: &'a LexicalState,
    /// The transition past the line.
    pub transition: &'a Transition,
}

/// A dispatched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub line: ColoredLine,
    /// Bracket rainbows may be painted over this line.
    pub rainbow_eligible: bool,
}

/// Color a tab-expanded `line` whose generic tokenization is `base`.
#[must_use]
pub fn dispatch(line: &str, base: ColoredLine, ctx: &Context<'_>) -> Dispatched {
    let strategy = strategy_for(ctx.mode);
    match apply(strategy, line, &base, ctx) {
        Outcome::Handled(colored) => Dispatched {
            line: colored,
            rainbow_eligible: strategy == Strategy::PairedSingleLine,
        },
        Outcome::NotHandled => Dispatched {
            line: generic(line, base, ctx),
            rainbow_eligible: true,
        },
    }
}

/// Run one strategy.
#[must_use]
pub fn apply(strategy: Strategy, line: &str, base: &ColoredLine, ctx: &Context<'_>) -> Outcome {
    let theme = ctx.theme;
    let trimmed = line.trim_start();
    let uniform = |color| Outcome::Handled(ColoredLine::uniform(line, color, theme.bg));

    match strategy {
        Strategy::Config if trimmed.starts_with("> ") => uniform(theme.markup.quote),
        Strategy::DocComment => {
            let doc = if ctx.mode == Mode::Zig {
                trimmed.starts_with("\\\\")
            } else {
                trimmed.starts_with("///") || trimmed.starts_with("//!")
            };
            if doc && ctx.entering.resume() == crate::lexical::Resume::Code {
                uniform(theme.multiline_string)
            } else {
                Outcome::NotHandled
            }
        }
        Strategy::LineCommentOnly => match ctx.mode.single_line_comment_marker() {
            Some(marker) if trimmed.starts_with(marker) => uniform(theme.multiline_comment),
            _ => Outcome::NotHandled,
        },
        Strategy::PairedSingleLine => paired(line, base, ctx),
        Strategy::Fenced => {
            markdown::highlight(line, ctx.entering.in_code_fence, ctx.entering.list_lookback, theme)
                .map_or(Outcome::NotHandled, Outcome::Handled)
        }
        Strategy::Preformatted => Outcome::Handled(manpage::highlight(
            line,
            ctx.line_index == 0,
            ctx.line_index + 1 == ctx.line_count,
            theme,
        )),
        Strategy::Commit => Outcome::Handled(git::highlight(line, ctx.line_index, theme)),
        Strategy::Config | Strategy::Generic => Outcome::NotHandled,
    }
}

/// Split at the comment marker when it occurs exactly once.
fn paired(line: &str, base: &ColoredLine, ctx: &Context<'_>) -> Outcome {
    let Some(marker) = ctx.mode.single_line_comment_marker() else {
        return Outcome::NotHandled;
    };
    let mut found = line.match_indices(marker);
    let (Some((byte, _)), None) = (found.next(), found.next()) else {
        return Outcome::NotHandled;
    };
    let at = line[..byte].chars().count();
    let mut colored = base.clone();
    colored.paint(at..colored.len(), ctx.theme.comment);
    Outcome::Handled(colored)
}

/// The lexical-class policy: tokenized lines as they are, block comment and
/// raw string interiors in one color.
fn generic(line: &str, base: ColoredLine, ctx: &Context<'_>) -> ColoredLine {
    let theme = ctx.theme;
    match ctx.transition.class {
        LineClass::Code | LineClass::LineComment => base,
        LineClass::BlockComment => ColoredLine::uniform(line, theme.multiline_comment, theme.bg),
        LineClass::RawString => ColoredLine::uniform(line, theme.multiline_string, theme.bg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::Keywords;
    use crate::lexical::LexicalSyntax;
    use crate::tokenize;
    use pretty_assertions::assert_eq;
    use tilde_term::color::CellColor;

    /// Dispatch every line of `lines` in order, as a render pass would.
    fn run(mode: Mode, lines: &[&str]) -> Vec<Dispatched> {
        let theme = Theme::dark();
        let syntax = LexicalSyntax::for_mode(mode);
        let keywords = Keywords::for_mode(mode);
        let mut state = LexicalState::default();
        let mut out = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let transition = state.advance(line, &syntax);
            let chars: Vec<char> = line.chars().collect();
            let base = tokenize::highlight(&chars, &syntax, keywords, transition.resume, &theme).unwrap();
            let ctx = Context {
                mode,
                theme: &theme,
                line_index: i,
                line_count: lines.len(),
                entering: &state,
                transition: &transition,
            };
            out.push(dispatch(line, base, &ctx));
            state = transition.state;
        }
        out
    }

    fn fgs(d: &Dispatched) -> Vec<CellColor> {
        d.line.cells().iter().map(|c| c.fg).collect()
    }

    #[test]
    fn strategy_table() {
        assert_eq!(strategy_for(Mode::Json), Strategy::Config);
        assert_eq!(strategy_for(Mode::Rust), Strategy::DocComment);
        assert_eq!(strategy_for(Mode::Haskell), Strategy::LineCommentOnly);
        assert_eq!(strategy_for(Mode::Vim), Strategy::PairedSingleLine);
        assert_eq!(strategy_for(Mode::Markdown), Strategy::Fenced);
        assert_eq!(strategy_for(Mode::ManPage), Strategy::Preformatted);
        assert_eq!(strategy_for(Mode::Git), Strategy::Commit);
        assert_eq!(strategy_for(Mode::Go), Strategy::Generic);
    }

    #[test]
    fn config_quote_line() {
        let t = Theme::dark();
        let d = &run(Mode::Config, &["> quoted"])[0];
        assert!(fgs(d).iter().all(|&c| c == t.markup.quote));
        assert!(!d.rainbow_eligible);
    }

    #[test]
    fn config_falls_through_to_tokenizer() {
        let t = Theme::dark();
        let d = &run(Mode::Config, &["on = yes"])[0];
        assert_eq!(fgs(d)[5], t.syntax.boolean);
        assert!(d.rainbow_eligible);
    }

    #[test]
    fn doc_comments() {
        let t = Theme::dark();
        let ds = run(Mode::Rust, &["/// Docs (here", "// plain"]);
        assert!(fgs(&ds[0]).iter().all(|&c| c == t.multiline_string));
        assert!(fgs(&ds[1]).iter().all(|&c| c == t.comment));
        let zig = run(Mode::Zig, &["    \\\\ raw line"]);
        assert!(fgs(&zig[0]).iter().all(|&c| c == t.multiline_string));
    }

    #[test]
    fn line_comment_only() {
        let t = Theme::dark();
        let d = &run(Mode::Haskell, &["  -- note"])[0];
        assert!(fgs(d).iter().all(|&c| c == t.multiline_comment));
    }

    #[test]
    fn paired_split() {
        let t = Theme::dark();
        let d = &run(Mode::Lisp, &["(setq x 1) ; set x"])[0];
        let c = fgs(d);
        assert_eq!(c[0], t.syntax.punctuation);
        assert!(c[11..].iter().all(|&f| f == t.comment));
        assert!(d.rainbow_eligible);
    }

    #[test]
    fn paired_marker_is_found_in_raw_text() {
        // A lone marker splits the line even inside a string literal.
        let t = Theme::dark();
        let d = &run(Mode::Lisp, &["(print \"a;b\")"])[0];
        let c = fgs(d);
        assert_eq!(c[0], t.syntax.punctuation);
        assert_eq!(c[8], t.syntax.string);
        assert!(c[9..].iter().all(|&f| f == t.comment));
    }

    #[test]
    fn paired_with_two_markers_falls_through() {
        let d = &run(Mode::Vim, &["echo \"a\" \"b\""])[0];
        assert!(d.rainbow_eligible);
    }

    #[test]
    fn generic_block_comment_interior() {
        let t = Theme::dark();
        let ds = run(Mode::Go, &["/* start", "middle", "end */"]);
        assert!(fgs(&ds[1]).iter().all(|&c| c == t.multiline_comment));
        assert_eq!(fgs(&ds[0])[0], t.comment);
    }

    #[test]
    fn generic_raw_string_interior() {
        let t = Theme::dark();
        let ds = run(Mode::Go, &["s := `first", "second", "third`"]);
        assert!(fgs(&ds[1]).iter().all(|&c| c == t.multiline_string));
        assert_eq!(fgs(&ds[0])[0], t.syntax.plain);
    }

    #[test]
    fn markdown_code_fence() {
        let t = Theme::dark();
        let ds = run(Mode::Markdown, &["```", "fn x() {}", "```", "text"]);
        assert!(fgs(&ds[1]).iter().all(|&c| c == t.markup.code));
        assert!(fgs(&ds[3]).iter().all(|&c| c == t.markup.text));
    }

    #[test]
    fn man_page_first_line() {
        let t = Theme::dark();
        let title = format!("LS(1){}LS(1)", "  ".repeat(12));
        let ds = run(Mode::ManPage, &[&title, "NAME"]);
        assert!(fgs(&ds[0]).iter().all(|&c| c == t.comment));
        assert!(fgs(&ds[1]).iter().all(|&c| c == t.man.section));
    }

    #[test]
    fn commit_subject() {
        let t = Theme::dark();
        let ds = run(Mode::Git, &["Add thing", "", "# comment"]);
        assert!(fgs(&ds[0]).iter().all(|&c| c == t.git.subject));
        assert!(fgs(&ds[2]).iter().all(|&c| c == t.comment));
    }
}
