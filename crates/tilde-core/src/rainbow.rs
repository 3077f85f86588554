//! Rainbow brackets.
//!
//! Repaints the brackets of a code line by nesting depth, continuing from the
//! counters the lines above left open. Uses the same region scanner and
//! bracket walk as the lexical state, so the colors on screen and the
//! counters carried to the next line always agree.

use tilde_theme::Theme;

use crate::colored::ColoredLine;
use crate::lexical::{LexicalState, LexicalSyntax, LineClass, Transition, regions, walk_brackets};

/// Paint bracket depths over `line`.
///
/// A no-op unless the line is code, the mode tracks brackets and the theme
/// has a rainbow.
pub fn apply(
    line: &mut ColoredLine,
    syntax: &LexicalSyntax,
    entering: &LexicalState,
    transition: &Transition,
    theme: &Theme,
) {
    if transition.class != LineClass::Code || !syntax.track_brackets || theme.rainbow.is_empty() {
        return;
    }
    let chars: Vec<char> = line.cells().iter().map(|c| c.ch).collect();
    let (regions, _) = regions(&chars, syntax, transition.resume);
    let cells = line.cells_mut();
    walk_brackets(&chars, &regions, entering.parens, entering.brackets, |i, depth| {
        if let Some(color) = theme.rainbow_color(depth as usize) {
            cells[i].fg = color;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tilde_term::color::CellColor;

    fn painted(mode: Mode, entering: LexicalState, text: &str, theme: &Theme) -> Vec<CellColor> {
        let syntax = LexicalSyntax::for_mode(mode);
        let transition = entering.advance(text, &syntax);
        let mut line = ColoredLine::uniform(text, theme.fg, theme.bg);
        apply(&mut line, &syntax, &entering, &transition, theme);
        line.cells().iter().map(|c| c.fg).collect()
    }

    #[test]
    fn nested_pairs_share_colors() {
        let t = Theme::dark();
        let c = painted(Mode::C, LexicalState::default(), "f(a[b])", &t);
        assert_eq!(c[1], t.rainbow[0]);
        assert_eq!(c[3], t.rainbow[1]);
        assert_eq!(c[5], t.rainbow[1]);
        assert_eq!(c[6], t.rainbow[0]);
        assert_eq!(c[0], t.fg);
    }

    #[test]
    fn continues_from_entering_depth() {
        let t = Theme::dark();
        let entering = LexicalState {
            brackets: 2,
            ..LexicalState::default()
        };
        let c = painted(Mode::Rust, entering, "  }", &t);
        assert_eq!(c[2], t.rainbow[1]);
    }

    #[test]
    fn brackets_in_strings_and_comments_stay() {
        let t = Theme::dark();
        let c = painted(Mode::Go, LexicalState::default(), "\"(\" // )", &t);
        assert!(c.iter().all(|&f| f == t.fg));
    }

    #[test]
    fn stops_at_unmatched_close() {
        let t = Theme::dark();
        let c = painted(Mode::C, LexicalState::default(), ") (", &t);
        assert_eq!(c[2], t.fg);
    }

    #[test]
    fn skipped_for_prose_and_empty_rainbow() {
        let t = Theme::dark();
        assert!(painted(Mode::Text, LexicalState::default(), "(x)", &t).iter().all(|&f| f == t.fg));
        let plain = Theme::terminal();
        assert!(painted(Mode::C, LexicalState::default(), "(x)", &plain).iter().all(|&f| f == plain.fg));
    }

    #[test]
    fn block_comment_interior_is_left_alone() {
        let t = Theme::dark();
        let entering = LexicalState {
            in_block_comment: true,
            ..LexicalState::default()
        };
        assert!(painted(Mode::C, entering, "( still comment", &t).iter().all(|&f| f == t.fg));
        let c = painted(Mode::C, entering, "*/ (x)", &t);
        assert_eq!(c[3], t.rainbow[0]);
    }

    /// Balanced bracket strings over `()[]{}` and filler.
    fn balanced() -> impl Strategy<Value = String> {
        let leaf = "[a-z ]{0,3}".prop_map(String::from);
        leaf.prop_recursive(4, 32, 3, |inner| {
            (prop::sample::select(vec![('(', ')'), ('[', ']'), ('{', '}')]), prop::collection::vec(inner, 0..3))
                .prop_map(|((open, close), kids)| format!("{open}{}{close}", kids.concat()))
        })
    }

    proptest! {
        #[test]
        fn balanced_pairs_match_colors(text in balanced()) {
            let t = Theme::dark();
            let c = painted(Mode::C, LexicalState::default(), &text, &t);
            let chars: Vec<char> = text.chars().collect();
            let mut stack = Vec::new();
            for (i, &ch) in chars.iter().enumerate() {
                match ch {
                    '(' | '[' | '{' => stack.push(i),
                    ')' | ']' | '}' => {
                        let open = stack.pop().unwrap();
                        prop_assert_eq!(c[open], c[i]);
                        prop_assert_eq!(Some(c[i]), t.rainbow_color(stack.len()));
                    }
                    _ => {}
                }
            }
        }
    }
}
