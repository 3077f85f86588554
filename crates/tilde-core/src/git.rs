//! Commit message and rebase todo highlighting.

use std::sync::LazyLock;

use regex::Regex;
use tilde_theme::Theme;

use crate::colored::ColoredLine;

/// Recommended maximum length of the summary line.
pub const SUBJECT_LIMIT: usize = 50;

// `None` only if a pattern fails to compile; lines then fall through.
static TODO_COMMAND: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(pick|p|reword|r|edit|e|squash|s|fixup|f|drop|d|merge|m)\s+([0-9a-f]{7,40})\b").ok()
});

static TRAILER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*:\s").ok());

/// Highlight one line of a commit message or rebase todo list.
///
/// `index` is the zero-based line number; line 0 is the summary.
#[must_use]
pub fn highlight(line: &str, index: usize, theme: &Theme) -> ColoredLine {
    let git = &theme.git;

    if line.starts_with('#') {
        return ColoredLine::uniform(line, theme.comment, theme.bg);
    }

    if let Some(caps) = TODO_COMMAND.as_ref().and_then(|re| re.captures(line)) {
        let mut colored = ColoredLine::uniform(line, git.subject, theme.bg);
        let command = caps.get(1).map_or(0, |m| m.as_str().chars().count());
        colored.paint(0..command, git.command);
        if let Some(hash) = caps.get(2) {
            let start = line[..hash.start()].chars().count();
            colored.paint(start..start + hash.as_str().len(), git.hash);
        }
        return colored;
    }

    if index == 0 {
        let mut colored = ColoredLine::uniform(line, git.subject, theme.bg);
        colored.paint(SUBJECT_LIMIT..colored.len(), git.overlong);
        return colored;
    }

    if let Some(m) = TRAILER.as_ref().and_then(|re| re.find(line)) {
        let mut colored = ColoredLine::uniform(line, theme.fg, theme.bg);
        colored.paint(0..line[..m.end()].chars().count(), git.trailer);
        return colored;
    }

    ColoredLine::uniform(line, theme.fg, theme.bg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tilde_term::color::CellColor;

    fn fgs(line: &ColoredLine) -> Vec<CellColor> {
        line.cells().iter().map(|c| c.fg).collect()
    }

    #[test]
    fn comments() {
        let t = Theme::dark();
        let c = fgs(&highlight("# Please enter the commit message", 3, &t));
        assert!(c.iter().all(|&f| f == t.comment));
    }

    #[test]
    fn long_subject_tail() {
        let t = Theme::dark();
        let subject = "x".repeat(SUBJECT_LIMIT + 5);
        let c = fgs(&highlight(&subject, 0, &t));
        assert_eq!(c[SUBJECT_LIMIT - 1], t.git.subject);
        assert_eq!(c[SUBJECT_LIMIT], t.git.overlong);
    }

    #[test]
    fn body_lines_are_plain() {
        let t = Theme::dark();
        let c = fgs(&highlight("Explain the change.", 2, &t));
        assert!(c.iter().all(|&f| f == t.fg));
    }

    #[test]
    fn trailer_key() {
        let t = Theme::dark();
        let c = fgs(&highlight("Signed-off-by: A <a@b.c>", 4, &t));
        assert_eq!(&c[..15], &[t.git.trailer; 15]);
        assert_eq!(c[15], t.fg);
    }

    #[test]
    fn rebase_todo() {
        let t = Theme::dark();
        let c = fgs(&highlight("pick 1a2b3c4d Fix it", 0, &t));
        assert_eq!(&c[..4], &[t.git.command; 4]);
        assert_eq!(&c[5..13], &[t.git.hash; 8]);
        assert_eq!(c[14], t.git.subject);
    }

    #[test]
    fn prose_starting_with_command_word_needs_whitespace() {
        let t = Theme::dark();
        let c = fgs(&highlight("pickle", 2, &t));
        assert!(c.iter().all(|&f| f == t.fg));
    }
}
