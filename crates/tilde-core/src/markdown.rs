//! Markdown highlighting.
//!
//! Block structure (fences, headings, quotes, lists, rules, tables) decides
//! the color of a whole line; inside running text a small inline scanner
//! picks out `code`, *emphasis*, [links](...) and ![images](...). Fence and
//! list context come from the lexical state entering the line.

use tilde_term::color::CellColor;
use tilde_theme::Theme;

use crate::colored::ColoredLine;

/// A list bullet or number: `- `, `* `, `+ `, `1. `, `2) `.
#[must_use]
pub fn is_list_item(trimmed: &str) -> bool {
    if ["- ", "* ", "+ "].iter().any(|b| trimmed.starts_with(b)) {
        return true;
    }
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && (trimmed[digits..].starts_with(". ") || trimmed[digits..].starts_with(") "))
}

/// A ``` or ~~~ code fence.
#[must_use]
pub fn is_fence(trimmed: &str) -> bool {
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// `---`, `***`, `_ _ _`: at least three of one marker and nothing else.
fn is_rule(trimmed: &str) -> bool {
    let Some(marker) = trimmed.chars().next().filter(|&c| matches!(c, '-' | '*' | '_')) else {
        return false;
    };
    trimmed.chars().all(|c| c == marker || c == ' ') && trimmed.chars().filter(|&c| c == marker).count() >= 3
}

/// Number of leading `#` when followed by a space or the end of the line.
fn heading_level(trimmed: &str) -> usize {
    let level = trimmed.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&level) && trimmed[level..].chars().next().is_none_or(char::is_whitespace) {
        level
    } else {
        0
    }
}

/// Highlight one (tab-expanded) line. `None` leaves a blank line to the
/// generic tokenizer.
///
/// `in_code_block` and `list_lookback` describe the lines above.
#[must_use]
pub fn highlight(line: &str, in_code_block: bool, list_lookback: [bool; 2], theme: &Theme) -> Option<ColoredLine> {
    let m = &theme.markup;
    let trimmed = line.trim();

    if is_fence(trimmed) || in_code_block {
        return Some(ColoredLine::uniform(line, m.code, theme.bg));
    }
    if trimmed.is_empty() {
        return None;
    }
    if heading_level(trimmed) > 0 {
        return Some(ColoredLine::uniform(line, m.heading, theme.bg));
    }
    if is_rule(trimmed) {
        return Some(ColoredLine::uniform(line, m.rule, theme.bg));
    }
    if trimmed.starts_with('>') {
        return Some(ColoredLine::uniform(line, m.quote, theme.bg));
    }

    let chars: Vec<char> = line.chars().collect();
    let indent = chars.iter().take_while(|c| c.is_whitespace()).count();

    if is_list_item(trimmed) {
        let bullet_end = indent + trimmed.find(' ').unwrap_or(0);
        let mut colored = inline(&chars, m.text, theme);
        colored.paint(indent..bullet_end, m.list);
        return Some(colored);
    }
    if indent > 0 && (list_lookback[0] || list_lookback[1]) {
        return Some(inline(&chars, m.text, theme));
    }
    if indent >= 4 {
        return Some(ColoredLine::uniform(line, m.code, theme.bg));
    }
    if trimmed.starts_with('|') {
        let mut colored = inline(&chars, m.text, theme);
        for (i, &c) in chars.iter().enumerate() {
            if c == '|' {
                colored.paint(i..i + 1, m.rule);
            }
        }
        return Some(colored);
    }
    Some(inline(&chars, m.text, theme))
}

/// Color running text: `code`, *emphasis* / **strong** / _emphasis_,
/// [links](...) and ![images](...).
fn inline(chars: &[char], text: CellColor, theme: &Theme) -> ColoredLine {
    let m = &theme.markup;
    let mut colors = vec![text; chars.len()];
    let find = |from: usize, c: char| (from..chars.len()).find(|&j| chars[j] == c);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let span = match c {
            '`' => find(i + 1, '`').map(|j| (j + 1, m.emphasis)),
            '!' if chars.get(i + 1) == Some(&'[') => link_end(chars, i + 1).map(|j| (j, m.image)),
            '[' => link_end(chars, i).map(|j| (j, m.link)),
            '*' | '_' if chars.get(i + 1).is_some_and(|n| !n.is_whitespace()) => {
                let run = if chars.get(i + 1) == Some(&c) { 2 } else { 1 };
                emphasis_end(chars, i, c, run).map(|j| (j, m.emphasis))
            }
            _ => None,
        };
        match span {
            Some((end, color)) => {
                colors[i..end].fill(color);
                i = end;
            }
            None => i += 1,
        }
    }
    ColoredLine::from_colors(chars, &colors, theme.bg)
}

/// `[text](target)` starting at `open`: one past the `)`.
fn link_end(chars: &[char], open: usize) -> Option<usize> {
    let close = (open + 1..chars.len()).find(|&j| chars[j] == ']')?;
    if chars.get(close + 1) != Some(&'(') {
        return None;
    }
    (close + 2..chars.len()).find(|&j| chars[j] == ')').map(|j| j + 1)
}

/// The closing run of `run` markers, preceded by a non-space: one past it.
fn emphasis_end(chars: &[char], open: usize, marker: char, run: usize) -> Option<usize> {
    let mut j = open + run + 1;
    while j + run <= chars.len() {
        if chars[j..j + run].iter().all(|&c| c == marker) && !chars[j - 1].is_whitespace() {
            return Some(j + run);
        }
        j += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn colors(line: &str, in_code: bool, lookback: [bool; 2]) -> Vec<CellColor> {
        highlight(line, in_code, lookback, &Theme::dark())
            .unwrap()
            .cells()
            .iter()
            .map(|c| c.fg)
            .collect()
    }

    #[test]
    fn list_items() {
        assert!(is_list_item("- a"));
        assert!(is_list_item("12. twelve"));
        assert!(is_list_item("3) three"));
        assert!(!is_list_item("-a"));
        assert!(!is_list_item("1.5 is a number"));
    }

    #[test]
    fn fence_lines_are_code_colored() {
        let m = Theme::dark().markup;
        assert!(colors("```rust", false, [false; 2]).iter().all(|&c| c == m.code));
        assert!(colors("~~~", true, [false; 2]).iter().all(|&c| c == m.code));
        assert!(is_fence("```"));
        assert!(!is_fence("``"));
    }

    #[test]
    fn code_block_is_uniform() {
        let m = Theme::dark().markup;
        assert!(colors("let x = [1];", true, [false; 2]).iter().all(|&c| c == m.code));
    }

    #[test]
    fn heading_and_rule() {
        let m = Theme::dark().markup;
        assert!(colors("## Title", false, [false; 2]).iter().all(|&c| c == m.heading));
        assert!(colors("---", false, [false; 2]).iter().all(|&c| c == m.rule));
        assert_eq!(heading_level("#hashtag"), 0);
    }

    #[test]
    fn blank_line_not_handled() {
        assert_eq!(highlight("   ", false, [false; 2], &Theme::dark()), None);
    }

    #[test]
    fn bullet_gets_list_color() {
        let m = Theme::dark().markup;
        let c = colors("  - item", false, [false; 2]);
        assert_eq!(c[2], m.list);
        assert_eq!(c[4], m.text);
    }

    #[test]
    fn list_continuation_is_text_not_code() {
        let m = Theme::dark().markup;
        assert!(colors("    more", false, [true, false]).iter().all(|&c| c == m.text));
        assert!(colors("    code", false, [false, false]).iter().all(|&c| c == m.code));
    }

    #[test]
    fn inline_spans() {
        let m = Theme::dark().markup;
        let c = colors("a `b` [l](u) *e*", false, [false; 2]);
        assert_eq!(c[0], m.text);
        assert_eq!(&c[2..5], &[m.emphasis; 3]);
        assert_eq!(&c[6..12], &[m.link; 6]);
        assert_eq!(&c[13..16], &[m.emphasis; 3]);
    }

    #[test]
    fn image_beats_link() {
        let m = Theme::dark().markup;
        let c = colors("![alt](x.png)", false, [false; 2]);
        assert!(c.iter().all(|&col| col == m.image));
    }

    #[test]
    fn unclosed_emphasis_is_text() {
        let m = Theme::dark().markup;
        assert!(colors("2 * 3", false, [false; 2]).iter().all(|&c| c == m.text));
    }
}
