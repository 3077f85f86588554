//! Search match highlighting.

use tilde_theme::Theme;

use crate::colored::ColoredLine;

/// Recolor every occurrence of `term` in `line` with the search color.
///
/// Space cells are first reset to the theme foreground so a previous
/// highlight never bleeds over whitespace. Matching is case-sensitive and
/// non-overlapping; backgrounds are left as they are.
pub fn highlight(line: &mut ColoredLine, term: &str, theme: &Theme) {
    for cell in line.cells_mut() {
        if cell.ch == ' ' {
            cell.fg = theme.fg;
        }
    }

    let needle: Vec<char> = term.chars().collect();
    let Some(&first) = needle.first() else {
        return;
    };
    let cells = line.cells_mut();
    let mut i = 0;
    while i + needle.len() <= cells.len() {
        let hit = cells[i].ch == first
            && cells[i..i + needle.len()]
                .iter()
                .zip(&needle)
                .all(|(cell, &c)| cell.ch == c);
        if hit {
            for cell in &mut cells[i..i + needle.len()] {
                cell.fg = theme.search_fg;
            }
            i += needle.len();
        } else {
            i += 1;
        }
    }
}
