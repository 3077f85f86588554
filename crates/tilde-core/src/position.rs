//! Data and screen coordinates.
//!
//! Three coordinate systems meet here:
//!
//! - **data**: `(line, index)` where `index` counts code points in the raw
//!   line, tabs included as one;
//! - **screen**: the column in the tab-expanded line, where every tab spans
//!   exactly `tab_width` columns and every other code point spans one;
//! - **window**: the screen column minus the horizontal scroll `offset_x`,
//!   and the line minus the vertical scroll `offset_y`.
//!
//! Tabs are always expanded before slicing, never after.

use std::borrow::Cow;

use crate::document::Document;
use crate::error::PositionError;

// ---------------------------------------------------------------------------
// Free helpers
// ---------------------------------------------------------------------------

/// Widest tab a render pass will expand.
pub const MAX_TAB_WIDTH: usize = 32;

/// The index of the code point whose screen span contains `col`.
///
/// A column equal to the expanded width of the line maps to the line length
/// (the slot after the last character).
///
/// # Errors
///
/// [`PositionError::AfterData`] when `col` lies past that slot.
pub fn data_position_for(col: usize, line: &str, tab_width: usize) -> Result<usize, PositionError> {
    let mut screen = 0;
    let mut len = 0;
    for (i, ch) in line.chars().enumerate() {
        let span = if ch == '\t' { tab_width } else { 1 };
        if col < screen + span {
            return Ok(i);
        }
        screen += span;
        len = i + 1;
    }
    if col == screen {
        Ok(len)
    } else {
        Err(PositionError::AfterData { len })
    }
}

/// Width of `line` once tabs are expanded.
#[must_use]
pub fn screen_width(line: &str, tab_width: usize) -> usize {
    let (count, tabs) = line.chars().fold((0usize, 0usize), |(count, tabs), ch| {
        (count + 1, tabs + usize::from(ch == '\t'))
    });
    count.saturating_add(tabs.saturating_mul(tab_width.saturating_sub(1)))
}

/// Screen column of the first non-blank character.
#[must_use]
pub fn first_screen_position(line: &str, tab_width: usize) -> usize {
    line.chars()
        .map_while(|ch| match ch {
            '\t' => Some(tab_width),
            ' ' => Some(1),
            _ => None,
        })
        .fold(0, usize::saturating_add)
}

/// Expand every tab to `tab_width` columns.
///
/// With a `marker`, the first column of each expanded tab shows it; the rest
/// are spaces. Lines without tabs are returned as-is.
#[must_use]
pub fn expand_tabs(line: &str, tab_width: usize, marker: Option<char>) -> Cow<'_, str> {
    if !line.contains('\t') {
        return Cow::Borrowed(line);
    }
    let tabs = line.matches('\t').count();
    let mut out = String::with_capacity(line.len().saturating_add(tab_width.min(MAX_TAB_WIDTH).saturating_mul(tabs)));
    for ch in line.chars() {
        if ch != '\t' {
            out.push(ch);
            continue;
        }
        for i in 0..tab_width {
            match marker {
                Some(m) if i == 0 => out.push(m),
                _ => out.push(' '),
            }
        }
    }
    Cow::Owned(out)
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Cursor and scroll state of one open buffer.
///
/// Invariant: `data_y() == offset_y + screen_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    sx: usize,
    sy: usize,
    offset_x: usize,
    offset_y: usize,
    scroll_speed: usize,
    saved_x: usize,
}

impl Position {
    /// The top-left position. `scroll_speed` is the default step for
    /// [`scroll_down`](Self::scroll_down) and [`scroll_up`](Self::scroll_up).
    #[must_use]
    pub const fn new(scroll_speed: usize) -> Self {
        Self {
            sx: 0,
            sy: 0,
            offset_x: 0,
            offset_y: 0,
            scroll_speed,
            saved_x: 0,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn screen_x(&self) -> usize {
        self.sx
    }

    #[inline]
    #[must_use]
    pub const fn screen_y(&self) -> usize {
        self.sy
    }

    #[inline]
    #[must_use]
    pub const fn offset_x(&self) -> usize {
        self.offset_x
    }

    #[inline]
    #[must_use]
    pub const fn offset_y(&self) -> usize {
        self.offset_y
    }

    #[inline]
    #[must_use]
    pub const fn scroll_speed(&self) -> usize {
        self.scroll_speed
    }

    /// Sticky column remembered for vertical moves.
    #[inline]
    #[must_use]
    pub const fn saved_x(&self) -> usize {
        self.saved_x
    }

    /// The document line under the cursor.
    #[inline]
    #[must_use]
    pub const fn data_y(&self) -> usize {
        self.offset_y + self.sy
    }

    /// The code-point index under the cursor.
    ///
    /// # Errors
    ///
    /// [`PositionError::AfterData`] when the cursor sits past the end of the
    /// line.
    pub fn data_x(&self, doc: &Document, tab_width: usize) -> Result<usize, PositionError> {
        data_position_for(self.offset_x + self.sx, &doc.line(self.data_y()), tab_width)
    }

    /// 1-based line number for display.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.data_y() + 1
    }

    /// 1-based column number for display. A cursor past the end of the line
    /// reports the slot after the last character.
    #[must_use]
    pub fn col_number(&self, doc: &Document, tab_width: usize) -> usize {
        match self.data_x(doc, tab_width) {
            Ok(x) | Err(PositionError::AfterData { len: x }) => x + 1,
            Err(_) => 1,
        }
    }

    // -- Horizontal ---------------------------------------------------------

    /// Place the cursor at screen column `x` of the expanded line, scrolling
    /// horizontally when `x` does not fit in `viewport_width`.
    pub const fn set_x(&mut self, x: usize, viewport_width: usize) {
        if x < viewport_width {
            self.offset_x = 0;
            self.sx = x;
        } else {
            self.offset_x = x + 1 - viewport_width;
            self.sx = x - self.offset_x;
        }
    }

    /// Remember the current screen column.
    pub const fn save_x(&mut self) {
        self.saved_x = self.offset_x + self.sx;
    }

    /// Apply `offset_x` to an already tab-expanded line, then truncate it to
    /// `viewport_width` code points.
    #[must_use]
    pub fn chop(&self, expanded: &str, viewport_width: usize) -> String {
        expanded.chars().skip(self.offset_x).take(viewport_width).collect()
    }

    // -- Vertical -----------------------------------------------------------

    /// Move the cursor one row up within the viewport.
    ///
    /// # Errors
    ///
    /// [`PositionError::AtTop`] on the first viewport row.
    pub const fn up(&mut self) -> Result<(), PositionError> {
        if self.sy == 0 {
            return Err(PositionError::AtTop);
        }
        self.sy -= 1;
        Ok(())
    }

    /// Move the cursor one row down within the viewport.
    ///
    /// # Errors
    ///
    /// [`PositionError::AtBottom`] on the last viewport row or the last line
    /// of the document.
    pub const fn down(
        &mut self,
        viewport_height: usize,
        line_count: usize,
    ) -> Result<(), PositionError> {
        if self.sy + 1 >= viewport_height || self.data_y() + 1 >= line_count {
            return Err(PositionError::AtBottom);
        }
        self.sy += 1;
        Ok(())
    }

    /// Make `target` visible.
    ///
    /// A target already on screen only moves the cursor row. Otherwise the
    /// view jumps, keeping the cursor on its current screen row where
    /// possible and clamping at the start and end of the document.
    ///
    /// Returns whether the last line of the document is now on screen.
    pub fn scroll_to_keep_visible(
        &mut self,
        target: usize,
        viewport_height: usize,
        line_count: usize,
    ) -> bool {
        let h = viewport_height.max(1);
        let target = target.min(line_count.saturating_sub(1));
        let last_offset = line_count.saturating_sub(h);

        if target >= self.offset_y && target < self.offset_y + h {
            self.sy = target - self.offset_y;
        } else if target < h {
            self.offset_y = 0;
            self.sy = target;
        } else {
            let row = self.sy.min(h - 1);
            let wanted = target - row.min(target);
            if wanted > last_offset {
                self.offset_y = last_offset;
                self.sy = target - last_offset;
            } else {
                self.offset_y = wanted;
                self.sy = target - wanted;
            }
        }
        self.offset_y + h >= line_count
    }

    /// Scroll the view down by up to `speed` lines, stopping when the last
    /// line reaches the bottom row. Returns whether anything moved.
    pub fn scroll_down(&mut self, speed: usize, line_count: usize, viewport_height: usize) -> bool {
        let last_offset = line_count.saturating_sub(viewport_height);
        if self.offset_y >= last_offset {
            return false;
        }
        self.offset_x = 0;
        self.offset_y += speed.min(last_offset - self.offset_y);
        true
    }

    /// Scroll the view up by up to `speed` lines. Returns `false` at the top.
    pub fn scroll_up(&mut self, speed: usize) -> bool {
        if self.offset_y == 0 {
            return false;
        }
        self.offset_x = 0;
        self.offset_y -= speed.min(self.offset_y);
        true
    }

    /// Put the cursor line in the middle of the viewport, or as close as the
    /// start of the document allows.
    pub const fn center(&mut self, viewport_height: usize) {
        let y = self.data_y();
        let half = viewport_height / 2;
        if y < half {
            self.offset_y = 0;
            self.sy = y;
        } else {
            self.offset_y = y - half;
            self.sy = half;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(10)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    // -- data_position_for --------------------------------------------------

    #[test]
    fn plain_columns_map_to_themselves() {
        assert_eq!(data_position_for(0, "abc", 4), Ok(0));
        assert_eq!(data_position_for(2, "abc", 4), Ok(2));
    }

    #[test]
    fn end_of_line_slot() {
        assert_eq!(data_position_for(3, "abc", 4), Ok(3));
        assert_eq!(data_position_for(0, "", 4), Ok(0));
    }

    #[test]
    fn past_end_is_after_data() {
        assert_eq!(
            data_position_for(4, "abc", 4),
            Err(PositionError::AfterData { len: 3 })
        );
    }

    #[test]
    fn tab_span_maps_to_tab_index() {
        // "\tx": tab covers columns 0..4, x is at 4.
        for col in 0..4 {
            assert_eq!(data_position_for(col, "\tx", 4), Ok(0), "col {col}");
        }
        assert_eq!(data_position_for(4, "\tx", 4), Ok(1));
        assert_eq!(data_position_for(5, "\tx", 4), Ok(2));
    }

    // -- Width helpers ------------------------------------------------------

    #[test]
    fn screen_width_counts_tabs() {
        assert_eq!(screen_width("a\tb", 4), 6);
        assert_eq!(screen_width("", 8), 0);
        assert_eq!(screen_width("é", 4), 1);
    }

    #[test]
    fn first_screen_position_mixes_tabs_and_spaces() {
        assert_eq!(first_screen_position("\t  x", 4), 6);
        assert_eq!(first_screen_position("x", 4), 0);
        assert_eq!(first_screen_position("   ", 2), 3);
    }

    #[test]
    fn expand_tabs_borrows_when_tab_free() {
        assert!(matches!(expand_tabs("abc", 4, None), Cow::Borrowed(_)));
        assert_eq!(expand_tabs("a\tb", 3, None), "a   b");
        assert_eq!(expand_tabs("\tx", 4, Some('·')), "·   x");
    }

    #[test]
    fn huge_tab_width_does_not_overflow() {
        assert_eq!(screen_width("\t\t", usize::MAX), usize::MAX);
        assert_eq!(first_screen_position("\t\tx", usize::MAX), usize::MAX);
        assert_eq!(expand_tabs("\t", 2 * MAX_TAB_WIDTH, None).len(), 2 * MAX_TAB_WIDTH);
    }

    // -- Position -----------------------------------------------------------

    #[test]
    fn chop_applies_offset_then_width() {
        let mut p = Position::new(1);
        let line = "0123456789";
        assert_eq!(p.chop(line, 4), "0123");
        p.set_x(7, 5);
        assert_eq!(p.offset_x(), 3);
        assert_eq!(p.screen_x(), 4);
        assert_eq!(p.chop(line, 5), "34567");
    }

    #[test]
    fn chop_short_line_is_empty() {
        let mut p = Position::new(1);
        p.set_x(20, 5);
        assert_eq!(p.chop("short", 5), "");
    }

    #[test]
    fn chop_wide_line_keeps_viewport_width() {
        let p = Position::new(1);
        let line = "x".repeat(200);
        assert_eq!(p.chop(&line, 80).chars().count(), 80);
    }

    #[test]
    fn set_x_within_viewport_resets_offset() {
        let mut p = Position::new(1);
        p.set_x(30, 10);
        p.set_x(3, 10);
        assert_eq!((p.offset_x(), p.screen_x()), (0, 3));
    }

    #[test]
    fn data_x_through_document() {
        let doc = Document::from_text("\tab");
        let mut p = Position::new(1);
        p.set_x(5, 80);
        assert_eq!(p.data_x(&doc, 4), Ok(2));
        assert_eq!(p.col_number(&doc, 4), 3);
        p.set_x(9, 80);
        assert_eq!(p.col_number(&doc, 4), 4);
    }

    #[test]
    fn up_and_down_stop_at_edges() {
        let mut p = Position::new(1);
        assert_eq!(p.up(), Err(PositionError::AtTop));
        assert_eq!(p.down(2, 10), Ok(()));
        assert_eq!(p.down(2, 10), Err(PositionError::AtBottom));
        assert_eq!(p.up(), Ok(()));
        assert_eq!(p.screen_y(), 0);
    }

    #[test]
    fn down_stops_at_last_line() {
        let mut p = Position::new(1);
        assert_eq!(p.down(10, 1), Err(PositionError::AtBottom));
    }

    #[test]
    fn keep_visible_inside_window_moves_row_only() {
        let mut p = Position::new(1);
        assert!(!p.scroll_to_keep_visible(5, 10, 100));
        assert_eq!((p.offset_y(), p.screen_y()), (0, 5));
    }

    #[test]
    fn keep_visible_jump_keeps_screen_row() {
        let mut p = Position::new(1);
        p.scroll_to_keep_visible(3, 10, 100);
        p.scroll_to_keep_visible(50, 10, 100);
        assert_eq!((p.offset_y(), p.screen_y()), (47, 3));
        assert_eq!(p.data_y(), 50);
    }

    #[test]
    fn keep_visible_clamps_at_end() {
        let mut p = Position::new(1);
        p.scroll_to_keep_visible(5, 10, 100);
        assert!(p.scroll_to_keep_visible(99, 10, 100));
        assert_eq!((p.offset_y(), p.screen_y()), (90, 9));
    }

    #[test]
    fn keep_visible_clamps_target_to_document() {
        let mut p = Position::new(1);
        assert!(p.scroll_to_keep_visible(1_000, 10, 20));
        assert_eq!(p.data_y(), 19);
    }

    #[test]
    fn keep_visible_back_to_start() {
        let mut p = Position::new(1);
        p.scroll_to_keep_visible(60, 10, 100);
        p.scroll_to_keep_visible(2, 10, 100);
        assert_eq!((p.offset_y(), p.screen_y()), (0, 2));
    }

    #[test]
    fn scroll_down_clamps_and_reports() {
        let mut p = Position::new(10);
        assert!(p.scroll_down(10, 25, 10));
        assert!(p.scroll_down(10, 25, 10));
        assert_eq!(p.offset_y(), 15);
        assert!(!p.scroll_down(10, 25, 10));
    }

    #[test]
    fn scroll_down_short_document_does_nothing() {
        let mut p = Position::new(10);
        assert!(!p.scroll_down(10, 5, 10));
    }

    #[test]
    fn scroll_up_false_at_top() {
        let mut p = Position::new(10);
        assert!(!p.scroll_up(3));
        p.scroll_down(7, 100, 10);
        assert!(p.scroll_up(3));
        assert_eq!(p.offset_y(), 4);
        assert!(p.scroll_up(30));
        assert_eq!(p.offset_y(), 0);
    }

    #[test]
    fn scrolling_resets_horizontal_offset() {
        let mut p = Position::new(10);
        p.set_x(50, 10);
        p.scroll_down(1, 100, 10);
        assert_eq!(p.offset_x(), 0);
    }

    #[test]
    fn center_moves_line_to_middle() {
        let mut p = Position::new(1);
        p.scroll_to_keep_visible(40, 10, 100);
        p.center(10);
        assert_eq!((p.offset_y(), p.screen_y()), (35, 5));
        assert_eq!(p.line_number(), 41);
    }

    #[test]
    fn center_near_top_stays_at_top() {
        let mut p = Position::new(1);
        p.scroll_to_keep_visible(2, 10, 100);
        p.center(10);
        assert_eq!((p.offset_y(), p.screen_y()), (0, 2));
    }

    #[test]
    fn save_x_remembers_screen_column() {
        let mut p = Position::new(1);
        p.set_x(12, 10);
        p.save_x();
        assert_eq!(p.saved_x(), 12);
    }

    // -- Properties ---------------------------------------------------------

    proptest! {
        #[test]
        fn screen_width_formula(line in "[a-z\t ]{0,40}", tab in 1usize..9) {
            let count = line.chars().count();
            let tabs = line.chars().filter(|&c| c == '\t').count();
            prop_assert_eq!(screen_width(&line, tab), count + tabs * (tab - 1));
            prop_assert_eq!(screen_width(&line, tab), expand_tabs(&line, tab, None).chars().count());
        }

        #[test]
        fn tab_free_columns_are_identity(line in "[a-zA-Z0-9 ]{0,40}", seed in 0usize..100) {
            let len = line.chars().count();
            let col = seed % (len + 1);
            prop_assert_eq!(data_position_for(col, &line, 4), Ok(col));
        }
    }
}
