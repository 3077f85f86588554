//! The render pipeline.
//!
//! A [`Session`] owns one open buffer: its document, cursor and scroll
//! position, mode, theme, options, search term and lexical checkpoint
//! cache. [`Session::write_lines`] draws a range of document lines onto a
//! [`Surface`], one row per line:
//!
//! ```text
//!   Document.line ─► expand tabs ─► tokenize ─► dispatch ─► rainbow ─► search ─► Surface
//!                        │              │
//!                        │              └─ LexError: plain text to the fallback output
//!                        └─ plain path: highlighting off or NO_COLOR set
//! ```
//!
//! The lexical state is advanced once per row on every path, so toggling
//! highlighting never leaves the checkpoint cache behind.

use std::io::{self, Write as _};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tilde_term::buffer::{Surface, char_width, string_width};
use tilde_theme::Theme;
use tracing::{trace, warn};

use crate::colored::ColoredLine;
use crate::dispatch::{self, Context, Dispatched};
use crate::document::Document;
use crate::error::{OptionError, RenderError};
use crate::keywords::Keywords;
use crate::lexical::{LexicalCache, LexicalSyntax};
use crate::mode::Mode;
use crate::options::RenderOptions;
use crate::position::{MAX_TAB_WIDTH, Position, expand_tabs};
use crate::rainbow;
use crate::search;
use crate::tokenize;

/// Rows whose display width and code point count differ by more than this
/// are reported as misaligned.
const MISALIGNMENT_TOLERANCE: usize = 2;

// ---------------------------------------------------------------------------
// Fallback output
// ---------------------------------------------------------------------------

/// Receives the plain text of rows that could not be highlighted.
pub trait FallbackOutput {
    fn write_line(&mut self, line: &str);
}

/// Writes fallback rows to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrFallback;

impl FallbackOutput for StderrFallback {
    fn write_line(&mut self, line: &str) {
        // Nowhere left to report a failing stderr.
        let _ = writeln!(io::stderr().lock(), "{line}");
    }
}

impl FallbackOutput for Vec<String> {
    fn write_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

impl FallbackOutput for Arc<Mutex<Vec<String>>> {
    fn write_line(&mut self, line: &str) {
        self.lock().push(line.to_string());
    }
}

// ---------------------------------------------------------------------------
// RenderReport
// ---------------------------------------------------------------------------

/// What a completed render pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub rows_drawn: usize,
    /// Rows sent to the fallback output after a lexical failure.
    pub fallback_rows: usize,
    /// Zero-based document lines whose columns may be off on screen.
    pub misaligned: Vec<usize>,
}

impl RenderReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.misaligned.is_empty()
    }

    /// Turn misaligned rows into an error.
    ///
    /// # Errors
    ///
    /// [`RenderError::UnsupportedUnicode`] when any row is misaligned.
    pub fn into_result(self) -> Result<Self, RenderError> {
        if self.is_clean() {
            Ok(self)
        } else {
            Err(RenderError::UnsupportedUnicode {
                lines: self.misaligned,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One open buffer and everything needed to draw it.
pub struct Session {
    document: Document,
    position: Position,
    mode: Mode,
    syntax: LexicalSyntax,
    keywords: &'static Keywords,
    theme: Theme,
    options: RenderOptions,
    search: String,
    cache: LexicalCache,
    fallback: Box<dyn FallbackOutput + Send>,
}

impl Session {
    #[must_use]
    pub fn new(document: Document, mode: Mode, theme: Theme) -> Self {
        Self {
            document,
            position: Position::default(),
            mode,
            syntax: LexicalSyntax::for_mode(mode),
            keywords: Keywords::for_mode(mode),
            theme,
            options: RenderOptions::for_mode(mode),
            search: String::new(),
            cache: LexicalCache::new(),
            fallback: Box::new(StderrFallback),
        }
    }

    /// Send rows that fail lexical analysis somewhere other than stderr.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Box<dyn FallbackOutput + Send>) -> Self {
        self.fallback = fallback;
        self
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    pub const fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub const fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        term.clone_into(&mut self.search);
    }

    /// Apply `:set` arguments to the render options.
    ///
    /// # Errors
    ///
    /// See [`RenderOptions::apply`].
    pub fn apply_set(&mut self, args: &str) -> Result<Vec<String>, OptionError> {
        self.options.apply_str(args)
    }

    /// Switch modes. Options go back to the new mode's defaults and every
    /// checkpoint is dropped.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.syntax = LexicalSyntax::for_mode(mode);
        self.keywords = Keywords::for_mode(mode);
        self.options = RenderOptions::for_mode(mode);
        self.cache.clear();
    }

    // -- Edits --------------------------------------------------------------

    pub fn insert_line(&mut self, index: usize, text: &str) {
        self.document.insert_line(index, text);
        self.cache.invalidate_from(index);
    }

    pub fn remove_line(&mut self, index: usize) -> bool {
        let removed = self.document.remove_line(index);
        if removed {
            self.cache.invalidate_from(index);
        }
        removed
    }

    pub fn set_line(&mut self, index: usize, text: &str) {
        self.document.set_line(index, text);
        self.cache.invalidate_from(index);
    }

    // -- Drawing ------------------------------------------------------------

    /// Draw document lines `from..to` with the first row at `(x, y)`.
    ///
    /// `NO_COLOR` is read once per call.
    ///
    /// # Errors
    ///
    /// [`RenderError::InvalidRange`] when `from >= to`; nothing is drawn.
    pub fn write_lines(
        &mut self,
        surface: &mut impl Surface,
        from: usize,
        to: usize,
        x: u16,
        y: u16,
    ) -> Result<RenderReport, RenderError> {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        self.draw(surface, from, to, (x, y), no_color)
    }

    /// Fill `surface` from the current scroll offset.
    ///
    /// # Errors
    ///
    /// See [`write_lines`](Self::write_lines).
    pub fn write_screen(&mut self, surface: &mut impl Surface) -> Result<RenderReport, RenderError> {
        let from = self.position.offset_y();
        let rows = usize::from(surface.height()).max(1);
        self.write_lines(surface, from, from + rows, 0, 0)
    }

    fn draw(
        &mut self,
        surface: &mut impl Surface,
        from: usize,
        to: usize,
        (x, y): (u16, u16),
        no_color: bool,
    ) -> Result<RenderReport, RenderError> {
        if from >= to {
            return Err(RenderError::InvalidRange { from, to });
        }
        let width = usize::from(surface.width().saturating_sub(x));
        let rows = (to - from).min(usize::from(surface.height().saturating_sub(y)));
        let plain = no_color || self.options.color_disabled || !self.options.syntax_highlight;
        trace!(from, to, rows, plain, mode = %self.mode, "render pass");

        let mut report = RenderReport::default();
        let mut state = self.cache.state_at(&self.document, from, &self.syntax);
        let line_count = self.document.line_count();
        let offset_x = self.position.offset_x();
        let tab_width = self.options.tab_width.clamp(1, MAX_TAB_WIDTH);

        for row in 0..rows {
            let index = from + row;
            let sy = y.saturating_add(u16::try_from(row).unwrap_or(u16::MAX));
            let raw = self.document.line(index);
            let entering = state;
            let transition = entering.advance(&raw, &self.syntax);
            state = transition.state;

            let expanded = expand_tabs(&raw, tab_width, self.options.tab_marker);
            let expanded = expanded.trim_end();
            if is_misaligned(expanded) {
                report.misaligned.push(index);
            }
            report.rows_drawn += 1;

            if plain {
                let text = self.position.chop(expanded, width);
                let line = ColoredLine::uniform(&text, self.theme.fg, self.theme.bg);
                draw_row(surface, &line, 0, (x, sy), width);
                continue;
            }

            let chars: Vec<char> = expanded.chars().collect();
            let base = match tokenize::highlight(&chars, &self.syntax, self.keywords, transition.resume, &self.theme) {
                Ok(base) => base,
                Err(e) => {
                    warn!(line = index + 1, error = %e, "lexical analysis failed, drawing plain");
                    self.fallback.write_line(&self.position.chop(expanded, width));
                    report.fallback_rows += 1;
                    draw_row(surface, &ColoredLine::new(self.theme.bg), 0, (x, sy), width);
                    continue;
                }
            };

            let ctx = Context {
                mode: self.mode,
                theme: &self.theme,
                line_index: index,
                line_count,
                entering: &entering,
                transition: &transition,
            };
            let Dispatched {
                mut line,
                rainbow_eligible,
            } = dispatch::dispatch(expanded, base, &ctx);
            if self.options.rainbow && rainbow_eligible {
                rainbow::apply(&mut line, &self.syntax, &entering, &transition, &self.theme);
            }
            if self.options.hlsearch {
                search::highlight(&mut line, &self.search, &self.theme);
            }
            draw_row(surface, &line, offset_x, (x, sy), width);
        }

        if !report.misaligned.is_empty() {
            warn!(
                rows = report.misaligned.len(),
                first = report.misaligned[0] + 1,
                "unsupported unicode, columns may be misaligned"
            );
        }
        Ok(report)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("mode", &self.mode)
            .field("lines", &self.document.line_count())
            .field("position", &self.position)
            .field("options", &self.options)
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

/// Display width and code point count disagree by more than the tolerance.
fn is_misaligned(line: &str) -> bool {
    let shown: String = line.chars().map(control_picture).collect();
    string_width(&shown).abs_diff(shown.chars().count()) > MISALIGNMENT_TOLERANCE
}

/// Visible stand-ins for control code points.
fn control_picture(ch: char) -> char {
    match u32::from(ch) {
        c @ 0..0x20 => char::from_u32(0x2400 + c).unwrap_or('\u{fffd}'),
        0x7f => '\u{2421}',
        _ if ch.is_control() => '\u{fffd}',
        _ => ch,
    }
}

/// Write one row: skip `skip` cells, then cells left to right until the
/// row is full, then pad with the line's background.
fn draw_row(surface: &mut impl Surface, line: &ColoredLine, skip: usize, (x, y): (u16, u16), width: usize) {
    let mut col = 0;
    for cell in line.cells().iter().skip(skip) {
        if col >= width {
            break;
        }
        let ch = control_picture(cell.ch);
        surface.write_cell(x.saturating_add(column(col)), y, cell.fg, cell.bg, ch);
        col += char_width(ch).max(1);
    }
    while col < width {
        surface.write_cell(x.saturating_add(column(col)), y, line.bg(), line.bg(), ' ');
        col += 1;
    }
}

fn column(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}

// ---------------------------------------------------------------------------
// SharedSession
// ---------------------------------------------------------------------------

/// A session shared between threads. Render passes on one session never
/// interleave: each takes the lock for its whole duration.
#[derive(Clone)]
pub struct SharedSession(Arc<Mutex<Session>>);

impl SharedSession {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    /// Exclusive access for edits, scrolling and option changes.
    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.0.lock()
    }

    /// [`Session::write_lines`] under the lock.
    ///
    /// # Errors
    ///
    /// See [`Session::write_lines`].
    pub fn write_lines(
        &self,
        surface: &mut impl Surface,
        from: usize,
        to: usize,
        x: u16,
        y: u16,
    ) -> Result<RenderReport, RenderError> {
        self.0.lock().write_lines(surface, from, to, x, y)
    }
}

impl std::fmt::Debug for SharedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedSession").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tilde_term::color::CellColor;
    use tilde_term::{Cell, FrameBuffer};

    fn session(mode: Mode, lines: &[&str]) -> Session {
        Session::new(Document::from_lines(lines), mode, Theme::dark())
    }

    /// Draw with color regardless of the environment.
    fn draw(s: &mut Session, frame: &mut FrameBuffer, from: usize, to: usize) -> RenderReport {
        s.draw(frame, from, to, (0, 0), false).unwrap()
    }

    fn fg(frame: &FrameBuffer, x: u16, y: u16) -> CellColor {
        frame.get(x, y).unwrap().fg
    }

    // -- Range --------------------------------------------------------------

    #[test]
    fn inverted_range_writes_nothing() {
        let mut s = session(Mode::C, &["int x;"]);
        let mut frame = FrameBuffer::new(10, 2);
        let err = s.write_lines(&mut frame, 5, 3, 0, 0).unwrap_err();
        assert_eq!(err, RenderError::InvalidRange { from: 5, to: 3 });
        assert!(frame.cells().iter().all(|&c| c == Cell::EMPTY));
        assert!(s.write_lines(&mut frame, 2, 2, 0, 0).is_err());
    }

    // -- Geometry -----------------------------------------------------------

    #[test]
    fn long_line_is_cut_at_viewport() {
        let text = "0123456789".repeat(20);
        let mut s = session(Mode::Text, &[&text]);
        let mut frame = FrameBuffer::new(80, 1);
        let report = draw(&mut s, &mut frame, 0, 1);
        assert_eq!(frame.row_text(0), &text[..80]);
        assert_eq!(report.rows_drawn, 1);
    }

    #[test]
    fn horizontal_offset_skips_columns() {
        let text = "0123456789".repeat(20);
        let mut s = session(Mode::Text, &[&text]);
        s.position_mut().set_x(85, 80);
        let mut frame = FrameBuffer::new(80, 1);
        draw(&mut s, &mut frame, 0, 1);
        assert_eq!(frame.row_text(0), &text[6..86]);
    }

    #[test]
    fn origin_shifts_rows() {
        let mut s = session(Mode::Text, &["ab"]);
        let mut frame = FrameBuffer::new(6, 3);
        s.draw(&mut frame, 0, 1, (2, 1), false).unwrap();
        assert_eq!(frame.row_text(1), "  ab  ");
        assert_eq!(frame.row_text(0), "      ");
    }

    #[test]
    fn tabs_expand_to_width() {
        let mut s = session(Mode::Go, &["\tx"]);
        let mut frame = FrameBuffer::new(8, 1);
        draw(&mut s, &mut frame, 0, 1);
        assert_eq!(frame.row_text(0), "    x   ");
    }

    #[test]
    fn makefile_tabs_show_marker() {
        let mut s = session(Mode::Make, &["\tcc -o x"]);
        let mut frame = FrameBuffer::new(12, 1);
        draw(&mut s, &mut frame, 0, 1);
        assert!(frame.row_text(0).starts_with("·   cc"));
    }

    #[test]
    fn oversized_tab_width_is_clamped() {
        let mut s = session(Mode::Go, &["\tx"]);
        assert!(s.apply_set("ts=18446744073709551615").is_err());
        s.options_mut().tab_width = usize::MAX;
        let mut frame = FrameBuffer::new(40, 1);
        draw(&mut s, &mut frame, 0, 1);
        assert_eq!(frame.row_text(0), format!("{}x{}", " ".repeat(MAX_TAB_WIDTH), " ".repeat(7)));
    }

    #[test]
    fn wide_glyphs_take_two_columns() {
        let mut s = session(Mode::Text, &["中x"]);
        let mut frame = FrameBuffer::new(4, 1);
        let report = draw(&mut s, &mut frame, 0, 1);
        assert_eq!(frame.get(2, 0).unwrap().character(), Some('x'));
        assert!(report.is_clean());
    }

    #[test]
    fn control_characters_are_visible() {
        let mut s = session(Mode::Text, &["a\u{1}b"]);
        let mut frame = FrameBuffer::new(4, 1);
        draw(&mut s, &mut frame, 0, 1);
        assert_eq!(frame.row_text(0), "a\u{2401}b ");
    }

    #[test]
    fn rows_past_the_end_are_blank() {
        let mut s = session(Mode::Text, &["only"]);
        let mut frame = FrameBuffer::new(4, 3);
        let report = draw(&mut s, &mut frame, 0, 3);
        assert_eq!(frame.row_text(2), "    ");
        assert_eq!(report.rows_drawn, 3);
    }

    #[test]
    fn far_range_does_not_fill_checkpoints() {
        let mut s = session(Mode::Go, &["x"]);
        let mut frame = FrameBuffer::new(4, 1);
        let report = draw(&mut s, &mut frame, 100_000_000, 100_000_001);
        assert_eq!(report.rows_drawn, 1);
        assert_eq!(frame.row_text(0), "    ");
        assert_eq!(s.cache.checkpoints(), 1);
    }

    // -- Highlighting -------------------------------------------------------

    #[test]
    fn comment_line_gets_no_rainbow() {
        let mut s = session(Mode::C, &["  // foo(bar)"]);
        let mut frame = FrameBuffer::new(20, 1);
        draw(&mut s, &mut frame, 0, 1);
        assert_eq!(fg(&frame, 8, 0), s.theme().comment);
    }

    #[test]
    fn rainbow_depths_on_screen() {
        let mut s = session(Mode::C, &["if (x > 0) { y() }"]);
        let mut frame = FrameBuffer::new(20, 1);
        draw(&mut s, &mut frame, 0, 1);
        let r = s.theme().rainbow.clone();
        assert_eq!(fg(&frame, 3, 0), r[0]);
        assert_eq!(fg(&frame, 9, 0), r[0]);
        assert_eq!(fg(&frame, 11, 0), r[0]);
        assert_eq!(fg(&frame, 14, 0), r[1]);
        assert_eq!(fg(&frame, 15, 0), r[1]);
        assert_eq!(fg(&frame, 17, 0), r[0]);
    }

    #[test]
    fn rainbow_off_by_option() {
        let mut s = session(Mode::C, &["f(x)"]);
        s.apply_set("norainbow").unwrap();
        let mut frame = FrameBuffer::new(6, 1);
        draw(&mut s, &mut frame, 0, 1);
        assert_eq!(fg(&frame, 1, 0), s.theme().syntax.punctuation);
    }

    #[test]
    fn search_matches_are_painted() {
        let mut s = session(Mode::Text, &["find the needle"]);
        s.set_search("needle");
        let mut frame = FrameBuffer::new(20, 1);
        draw(&mut s, &mut frame, 0, 1);
        assert_eq!(fg(&frame, 9, 0), s.theme().search_fg);
        assert_eq!(fg(&frame, 0, 0), s.theme().syntax.plain);
    }

    #[test]
    fn syntax_off_takes_plain_path() {
        let mut s = session(Mode::Rust, &["fn main() {}"]);
        s.apply_set("nosyntax").unwrap();
        let mut frame = FrameBuffer::new(14, 1);
        draw(&mut s, &mut frame, 0, 1);
        assert!((0..14).all(|x| fg(&frame, x, 0) == s.theme().fg));
        assert_eq!(frame.row_text(0), "fn main() {}  ");
    }

    #[test]
    fn toggling_syntax_keeps_block_comment_state() {
        let mut s = session(Mode::C, &["/* open", "inside", "more", "*/ x"]);
        let mut frame = FrameBuffer::new(8, 3);
        s.apply_set("nosyntax").unwrap();
        draw(&mut s, &mut frame, 0, 3);
        assert_eq!(fg(&frame, 0, 1), s.theme().fg);

        s.apply_set("syntax").unwrap();
        draw(&mut s, &mut frame, 1, 4);
        assert_eq!(fg(&frame, 0, 0), s.theme().multiline_comment);
        assert_eq!(fg(&frame, 0, 1), s.theme().multiline_comment);
        assert_eq!(fg(&frame, 0, 2), s.theme().comment);
    }

    #[test]
    fn disabled_color_draws_uniform_rows() {
        let lines = ["fn main() {", "    let s = \"x\"; // hi", "}"];
        let mut s = session(Mode::Rust, &lines);
        s.set_search("main");
        s.options_mut().color_disabled = true;
        let mut frame = FrameBuffer::new(24, 3);
        draw(&mut s, &mut frame, 0, 3);
        let (text, back) = (s.theme().fg, s.theme().bg);
        for (y, line) in (0u16..).zip(lines) {
            let len = u16::try_from(line.len()).unwrap();
            assert!((0..len).all(|x| fg(&frame, x, y) == text), "row {y}");
        }
        assert!(frame.cells().iter().all(|c| c.bg == back));
        assert_eq!(frame.row_text(0).trim_end(), "fn main() {");
    }

    #[test]
    fn no_color_draws_uniform_rows() {
        let mut s = session(Mode::C, &["return 1; /* c */"]);
        let mut frame = FrameBuffer::new(20, 1);
        s.draw(&mut frame, 0, 1, (0, 0), true).unwrap();
        assert!((0..17).all(|x| fg(&frame, x, 0) == s.theme().fg));
    }

    #[test]
    fn block_comment_continues_below_viewport_top() {
        let mut s = session(Mode::C, &["/* open", "inside", "*/ x"]);
        let mut frame = FrameBuffer::new(8, 2);
        draw(&mut s, &mut frame, 1, 3);
        assert_eq!(fg(&frame, 0, 0), s.theme().multiline_comment);
        assert_eq!(fg(&frame, 0, 1), s.theme().comment);
    }

    #[test]
    fn edits_invalidate_the_cache() {
        let lines: Vec<String> = (0..200).map(|i| format!("x{i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut s = session(Mode::C, &refs);
        let mut frame = FrameBuffer::new(8, 1);
        draw(&mut s, &mut frame, 150, 151);
        assert_eq!(fg(&frame, 0, 0), s.theme().syntax.plain);
        s.set_line(10, "/* open");
        draw(&mut s, &mut frame, 150, 151);
        assert_eq!(fg(&frame, 0, 0), s.theme().multiline_comment);
    }

    #[test]
    fn mode_switch_resets_state() {
        let mut s = session(Mode::Go, &["`raw", "inside"]);
        let mut frame = FrameBuffer::new(8, 1);
        draw(&mut s, &mut frame, 1, 2);
        assert_eq!(fg(&frame, 0, 0), s.theme().multiline_string);
        s.set_mode(Mode::Text);
        draw(&mut s, &mut frame, 1, 2);
        assert_eq!(fg(&frame, 0, 0), s.theme().syntax.plain);
    }

    // -- Degradation --------------------------------------------------------

    #[test]
    fn lexical_failure_falls_back() {
        let sink: Arc<Mutex<Vec<String>>> = Arc::default();
        let mut s = session(Mode::C, &["a\0b", "return;"]).with_fallback(Box::new(Arc::clone(&sink)));
        let mut frame = FrameBuffer::new(8, 2);
        let report = draw(&mut s, &mut frame, 0, 2);
        assert_eq!(report.fallback_rows, 1);
        assert_eq!(*sink.lock(), vec!["a\0b".to_string()]);
        assert_eq!(frame.row_text(0), "        ");
        assert_eq!(fg(&frame, 0, 1), s.theme().syntax.keyword);
    }

    #[test]
    fn fallback_row_still_advances_state() {
        let mut s = session(Mode::C, &["/* open", "a\0b */", "x"]).with_fallback(Box::new(Vec::<String>::new()));
        let mut frame = FrameBuffer::new(8, 3);
        let report = draw(&mut s, &mut frame, 0, 3);
        assert_eq!(report.fallback_rows, 1);
        assert_eq!(fg(&frame, 0, 2), s.theme().syntax.plain);
    }

    #[test]
    fn misaligned_rows_are_reported() {
        let mut s = session(Mode::Text, &["ok", "中中中x"]);
        let mut frame = FrameBuffer::new(10, 2);
        let report = draw(&mut s, &mut frame, 0, 2);
        assert_eq!(report.misaligned, vec![1]);
        assert_eq!(
            report.into_result(),
            Err(RenderError::UnsupportedUnicode { lines: vec![1] })
        );
    }

    // -- Sharing ------------------------------------------------------------

    #[test]
    fn shared_session_renders_from_threads() {
        let shared = SharedSession::new(session(Mode::Text, &["a", "b"]));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    let mut frame = FrameBuffer::new(4, 2);
                    shared.lock().draw(&mut frame, 0, 2, (0, 0), false).unwrap();
                    frame.row_text(1)
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), "b   ");
        }
        shared.lock().set_search("a");
        assert_eq!(shared.lock().search(), "a");
    }

    #[test]
    fn write_screen_starts_at_scroll_offset() {
        let lines: Vec<String> = (0..30).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut s = session(Mode::Text, &refs);
        s.position_mut().scroll_down(10, 30, 5);
        let mut frame = FrameBuffer::new(3, 5);
        s.write_screen(&mut frame).unwrap();
        assert_eq!(frame.row_text(0).trim_end(), "10");
    }
}
