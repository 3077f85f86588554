// SPDX-License-Identifier: MIT
//
// tilde — draw one screen of a file the way the tilde editor shows it.
//
// This is the binary that wires the crates together:
//
//   tilde-core  → document, position, lexical state, highlighting, render pass
//   tilde-theme → colors
//   tilde-term  → framebuffer and SGR output
//
// One run is one render pass:
//
//   file → Document → Session (mode, options, search) → write_screen
//        → FrameBuffer → write_frame → stdout

use std::io::{self, Write as _};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use thiserror::Error;
use tracing::debug;

use tilde_core::{Document, Mode, OptionError, RenderError, Session};
use tilde_term::FrameBuffer;
use tilde_term::output::{OutputBuffer, write_frame};
use tilde_term::terminal::{self, Size};
use tilde_theme::{builtin_names, builtin_theme};

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tilde")]
#[command(about = "Render one highlighted screen of a file")]
#[command(version)]
struct Args {
    /// File to render
    file: PathBuf,

    /// `:set` directives, e.g. "ts=8 norainbow"
    #[arg(long, value_name = "DIRECTIVES")]
    set: Option<String>,

    /// Highlight every occurrence of TERM
    #[arg(long, value_name = "TERM")]
    search: Option<String>,

    /// Scroll so this 1-based line is visible
    #[arg(long, value_name = "N")]
    line: Option<usize>,

    /// Columns to draw (default: terminal width)
    #[arg(long, value_name = "W")]
    width: Option<u16>,

    /// Rows to draw (default: terminal height)
    #[arg(long, value_name = "H")]
    height: Option<u16>,

    /// Color theme
    #[arg(long, value_name = "NAME", default_value = "default")]
    theme: String,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

// ─── Errors ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
enum CliError {
    #[error("{path}: {source}", path = .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("unknown theme {0:?} (available: {names})", names = builtin_names().join(", "))]
    UnknownTheme(String),

    #[error(transparent)]
    Option(#[from] OptionError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("writing output: {0}")]
    Write(#[from] io::Error),
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn setup_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let theme = builtin_theme(&args.theme).ok_or_else(|| CliError::UnknownTheme(args.theme.clone()))?;
    let document = Document::from_file(&args.file).map_err(|source| CliError::Read {
        path: args.file.clone(),
        source,
    })?;
    let mode = Mode::detect(&args.file);
    let line_count = document.line_count();
    debug!(file = %args.file.display(), %mode, lines = line_count, "loaded");

    let bg = theme.bg;
    let mut session = Session::new(document, mode, theme);
    if let Some(directives) = &args.set {
        for message in session.apply_set(directives)? {
            eprintln!("{message}");
        }
    }
    if let Some(term) = &args.search {
        session.set_search(term);
    }

    let size = terminal::get_size().unwrap_or(Size::FALLBACK);
    let width = args.width.unwrap_or(size.cols).max(1);
    let height = args.height.unwrap_or(size.rows).max(1);
    if let Some(line) = args.line {
        session
            .position_mut()
            .scroll_to_keep_visible(line.saturating_sub(1), usize::from(height), line_count);
    }

    // A short file gets a short frame.
    let remaining = line_count.saturating_sub(session.position().offset_y()).max(1);
    let rows = u16::try_from(remaining).map_or(height, |r| r.min(height));

    let color = terminal::stdout_is_tty() && std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty());
    session.options_mut().color_disabled = !color;

    let mut frame = FrameBuffer::with_bg(width, rows, bg);
    let report = session.write_screen(&mut frame)?;
    debug!(
        rows = report.rows_drawn,
        fallback = report.fallback_rows,
        misaligned = report.misaligned.len(),
        "rendered"
    );

    let mut out = OutputBuffer::new();
    write_frame(&mut out, &frame, color);
    let mut stdout = io::stdout().lock();
    out.flush_to(&mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    setup_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("tilde: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
