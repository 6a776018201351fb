// SPDX-License-Identifier: MIT
//
// jot — positioned terminal text from the command line.
//
// Wires jot-term's pieces together:
//
//   print → TextWriter → AnsiSurface(stdout)        one string at one cell
//   view  → NoteView   → AnsiSurface(stdout)        a file plus status line
//         → NoteView   → ScreenBuffer → plain text  (--plain)
//   note  → NoteStore (~/noteData.json)             list / add / edit / rm
//         → show: a stored note, painted like view
//
// The terminal is drawn on in whatever mode it is already in. Raw mode and
// the alternate screen are the caller's business.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use jot_notes::{Note, NoteError, NoteStore};
use jot_term::ansi::AnsiSurface;
use jot_term::buffer::ScreenBuffer;
use jot_term::surface::Position;
use jot_term::terminal::{self, Size};
use jot_term::view::NoteView;
use jot_term::{SurfaceError, TextWriter};

// ─── CLI ────────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "jot", version, about = "Draw text at a terminal position")]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, env = "JOT_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Draw TEXT with its first character at (ROW, COL).
    #[command(allow_negative_numbers = true)]
    Print {
        /// Zero-based row.
        row: i32,
        /// Zero-based column.
        col: i32,
        /// Drawn literally.
        text: String,
        /// Draw in reverse video.
        #[arg(long)]
        highlight: bool,
    },

    /// Paint a text file with a status line on the last row.
    View {
        /// File to show.
        file: PathBuf,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Manage stored notes.
    Note {
        /// Note file; defaults to ~/noteData.json.
        #[arg(long, global = true, env = "JOT_NOTES")]
        store: Option<PathBuf>,

        #[command(subcommand)]
        action: NoteCommand,
    },
}

#[derive(Debug, Subcommand)]
enum NoteCommand {
    /// List note titles with their dates.
    List,
    /// Store FILE's lines as a new note.
    Add { title: String, file: PathBuf },
    /// Replace a note's lines with FILE's.
    Edit { title: String, file: PathBuf },
    /// Paint a stored note like `view` does.
    Show {
        title: String,
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Delete a note.
    Rm { title: String },
}

#[derive(Debug, Args)]
struct DisplayArgs {
    /// Cursor row reported in the status line.
    #[arg(long, default_value_t = 0)]
    cursor_row: i32,
    /// Cursor column reported in the status line.
    #[arg(long, default_value_t = 0)]
    cursor_col: i32,
    /// Screen width; defaults to the terminal's.
    #[arg(long, env = "JOT_COLS")]
    cols: Option<u16>,
    /// Screen height; defaults to the terminal's.
    #[arg(long, env = "JOT_ROWS")]
    rows: Option<u16>,
    /// Print the painted screen as plain text instead of drawing it.
    #[arg(long)]
    plain: bool,
}

// ─── Errors ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Notes(#[from] NoteError),
    #[error("no home directory for the note file; pass --store or set JOT_NOTES")]
    NoHome,
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

// ─── Logging ────────────────────────────────────────────────────────────────

fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);
    let _ = subscriber.try_init();
}

// ─── Commands ───────────────────────────────────────────────────────────────

/// Pick a screen size: explicit flags first, then the terminal, then 80×24.
fn resolve_size(cols: Option<u16>, rows: Option<u16>, detected: Option<Size>) -> Size {
    let fallback = detected.unwrap_or(Size::FALLBACK);
    Size::new(cols.unwrap_or(fallback.cols), rows.unwrap_or(fallback.rows))
}

fn print(out: impl Write, row: i32, col: i32, text: &str, highlight: bool) -> Result<(), CliError> {
    let mut writer = TextWriter::new(AnsiSurface::new(out));
    writer.render(row, col, text, highlight)?;
    writer.surface_mut().flush()?;
    Ok(())
}

fn view_ansi<L: AsRef<str>>(
    out: impl Write,
    lines: &[L],
    cursor: Position,
    size: Size,
) -> Result<(), CliError> {
    let mut writer = TextWriter::new(AnsiSurface::new(out));
    NoteView::new().paint(&mut writer, lines, cursor, size)?;
    writer.surface_mut().flush()?;
    Ok(())
}

fn view_plain<L: AsRef<str>>(
    mut out: impl Write,
    lines: &[L],
    cursor: Position,
    size: Size,
) -> Result<(), CliError> {
    let mut screen = ScreenBuffer::with_size(size);
    NoteView::new().paint(&mut TextWriter::new(&mut screen), lines, cursor, size)?;
    for line in screen.lines() {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

fn display<L: AsRef<str>>(out: impl Write, lines: &[L], args: &DisplayArgs) -> Result<(), CliError> {
    let size = resolve_size(args.cols, args.rows, terminal::get_size());
    let cursor = Position::new(args.cursor_row, args.cursor_col);
    tracing::info!(lines = lines.len(), ?size, plain = args.plain, "display");

    if args.plain {
        view_plain(out, lines, cursor, size)
    } else {
        view_ansi(out, lines, cursor, size)
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn note(store: &mut NoteStore, action: NoteCommand, mut out: impl Write) -> Result<(), CliError> {
    match action {
        NoteCommand::List => {
            for note in store.notes() {
                writeln!(out, "{}\t{}", note.title, note.date)?;
            }
        }
        NoteCommand::Add { title, file } => {
            let contents = read_file(&file)?;
            store.create(Note::from_contents(title.as_str(), &contents))?;
            writeln!(out, "Note saved as \"{title}\"")?;
        }
        NoteCommand::Edit { title, file } => {
            let contents = read_file(&file)?;
            store.edit(Note::from_contents(title.as_str(), &contents))?;
            writeln!(out, "Note \"{title}\" updated")?;
        }
        NoteCommand::Show { title, display: args } => {
            let note = store
                .query(&title)
                .ok_or_else(|| NoteError::NotFound(title.clone()))?;
            return display(out, note.text.as_slice(), &args);
        }
        NoteCommand::Rm { title } => {
            store.delete(&title)?;
            writeln!(out, "Note \"{title}\" deleted")?;
        }
    }
    out.flush()?;
    Ok(())
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Print {
            row,
            col,
            text,
            highlight,
        } => print(io::stdout().lock(), row, col, &text, highlight),

        Command::View { file, display: args } => {
            let contents = read_file(&file)?;
            let lines: Vec<&str> = contents.lines().collect();
            tracing::info!(file = %file.display(), "view");
            display(io::stdout().lock(), &lines, &args)
        }

        Command::Note { store, action } => {
            let path = store
                .or_else(jot_notes::default_path)
                .ok_or(CliError::NoHome)?;
            let mut store = NoteStore::open(path)?;
            note(&mut store, action, io::stdout().lock())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("jot: {err}");
            ExitCode::FAILURE
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_print_with_negative_position() {
        let cli = Cli::try_parse_from(["jot", "print", "-1", "-2", "hi", "--highlight"]).unwrap();
        match cli.command {
            Command::Print {
                row,
                col,
                text,
                highlight,
            } => {
                assert_eq!((row, col), (-1, -2));
                assert_eq!(text, "hi");
                assert!(highlight);
            }
            _ => panic!("expected print"),
        }
    }

    #[test]
    fn resolve_size_prefers_flags() {
        let detected = Some(Size::new(120, 40));
        assert_eq!(resolve_size(Some(10), None, detected), Size::new(10, 40));
        assert_eq!(resolve_size(None, None, detected), Size::new(120, 40));
        assert_eq!(resolve_size(None, Some(5), None), Size::new(80, 5));
    }

    #[test]
    fn print_writes_highlight_and_resets() {
        let mut out = Vec::new();
        print(&mut out, 5, 10, "SEL", true).unwrap();
        assert_eq!(out, b"\x1b[6;11H\x1b[7mSEL\x1b[0m");
    }

    #[test]
    fn print_keeps_percent_literal() {
        let mut out = Vec::new();
        print(&mut out, 0, 0, "100%s", false).unwrap();
        assert_eq!(out, b"\x1b[1;1H100%s");
    }

    #[test]
    fn plain_view_prints_screen() {
        let mut out = Vec::new();
        view_plain(&mut out, &["one", "two"], Position::new(1, 2), Size::new(40, 3)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "one\ntwo\nPress ESC to save   COL: 2   ROW: 1\n");
    }

    #[test]
    fn ansi_view_ends_on_cursor() {
        let mut out = Vec::new();
        view_ansi(&mut out, &["x"], Position::new(0, 1), Size::new(20, 2)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[7mPress ESC to save"));
        assert!(text.ends_with("\x1b[1;2H"));
    }

    fn plain(cols: u16, rows: u16) -> DisplayArgs {
        DisplayArgs {
            cursor_row: 0,
            cursor_col: 0,
            cols: Some(cols),
            rows: Some(rows),
            plain: true,
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let err = run(Command::View {
            file: PathBuf::from("/definitely/not/here.txt"),
            display: plain(10, 2),
        })
        .unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn parses_note_show_with_store() {
        let cli = Cli::try_parse_from([
            "jot", "note", "show", "todo", "--store", "/tmp/n.json", "--plain",
        ])
        .unwrap();
        match cli.command {
            Command::Note {
                store,
                action: NoteCommand::Show { title, display },
            } => {
                assert_eq!(store, Some(PathBuf::from("/tmp/n.json")));
                assert_eq!(title, "todo");
                assert!(display.plain);
            }
            _ => panic!("expected note show"),
        }
    }

    // ── Notes ───────────────────────────────────────────────────────────

    fn temp_store() -> (tempfile::TempDir, NoteStore) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = NoteStore::open(dir.path().join("notes.json")).unwrap();
        (dir, store)
    }

    fn note_output(store: &mut NoteStore, action: NoteCommand) -> String {
        let mut out = Vec::new();
        note(store, action, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn note_add_list_show_rm() {
        let (dir, mut store) = temp_store();
        let file = dir.path().join("body.txt");
        fs::write(&file, "eggs\nmilk\n").unwrap();

        let added = note_output(&mut store, NoteCommand::Add {
            title: "groceries".into(),
            file,
        });
        assert_eq!(added, "Note saved as \"groceries\"\n");

        let listed = note_output(&mut store, NoteCommand::List);
        assert!(listed.starts_with("groceries\t"));

        let shown = note_output(&mut store, NoteCommand::Show {
            title: "groceries".into(),
            display: plain(40, 3),
        });
        assert_eq!(shown, "eggs\nmilk\nPress ESC to save   COL: 0   ROW: 0\n");

        note_output(&mut store, NoteCommand::Rm { title: "groceries".into() });
        assert!(store.notes().is_empty());
    }

    #[test]
    fn note_edit_replaces_lines() {
        let (dir, mut store) = temp_store();
        let file = dir.path().join("body.txt");
        fs::write(&file, "v1").unwrap();
        note_output(&mut store, NoteCommand::Add { title: "t".into(), file: file.clone() });
        fs::write(&file, "v2\nmore").unwrap();
        note_output(&mut store, NoteCommand::Edit { title: "t".into(), file });
        assert_eq!(store.query("t").unwrap().text, vec!["v2", "more"]);
    }

    #[test]
    fn showing_missing_note_fails() {
        let (_dir, mut store) = temp_store();
        let err = note(
            &mut store,
            NoteCommand::Show { title: "nope".into(), display: plain(10, 2) },
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "no note titled \"nope\"");
    }
}
