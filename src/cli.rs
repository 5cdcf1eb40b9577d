//! Command-line parsing and filename resolution.

use std::path::{Path, PathBuf};

use clap::Parser;

const HOTKEYS: &str = "\
Hotkeys:
  ctrl-q      quit
  ctrl-s      save
  ctrl-a      go to start of text, then start of line, then the previous line
  ctrl-e      go to end of line, then the next line
  ctrl-p      scroll up
  ctrl-n      scroll down
  ctrl-k      delete to the end of the line, then delete the line
  ctrl-g      toggle filename/line/column/unicode/word count status display
  ctrl-d      delete a single character
  ctrl-x      cut the current line
  ctrl-c      copy the current line
  ctrl-v      paste the current line
  ctrl-u      undo
  ctrl-l      jump to a specific line
  esc         redraw the screen
  ctrl-space  export to the other image format
  ctrl-~      save and quit + clear the terminal

Set NO_COLOR=1 to disable colors.";

#[derive(Debug, Parser)]
#[command(
    name = "favicon",
    version,
    about = "A small editor for icons and text files",
    after_help = HOTKEYS
)]
pub struct Cli {
    /// File to edit (`file:LINE` jumps to that line)
    pub file: String,

    /// Line number to jump to (`N` or `+N`)
    pub line: Option<String>,
}

impl Cli {
    /// The file to open and the 1-based line to start on, if one was given.
    pub fn target(&self) -> (PathBuf, Option<usize>) {
        let (file, line) = filename_and_line(&self.file, self.line.as_deref());
        (resolve_prefix(Path::new(&file)), line)
    }
}

fn parse_line_number(s: &str) -> Option<usize> {
    s.strip_prefix('+').unwrap_or(s).parse().ok().filter(|n| *n > 0)
}

/// Splits the two positional arguments into a filename and line number.
/// Accepts `file N`, `file +N`, `+N file` and `file:N`.
pub fn filename_and_line(first: &str, second: Option<&str>) -> (String, Option<usize>) {
    if let Some(second) = second {
        if first.starts_with('+') {
            if let Some(n) = parse_line_number(first) {
                return (second.to_string(), Some(n));
            }
        }
        return (first.to_string(), parse_line_number(second));
    }
    if let Some((file, n)) = first.rsplit_once(':') {
        if let Some(n) = parse_line_number(n) {
            if !file.is_empty() {
                return (file.to_string(), Some(n));
            }
        }
    }
    (first.to_string(), None)
}

/// A name ending in `.` that names no file is an unfinished tab completion:
/// pick the alphabetically first file starting with it.
pub fn resolve_prefix(path: &Path) -> PathBuf {
    let name = path.to_string_lossy();
    if !name.ends_with('.') || path.exists() {
        return path.to_path_buf();
    }
    let Some(prefix) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return path.to_path_buf();
    };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let Ok(entries) = std::fs::read_dir(&dir) else {
        return path.to_path_buf();
    };
    let mut matches: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|candidate| candidate.starts_with(&prefix))
        .collect();
    matches.sort();
    match matches.first() {
        Some(first) => path.with_file_name(first),
        None => path.to_path_buf(),
    }
}
