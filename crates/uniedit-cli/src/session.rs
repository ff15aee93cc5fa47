//! Blocking line-at-a-time session loop.
//!
//! Reads one physical input per iteration, hands it to the editor, and
//! keeps going until `exit` or end of input. Commands run to completion
//! before the next read; there is no background work.

use std::io::{self, BufRead, Write};

use crate::commands::{Editor, SessionControl};

const PROMPT: &str = "(editor) ";

const GREETING: &str = "\
University Information Editor
Type help or ? to list commands.
Type exit or press Ctrl-D to quit.";

/// Runs the interactive loop over the given input stream until `exit` or
/// end of input.
///
/// # Errors
///
/// Returns the underlying I/O error when reading input fails.
pub fn run_session<R: BufRead>(editor: &mut Editor, mut input: R) -> io::Result<()> {
    println!("{GREETING}");
    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        if editor.execute_input(&line) == SessionControl::Exit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ends_on_exit() {
        let mut editor = Editor::new(Vec::new());
        let input = b"help\nexit\nview 1\n" as &[u8];
        run_session(&mut editor, input).unwrap();
        // The line after exit never ran, so no dataset complaint was needed
        // and the editor is still empty.
        assert!(editor.store().is_none());
    }

    #[test]
    fn test_session_ends_on_eof() {
        let mut editor = Editor::new(Vec::new());
        run_session(&mut editor, b"" as &[u8]).unwrap();
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut editor = Editor::new(Vec::new());
        run_session(&mut editor, b"\n   \nexit\n" as &[u8]).unwrap();
    }
}
