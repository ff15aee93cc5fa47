//! Command parsing and dispatch for the editing session.
//!
//! One logical input line is split into a command word and an argument
//! string; arguments are tokenized shell-style. Every failure is reported
//! through the message sink and aborts only the failing command, never the
//! session. Commands that mutate state validate their arguments and the
//! target record before touching the store, so a rejected command leaves
//! no partial mutation behind.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

use uniedit_ingest::{
    ALIAS_EXTENSION, DATASET_EXTENSION, DEFAULT_ALIAS_NAME, DEFAULT_DATASET_NAME, LoadError,
    SerializeError, load_alias, load_dataset, scan_folders, write_alias, write_dataset,
};
use uniedit_model::{ChangeLog, RecordStore, StoreError};
use uniedit_report::generate_report;

use crate::view::record_table;

/// Static command table printed by `help`.
pub const COMMAND_HELP: &[(&str, &str)] = &[
    (
        "load [data alias]",
        "load data files (default: auto-discover the .csv and .txt)",
    ),
    (
        "dump [newData [newAlias]]",
        "write data files (default: overwrite the loaded paths)",
    ),
    (
        "alias oldName newName [issueId...]",
        "record a school rename",
    ),
    ("del ID [issueId...]", "delete a record"),
    ("outdate ID [issueId...]", "mark a record as outdated"),
    ("view ID [ID...]", "show records side by side"),
    ("generate", "generate the Markdown change log"),
    ("exit", "quit the editor"),
];

/// Command names offered to the completion service.
#[must_use]
pub fn command_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = COMMAND_HELP
        .iter()
        .map(|(usage, _)| usage.split_whitespace().next().unwrap_or(*usage))
        .collect();
    names.push("help");
    names.push("?");
    names
}

/// Whether the session loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Exit,
}

/// Errors reported at the command boundary.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Shell-style tokenization failed, typically an unmatched quote.
    #[error("{command}: unmatched quote in arguments")]
    UnmatchedQuote { command: &'static str },

    /// Wrong number of arguments for the command.
    #[error("{command}: expected {expected}, got {got} argument(s)")]
    Arity {
        command: &'static str,
        expected: &'static str,
        got: usize,
    },

    /// File arguments whose extensions do not identify one dataset and one
    /// alias file.
    #[error("{command}: expected one .{DATASET_EXTENSION} and one .{ALIAS_EXTENSION} file")]
    AmbiguousExtension { command: &'static str },

    /// Auto-discovery could not resolve a conventional file name.
    #[error("auto-discovery found no {name}, pass file paths explicitly")]
    DefaultFileMissing { name: &'static str },

    /// An edit or dump was attempted before a successful `load`.
    #[error("no dataset loaded, run load first")]
    NothingLoaded,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

/// One editing session: the loaded store, the accumulated change log, and
/// the paths the data was last loaded from.
#[derive(Debug, Default)]
pub struct Editor {
    scan_roots: Vec<PathBuf>,
    store: Option<RecordStore>,
    change_log: ChangeLog,
    dataset_path: Option<PathBuf>,
    alias_path: Option<PathBuf>,
}

impl Editor {
    #[must_use]
    pub fn new(scan_roots: Vec<PathBuf>) -> Self {
        Self {
            scan_roots,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn store(&self) -> Option<&RecordStore> {
        self.store.as_ref()
    }

    #[must_use]
    pub fn change_log(&self) -> &ChangeLog {
        &self.change_log
    }

    /// File names currently discoverable for `load`/`dump` completion.
    #[must_use]
    pub fn discovered_file_names(&self) -> Vec<String> {
        scan_folders(&self.scan_roots).into_keys().collect()
    }

    /// Executes one physical input, which may carry several commands on
    /// embedded newlines. Commands run in order and are error-isolated; a
    /// failure in one does not stop the next. `exit` stops the batch.
    pub fn execute_input(&mut self, input: &str) -> SessionControl {
        for line in input.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if self.execute_line(line) == SessionControl::Exit {
                return SessionControl::Exit;
            }
        }
        SessionControl::Continue
    }

    /// Executes one logical command line, reporting any failure through the
    /// message sink.
    pub fn execute_line(&mut self, line: &str) -> SessionControl {
        match self.dispatch(line) {
            Ok(control) => control,
            Err(error) => {
                error!("{error}");
                SessionControl::Continue
            }
        }
    }

    /// Parses and runs one command line. Public so tests can observe the
    /// error instead of the logged message.
    pub fn dispatch(&mut self, line: &str) -> Result<SessionControl, CommandError> {
        let line = line.trim();
        let (command, arg_str) = match line.find(' ') {
            Some(index) => (&line[..index], line[index + 1..].trim()),
            None => (line, ""),
        };
        match command.to_lowercase().as_str() {
            "load" => self.cmd_load(&tokenize("load", arg_str)?)?,
            "dump" => self.cmd_dump(&tokenize("dump", arg_str)?)?,
            "alias" => self.cmd_alias(&tokenize("alias", arg_str)?)?,
            "del" => self.cmd_del(&tokenize("del", arg_str)?)?,
            "outdate" => self.cmd_outdate(&tokenize("outdate", arg_str)?)?,
            "view" => self.cmd_view(&tokenize("view", arg_str)?)?,
            "generate" => self.cmd_generate(),
            "help" | "?" | "？" => print_help(),
            "exit" => return Ok(SessionControl::Exit),
            unknown => warn!("unknown command: {unknown}"),
        }
        Ok(SessionControl::Continue)
    }

    fn cmd_load(&mut self, args: &[String]) -> Result<(), CommandError> {
        let (data_path, alias_path) = match args.len() {
            0 => {
                let found = scan_folders(&self.scan_roots);
                let data = found.get(DEFAULT_DATASET_NAME).cloned().ok_or(
                    CommandError::DefaultFileMissing {
                        name: DEFAULT_DATASET_NAME,
                    },
                )?;
                let alias = found.get(DEFAULT_ALIAS_NAME).cloned().ok_or(
                    CommandError::DefaultFileMissing {
                        name: DEFAULT_ALIAS_NAME,
                    },
                )?;
                (data, alias)
            }
            2 => classify_pair("load", &args[0], &args[1])?,
            got => {
                return Err(CommandError::Arity {
                    command: "load",
                    expected: "0 or 2 files",
                    got,
                });
            }
        };
        info!(
            data = %data_path.display(),
            alias = %alias_path.display(),
            "loading files"
        );
        let mut store = load_dataset(&data_path)?;
        store.set_alias_lines(load_alias(&alias_path)?);
        self.store = Some(store);
        self.dataset_path = Some(data_path);
        self.alias_path = Some(alias_path);
        Ok(())
    }

    fn cmd_dump(&mut self, args: &[String]) -> Result<(), CommandError> {
        let store = self.store.as_ref().ok_or(CommandError::NothingLoaded)?;
        match args.len() {
            0 => {
                let data = self
                    .dataset_path
                    .clone()
                    .ok_or(CommandError::NothingLoaded)?;
                let alias = self.alias_path.clone().ok_or(CommandError::NothingLoaded)?;
                write_dataset(store, &data)?;
                write_alias(store, &alias)?;
            }
            1 => {
                let path = Path::new(&args[0]);
                if has_extension(path, DATASET_EXTENSION) {
                    write_dataset(store, path)?;
                } else if has_extension(path, ALIAS_EXTENSION) {
                    write_alias(store, path)?;
                } else {
                    return Err(CommandError::AmbiguousExtension { command: "dump" });
                }
            }
            2 => {
                let (data, alias) = classify_pair("dump", &args[0], &args[1])?;
                write_dataset(store, &data)?;
                write_alias(store, &alias)?;
            }
            got => {
                return Err(CommandError::Arity {
                    command: "dump",
                    expected: "at most 2 files",
                    got,
                });
            }
        }
        Ok(())
    }

    fn cmd_alias(&mut self, args: &[String]) -> Result<(), CommandError> {
        if args.len() < 2 {
            return Err(CommandError::Arity {
                command: "alias",
                expected: "oldName and newName",
                got: args.len(),
            });
        }
        let store = self.store.as_mut().ok_or(CommandError::NothingLoaded)?;
        let (old_name, new_name) = (&args[0], &args[1]);
        let issue_ids = args[2..].to_vec();
        store.append_alias(old_name, new_name);
        self.change_log
            .record_alias(old_name, new_name, issue_ids.clone());
        info!(
            "recorded alias {old_name} -> {new_name}, issue_ids={issue_ids:?}"
        );
        Ok(())
    }

    fn cmd_del(&mut self, args: &[String]) -> Result<(), CommandError> {
        let (id, issue_ids) = split_id_args("del", args)?;
        let store = self.store.as_mut().ok_or(CommandError::NothingLoaded)?;
        store.delete(id)?;
        self.change_log.record_deletion(id, issue_ids.clone());
        info!("deleted record {id}, issue_ids={issue_ids:?}");
        Ok(())
    }

    fn cmd_outdate(&mut self, args: &[String]) -> Result<(), CommandError> {
        let (id, issue_ids) = split_id_args("outdate", args)?;
        let store = self.store.as_mut().ok_or(CommandError::NothingLoaded)?;
        store.mark_outdated(id)?;
        self.change_log.record_outdate(id, issue_ids.clone());
        info!("marked record {id} outdated, issue_ids={issue_ids:?}");
        Ok(())
    }

    fn cmd_view(&self, args: &[String]) -> Result<(), CommandError> {
        let table = self.render_view(args)?;
        println!("{table}");
        Ok(())
    }

    /// Renders the transposed record table, or fails without output when
    /// any requested ID is unknown.
    pub fn render_view(&self, ids: &[String]) -> Result<String, CommandError> {
        if ids.is_empty() {
            return Err(CommandError::Arity {
                command: "view",
                expected: "at least 1 record ID",
                got: 0,
            });
        }
        let store = self.store.as_ref().ok_or(CommandError::NothingLoaded)?;
        for id in ids {
            if !store.contains(id) {
                return Err(StoreError::RecordNotFound { id: id.clone() }.into());
            }
        }
        Ok(record_table(store, ids).to_string())
    }

    fn cmd_generate(&self) {
        let report = generate_report(&self.change_log);
        info!("{report}");
    }
}

/// Shell-style argument tokenization. Quote grouping is honored; an
/// unmatched quote fails the whole command.
fn tokenize(command: &'static str, arg_str: &str) -> Result<Vec<String>, CommandError> {
    if arg_str.is_empty() {
        return Ok(Vec::new());
    }
    shlex::split(arg_str).ok_or(CommandError::UnmatchedQuote { command })
}

/// Splits `id [issueId...]` argument lists.
fn split_id_args<'a>(
    command: &'static str,
    args: &'a [String],
) -> Result<(&'a str, Vec<String>), CommandError> {
    let Some((id, issue_ids)) = args.split_first() else {
        return Err(CommandError::Arity {
            command,
            expected: "a record ID",
            got: 0,
        });
    };
    Ok((id, issue_ids.to_vec()))
}

/// Assigns dataset/alias roles to a two-file argument pair by extension,
/// accepting the files in either order.
fn classify_pair(
    command: &'static str,
    first: &str,
    second: &str,
) -> Result<(PathBuf, PathBuf), CommandError> {
    let (first, second) = (Path::new(first), Path::new(second));
    if has_extension(first, DATASET_EXTENSION) && has_extension(second, ALIAS_EXTENSION) {
        Ok((first.to_path_buf(), second.to_path_buf()))
    } else if has_extension(first, ALIAS_EXTENSION) && has_extension(second, DATASET_EXTENSION) {
        Ok((second.to_path_buf(), first.to_path_buf()))
    } else {
        Err(CommandError::AmbiguousExtension { command })
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

fn print_help() {
    println!("Commands:");
    let width = COMMAND_HELP
        .iter()
        .map(|(usage, _)| usage.len())
        .max()
        .unwrap_or(0)
        + 2;
    for (usage, description) in COMMAND_HELP {
        println!("  {usage:width$}-- {description}");
    }
}
