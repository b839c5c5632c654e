//! Line-oriented command layer over `NoteCollection`.
//!
//! # Responsibility
//! - Parse one text line into a typed `Command`.
//! - Execute commands against a collection and render the outcome.
//! - Run whole scripts, reporting failed lines without stopping.
//!
//! # Invariants
//! - Parsing never touches the collection.
//! - Indices are zero-based storage positions, as in the collection API.
//!   Every rendered view labels rows with that storage index, whatever the
//!   view order.
//! - Titles keep trailing whitespace; only the separator after the verb or
//!   index is dropped.

use crate::clock::Clock;
use crate::service::note_collection::{CollectionError, NoteCollection, NoteEntry, NoteStats};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

static COMMAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<verb>[A-Za-z]+)(?:\s+(?P<rest>.*))?$").expect("valid command regex")
});
static INDEX_ARGS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<index>\S+)(?:\s+(?P<title>.*))?$").expect("valid index args regex")
});

/// Sort order for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    Storage,
    Status,
    Date,
}

/// One parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { title: String },
    Edit { index: usize, title: String },
    Done { index: usize },
    Remove { index: usize },
    List { order: ListOrder },
    Find { query: String },
    Stats,
}

/// Error for parsing or executing a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Line is not a valid command.
    Parse { line: String, message: String },
    /// Collection rejected the operation.
    Collection(CollectionError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { line, message } => write!(f, "invalid command `{line}`: {message}"),
            Self::Collection(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse { .. } => None,
            Self::Collection(err) => Some(err),
        }
    }
}

impl From<CollectionError> for CommandError {
    fn from(value: CollectionError) -> Self {
        Self::Collection(value)
    }
}

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Mutation acknowledged with a short message.
    Done(String),
    /// A view of notes, one `index: note` line each.
    Notes(Vec<NoteEntry>),
    Stats(NoteStats),
}

impl Display for CommandOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Done(message) => write!(f, "{message}"),
            Self::Notes(notes) if notes.is_empty() => write!(f, "(no notes)"),
            Self::Notes(notes) => {
                for (row, entry) in notes.iter().enumerate() {
                    if row > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}: {}", entry.index, entry.snapshot)?;
                }
                Ok(())
            }
            Self::Stats(stats) => write!(f, "{stats}"),
        }
    }
}

impl Command {
    /// Parses one command line.
    ///
    /// # Errors
    /// - `CommandError::Parse` for unknown verbs or malformed arguments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let parse_error = |message: &str| CommandError::Parse {
            line: line.trim().to_string(),
            message: message.to_string(),
        };

        let caps = COMMAND_RE
            .captures(line)
            .ok_or_else(|| parse_error("expected `<command> [args]`"))?;
        let verb = caps
            .name("verb")
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();
        let raw_rest = caps.name("rest").map(|m| m.as_str()).unwrap_or("");
        let rest = raw_rest.trim_end();

        match verb.as_str() {
            "add" => {
                if rest.is_empty() {
                    return Err(parse_error("`add` requires a title"));
                }
                Ok(Self::Add {
                    title: raw_rest.to_string(),
                })
            }
            "edit" => {
                let (index, title) = parse_index_args(raw_rest).map_err(|msg| parse_error(&msg))?;
                let title = title.ok_or_else(|| parse_error("`edit` requires a title"))?;
                Ok(Self::Edit { index, title })
            }
            "done" => Ok(Self::Done {
                index: parse_lone_index(rest).map_err(|msg| parse_error(&msg))?,
            }),
            "remove" | "rm" => Ok(Self::Remove {
                index: parse_lone_index(rest).map_err(|msg| parse_error(&msg))?,
            }),
            "list" => {
                let order = match rest.to_ascii_lowercase().as_str() {
                    "" => ListOrder::Storage,
                    "status" => ListOrder::Status,
                    "date" => ListOrder::Date,
                    _ => return Err(parse_error("`list` accepts `status` or `date`")),
                };
                Ok(Self::List { order })
            }
            "find" => Ok(Self::Find {
                query: rest.to_string(),
            }),
            "stats" => {
                if !rest.is_empty() {
                    return Err(parse_error("`stats` takes no arguments"));
                }
                Ok(Self::Stats)
            }
            _ => Err(parse_error("unknown command")),
        }
    }

    /// Runs this command against `notes`.
    ///
    /// # Errors
    /// - `CommandError::Collection` when the collection rejects the call;
    ///   the collection is left unchanged.
    pub fn execute<C: Clock>(
        &self,
        notes: &mut NoteCollection<C>,
    ) -> Result<CommandOutput, CommandError> {
        let output = match self {
            Self::Add { title } => {
                notes.add(title.as_str())?;
                CommandOutput::Done(format!("added #{}", notes.len() - 1))
            }
            Self::Edit { index, title } => {
                notes.edit(*index, title.as_str())?;
                CommandOutput::Done(format!("edited #{index}"))
            }
            Self::Done { index } => {
                notes.mark_as_completed(*index)?;
                CommandOutput::Done(format!("completed #{index}"))
            }
            Self::Remove { index } => {
                let removed = notes.remove(*index)?;
                CommandOutput::Done(format!("removed #{index}: {}", removed.title))
            }
            Self::List { order } => CommandOutput::Notes(match order {
                ListOrder::Storage => notes.entries(),
                ListOrder::Status => notes.entries_by_status(),
                ListOrder::Date => notes.entries_by_date(),
            }),
            Self::Find { query } => CommandOutput::Notes(notes.find_entries(query)),
            Self::Stats => CommandOutput::Stats(notes.get_stats()),
        };
        Ok(output)
    }
}

/// Parses and executes one line.
pub fn run_line<C: Clock>(
    notes: &mut NoteCollection<C>,
    line: &str,
) -> Result<CommandOutput, CommandError> {
    Command::parse(line)?.execute(notes)
}

/// Runs every line of `script` against `notes`.
///
/// Outputs go to `out`; failures go to `err` as `line <n>: <error>` and the
/// next line still runs. Blank and `#` lines are skipped but still counted
/// for line numbers.
///
/// Returns the number of failed lines.
///
/// # Errors
/// - I/O failures reading `script` or writing either sink.
pub fn run_script<C, R, W, E>(
    notes: &mut NoteCollection<C>,
    script: R,
    mut out: W,
    mut err: E,
) -> io::Result<usize>
where
    C: Clock,
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut failures = 0usize;

    for (line_index, line) in script.lines().enumerate() {
        let line = line?;
        let line_no = line_index + 1;
        if is_skippable(&line) {
            continue;
        }

        match run_line(notes, &line) {
            Ok(output) => writeln!(out, "{output}")?,
            Err(error) => {
                failures += 1;
                let kind = match error {
                    CommandError::Parse { .. } => "parse",
                    CommandError::Collection(_) => "collection",
                };
                warn!("event=script_line module=command status=error line={line_no} kind={kind}");
                writeln!(err, "line {line_no}: {error}")?;
            }
        }
    }

    Ok(failures)
}

/// Returns whether a script line carries no command (blank or `#` comment).
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn parse_index_args(rest: &str) -> Result<(usize, Option<String>), String> {
    let caps = INDEX_ARGS_RE
        .captures(rest)
        .ok_or_else(|| "missing note index".to_string())?;
    let raw_index = caps.name("index").map(|m| m.as_str()).unwrap_or("");
    let index = raw_index
        .parse::<usize>()
        .map_err(|_| format!("`{raw_index}` is not a valid note index"))?;
    let title = caps
        .name("title")
        .map(|m| m.as_str().to_string())
        .filter(|title| !title.trim().is_empty());
    Ok((index, title))
}

fn parse_lone_index(rest: &str) -> Result<usize, String> {
    let (index, extra) = parse_index_args(rest)?;
    if extra.is_some() {
        return Err("unexpected text after note index".to_string());
    }
    Ok(index)
}
