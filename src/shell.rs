//! Interactive filter shell.
//!
//! `filehub browse` reads one command per line and drives a
//! [`CatalogSession`]. Editing a field only changes filter state; `apply`,
//! `unset`, `sort`, `clear`, `delete` and `refresh` fetch and redraw.
//!
//! ```text
//! filehub> set search quarterly report
//! filehub> set min_size 1
//! filehub> set min_unit MB
//! filehub> apply
//! filehub> sort size
//! filehub> unset search
//! filehub> quit
//! ```

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::catalog::CatalogApi;
use crate::filters::{FilterAction, FilterError, FilterField, SortKey};
use crate::output::TableOutput;
use crate::session::CatalogSession;

const PROMPT: &str = "filehub> ";

const COMMANDS: [&str; 11] = [
    "set", "unset", "sort", "apply", "clear", "show", "types", "delete", "refresh", "help", "quit",
];

const HELP: &str = "\
Commands:
  set <field> [value...]  Edit a filter field (no fetch until apply)
  unset <field>           Clear one filter and fetch
  sort <key>              Sort by key, toggling direction on repeat, and fetch
  apply                   Fetch with the current filters
  clear                   Reset every filter and fetch
  show                    Print raw filter values and the current listing
  types                   List file types in storage
  delete <id>             Delete a record and fetch again
  refresh                 Fetch the current query again
  help                    Show this help
  quit                    Leave the shell

Fields: search, file_type, min_size, min_unit, max_size, max_unit,
        uploaded_after, uploaded_before, sort_field, sort_direction
Sort keys: name, size, date, type";

/// Errors from parsing a shell line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    /// The first word is not a command.
    #[error("unknown command '{name}'{}", hint(.suggestion))]
    UnknownCommand {
        /// Word as typed
        name: String,
        /// Closest command, if any is close
        suggestion: Option<&'static str>,
    },

    /// A required argument is missing.
    #[error("'{command}' needs {what}")]
    MissingArgument {
        /// Command as typed
        command: &'static str,
        /// Description of the missing argument
        what: &'static str,
    },

    /// A field name or sort key did not parse.
    #[error(transparent)]
    Filter(#[from] FilterError),
}

fn hint(suggestion: &Option<&'static str>) -> String {
    suggestion
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Edit a field's raw value
    Set(FilterField, String),
    /// Remove one filter
    Unset(FilterField),
    /// Toggle sorting by a key
    Sort(SortKey),
    /// Submit the current state
    Apply,
    /// Reset all filters
    Clear,
    /// Print state and listing
    Show,
    /// List file types
    Types,
    /// Delete a record by id
    Delete(String),
    /// Re-issue the current query
    Refresh,
    /// Print help
    Help,
    /// Leave the shell
    Quit,
}

impl ShellCommand {
    /// Parse a line. Blank lines and `#` comments yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError`] for unknown commands, unknown field names or
    /// sort keys, and missing arguments.
    pub fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    return Err(ShellError::MissingArgument {
                        command: "set",
                        what: "a field name",
                    });
                }
                Self::Set(field.parse()?, value.to_string())
            }
            "unset" | "rm" => Self::Unset(required(rest, "unset", "a field name")?.parse()?),
            "sort" => Self::Sort(required(rest, "sort", "a sort key")?.parse()?),
            "apply" | "go" => Self::Apply,
            "clear" => Self::Clear,
            "show" | "ls" => Self::Show,
            "types" => Self::Types,
            "delete" | "del" => Self::Delete(required(rest, "delete", "a record id")?.to_string()),
            "refresh" => Self::Refresh,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => {
                return Err(ShellError::UnknownCommand {
                    name: word.to_string(),
                    suggestion: closest_command(other),
                })
            }
        };
        Ok(Some(command))
    }

    /// Filter action this command performs, if it is a filter command.
    #[must_use]
    pub fn action(&self) -> Option<FilterAction> {
        match self {
            Self::Set(field, value) => Some(FilterAction::Update(*field, value.clone())),
            Self::Unset(field) => Some(FilterAction::Remove(*field)),
            Self::Sort(key) => Some(FilterAction::ToggleSort(*key)),
            Self::Apply => Some(FilterAction::Submit),
            Self::Clear => Some(FilterAction::ClearAll),
            _ => None,
        }
    }
}

fn required<'a>(rest: &'a str, command: &'static str, what: &'static str) -> Result<&'a str, ShellError> {
    if rest.is_empty() {
        Err(ShellError::MissingArgument { command, what })
    } else {
        Ok(rest)
    }
}

fn closest_command(word: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|c| (*c, strsim::jaro_winkler(word, c)))
        .filter(|(_, score)| *score >= 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}

/// Line-oriented shell over a session.
pub struct Shell<A: CatalogApi + 'static, R, W> {
    session: CatalogSession<A>,
    input: R,
    output: W,
    color: bool,
}

impl<A, R, W> Shell<A, R, W>
where
    A: CatalogApi + 'static,
    R: BufRead,
    W: Write,
{
    /// Create a shell. Nothing is fetched until [`Shell::run`].
    pub fn new(session: CatalogSession<A>, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
            color: true,
        }
    }

    /// Enable or disable ANSI colors in listings.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Session driven by this shell.
    #[must_use]
    pub fn session(&self) -> &CatalogSession<A> {
        &self.session
    }

    /// Fetch with the initial filters, then read commands until `quit` or EOF.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from the input or output streams. Command errors
    /// are printed and the loop continues.
    pub fn run(&mut self) -> io::Result<()> {
        self.session.load();
        self.render()?;

        let mut line = String::new();
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            match ShellCommand::parse(&line) {
                Ok(Some(ShellCommand::Quit)) => break,
                Ok(Some(command)) => self.execute(command)?,
                Ok(None) => {}
                Err(e) => writeln!(self.output, "error: {e}")?,
            }
        }
        log::debug!("Shell closed");
        Ok(())
    }

    /// Run one command, writing whatever it displays.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from the output stream.
    pub fn execute(&mut self, command: ShellCommand) -> io::Result<()> {
        log::trace!("Shell command: {:?}", command);
        if let Some(action) = command.action() {
            return match self.session.apply(action) {
                Some(_) => self.render(),
                None => self.show_state(),
            };
        }

        match command {
            ShellCommand::Show => {
                self.show_state()?;
                writeln!(self.output)?;
                self.render()
            }
            ShellCommand::Types => match self.session.file_types() {
                Ok(types) if types.is_empty() => writeln!(self.output, "No file types in storage."),
                Ok(types) => {
                    for file_type in types {
                        writeln!(self.output, "  {file_type}")?;
                    }
                    Ok(())
                }
                Err(e) => writeln!(self.output, "error: {e}"),
            },
            ShellCommand::Delete(id) => match self.session.delete(&id) {
                Ok(_) => {
                    writeln!(self.output, "Deleted {id}")?;
                    self.render()
                }
                Err(e) => writeln!(self.output, "error: {e}"),
            },
            ShellCommand::Refresh => {
                self.session.refresh();
                self.render()
            }
            ShellCommand::Help => writeln!(self.output, "{HELP}"),
            // Filter commands return above; Quit is handled by the loop
            _ => Ok(()),
        }
    }

    fn show_state(&mut self) -> io::Result<()> {
        let state = self.session.engine().state();
        for field in FilterField::ALL {
            let value = state.get(field);
            if value != field.default_value() {
                writeln!(self.output, "  {:<16} {}", field.name(), value)?;
            }
        }
        if state.is_default() {
            writeln!(self.output, "  (all filters at defaults)")?;
        }
        Ok(())
    }

    /// Wait for the newest fetch, then print the listing.
    fn render(&mut self) -> io::Result<()> {
        self.session.wait();
        let view = self.session.view();
        if let Some(message) = view.state().error() {
            writeln!(self.output, "error: {message}")?;
            writeln!(self.output, "(showing previous results)")?;
        }
        TableOutput::new(
            view.records(),
            view.summary(),
            view.loaded_query(),
            self.session.engine().active_filters(),
        )
        .with_color(self.color)
        .write_to(&mut self.output)
    }
}
