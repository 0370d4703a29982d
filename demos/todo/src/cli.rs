//! Line-oriented command interface over a shared todo store.
//!
//! This is where user input enters the system, so all parsing and input
//! validation happens here. The store itself accepts anything.

use crate::types::{TodoAction, TodoId, TodoItem};
use crate::SharedTodoStore;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;
use todo_store_runtime::StoreError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Commands run by the scripted demo session
pub const DEMO_SCRIPT: &str = "\
add buy milk
add walk dog
list
toggle 0
list
delete 1
list
";

/// Usage text printed by `help`
pub const HELP: &str = "\
commands:
  add <text>     add a todo
  delete <id>    delete a todo
  toggle <id>    toggle a todo between open and completed
  list           show all todos
  help           show this help
  quit           leave the session";

/// A parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `add <text>`
    Add(String),
    /// `delete <id>`
    Delete(TodoId),
    /// `toggle <id>`
    Toggle(TodoId),
    /// `list`
    List,
    /// `help`
    Help,
    /// `quit` or `exit`
    Quit,
}

/// Errors from parsing an input line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line was blank
    #[error("empty command")]
    Empty,

    /// The first word is not a known command
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    /// A required argument was not given
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        /// Command that was given
        command: &'static str,
        /// What was missing
        argument: &'static str,
    },

    /// The id argument is not a non-negative integer
    #[error("invalid todo id '{0}'")]
    InvalidId(String),
}

impl Command {
    /// The store action this command maps to, if it mutates the list
    #[must_use]
    pub fn to_action(&self) -> Option<TodoAction> {
        match self {
            Self::Add(text) => Some(TodoAction::AddTodo { text: text.clone() }),
            Self::Delete(id) => Some(TodoAction::DeleteTodo { id: *id }),
            Self::Toggle(id) => Some(TodoAction::ToggleCompleted { id: *id }),
            Self::List | Self::Help | Self::Quit => None,
        }
    }
}

fn parse_id(command: &'static str, arg: &str) -> Result<TodoId, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a todo id",
        });
    }

    arg.parse::<u64>()
        .map(TodoId::new)
        .map_err(|_| CommandError::InvalidId(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "add" if rest.is_empty() => Err(CommandError::MissingArgument {
                command: "add",
                argument: "some text",
            }),
            "add" => Ok(Self::Add(rest.to_string())),
            "delete" | "rm" => parse_id("delete", rest).map(Self::Delete),
            "toggle" => parse_id("toggle", rest).map(Self::Toggle),
            "list" | "ls" => Ok(Self::List),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

/// Errors that end a session
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering the list as JSON failed
    #[error("failed to render todos: {0}")]
    Render(#[from] serde_json::Error),

    /// The store refused an action
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How a session presents itself
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionOptions {
    /// Render listings as JSON instead of text
    pub json: bool,
    /// Print each command before running it
    pub echo: bool,
}

/// Render todos for display
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_items(items: &[TodoItem], json: bool) -> Result<String, serde_json::Error> {
    if json {
        return serde_json::to_string_pretty(items);
    }

    if items.is_empty() {
        return Ok("(no todos)".to_string());
    }

    let lines: Vec<String> = items
        .iter()
        .map(|todo| {
            let mark = if todo.completed { 'x' } else { ' ' };
            format!("[{mark}] {:>3}  {}", todo.id, todo.text)
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Read commands from `input` until EOF or `quit`, writing replies to `output`
///
/// Malformed lines are reported and skipped. Deleting or toggling an id that
/// does not exist is reported too, but the action is still sent: the store
/// treats it as a no-op.
///
/// # Errors
///
/// Returns an error if I/O fails or the store has been shut down.
pub async fn run_session<I, O>(
    store: &SharedTodoStore,
    input: I,
    output: &mut O,
    options: SessionOptions,
) -> Result<(), SessionError>
where
    I: AsyncBufRead + Unpin,
    O: Write,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(error) => {
                tracing::debug!(%error, line = %line, "Rejected input");
                writeln!(output, "error: {error}")?;
                continue;
            },
        };

        if options.echo {
            writeln!(output, "> {}", line.trim())?;
        }

        match &command {
            Command::Quit => break,
            Command::Help => writeln!(output, "{HELP}")?,
            Command::List => {
                let items = store.state(|s| s.items().to_vec()).await;
                writeln!(output, "{}", render_items(&items, options.json)?)?;
            },
            Command::Add(text) => {
                let id = store.state(|s| TodoId::new(s.next_id())).await;
                send(store, &command).await?;
                writeln!(output, "added {id}: {text}")?;
            },
            Command::Delete(id) | Command::Toggle(id) => {
                let known = store.state(|s| s.exists(*id)).await;
                send(store, &command).await?;
                if known {
                    let verb = if matches!(command, Command::Delete(_)) {
                        "deleted"
                    } else {
                        "toggled"
                    };
                    writeln!(output, "{verb} {id}")?;
                } else {
                    writeln!(output, "no todo with id {id}")?;
                }
            },
        }
    }

    output.flush()?;
    Ok(())
}

async fn send(store: &SharedTodoStore, command: &Command) -> Result<(), SessionError> {
    if let Some(action) = command.to_action() {
        store.send(action).await?;
    }
    Ok(())
}
