//! Line commands typed at the browser prompt.

use shared::domain::ArtworkId;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserCommand {
    Next,
    Previous,
    GoTo(u32),
    Reload,
    Select(ArtworkId),
    Unselect(ArtworkId),
    Toggle(ArtworkId),
    List,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for the list)")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
}

pub const HELP: &str = "\
commands:
  n, next            next page
  p, prev            previous page
  g, goto <page>     jump to a page
  r, reload          fetch the current page again
  s, select <id>     select a row on this page
  u, unselect <id>   unselect a row
  t, toggle <id>     toggle a row on this page
  l, list            show the selection
  j, json            print the selection as JSON
  h, help            show this help
  q, quit            exit";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<BrowserCommand>, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();

    let command = match verb.to_ascii_lowercase().as_str() {
        "n" | "next" => BrowserCommand::Next,
        "p" | "prev" | "previous" => BrowserCommand::Previous,
        "g" | "goto" => BrowserCommand::GoTo(number(arg, "goto")?),
        "r" | "reload" => BrowserCommand::Reload,
        "s" | "select" => BrowserCommand::Select(ArtworkId(number(arg, "select")?)),
        "u" | "unselect" => BrowserCommand::Unselect(ArtworkId(number(arg, "unselect")?)),
        "t" | "toggle" => BrowserCommand::Toggle(ArtworkId(number(arg, "toggle")?)),
        "l" | "list" => BrowserCommand::List,
        "j" | "json" => BrowserCommand::Json,
        "h" | "help" | "?" => BrowserCommand::Help,
        "q" | "quit" | "exit" => BrowserCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn number<T: std::str::FromStr>(arg: Option<&str>, verb: &'static str) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(verb))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}
