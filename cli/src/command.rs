//! Line-oriented command grammar read from stdin.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Activate the trigger of the named block.
    Click(String),
    /// Navigate by `#fragment` href or bare block id.
    Nav(String),
    /// Activate the nth scanned navigation link.
    Link(usize),
    Open(String),
    Close(String),
    Toggle(String),
    State(Option<String>),
    Links,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' expects a block id")]
    MissingArgument(&'static str),
    #[error("'{command}' takes a single argument, got '{rest}'")]
    TooManyArguments { command: &'static str, rest: String },
    #[error("link index must be a number, got '{0}'")]
    BadIndex(String),
}

impl Command {
    /// Blank lines and `//` comments parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "click" => Command::Click(single("click", rest)?),
            "nav" => Command::Nav(single("nav", rest)?),
            "open" => Command::Open(single("open", rest)?),
            "close" => Command::Close(single("close", rest)?),
            "toggle" => Command::Toggle(single("toggle", rest)?),
            "link" => {
                let raw = single("link", rest)?;
                let index = raw.parse().map_err(|_| CommandError::BadIndex(raw))?;
                Command::Link(index)
            }
            "state" => {
                if rest.is_empty() {
                    Command::State(None)
                } else {
                    Command::State(Some(single("state", rest)?))
                }
            }
            "links" => Command::Links,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn single(command: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    if rest.split_whitespace().count() > 1 {
        return Err(CommandError::TooManyArguments {
            command,
            rest: rest.to_string(),
        });
    }
    Ok(rest.to_string())
}
