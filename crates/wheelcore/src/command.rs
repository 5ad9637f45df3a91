//! Line protocol spoken over the control socket.

use crate::prizes::Label;
use std::fmt;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/prizewheel.sock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum Verb {
    Show,
    Spin,
    Dismiss,
    Claim,
    Answer,
    Add,
    Remove,
    Clear,
    Defaults,
    ClearStorage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Spin,
    Dismiss,
    Claim,
    Answer(String),
    Add(Label),
    Remove(usize),
    Clear,
    Defaults,
    ClearStorage,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(Verb),
    #[error("`{0}` takes no argument")]
    UnexpectedArgument(Verb),
    #[error("invalid prize position: {0}")]
    InvalidIndex(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let verb = Verb::from_str(head).map_err(|_| CommandError::Unknown(head.to_string()))?;
        let arg = rest.trim();

        let needs_arg = |arg: &str| {
            if arg.is_empty() {
                Err(CommandError::MissingArgument(verb))
            } else {
                Ok(arg.to_string())
            }
        };

        let bare = |command: Command| {
            if arg.is_empty() {
                Ok(command)
            } else {
                Err(CommandError::UnexpectedArgument(verb))
            }
        };

        match verb {
            Verb::Show => bare(Command::Show),
            Verb::Spin => bare(Command::Spin),
            Verb::Dismiss => bare(Command::Dismiss),
            Verb::Claim => bare(Command::Claim),
            Verb::Clear => bare(Command::Clear),
            Verb::Defaults => bare(Command::Defaults),
            Verb::ClearStorage => bare(Command::ClearStorage),
            Verb::Answer => needs_arg(arg).map(Command::Answer),
            Verb::Add => needs_arg(arg).map(|a| Command::Add(Label::new(a))),
            Verb::Remove => {
                let raw = needs_arg(arg)?;
                raw.parse()
                    .map(Command::Remove)
                    .map_err(|_| CommandError::InvalidIndex(raw))
            }
        }
    }
}

impl Command {
    pub fn verb(&self) -> Verb {
        match self {
            Self::Show => Verb::Show,
            Self::Spin => Verb::Spin,
            Self::Dismiss => Verb::Dismiss,
            Self::Claim => Verb::Claim,
            Self::Answer(_) => Verb::Answer,
            Self::Add(_) => Verb::Add,
            Self::Remove(_) => Verb::Remove,
            Self::Clear => Verb::Clear,
            Self::Defaults => Verb::Defaults,
            Self::ClearStorage => Verb::ClearStorage,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Answer(text) => write!(f, "{} {}", self.verb(), text),
            Self::Add(label) => write!(f, "{} {}", self.verb(), label),
            Self::Remove(index) => write!(f, "{} {}", self.verb(), index),
            _ => write!(f, "{}", self.verb()),
        }
    }
}

/// The server's one-line answer to every command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Error(String),
}

impl Reply {
    /// Anything other than a well-formed reply counts as an error.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line == "ok" {
            return Self::Ok;
        }
        match line.strip_prefix("error:") {
            Some(message) => Self::Error(message.trim().to_string()),
            None => Self::Error(format!("unexpected reply {line:?}")),
        }
    }
}

impl From<&Result<Command, CommandError>> for Reply {
    fn from(parsed: &Result<Command, CommandError>) -> Self {
        match parsed {
            Ok(_) => Self::Ok,
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Error(message) => write!(f, "error: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cases = vec![
            ("spin", Command::Spin),
            ("  SPIN  ", Command::Spin),
            ("show", Command::Show),
            ("clear-storage", Command::ClearStorage),
            ("add CAR AIR PURIFIER", Command::Add(Label::from("CAR AIR PURIFIER"))),
            ("add   Mug  ", Command::Add(Label::from("Mug"))),
            ("remove 3", Command::Remove(3)),
            ("answer Jakarta", Command::Answer("Jakarta".to_string())),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<Command>(), Ok(expected), "line {line:?}");
        }
    }

    #[test]
    fn test_parse_errors() {
        let cases = vec![
            ("jump", CommandError::Unknown("jump".to_string())),
            ("", CommandError::Unknown(String::new())),
            ("add", CommandError::MissingArgument(Verb::Add)),
            ("remove two", CommandError::InvalidIndex("two".to_string())),
            ("remove -1", CommandError::InvalidIndex("-1".to_string())),
            ("spin now", CommandError::UnexpectedArgument(Verb::Spin)),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<Command>(), Err(expected), "line {line:?}");
        }
    }

    #[test]
    fn test_display_is_parseable() {
        let commands = vec![
            Command::ClearStorage,
            Command::Add(Label::from("HELM GRIN")),
            Command::Remove(0),
        ];
        for command in commands {
            assert_eq!(command.to_string().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn test_rejected_command_reply_reaches_client() {
        let cases = vec![
            ("spin", Reply::Ok),
            ("jump", Reply::Error("unknown command: jump".to_string())),
            ("add", Reply::Error("`add` needs an argument".to_string())),
        ];

        for (line, expected) in cases {
            let reply = Reply::from(&line.parse::<Command>());
            assert_eq!(Reply::parse(&reply.to_string()), expected, "line {line:?}");
        }
    }

    #[test]
    fn test_garbled_reply_is_an_error() {
        let cases = vec!["", "okay", "fine"];
        for line in cases {
            assert!(matches!(Reply::parse(line), Reply::Error(_)), "line {line:?}");
        }
    }
}
