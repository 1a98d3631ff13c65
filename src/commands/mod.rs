pub mod begin;
pub mod commit;
pub mod count;
pub mod delete;
pub mod executable;
pub mod get;
pub mod rollback;
pub mod set;

use std::vec;
use thiserror::Error as ThisError;

use crate::commands::executable::Executable;
use crate::input::InputString;
use crate::store::{ConcurrentStore, StoreError};

use begin::Begin;
use commit::Commit;
use count::Count;
use delete::Delete;
use get::Get;
use rollback::Rollback;
use set::Set;

/// A command word followed by at most two arguments.
const MAX_TOKENS: usize = 3;

#[derive(Debug, PartialEq)]
pub enum Command {
    Get(Get),
    Set(Set),
    Delete(Delete),
    Count(Count),
    Begin(Begin),
    Commit(Commit),
    Rollback(Rollback),
}

impl Executable for Command {
    async fn exec<S: ConcurrentStore>(self, store: &S) -> Result<Option<String>, CommandError> {
        match self {
            Command::Get(cmd) => cmd.exec(store).await,
            Command::Set(cmd) => cmd.exec(store).await,
            Command::Delete(cmd) => cmd.exec(store).await,
            Command::Count(cmd) => cmd.exec(store).await,
            Command::Begin(cmd) => cmd.exec(store).await,
            Command::Commit(cmd) => cmd.exec(store).await,
            Command::Rollback(cmd) => cmd.exec(store).await,
        }
    }
}

impl TryFrom<&InputString> for Command {
    type Error = CommandError;

    fn try_from(input: &InputString) -> Result<Self, Self::Error> {
        let parts: Vec<String> = input
            .as_str()
            .split(is_separator)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();

        if parts.len() > MAX_TOKENS {
            return Err(CommandError::UnknownCommand);
        }

        let mut parser = CommandParser {
            parts: parts.into_iter(),
        };

        let command = match parser.parse_command_token()? {
            CommandToken::Get => Get::try_from(&mut parser).map(Command::Get),
            CommandToken::Set => Set::try_from(&mut parser).map(Command::Set),
            CommandToken::Delete => Delete::try_from(&mut parser).map(Command::Delete),
            CommandToken::Count => Count::try_from(&mut parser).map(Command::Count),
            CommandToken::Begin => Ok(Command::Begin(Begin)),
            CommandToken::Commit => Ok(Command::Commit(Commit)),
            CommandToken::Rollback => Ok(Command::Rollback(Rollback)),
        }?;

        // Every command has a fixed arity; leftover arguments make the line invalid.
        parser.finish()?;

        Ok(command)
    }
}

/// Tokens are separated by runs of ASCII whitespace, vertical tab included. Other Unicode
/// whitespace, such as a non-breaking space, is part of the token.
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Parses and executes a single line of input.
pub async fn execute<S: ConcurrentStore>(
    store: &S,
    input: &InputString,
) -> Result<Option<String>, CommandError> {
    Command::try_from(input)?.exec(store).await
}

#[derive(Debug, PartialEq, strum_macros::EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
enum CommandToken {
    Get,
    Set,
    Delete,
    Count,
    Begin,
    Commit,
    Rollback,
}

pub struct CommandParser {
    parts: vec::IntoIter<String>,
}

impl CommandParser {
    fn parse_command_token(&mut self) -> Result<CommandToken, CommandError> {
        let word = self.next_string()?;
        word.parse().map_err(|_: strum::ParseError| CommandError::UnknownCommand)
    }

    fn next_string(&mut self) -> Result<String, CommandError> {
        self.parts.next().ok_or(CommandError::UnknownCommand)
    }

    fn finish(&mut self) -> Result<(), CommandError> {
        match self.parts.next() {
            None => Ok(()),
            Some(_) => Err(CommandError::UnknownCommand),
        }
    }
}

/// Errors surfaced to the user at the command boundary. The `Display` output of the first three
/// variants is the exact text shown to the user.
#[derive(Debug, ThisError)]
pub enum CommandError {
    #[error("unknown command")]
    UnknownCommand,
    #[error("key not set")]
    KeyNotSet,
    #[error("no transaction")]
    NoTransaction,
    #[error("internal store failure: {0}")]
    Store(StoreError),
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NoTransaction => CommandError::NoTransaction,
            err => CommandError::Store(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Command, CommandError> {
        Command::try_from(&InputString::new(text).unwrap())
    }

    #[test]
    fn parse_nullary_commands() {
        assert_eq!(parse("BEGIN").unwrap(), Command::Begin(Begin));
        assert_eq!(parse("commit").unwrap(), Command::Commit(Commit));
        assert_eq!(parse("RollBack").unwrap(), Command::Rollback(Rollback));
    }

    #[test]
    fn parse_unary_commands() {
        assert_eq!(
            parse("GET foo").unwrap(),
            Command::Get(Get {
                key: String::from("foo")
            })
        );
        assert_eq!(
            parse("delete Foo").unwrap(),
            Command::Delete(Delete {
                key: String::from("Foo")
            })
        );
        assert_eq!(
            parse("Count bar").unwrap(),
            Command::Count(Count {
                value: String::from("bar")
            })
        );
    }

    #[test]
    fn parse_set_command() {
        assert_eq!(
            parse("set foo BAR").unwrap(),
            Command::Set(Set {
                key: String::from("foo"),
                value: String::from("BAR")
            })
        );
    }

    #[test]
    fn whitespace_runs_separate_tokens() {
        assert_eq!(
            parse("SET \t foo    bar").unwrap(),
            Command::Set(Set {
                key: String::from("foo"),
                value: String::from("bar")
            })
        );
    }

    #[test]
    fn only_ascii_whitespace_separates_tokens() {
        assert_eq!(
            parse("SET a\u{a0}b c").unwrap(),
            Command::Set(Set {
                key: String::from("a\u{a0}b"),
                value: String::from("c")
            })
        );
        assert_eq!(
            parse("GET\x0Bfoo").unwrap(),
            Command::Get(Get {
                key: String::from("foo")
            })
        );
        assert!(matches!(
            parse("GET\u{2003}foo"),
            Err(CommandError::UnknownCommand)
        ));
    }

    #[test]
    fn unknown_command_word() {
        assert!(matches!(parse("FETCH foo"), Err(CommandError::UnknownCommand)));
        assert!(matches!(parse("foo"), Err(CommandError::UnknownCommand)));
    }

    #[test]
    fn wrong_arity() {
        for text in [
            "GET",
            "GET foo bar",
            "SET foo",
            "COUNT",
            "DELETE a b",
            "BEGIN now",
            "COMMIT a b",
            "ROLLBACK x",
        ] {
            assert!(
                matches!(parse(text), Err(CommandError::UnknownCommand)),
                "{text} should not parse"
            );
        }
    }

    #[test]
    fn too_many_tokens() {
        assert!(matches!(
            parse("SET foo bar baz"),
            Err(CommandError::UnknownCommand)
        ));
    }

    #[test]
    fn error_messages() {
        assert_eq!(CommandError::UnknownCommand.to_string(), "unknown command");
        assert_eq!(CommandError::KeyNotSet.to_string(), "key not set");
        assert_eq!(CommandError::NoTransaction.to_string(), "no transaction");
    }

    #[test]
    fn store_errors_convert() {
        assert!(matches!(
            CommandError::from(StoreError::NoTransaction),
            CommandError::NoTransaction
        ));
        assert!(matches!(
            CommandError::from(StoreError::Closed),
            CommandError::Store(StoreError::Closed)
        ));
    }
}
