use crate::commands::executable::Executable;
use crate::commands::{CommandError, CommandParser};
use crate::store::ConcurrentStore;

/// Get the value of `key` in the active transaction. Fails with `key not set` if the key has no
/// value there.
#[derive(Debug, PartialEq)]
pub struct Get {
    pub key: String,
}

impl Executable for Get {
    async fn exec<S: ConcurrentStore>(self, store: &S) -> Result<Option<String>, CommandError> {
        match store.get(&self.key).await? {
            Some(value) => Ok(Some(value)),
            None => Err(CommandError::KeyNotSet),
        }
    }
}

impl TryFrom<&mut CommandParser> for Get {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}
