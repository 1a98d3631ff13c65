use crate::commands::executable::Executable;
use crate::commands::{CommandError, CommandParser};
use crate::store::ConcurrentStore;

/// Removes `key` from the active transaction and responds with the value it held.
#[derive(Debug, PartialEq)]
pub struct Delete {
    pub key: String,
}

impl Executable for Delete {
    async fn exec<S: ConcurrentStore>(self, store: &S) -> Result<Option<String>, CommandError> {
        let removed = store.delete(&self.key).await?;
        removed.map(Some).ok_or(CommandError::KeyNotSet)
    }
}

impl TryFrom<&mut CommandParser> for Delete {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}
