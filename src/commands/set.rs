use crate::commands::executable::Executable;
use crate::commands::{CommandError, CommandParser};
use crate::store::ConcurrentStore;

#[derive(Debug, PartialEq)]
pub struct Set {
    pub key: String,
    pub value: String,
}

impl Executable for Set {
    async fn exec<S: ConcurrentStore>(self, store: &S) -> Result<Option<String>, CommandError> {
        store.set(&self.key, &self.value).await?;
        Ok(None)
    }
}

impl TryFrom<&mut CommandParser> for Set {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let value = parser.next_string()?;

        Ok(Self { key, value })
    }
}
