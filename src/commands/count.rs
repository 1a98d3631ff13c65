use crate::commands::executable::Executable;
use crate::commands::{CommandError, CommandParser};
use crate::store::ConcurrentStore;

/// Responds with the number of keys in the active transaction that hold `value`, as a decimal
/// string. Values nobody holds count as `0`.
#[derive(Debug, PartialEq)]
pub struct Count {
    pub value: String,
}

impl Executable for Count {
    async fn exec<S: ConcurrentStore>(self, store: &S) -> Result<Option<String>, CommandError> {
        let count = store.count(&self.value).await?;
        Ok(Some(count.to_string()))
    }
}

impl TryFrom<&mut CommandParser> for Count {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let value = parser.next_string()?;
        Ok(Self { value })
    }
}
