use crate::commands::executable::Executable;
use crate::commands::CommandError;
use crate::store::ConcurrentStore;

/// Opens a new transaction on top of the active one. Transactions nest without limit.
#[derive(Debug, PartialEq)]
pub struct Begin;

impl Executable for Begin {
    async fn exec<S: ConcurrentStore>(self, store: &S) -> Result<Option<String>, CommandError> {
        store.begin().await?;
        Ok(None)
    }
}
