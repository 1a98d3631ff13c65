use crate::commands::executable::Executable;
use crate::commands::CommandError;
use crate::store::ConcurrentStore;

/// Discards the active transaction and everything written in it.
#[derive(Debug, PartialEq)]
pub struct Rollback;

impl Executable for Rollback {
    async fn exec<S: ConcurrentStore>(self, store: &S) -> Result<Option<String>, CommandError> {
        store.rollback().await?;
        Ok(None)
    }
}
