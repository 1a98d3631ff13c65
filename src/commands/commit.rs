use crate::commands::executable::Executable;
use crate::commands::CommandError;
use crate::store::ConcurrentStore;

/// Folds the active transaction into the one below it.
#[derive(Debug, PartialEq)]
pub struct Commit;

impl Executable for Commit {
    async fn exec<S: ConcurrentStore>(self, store: &S) -> Result<Option<String>, CommandError> {
        store.commit().await?;
        Ok(None)
    }
}
