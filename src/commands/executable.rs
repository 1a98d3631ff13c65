use std::future::Future;

use crate::commands::CommandError;
use crate::store::ConcurrentStore;

pub trait Executable {
    /// Runs the command against `store`, returning the response text, if the command has one.
    fn exec<S: ConcurrentStore>(
        self,
        store: &S,
    ) -> impl Future<Output = Result<Option<String>, CommandError>> + Send;
}
