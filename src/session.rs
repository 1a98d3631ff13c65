use itertools::Itertools;
use std::collections::VecDeque;
use std::fmt;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::commands::{self, CommandError};
use crate::input::InputString;
use crate::store::ConcurrentStore;

/// One entry of a session's history: either a line the user entered or a response to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryItem {
    Input(String),
    Output { text: String, is_error: bool },
}

impl fmt::Display for HistoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryItem::Input(text) => write!(f, "> {}", text),
            HistoryItem::Output { text, .. } => f.write_str(text),
        }
    }
}

/// A response to show the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub is_error: bool,
}

const HISTORY_LIMIT: usize = 1000;

/// An interactive session over a shared store. It turns raw lines into commands, records what
/// was entered and answered, and converts domain errors into the messages shown to the user.
///
/// Only the most recent entries are kept in the history; older ones are dropped first.
pub struct Session<S> {
    pub id: Uuid,
    store: S,
    history: VecDeque<HistoryItem>,
    history_limit: usize,
}

impl<S: ConcurrentStore> Session<S> {
    pub fn new(store: S) -> Session<S> {
        Self::with_history_limit(store, HISTORY_LIMIT)
    }

    /// A session keeping at most `history_limit` history entries. Zero disables the history.
    pub fn with_history_limit(store: S, history_limit: usize) -> Session<S> {
        Self {
            id: Uuid::new_v4(),
            store,
            history: VecDeque::with_capacity(history_limit.min(HISTORY_LIMIT)),
            history_limit,
        }
    }

    /// Runs one line of input. Blank lines are ignored and leave no trace in the history.
    ///
    /// Returns the response to show, if any. Internal failures are logged and produce no
    /// response.
    #[instrument(name = "session", skip(self, line), fields(session_id))]
    pub async fn submit(&mut self, line: &str) -> Option<Output> {
        tracing::Span::current().record("session_id", tracing::field::display(self.id));

        let input = InputString::new(line)?;
        info!("Received command: {}", input);
        self.record(HistoryItem::Input(input.to_string()));

        let output = match commands::execute(&self.store, &input).await {
            Ok(Some(text)) => Output {
                text,
                is_error: false,
            },
            Ok(None) => return None,
            Err(CommandError::Store(err)) => {
                error!("Failed to execute command: {}", err);
                return None;
            }
            Err(err) => {
                warn!("Command rejected: {}", err);
                Output {
                    text: err.to_string(),
                    is_error: true,
                }
            }
        };

        self.record(HistoryItem::Output {
            text: output.text.clone(),
            is_error: output.is_error,
        });

        Some(output)
    }

    fn record(&mut self, item: HistoryItem) {
        if self.history_limit == 0 {
            return;
        }
        if self.history.len() == self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(item);
    }

    pub fn history(&self) -> &VecDeque<HistoryItem> {
        &self.history
    }

    /// The history, one entry per line, inputs prefixed with `> `.
    pub fn render_history(&self) -> String {
        self.history.iter().join("\n")
    }
}
