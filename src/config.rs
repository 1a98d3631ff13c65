use clap::builder::RangedU64ValueParser;
use clap::Parser;

use crate::store::Strategy;

const MAX_LINE_LENGTH: usize = 4096;
const CHANNEL_CAPACITY: usize = 1024;
const HISTORY_LIMIT: usize = 1000;

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// How concurrent access to the store is serialized
    #[arg(short, long, value_enum, env = "NESTKV_STRATEGY", default_value_t = Strategy::Mutex)]
    pub strategy: Strategy,

    /// Longest input line accepted, in bytes
    #[arg(
        long,
        env = "NESTKV_MAX_LINE_LENGTH",
        default_value_t = MAX_LINE_LENGTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_line_length: usize,

    /// Number of requests the sequencer queues before callers have to wait
    #[arg(
        long,
        env = "NESTKV_CHANNEL_CAPACITY",
        default_value_t = CHANNEL_CAPACITY,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub channel_capacity: usize,

    /// Number of history entries kept per session, 0 to keep none
    #[arg(long, env = "NESTKV_HISTORY_LIMIT", default_value_t = HISTORY_LIMIT)]
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::Mutex,
            max_line_length: MAX_LINE_LENGTH,
            channel_capacity: CHANNEL_CAPACITY,
            history_limit: HISTORY_LIMIT,
        }
    }
}
