pub mod codec;
pub mod commands;
pub mod config;
pub mod input;
pub mod session;
pub mod store;
pub mod terminal;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
