use clap::Parser;
use nestkv::config::Config;
use nestkv::{terminal, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::parse();

    terminal::run(config).await
}
