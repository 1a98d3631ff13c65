use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::FramedRead;
use tracing::{debug, info, warn};

use crate::codec::{InputCodec, InputLine};
use crate::config::Config;
use crate::session::Session;
use crate::store::{MemoryStore, SerializedStore};
use crate::Result;

/// Runs an interactive session on stdin and stdout until stdin is closed. Logs go to stderr.
pub async fn run(config: Config) -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| debug!("Failed to initialize global tracing: {}", e));

    serve(config, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Reads commands from `reader`, one per line, and writes each response on its own line to
/// `writer`. Lines longer than `max_line_length` are skipped without a response. Returns once
/// `reader` reaches end of input.
pub async fn serve<R, W>(config: Config, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let store = SerializedStore::new(config.strategy, MemoryStore::new(), config.channel_capacity);
    let mut session = Session::with_history_limit(store, config.history_limit);
    info!(
        session_id = %session.id,
        strategy = %config.strategy,
        "Session started"
    );

    let codec = InputCodec::new(config.max_line_length);
    let mut lines = FramedRead::new(reader, codec);

    while let Some(line) = lines.next().await {
        let line = match line? {
            InputLine::Line(line) => line,
            InputLine::TooLong => {
                warn!(
                    max_line_length = config.max_line_length,
                    "Discarded input line over the length limit"
                );
                continue;
            }
        };

        if let Some(output) = session.submit(&line).await {
            writer.write_all(output.text.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    debug!("Session history:\n{}", session.render_history());
    info!("Input closed");
    Ok(())
}
