//! JSON-lines host loop.
//!
//! Each input line is one action message. Each message gets exactly one reply
//! line, written in input order:
//!
//! ```text
//! {"ok": <result>}
//! {"error": {"kind": "misuse", "message": "..."}}
//! ```
//!
//! Blank lines are skipped. The loop ends when the reader is exhausted.

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

use crate::dispatch::ActionRegistry;
use crate::errors::ActionError;
use crate::PluginError;

/// One reply line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reply {
    Ok(Value),
    Error(ReplyError),
}

#[derive(Debug, Serialize)]
pub struct ReplyError {
    pub kind: String,
    pub message: String,
}

impl From<Result<Value, ActionError>> for Reply {
    fn from(result: Result<Value, ActionError>) -> Self {
        match result {
            Ok(value) => Reply::Ok(value),
            Err(e) => Reply::Error(ReplyError {
                kind: e.kind().to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// Counters for one run of the host loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeSummary {
    pub handled: usize,
    pub failed: usize,
}

/// Serve action messages from `reader` until it is exhausted.
///
/// Actions run one at a time, so replies come back in input order.
pub async fn serve_lines<R, W>(
    registry: &ActionRegistry,
    reader: R,
    mut writer: W,
) -> Result<ServeSummary, PluginError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = LinesStream::new(reader.lines());
    let mut summary = ServeSummary::default();

    while let Some(line) = lines.next().await {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let result = match serde_json::from_str::<Value>(line) {
            Ok(message) => registry.act(message).await,
            Err(e) => {
                warn!(error = %e, "Discarding malformed message");
                Err(ActionError::invalid_message(e.to_string()))
            }
        };

        summary.handled += 1;
        if result.is_err() {
            summary.failed += 1;
        }

        write_reply(&mut writer, &Reply::from(result)).await?;
    }

    writer.flush().await?;

    info!(
        handled = summary.handled,
        failed = summary.failed,
        "Input exhausted, host loop finished"
    );

    Ok(summary)
}

async fn write_reply<W>(writer: &mut W, reply: &Reply) -> Result<(), PluginError>
where
    W: AsyncWrite + Unpin,
{
    let mut encoded = serde_json::to_vec(reply)?;
    encoded.push(b'\n');

    writer.write_all(&encoded).await?;
    writer.flush().await?;

    debug!(bytes = encoded.len(), "Reply written");
    Ok(())
}
