use std::sync::Arc;

use a2a_chat_agent::AgentTransport;
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::tui::message::MessageId;

/// Outcome of background transport work, applied by the view in arrival order.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    Connected {
        agent_card: String,
    },
    ConnectionFailed(String),
    /// Full reply text so far for the placeholder `target`
    ReplyChunk {
        target: MessageId,
        content: String,
        is_complete: bool,
    },
    ReplyFinished {
        target: MessageId,
    },
    ReplyFailed {
        target: MessageId,
        error: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMode {
    Streaming,
    OneShot,
}

pub fn spawn_connect(
    transport: Arc<dyn AgentTransport>,
    event_tx: mpsc::UnboundedSender<ViewEvent>,
) {
    tokio::spawn(async move {
        let event = match transport.initialize().await {
            Ok(connection) => ViewEvent::Connected {
                agent_card: connection.agent_card,
            },
            Err(err) => {
                tracing::warn!("Agent initialization failed: {err}");
                ViewEvent::ConnectionFailed(err.to_string())
            }
        };
        let _ = event_tx.send(event);
    });
}

/// Produce the reply for `text` into the placeholder `target`.
///
/// Always ends with exactly one `ReplyFinished` or `ReplyFailed`.
pub fn spawn_reply(
    transport: Arc<dyn AgentTransport>,
    text: String,
    target: MessageId,
    mode: ReplyMode,
    event_tx: mpsc::UnboundedSender<ViewEvent>,
) {
    tokio::spawn(async move {
        let result = match mode {
            ReplyMode::Streaming => {
                stream_reply(transport.as_ref(), &text, &target, &event_tx).await
            }
            ReplyMode::OneShot => {
                one_shot_reply(transport.as_ref(), &text, &target, &event_tx).await
            }
        };

        let event = match result {
            Ok(()) => ViewEvent::ReplyFinished { target },
            Err(err) => {
                tracing::warn!("Reply failed: {err}");
                ViewEvent::ReplyFailed {
                    target,
                    error: err.to_string(),
                }
            }
        };
        let _ = event_tx.send(event);
    });
}

async fn stream_reply(
    transport: &dyn AgentTransport,
    text: &str,
    target: &MessageId,
    event_tx: &mpsc::UnboundedSender<ViewEvent>,
) -> a2a_chat_agent::Result<()> {
    let mut stream = transport.send_message_streaming(text);
    let mut chunks = 0usize;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        chunks += 1;
        let _ = event_tx.send(ViewEvent::ReplyChunk {
            target: target.clone(),
            content: chunk.content,
            is_complete: chunk.is_complete,
        });
    }

    tracing::debug!(chunks, "Streaming reply finished");
    Ok(())
}

async fn one_shot_reply(
    transport: &dyn AgentTransport,
    text: &str,
    target: &MessageId,
    event_tx: &mpsc::UnboundedSender<ViewEvent>,
) -> a2a_chat_agent::Result<()> {
    let reply = transport.send_message(text).await?;
    tracing::debug!(message_id = %reply.message_id, "One-shot reply received");
    let _ = event_tx.send(ViewEvent::ReplyChunk {
        target: target.clone(),
        content: reply.content,
        is_complete: true,
    });
    Ok(())
}
