//! Agent transport trait and reply types

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Speaker role carried by agent replies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// Returned by a successful `initialize`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Descriptor of the agent we are talking to
    pub agent_card: String,
}

/// Complete one-shot reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReply {
    pub role: Role,
    pub content: String,
    pub message_id: String,
}

/// One snapshot of a streaming reply.
///
/// `content` always holds the full text produced so far. Consumers replace
/// what they show with it rather than appending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyChunk {
    pub role: Role,
    pub content: String,
    pub message_id: String,
    pub is_complete: bool,
}

/// Lazy, finite sequence of reply snapshots
pub type ReplyStream = Pin<Box<dyn Stream<Item = Result<ReplyChunk>> + Send>>;

/// Connection to a (possibly simulated) remote agent
#[async_trait]
pub trait AgentTransport: Send + Sync {
    /// Establish the connection and describe the agent
    async fn initialize(&self) -> Result<Connection>;

    /// Send a message and wait for the whole reply
    async fn send_message(&self, text: &str) -> Result<AgentReply>;

    /// Send a message and receive the reply as progressively longer snapshots.
    ///
    /// The returned stream is not restartable; call again for a new request.
    fn send_message_streaming(&self, text: &str) -> ReplyStream;

    /// Whether `initialize` has completed successfully
    fn is_connected(&self) -> bool;
}
