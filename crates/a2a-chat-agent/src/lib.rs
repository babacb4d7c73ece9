//! A2A Chat agent transport
//!
//! This crate provides:
//! - The `AgentTransport` trait the chat view talks to
//! - Reply types for one-shot and streaming responses
//! - `MockAgentClient`, an in-process stand-in for a remote A2A agent

pub mod error;
pub mod mock;
pub mod transport;

// Re-export commonly used types
pub use error::{AgentError, Result};
pub use mock::{
    DEFAULT_AGENT_CARD, DelayRange, MockAgentClient, MockTiming, streaming_reply_text,
};
pub use transport::{AgentReply, AgentTransport, Connection, ReplyChunk, ReplyStream, Role};
