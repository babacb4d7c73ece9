//! In-process mock of a remote A2A agent.
//!
//! Replies are canned text produced after simulated network delays. Nothing
//! leaves the process.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_stream::try_stream;
use async_trait::async_trait;
use rand::RngExt;
use tokio::time::{Duration, sleep};

use crate::error::{AgentError, Result};
use crate::transport::{AgentReply, AgentTransport, Connection, ReplyChunk, ReplyStream, Role};

pub const DEFAULT_AGENT_CARD: &str = "Public Agent Card";

const CANNED_RESPONSES: [&str; 5] = [
    "I'd be happy to help you with that request. Let me process the information.",
    "Based on your query, here are some suggestions I can provide.",
    "I understand you're looking for assistance. Let me work on that for you.",
    "That's an interesting question. Here's what I can tell you about it.",
    "I'll help you find the best solution for your needs.",
];

/// Half-open range of milliseconds, `[min_ms, max_ms)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Pick a delay uniformly from the range. A degenerate range yields `min_ms`.
    pub fn sample(&self) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..self.max_ms))
    }
}

/// Simulated latencies of the mock agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockTiming {
    pub init_delay: Duration,
    pub reply_delay: DelayRange,
    pub chunk_delay: DelayRange,
}

impl Default for MockTiming {
    fn default() -> Self {
        Self {
            init_delay: Duration::from_millis(1000),
            reply_delay: DelayRange::new(500, 1500),
            chunk_delay: DelayRange::new(50, 150),
        }
    }
}

impl MockTiming {
    /// No delays at all.
    pub fn instant() -> Self {
        Self {
            init_delay: Duration::ZERO,
            reply_delay: DelayRange::zero(),
            chunk_delay: DelayRange::zero(),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct FailurePlan {
    initialize: Option<String>,
    send: Option<String>,
    stream_after: Option<(usize, String)>,
}

/// Mock agent client with canned replies and randomized delays.
#[derive(Debug, Clone)]
pub struct MockAgentClient {
    agent_card: String,
    timing: MockTiming,
    connected: Arc<AtomicBool>,
    failures: FailurePlan,
}

impl Default for MockAgentClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAgentClient {
    pub fn new() -> Self {
        Self {
            agent_card: DEFAULT_AGENT_CARD.to_string(),
            timing: MockTiming::default(),
            connected: Arc::new(AtomicBool::new(false)),
            failures: FailurePlan::default(),
        }
    }

    pub fn with_timing(mut self, timing: MockTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_agent_card(mut self, agent_card: impl Into<String>) -> Self {
        self.agent_card = agent_card.into();
        self
    }

    /// Make `initialize` fail with the given reason.
    pub fn fail_initialize(mut self, reason: impl Into<String>) -> Self {
        self.failures.initialize = Some(reason.into());
        self
    }

    /// Make the one-shot `send_message` fail with the given reason.
    pub fn fail_send(mut self, reason: impl Into<String>) -> Self {
        self.failures.send = Some(reason.into());
        self
    }

    /// Make every streaming reply fail after `chunks` snapshots were delivered.
    pub fn fail_stream_after(mut self, chunks: usize, reason: impl Into<String>) -> Self {
        self.failures.stream_after = Some((chunks, reason.into()));
        self
    }
}

/// Text the streaming reply converges to for `text`.
pub fn streaming_reply_text(text: &str) -> String {
    format!(
        "I understand you're asking about: \"{text}\". Let me provide you with a comprehensive response that addresses your query in detail."
    )
}

fn new_message_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
}

#[async_trait]
impl AgentTransport for MockAgentClient {
    async fn initialize(&self) -> Result<Connection> {
        tracing::debug!(
            delay_ms = self.timing.init_delay.as_millis() as u64,
            "Simulating agent handshake"
        );
        pause(self.timing.init_delay).await;

        if let Some(reason) = &self.failures.initialize {
            return Err(AgentError::Connection(reason.clone()));
        }

        self.connected.store(true, Ordering::SeqCst);
        tracing::info!(agent_card = %self.agent_card, "Mock agent connected");
        Ok(Connection {
            agent_card: self.agent_card.clone(),
        })
    }

    async fn send_message(&self, text: &str) -> Result<AgentReply> {
        let delay = self.timing.reply_delay.sample();
        tracing::debug!(delay_ms = delay.as_millis() as u64, "Simulating one-shot reply");
        pause(delay).await;

        if let Some(reason) = &self.failures.send {
            return Err(AgentError::Transport(reason.clone()));
        }

        let canned = CANNED_RESPONSES[rand::rng().random_range(0..CANNED_RESPONSES.len())];
        Ok(AgentReply {
            role: Role::Assistant,
            content: format!("{canned} (Response to: \"{text}\")"),
            message_id: new_message_id(),
        })
    }

    fn send_message_streaming(&self, text: &str) -> ReplyStream {
        let full_response = streaming_reply_text(text);
        let chunk_delay = self.timing.chunk_delay;
        let failure = self.failures.stream_after.clone();

        Box::pin(try_stream! {
            let words: Vec<&str> = full_response.split(' ').collect();
            let total = words.len();

            for index in 0..total {
                if let Some((after, reason)) = &failure
                    && index == *after
                {
                    Err::<(), _>(AgentError::Transport(reason.clone()))?;
                }

                pause(chunk_delay.sample()).await;
                tracing::trace!(chunk = index + 1, total, "Yielding reply snapshot");

                yield ReplyChunk {
                    role: Role::Assistant,
                    content: words[..=index].join(" "),
                    message_id: new_message_id(),
                    is_complete: index + 1 == total,
                };
            }
        })
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use futures::{StreamExt, TryStreamExt};

    use super::*;

    fn instant_client() -> MockAgentClient {
        MockAgentClient::new().with_timing(MockTiming::instant())
    }

    #[tokio::test]
    async fn initialize_marks_client_connected() {
        let client = instant_client();
        assert!(!client.is_connected());

        let connection = client.initialize().await.expect("initialize should succeed");

        assert_eq!(connection.agent_card, DEFAULT_AGENT_CARD);
        assert!(client.is_connected());
    }

    #[tokio::test]
    async fn initialize_reports_custom_agent_card() {
        let client = instant_client().with_agent_card("Travel Booking Agent");
        let connection = client.initialize().await.expect("initialize should succeed");
        assert_eq!(connection.agent_card, "Travel Booking Agent");
    }

    #[tokio::test]
    async fn scripted_initialize_failure_stays_disconnected() {
        let client = instant_client().fail_initialize("agent unreachable");

        let err = client.initialize().await.expect_err("initialize should fail");

        assert_eq!(err, AgentError::Connection("agent unreachable".to_string()));
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn send_message_echoes_input_after_canned_sentence() {
        let client = instant_client();

        let reply = client.send_message("Book a flight").await.expect("reply");

        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.ends_with(" (Response to: \"Book a flight\")"));
        assert!(
            CANNED_RESPONSES
                .iter()
                .any(|canned| reply.content.starts_with(canned))
        );
        assert!(!reply.message_id.is_empty());
    }

    #[tokio::test]
    async fn send_message_failure_is_transport_error() {
        let client = instant_client().fail_send("gateway timeout");
        let err = client.send_message("hi").await.expect_err("send should fail");
        assert_eq!(err.to_string(), "gateway timeout");
    }

    #[tokio::test]
    async fn streaming_yields_growing_prefixes_of_echo_sentence() {
        let client = instant_client();
        let full = streaming_reply_text("Hello");
        let words: Vec<&str> = full.split(' ').collect();

        let chunks = client
            .send_message_streaming("Hello")
            .try_collect::<Vec<_>>()
            .await
            .expect("stream should succeed");

        assert_eq!(chunks.len(), words.len());
        for (index, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.content, words[..=index].join(" "));
            assert_eq!(chunk.role, Role::Assistant);
        }
        assert_eq!(chunks.last().map(|c| c.content.as_str()), Some(full.as_str()));
    }

    #[tokio::test]
    async fn streaming_marks_only_last_chunk_complete() {
        let client = instant_client();

        let chunks = client
            .send_message_streaming("Where can I stay in Lisbon?")
            .try_collect::<Vec<_>>()
            .await
            .expect("stream should succeed");

        let complete: Vec<usize> = chunks
            .iter()
            .enumerate()
            .filter(|(_, chunk)| chunk.is_complete)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(complete, vec![chunks.len() - 1]);

        for pair in chunks.windows(2) {
            assert!(pair[0].content.len() < pair[1].content.len());
        }
    }

    #[tokio::test]
    async fn streaming_generates_fresh_id_per_event() {
        let client = instant_client();

        let chunks = client
            .send_message_streaming("ids")
            .try_collect::<Vec<_>>()
            .await
            .expect("stream should succeed");

        let ids: HashSet<&str> = chunks.iter().map(|c| c.message_id.as_str()).collect();
        assert_eq!(ids.len(), chunks.len());
    }

    #[tokio::test]
    async fn streaming_failure_surfaces_after_delivered_chunks() {
        let client = instant_client().fail_stream_after(3, "connection reset");

        let results: Vec<_> = client.send_message_streaming("hi").collect().await;

        assert_eq!(results.len(), 4);
        assert!(results[..3].iter().all(|r| r.is_ok()));
        assert_eq!(
            results[3].as_ref().expect_err("fourth item should be the error"),
            &AgentError::Transport("connection reset".to_string())
        );
    }

    #[test]
    fn delay_range_stays_within_bounds() {
        let range = DelayRange::new(50, 150);
        for _ in 0..100 {
            let delay = range.sample();
            assert!(delay >= Duration::from_millis(50));
            assert!(delay < Duration::from_millis(150));
        }
        assert_eq!(DelayRange::new(30, 30).sample(), Duration::from_millis(30));
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).expect("serialize");
        assert_eq!(json, "\"assistant\"");
    }
}
