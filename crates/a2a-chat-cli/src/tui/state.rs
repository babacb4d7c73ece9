//! Chat view state

use crate::tui::message::{Message, MessageId};
use crate::tui::stream::{ReplyMode, ViewEvent, spawn_connect, spawn_reply};
use a2a_chat_agent::AgentTransport;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Error => "Connection Error",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }
}

pub struct ChatView {
    pub status: ConnectionStatus,
    pub messages: Vec<Message>,
    pub input: String,
    pub cursor_position: usize,
    /// A submission is in flight
    pub is_loading: bool,
    /// Placeholder currently receiving chunks
    pub streaming_message_id: Option<MessageId>,
    pub reply_mode: ReplyMode,
    transport: Arc<dyn AgentTransport>,
    event_tx: mpsc::UnboundedSender<ViewEvent>,
    event_rx: mpsc::UnboundedReceiver<ViewEvent>,
}

impl ChatView {
    pub fn new(transport: Arc<dyn AgentTransport>, stream_replies: bool) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            status: ConnectionStatus::Disconnected,
            messages: Vec::new(),
            input: String::new(),
            cursor_position: 0,
            is_loading: false,
            streaming_message_id: None,
            reply_mode: if stream_replies {
                ReplyMode::Streaming
            } else {
                ReplyMode::OneShot
            },
            transport,
            event_tx,
            event_rx,
        }
    }

    /// Start connecting to the agent. Runs once per view; there is no retry.
    pub fn mount(&mut self) {
        if self.status != ConnectionStatus::Disconnected {
            return;
        }

        self.status = ConnectionStatus::Connecting;
        tracing::info!("Connecting to agent");
        spawn_connect(self.transport.clone(), self.event_tx.clone());
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    /// Input accepts edits only while connected and idle
    pub fn input_enabled(&self) -> bool {
        self.is_connected() && !self.is_loading
    }

    pub fn can_submit(&self) -> bool {
        self.input_enabled() && !self.input.trim().is_empty()
    }

    /// Send the current input. Returns false, touching nothing, when
    /// submission is not allowed right now.
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }

        let text = self.input.trim().to_string();
        self.messages.push(Message::user(text.clone()));
        self.input.clear();
        self.cursor_position = 0;
        self.is_loading = true;

        let placeholder = Message::assistant_placeholder();
        let target = placeholder.id.clone();
        self.streaming_message_id = Some(target.clone());
        self.messages.push(placeholder);

        tracing::debug!(message_id = %target, mode = ?self.reply_mode, "Submitting message");
        spawn_reply(
            self.transport.clone(),
            text,
            target,
            self.reply_mode,
            self.event_tx.clone(),
        );
        true
    }

    /// Apply every event that has arrived since the last call
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Connected { agent_card } => {
                self.status = ConnectionStatus::Connected;
                self.messages.push(Message::system(format!(
                    "Connected to A2A Agent ({agent_card})"
                )));
            }
            ViewEvent::ConnectionFailed(error) => {
                self.status = ConnectionStatus::Error;
                self.messages
                    .push(Message::system_error(format!("Connection failed: {error}")));
            }
            ViewEvent::ReplyChunk {
                target,
                content,
                is_complete,
            } => {
                if let Some(message) = self.message_mut(&target) {
                    message.content = content;
                    message.is_streaming = !is_complete;
                }
            }
            ViewEvent::ReplyFinished { target } => {
                self.settle_reply(&target);
            }
            ViewEvent::ReplyFailed { target, error } => {
                self.messages
                    .push(Message::system_error(format!("Error: {error}")));
                self.settle_reply(&target);
            }
        }
    }

    fn settle_reply(&mut self, target: &MessageId) {
        if let Some(message) = self.message_mut(target) {
            message.is_streaming = false;
        }
        if self.streaming_message_id.as_ref() == Some(target) {
            self.streaming_message_id = None;
        }
        self.is_loading = false;
    }

    fn message_mut(&mut self, id: &MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|message| &message.id == id)
    }

    fn char_to_byte_idx(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.input.len())
    }

    pub fn enter_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_idx(self.cursor_position);
        self.input.insert(byte_idx, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_idx = self.char_to_byte_idx(self.cursor_position);
            self.input.remove(byte_idx);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            let byte_idx = self.char_to_byte_idx(self.cursor_position);
            self.input.remove(byte_idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let char_count = self.input.chars().count();
        if self.cursor_position < char_count {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.input.chars().count();
    }

    #[cfg(test)]
    pub(crate) async fn process_next_event(&mut self) {
        if let Some(event) = self.event_rx.recv().await {
            self.handle_event(event);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use a2a_chat_agent::{MockAgentClient, MockTiming, Role, streaming_reply_text};
    use std::time::Duration;

    pub(crate) fn instant_view(client: MockAgentClient, stream_replies: bool) -> ChatView {
        ChatView::new(
            Arc::new(client.with_timing(MockTiming::instant())),
            stream_replies,
        )
    }

    pub(crate) async fn settle(view: &mut ChatView) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while view.is_loading || view.status == ConnectionStatus::Connecting {
                view.process_next_event().await;
            }
        })
        .await
        .expect("view should settle");
    }

    pub(crate) async fn connected_view(stream_replies: bool) -> ChatView {
        let mut view = instant_view(MockAgentClient::new(), stream_replies);
        view.mount();
        settle(&mut view).await;
        view
    }

    fn type_text(view: &mut ChatView, text: &str) {
        for c in text.chars() {
            view.enter_char(c);
        }
    }

    #[tokio::test]
    async fn mount_success_announces_agent_card() {
        let view = connected_view(true).await;

        assert_eq!(view.status, ConnectionStatus::Connected);
        assert_eq!(view.messages.len(), 1);
        let message = &view.messages[0];
        assert_eq!(message.role, Role::System);
        assert_eq!(message.content, "Connected to A2A Agent (Public Agent Card)");
        assert!(!message.is_error);
    }

    #[tokio::test]
    async fn mount_failure_adds_error_notice() {
        let mut view = instant_view(MockAgentClient::new().fail_initialize("agent offline"), true);
        view.mount();
        settle(&mut view).await;

        assert_eq!(view.status, ConnectionStatus::Error);
        assert_eq!(view.messages.len(), 1);
        assert_eq!(view.messages[0].role, Role::System);
        assert_eq!(view.messages[0].content, "Connection failed: agent offline");
        assert!(view.messages[0].is_error);
        assert!(!view.input_enabled());
    }

    #[tokio::test]
    async fn mount_runs_only_once() {
        let mut view = connected_view(true).await;
        view.mount();
        view.poll_events();

        assert_eq!(view.status, ConnectionStatus::Connected);
        assert_eq!(view.messages.len(), 1);
    }

    #[tokio::test]
    async fn submit_while_connecting_is_noop() {
        let mut view = ChatView::new(Arc::new(MockAgentClient::new()), true);
        view.mount();
        view.input = "Hello".to_string();

        assert_eq!(view.status, ConnectionStatus::Connecting);
        assert!(!view.submit());
        assert!(view.messages.is_empty());
        assert_eq!(view.input, "Hello");
        assert!(!view.is_loading);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let mut view = connected_view(true).await;
        view.input = "   \t ".to_string();

        assert!(!view.submit());
        assert_eq!(view.messages.len(), 1);
        assert!(!view.is_loading);
        assert_eq!(view.input, "   \t ");
    }

    #[tokio::test]
    async fn submit_appends_user_message_and_placeholder() {
        let mut view = connected_view(true).await;
        type_text(&mut view, "  Hello  ");

        assert!(view.submit());

        assert_eq!(view.messages.len(), 3);
        assert_eq!(view.messages[1].role, Role::User);
        assert_eq!(view.messages[1].content, "Hello");
        let placeholder = &view.messages[2];
        assert_eq!(placeholder.role, Role::Assistant);
        assert!(placeholder.content.is_empty());
        assert!(placeholder.is_streaming);
        assert_eq!(view.streaming_message_id.as_ref(), Some(&placeholder.id));
        assert!(view.input.is_empty());
        assert_eq!(view.cursor_position, 0);
        assert!(view.is_loading);
        assert!(!view.input_enabled());
    }

    #[tokio::test]
    async fn streaming_replaces_placeholder_with_growing_prefixes() {
        let mut view = connected_view(true).await;
        view.input = "Hello".to_string();
        view.submit();

        let full = streaming_reply_text("Hello");
        let words: Vec<&str> = full.split(' ').collect();
        let mut snapshots = Vec::new();
        while view.is_loading {
            view.process_next_event().await;
            let content = view.messages[2].content.clone();
            if snapshots.last() != Some(&content) {
                snapshots.push(content);
            }
        }

        assert_eq!(snapshots.len(), words.len());
        for (index, snapshot) in snapshots.iter().enumerate() {
            assert_eq!(snapshot, &words[..=index].join(" "));
        }

        let reply = &view.messages[2];
        assert_eq!(reply.content, full);
        assert!(!reply.is_streaming);
        assert_eq!(view.messages.len(), 3);
        assert!(view.streaming_message_id.is_none());
        assert!(view.input_enabled());
    }

    #[tokio::test]
    async fn rapid_double_submit_creates_one_placeholder() {
        let mut view = connected_view(true).await;
        view.input = "first".to_string();
        assert!(view.submit());

        view.input = "second".to_string();
        assert!(!view.submit());
        assert_eq!(view.input, "second");

        settle(&mut view).await;

        let assistants = view
            .messages
            .iter()
            .filter(|message| message.role == Role::Assistant)
            .count();
        let users: Vec<&str> = view
            .messages
            .iter()
            .filter(|message| message.role == Role::User)
            .map(|message| message.content.as_str())
            .collect();
        assert_eq!(assistants, 1);
        assert_eq!(users, vec!["first"]);
    }

    #[tokio::test]
    async fn consecutive_submissions_each_settle() {
        let mut view = connected_view(true).await;

        for text in ["Find flights to Paris", "And a hotel"] {
            view.input = text.to_string();
            assert!(view.submit());
            settle(&mut view).await;
            assert!(!view.is_loading);
            assert!(view.streaming_message_id.is_none());
        }

        assert_eq!(view.messages.len(), 5);
        assert!(view.messages.iter().all(|message| !message.is_streaming));
        assert_eq!(
            view.messages[4].content,
            streaming_reply_text("And a hotel")
        );
    }

    #[tokio::test]
    async fn stream_failure_adds_error_and_releases_input() {
        let mut view = instant_view(
            MockAgentClient::new().fail_stream_after(2, "connection reset"),
            true,
        );
        view.mount();
        settle(&mut view).await;

        view.input = "Hello".to_string();
        view.submit();
        settle(&mut view).await;

        assert_eq!(view.messages.len(), 4);
        let placeholder = &view.messages[2];
        assert_eq!(placeholder.role, Role::Assistant);
        assert_eq!(placeholder.content, "I understand");
        assert!(!placeholder.is_streaming);

        let notice = &view.messages[3];
        assert_eq!(notice.role, Role::System);
        assert_eq!(notice.content, "Error: connection reset");
        assert!(notice.is_error);

        assert!(!view.is_loading);
        assert!(view.streaming_message_id.is_none());
        assert!(view.is_connected());
    }

    #[tokio::test]
    async fn one_shot_mode_fills_placeholder_once() {
        let mut view = connected_view(false).await;
        view.input = "Book a hotel".to_string();
        view.submit();
        settle(&mut view).await;

        assert_eq!(view.messages.len(), 3);
        let reply = &view.messages[2];
        assert!(reply.content.ends_with("(Response to: \"Book a hotel\")"));
        assert!(!reply.is_streaming);
        assert!(view.streaming_message_id.is_none());
    }

    #[tokio::test]
    async fn one_shot_failure_adds_error() {
        let mut view = instant_view(MockAgentClient::new().fail_send("gateway timeout"), false);
        view.mount();
        settle(&mut view).await;

        view.input = "hi".to_string();
        view.submit();
        settle(&mut view).await;

        assert_eq!(view.messages[3].content, "Error: gateway timeout");
        assert!(view.messages[3].is_error);
        assert!(!view.messages[2].is_streaming);
        assert!(!view.is_loading);
    }

    #[tokio::test]
    async fn message_ids_are_unique() {
        let mut view = connected_view(true).await;
        for text in ["one", "two", "three"] {
            view.input = text.to_string();
            view.submit();
            settle(&mut view).await;
        }

        let ids: std::collections::HashSet<_> =
            view.messages.iter().map(|message| message.id.clone()).collect();
        assert_eq!(ids.len(), view.messages.len());
    }

    #[test]
    fn cursor_editing_handles_multibyte_input() {
        let mut view = ChatView::new(Arc::new(MockAgentClient::new()), true);
        for c in "héllo".chars() {
            view.enter_char(c);
        }
        view.move_cursor_home();
        view.move_cursor_right();
        view.delete_char_forward();
        assert_eq!(view.input, "hllo");

        view.move_cursor_end();
        view.delete_char();
        assert_eq!(view.input, "hll");
        assert_eq!(view.cursor_position, 3);

        view.move_cursor_left();
        view.enter_char('é');
        assert_eq!(view.input, "hlél");
    }

    #[test]
    fn status_labels() {
        assert_eq!(ConnectionStatus::Connected.label(), "Connected");
        assert_eq!(ConnectionStatus::Connecting.label(), "Connecting...");
        assert_eq!(ConnectionStatus::Error.label(), "Connection Error");
        assert_eq!(ConnectionStatus::Disconnected.label(), "Disconnected");
    }
}
