mod keybindings;
mod message;
mod messages;
mod state;
mod stream;
mod theme;
mod ui;
mod welcome;

use crate::config::CliConfig;
use a2a_chat_agent::AgentTransport;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use state::ChatView;
use std::{
    io::{self, Stdout},
    sync::Arc,
    time::Duration,
};

type ChatTerminal = Terminal<CrosstermBackend<Stdout>>;

const TICK: Duration = Duration::from_millis(80);

/// Run the full-screen chat view until the user quits
pub async fn run(config: &CliConfig) -> Result<()> {
    let transport: Arc<dyn AgentTransport> = Arc::new(config.build_transport());
    let mut view = ChatView::new(transport, config.chat.stream_replies);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err.into());
    }

    let res = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(mut terminal) => {
            let res = run_app(&mut terminal, &mut view, &config.chat.title).await;
            let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
            let _ = terminal.show_cursor();
            res
        }
        Err(err) => {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            Err(err.into())
        }
    };

    disable_raw_mode()?;
    tracing::info!(messages = view.messages.len(), "Chat view closed");

    res
}

async fn run_app(terminal: &mut ChatTerminal, view: &mut ChatView, title: &str) -> Result<()> {
    view.mount();
    let mut frame = 0usize;

    loop {
        terminal.draw(|f| ui::draw(f, view, title, frame))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && keybindings::handle_key(view, key)
        {
            return Ok(());
        }

        // Let background tasks run between terminal polls
        tokio::task::yield_now().await;
        view.poll_events();
        frame = frame.wrapping_add(1);
    }
}
