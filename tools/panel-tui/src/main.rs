//! panel-tui: terminal control panel for a development host.
//!
//! Mirrors the service status, disk usage and git projects pushed by the
//! host's backend, and sends administrative actions back over the same
//! Socket.IO channel.
//!
//! ## Usage
//!
//! ```bash
//! # Connect to localhost (default)
//! panel-tui
//!
//! # Connect to another host
//! panel-tui --backend-url http://192.168.1.20:8000
//! ```

mod app;
mod transport;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use panel_core::{OutboundEvent, PanelConfigBuilder, DEFAULT_BACKEND_URL, DEFAULT_LOG_CAPACITY};
use panel_telemetry::{init_telemetry, TelemetryConfig};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;

use app::App;
use transport::{ChannelSink, SocketClient, TransportEvent};

/// Outbound actions waiting for the transport.
const ACTION_QUEUE: usize = 32;

/// Dev-host control panel
#[derive(Parser, Debug)]
#[command(name = "panel-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backend base URL
    #[arg(long, default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    /// Log entries kept before the oldest are dropped
    #[arg(long, default_value_t = DEFAULT_LOG_CAPACITY)]
    log_capacity: usize,

    /// Diagnostic log file (overrides PANEL_LOG_FILE, default panel-tui.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = PanelConfigBuilder::new()
        .backend_url(args.backend_url)
        .log_capacity(args.log_capacity)
        .build()
        .context("Invalid configuration")?;

    let mut telemetry = TelemetryConfig::from_env();
    if let Some(path) = args.log_file {
        telemetry = telemetry.with_log_file(path);
    }
    let handle = init_telemetry(telemetry).context("Failed to initialize logging")?;
    info!(
        backend = %config.backend_url,
        log_file = %handle.log_file.display(),
        json = handle.json_logs,
        "Starting"
    );

    // Setup terminal with panic hook for cleanup
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, event_rx) = mpsc::channel(100);
    let (action_tx, action_rx) = mpsc::channel::<OutboundEvent>(ACTION_QUEUE);

    let mut app = App::new(&config, ChannelSink::new(action_tx));

    let mut client = SocketClient::new(config.socket_url(), event_tx);
    client.start(action_rx);

    let result = run_app(&mut terminal, &mut app, event_rx).await;

    client.stop().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
    }
    info!("Stopped");

    Ok(())
}

/// Main application loop.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut event_rx: mpsc::Receiver<TransportEvent>,
) -> Result<()> {
    let poll_timeout = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Drain transport events (non-blocking)
        while let Ok(event) = event_rx.try_recv() {
            app.handle_transport_event(event);
        }

        handle_terminal_events(app, poll_timeout)?;

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Handle terminal key events.
fn handle_terminal_events(app: &mut App, poll_timeout: Duration) -> Result<()> {
    if !event::poll(poll_timeout)? {
        return Ok(());
    }

    let Event::Key(key) = event::read()? else {
        return Ok(());
    };

    if key.kind == KeyEventKind::Press {
        app.on_key(key.code);
    }

    Ok(())
}
