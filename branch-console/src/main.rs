//! Branch Console - terminal client for the branch API
//!
//! Run: cargo run -p branch-console
//!
//! `BRANCH_API_URL` 指定服务端地址 (默认 `http://localhost:5000`)。

mod app;
mod ui;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use branch_client::view::{Effect, ManagementEvent};
use branch_client::{BranchApi, ClientConfig, EffectRunner, NetworkHttpClient};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use app::App;

type Runner = Arc<EffectRunner<NetworkHttpClient>>;
type ResultSender = mpsc::UnboundedSender<(u64, ManagementEvent)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize TUI Logger with Tracing
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,hyper=warn"));

    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(env_filter)
        .init();

    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    let config = ClientConfig::from_env();
    let http = config
        .build_http_client()
        .context("Failed to build HTTP client")?;
    let runner: Runner = Arc::new(EffectRunner::new(BranchApi::new(http)));
    tracing::info!(base_url = %config.base_url, "Branch console started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::default();
    let res = run_app(&mut terminal, &mut app, runner).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    runner: Runner,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    loop {
        for effect in app.take_effects() {
            spawn_effect(&runner, &tx, app.session, effect);
        }

        terminal.draw(|f| ui::draw(f, app))?;
        if app.should_quit {
            return Ok(());
        }

        while let Ok((session, event)) = rx.try_recv() {
            app.apply_result(session, event);
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    app.handle_key(key);
                }
            }
        }
    }
}

/// Run one effect in the background; the outcome comes back tagged with its session
fn spawn_effect(runner: &Runner, tx: &ResultSender, session: u64, effect: Effect) {
    let runner = runner.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let event = runner.run(effect).await;
        if tx.send((session, event)).is_err() {
            tracing::debug!("Console closed before effect finished");
        }
    });
}
