//! Call center console entry point.

use callcenter_tui::api_client::{RestClient, SharedApi};
use callcenter_tui::config::{route_from_args, TuiConfig};
use callcenter_tui::dispatch::{self, Command};
use callcenter_tui::error::TuiError;
use callcenter_tui::events::TuiEvent;
use callcenter_tui::logging;
use callcenter_tui::persistence::{self, PersistedState};
use callcenter_tui::state::App;
use callcenter_tui::views::render_view;
use crossterm::{
    event::{self, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    logging::init(&config.log_path)?;
    let api: SharedApi = Arc::new(RestClient::new(&config)?);

    let stored = match persistence::load(&config.persistence_path) {
        Ok(stored) => stored,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable UI state");
            None
        }
    };
    let requested = route_from_args();
    let route = persistence::initial_route(requested.as_deref(), stored.as_ref());

    let mut app = App::new(config);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let commands = app.activate(route);
    run_commands(&api, &app, commands, &event_tx);

    let tick_rate = Duration::from_millis(app.config.tick_interval_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    while !app.should_quit {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                let commands = handle_event(&mut app, TuiEvent::Tick);
                run_commands(&api, &app, commands, &event_tx);
            }
            Some(event) = event_rx.recv() => {
                let commands = handle_event(&mut app, event);
                run_commands(&api, &app, commands, &event_tx);
            }
        }
    }

    if let Err(err) = persistence::save(
        &app.config.persistence_path,
        &PersistedState::new(app.route),
    ) {
        tracing::warn!(error = %err, "failed to persist UI state");
    }
    tracing::info!("console exiting");

    Ok(())
}

fn handle_event(app: &mut App, event: TuiEvent) -> Vec<Command> {
    match event {
        TuiEvent::Input(key) => app.handle_key(key),
        TuiEvent::Api { ticket, event } => {
            app.apply_api_event(ticket, event);
            Vec::new()
        }
        TuiEvent::Tick => {
            app.on_tick();
            Vec::new()
        }
        TuiEvent::Resize { width, height } => {
            tracing::debug!(width, height, "terminal resized");
            Vec::new()
        }
    }
}

fn run_commands(
    api: &SharedApi,
    app: &App,
    commands: Vec<Command>,
    sender: &mpsc::Sender<TuiEvent>,
) {
    for command in commands {
        dispatch::spawn(Arc::clone(api), app.ticket, command, sender.clone());
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let event = match evt {
                    // Windows reports both press and release.
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        TuiEvent::Input(key)
                    }
                    CrosstermEvent::Resize(width, height) => TuiEvent::Resize { width, height },
                    _ => continue,
                };
                if sender.blocking_send(event).is_err() {
                    break;
                }
            }
        }
    });
}
