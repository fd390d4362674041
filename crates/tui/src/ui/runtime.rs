//! Runtime: terminal lifecycle and the single event loop.
//!
//! - A dedicated input thread blocks on `crossterm::event::read()` and
//!   forwards events over a channel.
//! - Address pipeline events arrive on their own unbounded channel.
//! - Remote calls run as spawned tasks collected in a `FuturesUnordered`;
//!   each completion is applied to `App` on this loop.
//!
//! Redraws happen only after something was handled.

use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::{StreamExt, stream::FuturesUnordered};
use groundwork_api::{GeocodingClient, ProspectClient};
use groundwork_engine::{AddressEvent, Geocoder, ProspectGateway};
use groundwork_util::SiteConfig;
use ratatui::{Terminal, prelude::*};
use tokio::{signal, sync::mpsc, task::JoinHandle};
use tracing::{info, warn};

use crate::app::{App, Outcome};
use crate::cmd;

type TerminalBackend = CrosstermBackend<std::io::Stdout>;

/// Forward terminal events from a blocking OS thread.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(256);
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to read terminal event");
                    break;
                }
            }
        }
    });
    receiver
}

fn setup_terminal() -> Result<Terminal<TerminalBackend>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut Terminal<TerminalBackend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<TerminalBackend>, app: &App) -> Result<()> {
    terminal.draw(|frame| crate::ui::draw(frame, app))?;
    Ok(())
}

fn is_interrupt(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(key) if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    )
}

/// Set up the terminal, run the loop until the user quits, and restore the
/// terminal even when the loop fails.
pub async fn run_app(config: SiteConfig) -> Result<()> {
    let prospects: Arc<dyn ProspectGateway> =
        Arc::new(ProspectClient::new(&config).context("building the prospect client")?);
    let geocoder: Arc<dyn Geocoder> = Arc::new(GeocodingClient::new(&config).context("building the geocoding client")?);
    info!(server = %config.server_url, locale = %config.locale, "starting terminal UI");

    let (address_sender, address_events) = mpsc::unbounded_channel();
    let mut app = App::new(config, geocoder, address_sender);

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &prospects, address_events).await;
    cleanup_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<TerminalBackend>,
    app: &mut App,
    prospects: &Arc<dyn ProspectGateway>,
    mut address_events: mpsc::UnboundedReceiver<AddressEvent>,
) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut pending: FuturesUnordered<JoinHandle<Outcome>> = FuturesUnordered::new();

    render(terminal, app)?;

    loop {
        let mut effects = Vec::new();
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                match maybe_event {
                    Some(event) if is_interrupt(&event) => break,
                    Some(event) => effects.extend(app.handle_event(event)),
                    None => break,
                }
            }

            Some(event) = address_events.recv() => {
                app.handle_address_event(event);
            }

            Some(joined) = pending.next(), if !pending.is_empty() => {
                match joined {
                    Ok(outcome) => effects.extend(app.apply_outcome(outcome)),
                    Err(error) => warn!(%error, "background task failed"),
                }
            }

            _ = signal::ctrl_c() => break,
        }

        pending.extend(cmd::spawn_effects(effects, prospects));
        if app.should_quit {
            break;
        }
        render(terminal, app)?;
    }

    info!("terminal UI exiting");
    Ok(())
}
