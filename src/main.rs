mod app;
mod cards;
mod config;
mod contact;
mod content;
mod logging;
mod scroll;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::*;
use crate::cards::ExpansionChange;
use crate::contact::delivery::{self, MessageDelivery};
use crate::contact::SubmissionState;
use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let cfg = config::load_config()?;
    logging::init_tracing(&cfg.logging)?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, cfg).await;

    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "exiting after error");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Re-measure the page if anything that affects row positions changed.
fn refresh_layout<B: Backend>(terminal: &Terminal<B>, state: &mut AppState) -> Result<()> {
    let size = terminal.size()?;
    let app_layout = ui::layout::compute_layout(Rect::new(0, 0, size.width, size.height));
    let rows = app_layout.page.height as usize;
    if state.needs_layout(app_layout.page.width, rows) {
        let (_, layout) = ui::page::build(state, app_layout.page.width);
        state.apply_layout(layout, rows);
        state.dirty = true;
    }
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let delivery_service: Arc<dyn MessageDelivery> = delivery::from_config(&cfg.contact)?;
    let mut state = AppState::new(cfg)?;

    // Card expansion changes come back through the loop as events.
    for set in [CardSet::Skills, CardSet::Projects] {
        let tx = event_tx.clone();
        state.cards_mut(set).subscribe(Box::new(move |change: &ExpansionChange| {
            let _ = tx.send(AppEvent::CardsChanged {
                set,
                change: change.clone(),
            });
        }));
    }
    state.contact.subscribe(Box::new(|submission: &SubmissionState| {
        tracing::debug!(?submission, "contact form state");
    }));

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    tracing::error!(error = %e, "terminal input failed");
                    break;
                }
                None => break,
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Initial render
    refresh_layout(terminal, &mut state)?;
    terminal.draw(|f| ui::render(f, &state))?;
    state.dirty = false;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, event);

        // Process actions
        for action in actions {
            match action {
                Action::Deliver(pending) => {
                    let service = Arc::clone(&delivery_service);
                    let tx = event_tx.clone();
                    tokio::spawn(async move {
                        let outcome = delivery::deliver(service.as_ref(), &pending.message).await;
                        let _ = tx.send(AppEvent::DeliveryFinished {
                            attempt: pending.attempt,
                            outcome,
                        });
                    });
                }
                Action::Quit => state.should_quit = true,
            }
        }

        if state.should_quit {
            if state.contact.is_busy() {
                tracing::warn!("quitting with a contact message still in flight");
            }
            break;
        }

        refresh_layout(terminal, &mut state)?;

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}
