//! # TUI Adapter
//!
//! The ratatui-specific layer: terminal setup, the event loop, and the
//! bridge between background network tasks and the synchronous bus.
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The loop redraws only when something happened: an input event, a
//! network result, or the once-a-second tick that keeps the auction
//! countdown honest while a lot preview is open.

mod component;
pub mod components;
mod event;
mod ui;
pub mod wiring;

use std::io::stdout;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::execute;
use log::{info, warn};

use crate::api::{AuctionApi, HttpAuctionApi};
use crate::core::config::ResolvedConfig;
use crate::tui::event::{poll_event, poll_event_immediate, UiEvent};
use crate::tui::wiring::{AppCtx, Effect, NetEvent};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // SteadyBlock: continuous redraws reset the terminal's blink timer,
        // which makes a blinking cursor look erratic.
        execute!(stdout(), Show, SetCursorStyle::SteadyBlock)?;
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Hide);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn AuctionApi> =
        Arc::new(HttpAuctionApi::new(config.api_url.clone(), config.cdn_url.clone()));

    let bus = wiring::build_bus();
    let mut ctx = AppCtx::new();
    ctx.effects.push(Effect::FetchCatalog);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for results from background request tasks
    let (tx, rx) = mpsc::channel();

    let mut needs_redraw = true; // Force first frame
    loop {
        run_effects(&mut ctx, &api, &tx);

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &mut ctx.views))?;
            needs_redraw = false;
        }

        let first_event = poll_event(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, UiEvent::Resize) {
                continue;
            }
            if wiring::handle_ui_event(&bus, &mut ctx, &event) {
                should_quit = true;
            }
        }
        if should_quit {
            break;
        }

        // Fold in background results
        while let Ok(net) = rx.try_recv() {
            needs_redraw = true;
            wiring::apply_net_event(&bus, &mut ctx, net);
        }

        // Countdown tick while a preview is showing
        if ctx.views.modal.content == Some(components::ModalContent::Preview) {
            wiring::tick(&mut ctx);
            needs_redraw = true;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Drain the queued effects into background tokio tasks. Each task reports
/// back over the channel; a dropped receiver only happens at shutdown.
fn run_effects(ctx: &mut AppCtx, api: &Arc<dyn AuctionApi>, tx: &mpsc::Sender<NetEvent>) {
    for effect in std::mem::take(&mut ctx.effects) {
        let api = Arc::clone(api);
        let tx = tx.clone();
        match effect {
            Effect::FetchCatalog => {
                info!("Fetching lot catalog");
                tokio::spawn(async move {
                    let net = match api.get_lot_list().await {
                        Ok(lots) => NetEvent::CatalogLoaded(lots),
                        Err(e) => NetEvent::RequestFailed(e.to_string()),
                    };
                    if tx.send(net).is_err() {
                        warn!("Catalog result dropped: receiver gone");
                    }
                });
            }
            Effect::FetchLotDetail(id) => {
                info!("Fetching detail for lot {id}");
                tokio::spawn(async move {
                    let net = match api.get_lot_item(&id).await {
                        Ok(detail) => NetEvent::LotDetailLoaded { id, detail },
                        Err(e) => NetEvent::RequestFailed(e.to_string()),
                    };
                    if tx.send(net).is_err() {
                        warn!("Lot detail result dropped: receiver gone");
                    }
                });
            }
            Effect::SubmitOrder(order) => {
                info!("Submitting order for {} lot(s)", order.items.len());
                tokio::spawn(async move {
                    let net = match api.order_lots(&order).await {
                        Ok(result) => NetEvent::OrderConfirmed(result),
                        Err(e) => NetEvent::RequestFailed(e.to_string()),
                    };
                    if tx.send(net).is_err() {
                        warn!("Order result dropped: receiver gone");
                    }
                });
            }
        }
    }
}
