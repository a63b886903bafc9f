use crate::tui::{TuiActor, TuiMsg};
use claimcheck_checker::DisplayRegion;
use claimcheck_runtime::actor::Addr;
use std::time::Duration;
use tokio::{sync::watch, time};
use tokio_util::sync::CancellationToken;

const INPUT_POLL: Duration = Duration::from_millis(100);
const TICK: Duration = Duration::from_millis(80);

/// Start the tasks that feed the TUI actor: terminal input, the redraw
/// tick and display-region updates. All of them end when `cancel` fires.
pub fn spawn_tui_feeders(
    tui: Addr<TuiActor>,
    mut display: watch::Receiver<DisplayRegion>,
    cancel: CancellationToken,
) {
    // One blocking thread polls the terminal so it can notice cancellation.
    let tui_in = tui.clone();
    let cancel_input = cancel.clone();
    tokio::task::spawn_blocking(move || {
        while !cancel_input.is_cancelled() {
            match crossterm::event::poll(INPUT_POLL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    let _ = tui_in.blocking_send(TuiMsg::InputError(e.to_string()));
                    break;
                }
            }
            let msg = match crossterm::event::read() {
                Ok(ev) => TuiMsg::InputEvent(ev),
                Err(e) => TuiMsg::InputError(e.to_string()),
            };
            if tui_in.blocking_send(msg).is_err() {
                tracing::debug!("tui.input_feeder.closed");
                break;
            }
        }
    });

    let tui_tick = tui.clone();
    let cancel_tick = cancel.clone();
    tokio::spawn(async move {
        let mut interval = time::interval(TICK);
        loop {
            tokio::select! {
                _ = cancel_tick.cancelled() => break,
                _ = interval.tick() => {
                    if tui_tick.is_closed() {
                        break;
                    }
                    // A full mailbox already holds work that will trigger a redraw.
                    let _ = tui_tick.try_send(TuiMsg::Tick);
                }
            }
        }
    });

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                changed = display.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let region = display.borrow_and_update().clone();
                    if tui.send(TuiMsg::Display(region)).await.is_err() {
                        tracing::debug!("tui.display_feeder.closed");
                        break;
                    }
                }
            }
        }
    });
}
