use anyhow::Result;
use clap::Parser;
use claimcheck_checker::ClaimChecker;
use claimcheck_common::observability::init_logging;
use claimcheck_runtime::actor::{ActorHandle, spawn_actor};
use claimcheck_tui::{TuiActor, spawn_tui_feeders};
use cli::{Cli, Cmd};
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

mod check;
mod cli;
mod wiring;

const TUI_MAILBOX: usize = 256;
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let interactive = !matches!(cli.command, Some(Cmd::Check { .. }));

    // 1) Config: file, then env, then flags
    let cfg = wiring::load_config(&cli)?;
    let log_path = init_logging(wiring::log_config(&cfg, interactive))?;
    tracing::info!(log = %log_path.display(), interactive, "claimcheck.start");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("claimcheck")
        .build()?;
    let cancel = CancellationToken::new();
    let command = cli.command;
    let outcome = runtime.block_on(async move {
        let checker = wiring::build_checker(&cfg)?;
        match command {
            Some(Cmd::Check { claim, output }) => {
                let input = check::claim_text(&claim)?;
                let state = check::check_once(&checker, &input).await;
                check::print(&state, output)
            }
            Some(Cmd::Tui) | None => run_tui(checker, cancel).await.map(|()| ExitCode::SUCCESS),
        }
    });

    // Detached check requests are abandoned after the grace period.
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    if let Err(e) = &outcome {
        tracing::error!(error = %e, "claimcheck.failed");
    }
    outcome
}

async fn run_tui(checker: ClaimChecker, cancel: CancellationToken) -> Result<()> {
    let tui = TuiActor::new(checker.clone())?;
    let ActorHandle { addr, mut task } = spawn_actor(tui, TUI_MAILBOX, cancel.clone());
    spawn_tui_feeders(addr, checker.subscribe(), cancel.clone());

    tokio::select! {
        joined = &mut task => return joined?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("tui.interrupted");
            cancel.cancel();
        }
    }
    task.await?
}
