use crate::cues::TerminalCues;
use crate::roster;
use anyhow::Context;
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::{Confirm, Input};
use raffle_core::{
    spawn_session, DrawRequest, EffectsGateway, Participant, RaffleConfig, SessionEvent,
    SessionHandle, SessionPhase, WinnerNotice,
};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub async fn run_raffle(config: RaffleConfig, roster_path: &Path, mute: bool) -> anyhow::Result<()> {
    let participants = roster::load_roster(roster_path).await?;

    let effects = if mute {
        EffectsGateway::disabled()
    } else {
        EffectsGateway::new(Arc::new(TerminalCues::new()))
    };
    let (session, mut events, task) = spawn_session(config, effects)?;

    loop {
        session.load_pool(participants.clone()).await?;
        play(&session, &mut events).await?;

        if !confirm("Start over with the same list?").await? {
            break;
        }
        session.reset().await?;
    }

    session.shutdown().await?;
    task.await.context("session task panicked")?;
    Ok(())
}

pub async fn check_roster(roster_path: &Path) -> anyhow::Result<()> {
    let participants = roster::load_roster(roster_path).await?;

    println!("Roster: {}", roster_path.display());
    println!("═══════════════════════════════════");
    println!("{}", participant_table(&participants));
    println!("{} participants ready", participants.len());
    Ok(())
}

pub fn show_config(config: &RaffleConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

async fn play(
    session: &SessionHandle,
    events: &mut UnboundedReceiver<SessionEvent>,
) -> anyhow::Result<()> {
    loop {
        let status = session.status().await?;
        match status.phase {
            SessionPhase::Finished => {
                print_finished(status.draws_completed);
                return Ok(());
            }
            SessionPhase::Grid => {
                println!();
                println!("{}", participant_table(&status.participants));
                wait_for_lever().await?;
            }
            other => anyhow::bail!("Unexpected session phase: {}", other),
        }

        // anything queued so far belongs to earlier transitions
        while events.try_recv().is_ok() {}

        if let DrawRequest::Ignored(reason) = session.request_draw().await? {
            tracing::debug!("Lever pull ignored: {:?}", reason);
            continue;
        }

        follow_draw(events).await?;
    }
}

/// Render one draw until the session settles back on the grid or finishes.
async fn follow_draw(events: &mut UnboundedReceiver<SessionEvent>) -> anyhow::Result<()> {
    let mut frame = 0usize;
    let mut stdout = std::io::stdout();

    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::Tick {
                name,
                remaining_secs,
                ..
            } => {
                frame += 1;
                print!(
                    "\r  {} {:<32} {:>3}s left ",
                    SPINNER[frame % SPINNER.len()],
                    name,
                    remaining_secs
                );
                stdout.flush()?;
            }
            SessionEvent::SpinStopped { name, .. } => {
                println!("\r  * {:<32} We have a winner!", name);
            }
            SessionEvent::Winner(notice) => print_winner(&notice),
            SessionEvent::PhaseChanged {
                from: SessionPhase::WinnerReveal,
                to: SessionPhase::Grid,
            } => return Ok(()),
            SessionEvent::Finished { .. } => return Ok(()),
            SessionEvent::PhaseChanged { .. } => {}
        }
    }

    anyhow::bail!("Session closed mid-draw")
}

fn participant_table(participants: &[Participant]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Name", "Memory", "Photo"]);

    for (i, participant) in participants.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            participant.name.clone(),
            participant.memory.clone(),
            participant.image_url.clone(),
        ]);
    }
    table
}

fn print_winner(notice: &WinnerNotice) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.add_row(vec!["Winner", notice.participant.name.as_str()]);
    table.add_row(vec!["Memory", notice.participant.memory.as_str()]);
    table.add_row(vec!["Photo", notice.participant.image_url.as_str()]);

    println!();
    println!("Congratulations!");
    println!("{}", table);
    println!(
        "Drawn at {} - {} left in the pool",
        notice.drawn_at.format("%H:%M:%S"),
        notice.remaining
    );
    println!("Continuing in a few seconds...");
}

fn print_finished(draws: usize) {
    println!();
    println!("═══════════════════════════════════");
    println!("All {} participants have been drawn. Thanks for playing!", draws);
    println!("═══════════════════════════════════");
}

async fn wait_for_lever() -> anyhow::Result<()> {
    tokio::task::spawn_blocking(|| {
        Input::<String>::new()
            .with_prompt("Press ENTER to pull the lever")
            .allow_empty(true)
            .interact_text()
    })
    .await??;
    Ok(())
}

async fn confirm(prompt: &'static str) -> anyhow::Result<bool> {
    let answer = tokio::task::spawn_blocking(move || {
        Confirm::new().with_prompt(prompt).default(false).interact()
    })
    .await??;
    Ok(answer)
}
