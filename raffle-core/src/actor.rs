//! Task that owns a [`RaffleSession`] and serialises everything that touches it.
//!
//! Host commands and timer signals arrive on two channels; the loop applies
//! them one at a time, so no transition is ever observed half done.

use crate::effects::EffectsGateway;
use crate::session::{DrawRequest, RaffleSession, SessionEvent, SessionStatus};
use crate::signal::Signal;
use crate::{Participant, RaffleConfig, RaffleError, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

const COMMAND_BUFFER: usize = 32;

enum Command {
    Load {
        participants: Vec<Participant>,
        reply: oneshot::Sender<Result<()>>,
    },
    Draw {
        reply: oneshot::Sender<Result<DrawRequest>>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
    Status {
        reply: oneshot::Sender<SessionStatus>,
    },
    Shutdown,
}

/// Cloneable front door to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
}

impl SessionHandle {
    pub async fn load_pool(&self, participants: Vec<Participant>) -> Result<()> {
        self.call(|reply| Command::Load {
            participants,
            reply,
        })
        .await?
    }

    pub async fn request_draw(&self) -> Result<DrawRequest> {
        self.call(|reply| Command::Draw { reply }).await?
    }

    pub async fn reset(&self) -> Result<()> {
        self.call(|reply| Command::Reset { reply }).await
    }

    pub async fn status(&self) -> Result<SessionStatus> {
        self.call(|reply| Command::Status { reply }).await
    }

    /// Stop the session task after tearing down its timers and cues.
    pub async fn shutdown(&self) -> Result<()> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| RaffleError::SessionClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    async fn call<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| RaffleError::SessionClosed)?;
        response.await.map_err(|_| RaffleError::SessionClosed)
    }
}

/// Spawn a session task. Returns the handle, the notification stream and the
/// task's join handle.
pub fn spawn_session(
    config: RaffleConfig,
    effects: EffectsGateway,
) -> Result<(
    SessionHandle,
    mpsc::UnboundedReceiver<SessionEvent>,
    JoinHandle<()>,
)> {
    let (signal_tx, signal_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);

    let session = RaffleSession::new(config, effects, signal_tx, event_tx)?;
    let task = tokio::spawn(run(session, command_rx, signal_rx));

    Ok((
        SessionHandle {
            commands: command_tx,
        },
        event_rx,
        task,
    ))
}

async fn run(
    mut session: RaffleSession,
    mut commands: mpsc::Receiver<Command>,
    mut signals: mpsc::UnboundedReceiver<Signal>,
) {
    tracing::info!("Session {} event loop started", session.id());

    loop {
        tokio::select! {
            command = commands.recv() => {
                match command {
                    Some(Command::Shutdown) => {
                        tracing::info!("Shutdown requested");
                        break;
                    }
                    Some(command) => handle_command(&mut session, command),
                    None => {
                        tracing::info!("All session handles dropped, shutting down");
                        break;
                    }
                }
            }

            // the session keeps a sender, so this never yields None
            Some(signal) = signals.recv() => {
                if let Err(e) = session.on_signal(signal) {
                    tracing::error!("Session {} failed to apply signal: {}", session.id(), e);
                }
            }
        }
    }

    session.teardown();
    tracing::info!("Session {} event loop exiting", session.id());
}

fn handle_command(session: &mut RaffleSession, command: Command) {
    match command {
        Command::Load {
            participants,
            reply,
        } => {
            let _ = reply.send(session.load_pool(participants));
        }
        Command::Draw { reply } => {
            let _ = reply.send(session.request_draw());
        }
        Command::Reset { reply } => {
            session.reset();
            let _ = reply.send(());
        }
        Command::Status { reply } => {
            let _ = reply.send(session.status());
        }
        Command::Shutdown => {}
    }
}
