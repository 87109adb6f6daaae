use super::{DrawResult, DrawToken, SpinCurve, SpinTimingState, TickOutcome};
use crate::pool::PoolSnapshot;
use crate::signal::Signal;
use crate::timer::TimerGuard;
use crate::{RaffleConfig, RaffleError, Result};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;

/// Runs timed draws, one at a time.
///
/// The engine never touches the pool: it spins over a snapshot and reports
/// the outcome as [`Signal`]s. At most one draw is live; starting another
/// drops the previous schedule first, and every signal carries the token of
/// the draw that produced it.
#[derive(Debug)]
pub struct SpinEngine {
    curve: SpinCurve,
    settle: Duration,
    last_token: u64,
    active: Option<ActiveDraw>,
}

#[derive(Debug)]
struct ActiveDraw {
    token: DrawToken,
    _timer: TimerGuard,
}

impl SpinEngine {
    pub fn new(curve: SpinCurve, settle: Duration) -> Self {
        Self {
            curve,
            settle,
            last_token: 0,
            active: None,
        }
    }

    pub fn from_config(config: &RaffleConfig) -> Self {
        Self::new(SpinCurve::from_config(config), config.settle_delay())
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_token(&self) -> Option<DrawToken> {
        self.active.as_ref().map(|draw| draw.token)
    }

    pub fn is_current(&self, token: DrawToken) -> bool {
        self.active_token() == Some(token)
    }

    /// Start a draw over `snapshot`. The winner comes from `rng` alone.
    pub fn start(
        &mut self,
        snapshot: PoolSnapshot,
        rng: StdRng,
        signals: UnboundedSender<Signal>,
    ) -> Result<DrawToken> {
        if snapshot.is_empty() {
            return Err(RaffleError::EmptySnapshot);
        }

        if let Some(previous) = self.cancel() {
            tracing::warn!("Draw {} replaced before it resolved", previous);
        }

        self.last_token += 1;
        let token = DrawToken(self.last_token);
        let slots = snapshot.len();

        let timer = TimerGuard::spawn(run_draw(
            token,
            snapshot,
            self.curve,
            self.settle,
            rng,
            signals,
        ));
        self.active = Some(ActiveDraw {
            token,
            _timer: timer,
        });

        tracing::info!("Draw {} started over {} slots", token, slots);
        Ok(token)
    }

    /// Release the draw once its result has been consumed.
    pub fn finish(&mut self, token: DrawToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.active = None;
        true
    }

    pub fn cancel(&mut self) -> Option<DrawToken> {
        let draw = self.active.take()?;
        tracing::debug!("Draw {} cancelled", draw.token);
        Some(draw.token)
    }
}

/// Uniform pick over `0..len`. `len` must be non-zero.
pub fn pick_winner<R: Rng>(rng: &mut R, len: usize) -> usize {
    rng.random_range(0..len)
}

async fn run_draw(
    token: DrawToken,
    snapshot: PoolSnapshot,
    curve: SpinCurve,
    settle: Duration,
    mut rng: StdRng,
    signals: UnboundedSender<Signal>,
) {
    let started = Instant::now();
    let mut timing = SpinTimingState::new(&curve, snapshot.len());

    loop {
        tokio::time::sleep(timing.interval()).await;

        let elapsed = started.elapsed();
        match timing.step(elapsed, &curve) {
            TickOutcome::Advanced { index } => {
                let name = snapshot
                    .get(index)
                    .map(|slot| slot.participant.name.clone())
                    .unwrap_or_default();
                let tick = Signal::Tick {
                    token,
                    index,
                    name,
                    remaining_secs: curve.remaining_secs(elapsed),
                };
                if signals.send(tick).is_err() {
                    return;
                }
            }
            TickOutcome::Expired => break,
        }
    }

    let winner_index = pick_winner(&mut rng, snapshot.len());
    let Some(winner) = snapshot.get(winner_index).cloned() else {
        return;
    };

    tracing::debug!(
        "Draw {} landed on slot {} after {:?}",
        token,
        winner_index,
        timing.elapsed()
    );

    let _ = signals.send(Signal::Landed {
        token,
        index: winner_index,
        name: winner.participant.name.clone(),
    });

    tokio::time::sleep(settle).await;

    let _ = signals.send(Signal::Resolved(DrawResult {
        token,
        winner,
        winner_index,
        pool_before: snapshot,
        drawn_at: Utc::now(),
    }));
}
