use crate::effects::{Cue, CueOptions, EffectsGateway};
use crate::pool::{ParticipantPool, Slot};
use crate::signal::Signal;
use crate::spin::{DrawResult, DrawToken, SpinEngine};
use crate::timer::TimerGuard;
use crate::{Participant, RaffleConfig, RaffleError, Result};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

const SPIN_VOLUME: f32 = 0.3;
const CONFETTI_VOLUME: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Upload,
    Grid,
    Spinning,
    WinnerReveal,
    Finished,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionPhase::Upload => "upload",
            SessionPhase::Grid => "grid",
            SessionPhase::Spinning => "spinning",
            SessionPhase::WinnerReveal => "winner reveal",
            SessionPhase::Finished => "finished",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawRequest {
    Started(DrawToken),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotInGrid(SessionPhase),
    EmptyPool,
    DrawInFlight,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerNotice {
    pub participant: Participant,
    pub slot: Slot,
    /// Entrants still in the pool after this winner left it.
    pub remaining: usize,
    pub drawn_at: DateTime<Utc>,
}

/// Notifications for the host. Sending never blocks; a host that stops
/// listening simply misses them.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    PhaseChanged {
        from: SessionPhase,
        to: SessionPhase,
    },
    Tick {
        token: DrawToken,
        index: usize,
        name: String,
        remaining_secs: u64,
    },
    SpinStopped {
        token: DrawToken,
        index: usize,
        name: String,
    },
    Winner(WinnerNotice),
    Finished {
        draws: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatus {
    pub session_id: Uuid,
    pub phase: SessionPhase,
    pub remaining: usize,
    pub draws_completed: usize,
    pub current_winner: Option<Participant>,
    /// Entrants still in the pool, in draw order.
    pub participants: Vec<Participant>,
}

struct Dwell {
    token: DrawToken,
    _timer: TimerGuard,
}

/// The raffle state machine. Sole owner of the phase and the pool; every
/// mutation goes through one of its methods, one call at a time.
pub struct RaffleSession {
    id: Uuid,
    config: RaffleConfig,
    phase: SessionPhase,
    pool: ParticipantPool,
    engine: SpinEngine,
    dwell: Option<Dwell>,
    current_winner: Option<Participant>,
    draws_completed: usize,
    rng: StdRng,
    effects: EffectsGateway,
    signals: UnboundedSender<Signal>,
    events: UnboundedSender<SessionEvent>,
}

impl RaffleSession {
    pub fn new(
        config: RaffleConfig,
        effects: EffectsGateway,
        signals: UnboundedSender<Signal>,
        events: UnboundedSender<SessionEvent>,
    ) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let id = Uuid::new_v4();
        tracing::info!("Raffle session {} created", id);

        Ok(Self {
            id,
            engine: SpinEngine::from_config(&config),
            config,
            phase: SessionPhase::Upload,
            pool: ParticipantPool::new(),
            dwell: None,
            current_winner: None,
            draws_completed: 0,
            rng,
            effects,
            signals,
            events,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn pool(&self) -> &ParticipantPool {
        &self.pool
    }

    pub fn is_draw_active(&self) -> bool {
        self.engine.is_active()
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            session_id: self.id,
            phase: self.phase,
            remaining: self.pool.count(),
            draws_completed: self.draws_completed,
            current_winner: self.current_winner.clone(),
            participants: self
                .pool
                .iter()
                .map(|slot| slot.participant.clone())
                .collect(),
        }
    }

    /// Upload -> Grid. Only valid while uploading, and only with entrants.
    pub fn load_pool(&mut self, participants: Vec<Participant>) -> Result<()> {
        if self.phase != SessionPhase::Upload {
            return Err(RaffleError::LoadOutsideUpload { phase: self.phase });
        }

        self.pool.load(participants)?;
        tracing::info!(
            "Session {} loaded {} participants",
            self.id,
            self.pool.count()
        );
        self.enter_grid();
        Ok(())
    }

    /// Grid -> Spinning. Anything else is ignored rather than queued.
    pub fn request_draw(&mut self) -> Result<DrawRequest> {
        if self.engine.is_active() {
            return Ok(self.ignore(IgnoreReason::DrawInFlight));
        }
        if self.phase != SessionPhase::Grid {
            return Ok(self.ignore(IgnoreReason::NotInGrid(self.phase)));
        }
        if self.pool.is_empty() {
            return Ok(self.ignore(IgnoreReason::EmptyPool));
        }

        let rng = StdRng::from_rng(&mut self.rng);
        let token = self
            .engine
            .start(self.pool.snapshot(), rng, self.signals.clone())?;

        self.effects.cue(Cue::Lever, CueOptions::default());
        self.set_phase(SessionPhase::Spinning);
        self.effects
            .cue(Cue::Spin, CueOptions::default().looped().volume(SPIN_VOLUME));

        Ok(DrawRequest::Started(token))
    }

    pub fn on_signal(&mut self, signal: Signal) -> Result<()> {
        match signal {
            Signal::Tick {
                token,
                index,
                name,
                remaining_secs,
            } => {
                if self.is_live_draw(token) {
                    self.emit(SessionEvent::Tick {
                        token,
                        index,
                        name,
                        remaining_secs,
                    });
                }
            }
            Signal::Landed { token, index, name } => {
                if self.is_live_draw(token) {
                    self.emit(SessionEvent::SpinStopped { token, index, name });
                }
            }
            Signal::Resolved(result) => {
                if self.is_live_draw(result.token) {
                    self.resolve(result)?;
                } else {
                    tracing::debug!("Dropping stale result from draw {}", result.token);
                }
            }
            Signal::DwellElapsed { token } => {
                let current = self.dwell.as_ref().map(|dwell| dwell.token);
                if self.phase == SessionPhase::WinnerReveal && current == Some(token) {
                    self.dwell = None;
                    self.current_winner = None;
                    self.enter_grid();
                } else {
                    tracing::debug!("Dropping stale dwell signal from draw {}", token);
                }
            }
        }
        Ok(())
    }

    /// Back to Upload from anywhere, with every timer and cue stopped.
    pub fn reset(&mut self) {
        self.teardown();
        self.pool.clear();
        self.current_winner = None;
        self.draws_completed = 0;
        self.set_phase(SessionPhase::Upload);
        tracing::info!("Session {} reset", self.id);
    }

    /// Cancel outstanding timers and silence all cues.
    pub fn teardown(&mut self) {
        self.engine.cancel();
        self.dwell = None;
        self.effects.stop_all();
    }

    fn resolve(&mut self, result: DrawResult) -> Result<()> {
        let removed = self.pool.remove_slot(result.winner.id)?;
        self.engine.finish(result.token);
        self.draws_completed += 1;

        tracing::info!(
            "Draw {} won by {} ({} left)",
            result.token,
            removed.participant.name,
            self.pool.count()
        );

        self.effects.stop_cue(Cue::Spin);
        self.effects.cue(Cue::Win, CueOptions::default());
        self.effects
            .cue(Cue::Confetti, CueOptions::default().volume(CONFETTI_VOLUME));

        self.current_winner = Some(removed.participant.clone());
        self.set_phase(SessionPhase::WinnerReveal);
        self.emit(SessionEvent::Winner(WinnerNotice {
            participant: removed.participant.clone(),
            slot: removed,
            remaining: self.pool.count(),
            drawn_at: result.drawn_at,
        }));

        self.dwell = Some(Dwell {
            token: result.token,
            _timer: TimerGuard::after(
                self.reveal_dwell(),
                self.signals.clone(),
                Signal::DwellElapsed {
                    token: result.token,
                },
            ),
        });
        Ok(())
    }

    fn enter_grid(&mut self) {
        if self.pool.is_empty() {
            self.set_phase(SessionPhase::Finished);
            tracing::info!(
                "Session {} finished after {} draws",
                self.id,
                self.draws_completed
            );
            self.emit(SessionEvent::Finished {
                draws: self.draws_completed,
            });
        } else {
            self.set_phase(SessionPhase::Grid);
        }
    }

    fn is_live_draw(&self, token: DrawToken) -> bool {
        self.phase == SessionPhase::Spinning && self.engine.is_current(token)
    }

    fn ignore(&self, reason: IgnoreReason) -> DrawRequest {
        tracing::debug!("Draw request ignored: {:?}", reason);
        DrawRequest::Ignored(reason)
    }

    fn reveal_dwell(&self) -> Duration {
        self.config.reveal_dwell()
    }

    fn set_phase(&mut self, to: SessionPhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        tracing::debug!("Session {} phase {} -> {}", self.id, from, to);
        self.emit(SessionEvent::PhaseChanged { from, to });
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}

impl std::fmt::Debug for RaffleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaffleSession")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("remaining", &self.pool.count())
            .field("draw_active", &self.engine.is_active())
            .field("dwell_pending", &self.dwell.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{CueCall, RecordingBackend};
    use std::sync::Arc;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    struct Harness {
        session: RaffleSession,
        signals: UnboundedReceiver<Signal>,
        events: UnboundedReceiver<SessionEvent>,
        backend: Arc<RecordingBackend>,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_backend(Arc::new(RecordingBackend::new()))
        }

        fn with_backend(backend: Arc<RecordingBackend>) -> Self {
            let (signal_tx, signals) = mpsc::unbounded_channel();
            let (event_tx, events) = mpsc::unbounded_channel();
            let session = RaffleSession::new(
                fast_config(),
                EffectsGateway::new(backend.clone()),
                signal_tx,
                event_tx,
            )
            .unwrap();
            Self {
                session,
                signals,
                events,
                backend,
            }
        }

        /// Feed signals into the session until it leaves `phase`.
        async fn pump_until_not(&mut self, phase: SessionPhase) {
            while self.session.phase() == phase {
                let signal = self.signals.recv().await.unwrap();
                self.session.on_signal(signal).unwrap();
            }
        }

        async fn full_draw(&mut self) -> WinnerNotice {
            let request = self.session.request_draw().unwrap();
            assert!(matches!(request, DrawRequest::Started(_)));
            self.pump_until_not(SessionPhase::Spinning).await;
            let notice = self.last_winner().expect("no winner announced");
            self.pump_until_not(SessionPhase::WinnerReveal).await;
            notice
        }

        fn drain(&mut self) -> Vec<SessionEvent> {
            let mut out = Vec::new();
            while let Ok(event) = self.events.try_recv() {
                out.push(event);
            }
            out
        }

        fn last_winner(&mut self) -> Option<WinnerNotice> {
            self.drain().into_iter().rev().find_map(|event| match event {
                SessionEvent::Winner(notice) => Some(notice),
                _ => None,
            })
        }
    }

    fn fast_config() -> RaffleConfig {
        RaffleConfig {
            draw_duration_seconds: 0.1,
            reveal_dwell_seconds: 0.5,
            min_tick_ms: 10,
            max_tick_ms: 50,
            settle_seconds: 0.05,
            seed: Some(42),
        }
    }

    fn people(names: &[&str]) -> Vec<Participant> {
        names
            .iter()
            .map(|n| Participant::new(*n, format!("{} memory", n), format!("{}.jpg", n)))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_moves_to_grid() {
        let mut h = Harness::new();
        assert_eq!(h.session.phase(), SessionPhase::Upload);

        h.session.load_pool(people(&["A", "B"])).unwrap();
        assert_eq!(h.session.phase(), SessionPhase::Grid);
        assert_eq!(h.session.pool().count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_usage_errors_leave_state() {
        let mut h = Harness::new();
        let err = h.session.load_pool(Vec::new()).unwrap_err();
        assert!(matches!(err, RaffleError::EmptyParticipantList));
        assert_eq!(h.session.phase(), SessionPhase::Upload);

        h.session.load_pool(people(&["A"])).unwrap();
        let err = h.session.load_pool(people(&["B", "C"])).unwrap_err();
        assert!(matches!(
            err,
            RaffleError::LoadOutsideUpload {
                phase: SessionPhase::Grid
            }
        ));
        assert!(err.is_usage_error());
        assert_eq!(h.session.pool().count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_person_draw() {
        let mut h = Harness::new();
        h.session.load_pool(people(&["A", "B", "C"])).unwrap();

        let request = h.session.request_draw().unwrap();
        assert!(matches!(request, DrawRequest::Started(_)));
        assert_eq!(h.session.phase(), SessionPhase::Spinning);

        h.pump_until_not(SessionPhase::Spinning).await;
        assert_eq!(h.session.phase(), SessionPhase::WinnerReveal);

        let winners: Vec<_> = h
            .drain()
            .into_iter()
            .filter_map(|e| match e {
                SessionEvent::Winner(n) => Some(n),
                _ => None,
            })
            .collect();
        assert_eq!(winners.len(), 1);
        assert!(["A", "B", "C"].contains(&winners[0].participant.name.as_str()));
        assert_eq!(winners[0].remaining, 2);
        assert_eq!(h.session.pool().count(), 2);
        assert!(h.session.pool().get(winners[0].slot.id).is_none());

        h.pump_until_not(SessionPhase::WinnerReveal).await;
        assert_eq!(h.session.phase(), SessionPhase::Grid);
        assert!(h.session.status().current_winner.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_names_remove_one_slot() {
        let mut h = Harness::new();
        h.session.load_pool(people(&["A", "A"])).unwrap();

        let notice = h.full_draw().await;
        assert_eq!(notice.participant.name, "A");

        let survivors: Vec<_> = h.session.pool().iter().collect();
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].participant.name, "A");
        assert_ne!(survivors[0].id, notice.slot.id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_draws_until_finished() {
        let mut h = Harness::new();
        let names = ["A", "B", "C", "D"];
        h.session.load_pool(people(&names)).unwrap();

        let mut winners = Vec::new();
        for expected_left in (0..names.len()).rev() {
            let notice = h.full_draw().await;
            assert_eq!(notice.remaining, expected_left);
            winners.push(notice.participant.name);
        }

        winners.sort();
        assert_eq!(winners, names);
        assert_eq!(h.session.phase(), SessionPhase::Finished);

        let finished = h
            .drain()
            .into_iter()
            .any(|e| matches!(e, SessionEvent::Finished { draws: 4 }));
        assert!(finished);

        let request = h.session.request_draw().unwrap();
        assert_eq!(
            request,
            DrawRequest::Ignored(IgnoreReason::NotInGrid(SessionPhase::Finished))
        );
        assert_eq!(h.session.phase(), SessionPhase::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_ignored_outside_grid() {
        let mut h = Harness::new();
        assert_eq!(
            h.session.request_draw().unwrap(),
            DrawRequest::Ignored(IgnoreReason::NotInGrid(SessionPhase::Upload))
        );
        assert_eq!(h.session.phase(), SessionPhase::Upload);

        h.session.load_pool(people(&["A", "B"])).unwrap();
        h.session.request_draw().unwrap();
        assert_eq!(
            h.session.request_draw().unwrap(),
            DrawRequest::Ignored(IgnoreReason::DrawInFlight)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_timers() {
        let mut h = Harness::new();
        h.session.load_pool(people(&["A", "B", "C"])).unwrap();
        h.session.request_draw().unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;
        h.session.reset();
        assert_eq!(h.session.phase(), SessionPhase::Upload);
        assert!(h.session.pool().is_empty());
        assert!(!h.session.is_draw_active());
        h.drain();

        tokio::time::advance(Duration::from_secs(30)).await;
        while let Ok(signal) = h.signals.try_recv() {
            h.session.on_signal(signal).unwrap();
        }

        let late = h.drain();
        assert!(late.iter().all(|e| !matches!(
            e,
            SessionEvent::Winner(_) | SessionEvent::Finished { .. }
        )));
        assert_eq!(h.session.phase(), SessionPhase::Upload);
        assert_eq!(h.backend.calls().last(), Some(&CueCall::StopAll));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_reveal_drops_dwell() {
        let mut h = Harness::new();
        h.session.load_pool(people(&["A", "B"])).unwrap();
        h.session.request_draw().unwrap();
        h.pump_until_not(SessionPhase::Spinning).await;
        assert_eq!(h.session.phase(), SessionPhase::WinnerReveal);

        h.session.reset();
        h.session.load_pool(people(&["X", "Y"])).unwrap();

        tokio::time::advance(Duration::from_secs(10)).await;
        while let Ok(signal) = h.signals.try_recv() {
            h.session.on_signal(signal).unwrap();
        }
        assert_eq!(h.session.phase(), SessionPhase::Grid);
        assert_eq!(h.session.pool().count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_is_ignored() {
        let mut h = Harness::new();
        h.session.load_pool(people(&["A", "B"])).unwrap();
        h.session.request_draw().unwrap();

        let stale = loop {
            match h.signals.recv().await.unwrap() {
                Signal::Resolved(result) => break result,
                other => h.session.on_signal(other).unwrap(),
            }
        };

        h.session.reset();
        h.session.load_pool(people(&["A", "B"])).unwrap();
        h.session.on_signal(Signal::Resolved(stale)).unwrap();

        assert_eq!(h.session.phase(), SessionPhase::Grid);
        assert_eq!(h.session.pool().count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_from_finished_allows_reload() {
        let mut h = Harness::new();
        h.session.load_pool(people(&["A", "B"])).unwrap();
        h.full_draw().await;
        h.full_draw().await;
        assert_eq!(h.session.phase(), SessionPhase::Finished);

        h.session.reset();
        let status = h.session.status();
        assert_eq!(status.phase, SessionPhase::Upload);
        assert_eq!(status.remaining, 0);
        assert_eq!(status.draws_completed, 0);
        assert!(status.current_winner.is_none());
        assert!(h.session.pool().is_empty());
        assert_eq!(h.backend.calls().last(), Some(&CueCall::StopAll));

        h.session.load_pool(people(&["C", "D", "E"])).unwrap();
        assert_eq!(h.session.phase(), SessionPhase::Grid);
        assert_eq!(h.session.pool().count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_from_grid() {
        let mut h = Harness::new();
        h.session.load_pool(people(&["A", "B", "C"])).unwrap();
        h.full_draw().await;
        assert_eq!(h.session.phase(), SessionPhase::Grid);

        h.session.reset();
        let status = h.session.status();
        assert_eq!(status.phase, SessionPhase::Upload);
        assert_eq!(status.remaining, 0);
        assert_eq!(status.draws_completed, 0);
        assert_eq!(h.backend.calls().last(), Some(&CueCall::StopAll));

        h.session.load_pool(people(&["A", "B", "C"])).unwrap();
        assert_eq!(h.session.pool().count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_dwell_is_ignored() {
        let mut h = Harness::new();
        h.session.load_pool(people(&["A", "B", "C"])).unwrap();
        let DrawRequest::Started(old) = h.session.request_draw().unwrap() else {
            panic!("draw did not start");
        };
        h.pump_until_not(SessionPhase::Spinning).await;
        assert_eq!(h.session.phase(), SessionPhase::WinnerReveal);

        h.session.reset();
        h.session.load_pool(people(&["X", "Y", "Z"])).unwrap();
        let DrawRequest::Started(live) = h.session.request_draw().unwrap() else {
            panic!("draw did not start");
        };
        assert_ne!(old, live);

        // dwell from the draw before the reset lands mid-spin
        h.session
            .on_signal(Signal::DwellElapsed { token: old })
            .unwrap();
        assert_eq!(h.session.phase(), SessionPhase::Spinning);

        h.pump_until_not(SessionPhase::Spinning).await;
        assert_eq!(h.session.phase(), SessionPhase::WinnerReveal);

        // and again while the live draw is on its own reveal
        h.session
            .on_signal(Signal::DwellElapsed { token: old })
            .unwrap();
        assert_eq!(h.session.phase(), SessionPhase::WinnerReveal);
        assert!(h.session.status().current_winner.is_some());

        h.pump_until_not(SessionPhase::WinnerReveal).await;
        assert_eq!(h.session.phase(), SessionPhase::Grid);
        assert_eq!(h.session.pool().count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_winner_keeps_draw_live() {
        let mut h = Harness::new();
        h.session.load_pool(people(&["A", "B"])).unwrap();
        let DrawRequest::Started(token) = h.session.request_draw().unwrap() else {
            panic!("draw did not start");
        };

        let mut elsewhere = ParticipantPool::new();
        elsewhere.load(people(&["Ghost"])).unwrap();
        let foreign = DrawResult {
            token,
            winner: elsewhere.snapshot().get(0).cloned().unwrap(),
            winner_index: 0,
            pool_before: h.session.pool().snapshot(),
            drawn_at: Utc::now(),
        };

        let err = h.session.on_signal(Signal::Resolved(foreign)).unwrap_err();
        assert!(matches!(err, RaffleError::SlotNotFound(_)));
        assert_eq!(h.session.phase(), SessionPhase::Spinning);
        assert!(h.session.is_draw_active());
        assert_eq!(h.session.pool().count(), 2);

        // the real result still resolves the draw
        h.pump_until_not(SessionPhase::Spinning).await;
        assert_eq!(h.session.phase(), SessionPhase::WinnerReveal);
        assert_eq!(h.session.pool().count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cue_sequence() {
        let mut h = Harness::new();
        h.session.load_pool(people(&["A", "B"])).unwrap();
        h.full_draw().await;

        assert_eq!(
            h.backend.played(),
            vec![Cue::Lever, Cue::Spin, Cue::Win, Cue::Confetti]
        );
        assert!(h.backend.calls().contains(&CueCall::Stop(Cue::Spin)));
        assert!(h.backend.calls().contains(&CueCall::Play(
            Cue::Spin,
            CueOptions {
                looped: true,
                volume: Some(SPIN_VOLUME)
            }
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_effects_do_not_block() {
        let mut h = Harness::with_backend(Arc::new(RecordingBackend::failing()));
        h.session.load_pool(people(&["A", "B"])).unwrap();
        h.full_draw().await;
        h.full_draw().await;
        assert_eq!(h.session.phase(), SessionPhase::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_config_rejected() {
        let (signal_tx, _) = mpsc::unbounded_channel();
        let (event_tx, _) = mpsc::unbounded_channel();
        let config = RaffleConfig {
            min_tick_ms: 0,
            ..RaffleConfig::default()
        };
        let result = RaffleSession::new(config, EffectsGateway::disabled(), signal_tx, event_tx);
        assert!(matches!(result, Err(RaffleError::InvalidConfig(_))));
    }
}
