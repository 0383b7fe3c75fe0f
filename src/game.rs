//! Game loop controller
//!
//! Owns the session, the timer queue and the platform ports. The host feeds it
//! button presses, drop clicks and elapsed time; everything else (spawning,
//! countdown, landing, cleanup) happens inside [`Game::advance`].

use crate::consts::*;
use crate::difficulty::Difficulty;
use crate::platform::{
    Audio, Celebration, ConfettiBurst, Control, Flash, MessageTone, Renderer, TextSlot,
};
use crate::random::Randomness;
use crate::sim::{DropId, DropKind, GamePhase, GameSession, TimerId, TimerQueue, roll_drop};

/// What a pending timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    /// One-second countdown step
    Countdown,
    /// Spawn a drop and schedule the next one
    Spawn,
    /// Drop finished falling
    Land(DropId),
    /// Remove the click glow
    FlashClear,
    /// Sweep leftover drops after a round ends
    ClearDrops,
}

/// Result of a finished round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    pub won: bool,
    pub score: u32,
    pub message: &'static str,
    /// Whether the win effect actually ran
    pub celebrated: bool,
}

/// The game controller
pub struct Game {
    difficulty: Difficulty,
    session: GameSession,
    timers: TimerQueue<TimerKind>,
    countdown: Option<TimerId>,
    spawner: Option<TimerId>,
    flash_clear: Option<TimerId>,
    post_end_clear: Option<TimerId>,
    last_outcome: Option<RoundOutcome>,
    rng: Box<dyn Randomness>,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn Audio>,
    celebration: Option<Box<dyn Celebration>>,
}

impl Game {
    /// Create a game in the Idle phase with the UI in its reset state
    pub fn new(
        difficulty: Difficulty,
        rng: Box<dyn Randomness>,
        renderer: Box<dyn Renderer>,
        audio: Box<dyn Audio>,
    ) -> Self {
        let mut game = Self {
            difficulty,
            session: GameSession::new(difficulty.profile()),
            timers: TimerQueue::new(),
            countdown: None,
            spawner: None,
            flash_clear: None,
            post_end_clear: None,
            last_outcome: None,
            rng,
            renderer,
            audio,
            celebration: None,
        };
        game.reset();
        game
    }

    /// Attach the optional win effect
    pub fn with_celebration(mut self, celebration: Box<dyn Celebration>) -> Self {
        self.celebration = Some(celebration);
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn now_ms(&self) -> f64 {
        self.timers.now_ms()
    }

    /// Outcome of the most recent finished round
    pub fn last_outcome(&self) -> Option<&RoundOutcome> {
        self.last_outcome.as_ref()
    }

    /// Number of timers still pending (landing drops included)
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Switch difficulty. Always resets, since live timers use the old profile.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        log::info!("Difficulty set to {}", difficulty.as_str());
        self.difficulty = difficulty;
        self.session.profile = difficulty.profile();
        self.reset();
    }

    /// Begin a round. Ignored while one is running.
    pub fn start(&mut self) {
        if self.session.is_running() {
            log::debug!("start ignored: already running");
            return;
        }

        self.session.phase = GamePhase::Running;
        self.last_outcome = None;

        // A sweep left over from the previous round must not hit this one
        if let Some(id) = self.post_end_clear.take() {
            self.timers.cancel(id);
        }

        self.apply_score(0);
        self.show_time(self.session.profile.total_time);
        self.renderer.set_message("", MessageTone::Neutral);
        self.clear_all_drops();
        self.session.reset_milestones();

        self.renderer.set_control_enabled(Control::Start, false);
        self.renderer.set_control_enabled(Control::Reset, true);
        self.renderer.set_control_enabled(Control::Difficulty, false);

        self.spawn_and_reschedule();
        self.countdown = Some(self.timers.schedule(COUNTDOWN_STEP_MS, TimerKind::Countdown));

        self.audio.play_music();

        log::info!(
            "Round started ({}: win {} in {}s)",
            self.difficulty.as_str(),
            self.session.profile.win_score,
            self.session.profile.total_time
        );
    }

    /// Finish the running round and show the result
    pub fn end(&mut self) {
        if !self.session.is_running() {
            return;
        }

        self.session.phase = GamePhase::Ended;
        self.stop_loops();
        self.post_end_clear = Some(self.timers.schedule(END_CLEAR_DELAY_MS, TimerKind::ClearDrops));

        self.renderer.set_control_enabled(Control::Start, true);
        self.renderer.set_control_enabled(Control::Reset, true);
        self.renderer.set_control_enabled(Control::Difficulty, true);

        self.audio.stop_music();

        let score = self.session.score();
        let won = self.session.has_won();
        let (pool, tone) = if won {
            (&WIN_MESSAGES, MessageTone::Highlight)
        } else {
            (&TRY_AGAIN_MESSAGES, MessageTone::Neutral)
        };
        let message = self.rng.pick_one(pool).copied().unwrap_or_default();
        self.renderer.set_message(message, tone);

        let celebrated = won && self.celebrate();

        log::info!(
            "Round over: score {} / {} ({})",
            score,
            self.session.profile.win_score,
            if won { "win" } else { "lose" }
        );

        self.last_outcome = Some(RoundOutcome {
            won,
            score,
            message,
            celebrated,
        });
    }

    /// Return to Idle from any phase, dropping every pending timer
    pub fn reset(&mut self) {
        self.session.phase = GamePhase::Idle;
        self.timers.clear();
        self.countdown = None;
        self.spawner = None;
        self.flash_clear = None;
        self.post_end_clear = None;

        self.apply_score(0);
        self.show_time(self.session.profile.total_time);
        self.renderer.set_message("", MessageTone::Neutral);
        self.session.clear_drops();
        self.renderer.clear_drops();
        self.renderer.flash(None);
        self.session.reset_milestones();

        self.renderer.set_control_enabled(Control::Start, true);
        self.renderer.set_control_enabled(Control::Reset, false);
        self.renderer.set_control_enabled(Control::Difficulty, true);

        self.audio.stop_music();

        log::debug!("Game reset");
    }

    /// Player clicked a drop. Returns true if the click counted.
    pub fn click_drop(&mut self, id: DropId) -> bool {
        if !self.session.is_running() {
            return false;
        }
        let Some(drop) = self.session.take_drop(id) else {
            return false;
        };

        self.timers.cancel_where(|k| *k == TimerKind::Land(id));
        self.renderer.remove_drop(id);

        self.apply_score(self.session.score() as i64 + drop.kind.score_delta());

        let flash = match drop.kind {
            DropKind::Water => Flash::Good,
            DropKind::Mud => Flash::Bad,
        };
        self.renderer.flash(Some(flash));
        if let Some(prev) = self.flash_clear.take() {
            self.timers.cancel(prev);
        }
        self.flash_clear = Some(self.timers.schedule(FLASH_CLEAR_MS, TimerKind::FlashClear));

        log::debug!(
            "Clicked {} drop {} -> score {}",
            drop.kind.css_class(),
            id,
            self.session.score()
        );
        true
    }

    /// Player clicked the logo
    pub fn logo_clicked(&mut self) {
        self.audio.play_click();
    }

    /// Mute toggle. A running round keeps its music position.
    pub fn set_muted(&mut self, muted: bool) {
        log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        self.audio.set_muted(muted);
    }

    /// Advance the clock by `elapsed_ms`, firing every timer that comes due
    pub fn advance(&mut self, elapsed_ms: f64) {
        let target = self.timers.now_ms() + elapsed_ms.max(0.0);
        while let Some((id, due_ms, kind)) = self.timers.pop_due(target) {
            self.fire(id, due_ms, kind);
        }
        self.timers.set_now(target);
    }

    fn fire(&mut self, id: TimerId, due_ms: f64, kind: TimerKind) {
        match kind {
            TimerKind::Countdown => {
                if self.countdown == Some(id) {
                    self.countdown = None;
                }
                // Orphaned ticks do nothing
                if !self.session.is_running() {
                    return;
                }
                let left = self.session.time_remaining().saturating_sub(1);
                self.show_time(left);
                if left == 0 {
                    self.end();
                } else {
                    self.countdown = Some(
                        self.timers
                            .schedule_at(due_ms + COUNTDOWN_STEP_MS, TimerKind::Countdown),
                    );
                }
            }
            TimerKind::Spawn => {
                if self.spawner == Some(id) {
                    self.spawner = None;
                }
                self.spawn_and_reschedule();
            }
            TimerKind::Land(drop_id) => {
                if self.session.take_drop(drop_id).is_some() {
                    self.renderer.remove_drop(drop_id);
                }
            }
            TimerKind::FlashClear => {
                self.flash_clear = None;
                self.renderer.flash(None);
            }
            TimerKind::ClearDrops => {
                self.post_end_clear = None;
                self.clear_all_drops();
            }
        }
    }

    /// One spawn loop iteration
    fn spawn_and_reschedule(&mut self) {
        if !self.session.is_running() {
            return;
        }
        self.spawn_drop();

        let interval = self.session.profile.spawn_interval;
        let delay = self.rng.uniform_real(interval.min_ms, interval.max_ms);
        self.spawner = Some(self.timers.schedule(delay, TimerKind::Spawn));
    }

    fn spawn_drop(&mut self) {
        let width = self.renderer.container_width();
        let id = self.session.next_drop_id();
        let drop = roll_drop(id, width, &self.session.profile, &mut *self.rng);

        self.renderer.create_drop(&drop);
        self.timers.schedule(drop.fall_duration_ms(), TimerKind::Land(id));
        log::debug!(
            "Spawned {} drop {} (size {}, left {:.1})",
            drop.kind.css_class(),
            id,
            drop.size,
            drop.left
        );
        self.session.insert_drop(drop);
    }

    fn stop_loops(&mut self) {
        if let Some(id) = self.countdown.take() {
            self.timers.cancel(id);
        }
        if let Some(id) = self.spawner.take() {
            self.timers.cancel(id);
        }
    }

    fn clear_all_drops(&mut self) {
        self.session.clear_drops();
        self.timers.cancel_where(|k| matches!(k, TimerKind::Land(_)));
        self.renderer.clear_drops();
    }

    fn apply_score(&mut self, value: i64) {
        let crossed = self.session.set_score(value);
        self.renderer
            .set_text(TextSlot::Score, &self.session.score().to_string());
        self.renderer.set_progress(self.session.progress_percent());

        // Several at once: the last one stays on screen
        for milestone in crossed {
            log::info!("Milestone reached: {}", milestone.message);
            self.renderer.set_message(milestone.message, MessageTone::Neutral);
        }
    }

    fn show_time(&mut self, seconds: u32) {
        self.session.set_time(seconds);
        self.renderer.set_text(TextSlot::Time, &seconds.to_string());
    }

    fn celebrate(&mut self) -> bool {
        let Some(celebration) = self.celebration.as_mut() else {
            return false;
        };
        let fired = celebration.celebrate(&ConfettiBurst::default());
        if !fired {
            log::debug!("Celebration unavailable, skipped");
        }
        fired
    }
}
