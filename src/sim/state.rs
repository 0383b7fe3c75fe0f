//! Session state and score bookkeeping
//!
//! Everything that changes during a round lives in [`GameSession`]. It has no
//! platform dependencies; the controller mirrors its changes onto the UI.

use crate::difficulty::DifficultyProfile;

use super::drop::{DropId, FallingDrop};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Waiting for Start
    #[default]
    Idle,
    /// Drops spawning, countdown running
    Running,
    /// Round over, result message on screen
    Ended,
}

/// One-time progress announcement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Milestone {
    /// Fraction of the win score that triggers it
    pub fraction: f64,
    pub message: &'static str,
}

impl Milestone {
    /// Score at which this milestone fires for a given win score
    pub fn threshold(&self, win_score: u32) -> u32 {
        (win_score as f64 * self.fraction).ceil() as u32
    }
}

pub const MILESTONE_COUNT: usize = 3;

/// Milestones in ascending order
pub static MILESTONES: [Milestone; MILESTONE_COUNT] = [
    Milestone {
        fraction: 0.25,
        message: "Great start! Keep going! 💪",
    },
    Milestone {
        fraction: 0.5,
        message: "Halfway there! 🚰",
    },
    Milestone {
        fraction: 0.75,
        message: "Almost at your goal! 🌟",
    },
];

/// Mutable state of one round
#[derive(Debug, Clone)]
pub struct GameSession {
    pub profile: DifficultyProfile,
    pub phase: GamePhase,
    score: u32,
    time_remaining: u32,
    /// Indexes into [`MILESTONES`] already announced
    shown_milestones: [bool; MILESTONE_COUNT],
    /// Live drops in spawn order
    drops: Vec<FallingDrop>,
    next_drop_id: DropId,
}

impl GameSession {
    pub fn new(profile: DifficultyProfile) -> Self {
        Self {
            profile,
            phase: GamePhase::Idle,
            score: 0,
            time_remaining: profile.total_time,
            shown_milestones: [false; MILESTONE_COUNT],
            drops: Vec::new(),
            next_drop_id: 1,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn has_won(&self) -> bool {
        self.score >= self.profile.win_score
    }

    /// Set the score, clamped at zero.
    ///
    /// Returns the milestones crossed by this update, ascending. Each is
    /// marked shown so it never fires again this session.
    pub fn set_score(&mut self, value: i64) -> Vec<&'static Milestone> {
        self.score = value.clamp(0, u32::MAX as i64) as u32;

        let win = self.profile.win_score;
        let mut crossed = Vec::new();
        for (i, milestone) in MILESTONES.iter().enumerate() {
            if self.shown_milestones[i] {
                continue;
            }
            if self.score >= milestone.threshold(win) && self.score < win {
                self.shown_milestones[i] = true;
                crossed.push(milestone);
            }
        }
        crossed
    }

    /// Apply a signed change to the score
    pub fn add_score(&mut self, delta: i64) -> Vec<&'static Milestone> {
        self.set_score(self.score as i64 + delta)
    }

    pub fn set_time(&mut self, value: u32) {
        self.time_remaining = value;
    }

    /// Progress toward the win score, 0-100
    pub fn progress_percent(&self) -> f64 {
        let win = self.profile.win_score.max(1) as f64;
        (100.0 * self.score as f64 / win).min(100.0)
    }

    pub fn milestone_shown(&self, index: usize) -> bool {
        self.shown_milestones.get(index).copied().unwrap_or(false)
    }

    pub fn reset_milestones(&mut self) {
        self.shown_milestones = [false; MILESTONE_COUNT];
    }

    /// Allocate an id for the next spawned drop
    pub fn next_drop_id(&mut self) -> DropId {
        let id = self.next_drop_id;
        self.next_drop_id = self.next_drop_id.wrapping_add(1);
        id
    }

    pub fn drops(&self) -> &[FallingDrop] {
        &self.drops
    }

    pub fn insert_drop(&mut self, drop: FallingDrop) {
        self.drops.push(drop);
    }

    /// Remove a live drop, `None` if it is already gone
    pub fn take_drop(&mut self, id: DropId) -> Option<FallingDrop> {
        let idx = self.drops.iter().position(|d| d.id == id)?;
        Some(self.drops.remove(idx))
    }

    pub fn clear_drops(&mut self) {
        self.drops.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use proptest::prelude::*;

    fn normal() -> GameSession {
        GameSession::new(Difficulty::Normal.profile())
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let mut s = normal();
        s.set_score(1);
        s.add_score(-2);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_milestone_thresholds() {
        // Normal: win 20 -> 5, 10, 15
        let win = Difficulty::Normal.profile().win_score;
        let t: Vec<_> = MILESTONES.iter().map(|m| m.threshold(win)).collect();
        assert_eq!(t, vec![5, 10, 15]);

        // Hard: win 28 -> 7, 14, 21
        let win = Difficulty::Hard.profile().win_score;
        let t: Vec<_> = MILESTONES.iter().map(|m| m.threshold(win)).collect();
        assert_eq!(t, vec![7, 14, 21]);
    }

    #[test]
    fn test_milestone_fires_once() {
        let mut s = normal();
        assert!(s.set_score(4).is_empty());
        let crossed = s.set_score(5);
        assert_eq!(crossed.len(), 1);
        assert_eq!(crossed[0].message, MILESTONES[0].message);

        // Dropping below and crossing again does not repeat it
        s.set_score(3);
        assert!(s.set_score(5).is_empty());
        assert!(s.milestone_shown(0));
        assert!(!s.milestone_shown(1));
    }

    #[test]
    fn test_jump_past_several_milestones_reports_all_in_order() {
        // The visible message ends up being the last one; all are consumed.
        let mut s = normal();
        let crossed = s.set_score(16);
        let fractions: Vec<_> = crossed.iter().map(|m| m.fraction).collect();
        assert_eq!(fractions, vec![0.25, 0.5, 0.75]);
        assert!(s.set_score(17).is_empty());
    }

    #[test]
    fn test_no_milestone_at_or_above_win() {
        let mut s = normal();
        assert!(s.set_score(20).is_empty());
        assert!(s.set_score(25).is_empty());
        assert!(!s.milestone_shown(0));
    }

    #[test]
    fn test_reset_milestones() {
        let mut s = normal();
        s.set_score(10);
        s.reset_milestones();
        s.set_score(0);
        assert_eq!(s.set_score(5).len(), 1);
    }

    #[test]
    fn test_take_drop_only_once() {
        use crate::sim::drop::{DropKind, FallingDrop};

        let mut s = normal();
        let id = s.next_drop_id();
        s.insert_drop(FallingDrop {
            id,
            kind: DropKind::Water,
            size: 30,
            left: 0.0,
            fall_duration: 4.0,
        });
        assert!(s.take_drop(id).is_some());
        assert!(s.take_drop(id).is_none());
    }

    proptest! {
        #[test]
        fn score_never_negative_and_progress_bounded(values in prop::collection::vec(-50i64..60, 1..40)) {
            let mut s = normal();
            for v in values {
                s.set_score(v);
                prop_assert_eq!(s.score() as i64, v.max(0));
                let expected = (100.0 * s.score() as f64 / 20.0).min(100.0);
                prop_assert_eq!(s.progress_percent(), expected);
                prop_assert!((0.0..=100.0).contains(&s.progress_percent()));
            }
        }

        #[test]
        fn each_milestone_reported_at_most_once(deltas in prop::collection::vec(-2i64..=3, 1..80)) {
            let mut s = normal();
            let mut counts = [0usize; MILESTONE_COUNT];
            for d in deltas {
                for m in s.add_score(d) {
                    prop_assert!(s.score() < s.profile.win_score);
                    let i = MILESTONES.iter().position(|x| x.fraction == m.fraction).unwrap();
                    counts[i] += 1;
                }
            }
            prop_assert!(counts.iter().all(|&c| c <= 1));
        }
    }
}
