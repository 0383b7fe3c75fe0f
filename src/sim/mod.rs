//! Simulation module
//!
//! Pure gameplay state with no platform dependencies:
//! - Drops and how they are rolled
//! - Session score, time and milestones
//! - The cooperative timer queue that drives spawning and the countdown

pub mod drop;
pub mod state;
pub mod timer;

pub use drop::{DropId, DropKind, FallingDrop, roll_drop};
pub use state::{GamePhase, GameSession, MILESTONE_COUNT, MILESTONES, Milestone};
pub use timer::{TimerId, TimerQueue};
