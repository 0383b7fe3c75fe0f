//! Falling drops
//!
//! A drop is either clean water (+1 when clicked) or mud (-2). Drops never
//! interact with each other; they only live until clicked, landed or cleared.

use crate::consts::*;
use crate::difficulty::DifficultyProfile;
use crate::random::Randomness;

/// Stable id of a live drop (unique within a page load)
pub type DropId = u32;

/// Drop type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropKind {
    Water,
    Mud,
}

impl DropKind {
    /// CSS class used by the DOM renderer
    pub fn css_class(&self) -> &'static str {
        match self {
            DropKind::Water => "water",
            DropKind::Mud => "mud",
        }
    }

    /// Score change applied when this drop is clicked
    pub fn score_delta(&self) -> i64 {
        match self {
            DropKind::Water => WATER_POINTS,
            DropKind::Mud => -MUD_PENALTY,
        }
    }
}

/// A single falling drop
#[derive(Debug, Clone, PartialEq)]
pub struct FallingDrop {
    pub id: DropId,
    pub kind: DropKind,
    /// Width and height in px
    pub size: u32,
    /// Horizontal offset from the container's left edge, px
    pub left: f64,
    /// Time to fall through the container, seconds
    pub fall_duration: f64,
}

impl FallingDrop {
    pub fn is_mud(&self) -> bool {
        self.kind == DropKind::Mud
    }

    pub fn fall_duration_ms(&self) -> f64 {
        self.fall_duration * 1000.0
    }
}

/// Roll a new drop for a container of the given width.
///
/// Draw order is fixed (type, size, speed, position) so scripted sources
/// produce predictable drops.
pub fn roll_drop(
    id: DropId,
    container_width: f64,
    profile: &DifficultyProfile,
    rng: &mut dyn Randomness,
) -> FallingDrop {
    let kind = if rng.chance(profile.mud_chance) {
        DropKind::Mud
    } else {
        DropKind::Water
    };
    let size = rng.uniform_int(DROP_SIZE_MIN as i64, DROP_SIZE_MAX as i64) as u32;
    let fall_duration = rng.uniform_real(DROP_FALL_MIN_SECS, DROP_FALL_MAX_SECS);

    // Keep the whole drop inside the container
    let max_left = (container_width - size as f64).max(0.0);
    let left = rng.uniform_real(0.0, max_left);

    FallingDrop {
        id,
        kind,
        size,
        left,
        fall_duration,
    }
}
