//! Platform abstraction layer
//!
//! The game core talks to the outside world only through these traits:
//! - [`Renderer`]: drop elements, HUD text, progress bar, controls
//! - [`Audio`]: background music and click sound
//! - [`Celebration`]: optional confetti on a win
//!
//! `web` implements them on the DOM (wasm32 only); [`Recorder`] records every
//! call for tests and the headless runner.

pub mod recording;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use recording::{PortCall, Recorder};

use crate::sim::{DropId, FallingDrop};

/// HUD text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    Score,
    Time,
}

/// Color role for the status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageTone {
    /// Win / highlight (blue)
    Highlight,
    /// Everything else (brown)
    Neutral,
}

/// User-facing controls the game enables and disables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Start,
    Reset,
    Difficulty,
}

/// Short glow on the play field after a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flash {
    Good,
    Bad,
}

/// Confetti parameters for the win effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiBurst {
    pub particle_count: u32,
    pub spread: f64,
    /// Vertical origin as a fraction of viewport height
    pub origin_y: f64,
}

impl Default for ConfettiBurst {
    fn default() -> Self {
        Self {
            particle_count: 120,
            spread: 80.0,
            origin_y: 0.6,
        }
    }
}

/// Visual side of the game
pub trait Renderer {
    /// Current play field width in px
    fn container_width(&self) -> f64;
    fn create_drop(&mut self, drop: &FallingDrop);
    fn remove_drop(&mut self, id: DropId);
    /// Remove every drop element
    fn clear_drops(&mut self);
    fn set_text(&mut self, slot: TextSlot, text: &str);
    /// Progress bar width, 0-100
    fn set_progress(&mut self, percent: f64);
    fn set_message(&mut self, text: &str, tone: MessageTone);
    fn set_control_enabled(&mut self, control: Control, enabled: bool);
    /// Show a flash, or clear it with `None`
    fn flash(&mut self, flash: Option<Flash>);
}

/// Sound output
pub trait Audio {
    /// Rewind and start the looping background track
    fn play_music(&mut self);
    /// Pause and rewind the background track
    fn stop_music(&mut self);
    /// Restart the one-shot click sound
    fn play_click(&mut self);
    /// Silence or restore both channels without stopping playback
    fn set_muted(&mut self, muted: bool);
}

/// Optional decorative win effect
pub trait Celebration {
    /// Fire the effect. Returns false if it is unavailable.
    fn celebrate(&mut self, burst: &ConfettiBurst) -> bool;
}
