//! Drop Catcher - click the clean water, dodge the mud
//!
//! Core modules:
//! - `sim`: Platform-free gameplay state (drops, score, timers)
//! - `game`: Loop controller tying the session to the platform ports
//! - `platform`: Renderer/audio/celebration ports and their DOM implementations
//! - `difficulty`: Easy/normal/hard presets
//! - `settings`: Player preferences persisted in LocalStorage

pub mod audio;
pub mod difficulty;
pub mod game;
pub mod platform;
pub mod random;
pub mod settings;
pub mod sim;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use game::{Game, RoundOutcome};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Drop size range in px (inclusive)
    pub const DROP_SIZE_MIN: u32 = 24;
    pub const DROP_SIZE_MAX: u32 = 48;

    /// Fall duration range in seconds
    pub const DROP_FALL_MIN_SECS: f64 = 3.5;
    pub const DROP_FALL_MAX_SECS: f64 = 5.0;

    /// Points for a water drop
    pub const WATER_POINTS: i64 = 1;
    /// Points lost for a mud drop
    pub const MUD_PENALTY: i64 = 2;

    /// Countdown cadence
    pub const COUNTDOWN_STEP_MS: f64 = 1000.0;
    /// How long the click glow stays on
    pub const FLASH_CLEAR_MS: f64 = 180.0;
    /// Delay before leftover drops are swept after a round
    pub const END_CLEAR_DELAY_MS: f64 = 800.0;

    /// Largest frame delta fed to the timer queue
    pub const MAX_FRAME_MS: f64 = 1000.0;

    pub const WIN_MESSAGES: [&str; 4] = [
        "Amazing! You brought clean water to a village! 💧",
        "You did it! Every drop counts. 🌍",
        "Victory! Thanks for making a splash for good! 🎉",
        "Clean water unlocked! You're a hero! 🚰",
    ];

    pub const TRY_AGAIN_MESSAGES: [&str; 4] = [
        "Almost there! Try again for more impact.",
        "Keep going! Every drop helps.",
        "Don't give up! Clean water is within reach.",
        "So close! Play again to help more.",
    ];
}
