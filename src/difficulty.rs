//! Difficulty presets
//!
//! Each preset bundles the four numbers that shape a session: how many points
//! win, how long the round lasts, how often drops spawn and how often they are mud.

use serde::{Deserialize, Serialize};

/// Named difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Tuning numbers for this level
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                win_score: 12,
                total_time: 40,
                spawn_interval: SpawnInterval::new(700.0, 1100.0),
                mud_chance: 0.15,
            },
            Difficulty::Normal => DifficultyProfile {
                win_score: 20,
                total_time: 30,
                spawn_interval: SpawnInterval::new(500.0, 900.0),
                mud_chance: 0.25,
            },
            Difficulty::Hard => DifficultyProfile {
                win_score: 28,
                total_time: 22,
                spawn_interval: SpawnInterval::new(350.0, 700.0),
                mud_chance: 0.35,
            },
        }
    }
}

/// Delay range between two spawns, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnInterval {
    pub min_ms: f64,
    pub max_ms: f64,
}

impl SpawnInterval {
    pub const fn new(min_ms: f64, max_ms: f64) -> Self {
        Self { min_ms, max_ms }
    }
}

/// Session parameters derived from a [`Difficulty`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Score needed to win
    pub win_score: u32,
    /// Round length in seconds
    pub total_time: u32,
    pub spawn_interval: SpawnInterval,
    /// Probability that a spawned drop is mud
    pub mud_chance: f64,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str(" HARD "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_profiles_are_well_formed() {
        for d in Difficulty::ALL {
            let p = d.profile();
            assert!(p.win_score > 0);
            assert!(p.total_time > 0);
            assert!(p.spawn_interval.min_ms <= p.spawn_interval.max_ms);
            assert!((0.0..=1.0).contains(&p.mud_chance));
        }
    }

    #[test]
    fn test_normal_is_default() {
        let p = DifficultyProfile::default();
        assert_eq!(p.win_score, 20);
        assert_eq!(p.total_time, 30);
        assert_eq!(p.spawn_interval, SpawnInterval::new(500.0, 900.0));
        assert_eq!(p.mud_chance, 0.25);
    }

    #[test]
    fn test_harder_means_more_mud_less_time() {
        let easy = Difficulty::Easy.profile();
        let hard = Difficulty::Hard.profile();
        assert!(hard.mud_chance > easy.mud_chance);
        assert!(hard.total_time < easy.total_time);
        assert!(hard.win_score > easy.win_score);
    }
}
