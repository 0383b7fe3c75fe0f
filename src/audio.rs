//! Audio system
//!
//! Two sounds: a looping background track that follows the round, and a short
//! splash played when the logo is clicked. Volume math is platform-free; the
//! browser backend plays the files through `HtmlAudioElement`.

use crate::settings::Settings;

/// Background track
pub const MUSIC_SRC: &str = "assets/game-intro.wav";
/// Logo click sound
pub const CLICK_SRC: &str = "assets/water-click.wav";

/// Volume levels for both channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioMix {
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioMix {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AudioMix {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut mix = Self {
            music_volume: 0.0,
            sfx_volume: 0.0,
            muted: settings.muted,
        };
        mix.set_music_volume(settings.music_volume);
        mix.set_sfx_volume(settings.sfx_volume);
        mix
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn music(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    pub fn sfx(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::HtmlAudioElement;

    use super::{AudioMix, CLICK_SRC, MUSIC_SRC};
    use crate::platform::Audio;

    /// Browser audio backed by two `<audio>` elements
    pub struct WebAudio {
        music: Option<HtmlAudioElement>,
        click: Option<HtmlAudioElement>,
        mix: AudioMix,
    }

    impl WebAudio {
        pub fn new(mix: AudioMix) -> Self {
            let music = HtmlAudioElement::new_with_src(MUSIC_SRC).ok();
            let click = HtmlAudioElement::new_with_src(CLICK_SRC).ok();
            if music.is_none() || click.is_none() {
                log::warn!("Failed to create audio elements - audio disabled");
            }
            if let Some(m) = &music {
                m.set_loop(true);
            }
            let mut audio = Self { music, click, mix };
            audio.apply_mix();
            audio
        }

        fn apply_mix(&mut self) {
            if let Some(m) = &self.music {
                m.set_volume(self.mix.music() as f64);
            }
            if let Some(c) = &self.click {
                c.set_volume(self.mix.sfx() as f64);
            }
        }

        /// Rewind and play; autoplay rejections are ignored
        fn restart(el: &HtmlAudioElement) {
            el.set_current_time(0.0);
            let _ = el.play();
        }
    }

    impl Audio for WebAudio {
        /// Muted music still plays at zero volume so unmuting picks it up
        fn play_music(&mut self) {
            if let Some(m) = &self.music {
                Self::restart(m);
            }
        }

        fn stop_music(&mut self) {
            if let Some(m) = &self.music {
                let _ = m.pause();
                m.set_current_time(0.0);
            }
        }

        fn play_click(&mut self) {
            if self.mix.is_muted() {
                return;
            }
            if let Some(c) = &self.click {
                Self::restart(c);
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.mix.set_muted(muted);
            self.apply_mix();
        }
    }
}
