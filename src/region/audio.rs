//! Audio collaborator
//!
//! Regions only say "play this"; mixing, decoding and volume belong to
//! whatever implements `AudioSink`.

use std::path::Path;

pub trait AudioSink {
    /// Fire-and-forget sound effect
    fn play_sound(&mut self, sound: &Path);
    /// Start looping music, replacing whatever is playing
    fn play_music(&mut self, music: &Path);
    fn stop_music(&mut self);
}

/// Silent sink for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sound(&mut self, _sound: &Path) {}
    fn play_music(&mut self, _music: &Path) {}
    fn stop_music(&mut self) {}
}

/// Sink that logs every request instead of playing it
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play_sound(&mut self, sound: &Path) {
        tracing::debug!(sound = %sound.display(), "play sound");
    }

    fn play_music(&mut self, music: &Path) {
        tracing::info!(music = %music.display(), "play music");
    }

    fn stop_music(&mut self) {
        tracing::debug!("stop music");
    }
}
