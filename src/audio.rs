//! Audio manager
//!
//! Turns the simulation's music/cue effects into calls on an `AudioSink`.

use crate::error::AssetError;
use crate::platform::{AssetProvider, AudioSink, SoundHandle};
use crate::settings::Settings;
use crate::sim::{CueLengths, SoundCue};

/// The three sounds the game uses
#[derive(Debug, Clone)]
pub struct Sounds {
    pub soundtrack: SoundHandle,
    pub die: SoundHandle,
    pub game_over: SoundHandle,
}

impl Sounds {
    pub fn load(assets: &mut impl AssetProvider) -> Result<Self, AssetError> {
        Ok(Self {
            soundtrack: assets.load_sound("soundtrack.wav")?,
            die: assets.load_sound("die.wav")?,
            game_over: assets.load_sound("game_over.wav")?,
        })
    }

    /// Cue lengths drive the respawn/restart delays
    pub fn cue_lengths(&self) -> CueLengths {
        CueLengths {
            die: self.die.length,
            game_over: self.game_over.length,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    sounds: Sounds,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, sounds: Sounds, settings: &Settings) -> Self {
        Self {
            sink,
            sounds,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Start the soundtrack loop
    pub fn start_music(&mut self) {
        let vol = self.effective_volume(self.music_volume);
        if vol <= 0.0 {
            return;
        }
        self.sink.play(&self.sounds.soundtrack, true, vol);
    }

    pub fn stop_music(&mut self) {
        self.sink.stop(&self.sounds.soundtrack);
    }

    /// Play a one-shot cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        let sound = match cue {
            SoundCue::Die => &self.sounds.die,
            SoundCue::GameOver => &self.sounds.game_over,
        };
        self.sink.play(sound, false, vol);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
