//! Sound playback
//!
//! Cue-based audio: the simulation reports what happened and the frontend
//! resolves cues to loaded sounds here. Missing audio files are a fatal
//! startup error like any other asset.

use std::path::Path;

use macroquad::audio::{PlaySoundParams, Sound, load_sound, play_sound};

use crate::assets::AssetError;
use crate::sim::TickEvents;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Weapon fired
    Shoot,
    /// Bullet connected with an enemy
    Impact,
    /// Player took contact damage
    Hurt,
}

/// Loaded sounds plus mix levels
pub struct SoundBank {
    shoot: Sound,
    impact: Sound,
    hurt: Sound,
    music: Sound,
    sfx_volume: f32,
    music_volume: f32,
}

impl SoundBank {
    pub async fn load(dir: &Path) -> Result<Self, AssetError> {
        let audio = dir.join("audio");
        Ok(Self {
            shoot: load_cue(&audio.join("shoot.wav")).await?,
            impact: load_cue(&audio.join("impact.ogg")).await?,
            hurt: load_cue(&audio.join("hurt.wav")).await?,
            music: load_cue(&audio.join("music.wav")).await?,
            sfx_volume: 1.0,
            music_volume: 0.5,
        })
    }

    /// Fire-and-forget playback of one cue
    pub fn play(&self, cue: SoundCue) {
        let (sound, volume) = match cue {
            // The shot cue is mixed low; it fires up to ten times a second
            SoundCue::Shoot => (&self.shoot, 0.2 * self.sfx_volume),
            SoundCue::Impact => (&self.impact, self.sfx_volume),
            SoundCue::Hurt => (&self.hurt, 0.7 * self.sfx_volume),
        };
        play_sound(
            sound,
            PlaySoundParams {
                looped: false,
                volume,
            },
        );
    }

    /// Start the looping background track
    pub fn start_music(&self) {
        play_sound(
            &self.music,
            PlaySoundParams {
                looped: true,
                volume: self.music_volume,
            },
        );
    }

    /// Map a tick's outcomes onto cues
    pub fn play_tick_events(&self, events: &TickEvents) {
        if events.shots > 0 {
            self.play(SoundCue::Shoot);
        }
        if events.impacts > 0 {
            self.play(SoundCue::Impact);
        }
        if events.hurt {
            self.play(SoundCue::Hurt);
        }
    }
}

async fn load_cue(path: &Path) -> Result<Sound, AssetError> {
    let path_str = path
        .to_str()
        .ok_or_else(|| AssetError::Missing(format!("{}", path.display())))?;
    load_sound(path_str)
        .await
        .map_err(|e| AssetError::Missing(format!("{}: {e}", path.display())))
}
