//! Sound cues
//!
//! The core only decides *which* cue plays with what pitch/volume; the host
//! reads `SoundCue` events and does the actual playback.

use bevy::prelude::*;
use rand::Rng;

use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Crate appeared at a spawner
    Spawn,
    /// Projectile fired
    Fire,
    /// Rocket jump launch
    Jump,
}

impl Cue {
    /// Asset name the host resolves
    pub fn asset_name(&self) -> &'static str {
        match self {
            Cue::Spawn => "coin_sound",
            Cue::Fire => "saw_sound",
            Cue::Jump => "jump_sound",
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SoundCue {
    pub cue: Cue,
    pub pitch: f32,
    pub volume: f32,
}

impl SoundCue {
    /// Spawn cue with jittered pitch so repeated spawns don't sound identical
    pub fn spawn(rng: &mut impl Rng, config: &GameConfig) -> Self {
        Self {
            cue: Cue::Spawn,
            pitch: rng.gen_range(config.spawn_cue_pitch_min..=config.spawn_cue_pitch_max),
            volume: config.spawn_cue_volume,
        }
    }

    pub fn fire(config: &GameConfig) -> Self {
        Self {
            cue: Cue::Fire,
            pitch: config.fire_cue_pitch,
            volume: config.fire_cue_volume,
        }
    }

    pub fn jump(config: &GameConfig) -> Self {
        Self {
            cue: Cue::Jump,
            pitch: 1.0,
            volume: config.jump_cue_volume,
        }
    }
}
