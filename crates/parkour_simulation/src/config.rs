//! Game tunables
//!
//! Every gameplay constant lives in `GameConfig` (a Bevy resource) so tests
//! and hosts can retune without touching systems. Defaults reproduce the
//! reference level feel; a JSON file may override any subset of fields.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Simulation rate (ticks per second)
    pub tick_hz: f64,
    /// Seed for `DeterministicRng`
    pub seed: u64,

    /// Downward acceleration (units/s²), applied to crates and the player
    pub gravity: f32,

    pub crate_scale: f32,
    pub crate_friction: f32,
    /// Extra probe reach below a crate's half-height
    pub crate_probe_epsilon: f32,
    pub crate_death_height: f32,

    pub player_start: [f32; 3],
    pub player_max_health: u32,
    pub player_move_speed: f32,
    pub player_jump_height: f32,
    pub player_death_height: f32,
    /// Camera pivot height above the player's feet
    pub camera_height: f32,

    pub projectile_speed: f32,
    /// Seconds before an unhit projectile is removed
    pub projectile_lifetime: f32,
    pub projectile_push_force: f32,
    /// Distance in front of the camera pivot where projectiles appear
    pub muzzle_offset: f32,
    pub muzzle_flash_duration: f32,

    pub rocket_jump_force: f32,
    pub rocket_jump_probe_distance: f32,

    /// Goal spin (degrees per second)
    pub goal_spin_speed: f32,

    pub spawn_cue_volume: f32,
    pub spawn_cue_pitch_min: f32,
    pub spawn_cue_pitch_max: f32,
    pub fire_cue_pitch: f32,
    pub fire_cue_volume: f32,
    pub jump_cue_volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            seed: 42,

            gravity: 9.8,

            crate_scale: 1.5,
            crate_friction: 4.0,
            crate_probe_epsilon: 0.1,
            crate_death_height: -5.0,

            player_start: [0.0, 1.0, 0.0],
            player_max_health: 3,
            player_move_speed: 8.0,
            player_jump_height: 2.0,
            player_death_height: -10.0,
            camera_height: 2.0,

            projectile_speed: 60.0,
            projectile_lifetime: 2.0,
            projectile_push_force: 5.0,
            muzzle_offset: 0.5,
            muzzle_flash_duration: 0.05,

            rocket_jump_force: 6.0,
            rocket_jump_probe_distance: 1.5,

            goal_spin_speed: 50.0,

            spawn_cue_volume: 0.5,
            spawn_cue_pitch_min: 0.8,
            spawn_cue_pitch_max: 1.2,
            fire_cue_pitch: 2.0,
            fire_cue_volume: 0.1,
            jump_cue_volume: 0.5,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        if !(self.tick_hz.is_finite() && self.tick_hz > 0.0) {
            return Err(ConfigError::Invalid {
                field: "tick_hz",
                reason: "must be a positive finite number",
            });
        }
        if self.player_max_health == 0 {
            return Err(ConfigError::Invalid {
                field: "player_max_health",
                reason: "must be at least 1",
            });
        }

        positive("gravity", self.gravity)?;
        positive("crate_scale", self.crate_scale)?;
        positive("projectile_speed", self.projectile_speed)?;
        positive("projectile_lifetime", self.projectile_lifetime)?;
        positive("muzzle_flash_duration", self.muzzle_flash_duration)?;
        positive("rocket_jump_probe_distance", self.rocket_jump_probe_distance)?;

        if self.crate_friction < 0.0 {
            return Err(ConfigError::Invalid {
                field: "crate_friction",
                reason: "must not be negative",
            });
        }
        if self.spawn_cue_pitch_min > self.spawn_cue_pitch_max {
            return Err(ConfigError::Invalid {
                field: "spawn_cue_pitch_min",
                reason: "must not exceed spawn_cue_pitch_max",
            });
        }

        Ok(())
    }

    pub fn player_start(&self) -> Vec3 {
        Vec3::from_array(self.player_start)
    }

    /// Launch speed that peaks at `player_jump_height`
    pub fn player_jump_speed(&self) -> f32 {
        (2.0 * self.gravity * self.player_jump_height).sqrt()
    }
}
