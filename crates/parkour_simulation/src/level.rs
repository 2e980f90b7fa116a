//! Fixed level layout + startup construction
//!
//! Ground plane, three stepped platforms, a spinning goal above the top one,
//! a crate spawner (with console button) on the ground and on every platform.

use bevy::prelude::*;

use crate::audio::SoundCue;
use crate::components::{
    BoxCollider, ButtonTint, CameraPivot, Goal, Ground, Health, MuzzleFlash, PhysicsBody, Platform,
    Player, SpawnButton, SpawnPoint, Spawner, Spin,
};
use crate::config::GameConfig;
use crate::director::{GameState, Hud};
use crate::physics::movement::{KinematicController, MovementInput};
use crate::spawner::spawn_crate;
use crate::DeterministicRng;

/// Player collider (feet-anchored capsule approximated by a box)
pub const PLAYER_HALF_EXTENTS: Vec3 = Vec3::new(0.4, 0.9, 0.4);
pub const PLAYER_COLLIDER_OFFSET: Vec3 = Vec3::new(0.0, 0.9, 0.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformSpec {
    pub position: Vec3,
    pub size: Vec3,
}

impl PlatformSpec {
    pub fn top(&self) -> f32 {
        self.position.y + self.size.y * 0.5
    }
}

/// Static geometry of the course
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub ground_center: Vec3,
    pub ground_size: Vec3,
    /// Ordered bottom to top; the last one carries the goal
    pub platforms: Vec<PlatformSpec>,
    /// Crate slot on the ground (the others sit on the platforms)
    pub ground_spawn: Vec3,
    /// Console button position relative to its spawner
    pub button_offset: Vec3,
    pub button_size: Vec3,
    /// Goal center height above the top platform's surface
    pub goal_lift: f32,
    pub goal_size: f32,
}

impl Default for LevelLayout {
    fn default() -> Self {
        let platform_size = Vec3::new(6.0, 0.8, 6.0);

        Self {
            ground_center: Vec3::new(0.0, -0.5, 0.0),
            ground_size: Vec3::new(100.0, 1.0, 100.0),
            platforms: vec![
                PlatformSpec {
                    position: Vec3::new(0.0, 3.0, 6.0),
                    size: platform_size,
                },
                PlatformSpec {
                    position: Vec3::new(4.0, 6.0, 11.0),
                    size: platform_size,
                },
                PlatformSpec {
                    position: Vec3::new(0.0, 9.0, 16.0),
                    size: platform_size,
                },
            ],
            ground_spawn: Vec3::new(5.0, 0.75, 5.0),
            button_offset: Vec3::new(2.5, -0.3, 0.0),
            button_size: Vec3::new(1.2, 0.2, 1.2),
            goal_lift: 1.0,
            goal_size: 2.0,
        }
    }
}

impl LevelLayout {
    pub fn top_platform(&self) -> Option<&PlatformSpec> {
        self.platforms.last()
    }

    /// Ground slot first, then one crate resting on each platform
    pub fn spawn_points(&self, crate_half_height: f32) -> Vec<Vec3> {
        std::iter::once(self.ground_spawn)
            .chain(
                self.platforms
                    .iter()
                    .map(|platform| Vec3::new(platform.position.x, platform.top() + crate_half_height, platform.position.z)),
            )
            .collect()
    }

    /// Goal hovers over the top platform (over the ground if there are none)
    pub fn goal_position(&self) -> Vec3 {
        match self.top_platform() {
            Some(platform) => Vec3::new(platform.position.x, platform.top() + self.goal_lift, platform.position.z),
            None => {
                let ground_top = self.ground_center.y + self.ground_size.y * 0.5;
                Vec3::new(self.ground_center.x, ground_top + self.goal_lift, self.ground_center.z)
            }
        }
    }
}

/// Startup system: build the whole course and the session state
pub fn setup_level(
    mut commands: Commands,
    config: Res<GameConfig>,
    layout: Res<LevelLayout>,
    mut rng: ResMut<DeterministicRng>,
    mut cues: EventWriter<SoundCue>,
) {
    commands.spawn((
        Name::new("Ground"),
        Ground,
        Transform::from_translation(layout.ground_center),
        BoxCollider::cuboid(layout.ground_size),
    ));

    for (index, platform) in layout.platforms.iter().enumerate() {
        commands.spawn((
            Name::new(format!("Platform {}", index)),
            Platform { index },
            Transform::from_translation(platform.position).with_scale(platform.size),
            BoxCollider::cuboid(platform.size),
        ));
    }

    let goal = commands
        .spawn((
            Name::new("Goal"),
            Goal,
            Spin::new(config.goal_spin_speed),
            Transform::from_translation(layout.goal_position()).with_scale(Vec3::splat(layout.goal_size)),
            BoxCollider::cube(layout.goal_size),
        ))
        .id();

    let mut spawners = Vec::new();
    for (slot, position) in layout
        .spawn_points(config.crate_scale * 0.5)
        .into_iter()
        .enumerate()
    {
        let spawner = commands
            .spawn((Name::new(format!("Spawner {}", slot)), Transform::from_translation(position)))
            .id();

        // Initial board: every slot starts with its crate
        let body = spawn_crate(&mut commands, spawner, position, &config);
        commands.entity(spawner).insert(Spawner {
            body: Some(body),
            ..Spawner::new(slot, position)
        });
        cues.write(SoundCue::spawn(&mut rng.rng, &config));

        commands.spawn((
            Name::new(format!("Spawn Button {}", slot)),
            SpawnButton { spawner },
            ButtonTint::default(),
            Transform::from_translation(position + layout.button_offset).with_scale(layout.button_size),
            BoxCollider::cuboid(layout.button_size),
        ));

        spawners.push(spawner);
    }

    let start = config.player_start();
    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            Transform::from_translation(start),
            Health::new(config.player_max_health),
            SpawnPoint(start),
            CameraPivot {
                height: config.camera_height,
                pitch: 0.0,
            },
            KinematicController {
                move_speed: config.player_move_speed,
                gravity: config.gravity,
                jump_speed: config.player_jump_speed(),
                grounded: false,
                ground_height: None,
            },
            MovementInput::default(),
            PhysicsBody::default(),
            BoxCollider::cuboid(PLAYER_HALF_EXTENTS * 2.0).with_offset(PLAYER_COLLIDER_OFFSET),
        ))
        .id();

    commands.spawn((Name::new("Muzzle Flash"), MuzzleFlash::default()));

    crate::logger::log_info(&format!(
        "Level ready: {} platforms, {} spawners, goal at {:?}, player at {:?}",
        layout.platforms.len(),
        spawners.len(),
        layout.goal_position(),
        start
    ));

    commands.insert_resource(Hud::new(config.player_max_health));
    commands.insert_resource(GameState::new(player, goal, spawners));
}
