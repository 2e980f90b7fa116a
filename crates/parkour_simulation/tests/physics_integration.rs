//! Crate physics + spawner integration tests
//!
//! Проверяем:
//! - Free-fall kinematics without ground
//! - Grounded crates never keep downward velocity
//! - Death plane frees the spawner slot
//! - One live crate per spawner, whatever the button is mashed

mod common;

use bevy::prelude::*;
use common::*;
use parkour_simulation::*;

/// Crate dropped outside the ground plane (|x| > 50)
fn spawn_loose_crate(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position).with_scale(Vec3::splat(1.5)),
            DynamicBody::from_scale(1.5, 4.0, None),
            BoxCollider::cube(1.5),
        ))
        .id()
}

#[test]
fn test_free_fall_matches_kinematics() {
    let mut app = game_app();
    let body = spawn_loose_crate(&mut app, Vec3::new(200.0, 1.5, 0.0));

    let mut previous_vy = 0.0;
    for n in 1..=30 {
        tick(&mut app, 1);
        let vy = app.world().get::<PhysicsBody>(body).unwrap().velocity.y;
        // Airborne: exactly one gravity step per tick
        assert!(
            (vy - (previous_vy - 9.8 * DT)).abs() < 1e-4,
            "tick {}: vy = {}",
            n,
            vy
        );
        previous_vy = vy;
    }

    let t = 30.0 * DT;
    let expected = 1.5 - 0.5 * 9.8 * t * t;
    let y = app.world().get::<Transform>(body).unwrap().translation.y;
    assert!((y - expected).abs() < 0.05, "y = {}, expected ≈ {}", y, expected);
}

#[test]
fn test_resting_crates_stay_put() {
    let mut app = game_app();
    let before: Vec<Vec3> = crates(&mut app)
        .into_iter()
        .map(|entity| app.world().get::<Transform>(entity).unwrap().translation)
        .collect();

    tick(&mut app, 120);

    for (entity, start) in crates(&mut app).into_iter().zip(before) {
        let body = app.world().get::<PhysicsBody>(entity).unwrap();
        let position = app.world().get::<Transform>(entity).unwrap().translation;
        assert!(body.velocity.y >= 0.0);
        assert!(position.abs_diff_eq(start, 1e-4), "{:?} drifted to {:?}", start, position);
    }
}

#[test]
fn test_landing_kills_downward_velocity() {
    let mut app = game_app();
    let body = spawn_loose_crate(&mut app, Vec3::new(-20.0, 3.0, -20.0));

    tick(&mut app, 120);

    let velocity = app.world().get::<PhysicsBody>(body).unwrap().velocity;
    let position = app.world().get::<Transform>(body).unwrap().translation;
    assert!(velocity.y >= 0.0);
    // Rests within probe epsilon of the ground
    assert!(position.y > 0.6 && position.y <= 0.85, "y = {}", position.y);
}

#[test]
fn test_death_plane_frees_slot() {
    let mut app = game_app();
    let body = spawner_body(&app, 0).unwrap();

    app.world_mut().get_mut::<Transform>(body).unwrap().translation.y = -6.0;
    tick(&mut app, 1);

    assert!(app.world().get_entity(body).is_err());
    assert_eq!(spawner_body(&app, 0), None);
    assert_eq!(crates(&mut app).len(), 3);

    // Button works again
    let slot = spawner(&app, 0);
    let button = button_of(&mut app, slot);
    app.world_mut().resource_mut::<HoveredEntity>().0 = Some(button);
    press(&mut app, PlayerAction::Primary);
    tick(&mut app, 1);

    let fresh = spawner_body(&app, 0).unwrap();
    assert_ne!(fresh, body);
    assert_eq!(crates(&mut app).len(), 4);
    assert_eq!(
        app.world().get::<DynamicBody>(fresh).unwrap().owner,
        Some(spawner(&app, 0))
    );
    let cues = last_events::<SoundCue>(&app);
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].cue, Cue::Spawn);
}

#[test]
fn test_button_never_doubles_crates() {
    let mut app = game_app();
    let original = spawner_body(&app, 0).unwrap();
    let slot = spawner(&app, 0);
    let button = button_of(&mut app, slot);
    app.world_mut().resource_mut::<HoveredEntity>().0 = Some(button);

    press(&mut app, PlayerAction::Primary);
    press(&mut app, PlayerAction::Primary);
    tick(&mut app, 1);
    press(&mut app, PlayerAction::Primary);
    tick(&mut app, 1);

    assert_eq!(spawner_body(&app, 0), Some(original));
    assert_eq!(crates(&mut app).len(), 4);
    // Button press consumed the click: nothing fired
    assert!(projectiles(&mut app).is_empty());
}

#[test]
fn test_button_highlight_follows_pointer() {
    let mut app = game_app();
    let slot = spawner(&app, 1);
    let button = button_of(&mut app, slot);

    app.world_mut().resource_mut::<HoveredEntity>().0 = Some(button);
    tick(&mut app, 1);
    assert_eq!(
        app.world().get::<ButtonTint>(button),
        Some(&ButtonTint::Highlighted)
    );

    app.world_mut().resource_mut::<HoveredEntity>().0 = None;
    tick(&mut app, 1);
    assert_eq!(app.world().get::<ButtonTint>(button), Some(&ButtonTint::Normal));
}
