//! Deferred one-shot tasks
//!
//! Replaces fire-and-forget `invoke(fn, delay)` callbacks with data:
//! a min-heap of (due time, sequence) → action, drained at the start of every
//! fixed tick. Actions re-check their target before running, so a task whose
//! target is already gone (projectile destroyed by a hit) is a no-op.

use bevy::prelude::*;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::components::MuzzleFlash;
use crate::shooting::Projectile;
use crate::GameSet;

/// Tasks due within this window of "now" fire this tick
///
/// Fixed ticks are whole nanoseconds, so 1/60 s lands on either 16_666_666
/// or 16_666_667 ns depending on how the host rounds it. N ticks can then
/// sum a few ns short of N/60 s, and without slack a timer would fire one
/// tick late.
pub const TIMER_SLACK: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredAction {
    /// Hides the flash unless it was shown again after this task was queued
    HideMuzzleFlash { flash: Entity, generation: u32 },
    DespawnProjectile(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledTask {
    due: Duration,
    /// Insertion order; breaks ties between tasks due at the same instant
    seq: u64,
    action: DeferredAction,
}

impl Ord for ScheduledTask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for ScheduledTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending deferred tasks (earliest first)
#[derive(Resource, Debug, Default)]
pub struct DeferredTasks {
    queue: BinaryHeap<Reverse<ScheduledTask>>,
    next_seq: u64,
}

impl DeferredTasks {
    pub fn schedule(&mut self, now: Duration, delay: Duration, action: DeferredAction) {
        let task = ScheduledTask {
            due: now + delay,
            seq: self.next_seq,
            action,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(task));
    }

    /// Convenience for float delays from config (negative/NaN → immediate)
    pub fn schedule_secs(&mut self, now: Duration, delay_secs: f32, action: DeferredAction) {
        let delay = Duration::try_from_secs_f32(delay_secs).unwrap_or(Duration::ZERO);
        self.schedule(now, delay, action);
    }

    /// Pops every task due at `now` (within `TIMER_SLACK`), in due order
    pub fn drain_due(&mut self, now: Duration) -> Vec<DeferredAction> {
        let horizon = now + TIMER_SLACK;
        let mut due = Vec::new();

        while self
            .queue
            .peek()
            .is_some_and(|Reverse(task)| task.due <= horizon)
        {
            if let Some(Reverse(task)) = self.queue.pop() {
                due.push(task.action);
            }
        }

        due
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// System: run every due task whose target is still valid
pub fn run_deferred_tasks(
    mut commands: Commands,
    time: Res<Time>,
    mut tasks: ResMut<DeferredTasks>,
    projectiles: Query<(), With<Projectile>>,
    mut flashes: Query<&mut MuzzleFlash>,
) {
    for action in tasks.drain_due(time.elapsed()) {
        match action {
            DeferredAction::HideMuzzleFlash { flash, generation } => {
                if let Ok(mut muzzle) = flashes.get_mut(flash) {
                    if muzzle.generation == generation {
                        muzzle.visible = false;
                    }
                }
            }
            DeferredAction::DespawnProjectile(entity) => {
                // Already destroyed by a hit → nothing to do
                if !projectiles.contains(entity) {
                    continue;
                }
                commands.entity(entity).despawn();
                crate::logger::log(&format!("Projectile {:?} expired", entity));
            }
        }
    }
}

/// Deferred task plugin (Prepare set, after the collision snapshot)
pub struct DeferredTasksPlugin;

impl Plugin for DeferredTasksPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DeferredTasks>();
        app.add_systems(
            FixedUpdate,
            run_deferred_tasks
                .in_set(GameSet::Prepare)
                .after(crate::physics::probe::rebuild_collision_snapshot),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn hide() -> DeferredAction {
        DeferredAction::HideMuzzleFlash {
            flash: Entity::from_raw(9),
            generation: 0,
        }
    }

    #[test]
    fn test_nothing_due_early() {
        let mut tasks = DeferredTasks::default();
        tasks.schedule(ms(0), ms(50), hide());

        assert!(tasks.drain_due(ms(10)).is_empty());
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks.drain_due(ms(50)), vec![hide()]);
    }

    #[test]
    fn test_drains_in_due_order() {
        let mut tasks = DeferredTasks::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);

        tasks.schedule(ms(0), ms(2000), DeferredAction::DespawnProjectile(a));
        tasks.schedule(ms(100), ms(50), hide());
        tasks.schedule(ms(500), ms(1000), DeferredAction::DespawnProjectile(b));

        let due = tasks.drain_due(ms(3000));
        assert_eq!(
            due,
            vec![
                hide(),
                DeferredAction::DespawnProjectile(b),
                DeferredAction::DespawnProjectile(a),
            ]
        );
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_same_due_keeps_insertion_order() {
        let mut tasks = DeferredTasks::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);

        tasks.schedule(ms(0), ms(10), DeferredAction::DespawnProjectile(a));
        tasks.schedule(ms(0), ms(10), DeferredAction::DespawnProjectile(b));

        assert_eq!(
            tasks.drain_due(ms(10)),
            vec![
                DeferredAction::DespawnProjectile(a),
                DeferredAction::DespawnProjectile(b),
            ]
        );
    }

    #[test]
    fn test_slack_absorbs_tick_rounding_down() {
        let mut tasks = DeferredTasks::default();
        let tick = Duration::from_nanos(16_666_666);
        tasks.schedule_secs(Duration::ZERO, 2.0, hide());

        // 120 truncated ticks end 80 ns before the 2 s mark
        assert_eq!(tick * 120, Duration::from_nanos(1_999_999_920));
        assert!(tasks.drain_due(tick * 119).is_empty());
        assert_eq!(tasks.drain_due(tick * 120), vec![hide()]);
    }

    #[test]
    fn test_slack_keeps_rounded_up_ticks_on_time() {
        let mut tasks = DeferredTasks::default();
        let tick = Duration::from_nanos(16_666_667);
        tasks.schedule_secs(Duration::ZERO, 2.0, hide());

        assert!(tick * 120 > Duration::from_secs(2));
        assert!(tasks.drain_due(tick * 119).is_empty());
        assert_eq!(tasks.drain_due(tick * 120), vec![hide()]);
    }

    #[test]
    fn test_hide_skips_reshown_flash() {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world.init_resource::<DeferredTasks>();

        let flash = world
            .spawn(MuzzleFlash {
                visible: true,
                generation: 2,
            })
            .id();
        let stale = DeferredAction::HideMuzzleFlash {
            flash,
            generation: 1,
        };
        world
            .resource_mut::<DeferredTasks>()
            .schedule(Duration::ZERO, Duration::ZERO, stale);

        world.run_system_once(run_deferred_tasks).unwrap();
        assert!(world.get::<MuzzleFlash>(flash).unwrap().visible);

        let current = DeferredAction::HideMuzzleFlash {
            flash,
            generation: 2,
        };
        world
            .resource_mut::<DeferredTasks>()
            .schedule(Duration::ZERO, Duration::ZERO, current);
        world.run_system_once(run_deferred_tasks).unwrap();
        assert!(!world.get::<MuzzleFlash>(flash).unwrap().visible);
    }

    #[test]
    fn test_negative_delay_is_immediate() {
        let mut tasks = DeferredTasks::default();
        tasks.schedule_secs(ms(100), -1.0, hide());
        assert_eq!(tasks.drain_due(ms(100)).len(), 1);
    }
}
