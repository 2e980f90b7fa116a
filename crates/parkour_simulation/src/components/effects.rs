//! Short-lived visual state the renderer mirrors

use bevy::prelude::*;

/// Muzzle flash quad on the gun barrel
///
/// Shown on fire / rocket jump, hidden again by a deferred task.
/// Each show bumps `generation`; a hide queued for an older show is ignored,
/// so every shot keeps its flash for the full duration.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct MuzzleFlash {
    pub visible: bool,
    pub generation: u32,
}

impl MuzzleFlash {
    /// Makes the flash visible, returns the generation a hide must match
    pub fn show(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.visible = true;
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_bumps_generation() {
        let mut flash = MuzzleFlash::default();
        assert_eq!(flash.show(), 1);
        assert_eq!(flash.show(), 2);
        assert!(flash.visible);
    }
}
