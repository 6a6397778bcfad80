use bevy::prelude::*;

use crate::plugins::player::PlayerSlot;

/// A kinetic projectile in flight.
///
/// `has_hit` flips false → true exactly once, when the projectile is consumed
/// (player hit or ammo wall). Every later collision is a no-op.
#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub owner: PlayerSlot,
    has_hit: bool,
}

impl Projectile {
    pub fn new(owner: PlayerSlot) -> Self {
        Self { owner, has_hit: false }
    }

    #[inline]
    pub fn has_hit(&self) -> bool {
        self.has_hit
    }

    /// Mark as spent. Returns false if it already was.
    #[inline]
    pub fn claim_hit(&mut self) -> bool {
        !std::mem::replace(&mut self.has_hit, true)
    }
}

/// Marker: projectile should be removed from the world.
///
/// We don't despawn inside the fixed step; we mark and despawn later in PostUpdate.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// How fired projectiles are built. Without this resource weapons cannot fire.
#[derive(Resource, Debug, Clone)]
pub struct ProjectileTemplate {
    pub radius: f32,
    pub restitution: f32,
    pub color: Color,
}

impl Default for ProjectileTemplate {
    fn default() -> Self {
        Self {
            radius: 0.15,
            restitution: 0.95,
            color: Color::srgb(1.0, 0.85, 0.3),
        }
    }
}
