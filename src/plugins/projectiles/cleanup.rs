//! Structural cleanup for consumed projectiles.
//!
//! The collision pass only marks (`PendingDespawn`) and switches the collider off.
//! Despawning happens here, after the fixed step, so no other fixed-step system can
//! still have queued work for the entity.

use bevy::prelude::*;

use super::components::PendingDespawn;

pub fn despawn_spent_projectiles(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
