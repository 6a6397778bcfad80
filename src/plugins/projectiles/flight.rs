//! Flight rule: projectiles never crawl below the floor speed.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::Projectile;

/// Rescale `v` up to `min_speed` in the same direction.
///
/// Speeds at or below `epsilon` are left alone: there is no meaningful direction to keep.
#[inline]
pub fn floor_speed(v: Vec2, min_speed: f32, epsilon: f32) -> Vec2 {
    let speed = v.length();
    if speed < min_speed && speed > epsilon {
        v * (min_speed / speed)
    } else {
        v
    }
}

pub fn enforce_min_speed(
    tunables: Res<Tunables>,
    mut q: Query<(&Projectile, &mut LinearVelocity)>,
) {
    for (projectile, mut vel) in &mut q {
        if projectile.has_hit() {
            continue;
        }
        let floored = floor_speed(vel.0, tunables.projectile_min_speed, tunables.velocity_epsilon);
        if floored != vel.0 {
            vel.0 = floored;
        }
    }
}
