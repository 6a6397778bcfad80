//! Tunable gameplay constants.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Camera scale only; gameplay distances are in meters.
    pub pixels_per_meter: f32,
    /// Trigger magnitude above which a charge starts and at or below which it releases.
    pub trigger_threshold: f32,
    /// Aim inputs at or below this magnitude keep the previous aim direction.
    pub aim_deadzone: f32,
    /// Floor speed for projectiles in flight.
    pub projectile_min_speed: f32,
    /// Speeds at or below this are treated as "stopped" and left untouched.
    pub velocity_epsilon: f32,
    pub portal_rearm_delay: Duration,
    pub starting_lives: u32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 48.0,
            trigger_threshold: 0.1,
            aim_deadzone: 0.2,
            projectile_min_speed: 5.0,
            velocity_epsilon: 1e-3,
            portal_rearm_delay: Duration::from_millis(100),
            starting_lives: 5,
        }
    }
}
