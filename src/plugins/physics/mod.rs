//! Physics plugin: Avian in meters, top-down (no gravity).

use avian2d::prelude::*;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    // Gameplay distances are already meters, so Avian's default length unit fits.
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity(Vec2::ZERO));
}
