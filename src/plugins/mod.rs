//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod ammo;
pub mod core;
pub mod deferred;
pub mod flash;
pub mod hud;
pub mod lifecycle;
pub mod physics;
pub mod player;
pub mod portals;
pub mod projectiles;
pub mod scoring;
pub mod weapons;
pub mod world;

// Render-only
pub mod camera;
pub mod input;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    deferred::plugin(app);
    player::plugin(app);
    weapons::plugin(app);
    app.add_plugins(ProjectilesPlugin);
    flash::plugin(app);
    portals::plugin(app);
    lifecycle::plugin(app);
    scoring::plugin(app);
    hud::plugin(app);
    world::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    input::plugin(app);
}

