//! Core plugin: shared resources, the fixed simulation rate and global settings.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

/// Simulation ticks per second. Every combat rule runs on this clock.
pub const TICK_HZ: f64 = 50.0;

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default())
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}
