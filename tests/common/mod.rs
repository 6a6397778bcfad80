//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `arena_duel::game::configure_headless` to install gameplay plugins.

#![allow(dead_code)]

use bevy::asset::AssetPlugin;
use bevy::ecs::message::{Message, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    arena_duel::game::configure_headless(&mut app);
    app
}

/// Headless app with the arena already built (OnEnter(InGame) has run).
pub fn app_in_game() -> App {
    let mut app = app_headless();
    app.update();
    app.update();
    app
}

/// Run one system against the app's world and apply its commands.
pub fn run_once<T, Out, Marker>(app: &mut App, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let world = app.world_mut();
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Drop every buffered message of type `M`.
pub fn clear_messages<M: Message>(app: &mut App) {
    app.world_mut().resource_mut::<Messages<M>>().clear();
}
