//! World plugin: builds the duel arena on entering `InGame`.
//!
//! ```text
//!   ┌──────────[ammo P1]──────────────────[ammo P2]──────────┐
//!   │                                        B ◄             │
//!   │  P1                                             P2     │
//!   │              ► A                                       │
//!   └────────────────────────────────────────────────────────┘
//! ```
//!
//! All distances are meters.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::ammo::{spawn_ammo_wall, AmmoWall};
use crate::plugins::player::{spawn_player, PlayerRegistry, PlayerSlot};
use crate::plugins::portals::spawn_portal_pair;

pub const ARENA_HALF: Vec2 = Vec2::new(12.0, 6.5);
const WALL_THICKNESS: f32 = 0.5;

pub const SPAWN_POINTS: [Vec2; 2] = [Vec2::new(-8.5, 0.75), Vec2::new(8.5, 0.75)];

pub fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InGame),
        (spawn_arena, spawn_combatants, spawn_portals, spawn_ammo_walls),
    );
}

#[inline]
pub fn wall_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player, Layer::Projectile])
}

fn spawn_arena(mut commands: Commands) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let t = WALL_THICKNESS;
    let outer_w = ARENA_HALF.x * 2.0 + t * 2.0;

    let mut spawn_wall = |name: &str, pos: Vec2, size: Vec2| {
        commands.spawn((
            Name::new(name.to_owned()),
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            Restitution::new(1.0),
            Friction::ZERO,
            wall_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    };

    spawn_wall(
        "WallTop",
        Vec2::new(0.0, ARENA_HALF.y + t * 0.5),
        Vec2::new(outer_w, t),
    );
    spawn_wall(
        "WallBottom",
        Vec2::new(0.0, -ARENA_HALF.y - t * 0.5),
        Vec2::new(outer_w, t),
    );
    spawn_wall(
        "WallLeft",
        Vec2::new(-ARENA_HALF.x - t * 0.5, 0.0),
        Vec2::new(t, ARENA_HALF.y * 2.0),
    );
    spawn_wall(
        "WallRight",
        Vec2::new(ARENA_HALF.x + t * 0.5, 0.0),
        Vec2::new(t, ARENA_HALF.y * 2.0),
    );
}

/// Spawn both players and (re)build the registry for this match.
fn spawn_combatants(mut commands: Commands, mut registry: ResMut<PlayerRegistry>) {
    registry.clear();
    for slot in PlayerSlot::ALL {
        spawn_player(&mut commands, &mut registry, slot, SPAWN_POINTS[slot.index()]);
    }
}

fn spawn_portals(mut commands: Commands) {
    spawn_portal_pair(
        &mut commands,
        (Vec2::new(-4.0, -3.0), Dir2::X),
        (Vec2::new(4.0, 3.0), Dir2::NEG_X),
    );
}

fn spawn_ammo_walls(mut commands: Commands) {
    let size = Vec2::new(3.0, 0.3);
    let y = ARENA_HALF.y - size.y * 0.5;

    spawn_ammo_wall(&mut commands, AmmoWall::for_player(PlayerSlot::One), Vec2::new(-6.0, y), size);
    spawn_ammo_wall(&mut commands, AmmoWall::for_player(PlayerSlot::Two), Vec2::new(6.0, y), size);
}
