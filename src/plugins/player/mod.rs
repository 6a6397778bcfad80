//! Player plugin: identity, input slots and the slot → entity registry.
//!
//! Movement and device assignment live outside the combat core. This module only
//! defines what the rest of the core needs to know about a combatant:
//! - `PlayerSlot` is both the player id and the projectile ownership tag.
//! - `ShooterInput` is written by whatever samples the controller.
//! - `Incapacitated` marks a player whose controllers are switched off (dead).

use std::fmt;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::lifecycle::{LifeConfig, LifeCycle};
use crate::plugins::weapons::{Weapon, WeaponConfig};

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::One => "Player 1",
            Self::Two => "Player 2",
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Player;

/// Latest controller sample for one player.
///
/// `aim` magnitude is in [0, 1]; `trigger` is the analog trigger in [0, 1].
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ShooterInput {
    pub aim: Vec2,
    pub trigger: f32,
}

/// Controllers disabled. Present exactly while the player is dead.
#[derive(Component, Debug, Clone, Copy)]
pub struct Incapacitated;

/// Explicit slot → entity lookup, filled when players are spawned.
#[derive(Resource, Debug, Default, Clone)]
pub struct PlayerRegistry {
    slots: [Option<Entity>; 2],
}

impl PlayerRegistry {
    pub fn register(&mut self, slot: PlayerSlot, entity: Entity) {
        if let Some(previous) = self.slots[slot.index()].replace(entity) {
            if previous != entity {
                debug!("{slot} re-registered: {previous:?} -> {entity:?}");
            }
        }
    }

    #[inline]
    pub fn get(&self, slot: PlayerSlot) -> Option<Entity> {
        self.slots[slot.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerSlot, Entity)> + '_ {
        PlayerSlot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|e| (slot, e)))
    }

    pub fn clear(&mut self) {
        self.slots = [None, None];
    }
}

pub const PLAYER_RADIUS: f32 = 0.5;

#[inline]
pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Player,
        [Layer::World, Layer::Projectile, Layer::AmmoWall],
    )
}

/// Spawn a combatant and register it under `slot`.
pub fn spawn_player(
    commands: &mut Commands,
    registry: &mut PlayerRegistry,
    slot: PlayerSlot,
    position: Vec2,
) -> Entity {
    let color = match slot {
        PlayerSlot::One => Color::srgb(0.2, 0.75, 0.9),
        PlayerSlot::Two => Color::srgb(0.95, 0.45, 0.25),
    };
    let config = WeaponConfig::default();

    let e = commands
        .spawn((
            Name::new(slot.label()),
            Player,
            slot,
            ShooterInput::default(),
            (Weapon::new(&config), config),
            (LifeCycle::with_respawn_position(position), LifeConfig::default()),
            Sprite {
                color,
                custom_size: Some(Vec2::splat(PLAYER_RADIUS * 2.0)),
                ..default()
            },
            Transform::from_translation(position.extend(1.0)),
            Visibility::Visible,
            (
                RigidBody::Kinematic,
                Collider::circle(PLAYER_RADIUS),
                player_layers(),
                LinearVelocity::ZERO,
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    registry.register(slot, e);
    info!("{slot} spawned at {position}");
    e
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerRegistry>();
}
