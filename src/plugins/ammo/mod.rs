//! Ammo walls: any projectile that touches one is consumed and refuels a fixed player.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::flash::Flash;
use crate::plugins::player::{PlayerRegistry, PlayerSlot};
use crate::plugins::weapons::Weapon;

pub const AMMO_WALL_FLASH: Duration = Duration::from_millis(200);

#[derive(Component, Debug, Clone, Copy)]
pub struct AmmoWall {
    /// Who gets the ammo, regardless of who fired.
    pub player: PlayerSlot,
    pub amount: u32,
}

impl AmmoWall {
    pub fn for_player(player: PlayerSlot) -> Self {
        Self { player, amount: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credit {
    /// New ammo count of the credited player.
    Credited(u32),
    NoSuchPlayer,
    NoWeapon,
}

/// Hand the wall's ammo to its configured player.
pub fn credit(wall: &AmmoWall, registry: &PlayerRegistry, weapons: &mut Query<&mut Weapon>) -> Credit {
    let Some(target) = registry.get(wall.player) else {
        warn!("Ammo wall target {} is not registered", wall.player);
        return Credit::NoSuchPlayer;
    };
    let Ok(mut weapon) = weapons.get_mut(target) else {
        warn!("Ammo wall target {} has no weapon", wall.player);
        return Credit::NoWeapon;
    };

    let total = weapon.add_ammo(wall.amount);
    debug!("Ammo wall gave {} to {} (now {total})", wall.amount, wall.player);
    Credit::Credited(total)
}

#[inline]
pub fn ammo_wall_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::AmmoWall, [Layer::Projectile, Layer::Player])
}

pub fn spawn_ammo_wall(commands: &mut Commands, wall: AmmoWall, position: Vec2, size: Vec2) -> Entity {
    commands
        .spawn((
            Name::new(format!("AmmoWall({})", wall.player)),
            wall,
            Flash::new(AMMO_WALL_FLASH),
            Sprite {
                color: Color::srgb(0.3, 0.8, 0.35),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(position.extend(0.5)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            ammo_wall_layers(),
            CollisionEventsEnabled,
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}
