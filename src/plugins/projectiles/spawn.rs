//! Spawn consumer: build projectiles from requests.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};

use super::components::{Projectile, ProjectileTemplate};
use super::messages::SpawnProjectileRequest;

#[inline]
pub fn projectile_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Projectile,
        [Layer::World, Layer::Player, Layer::Portal, Layer::AmmoWall],
    )
}

pub fn spawn_projectiles(
    mut commands: Commands,
    template: Option<Res<ProjectileTemplate>>,
    mut reader: MessageReader<SpawnProjectileRequest>,
) {
    let Some(template) = template else {
        // Weapons already refuse to fire without a template; anything left is dropped.
        for req in reader.read() {
            warn!("Dropping projectile from {}: no ProjectileTemplate", req.owner);
        }
        return;
    };

    for req in reader.read() {
        let restitution = Restitution::new(template.restitution).with_combine_rule(CoefficientCombine::Max);

        commands.spawn((
            Name::new(format!("Projectile({})", req.owner)),
            Projectile::new(req.owner),
            Sprite {
                color: template.color,
                custom_size: Some(Vec2::splat(template.radius * 2.0)),
                ..default()
            },
            Transform::from_translation(req.position.extend(2.0)),
            (
                RigidBody::Dynamic,
                Collider::circle(template.radius),
                projectile_layers(),
                restitution,
                Friction::ZERO,
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity(req.velocity),
                // Opt-in collision events: Avian only emits CollisionStart if one collider has this marker.
                CollisionEventsEnabled,
            ),
            DespawnOnExit(GameState::InGame),
        ));
    }
}
