//! Portals: paired teleport endpoints for projectiles.
//!
//! Each endpoint stores its partner's `Entity`; the ECS world is the arena, so there is no
//! ownership cycle and either end can be despawned or reset independently.
//!
//! Loop prevention:
//! - Entering A arms the guard on the **destination** B, not on A.
//! - A guarded portal ignores projectiles.
//! - Both guards clear after `Tunables::portal_rearm_delay`, long enough for the projectile
//!   to leave B's collider. Two adjacent portals therefore cannot ping-pong a projectile.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::deferred::{release_due_actions, ActionDue, DeferredAction};
use crate::plugins::flash::Flash;

pub const PORTAL_FLASH: Duration = Duration::from_millis(100);

#[derive(Component, Debug, Clone, Copy)]
pub struct Portal {
    pub link: Option<Entity>,
    /// Exit direction when a projectile leaves through this portal.
    pub facing: Dir2,
    /// Distance in front of the exit portal where the projectile reappears.
    pub teleport_offset: f32,
    /// Re-aim the velocity along the exit facing (keeping speed) instead of keeping it as is.
    pub maintain_velocity: bool,
    pub flip_direction: bool,
    pub guarded: bool,
}

impl Default for Portal {
    fn default() -> Self {
        Self {
            link: None,
            facing: Dir2::X,
            teleport_offset: 1.0,
            maintain_velocity: true,
            flip_direction: false,
            guarded: false,
        }
    }
}

impl Portal {
    pub fn facing(facing: Dir2) -> Self {
        Self { facing, ..default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Where a projectile entering `source` reappears, and how fast.
///
/// Offset/flip/velocity policy come from the portal being entered; position and facing
/// come from the exit.
pub fn exit_transfer(source: &Portal, exit_position: Vec2, exit_facing: Dir2, velocity: Vec2) -> Transfer {
    let exit_dir = if source.flip_direction { -exit_facing } else { exit_facing };

    let velocity = if source.maintain_velocity {
        exit_dir * velocity.length()
    } else {
        velocity
    };

    Transfer {
        position: exit_position + exit_dir * source.teleport_offset,
        velocity,
    }
}

pub const PORTAL_SIZE: Vec2 = Vec2::new(0.4, 2.0);

#[inline]
pub fn portal_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Portal, [Layer::Projectile])
}

fn portal_bundle(name: &str, portal: Portal, position: Vec2) -> impl Bundle {
    (
        Name::new(name.to_owned()),
        portal,
        Flash::new(PORTAL_FLASH),
        Sprite {
            color: Color::srgb(0.2, 0.9, 0.95),
            custom_size: Some(PORTAL_SIZE),
            ..default()
        },
        Transform::from_translation(position.extend(0.5)),
        RigidBody::Static,
        Collider::rectangle(PORTAL_SIZE.x, PORTAL_SIZE.y),
        Sensor,
        portal_layers(),
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    )
}

/// Spawn two portals linked to each other.
pub fn spawn_portal_pair(
    commands: &mut Commands,
    a: (Vec2, Dir2),
    b: (Vec2, Dir2),
) -> (Entity, Entity) {
    let ea = commands.spawn_empty().id();
    let eb = commands.spawn_empty().id();

    let portal_a = Portal { link: Some(eb), ..Portal::facing(a.1) };
    let portal_b = Portal { link: Some(ea), ..Portal::facing(b.1) };

    commands.entity(ea).insert(portal_bundle("PortalA", portal_a, a.0));
    commands.entity(eb).insert(portal_bundle("PortalB", portal_b, b.0));
    (ea, eb)
}

/// Clear both guards of a pair once the re-arm delay has passed.
pub fn rearm_portals(mut due: MessageReader<ActionDue>, mut q: Query<&mut Portal>) {
    for ActionDue(action) in due.read() {
        let DeferredAction::RearmPortals(a, b) = *action else { continue };
        for e in [a, b] {
            if let Ok(mut portal) = q.get_mut(e) {
                portal.guarded = false;
            }
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedPreUpdate,
        rearm_portals
            .after(release_due_actions)
            .run_if(in_state(GameState::InGame)),
    );
}
