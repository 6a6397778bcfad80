//! Projectiles plugin: **message-based producer → consumer** spawning + batched collision
//! resolution.
//!
//! # Data flow (big picture)
//! ```text
//!   FixedUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producer: weapons::systems::update_weapons                            │
//!│      - reads: ShooterInput, WeaponConfig, Transform                        │
//!│      - writes: SpawnProjectileRequest message                              │
//!│                                                                            │
//!│  (B) Consumer: spawn_projectiles                                           │
//!│      - reads: SpawnProjectileRequest, ProjectileTemplate                   │
//!│      - spawns: Projectile + body + collider + LinearVelocity               │
//!│                                                                            │
//!│  (C) enforce_min_speed                                                     │
//!│      - mutates: LinearVelocity (floor speed)                               │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (D) Physics emits CollisionStart messages (Avian)                         │
//!│                                                                            │
//!│  (E) resolve_projectile_collisions                                         │
//!│      - kills (LifeCycle::die + PlayerDied), refuels (AmmoWall),            │
//!│        teleports (Portal)                                                  │
//!│      - marks consumed projectiles PendingDespawn                           │
//!│      - dedupe: Projectile::has_hit + one effective contact per tick        │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   PostUpdate: despawn_spent_projectiles
//! ```
//!
//! # Why "Messages" instead of spawning from the weapon system?
//! Weapons only enqueue intent (SpawnProjectileRequest). The consumer is the single place
//! that knows how a projectile is assembled, and it is the one that degrades gracefully
//! when the template is missing.

pub mod cleanup;
pub mod collision;
pub mod components;
pub mod flight;
pub mod messages;
pub mod spawn;

pub use components::{PendingDespawn, Projectile, ProjectileTemplate};
pub use messages::SpawnProjectileRequest;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::weapons::systems::update_weapons;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ProjectileTemplate::default())
            .add_message::<SpawnProjectileRequest>();

        // Fixed pipeline: fire -> spawn, then keep everything above floor speed.
        app.add_systems(
            FixedUpdate,
            (
                spawn::spawn_projectiles.after(update_weapons),
                flight::enforce_min_speed,
            )
                .run_if(in_state(GameState::InGame)),
        );

        // Fixed collision pipeline
        app.add_systems(
            FixedPostUpdate,
            collision::resolve_projectile_collisions
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            PostUpdate,
            cleanup::despawn_spent_projectiles.run_if(in_state(GameState::InGame)),
        );
    }
}
