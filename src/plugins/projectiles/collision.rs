//! Collision resolution for projectiles (FixedPostUpdate, after Avian emits `CollisionStart`).
//!
//! One tick's contacts are resolved as a batch:
//! 1. keep pairs with exactly one projectile side,
//! 2. sort by (projectile, other) so the outcome only depends on entity identity,
//! 3. resolve at most one *effective* contact per projectile (consume or teleport).
//!
//! Per contact, first match wins:
//!
//! | other side            | effect                                              |
//! |-----------------------|-----------------------------------------------------|
//! | projectile is spent   | nothing                                             |
//! | ammo wall             | credit wall's player, flash, consume (even own shot)|
//! | same tag as owner     | nothing, projectile keeps flying                    |
//! | has `LifeCycle`       | `die()`, consume                                    |
//! | portal                | teleport to linked portal, guard the destination    |
//! | anything else         | nothing (walls bounce it physically)                |

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::ammo::{credit, AmmoWall};
use crate::plugins::deferred::{DeferredAction, DeferredActions};
use crate::plugins::flash::Flash;
use crate::plugins::lifecycle::{LifeCycle, PlayerDied};
use crate::plugins::player::{PlayerRegistry, PlayerSlot};
use crate::plugins::portals::{exit_transfer, Portal};
use crate::plugins::weapons::Weapon;

use super::components::{PendingDespawn, Projectile};

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Contact deliberately skipped (own player, guarded or unlinked portal).
    Ignored,
    /// Non-destructive contact; physics decides what happens.
    PassedThrough,
    Killed,
    Refuelled,
    Teleported,
}

impl Resolution {
    #[inline]
    fn consumes(self) -> bool {
        matches!(self, Self::Killed | Self::Refuelled)
    }

    #[inline]
    fn is_effective(self) -> bool {
        self.consumes() || self == Self::Teleported
    }
}

type ProjectileQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Projectile, &'static mut Transform, Option<&'static mut LinearVelocity>),
    Without<Portal>,
>;
type PortalQuery<'w, 's> = Query<'w, 's, (&'static mut Portal, &'static Transform), Without<Projectile>>;

pub fn resolve_projectile_collisions(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    registry: Res<PlayerRegistry>,
    mut queue: ResMut<DeferredActions>,
    mut started: MessageReader<CollisionStart>,
    mut deaths: MessageWriter<PlayerDied>,
    mut q_projectiles: ProjectileQuery,
    q_tags: Query<&PlayerSlot>,
    mut q_life: Query<(&mut LifeCycle, &PlayerSlot)>,
    mut q_portals: PortalQuery,
    q_ammo_walls: Query<&AmmoWall>,
    mut q_weapons: Query<&mut Weapon>,
    mut q_flash: Query<&mut Flash>,
    mut resolved: Local<HashSet<Entity>>,
) {
    resolved.clear();
    let now = time.elapsed();

    let mut contacts: Vec<(Entity, Entity)> = started
        .read()
        .filter_map(|ev| {
            let (t1, t2) = targets(ev);
            let p1 = q_projectiles.contains(t1.collider);
            let p2 = q_projectiles.contains(t2.collider);
            if p1 == p2 {
                return None; // must be exactly one projectile
            }
            let (projectile, other) = if p1 { (t1, t2) } else { (t2, t1) };
            Some((projectile.collider, other.gameplay_owner()))
        })
        .collect();
    contacts.sort_unstable();
    contacts.dedup();

    for (projectile_e, other) in contacts {
        if resolved.contains(&projectile_e) {
            continue;
        }
        let Ok((mut projectile, mut tf, mut vel)) = q_projectiles.get_mut(projectile_e) else {
            continue;
        };
        if projectile.has_hit() {
            continue;
        }

        let resolution = if let Ok(wall) = q_ammo_walls.get(other) {
            projectile.claim_hit();
            credit(wall, &registry, &mut q_weapons);
            if let Ok(mut flash) = q_flash.get_mut(other) {
                flash.trigger(other, now, &mut queue);
            }
            Resolution::Refuelled
        } else if q_tags.get(other).is_ok_and(|tag| *tag == projectile.owner) {
            Resolution::Ignored
        } else if let Ok((mut life, slot)) = q_life.get_mut(other) {
            projectile.claim_hit();
            if life.die() {
                deaths.write(PlayerDied {
                    victim: other,
                    slot: *slot,
                    killer: projectile.owner,
                });
            } else {
                debug!("{slot} hit while already dead");
            }
            Resolution::Killed
        } else if q_portals.contains(other) {
            let Some(vel) = vel.as_deref_mut() else {
                warn!("Projectile {projectile_e} has no LinearVelocity; teleport skipped");
                continue;
            };
            teleport(other, &mut q_portals, &mut tf, vel, now, &tunables, &mut queue, &mut q_flash)
        } else {
            Resolution::PassedThrough
        };

        debug!("Projectile {projectile_e} vs {other}: {resolution:?}");

        if resolution.consumes() {
            if let Some(vel) = vel.as_deref_mut() {
                vel.0 = Vec2::ZERO;
            }
            commands
                .entity(projectile_e)
                .insert((PendingDespawn, ColliderDisabled));
        }
        if resolution.is_effective() {
            resolved.insert(projectile_e);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn teleport(
    portal_e: Entity,
    q_portals: &mut PortalQuery,
    tf: &mut Transform,
    vel: &mut LinearVelocity,
    now: std::time::Duration,
    tunables: &Tunables,
    queue: &mut DeferredActions,
    q_flash: &mut Query<&mut Flash>,
) -> Resolution {
    let Ok((source, _)) = q_portals.get(portal_e) else {
        return Resolution::PassedThrough;
    };
    let source = *source;

    if source.guarded {
        return Resolution::Ignored;
    }
    let Some(dest_e) = source.link else {
        warn!("Portal {portal_e} has no linked portal");
        return Resolution::Ignored;
    };
    let Ok((mut dest, dest_tf)) = q_portals.get_mut(dest_e) else {
        warn!("Portal {portal_e} is linked to {dest_e}, which is not a portal");
        return Resolution::Ignored;
    };

    let transfer = exit_transfer(&source, dest_tf.translation.truncate(), dest.facing, vel.0);
    dest.guarded = true;

    tf.translation.x = transfer.position.x;
    tf.translation.y = transfer.position.y;
    vel.0 = transfer.velocity;

    queue.schedule(now, tunables.portal_rearm_delay, DeferredAction::rearm(portal_e, dest_e));
    for e in [portal_e, dest_e] {
        if let Ok(mut flash) = q_flash.get_mut(e) {
            flash.trigger(e, now, queue);
        }
    }

    Resolution::Teleported
}
