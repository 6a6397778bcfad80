//! Player life-cycle: Alive ⇄ Dead, with optional delayed respawn.
//!
//! ```text
//!   FixedPostUpdate                                   FixedPreUpdate (later tick)
//!   collision: LifeCycle::die() ──► PlayerDied ──► apply_deaths ──► schedule Respawn
//!                                        │                              │
//!                                        └──► scoring::tally_deaths     ▼
//!                                                          ActionDue(Respawn) ──► apply_respawns
//! ```
//!
//! `die()` flips the state in place, inside the collision pass, so a second projectile
//! arriving in the same batch sees a dead player and cannot produce a second death.
//! The structural side effects (disabling collision, hiding) are applied afterwards.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::deferred::{release_due_actions, ActionDue, DeferredAction, DeferredActions};
use crate::plugins::player::{Incapacitated, PlayerSlot};
use crate::plugins::weapons::Weapon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
}

#[derive(Component, Debug, Clone, Default)]
pub struct LifeCycle {
    state: LifeState,
    /// Where respawns land. Captured from the transform on first activation if unset.
    pub respawn_position: Option<Vec2>,
    pending_respawn_at: Option<Duration>,
}

impl LifeCycle {
    pub fn with_respawn_position(position: Vec2) -> Self {
        Self {
            respawn_position: Some(position),
            ..default()
        }
    }

    #[inline]
    pub fn state(&self) -> LifeState {
        self.state
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == LifeState::Alive
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state == LifeState::Dead
    }

    #[inline]
    pub fn pending_respawn_at(&self) -> Option<Duration> {
        self.pending_respawn_at
    }

    /// Alive → Dead. Returns false (and changes nothing) when already dead.
    pub fn die(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        self.state = LifeState::Dead;
        true
    }

    /// Dead → Alive. Returns false when already alive.
    pub fn respawn(&mut self) -> bool {
        self.pending_respawn_at = None;
        if self.is_alive() {
            return false;
        }
        self.state = LifeState::Alive;
        true
    }
}

#[derive(Component, Debug, Clone)]
pub struct LifeConfig {
    pub respawn_on_death: bool,
    pub respawn_delay: Duration,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            respawn_on_death: true,
            respawn_delay: Duration::from_secs(2),
        }
    }
}

/// Written exactly once per Alive → Dead transition.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerDied {
    pub victim: Entity,
    pub slot: PlayerSlot,
    pub killer: PlayerSlot,
}

/// Remember where each player first appeared, unless a respawn point was configured.
pub fn capture_respawn_points(mut q: Query<(&Transform, &mut LifeCycle), Added<LifeCycle>>) {
    for (tf, mut life) in &mut q {
        if life.respawn_position.is_none() {
            life.respawn_position = Some(tf.translation.truncate());
        }
    }
}

/// Switch dead players off and queue their respawn.
pub fn apply_deaths(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut queue: ResMut<DeferredActions>,
    mut deaths: MessageReader<PlayerDied>,
    mut q: Query<(
        &Name,
        &LifeConfig,
        &mut LifeCycle,
        &mut Visibility,
        Option<&mut Weapon>,
        Option<&mut LinearVelocity>,
    )>,
) {
    let now = time.elapsed();

    for death in deaths.read() {
        let Ok((name, config, mut life, mut vis, weapon, vel)) = q.get_mut(death.victim) else {
            continue;
        };

        info!("{name} was killed by {}", death.killer);

        commands
            .entity(death.victim)
            .insert((Incapacitated, ColliderDisabled));
        *vis = Visibility::Hidden;
        if let Some(mut weapon) = weapon {
            weapon.cancel_charge();
        }
        if let Some(mut vel) = vel {
            vel.0 = Vec2::ZERO;
        }

        if config.respawn_on_death {
            let due = queue.schedule(now, config.respawn_delay, DeferredAction::Respawn(death.victim));
            life.pending_respawn_at = Some(due);
        } else {
            info!("{name} will not respawn");
        }
    }
}

/// Bring a player back at its respawn point with everything re-enabled.
pub fn revive(
    commands: &mut Commands,
    entity: Entity,
    life: &mut LifeCycle,
    tf: &mut Transform,
    vis: &mut Visibility,
) {
    life.respawn();
    if let Some(p) = life.respawn_position {
        tf.translation.x = p.x;
        tf.translation.y = p.y;
    }
    *vis = Visibility::Visible;
    commands
        .entity(entity)
        .remove::<(Incapacitated, ColliderDisabled)>();
}

pub fn apply_respawns(
    mut commands: Commands,
    mut due: MessageReader<ActionDue>,
    mut q: Query<(&Name, &mut LifeCycle, &mut Transform, &mut Visibility)>,
) {
    for ActionDue(action) in due.read() {
        let DeferredAction::Respawn(e) = *action else { continue };
        let Ok((name, mut life, mut tf, mut vis)) = q.get_mut(e) else {
            continue;
        };
        if !life.is_dead() {
            continue;
        }

        revive(&mut commands, e, &mut life, &mut tf, &mut vis);
        info!("{name} respawned at {}", tf.translation.truncate());
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<PlayerDied>()
        .add_systems(
            FixedPreUpdate,
            (
                capture_respawn_points,
                apply_respawns.after(release_due_actions),
            )
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            apply_deaths
                .after(crate::plugins::projectiles::collision::resolve_projectile_collisions)
                .run_if(in_state(GameState::InGame)),
        );
}
