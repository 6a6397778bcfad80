//! Flash feedback trigger.
//!
//! Walls that react to projectiles (portals, ammo walls) "light up" briefly. The core only
//! owns the on/off fact and its timer; drawing it is the renderer's job.

use std::time::Duration;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::deferred::{release_due_actions, ActionDue, DeferredAction, DeferredActions};

#[derive(Component, Debug, Clone)]
pub struct Flash {
    pub lit: bool,
    pub duration: Duration,
}

impl Flash {
    pub fn new(duration: Duration) -> Self {
        Self { lit: false, duration }
    }

    /// Light up and (re)start the timer. A pending reset is superseded.
    pub fn trigger(&mut self, entity: Entity, now: Duration, queue: &mut DeferredActions) {
        self.lit = true;
        queue.schedule(now, self.duration, DeferredAction::EndFlash(entity));
    }
}

pub fn end_flashes(mut due: MessageReader<ActionDue>, mut q: Query<&mut Flash>) {
    for ActionDue(action) in due.read() {
        let DeferredAction::EndFlash(e) = *action else { continue };
        if let Ok(mut flash) = q.get_mut(e) {
            flash.lit = false;
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedPreUpdate,
        end_flashes
            .after(release_due_actions)
            .run_if(in_state(GameState::InGame)),
    );
}
