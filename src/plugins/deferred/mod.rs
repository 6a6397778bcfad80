//! Deferred actions: one-shot callbacks keyed by fire time.
//!
//! Respawn delays, portal re-arming and flash resets are not timers owned by the entity.
//! They are entries in a single queue that is polled once per fixed step:
//!
//! ```text
//!   owner module            DeferredActions               owner module
//!   schedule(now, d, a) ──► [ (due, seq, action) ... ] ──► ActionDue(a) ──► handle variant
//!                               release_due_actions (FixedPreUpdate)
//! ```
//!
//! Scheduling an action whose key is already pending replaces the pending entry,
//! so a repeated trigger restarts the delay instead of stacking callbacks.

use std::time::Duration;

use bevy::prelude::*;

use crate::common::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeferredAction {
    Respawn(Entity),
    /// Clear the teleport guard on both endpoints of a portal pair.
    RearmPortals(Entity, Entity),
    EndFlash(Entity),
}

impl DeferredAction {
    /// Portal pairs are unordered: A→B and B→A share one pending re-arm.
    pub fn rearm(a: Entity, b: Entity) -> Self {
        if a <= b {
            Self::RearmPortals(a, b)
        } else {
            Self::RearmPortals(b, a)
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    due: Duration,
    seq: u64,
    action: DeferredAction,
}

#[derive(Resource, Debug, Default)]
pub struct DeferredActions {
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl DeferredActions {
    /// Queue `action` to fire at `now + delay`, superseding a pending equal action.
    pub fn schedule(&mut self, now: Duration, delay: Duration, action: DeferredAction) -> Duration {
        self.cancel(action);

        let due = now + delay;
        self.pending.push(Scheduled { due, seq: self.next_seq, action });
        self.next_seq += 1;
        due
    }

    /// Drop a pending action. Returns whether anything was removed.
    pub fn cancel(&mut self, action: DeferredAction) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.action != action);
        self.pending.len() != before
    }

    pub fn due_at(&self, action: DeferredAction) -> Option<Duration> {
        self.pending.iter().find(|s| s.action == action).map(|s| s.due)
    }

    /// Remove and return every action due at or before `now`,
    /// ordered by due time, then by scheduling order.
    pub fn pop_due(&mut self, now: Duration) -> Vec<DeferredAction> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|s| {
            if s.due <= now {
                due.push(*s);
                false
            } else {
                true
            }
        });

        due.sort_by_key(|s| (s.due, s.seq));
        due.into_iter().map(|s| s.action).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// A deferred action reached its fire time this tick.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionDue(pub DeferredAction);

/// Poll the queue and announce what is due.
pub fn release_due_actions(
    time: Res<Time<Fixed>>,
    mut queue: ResMut<DeferredActions>,
    mut writer: MessageWriter<ActionDue>,
) {
    for action in queue.pop_due(time.elapsed()) {
        writer.write(ActionDue(action));
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<DeferredActions>()
        .add_message::<ActionDue>()
        .add_systems(
            FixedPreUpdate,
            release_due_actions.run_if(in_state(GameState::InGame)),
        );
}
