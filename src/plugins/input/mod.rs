//! Input plugin: keyboard → `ShooterInput`, plus the restart key.
//!
//! Pipeline:
//! - Update: sample keys, write each player's `ShooterInput`
//! - FixedUpdate: weapons read `ShooterInput` (see `weapons::systems`)
//!
//! Render-only: needs `ButtonInput<KeyCode>`, which headless apps don't have.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::{PlayerSlot, ShooterInput};
use crate::plugins::scoring::{MatchScore, RestartMatch};

pub const RESTART_KEY: KeyCode = KeyCode::KeyR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub fire: KeyCode,
}

impl KeyBindings {
    pub fn for_slot(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::One => Self {
                up: KeyCode::KeyW,
                down: KeyCode::KeyS,
                left: KeyCode::KeyA,
                right: KeyCode::KeyD,
                fire: KeyCode::Space,
            },
            PlayerSlot::Two => Self {
                up: KeyCode::ArrowUp,
                down: KeyCode::ArrowDown,
                left: KeyCode::ArrowLeft,
                right: KeyCode::ArrowRight,
                fire: KeyCode::Enter,
            },
        }
    }

    /// Sample one player's stick and trigger.
    pub fn sample(&self, keys: &ButtonInput<KeyCode>) -> ShooterInput {
        let mut axis = Vec2::ZERO;

        if keys.pressed(self.up) {
            axis.y += 1.0;
        }
        if keys.pressed(self.down) {
            axis.y -= 1.0;
        }
        if keys.pressed(self.left) {
            axis.x -= 1.0;
        }
        if keys.pressed(self.right) {
            axis.x += 1.0;
        }

        ShooterInput {
            aim: axis.normalize_or_zero(),
            trigger: if keys.pressed(self.fire) { 1.0 } else { 0.0 },
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (gather_shooter_input, request_restart).run_if(in_state(GameState::InGame)),
    );
}

fn gather_shooter_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut q: Query<(&PlayerSlot, &mut ShooterInput)>,
) {
    let Some(keys) = keys else { return };

    for (slot, mut input) in &mut q {
        let sampled = KeyBindings::for_slot(*slot).sample(&keys);
        input.set_if_neq(sampled);
    }
}

/// `R` restarts, but only once the match has a winner.
fn request_restart(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    score: Res<MatchScore>,
    mut restart: MessageWriter<RestartMatch>,
) {
    let Some(keys) = keys else { return };

    if score.game_ended() && keys.just_pressed(RESTART_KEY) {
        restart.write(RestartMatch);
    }
}

#[cfg(test)]
mod tests;
