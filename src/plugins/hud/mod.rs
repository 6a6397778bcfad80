//! HUD readout: the numbers and strings an on-screen UI needs, refreshed every frame.
//!
//! Nothing here draws. A renderer (or a test) reads `HudReadout`.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::lifecycle::LifeCycle;
use crate::plugins::player::{PlayerRegistry, PlayerSlot};
use crate::plugins::scoring::MatchScore;
use crate::plugins::weapons::Weapon;

pub const RESTART_PROMPT: &str = "Press R to restart";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerHud {
    pub ammo_text: String,
    /// Charge fraction, present only while the trigger is held.
    pub charge: Option<f32>,
    pub lives: u32,
    pub alive: bool,
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct HudReadout {
    pub players: [PlayerHud; 2],
    pub winner_text: Option<String>,
    pub restart_prompt: Option<&'static str>,
}

impl HudReadout {
    pub fn player(&self, slot: PlayerSlot) -> &PlayerHud {
        &self.players[slot.index()]
    }
}

pub fn winner_text(winner: PlayerSlot) -> String {
    format!("{winner} WINS!")
}

pub fn refresh_hud(
    score: Res<MatchScore>,
    registry: Res<PlayerRegistry>,
    q: Query<(&Weapon, &LifeCycle)>,
    mut hud: ResMut<HudReadout>,
) {
    let mut next = HudReadout::default();

    for slot in PlayerSlot::ALL {
        let entry = &mut next.players[slot.index()];
        entry.lives = score.lives(slot);

        let Some((weapon, life)) = registry.get(slot).and_then(|e| q.get(e).ok()) else {
            continue;
        };
        entry.ammo_text = weapon.ammo_label();
        entry.charge = weapon.is_charging().then(|| weapon.charge_fraction());
        entry.alive = life.is_alive();
    }

    if let Some(winner) = score.winner() {
        next.winner_text = Some(winner_text(winner));
        next.restart_prompt = Some(RESTART_PROMPT);
    }

    // Only touch the resource when something changed so readers can rely on change detection.
    hud.set_if_neq(next);
}

pub fn plugin(app: &mut App) {
    app.init_resource::<HudReadout>().add_systems(
        PostUpdate,
        refresh_hud.run_if(in_state(GameState::InGame)),
    );
}
