//! Match score: lives per player, winner detection and restart.
//!
//! ```text
//!   PlayerDied ──► tally_deaths ──► MatchScore::record_death ──► MatchEnded (once)
//!
//!   RestartMatch ──► restart_match ──► score, players, weapons, portals, flashes,
//!                                      in-flight projectiles, deferred queue
//! ```
//!
//! Once a winner is declared every further death is ignored until `reset()`.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::deferred::DeferredActions;
use crate::plugins::flash::Flash;
use crate::plugins::lifecycle::{apply_deaths, revive, LifeCycle, PlayerDied};
use crate::plugins::player::{PlayerSlot, ShooterInput};
use crate::plugins::portals::Portal;
use crate::plugins::projectiles::Projectile;
use crate::plugins::weapons::{Weapon, WeaponConfig};

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct MatchScore {
    lives: [u32; 2],
    starting_lives: u32,
    winner: Option<PlayerSlot>,
}

impl Default for MatchScore {
    fn default() -> Self {
        Self::new(Tunables::default().starting_lives)
    }
}

/// What a single death did to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathTally {
    /// The match is already decided.
    Ignored,
    Counted { remaining: u32 },
    Decided { winner: PlayerSlot },
}

impl MatchScore {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            lives: [starting_lives; 2],
            starting_lives,
            winner: None,
        }
    }

    #[inline]
    pub fn lives(&self, slot: PlayerSlot) -> u32 {
        self.lives[slot.index()]
    }

    #[inline]
    pub fn starting_lives(&self) -> u32 {
        self.starting_lives
    }

    #[inline]
    pub fn winner(&self) -> Option<PlayerSlot> {
        self.winner
    }

    #[inline]
    pub fn game_ended(&self) -> bool {
        self.winner.is_some()
    }

    pub fn record_death(&mut self, victim: PlayerSlot, killer: PlayerSlot) -> DeathTally {
        if self.game_ended() {
            return DeathTally::Ignored;
        }

        let lives = &mut self.lives[victim.index()];
        *lives = lives.saturating_sub(1);
        let remaining = *lives;

        if remaining == 0 {
            // The victim's opponent wins, whoever fired the last shot.
            let winner = victim.opponent();
            if killer != winner {
                debug!("{victim} lost its last life to {killer}");
            }
            self.winner = Some(winner);
            return DeathTally::Decided { winner };
        }

        DeathTally::Counted { remaining }
    }

    pub fn reset(&mut self) {
        self.lives = [self.starting_lives; 2];
        self.winner = None;
    }
}

/// Written once, when a player runs out of lives.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchEnded {
    pub winner: PlayerSlot,
}

/// External restart command.
#[derive(Message, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RestartMatch;

pub fn tally_deaths(
    mut score: ResMut<MatchScore>,
    mut deaths: MessageReader<PlayerDied>,
    mut ended: MessageWriter<MatchEnded>,
) {
    for death in deaths.read() {
        match score.record_death(death.slot, death.killer) {
            DeathTally::Ignored => debug!("{} died after the match ended", death.slot),
            DeathTally::Counted { remaining } => info!("{} has {remaining} lives left", death.slot),
            DeathTally::Decided { winner } => {
                info!("{winner} wins the match");
                ended.write(MatchEnded { winner });
            }
        }
    }
}

type RestartPlayers<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut LifeCycle,
        &'static mut Weapon,
        &'static WeaponConfig,
        &'static mut Transform,
        &'static mut Visibility,
        Option<&'static mut ShooterInput>,
        Option<&'static mut LinearVelocity>,
    ),
    Without<Projectile>,
>;

/// Put the match back to its starting state.
pub fn restart_match(
    mut commands: Commands,
    mut requests: MessageReader<RestartMatch>,
    mut score: ResMut<MatchScore>,
    mut queue: ResMut<DeferredActions>,
    mut q_players: RestartPlayers,
    q_projectiles: Query<Entity, With<Projectile>>,
    mut q_portals: Query<&mut Portal>,
    mut q_flash: Query<&mut Flash>,
) {
    // Several presses in one frame still mean one restart.
    if requests.read().count() == 0 {
        return;
    }

    score.reset();
    queue.clear();

    for (e, mut life, mut weapon, config, mut tf, mut vis, input, vel) in &mut q_players {
        revive(&mut commands, e, &mut life, &mut tf, &mut vis);
        weapon.reset(config);
        if let Some(mut input) = input {
            *input = ShooterInput::default();
        }
        if let Some(mut vel) = vel {
            vel.0 = Vec2::ZERO;
        }
    }

    for e in &q_projectiles {
        commands.entity(e).despawn();
    }
    for mut portal in &mut q_portals {
        portal.guarded = false;
    }
    for mut flash in &mut q_flash {
        flash.lit = false;
    }

    info!("Match restarted");
}

pub fn plugin(app: &mut App) {
    app.init_resource::<MatchScore>()
        .add_message::<MatchEnded>()
        .add_message::<RestartMatch>()
        .add_systems(Startup, sync_starting_lives)
        .add_systems(
            FixedPostUpdate,
            tally_deaths
                .after(apply_deaths)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(Update, restart_match.run_if(in_state(GameState::InGame)));
}

/// Take `starting_lives` from the tunables in effect when the app starts.
fn sync_starting_lives(tunables: Res<Tunables>, mut score: ResMut<MatchScore>) {
    if score.starting_lives != tunables.starting_lives {
        *score = MatchScore::new(tunables.starting_lives);
    }
}

#[cfg(test)]
mod tests;
