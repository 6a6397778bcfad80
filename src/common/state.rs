//! Top-level app state.
//!
//! Arena entities carry `DespawnOnExit(GameState::InGame)`, so leaving the state tears
//! the whole duel down.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
