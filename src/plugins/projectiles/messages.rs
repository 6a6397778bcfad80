//! Buffered spawn requests.
//!
//! Weapons create *intent*; the spawn consumer turns intent into entities.
//! This is a producer → queue → consumer pipeline.

use bevy::prelude::*;

use crate::plugins::player::PlayerSlot;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectileRequest {
    pub owner: PlayerSlot,
    pub position: Vec2,
    pub velocity: Vec2,
}
