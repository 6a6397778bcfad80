use bevy::prelude::*;

use crate::common::test_utils::{ensure_messages, read_messages, run_system_once};
use crate::plugins::player::{PlayerSlot, ShooterInput};
use crate::plugins::scoring::{MatchScore, RestartMatch};

use super::*;

fn keys(pressed: &[KeyCode]) -> ButtonInput<KeyCode> {
    let mut keys = ButtonInput::<KeyCode>::default();
    for k in pressed {
        keys.press(*k);
    }
    keys
}

#[test]
fn player_one_uses_wasd_and_space() {
    let input = KeyBindings::for_slot(PlayerSlot::One).sample(&keys(&[KeyCode::KeyW, KeyCode::Space]));
    assert_eq!(input, ShooterInput { aim: Vec2::Y, trigger: 1.0 });
}

#[test]
fn player_two_ignores_player_one_keys() {
    let input = KeyBindings::for_slot(PlayerSlot::Two).sample(&keys(&[KeyCode::KeyW, KeyCode::Space]));
    assert_eq!(input, ShooterInput::default());
}

#[test]
fn diagonal_aim_is_normalized() {
    let input = KeyBindings::for_slot(PlayerSlot::Two)
        .sample(&keys(&[KeyCode::ArrowUp, KeyCode::ArrowLeft]));
    assert!((input.aim.length() - 1.0).abs() < 1e-6);
    assert!(input.aim.x < 0.0 && input.aim.y > 0.0);
    assert_eq!(input.trigger, 0.0);
}

#[test]
fn gather_writes_each_players_input() {
    let mut world = World::new();
    world.insert_resource(keys(&[KeyCode::ArrowRight, KeyCode::Enter]));
    let p1 = world.spawn((PlayerSlot::One, ShooterInput::default())).id();
    let p2 = world.spawn((PlayerSlot::Two, ShooterInput::default())).id();

    run_system_once(&mut world, gather_shooter_input);

    assert_eq!(*world.get::<ShooterInput>(p1).unwrap(), ShooterInput::default());
    assert_eq!(
        *world.get::<ShooterInput>(p2).unwrap(),
        ShooterInput { aim: Vec2::X, trigger: 1.0 }
    );
}

#[test]
fn restart_key_only_works_after_the_match_ended() {
    let mut world = World::new();
    ensure_messages::<RestartMatch>(&mut world);
    world.insert_resource(keys(&[RESTART_KEY]));
    world.insert_resource(MatchScore::new(1));

    run_system_once(&mut world, request_restart);
    assert!(read_messages::<RestartMatch>(&mut world).is_empty());

    world
        .resource_mut::<MatchScore>()
        .record_death(PlayerSlot::One, PlayerSlot::Two);
    run_system_once(&mut world, request_restart);
    assert_eq!(read_messages::<RestartMatch>(&mut world), vec![RestartMatch]);
}
