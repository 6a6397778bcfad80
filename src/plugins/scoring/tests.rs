use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::{ensure_messages, read_messages, run_system_once};
use crate::plugins::deferred::{DeferredAction, DeferredActions};
use crate::plugins::flash::Flash;
use crate::plugins::lifecycle::{LifeCycle, PlayerDied};
use crate::plugins::player::{Incapacitated, PlayerSlot};
use crate::plugins::portals::Portal;
use crate::plugins::projectiles::Projectile;
use crate::plugins::weapons::{Weapon, WeaponConfig};

use super::*;

// --------------------------------------------------------------------------------------
// Score state
// --------------------------------------------------------------------------------------

#[test]
fn five_deaths_decide_the_match_and_later_deaths_are_ignored() {
    let mut score = MatchScore::new(5);

    for remaining in (1..5).rev() {
        assert_eq!(
            score.record_death(PlayerSlot::One, PlayerSlot::Two),
            DeathTally::Counted { remaining }
        );
    }
    assert_eq!(
        score.record_death(PlayerSlot::One, PlayerSlot::Two),
        DeathTally::Decided { winner: PlayerSlot::Two }
    );
    assert!(score.game_ended());
    assert_eq!(score.winner(), Some(PlayerSlot::Two));

    let before = score.clone();
    assert_eq!(score.record_death(PlayerSlot::One, PlayerSlot::Two), DeathTally::Ignored);
    assert_eq!(score.record_death(PlayerSlot::Two, PlayerSlot::One), DeathTally::Ignored);
    assert_eq!(score, before);
    assert_eq!(score.lives(PlayerSlot::One), 0);
    assert_eq!(score.lives(PlayerSlot::Two), 5);
}

#[test]
fn winner_is_the_victims_opponent_even_on_self_inflicted_death() {
    let mut score = MatchScore::new(1);
    assert_eq!(
        score.record_death(PlayerSlot::Two, PlayerSlot::Two),
        DeathTally::Decided { winner: PlayerSlot::One }
    );
}

#[test]
fn reset_restores_lives_and_reopens_the_match() {
    let mut score = MatchScore::new(2);
    score.record_death(PlayerSlot::Two, PlayerSlot::One);
    score.record_death(PlayerSlot::Two, PlayerSlot::One);
    assert!(score.game_ended());

    score.reset();

    assert_eq!(score, MatchScore::new(2));
    assert!(!score.game_ended());
}

// --------------------------------------------------------------------------------------
// Systems
// --------------------------------------------------------------------------------------

fn died(victim: Entity, slot: PlayerSlot) -> PlayerDied {
    PlayerDied {
        victim,
        slot,
        killer: slot.opponent(),
    }
}

#[test]
fn tally_announces_the_winner_once() {
    let mut world = World::new();
    world.insert_resource(MatchScore::new(2));
    ensure_messages::<PlayerDied>(&mut world);
    ensure_messages::<MatchEnded>(&mut world);

    let victim = world.spawn_empty().id();
    for _ in 0..3 {
        world.write_message(died(victim, PlayerSlot::One));
    }
    run_system_once(&mut world, tally_deaths);

    assert_eq!(
        read_messages::<MatchEnded>(&mut world),
        vec![MatchEnded { winner: PlayerSlot::Two }]
    );
    assert_eq!(world.resource::<MatchScore>().lives(PlayerSlot::One), 0);
}

#[test]
fn restart_resets_the_whole_match() {
    let mut world = World::new();
    let mut score = MatchScore::new(1);
    score.record_death(PlayerSlot::One, PlayerSlot::Two);
    world.insert_resource(score);
    world.init_resource::<DeferredActions>();
    ensure_messages::<RestartMatch>(&mut world);

    let config = WeaponConfig::default();
    let mut weapon = Weapon::new(&config);
    weapon.try_begin_charge(Duration::ZERO, &config).unwrap();
    let mut life = LifeCycle::with_respawn_position(Vec2::new(-8.5, 0.75));
    life.die();

    let player = world
        .spawn((
            PlayerSlot::One,
            life,
            weapon,
            config,
            Transform::from_xyz(3.0, 3.0, 1.0),
            Visibility::Hidden,
            Incapacitated,
            ColliderDisabled,
            LinearVelocity(Vec2::X),
        ))
        .id();
    let shot = world.spawn((Projectile::new(PlayerSlot::Two), Transform::default())).id();
    let portal = world.spawn(Portal { guarded: true, ..default() }).id();
    let wall = world.spawn(Flash { lit: true, duration: Duration::from_millis(200) }).id();
    world
        .resource_mut::<DeferredActions>()
        .schedule(Duration::ZERO, Duration::from_secs(2), DeferredAction::Respawn(player));

    world.write_message(RestartMatch);
    run_system_once(&mut world, restart_match);

    assert_eq!(*world.resource::<MatchScore>(), MatchScore::new(1));
    assert!(world.resource::<DeferredActions>().is_empty());

    assert!(world.get::<LifeCycle>(player).unwrap().is_alive());
    assert!(world.get::<Incapacitated>(player).is_none());
    assert!(world.get::<ColliderDisabled>(player).is_none());
    assert_eq!(*world.get::<Visibility>(player).unwrap(), Visibility::Visible);
    assert_eq!(
        world.get::<Transform>(player).unwrap().translation.truncate(),
        Vec2::new(-8.5, 0.75)
    );
    let weapon = world.get::<Weapon>(player).unwrap();
    assert_eq!(weapon.ammo(), 10);
    assert!(!weapon.is_charging());
    assert_eq!(weapon.last_fire(), None);

    assert!(world.get_entity(shot).is_err());
    assert!(!world.get::<Portal>(portal).unwrap().guarded);
    assert!(!world.get::<Flash>(wall).unwrap().lit);
}

#[test]
fn restart_without_request_does_nothing() {
    let mut world = World::new();
    let mut score = MatchScore::new(1);
    score.record_death(PlayerSlot::One, PlayerSlot::Two);
    world.insert_resource(score.clone());
    world.init_resource::<DeferredActions>();
    ensure_messages::<RestartMatch>(&mut world);

    run_system_once(&mut world, restart_match);

    assert_eq!(*world.resource::<MatchScore>(), score);
}
