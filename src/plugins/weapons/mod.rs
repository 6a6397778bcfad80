//! Weapons plugin: charge-to-fire state machine, one per player.
//!
//! ```text
//!            trigger > threshold
//!            && cooldown elapsed && ammo
//!   ┌──────┐ ─────────────────────────► ┌──────────┐
//!   │ Idle │                            │ Charging │  fraction = clamp01(held / max_charge)
//!   └──────┘ ◄───────────────────────── └──────────┘
//!            trigger <= threshold: release
//!            speed = lerp(min, max, fraction), ammo -= 1
//! ```
//!
//! The cooldown gates *starting* a charge. A charge already in progress can always be
//! released. The pure state machine lives on `Weapon`; `systems` wires it to input and
//! to the projectile spawn pipeline.

use std::time::Duration;

use bevy::prelude::*;

use crate::common::state::GameState;

pub mod systems;

#[derive(Component, Debug, Clone)]
pub struct WeaponConfig {
    pub max_ammo: u32,
    pub starting_ammo: u32,
    pub infinite_ammo: bool,
    pub min_projectile_speed: f32,
    pub max_projectile_speed: f32,
    pub max_charge_time: Duration,
    pub fire_rate_cooldown: Duration,
    /// Distance from the player's center to the firing point, along the aim.
    pub muzzle_distance: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            max_ammo: 10,
            starting_ammo: 10,
            infinite_ammo: false,
            min_projectile_speed: 5.0,
            max_projectile_speed: 30.0,
            max_charge_time: Duration::from_secs(2),
            fire_rate_cooldown: Duration::from_millis(500),
            muzzle_distance: 0.9,
        }
    }
}

impl WeaponConfig {
    /// Linear speed law between the min and max projectile speed.
    #[inline]
    pub fn shot_speed(&self, charge_fraction: f32) -> f32 {
        let t = charge_fraction.clamp(0.0, 1.0);
        self.min_projectile_speed + (self.max_projectile_speed - self.min_projectile_speed) * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargeState {
    #[default]
    Idle,
    Charging {
        started_at: Duration,
    },
}

/// Why a charge did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeRejected {
    AlreadyCharging,
    CoolingDown,
    OutOfAmmo,
}

/// A released shot. Direction is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub speed: f32,
    pub direction: Dir2,
    pub charge_fraction: f32,
}

impl Shot {
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }
}

/// Per-tick outcome of driving the weapon with a trigger sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerOutcome {
    Idle,
    Rejected(ChargeRejected),
    Started,
    Charging(f32),
    Released(Shot),
}

/// Live weapon state. Mutated only by the owner's weapon system and by ammo credits.
#[derive(Component, Debug, Clone)]
pub struct Weapon {
    max_ammo: u32,
    infinite_ammo: bool,
    ammo: u32,
    charge: ChargeState,
    charge_fraction: f32,
    last_fire: Option<Duration>,
    aim: Dir2,
    /// Trigger sample of the previous tick; a charge only starts on a rising edge.
    trigger_was_pressed: bool,
}

impl Weapon {
    pub fn new(config: &WeaponConfig) -> Self {
        Self {
            max_ammo: config.max_ammo,
            infinite_ammo: config.infinite_ammo,
            ammo: config.starting_ammo.min(config.max_ammo),
            charge: ChargeState::Idle,
            charge_fraction: 0.0,
            last_fire: None,
            aim: Dir2::X,
            trigger_was_pressed: false,
        }
    }

    #[inline]
    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    #[inline]
    pub fn max_ammo(&self) -> u32 {
        self.max_ammo
    }

    #[inline]
    pub fn infinite_ammo(&self) -> bool {
        self.infinite_ammo
    }

    #[inline]
    pub fn charge_state(&self) -> ChargeState {
        self.charge
    }

    #[inline]
    pub fn is_charging(&self) -> bool {
        matches!(self.charge, ChargeState::Charging { .. })
    }

    /// Last computed charge fraction; 0 while idle.
    #[inline]
    pub fn charge_fraction(&self) -> f32 {
        self.charge_fraction
    }

    #[inline]
    pub fn aim(&self) -> Dir2 {
        self.aim
    }

    #[inline]
    pub fn last_fire(&self) -> Option<Duration> {
        self.last_fire
    }

    /// Adopt `input` as the aim if it is outside the deadzone; otherwise keep the last aim.
    pub fn update_aim(&mut self, input: Vec2, deadzone: f32) {
        if input.length() <= deadzone {
            return;
        }
        if let Ok(dir) = Dir2::new(input) {
            self.aim = dir;
        }
    }

    pub fn can_fire(&self, now: Duration, config: &WeaponConfig) -> Result<(), ChargeRejected> {
        if self.is_charging() {
            return Err(ChargeRejected::AlreadyCharging);
        }
        if let Some(last) = self.last_fire {
            if now.saturating_sub(last) < config.fire_rate_cooldown {
                return Err(ChargeRejected::CoolingDown);
            }
        }
        if !self.infinite_ammo && self.ammo == 0 {
            return Err(ChargeRejected::OutOfAmmo);
        }
        Ok(())
    }

    pub fn try_begin_charge(&mut self, now: Duration, config: &WeaponConfig) -> Result<(), ChargeRejected> {
        self.can_fire(now, config)?;
        self.charge = ChargeState::Charging { started_at: now };
        self.charge_fraction = 0.0;
        Ok(())
    }

    /// Recompute the charge fraction while charging. Never decreases during one hold.
    pub fn update_charge(&mut self, now: Duration, config: &WeaponConfig) -> f32 {
        let ChargeState::Charging { started_at } = self.charge else {
            return 0.0;
        };

        let held = now.saturating_sub(started_at).as_secs_f32();
        let max = config.max_charge_time.as_secs_f32();
        let fraction = if max <= 0.0 { 1.0 } else { (held / max).clamp(0.0, 1.0) };

        self.charge_fraction = self.charge_fraction.max(fraction);
        self.charge_fraction
    }

    /// Release the current charge. `None` if not charging.
    pub fn release(&mut self, now: Duration, config: &WeaponConfig) -> Option<Shot> {
        if !self.is_charging() {
            return None;
        }

        let fraction = self.update_charge(now, config);
        let shot = Shot {
            speed: config.shot_speed(fraction),
            direction: self.aim,
            charge_fraction: fraction,
        };

        if !self.infinite_ammo {
            self.ammo = self.ammo.saturating_sub(1);
        }
        self.last_fire = Some(now);
        self.charge = ChargeState::Idle;
        self.charge_fraction = 0.0;

        Some(shot)
    }

    /// Drop an in-progress charge without firing. Ammo and cooldown are untouched.
    pub fn cancel_charge(&mut self) {
        self.charge = ChargeState::Idle;
        self.charge_fraction = 0.0;
    }

    /// One tick of trigger handling.
    ///
    /// Charging starts only when the trigger crosses above `threshold`. A press rejected
    /// for cooldown or ammo stays ignored until the trigger is released and pressed again.
    pub fn drive(
        &mut self,
        trigger: f32,
        threshold: f32,
        now: Duration,
        config: &WeaponConfig,
    ) -> TriggerOutcome {
        let pressed = trigger > threshold;
        let was_pressed = std::mem::replace(&mut self.trigger_was_pressed, pressed);

        match (self.is_charging(), pressed) {
            (false, false) => TriggerOutcome::Idle,
            (false, true) if was_pressed => TriggerOutcome::Idle,
            (false, true) => match self.try_begin_charge(now, config) {
                Ok(()) => TriggerOutcome::Started,
                Err(reason) => TriggerOutcome::Rejected(reason),
            },
            (true, true) => TriggerOutcome::Charging(self.update_charge(now, config)),
            (true, false) => match self.release(now, config) {
                Some(shot) => TriggerOutcome::Released(shot),
                None => TriggerOutcome::Idle,
            },
        }
    }

    /// Credit ammo, clamped to the magazine size.
    pub fn add_ammo(&mut self, amount: u32) -> u32 {
        self.ammo = self.ammo.saturating_add(amount).min(self.max_ammo);
        self.ammo
    }

    /// `"{current}/{max}"`, or `"∞"` for an infinite magazine.
    pub fn ammo_label(&self) -> String {
        if self.infinite_ammo {
            "∞".to_owned()
        } else {
            format!("{}/{}", self.ammo, self.max_ammo)
        }
    }

    /// Back to the freshly-spawned state (restart).
    pub fn reset(&mut self, config: &WeaponConfig) {
        *self = Self::new(config);
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        systems::update_weapons.run_if(in_state(GameState::InGame)),
    );
}
