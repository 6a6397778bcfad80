//! Producer: sample input, advance each weapon, and request projectiles on release.
//!
//! This system never spawns anything itself. A release only writes a
//! `SpawnProjectileRequest`; `projectiles::spawn::spawn_projectiles` is the consumer.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::player::{Incapacitated, PlayerSlot, ShooterInput};
use crate::plugins::projectiles::{ProjectileTemplate, SpawnProjectileRequest};

use super::{ChargeRejected, TriggerOutcome, Weapon, WeaponConfig};

pub fn update_weapons(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    template: Option<Res<ProjectileTemplate>>,
    mut q: Query<
        (&PlayerSlot, &ShooterInput, &WeaponConfig, &mut Weapon, &Transform),
        Without<Incapacitated>,
    >,
    mut writer: MessageWriter<SpawnProjectileRequest>,
    mut warned_no_template: Local<bool>,
) {
    let now = time.elapsed();

    for (slot, input, config, mut weapon, tf) in &mut q {
        weapon.update_aim(input.aim, tunables.aim_deadzone);

        let releasing = weapon.is_charging() && input.trigger <= tunables.trigger_threshold;
        if releasing && template.is_none() {
            // Firing is disabled without a template; keep the ammo.
            weapon.cancel_charge();
            weapon.drive(input.trigger, tunables.trigger_threshold, now, config);
            if !*warned_no_template {
                warn!("No ProjectileTemplate resource: firing is disabled");
                *warned_no_template = true;
            }
            continue;
        }

        match weapon.drive(input.trigger, tunables.trigger_threshold, now, config) {
            TriggerOutcome::Started => debug!("{slot} charging"),
            TriggerOutcome::Rejected(ChargeRejected::OutOfAmmo) => {
                debug!("{slot} trigger ignored: out of ammo");
            }
            TriggerOutcome::Released(shot) => {
                let origin = tf.translation.truncate();
                let position = origin + shot.direction * config.muzzle_distance;

                writer.write(SpawnProjectileRequest {
                    owner: *slot,
                    position,
                    velocity: shot.velocity(),
                });

                info!(
                    "{slot} fired: charge {:.2}, speed {:.1}, ammo left {}",
                    shot.charge_fraction,
                    shot.speed,
                    weapon.ammo()
                );
            }
            TriggerOutcome::Idle
            | TriggerOutcome::Charging(_)
            | TriggerOutcome::Rejected(_) => {}
        }
    }
}
