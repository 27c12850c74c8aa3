//! Attack dispatch — cooldown gate + три shape-алгоритма
//!
//! AttackIntent (от игрока или enemy AI) → resolve_attacks:
//! 1. deadline gate по next_attack_at
//! 2. "Attack" trigger в animation sink
//! 3. dispatch по AttackType (melee overlap / projectile spawn / hitscan ray)
//!
//! Missing-external-resource (нет projectile template) деградирует мягко:
//! cooldown уже потрачен, пропускается только спавн.

use bevy::prelude::*;

use crate::animation::AnimationCommand;
use crate::combat::damage::DamageIntent;
use crate::combat::profile::{AttackProfile, AttackType};
use crate::combat::projectile::Projectile;
use crate::spatial::SpatialIndex;

/// Event: entity хочет атаковать (host input или enemy AI)
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackIntent {
    pub attacker: Entity,
}

/// Cooldown state атакующего
///
/// Deadline-модель: атака разрешена когда now ≥ next_attack_at.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AttackState {
    pub next_attack_at: f32,
}

impl AttackState {
    /// Прошёл ли cooldown (read-only peek, состояние не меняется)
    pub fn ready(&self, now: f32) -> bool {
        now >= self.next_attack_at
    }

    /// Gate: false если cooldown не прошёл, иначе назначает следующий
    /// deadline и разрешает атаку
    pub fn try_attack(&mut self, cooldown: f32, now: f32) -> bool {
        if now < self.next_attack_at {
            return false;
        }
        self.next_attack_at = now + cooldown;
        true
    }
}

/// Система: разрешение AttackIntent событий
pub fn resolve_attacks(
    mut intents: EventReader<AttackIntent>,
    mut attackers: Query<(&Transform, &AttackProfile, &mut AttackState)>,
    spatial: Res<SpatialIndex>,
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut damage_events: EventWriter<DamageIntent>,
    mut anim_events: EventWriter<AnimationCommand>,
) {
    let now = time.elapsed_secs();

    for intent in intents.read() {
        let Ok((transform, profile, mut state)) = attackers.get_mut(intent.attacker) else {
            crate::log_warning(&format!(
                "AttackIntent: entity {:?} has no attack profile",
                intent.attacker
            ));
            continue;
        };

        if !state.try_attack(profile.cooldown(), now) {
            continue;
        }

        anim_events.write(AnimationCommand::Trigger {
            entity: intent.attacker,
            name: "Attack",
        });

        match profile.attack_type {
            AttackType::Melee => {
                resolve_melee(intent.attacker, transform, profile, &spatial, &mut damage_events);
            }
            AttackType::Projectile => {
                resolve_projectile(intent.attacker, transform, profile, now, &mut commands);
            }
            AttackType::Hitscan => {
                resolve_hitscan(intent.attacker, transform, profile, &spatial, &mut damage_events);
            }
        }
    }
}

/// Melee: overlap-сфера в точке forward × melee_range, урон всем
/// qualifying целям (multi-target)
fn resolve_melee(
    attacker: Entity,
    transform: &Transform,
    profile: &AttackProfile,
    spatial: &SpatialIndex,
    damage_events: &mut EventWriter<DamageIntent>,
) {
    let center = transform.translation + transform.forward() * profile.melee_range;

    for target in spatial.overlap_sphere(center, profile.melee_radius, profile.target_mask) {
        // Self-hit guard
        if target == attacker {
            continue;
        }

        damage_events.write(DamageIntent {
            attacker,
            target,
            amount: profile.damage,
        });
    }
}

/// Projectile: спавн одной projectile entity вдоль facing attacker'а
fn resolve_projectile(
    attacker: Entity,
    transform: &Transform,
    profile: &AttackProfile,
    now: f32,
    commands: &mut Commands,
) {
    let Some(template) = profile.projectile_template.as_ref() else {
        crate::log_warning("Projectile attack type but no projectile template assigned");
        return;
    };

    let spawn_pos = transform.translation + transform.forward() * profile.projectile_spawn_offset;

    commands.spawn((
        Transform::from_translation(spawn_pos).with_rotation(transform.rotation),
        Projectile {
            shooter: attacker,
            damage: profile.damage,
            speed: profile.projectile_speed,
            lifetime: profile.projectile_lifetime,
            contact_radius: template.contact_radius,
            target_mask: profile.target_mask,
            spawned_at: now,
        },
    ));
}

/// Hitscan: один forward ray, урон только первой qualifying цели
fn resolve_hitscan(
    attacker: Entity,
    transform: &Transform,
    profile: &AttackProfile,
    spatial: &SpatialIndex,
    damage_events: &mut EventWriter<DamageIntent>,
) {
    let origin = transform.translation;
    let direction = *transform.forward();

    if let Some(hit) = spatial.raycast(
        origin,
        direction,
        profile.hitscan_range,
        profile.target_mask,
        Some(attacker),
    ) {
        damage_events.write(DamageIntent {
            attacker,
            target: hit.entity,
            amount: profile.damage,
        });
    }
}
