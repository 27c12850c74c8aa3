//! Combat system module
//!
//! Ответственность:
//! - Damageable capability + damage pipeline (DamageIntent → DamageDealt)
//! - AttackProfile (authored) + AttackState (cooldown gate)
//! - Три shape-алгоритма: melee overlap / projectile / hitscan ray
//! - Aiming для player-controlled attacker'ов
//!
//! Внешние collaborator'ы: spatial запросы (crate::spatial), animation
//! sink (crate::animation). Порядок систем в тике задаёт SimulationPlugin.

use bevy::prelude::*;

pub mod aiming;
pub mod attack;
pub mod damage;
pub mod profile;
pub mod projectile;

pub use aiming::{face_aim_targets, AimTarget};
pub use attack::{resolve_attacks, AttackIntent, AttackState};
pub use damage::{apply_damage, DamageDealt, DamageIntent, Damageable};
pub use profile::{AttackProfile, AttackType, ProjectileTemplate};
pub use projectile::{update_projectiles, Projectile};

/// Combat Plugin — регистрация событий
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AttackIntent>()
            .add_event::<DamageIntent>()
            .add_event::<DamageDealt>();
    }
}
