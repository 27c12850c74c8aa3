//! Attack profile — authored конфигурация одной атаки
//!
//! Shape (melee/projectile/hitscan) + численные параметры. Immutable в
//! runtime, читается resolver'ом при каждой атаке.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::LayerMask;

/// Форма атаки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum AttackType {
    Melee,
    Projectile,
    /// Мгновенный ray shot
    Hitscan,
}

/// Визуальный/коллизионный шаблон projectile
///
/// Отсутствие шаблона у Projectile-профиля — не fatal: атака тратит
/// cooldown, спавн пропускается с warning.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct ProjectileTemplate {
    /// Путь к prefab для host-визуализации (например "res://fx/bolt.tscn")
    pub prefab_path: String,
    /// Радиус контакта (метры)
    pub contact_radius: f32,
}

impl ProjectileTemplate {
    pub fn new(prefab_path: impl Into<String>) -> Self {
        Self {
            prefab_path: prefab_path.into(),
            contact_radius: 0.3,
        }
    }
}

/// Профиль атаки (component на attacker entity)
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct AttackProfile {
    pub attack_type: AttackType,
    pub damage: f32,
    /// > 0; cooldown = 1 / attacks_per_second
    pub attacks_per_second: f32,

    /// Какие слои проходят фильтр целей
    pub target_mask: LayerMask,

    // Melee
    /// Смещение центра удара вперёд от attacker'а (метры)
    pub melee_range: f32,
    pub melee_radius: f32,

    // Projectile
    pub projectile_template: Option<ProjectileTemplate>,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    /// Небольшое смещение спавна вперёд против self-collision
    pub projectile_spawn_offset: f32,

    // Hitscan
    pub hitscan_range: f32,
}

impl Default for AttackProfile {
    fn default() -> Self {
        Self {
            attack_type: AttackType::Melee,
            damage: 10.0,
            attacks_per_second: 1.0,
            target_mask: LayerMask::NONE,
            melee_range: 2.0,
            melee_radius: 1.0,
            projectile_template: None,
            projectile_speed: 18.0,
            projectile_lifetime: 3.0,
            projectile_spawn_offset: 0.1,
            hitscan_range: 30.0,
        }
    }
}

impl AttackProfile {
    pub fn melee(damage: f32, attacks_per_second: f32, target_mask: LayerMask) -> Self {
        Self {
            attack_type: AttackType::Melee,
            damage,
            attacks_per_second,
            target_mask,
            ..Default::default()
        }
    }

    pub fn projectile(
        damage: f32,
        attacks_per_second: f32,
        target_mask: LayerMask,
        template: ProjectileTemplate,
    ) -> Self {
        Self {
            attack_type: AttackType::Projectile,
            damage,
            attacks_per_second,
            target_mask,
            projectile_template: Some(template),
            ..Default::default()
        }
    }

    pub fn hitscan(damage: f32, attacks_per_second: f32, target_mask: LayerMask) -> Self {
        Self {
            attack_type: AttackType::Hitscan,
            damage,
            attacks_per_second,
            target_mask,
            ..Default::default()
        }
    }

    /// Cooldown между атаками (секунды); rate зажат снизу против /0
    pub fn cooldown(&self) -> f32 {
        1.0 / self.attacks_per_second.max(0.01)
    }
}
