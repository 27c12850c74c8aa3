//! Authored class data (immutable конфигурация классов)
//!
//! Читается при спавне персонажа, в runtime не мутируется.
//! Serde — для загрузки из authored файлов host'ом.

use serde::{Deserialize, Serialize};

use crate::components::CoreStats;

/// Архетип героя (закрытый набор)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroClass {
    /// Strength
    Titan,
    /// Agility
    Stalker,
    /// Intelligence
    Oracle,
}

/// Конфигурация класса: базовые статы, growth, scaling множители
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassData {
    pub class: HeroClass,

    pub base_stats: CoreStats,
    /// Growth увеличение за каждый уровень выше 1
    pub per_level_stats: CoreStats,

    pub base_health: f32,
    pub base_mana: f32,
    pub base_move_speed: f32,

    /// max_health = base_health + str × health_per_strength
    pub health_per_strength: f32,
    /// max_mana = base_mana + int × mana_per_intelligence
    pub mana_per_intelligence: f32,
    /// move_speed = base_move_speed × (1 + agi × move_speed_per_agility)
    pub move_speed_per_agility: f32,

    // Placeholders для combat scaling (пока не читаются resolver'ом)
    pub attack_damage_per_strength: f32,
    pub attack_speed_per_agility: f32,
    pub ability_power_per_intelligence: f32,
}

impl ClassData {
    fn preset(class: HeroClass, base_stats: CoreStats, per_level_stats: CoreStats) -> Self {
        Self {
            class,
            base_stats,
            per_level_stats,
            base_health: 100.0,
            base_mana: 50.0,
            base_move_speed: 6.0,
            health_per_strength: 10.0,
            mana_per_intelligence: 8.0,
            move_speed_per_agility: 0.03, // +3% за единицу Agility
            attack_damage_per_strength: 1.0,
            attack_speed_per_agility: 0.01,
            ability_power_per_intelligence: 1.2,
        }
    }

    /// Titan — melee bruiser (strength-heavy)
    pub fn titan() -> Self {
        Self::preset(
            HeroClass::Titan,
            CoreStats::new(18, 8, 6),
            CoreStats::new(3, 1, 1),
        )
    }

    /// Stalker — agility skirmisher
    pub fn stalker() -> Self {
        Self::preset(
            HeroClass::Stalker,
            CoreStats::new(10, 18, 8),
            CoreStats::new(1, 3, 1),
        )
    }

    /// Oracle — intelligence caster
    pub fn oracle() -> Self {
        Self::preset(
            HeroClass::Oracle,
            CoreStats::new(8, 10, 18),
            CoreStats::new(1, 1, 3),
        )
    }
}
