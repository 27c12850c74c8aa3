//! Базовые ECS компоненты и общие типы данных
//!
//! - CoreStats — аддитивные атрибуты персонажа (strength/agility/intelligence)
//! - LayerMask / CollisionLayer — фильтрация целей (Unity-style bitmask)
//! - DespawnAfter — отложенное удаление entity (death grace delay)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Core stats персонажа
///
/// Только аддитивные (growth/bonus увеличивают, декрементов нет).
/// По контракту никогда не отрицательные.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub struct CoreStats {
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
}

impl CoreStats {
    pub const ZERO: Self = Self {
        strength: 0,
        agility: 0,
        intelligence: 0,
    };

    pub fn new(strength: i32, agility: i32, intelligence: i32) -> Self {
        Self {
            strength,
            agility,
            intelligence,
        }
    }

    /// Аддитивный merge (bonus stats, level-up growth)
    pub fn add(&mut self, delta: CoreStats) {
        self.strength += delta.strength;
        self.agility += delta.agility;
        self.intelligence += delta.intelligence;
    }

    /// base + levels × growth (level 1 ⇒ 0 шагов growth)
    pub fn with_growth(self, growth: CoreStats, levels: i32) -> Self {
        let levels = levels.max(0);
        Self {
            strength: self.strength + growth.strength * levels,
            agility: self.agility + growth.agility * levels,
            intelligence: self.intelligence + growth.intelligence * levels,
        }
    }
}

/// Bitmask слоёв для фильтрации целей атак и projectile
///
/// Семантика Unity LayerMask: бит N выставлен ⇔ слой N проходит фильтр.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);

    pub fn single(layer: u32) -> Self {
        Self(1 << layer)
    }

    pub fn contains(&self, layer: u32) -> bool {
        (1 << layer) & self.0 != 0
    }

    pub fn with(self, layer: u32) -> Self {
        Self(self.0 | (1 << layer))
    }
}

/// Номера слоёв (authoring convention, host может расширять)
pub mod layers {
    pub const PLAYER: u32 = 0;
    pub const ENEMY: u32 = 1;
    pub const PROJECTILE: u32 = 2;
}

/// Слой entity (один слой на entity, как gameObject.layer)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CollisionLayer(pub u32);

impl Default for CollisionLayer {
    fn default() -> Self {
        Self(layers::ENEMY)
    }
}

/// Компонент: удалить entity когда simulation clock дойдёт до deadline
///
/// Используется для death grace delay (труп остаётся на месте для
/// death-анимации, потом убирается из мира).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct DespawnAfter {
    /// Simulation time (секунды) когда деспавнить
    pub at: f32,
}

impl DespawnAfter {
    pub fn new(at: f32) -> Self {
        Self { at }
    }
}

/// Система: деспавн entity с истёкшим DespawnAfter deadline
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for (entity, despawn) in query.iter() {
        if now >= despawn.at {
            if let Ok(mut entity_commands) = commands.get_entity(entity) {
                entity_commands.despawn();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_stats_growth() {
        let base = CoreStats::new(10, 5, 3);
        let growth = CoreStats::new(2, 1, 1);

        // Level 1 ⇒ 0 шагов growth
        assert_eq!(base.with_growth(growth, 0), base);

        // Level 4 ⇒ 3 шага
        let at_level_4 = base.with_growth(growth, 3);
        assert_eq!(at_level_4, CoreStats::new(16, 8, 6));
    }

    #[test]
    fn test_core_stats_growth_negative_levels_clamped() {
        let base = CoreStats::new(10, 5, 3);
        let growth = CoreStats::new(2, 1, 1);

        assert_eq!(base.with_growth(growth, -5), base);
    }

    #[test]
    fn test_core_stats_add() {
        let mut stats = CoreStats::new(1, 2, 3);
        stats.add(CoreStats::new(4, 5, 6));
        assert_eq!(stats, CoreStats::new(5, 7, 9));
    }

    #[test]
    fn test_layer_mask_contains() {
        let mask = LayerMask::single(layers::ENEMY).with(layers::PROJECTILE);

        assert!(mask.contains(layers::ENEMY));
        assert!(mask.contains(layers::PROJECTILE));
        assert!(!mask.contains(layers::PLAYER));
        assert!(!LayerMask::NONE.contains(layers::ENEMY));
    }
}
