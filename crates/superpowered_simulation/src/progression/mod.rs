//! Character progression module
//!
//! - ClassData — authored конфигурация классов (Titan/Stalker/Oracle)
//! - Progression — статы/уровень/ресурсы per character
//! - Events для UI: HealthChanged / ManaChanged / LeveledUp / CharacterDied
//!
//! Progression не зависит от combat: movement/UI читают его, урон приходит
//! снаружи через Damageable capability.

use bevy::prelude::*;

pub mod character;
pub mod class_data;

pub use character::{Progression, ProgressionNote};
pub use class_data::{ClassData, HeroClass};

use crate::nav::NavAgent;

/// Event: здоровье изменилось (current, max)
#[derive(Event, Debug, Clone, Copy)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: f32,
    pub max: f32,
}

/// Event: мана изменилась (current, max)
#[derive(Event, Debug, Clone, Copy)]
pub struct ManaChanged {
    pub entity: Entity,
    pub current: f32,
    pub max: f32,
}

/// Event: level-up (новый уровень)
#[derive(Event, Debug, Clone, Copy)]
pub struct LeveledUp {
    pub entity: Entity,
    pub level: u32,
}

/// Event: персонаж умер (health дошло до 0)
#[derive(Event, Debug, Clone, Copy)]
pub struct CharacterDied {
    pub entity: Entity,
}

/// Система: конвертация Progression outbox → Bevy events
///
/// Outbox — единственный UI-facing сигнал; внешние подписчики читают events.
pub fn drain_progression_notes(
    mut query: Query<(Entity, &mut Progression)>,
    mut health_events: EventWriter<HealthChanged>,
    mut mana_events: EventWriter<ManaChanged>,
    mut level_events: EventWriter<LeveledUp>,
    mut died_events: EventWriter<CharacterDied>,
) {
    for (entity, mut progression) in query.iter_mut() {
        for note in progression.drain_notes() {
            match note {
                ProgressionNote::Health(current, max) => {
                    health_events.write(HealthChanged { entity, current, max });
                }
                ProgressionNote::Mana(current, max) => {
                    mana_events.write(ManaChanged { entity, current, max });
                }
                ProgressionNote::LevelUp(level) => {
                    level_events.write(LeveledUp { entity, level });
                    crate::log_info(&format!("Entity {:?} reached level {}", entity, level));
                }
                ProgressionNote::Died => {
                    died_events.write(CharacterDied { entity });
                    crate::log_info(&format!("Entity {:?} died", entity));
                }
            }
        }
    }
}

/// Система: move_speed из Progression → NavAgent (opaque mover)
///
/// Аналог agent.speed = MoveSpeed: derived стат применяется к mover'у
/// после каждого пересчёта.
pub fn sync_move_speed(
    mut query: Query<(&Progression, &mut NavAgent), Changed<Progression>>,
) {
    for (progression, mut agent) in query.iter_mut() {
        if progression.is_configured() {
            agent.speed = progression.move_speed;
        }
    }
}

/// Progression Plugin
///
/// Регистрирует UI events и drain/sync системы. Порядок относительно
/// combat задаётся в SimulationPlugin (notes сливаются после apply_damage).
pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HealthChanged>()
            .add_event::<ManaChanged>()
            .add_event::<LeveledUp>()
            .add_event::<CharacterDied>();
    }
}
