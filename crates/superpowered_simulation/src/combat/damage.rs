//! Damageable capability + damage pipeline
//!
//! Единственный санкционированный способ одной entity менять состояние
//! другой: DamageIntent → apply_damage → Damageable::apply_damage.
//! Attacker'ы не знают конкретных типов целей.

use bevy::prelude::*;

use crate::enemy::EnemyVitals;
use crate::progression::Progression;

/// Capability: entity умеет принимать урон
///
/// Любой компонент может реализовать без наследования; attacker видит
/// только контракт.
pub trait Damageable {
    /// Применить урон. amount ≤ 0 игнорируется, урон по мёртвым — no-op.
    fn apply_damage(&mut self, amount: f32);
}

impl Damageable for Progression {
    fn apply_damage(&mut self, amount: f32) {
        self.take_damage(amount);
    }
}

impl Damageable for EnemyVitals {
    fn apply_damage(&mut self, amount: f32) {
        self.take_damage(amount);
    }
}

/// Event: запрос урона (attacker → target)
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageIntent {
    pub attacker: Entity,
    pub target: Entity,
    pub amount: f32,
}

/// Event: урон применён (для UI, звуков, эффектов)
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub amount: f32,
    pub target_died: bool,
}

/// Система: DamageIntent → Damageable компонент цели
///
/// Диспатч по тому, какой damageable компонент несёт target
/// (Progression у персонажей, EnemyVitals у врагов).
pub fn apply_damage(
    mut intents: EventReader<DamageIntent>,
    mut targets: Query<AnyOf<(&mut Progression, &mut EnemyVitals)>>,
    mut dealt_events: EventWriter<DamageDealt>,
) {
    for intent in intents.read() {
        let Ok((progression, vitals)) = targets.get_mut(intent.target) else {
            crate::log_warning(&format!(
                "DamageIntent: target {:?} has no damageable component",
                intent.target
            ));
            continue;
        };

        let target_died;
        if let Some(mut progression) = progression {
            let was_alive = progression.is_alive();
            progression.apply_damage(intent.amount);
            target_died = was_alive && !progression.is_alive();
        } else if let Some(mut vitals) = vitals {
            let was_alive = vitals.is_alive();
            vitals.apply_damage(intent.amount);
            target_died = was_alive && !vitals.is_alive();
        } else {
            continue;
        }

        dealt_events.write(DamageDealt {
            attacker: intent.attacker,
            target: intent.target,
            amount: intent.amount,
            target_died,
        });
    }
}
