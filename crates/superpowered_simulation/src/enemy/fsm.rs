//! Enemy AI конечный автомат: Chasing / Stunned / Dead
//!
//! Порядок систем в тике фиксированный (см. SimulationPlugin):
//! state check → chase/attack → animation output. Смерть, записанная в
//! vitals, подхватывается state check'ом до любой movement/attack логики
//! следующего тика этой entity.
//!
//! "Suspension" (stun) — deadline против simulation clock, не блокировка.
//! Повторный stun переписывает deadline (restart, не stack).

use bevy::prelude::*;

use crate::animation::AnimationCommand;
use crate::combat::attack::{AttackIntent, AttackState};
use crate::combat::damage::DamageDealt;
use crate::components::DespawnAfter;
use crate::nav::NavAgent;

/// Grace delay перед удалением трупа из мира (death-анимация)
pub const DEATH_DESPAWN_DELAY: f32 = 3.0;

/// Состояние enemy AI
///
/// Chasing — начальное; Dead — терминальное (damage/stun по мёртвому — no-op).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum EnemyState {
    Chasing,
    Stunned {
        /// Deadline снятия стана (simulation time)
        until: f32,
    },
    Dead,
}

impl Default for EnemyState {
    fn default() -> Self {
        Self::Chasing
    }
}

/// Здоровье врага (enemy владеет своим Damageable, без Progression)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct EnemyVitals {
    pub current: f32,
    pub max: f32,
}

impl Default for EnemyVitals {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl EnemyVitals {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn take_damage(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.current = (self.current - amount).max(0.0);
    }
}

/// Параметры enemy-контроллера
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct EnemyAgent {
    /// Цель преследования (инъекция при спавне, не singleton lookup)
    pub target: Option<Entity>,
    /// Минимальный интервал между repath запросами (секунды)
    pub repath_interval: f32,
    /// Дистанция атаки
    pub attack_range: f32,

    /// Deadline следующего repath
    pub next_repath_at: f32,
}

impl Default for EnemyAgent {
    fn default() -> Self {
        Self {
            target: None,
            repath_interval: 0.1,
            attack_range: 1.8,
            next_repath_at: 0.0,
        }
    }
}

impl EnemyAgent {
    pub fn chasing(target: Entity) -> Self {
        Self {
            target: Some(target),
            ..Default::default()
        }
    }
}

/// Event: запрос стана (duration в секундах)
#[derive(Event, Debug, Clone, Copy)]
pub struct StunIntent {
    pub target: Entity,
    pub duration: f32,
}

/// Event: враг умер (один раз на entity)
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDied {
    pub entity: Entity,
}

/// Система: state transitions (первая в enemy-цепочке)
///
/// - non-Dead с vitals ≤ 0 ⇒ Dead ровно один раз: halt, "Die" trigger,
///   EnemyDied, DespawnAfter(grace)
/// - StunIntent по non-Dead ⇒ Stunned (deadline переписывается)
/// - Stunned с истёкшим deadline ⇒ Chasing, движение возобновляется
pub fn enemy_state_transitions(
    mut enemies: Query<(Entity, &EnemyVitals, &mut EnemyState, &mut NavAgent)>,
    mut stun_intents: EventReader<StunIntent>,
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut died_events: EventWriter<EnemyDied>,
    mut anim_events: EventWriter<AnimationCommand>,
) {
    let now = time.elapsed_secs();

    // Смерть и снятие стана
    for (entity, vitals, mut state, mut agent) in enemies.iter_mut() {
        match *state {
            EnemyState::Dead => {}

            _ if !vitals.is_alive() => {
                *state = EnemyState::Dead;
                agent.reset_path();
                agent.is_stopped = true;

                anim_events.write(AnimationCommand::Trigger { entity, name: "Die" });
                died_events.write(EnemyDied { entity });
                commands
                    .entity(entity)
                    .insert(DespawnAfter::new(now + DEATH_DESPAWN_DELAY));

                crate::log_info(&format!("Enemy {:?} died", entity));
            }

            EnemyState::Stunned { until } if now >= until => {
                *state = EnemyState::Chasing;
                agent.is_stopped = false;
            }

            _ => {}
        }
    }

    // Stun запросы (после смерти — no-op; повторный stun рестартует таймер)
    for intent in stun_intents.read() {
        let Ok((_, _, mut state, mut agent)) = enemies.get_mut(intent.target) else {
            continue;
        };
        if *state == EnemyState::Dead {
            continue;
        }

        *state = EnemyState::Stunned {
            until: now + intent.duration,
        };
        agent.reset_path();
        agent.is_stopped = true;
    }
}

/// Система: преследование цели
///
/// Repath не чаще repath_interval (deadline gate) — ограничивает стоимость
/// navigation запросов.
pub fn enemy_chase(
    mut enemies: Query<(&EnemyState, &mut EnemyAgent, &mut NavAgent)>,
    targets: Query<&Transform>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for (state, mut agent, mut nav) in enemies.iter_mut() {
        if *state != EnemyState::Chasing {
            continue;
        }
        let Some(target) = agent.target else {
            continue;
        };
        let Ok(target_transform) = targets.get(target) else {
            continue;
        };

        if now < agent.next_repath_at {
            continue;
        }
        agent.next_repath_at = now + agent.repath_interval;

        nav.set_destination(target_transform.translation);
    }
}

/// Система: попытка атаки
///
/// Цель в attack_range и cooldown готов ⇒ сброс пути (не скользим во время
/// атаки) + AttackIntent; cooldown тратит общий resolver.
pub fn enemy_attack(
    mut enemies: Query<(
        Entity,
        &Transform,
        &EnemyState,
        &EnemyAgent,
        &AttackState,
        &mut NavAgent,
    )>,
    targets: Query<&Transform>,
    time: Res<Time<Fixed>>,
    mut attack_events: EventWriter<AttackIntent>,
) {
    let now = time.elapsed_secs();

    for (entity, transform, state, agent, attack_state, mut nav) in enemies.iter_mut() {
        if *state != EnemyState::Chasing {
            continue;
        }
        let Some(target) = agent.target else {
            continue;
        };
        let Ok(target_transform) = targets.get(target) else {
            continue;
        };

        let sqr_distance = target_transform
            .translation
            .distance_squared(transform.translation);
        if sqr_distance > agent.attack_range * agent.attack_range {
            continue;
        }
        if !attack_state.ready(now) {
            continue;
        }

        nav.reset_path();
        attack_events.write(AttackIntent { attacker: entity });
    }
}

/// Система: hit-flinch триггер при полученном уроне (живые враги)
pub fn react_to_damage(
    mut dealt_events: EventReader<DamageDealt>,
    enemies: Query<&EnemyState>,
    mut anim_events: EventWriter<AnimationCommand>,
) {
    for dealt in dealt_events.read() {
        let Ok(state) = enemies.get(dealt.target) else {
            continue;
        };
        if *state == EnemyState::Dead {
            continue;
        }

        anim_events.write(AnimationCommand::Trigger {
            entity: dealt.target,
            name: "Hit",
        });
    }
}

/// Система: animation speed параметр (последняя в enemy-цепочке)
///
/// normalized = |velocity| / max(speed, 0.001) — зажато от деления на ноль.
pub fn update_enemy_animation(
    enemies: Query<(Entity, &EnemyState, &NavAgent)>,
    mut anim_events: EventWriter<AnimationCommand>,
) {
    for (entity, state, nav) in enemies.iter() {
        if *state == EnemyState::Dead {
            continue;
        }

        let normalized = nav.velocity.length() / nav.speed.max(0.001);
        anim_events.write(AnimationCommand::Speed {
            entity,
            value: normalized,
        });
    }
}
