//! SuperPowered Simulation Core
//!
//! Gameplay-логика real-time action игры на Bevy ECS 0.16:
//! - Progression: core/bonus статы, level/XP, derived статы, health/mana
//! - Combat: Damageable capability, cooldown-gated dispatch трёх форм атаки
//!   (melee / projectile / hitscan), projectile lifecycle
//! - Enemy AI: автомат Chasing/Stunned/Dead
//!
//! Внешние collaborator'ы (движок): навигация (nav::NavAgent — opaque
//! mover), физические запросы (spatial::SpatialIndex — headless замена),
//! animation sink (animation::AnimationCommand), события для UI.
//! Rendering/input/pathfinding core не реализует.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

// Публичные модули
pub mod animation;
pub mod combat;
pub mod components;
pub mod enemy;
pub mod logger;
pub mod nav;
pub mod progression;
pub mod spatial;

// Re-export базовых типов для удобства
pub use animation::{AnimationCommand, AnimationPlugin};
pub use combat::{
    AimTarget, AttackIntent, AttackProfile, AttackState, AttackType, CombatPlugin, DamageDealt,
    DamageIntent, Damageable, Projectile, ProjectileTemplate,
};
pub use components::{layers, CollisionLayer, CoreStats, DespawnAfter, LayerMask};
pub use enemy::{EnemyAgent, EnemyDied, EnemyPlugin, EnemyState, EnemyVitals, StunIntent};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};
pub use nav::NavAgent;
pub use progression::{
    CharacterDied, ClassData, HealthChanged, HeroClass, LeveledUp, ManaChanged, Progression,
    ProgressionPlugin,
};
pub use spatial::{Collider, RaycastHit, SpatialIndex};

/// Частота simulation tick
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Порядок систем в тике фиксированный:
/// 1. Enemy FSM: state check → chase → attack (смерть подавляет
///    movement/attack той же entity)
/// 2. Движение (opaque mover) + spatial snapshot по свежим позициям
/// 3. Combat resolution: aiming → dispatch → projectiles → damage
/// 4. Derived output: flinch/speed анимация, move_speed sync, UI events
/// 5. Cleanup: отложенные despawn'ы
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .init_resource::<SpatialIndex>()
            .add_plugins((AnimationPlugin, ProgressionPlugin, CombatPlugin, EnemyPlugin));

        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: enemy state machine
                enemy::enemy_state_transitions,
                enemy::enemy_chase,
                enemy::enemy_attack,
                // Фаза 2: движение + spatial snapshot
                nav::drive_nav_agents,
                spatial::rebuild_spatial_index,
                // Фаза 3: combat resolution
                combat::face_aim_targets,
                combat::resolve_attacks,
                combat::update_projectiles,
                combat::apply_damage,
                // Фаза 4: derived output + notifications
                enemy::react_to_damage,
                enemy::update_enemy_animation,
                progression::sync_move_speed,
                progression::drain_progression_notes,
                // Фаза 5: cleanup
                components::despawn_after_timeout,
            )
                .chain(), // Последовательное выполнение
        );
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Каждый `app.update()` — ровно один фиксированный тик (1/60 s):
/// TimeUpdateStrategy::ManualDuration выравнивает virtual clock с
/// accumulator'ом FixedUpdate, что делает прогоны детерминированными.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();

    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));

    app
}

/// Snapshot компонентов мира для сравнения детерминизма
///
/// Entity сортируются по index, компоненты сериализуются через Debug —
/// достаточно для побайтового сравнения прогонов.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
