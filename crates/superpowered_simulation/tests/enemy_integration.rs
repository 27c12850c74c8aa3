//! Enemy AI integration tests
//!
//! Автомат Chasing/Stunned/Dead против живого мира: преследование с
//! repath gating, стан с deadline, одноразовая смерть + grace despawn.

use bevy::prelude::*;
use superpowered_simulation::*;

fn create_enemy_app() -> App {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);
    app
}

/// Helper: герой-цель на слое PLAYER
fn spawn_hero(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            Progression::new(Some(ClassData::titan()), 1),
            NavAgent::default(),
            Collider::default(),
            CollisionLayer(layers::PLAYER),
        ))
        .id()
}

/// Helper: полный enemy bundle, преследует target
fn spawn_enemy(app: &mut App, position: Vec3, target: Entity, health: f32) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            EnemyState::default(),
            EnemyVitals::new(health),
            EnemyAgent::chasing(target),
            AttackProfile::melee(10.0, 1.0, LayerMask::single(layers::PLAYER)),
            AttackState::default(),
            NavAgent::with_speed(4.0),
            Collider::default(),
            CollisionLayer(layers::ENEMY),
        ))
        .id()
}

fn enemy_state(app: &App, entity: Entity) -> EnemyState {
    *app.world().get::<EnemyState>(entity).expect("state")
}

fn position(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<Transform>(entity).expect("transform").translation
}

#[test]
fn test_enemy_chases_and_attacks_target() {
    let mut app = create_enemy_app();

    let hero = spawn_hero(&mut app, Vec3::ZERO);
    let enemy = spawn_enemy(&mut app, Vec3::new(0.0, 0.0, 6.0), hero, 100.0);

    let start_distance = position(&app, enemy).distance(position(&app, hero));

    // 1s преследования: дистанция сокращается
    for _ in 0..60 {
        app.update();
    }
    let mid_distance = position(&app, enemy).distance(position(&app, hero));
    assert!(mid_distance < start_distance);

    // Ещё 2s: враг дошёл до attack_range и начал бить героя
    for _ in 0..120 {
        app.update();
    }
    let hero_progression = app.world().get::<Progression>(hero).expect("progression");
    assert!(
        hero_progression.current_health < hero_progression.max_health,
        "enemy in range must have attacked"
    );
    assert_eq!(enemy_state(&app, enemy), EnemyState::Chasing);
}

#[test]
fn test_stun_halts_movement_and_expires() {
    let mut app = create_enemy_app();

    let hero = spawn_hero(&mut app, Vec3::ZERO);
    let enemy = spawn_enemy(&mut app, Vec3::new(0.0, 0.0, 8.0), hero, 100.0);

    // Разогнались в Chasing
    for _ in 0..10 {
        app.update();
    }
    assert_eq!(enemy_state(&app, enemy), EnemyState::Chasing);

    app.world_mut().send_event(StunIntent {
        target: enemy,
        duration: 2.0,
    });
    app.update();

    // Переход немедленный, движение остановлено
    assert!(matches!(enemy_state(&app, enemy), EnemyState::Stunned { .. }));
    let frozen_at = position(&app, enemy);

    // Всё окно стана: позиция не меняется, velocity нулевая
    for _ in 0..115 {
        app.update();
        assert!(matches!(enemy_state(&app, enemy), EnemyState::Stunned { .. }));
        let nav = app.world().get::<NavAgent>(enemy).expect("nav");
        assert_eq!(nav.velocity, Vec3::ZERO);
    }
    assert_eq!(position(&app, enemy), frozen_at);

    // Deadline истёк (2.0s = 120 тиков) — снова Chasing, движение ожило
    for _ in 0..10 {
        app.update();
    }
    assert_eq!(enemy_state(&app, enemy), EnemyState::Chasing);

    for _ in 0..30 {
        app.update();
    }
    assert_ne!(position(&app, enemy), frozen_at);
}

#[test]
fn test_restun_restarts_timer() {
    let mut app = create_enemy_app();

    let hero = spawn_hero(&mut app, Vec3::ZERO);
    let enemy = spawn_enemy(&mut app, Vec3::new(0.0, 0.0, 8.0), hero, 100.0);
    app.update();

    app.world_mut().send_event(StunIntent {
        target: enemy,
        duration: 1.0,
    });
    app.update();

    // Через полсекунды — повторный stun на 1.0s (supersede, не stack)
    for _ in 0..30 {
        app.update();
    }
    app.world_mut().send_event(StunIntent {
        target: enemy,
        duration: 1.0,
    });
    app.update();

    // Старый deadline (ещё ~0.5s) прошёл бы здесь — но таймер перезапущен
    for _ in 0..45 {
        app.update();
    }
    assert!(matches!(enemy_state(&app, enemy), EnemyState::Stunned { .. }));

    // Новый deadline истекает
    for _ in 0..20 {
        app.update();
    }
    assert_eq!(enemy_state(&app, enemy), EnemyState::Chasing);
}

#[test]
fn test_death_is_terminal_and_despawns_after_grace() {
    let mut app = create_enemy_app();

    let hero = spawn_hero(&mut app, Vec3::new(50.0, 0.0, 0.0)); // вне attack range
    let enemy = spawn_enemy(&mut app, Vec3::ZERO, hero, 30.0);
    app.update();

    app.world_mut().send_event(DamageIntent {
        attacker: hero,
        target: enemy,
        amount: 30.0,
    });
    app.update(); // урон применён
    app.update(); // state check видит vitals == 0

    assert_eq!(enemy_state(&app, enemy), EnemyState::Dead);
    let nav = app.world().get::<NavAgent>(enemy).expect("nav");
    assert!(nav.is_stopped);

    let despawn_at = app.world().get::<DespawnAfter>(enemy).expect("grace delay").at;

    // Dead терминален: дальнейшие damage/stun — no-op
    app.world_mut().send_event(DamageIntent {
        attacker: hero,
        target: enemy,
        amount: 100.0,
    });
    app.world_mut().send_event(StunIntent {
        target: enemy,
        duration: 5.0,
    });
    app.update();

    assert_eq!(enemy_state(&app, enemy), EnemyState::Dead);
    assert_eq!(
        app.world().get::<DespawnAfter>(enemy).expect("grace delay").at,
        despawn_at,
        "death handling must not re-run"
    );

    // Grace delay (3s) — труп убирается из мира
    for _ in 0..200 {
        app.update();
    }
    assert!(app.world().get_entity(enemy).is_err(), "corpse despawned");
}

#[test]
fn test_dead_enemy_emits_died_event_once() {
    let mut app = create_enemy_app();

    let hero = spawn_hero(&mut app, Vec3::new(50.0, 0.0, 0.0));
    let enemy = spawn_enemy(&mut app, Vec3::ZERO, hero, 10.0);
    app.update();

    app.world_mut().send_event(DamageIntent {
        attacker: hero,
        target: enemy,
        amount: 25.0,
    });
    app.update();
    app.update();

    let events = app.world().resource::<Events<EnemyDied>>();
    let mut cursor = events.get_cursor();
    let died: Vec<_> = cursor.read(events).collect();
    assert_eq!(died.len(), 1);
    assert_eq!(died[0].entity, enemy);

    // Добить "ещё раз" — новых событий нет
    app.world_mut().send_event(DamageIntent {
        attacker: hero,
        target: enemy,
        amount: 25.0,
    });
    for _ in 0..3 {
        app.update();
    }

    let events = app.world().resource::<Events<EnemyDied>>();
    let mut cursor = events.get_cursor();
    assert_eq!(cursor.read(events).count(), 0, "EnemyDied must fire once");
}
