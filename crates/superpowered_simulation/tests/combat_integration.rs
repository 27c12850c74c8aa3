//! Combat integration tests
//!
//! Headless App, каждый app.update() — один фиксированный тик (1/60 s).
//! Проверяем shape-алгоритмы атак, cooldown gating и projectile lifecycle
//! против живых entity в мире.

use bevy::prelude::*;
use superpowered_simulation::*;

/// Helper: headless App со всеми подсистемами
fn create_combat_app() -> App {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);
    app
}

/// Helper: атакующий с данным профилем (facing по умолчанию = -Z)
fn spawn_attacker(app: &mut App, position: Vec3, profile: AttackProfile) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            profile,
            AttackState::default(),
            Collider::default(),
            CollisionLayer(layers::PLAYER),
        ))
        .id()
}

/// Helper: статичная damageable цель на слое ENEMY
fn spawn_target(app: &mut App, position: Vec3, health: f32) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            EnemyVitals::new(health),
            Collider::default(),
            CollisionLayer(layers::ENEMY),
        ))
        .id()
}

fn vitals(app: &App, entity: Entity) -> EnemyVitals {
    *app.world().get::<EnemyVitals>(entity).expect("vitals")
}

fn projectile_count(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&Projectile>();
    query.iter(world).count()
}

#[test]
fn test_melee_hits_all_overlapping_targets() {
    let mut app = create_combat_app();

    // damage=10, radius=1, range=2: центр удара в (0,0,-2)
    let mut profile = AttackProfile::melee(10.0, 1.0, LayerMask::single(layers::ENEMY));
    profile.melee_range = 2.0;
    profile.melee_radius = 1.0;
    let attacker = spawn_attacker(&mut app, Vec3::ZERO, profile);

    let t1 = spawn_target(&mut app, Vec3::new(0.0, 0.0, -2.0), 50.0);
    let t2 = spawn_target(&mut app, Vec3::new(0.5, 0.0, -2.0), 50.0);
    let t3 = spawn_target(&mut app, Vec3::new(-0.5, 0.0, -2.3), 50.0);
    app.update(); // коммит спавна + spatial snapshot

    app.world_mut().send_event(AttackIntent { attacker });
    app.update();

    // Multi-target: все трое получили по 10 за одну атаку
    for target in [t1, t2, t3] {
        assert_eq!(vitals(&app, target).current, 40.0);
    }
}

#[test]
fn test_try_attack_gated_by_cooldown() {
    let mut app = create_combat_app();

    let profile = AttackProfile::melee(10.0, 1.0, LayerMask::single(layers::ENEMY));
    let attacker = spawn_attacker(&mut app, Vec3::ZERO, profile);
    let target = spawn_target(&mut app, Vec3::new(0.0, 0.0, -2.0), 100.0);
    app.update();

    // Два intent'а в одном окне cooldown — эффект ровно один раз
    app.world_mut().send_event(AttackIntent { attacker });
    app.world_mut().send_event(AttackIntent { attacker });
    app.update();
    assert_eq!(vitals(&app, target).current, 90.0);

    // Следующий тик всё ещё внутри окна (cooldown = 1s)
    app.world_mut().send_event(AttackIntent { attacker });
    app.update();
    assert_eq!(vitals(&app, target).current, 90.0);

    // После истечения cooldown атака проходит снова
    for _ in 0..65 {
        app.update();
    }
    app.world_mut().send_event(AttackIntent { attacker });
    app.update();
    assert_eq!(vitals(&app, target).current, 80.0);
}

#[test]
fn test_hitscan_hits_only_nearest_colinear_target() {
    let mut app = create_combat_app();

    let profile = AttackProfile::hitscan(15.0, 1.0, LayerMask::single(layers::ENEMY));
    let attacker = spawn_attacker(&mut app, Vec3::ZERO, profile);

    // Оба на линии forward (-Z); hitscan должен задеть только ближнего
    let near = spawn_target(&mut app, Vec3::new(0.0, 0.0, -3.0), 50.0);
    let far = spawn_target(&mut app, Vec3::new(0.0, 0.0, -6.0), 50.0);
    app.update();

    app.world_mut().send_event(AttackIntent { attacker });
    app.update();

    assert_eq!(vitals(&app, near).current, 35.0);
    assert_eq!(vitals(&app, far).current, 50.0);
}

#[test]
fn test_projectile_flies_hits_once_and_despawns() {
    let mut app = create_combat_app();

    let profile = AttackProfile::projectile(
        20.0,
        1.0,
        LayerMask::single(layers::ENEMY),
        ProjectileTemplate::new("res://fx/bolt.tscn"),
    );
    let attacker = spawn_attacker(&mut app, Vec3::ZERO, profile);
    let target = spawn_target(&mut app, Vec3::new(0.0, 0.0, -5.0), 60.0);
    app.update();

    app.world_mut().send_event(AttackIntent { attacker });
    app.update();

    // Projectile заспавнен
    assert_eq!(projectile_count(&mut app), 1);

    // 18 m/s: ~5m до цели — хватает секунды полёта
    for _ in 0..60 {
        app.update();
    }

    // Ровно один hit, projectile удалён
    assert_eq!(vitals(&app, target).current, 40.0);
    assert_eq!(projectile_count(&mut app), 0);
}

#[test]
fn test_projectile_expires_without_contact() {
    let mut app = create_combat_app();

    let mut profile = AttackProfile::projectile(
        20.0,
        1.0,
        LayerMask::single(layers::ENEMY),
        ProjectileTemplate::new("res://fx/bolt.tscn"),
    );
    profile.projectile_lifetime = 0.5;
    let attacker = spawn_attacker(&mut app, Vec3::ZERO, profile);

    // Цель далеко в стороне — контакта не будет
    let bystander = spawn_target(&mut app, Vec3::new(20.0, 0.0, 5.0), 60.0);
    app.update();

    app.world_mut().send_event(AttackIntent { attacker });
    app.update();

    // lifetime 0.5s = 30 тиков
    for _ in 0..40 {
        app.update();
    }

    assert_eq!(projectile_count(&mut app), 0, "projectile must expire");
    assert_eq!(vitals(&app, bystander).current, 60.0, "no damage on expiry");
}

#[test]
fn test_projectile_without_template_degrades_gracefully() {
    let mut app = create_combat_app();

    let mut profile = AttackProfile::projectile(
        20.0,
        1.0,
        LayerMask::single(layers::ENEMY),
        ProjectileTemplate::new("unused"),
    );
    profile.projectile_template = None;
    let attacker = spawn_attacker(&mut app, Vec3::ZERO, profile);
    app.update();

    app.world_mut().send_event(AttackIntent { attacker });
    app.update();

    // Спавна нет, но атака потратила cooldown
    assert_eq!(projectile_count(&mut app), 0);

    let state = app.world().get::<AttackState>(attacker).expect("state");
    assert!(state.next_attack_at > 0.0);
}

#[test]
fn test_damage_pipeline_emits_progression_events() {
    let mut app = create_combat_app();

    let hero = app
        .world_mut()
        .spawn((
            Transform::from_translation(Vec3::ZERO),
            Progression::new(Some(ClassData::titan()), 1),
            NavAgent::default(),
            Collider::default(),
            CollisionLayer(layers::PLAYER),
        ))
        .id();
    app.update(); // init notes слиты

    let max = app.world().get::<Progression>(hero).unwrap().max_health;

    app.world_mut().send_event(DamageIntent {
        attacker: hero,
        target: hero,
        amount: 12.0,
    });
    app.update();

    let progression = app.world().get::<Progression>(hero).unwrap();
    assert_eq!(progression.current_health, max - 12.0);

    // HealthChanged доступен внешним подписчикам в том же тике
    let events = app.world().resource::<Events<HealthChanged>>();
    let mut cursor = events.get_cursor();
    let last = cursor.read(events).last().expect("health event");
    assert_eq!(last.entity, hero);
    assert_eq!(last.current, max - 12.0);
    assert_eq!(last.max, max);
}
