//! Headless симуляция SuperPowered
//!
//! Запускает Bevy App без рендера: один герой против пары врагов,
//! 1000 тиков, прогресс в stdout.

use bevy::prelude::*;
use superpowered_simulation::*;

fn main() {
    println!("Starting SuperPowered headless simulation");

    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);

    // Герой: Titan с melee профилем, цели — слой ENEMY
    let hero = app
        .world_mut()
        .spawn((
            Transform::from_translation(Vec3::ZERO),
            Progression::new(Some(ClassData::titan()), 3),
            AttackProfile::melee(25.0, 1.5, LayerMask::single(layers::ENEMY)),
            AttackState::default(),
            AimTarget::default(),
            NavAgent::default(),
            Collider::default(),
            CollisionLayer(layers::PLAYER),
        ))
        .id();

    // Два врага, преследуют героя
    for x in [6.0, -5.0] {
        app.world_mut().spawn((
            Transform::from_translation(Vec3::new(x, 0.0, 2.0)),
            EnemyState::default(),
            EnemyVitals::new(80.0),
            EnemyAgent::chasing(hero),
            AttackProfile::melee(10.0, 1.0, LayerMask::single(layers::PLAYER)),
            AttackState::default(),
            NavAgent::with_speed(4.0),
            Collider::default(),
            CollisionLayer(layers::ENEMY),
        ));
    }

    // Герой постоянно атакует в сторону врагов
    for tick in 0..1000 {
        app.world_mut().send_event(AttackIntent { attacker: hero });
        app.update();

        if tick % 100 == 0 {
            let entity_count = app.world().entities().len();
            let health = app
                .world()
                .get::<Progression>(hero)
                .map(|p| p.current_health)
                .unwrap_or(0.0);
            println!("Tick {}: {} entities, hero HP {}", tick, entity_count, health);
        }
    }

    println!("Simulation complete!");
}
