//! Navigation collaborator — opaque mover контракт
//!
//! Core никогда не реализует pathfinding: NavAgent — это интерфейс
//! nav-агента движка (SetDestination / ResetPath / isStopped / velocity /
//! speed). drive_nav_agents — headless-замена: прямолинейное движение к
//! destination с ограниченным yaw-доворотом, для тестов и headless режима.

use bevy::prelude::*;

/// Состояние nav-агента
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    /// Максимальная скорость (m/s); Progression синкает сюда move_speed
    pub speed: f32,
    /// Дистанция остановки перед destination
    pub stopping_distance: f32,
    /// Halt-флаг (stun/death); путь сохраняется, движение стоит
    pub is_stopped: bool,
    /// Фактическая скорость за последний тик (для animation speed параметра)
    pub velocity: Vec3,
    /// Скорость yaw-доворота к направлению движения
    pub turn_speed: f32,

    destination: Option<Vec3>,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            speed: 5.0,
            stopping_distance: 0.5,
            is_stopped: false,
            velocity: Vec3::ZERO,
            turn_speed: 8.0,
            destination: None,
        }
    }
}

impl NavAgent {
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            ..Default::default()
        }
    }

    /// Запросить путь к точке
    pub fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
    }

    /// Отменить текущий путь (остановка без halt-флага)
    pub fn reset_path(&mut self) {
        self.destination = None;
    }

    pub fn has_path(&self) -> bool {
        self.destination.is_some()
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }
}

/// Система: headless движение агентов к destination
///
/// Прямолинейный шаг speed × Δt, остановка внутри stopping_distance
/// (путь сохраняется, как у NavMesh-агента). Facing доворачивается к
/// направлению движения ограниченным slerp.
pub fn drive_nav_agents(
    mut query: Query<(&mut Transform, &mut NavAgent)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut agent) in query.iter_mut() {
        agent.velocity = Vec3::ZERO;

        if agent.is_stopped {
            continue;
        }
        let Some(destination) = agent.destination else {
            continue;
        };

        let mut to_target = destination - transform.translation;
        to_target.y = 0.0;
        let distance = to_target.length();

        if distance <= agent.stopping_distance {
            continue;
        }

        let direction = to_target / distance;
        let step = (agent.speed * delta).min(distance - agent.stopping_distance);

        transform.translation += direction * step;
        agent.velocity = direction * agent.speed;

        // Facing к направлению движения
        if direction.length_squared() > 0.1 {
            let target_rotation = Transform::from_translation(transform.translation)
                .looking_to(direction, Vec3::Y)
                .rotation;
            let t = (agent.turn_speed * delta).min(1.0);
            transform.rotation = transform.rotation.slerp(target_rotation, t);
        }
    }
}
