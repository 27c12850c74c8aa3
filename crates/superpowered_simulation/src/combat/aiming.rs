//! Aiming — доворот facing к точке прицеливания
//!
//! Host (camera/input collaborator) пишет screen-to-world точку в
//! AimTarget.point; система доворачивает yaw ограниченным slerp за тик.
//! Best-effort: point = None ⇒ остаёмся на текущем facing, dispatch атак
//! не блокируется.

use bevy::prelude::*;

/// Точка прицеливания attacker'а (для player-controlled)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct AimTarget {
    /// World-точка от внешнего screen-to-world запроса
    pub point: Option<Vec3>,
    /// Скорость доворота (slerp factor = turn_speed × Δt, ограничен 1.0)
    pub turn_speed: f32,
}

impl Default for AimTarget {
    fn default() -> Self {
        Self {
            point: None,
            turn_speed: 18.0,
        }
    }
}

/// Система: yaw-доворот к aim point
pub fn face_aim_targets(
    mut query: Query<(&mut Transform, &AimTarget)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, aim) in query.iter_mut() {
        let Some(point) = aim.point else {
            continue;
        };

        let mut dir = point - transform.translation;
        dir.y = 0.0; // только yaw
        if dir.length_squared() < 1e-4 {
            continue;
        }

        let target_rotation = Transform::from_translation(transform.translation)
            .looking_to(dir.normalize(), Vec3::Y)
            .rotation;

        let t = (aim.turn_speed * delta).min(1.0);
        transform.rotation = transform.rotation.slerp(target_rotation, t);
    }
}
