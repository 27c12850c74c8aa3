//! Projectile lifecycle
//!
//! Линейное движение forward × speed × Δt, без физической интеграции.
//! Жив от спавна до (a) истечения lifetime или (b) первого контакта с
//! целью по mask. Контакт: ровно один DamageIntent, потом despawn —
//! first contact wins даже при нескольких перекрывающихся целях.

use bevy::prelude::*;

use crate::combat::damage::DamageIntent;
use crate::components::LayerMask;
use crate::spatial::SpatialIndex;

/// Projectile instance (короткоживущая entity)
#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    /// Кто выстрелил (self-hit guard)
    pub shooter: Entity,
    pub damage: f32,
    /// Метры в секунду вдоль facing
    pub speed: f32,
    /// Секунды от spawned_at до expiry
    pub lifetime: f32,
    pub contact_radius: f32,
    pub target_mask: LayerMask,
    pub spawned_at: f32,
}

/// Система: движение + контакт + expiry за один проход
///
/// Порядок внутри тика: сначала шаг движения, потом контакт по новой
/// позиции, потом expiry. Despawn через Commands применяется до следующей
/// системы цепочки — двойного срабатывания нет.
pub fn update_projectiles(
    mut projectiles: Query<(Entity, &mut Transform, &Projectile)>,
    spatial: Res<SpatialIndex>,
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut damage_events: EventWriter<DamageIntent>,
) {
    let now = time.elapsed_secs();
    let delta = time.delta_secs();

    for (entity, mut transform, projectile) in projectiles.iter_mut() {
        let step = transform.forward() * (projectile.speed * delta);
        transform.translation += step;

        // Первый qualifying контакт (ближайший), shooter исключён
        let contact = spatial
            .overlap_sphere(
                transform.translation,
                projectile.contact_radius,
                projectile.target_mask,
            )
            .into_iter()
            .filter(|&target| target != projectile.shooter)
            .min_by(|&a, &b| {
                let da = spatial.distance_to(a, transform.translation);
                let db = spatial.distance_to(b, transform.translation);
                da.total_cmp(&db)
            });

        if let Some(target) = contact {
            damage_events.write(DamageIntent {
                attacker: projectile.shooter,
                target,
                amount: projectile.damage,
            });

            commands.entity(entity).despawn();
            continue;
        }

        // Expiry без контакта — урона нет
        if now - projectile.spawned_at >= projectile.lifetime {
            commands.entity(entity).despawn();
        }
    }
}
