//! Spatial query service — headless замена физических запросов движка
//!
//! Core не реализует broadphase-физику: SpatialIndex перестраивается из
//! трансформов каждый тик и отвечает на overlap_sphere / raycast так же,
//! как физический collaborator host-движка. Линейный проход по entries —
//! достаточно для симуляции боя, host может подменить реальной физикой.

use bevy::prelude::*;

use crate::components::{CollisionLayer, LayerMask};

/// Сферический collider для spatial запросов
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Collider {
    /// Радиус (метры)
    pub radius: f32,
}

impl Default for Collider {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

#[derive(Debug, Clone, Copy)]
struct SpatialEntry {
    entity: Entity,
    position: Vec3,
    radius: f32,
    layer: u32,
}

/// Результат raycast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub entity: Entity,
    pub point: Vec3,
    pub distance: f32,
}

/// Снимок позиций/слоёв коллайдеров на текущий тик
#[derive(Resource, Debug, Default)]
pub struct SpatialIndex {
    entries: Vec<SpatialEntry>,
}

impl SpatialIndex {
    /// Все entity в сфере (пересечение коллайдеров), отфильтрованные по mask
    pub fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<Entity> {
        self.entries
            .iter()
            .filter(|entry| mask.contains(entry.layer))
            .filter(|entry| {
                let reach = radius + entry.radius;
                entry.position.distance_squared(center) <= reach * reach
            })
            .map(|entry| entry.entity)
            .collect()
    }

    /// Ближайшее пересечение луча со сферой коллайдера в пределах
    /// max_distance. `exclude` — guard против попадания в самого стрелка.
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
        exclude: Option<Entity>,
    ) -> Option<RaycastHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let mut nearest: Option<RaycastHit> = None;

        for entry in &self.entries {
            if !mask.contains(entry.layer) {
                continue;
            }
            if exclude == Some(entry.entity) {
                continue;
            }

            let Some(t) = ray_sphere_intersection(origin, direction, entry.position, entry.radius)
            else {
                continue;
            };

            if t > max_distance {
                continue;
            }

            if nearest.map_or(true, |hit| t < hit.distance) {
                nearest = Some(RaycastHit {
                    entity: entry.entity,
                    point: origin + direction * t,
                    distance: t,
                });
            }
        }

        nearest
    }

    /// Дистанция от точки до коллайдера entity (для выбора ближайшего
    /// контакта projectile). Неизвестная entity ⇒ INFINITY.
    pub fn distance_to(&self, entity: Entity, point: Vec3) -> f32 {
        self.entries
            .iter()
            .find(|entry| entry.entity == entity)
            .map(|entry| entry.position.distance(point))
            .unwrap_or(f32::INFINITY)
    }

    #[cfg(test)]
    fn insert(&mut self, entity: Entity, position: Vec3, radius: f32, layer: u32) {
        self.entries.push(SpatialEntry {
            entity,
            position,
            radius,
            layer,
        });
    }
}

/// Ближайший t ≥ 0 пересечения луча (origin + t×dir) со сферой
fn ray_sphere_intersection(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let projection = to_center.dot(direction);

    // Перпендикулярное расстояние от центра до луча
    let closest_sq = to_center.length_squared() - projection * projection;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }

    let half_chord = (radius_sq - closest_sq).sqrt();
    let t_near = projection - half_chord;
    let t_far = projection + half_chord;

    if t_near >= 0.0 {
        Some(t_near)
    } else if t_far >= 0.0 {
        // origin внутри сферы
        Some(0.0)
    } else {
        None
    }
}

/// Система: перестройка индекса из трансформов текущего тика
pub fn rebuild_spatial_index(
    mut index: ResMut<SpatialIndex>,
    query: Query<(Entity, &Transform, &Collider, &CollisionLayer)>,
) {
    index.entries.clear();

    for (entity, transform, collider, layer) in query.iter() {
        index.entries.push(SpatialEntry {
            entity,
            position: transform.translation,
            radius: collider.radius,
            layer: layer.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::layers;

    fn test_index() -> SpatialIndex {
        let mut index = SpatialIndex::default();
        index.insert(Entity::from_raw(1), Vec3::new(2.0, 0.0, 0.0), 0.5, layers::ENEMY);
        index.insert(Entity::from_raw(2), Vec3::new(5.0, 0.0, 0.0), 0.5, layers::ENEMY);
        index.insert(Entity::from_raw(3), Vec3::new(2.0, 0.0, 3.0), 0.5, layers::PLAYER);
        index
    }

    #[test]
    fn test_overlap_sphere_filters_by_mask_and_distance() {
        let index = test_index();
        let mask = LayerMask::single(layers::ENEMY);

        let hits = index.overlap_sphere(Vec3::new(2.0, 0.0, 0.0), 1.0, mask);
        assert_eq!(hits, vec![Entity::from_raw(1)]);

        // Радиус накрывает обоих врагов, player отфильтрован mask'ой
        let hits = index.overlap_sphere(Vec3::new(3.5, 0.0, 0.0), 2.0, mask);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_raycast_returns_nearest() {
        let index = test_index();
        let mask = LayerMask::single(layers::ENEMY);

        let hit = index
            .raycast(Vec3::ZERO, Vec3::X, 30.0, mask, None)
            .expect("ray should hit");

        // Два колинеарных врага — попадает только ближний
        assert_eq!(hit.entity, Entity::from_raw(1));
        assert!((hit.distance - 1.5).abs() < 1e-4); // 2.0 − радиус 0.5
    }

    #[test]
    fn test_raycast_respects_max_distance_and_exclude() {
        let index = test_index();
        let mask = LayerMask::single(layers::ENEMY);

        assert!(index.raycast(Vec3::ZERO, Vec3::X, 1.0, mask, None).is_none());

        let hit = index
            .raycast(Vec3::ZERO, Vec3::X, 30.0, mask, Some(Entity::from_raw(1)))
            .expect("ray should skip excluded and hit the far one");
        assert_eq!(hit.entity, Entity::from_raw(2));
    }

    #[test]
    fn test_ray_sphere_miss_and_inside() {
        // Луч мимо сферы
        assert!(ray_sphere_intersection(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 5.0, 0.0), 0.5).is_none());

        // Origin внутри сферы ⇒ t = 0
        let t = ray_sphere_intersection(Vec3::ZERO, Vec3::X, Vec3::ZERO, 1.0).unwrap();
        assert_eq!(t, 0.0);

        // Сфера позади луча
        assert!(ray_sphere_intersection(Vec3::ZERO, Vec3::X, Vec3::new(-5.0, 0.0, 0.0), 0.5).is_none());
    }
}
