//! Obstacle probe: raycast + overlap запросы к препятствиям
//!
//! Physics живёт у host'а; AI видит мир только через `ObstacleProbe`.
//! `ObstacleField`: встроенная реализация поверх `bevy::math::bounding`.

use bevy::math::bounding::{Aabb3d, BoundingSphere, IntersectsVolume, RayCast3d};
use bevy::math::{Dir3A, Vec3A};
use bevy::prelude::*;

use crate::components::{CollisionClass, Obstacle};

/// Попадание probe луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// Дистанция от origin до точки входа
    pub distance: f32,
    pub point: Vec3,
}

/// Запросы к физике, которые нужны AI
pub trait ObstacleProbe {
    /// Луч из `origin` вдоль `direction` (не обязательно normalized) длиной
    /// `max_distance`; учитываются только коллайдеры класса `class`.
    /// Нулевое направление → `None`.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        class: CollisionClass,
    ) -> Option<ProbeHit>;

    /// Пересекает ли сфера (`point`, `radius`) коллайдер класса `class`
    fn overlaps(&self, point: Vec3, radius: f32, class: CollisionClass) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct FieldShape {
    aabb: Aabb3d,
    class: CollisionClass,
}

/// Snapshot препятствий сцены (пересобирается в начале каждого тика)
#[derive(Resource, Debug, Clone, Default)]
pub struct ObstacleField {
    shapes: Vec<FieldShape>,
}

impl ObstacleField {
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn insert(&mut self, aabb: Aabb3d, class: CollisionClass) {
        self.shapes.push(FieldShape { aabb, class });
    }

    /// Удобство для тестов и demo: box по центру и half extents
    pub fn with_box(mut self, center: Vec3, half_extents: Vec3, class: CollisionClass) -> Self {
        self.insert(Aabb3d::new(Vec3A::from(center), Vec3A::from(half_extents)), class);
        self
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl ObstacleProbe for ObstacleField {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        class: CollisionClass,
    ) -> Option<ProbeHit> {
        let Ok(dir) = Dir3A::new(Vec3A::from(direction)) else {
            return None;
        };
        let ray = RayCast3d::new(Vec3A::from(origin), dir, max_distance);

        self.shapes
            .iter()
            .filter(|shape| shape.class == class)
            .filter_map(|shape| ray.aabb_intersection_at(&shape.aabb))
            .min_by(|a, b| a.total_cmp(b))
            .map(|distance| ProbeHit {
                distance,
                point: origin + Vec3::from(*dir) * distance,
            })
    }

    fn overlaps(&self, point: Vec3, radius: f32, class: CollisionClass) -> bool {
        let sphere = BoundingSphere::new(Vec3A::from(point), radius);
        self.shapes
            .iter()
            .any(|shape| shape.class == class && sphere.intersects(&shape.aabb))
    }
}

/// Система: пересобирает `ObstacleField` из `Obstacle` entities
pub fn sync_obstacle_field(
    obstacles: Query<(&Obstacle, &Transform)>,
    mut field: ResMut<ObstacleField>,
) {
    field.clear();
    for (obstacle, transform) in obstacles.iter() {
        field.insert(obstacle.aabb_at(transform.translation), obstacle.class);
    }
}
