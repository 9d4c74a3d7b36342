//! World компоненты: классификация коллизий, препятствия

use bevy::math::Vec3A;
use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Классификация коллайдеров (вместо engine layer masks / tags)
///
/// Передаётся явно в probe (`ObstacleProbe::raycast`) и в contact matching
/// (`EnemyContact::other`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum CollisionClass {
    /// Игрок (alert по контакту)
    Player,
    /// Другие враги
    Enemy,
    /// Стены, ящики: всё что обходим через pathfinding
    Obstacle,
}

/// Препятствие: axis-aligned box с центром в `Transform.translation`
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Obstacle {
    /// Половина размера box по каждой оси (метры)
    pub half_extents: Vec3,
    pub class: CollisionClass,
}

impl Default for Obstacle {
    fn default() -> Self {
        Self {
            half_extents: Vec3::splat(0.5),
            class: CollisionClass::Obstacle,
        }
    }
}

impl Obstacle {
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            half_extents,
            ..default()
        }
    }

    /// Bounding box в world координатах
    pub fn aabb_at(&self, center: Vec3) -> Aabb3d {
        Aabb3d::new(Vec3A::from(center), Vec3A::from(self.half_extents))
    }
}
