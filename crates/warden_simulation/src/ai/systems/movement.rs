//! AI movement systems.

use bevy::prelude::*;

use crate::ai::{Enemy, EnemyConfig, MovementTarget};
use crate::components::Player;
use crate::navigation::{steer, NavigationPath, ObstacleField, Pathfinding};

/// Система: locomotion врагов
///
/// `MovementTarget` → `steer` (probe + pathfinding) → `Transform.translation`.
pub fn move_enemies(
    mut enemies: Query<
        (
            Entity,
            &mut Transform,
            &EnemyConfig,
            &MovementTarget,
            &mut NavigationPath,
        ),
        (With<Enemy>, Without<Player>),
    >,
    field: Res<ObstacleField>,
    pathfinding: Res<Pathfinding>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, config, target, mut path) in enemies.iter_mut() {
        let step = steer(
            transform.translation,
            target.0,
            config,
            &mut path,
            &*field,
            pathfinding.finder(),
            delta,
        );

        if step.path_assigned {
            crate::log(&format!(
                "🧭 {:?} obstacle ahead → detour with {} waypoints",
                entity,
                path.waypoints().len()
            ));
        }
        if step.path_completed {
            crate::log(&format!("🧭 {:?} detour complete → heading to {:?}", entity, target.0));
        }

        if transform.translation != step.position {
            transform.translation = step.position;
        }
    }
}
