//! AI decision-making module
//!
//! FSM патрульного врага: Patrolling → Pursuing → Investigating → Patrolling.
//! Движение к цели: через navigation (probe + pathfinding).

use bevy::prelude::*;

pub mod components;
pub mod error;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use error::ConfigError;
pub use events::*;

use crate::navigation::{sync_obstacle_field, ObstacleField, Pathfinding};

/// SystemSet всех AI систем (host может ставить свои системы before/after)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnemyAiSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate. Порядок выполнения:
/// 1. sync_obstacle_field: snapshot препятствий для probe/pathfinder
/// 2. expire_investigations: timeout расследования → Patrolling
/// 3. update_enemy_perception: дистанция до игрока → Pursuing / Investigating
/// 4. resolve_movement_targets: EnemyState → MovementTarget
/// 5. move_enemies: locomotion
/// 6. broadcast_contact_alerts: контакт с игроком → соседи в Pursuing
pub struct EnemyAiPlugin;

impl Plugin for EnemyAiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ObstacleField>()
            .init_resource::<Pathfinding>()
            .add_event::<EnemyContact>()
            .add_event::<EnemyAlerted>()
            .add_event::<EnemyStateChanged>()
            .add_systems(
                FixedUpdate,
                (
                    sync_obstacle_field,
                    systems::expire_investigations,
                    systems::update_enemy_perception,
                    systems::resolve_movement_targets,
                    systems::move_enemies,
                    systems::broadcast_contact_alerts,
                )
                    .chain() // Последовательное выполнение для детерминизма
                    .in_set(EnemyAiSet),
            );
    }
}
