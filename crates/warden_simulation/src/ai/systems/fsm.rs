//! FSM AI systems (perception, investigation timeout, target resolution).

use bevy::prelude::*;

use crate::ai::{
    Enemy, EnemyConfig, EnemyState, EnemyStateChanged, InvestigationTimer, MovementTarget,
    PatrolRoute,
};
use crate::components::Player;

/// Цель движения как чистая функция состояния
///
/// Path override из locomotion применяется позже и сюда не попадает.
pub fn desired_target(state: &EnemyState, route: &PatrolRoute, player_position: Vec3) -> Vec3 {
    match state {
        EnemyState::Pursuing => player_position,
        EnemyState::Investigating { position } => *position,
        EnemyState::Patrolling => route.current(),
    }
}

/// Система: timeout расследования → Patrolling + следующий waypoint
///
/// Запускается ДО perception: таймер, назначенный в тике T, начинает
/// отсчёт с тика T+1.
pub fn expire_investigations(
    mut enemies: Query<
        (Entity, &mut EnemyState, &mut InvestigationTimer, &mut PatrolRoute),
        With<Enemy>,
    >,
    mut changes: EventWriter<EnemyStateChanged>,
    time: Res<Time>,
) {
    let delta = time.delta();

    for (entity, mut state, mut timer, mut route) in enemies.iter_mut() {
        if !timer.tick(delta) {
            continue;
        }

        let previous = *state;
        *state = EnemyState::Patrolling;
        let next_waypoint = route.advance();

        crate::log(&format!(
            "🚶 {:?} {} → Patrolling (investigation timed out, next waypoint #{} at {:?})",
            entity,
            previous.label(),
            route.current_index(),
            next_waypoint
        ));
        changes.write(EnemyStateChanged {
            enemy: entity,
            from: previous,
            to: EnemyState::Patrolling,
        });
    }
}

/// Система: perception по дистанции до игрока
///
/// Правила (в порядке приоритета):
/// 1. игрок ближе `detection_range` → Pursuing (pending таймер отменяется)
/// 2. был Pursuing, игрок вне радиуса → Investigating в своей текущей позиции,
///    таймер на `investigation_time`
/// 3. иначе состояние не меняется
pub fn update_enemy_perception(
    players: Query<&Transform, With<Player>>,
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &EnemyConfig,
            &mut EnemyState,
            &mut InvestigationTimer,
        ),
        (With<Enemy>, Without<Player>),
    >,
    mut changes: EventWriter<EnemyStateChanged>,
) -> Result {
    let player_position = players.single()?.translation;

    for (entity, transform, config, mut state, mut timer) in enemies.iter_mut() {
        let position = transform.translation;
        let distance = position.distance(player_position);

        let new_state = if distance < config.detection_range {
            timer.cancel();
            EnemyState::Pursuing
        } else if *state == EnemyState::Pursuing {
            timer.schedule(config.investigation_time);
            EnemyState::Investigating { position }
        } else {
            *state
        };

        if *state != new_state {
            crate::log(&format!(
                "👁️ {:?} {} → {} (player at {:.2}m, range {:.2}m)",
                entity,
                state.label(),
                new_state.label(),
                distance,
                config.detection_range
            ));
            changes.write(EnemyStateChanged {
                enemy: entity,
                from: *state,
                to: new_state,
            });
            *state = new_state;
        }
    }

    Ok(())
}

/// Система: пересчёт `MovementTarget` из состояния
pub fn resolve_movement_targets(
    players: Query<&Transform, With<Player>>,
    mut enemies: Query<(&EnemyState, &PatrolRoute, &mut MovementTarget), With<Enemy>>,
) -> Result {
    let player_position = players.single()?.translation;

    for (state, route, mut target) in enemies.iter_mut() {
        let desired = desired_target(state, route, player_position);
        if target.0 != desired {
            target.0 = desired;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desired_target_per_state() {
        let route =
            PatrolRoute::new(vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)]).unwrap();
        let player = Vec3::new(7.0, 0.0, 7.0);

        assert_eq!(desired_target(&EnemyState::Patrolling, &route, player), route.current());
        assert_eq!(desired_target(&EnemyState::Pursuing, &route, player), player);

        let frozen = Vec3::new(-3.0, 0.0, 2.0);
        assert_eq!(
            desired_target(&EnemyState::Investigating { position: frozen }, &route, player),
            frozen
        );
    }
}
