//! Tests for FSM AI components.

use std::time::Duration;

use bevy::prelude::*;

use super::fsm::{EnemyConfig, EnemyState, InvestigationTimer, PatrolRoute};
use crate::ai::ConfigError;
use crate::components::CollisionClass;

#[test]
fn test_enemy_state_default() {
    let state = EnemyState::default();
    assert_eq!(state, EnemyState::Patrolling);
    assert!(!state.player_detected());
    assert!(!state.is_investigating());
}

#[test]
fn test_enemy_state_flags() {
    assert!(EnemyState::Pursuing.player_detected());
    assert!(!EnemyState::Pursuing.is_investigating());

    let investigating = EnemyState::Investigating {
        position: Vec3::new(1.0, 0.0, 2.0),
    };
    assert!(investigating.player_detected());
    assert!(investigating.is_investigating());
    assert_eq!(
        investigating.investigation_position(),
        Some(Vec3::new(1.0, 0.0, 2.0))
    );
}

#[test]
fn test_enemy_config_default() {
    let config = EnemyConfig::default();
    assert_eq!(config.speed, 2.0);
    assert_eq!(config.detection_range, 5.0);
    assert_eq!(config.investigation_time, 5.0);
    assert_eq!(config.obstacle_avoidance_distance, 1.0);
    assert_eq!(config.pathfinding_distance, 5.0);
    assert_eq!(config.obstacle_class, CollisionClass::Obstacle);
    assert_eq!(config.player_class, CollisionClass::Player);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_enemy_config_rejects_bad_scalars() {
    let config = EnemyConfig {
        speed: 0.0,
        ..default()
    };
    assert_eq!(config.validate(), Err(ConfigError::NonPositiveSpeed(0.0)));

    let config = EnemyConfig {
        detection_range: -1.0,
        ..default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::InvalidScalar {
            field: "detection_range",
            value: -1.0
        })
    );

    let config = EnemyConfig {
        investigation_time: f32::NAN,
        ..default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidScalar {
            field: "investigation_time",
            ..
        })
    ));
}

#[test]
fn test_patrol_route_rejects_empty() {
    assert_eq!(PatrolRoute::new(vec![]), Err(ConfigError::EmptyWaypoints));
}

#[test]
fn test_patrol_route_rejects_non_finite_waypoint() {
    let result = PatrolRoute::new(vec![Vec3::ZERO, Vec3::new(f32::INFINITY, 0.0, 0.0)]);
    assert!(matches!(
        result,
        Err(ConfigError::NonFiniteWaypoint { index: 1, .. })
    ));
}

#[test]
fn test_patrol_route_wraps_cyclically() {
    let waypoints = vec![Vec3::X, Vec3::Y, Vec3::Z];
    let mut route = PatrolRoute::new(waypoints.clone()).unwrap();

    assert_eq!(route.current_index(), 0);
    for n in 1..=10 {
        let target = route.advance();
        assert_eq!(route.current_index(), n % waypoints.len());
        assert_eq!(target, waypoints[n % waypoints.len()]);
    }
}

#[test]
fn test_patrol_route_single_waypoint() {
    let mut route = PatrolRoute::new(vec![Vec3::ONE]).unwrap();
    route.advance();
    route.advance();
    assert_eq!(route.current_index(), 0);
    assert_eq!(route.current(), Vec3::ONE);
}

#[test]
fn test_investigation_timer_fires_once() {
    let mut timer = InvestigationTimer::default();
    assert!(!timer.is_pending());
    assert!(!timer.tick(Duration::from_secs(10)));

    timer.schedule(1.0);
    assert!(timer.is_pending());
    assert!(!timer.tick(Duration::from_millis(600)));
    assert!(timer.tick(Duration::from_millis(600)));

    // Сработал: handle пуст, повторно не стреляет
    assert!(!timer.is_pending());
    assert!(!timer.tick(Duration::from_secs(5)));
}

#[test]
fn test_investigation_timer_reschedule_replaces_pending() {
    let mut timer = InvestigationTimer::default();
    timer.schedule(1.0);
    assert!(!timer.tick(Duration::from_millis(800)));

    // Новый schedule сбрасывает отсчёт, старый не стреляет
    timer.schedule(1.0);
    assert!(!timer.tick(Duration::from_millis(800)));
    assert!(timer.tick(Duration::from_millis(300)));
}

#[test]
fn test_investigation_timer_cancel() {
    let mut timer = InvestigationTimer::default();
    timer.schedule(0.5);
    timer.cancel();
    assert!(!timer.is_pending());
    assert!(!timer.tick(Duration::from_secs(1)));
}
