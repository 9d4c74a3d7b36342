//! Ошибки конфигурации врага (проверяются при спавне, не в тике)

use bevy::prelude::Vec3;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("patrol route needs at least one waypoint")]
    EmptyWaypoints,

    #[error("waypoint {index} is not a finite point: {point}")]
    NonFiniteWaypoint { index: usize, point: Vec3 },

    #[error("`speed` must be positive and finite, got {0}")]
    NonPositiveSpeed(f32),

    #[error("`{field}` must be finite and non-negative, got {value}")]
    InvalidScalar { field: &'static str, value: f32 },

    #[error("no entity with the Player marker exists in the world")]
    MissingPlayer,
}
