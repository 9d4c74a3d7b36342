//! Navigation: obstacle probe, pathfinding collaborator, locomotion
//!
//! Содержит:
//! - ObstacleProbe / ObstacleField (raycast + overlap по препятствиям)
//! - PathFinder / Pathfinding / GridPathfinder (обход препятствий)
//! - NavigationPath (активный путь врага)
//! - steer (один шаг движения)

pub mod locomotion;
pub mod path;
pub mod pathfinding;
pub mod probe;

pub use locomotion::{steer, SteeringStep};
pub use path::NavigationPath;
pub use pathfinding::{GridPathfinder, PathFinder, PathRequest, Pathfinding};
pub use probe::{sync_obstacle_field, ObstacleField, ObstacleProbe, ProbeHit};
