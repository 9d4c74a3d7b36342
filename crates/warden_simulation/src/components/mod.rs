//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - world: классификация коллизий и препятствия (CollisionClass, Obstacle)
//! - player: player marker (Player)
//! - ai: state machine врага (EnemyState, EnemyConfig, PatrolRoute, ...)

pub mod ai;
pub mod player;
pub mod world;

pub use ai::*;
pub use player::*;
pub use world::*;
