//! Actor domain: спавн игрока, врагов, препятствий
//!
//! Содержит:
//! - EnemyBlueprint (data-driven описание врага, serde)
//! - spawn_enemy / spawn_player / spawn_obstacle
//! - link_alert_group (явная группа соседей для alert broadcast)

pub mod spawn;

pub use spawn::*;
