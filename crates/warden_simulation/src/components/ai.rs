//! AI компоненты врага
//!
//! Живут в crate::ai (рядом с системами), здесь только re-export.

pub use crate::ai::{
    AlertPeers, Enemy, EnemyConfig, EnemyState, InvestigationTimer, MovementTarget, PatrolRoute,
};
