//! AI Events
//!
//! Host physics → `EnemyContact` → alert broadcast.
//! `EnemyStateChanged` / `EnemyAlerted`: наружу (UI, звук, debug overlay).

use bevy::prelude::*;

use crate::ai::EnemyState;
use crate::components::CollisionClass;

/// Контакт коллайдера врага с другим коллайдером (trigger enter)
///
/// Отправляет host; alert срабатывает только для `CollisionClass::Player`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyContact {
    /// Враг, чей коллайдер сработал
    pub enemy: Entity,
    /// Класс того, с кем столкнулись
    pub other: CollisionClass,
}

/// Сосед переведён в Pursuing чужим alert'ом
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyAlerted {
    pub enemy: Entity,
    /// Кто коснулся игрока
    pub source: Entity,
}

/// Переход FSM (perception, timeout расследования, alert)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyStateChanged {
    pub enemy: Entity,
    pub from: EnemyState,
    pub to: EnemyState,
}
