//! Player marker component

use bevy::prelude::*;

/// Marker: entity игрока
///
/// Perception, target resolution и alert broadcast ищут игрока через
/// `Query<&Transform, With<Player>>::single()`. Ровно один игрок на сцену:
/// ноль или два: нарушение precondition, AI системы падают с ошибкой.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Player;
