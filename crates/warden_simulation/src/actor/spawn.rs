//! Spawn helpers
//!
//! Вся валидация конфигурации: здесь, при загрузке сцены. AI системы
//! считают что route не пуст, а игрок существует.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::{AlertPeers, ConfigError, Enemy, EnemyConfig, MovementTarget, PatrolRoute};
use crate::components::{Obstacle, Player};

/// Описание врага для загрузки сцены (JSON/RON через serde)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyBlueprint {
    /// Стартовая позиция
    pub position: Vec3,
    /// Маршрут патруля (не пустой)
    pub waypoints: Vec<Vec3>,
    /// Пропущенные поля берутся из `EnemyConfig::default()`
    #[serde(default)]
    pub config: EnemyConfig,
}

impl EnemyBlueprint {
    pub fn new(position: Vec3, waypoints: Vec<Vec3>) -> Self {
        Self {
            position,
            waypoints,
            config: EnemyConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EnemyConfig) -> Self {
        self.config = config;
        self
    }

    /// Проверка без спавна (config + route)
    pub fn validate(&self) -> Result<PatrolRoute, ConfigError> {
        self.config.validate()?;
        PatrolRoute::new(self.waypoints.clone())
    }
}

fn require_player(world: &mut World) -> Result<(), ConfigError> {
    let mut players = world.query_filtered::<Entity, With<Player>>();
    if players.iter(world).next().is_none() {
        return Err(ConfigError::MissingPlayer);
    }
    Ok(())
}

fn spawn_validated(world: &mut World, blueprint: &EnemyBlueprint, route: PatrolRoute) -> Entity {
    let target = route.current();
    let entity = world
        .spawn((
            Enemy,
            Transform::from_translation(blueprint.position),
            blueprint.config.clone(),
            route,
            MovementTarget(target),
        ))
        .id();

    crate::log(&format!(
        "🛡️ Spawned enemy {:?} at {:?} ({} waypoints, detection {:.1}m)",
        entity,
        blueprint.position,
        blueprint.waypoints.len(),
        blueprint.config.detection_range
    ));
    entity
}

/// Спавн врага; отказ если конфиг невалиден или на сцене нет игрока
pub fn spawn_enemy(world: &mut World, blueprint: &EnemyBlueprint) -> Result<Entity, ConfigError> {
    let route = blueprint.validate()?;
    require_player(world)?;
    Ok(spawn_validated(world, blueprint, route))
}

/// Спавн группы врагов, связанных в одну alert группу
///
/// Все blueprint'ы проверяются до спавна: при ошибке мир не меняется.
pub fn spawn_enemy_group(
    world: &mut World,
    blueprints: &[EnemyBlueprint],
) -> Result<Vec<Entity>, ConfigError> {
    let routes = blueprints
        .iter()
        .map(EnemyBlueprint::validate)
        .collect::<Result<Vec<_>, _>>()?;
    require_player(world)?;

    let members: Vec<Entity> = blueprints
        .iter()
        .zip(routes)
        .map(|(blueprint, route)| spawn_validated(world, blueprint, route))
        .collect();
    link_alert_group(world, &members);

    Ok(members)
}

pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((Player, Transform::from_translation(position)))
        .id()
}

pub fn spawn_obstacle(world: &mut World, center: Vec3, half_extents: Vec3) -> Entity {
    world
        .spawn((Obstacle::new(half_extents), Transform::from_translation(center)))
        .id()
}

/// Делает `members` взаимными соседями (каждый знает всех остальных)
///
/// Entities без `AlertPeers` (не враги) пропускаются.
pub fn link_alert_group(world: &mut World, members: &[Entity]) {
    for &member in members {
        let peers: Vec<Entity> = members.iter().copied().filter(|&e| e != member).collect();
        if let Some(mut alert_peers) = world.get_mut::<AlertPeers>(member) {
            alert_peers.peers = peers;
        }
    }
}
