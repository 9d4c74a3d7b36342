//! FSM AI components (state machine, config, patrol route, investigation timer).

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::ConfigError;
use crate::components::CollisionClass;

/// Marker: патрулирующий враг
///
/// Runtime state добавляется через Required Components; `EnemyConfig` и
/// `PatrolRoute` без осмысленного default: их кладёт `spawn_enemy`.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    EnemyState,
    InvestigationTimer,
    MovementTarget,
    AlertPeers,
    crate::navigation::NavigationPath,
    Transform
)]
pub struct Enemy;

/// AI FSM состояния
///
/// Внешний alert от соседа не отдельное состояние: он сразу переводит в `Pursuing`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum EnemyState {
    /// Обход `PatrolRoute`, игрок не обнаружен
    #[default]
    Patrolling,

    /// Игрок в detection range (или alert от соседа)
    Pursuing,

    /// Игрок потерян: идём к замороженной точке, ждём `InvestigationTimer`
    Investigating {
        /// Позиция самого врага в тик потери игрока
        position: Vec3,
    },
}

impl EnemyState {
    /// `playerDetected` флаг: true и при погоне, и при расследовании
    pub fn player_detected(&self) -> bool {
        !matches!(self, EnemyState::Patrolling)
    }

    pub fn is_investigating(&self) -> bool {
        matches!(self, EnemyState::Investigating { .. })
    }

    pub fn investigation_position(&self) -> Option<Vec3> {
        match self {
            EnemyState::Investigating { position } => Some(*position),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EnemyState::Patrolling => "Patrolling",
            EnemyState::Pursuing => "Pursuing",
            EnemyState::Investigating { .. } => "Investigating",
        }
    }
}

/// Параметры врага (задаются при спавне, в рантайме не меняются)
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct EnemyConfig {
    /// Скорость движения (м/с)
    pub speed: f32,
    /// Радиус обнаружения игрока (метры)
    pub detection_range: f32,
    /// Сколько ищем игрока после потери (секунды)
    pub investigation_time: f32,
    /// Длина probe луча, он же clearance пути и радиус "дошли до waypoint"
    pub obstacle_avoidance_distance: f32,
    /// Радиус поиска для pathfinder
    pub pathfinding_distance: f32,
    /// Что probe считает препятствием
    pub obstacle_class: CollisionClass,
    /// Зарезервировано: perception работает по дистанции и этот класс не читает
    pub player_class: CollisionClass,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            detection_range: 5.0,
            investigation_time: 5.0,
            obstacle_avoidance_distance: 1.0,
            pathfinding_distance: 5.0,
            obstacle_class: CollisionClass::Obstacle,
            player_class: CollisionClass::Player,
        }
    }
}

impl EnemyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::NonPositiveSpeed(self.speed));
        }

        let scalars = [
            ("detection_range", self.detection_range),
            ("investigation_time", self.investigation_time),
            ("obstacle_avoidance_distance", self.obstacle_avoidance_distance),
            ("pathfinding_distance", self.pathfinding_distance),
        ];
        for (field, value) in scalars {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidScalar { field, value });
            }
        }

        Ok(())
    }
}

/// Циклический маршрут патруля
///
/// Инвариант: `waypoints` не пуст, `current_index < waypoints.len()`.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    waypoints: Vec<Vec3>,
    current_index: usize,
}

impl PatrolRoute {
    pub fn new(waypoints: Vec<Vec3>) -> Result<Self, ConfigError> {
        if waypoints.is_empty() {
            return Err(ConfigError::EmptyWaypoints);
        }
        if let Some((index, point)) = waypoints
            .iter()
            .enumerate()
            .find(|(_, point)| !point.is_finite())
        {
            return Err(ConfigError::NonFiniteWaypoint {
                index,
                point: *point,
            });
        }

        Ok(Self {
            waypoints,
            current_index: 0,
        })
    }

    pub fn current(&self) -> Vec3 {
        self.waypoints[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Всегда false (конструктор отвергает пустой маршрут)
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Следующий waypoint (wrap по модулю длины), возвращает новую цель
    pub fn advance(&mut self) -> Vec3 {
        self.current_index = (self.current_index + 1) % self.waypoints.len();
        self.current()
    }
}

/// Отложенный "stop investigating": один handle на врага
///
/// `schedule` заменяет pending таймер, `cancel` сбрасывает его.
/// Повторная потеря игрока не плодит параллельных callback'ов.
#[derive(Component, Debug, Clone, Default)]
pub struct InvestigationTimer {
    timer: Option<Timer>,
}

impl InvestigationTimer {
    pub fn schedule(&mut self, seconds: f32) {
        self.timer = Some(Timer::from_seconds(seconds, TimerMode::Once));
    }

    pub fn cancel(&mut self) {
        self.timer = None;
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_some()
    }

    pub fn remaining_secs(&self) -> Option<f32> {
        self.timer.as_ref().map(Timer::remaining_secs)
    }

    /// Продвигает таймер; true ровно один раз: в тик срабатывания
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };

        timer.tick(delta);
        if timer.finished() {
            self.timer = None;
            true
        } else {
            false
        }
    }
}

/// Текущая цель движения (пересчитывается из `EnemyState` каждый тик)
///
/// Path override из locomotion сюда не пишется: это отдельный шаг.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct MovementTarget(pub Vec3);

/// Явный список соседей для alert broadcast
///
/// Заполняется `link_alert_group`; despawned соседи просто пропускаются.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct AlertPeers {
    pub peers: Vec<Entity>,
}

impl AlertPeers {
    pub fn new(peers: Vec<Entity>) -> Self {
        Self { peers }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.peers.contains(&entity)
    }
}
