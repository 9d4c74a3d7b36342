//! Active path: временный маршрут в обход препятствия

use bevy::prelude::*;

/// Состояние обхода препятствия
///
/// Инвариант: если путь есть, он не пуст; индекс за концом пути означает
/// "путь пройден" и приводит к очистке.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct NavigationPath {
    waypoints: Vec<Vec3>,
    current_index: usize,
}

impl NavigationPath {
    /// Принимает новый путь и сбрасывает прогресс. Пустой путь игнорируется
    /// (старый остаётся как был), возвращает false.
    pub fn assign(&mut self, waypoints: Vec<Vec3>) -> bool {
        if waypoints.is_empty() {
            return false;
        }
        self.waypoints = waypoints;
        self.current_index = 0;
        true
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.current_index = 0;
    }

    /// Путь есть и ещё не пройден
    pub fn is_active(&self) -> bool {
        self.current_index < self.waypoints.len()
    }

    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.waypoints.get(self.current_index).copied()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn advance(&mut self) {
        if self.current_index < self.waypoints.len() {
            self.current_index += 1;
        }
    }
}
