//! Pathfinding collaborator
//!
//! Контракт: `find_path(start, goal, search_radius, clearance)` → упорядоченные
//! waypoints (без start) или `None`. Host может подменить реализацию через
//! resource `Pathfinding`; по умолчанию: `GridPathfinder` (A* по сетке XZ).

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use bevy::prelude::*;

use super::probe::ObstacleProbe;
use crate::components::CollisionClass;

/// Запрос пути в обход препятствий
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathRequest {
    pub start: Vec3,
    pub goal: Vec3,
    /// Поиск ограничен кругом этого радиуса вокруг start
    pub search_radius: f32,
    /// Минимальный зазор между waypoint и препятствием
    pub clearance: f32,
    pub class: CollisionClass,
}

pub trait PathFinder: Send + Sync {
    fn find_path(&self, request: &PathRequest, probe: &dyn ObstacleProbe) -> Option<Vec<Vec3>>;
}

/// Resource: активный pathfinder
#[derive(Resource)]
pub struct Pathfinding(Box<dyn PathFinder>);

impl Pathfinding {
    pub fn new(finder: impl PathFinder + 'static) -> Self {
        Self(Box::new(finder))
    }

    pub fn finder(&self) -> &dyn PathFinder {
        self.0.as_ref()
    }
}

impl Default for Pathfinding {
    fn default() -> Self {
        Self::new(GridPathfinder::default())
    }
}

/// A* по 8-связной сетке на плоскости XZ (y берётся из start)
///
/// - клетка заблокирована если сфера `clearance` вокруг её центра задевает препятствие
/// - диагональ запрещена если любой из двух ортогональных соседей заблокирован
/// - стоимость целочисленная: 10 прямо, 14 по диагонали
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPathfinder {
    /// Размер клетки (метры)
    pub cell_size: f32,
    /// Потолок раскрытых узлов на один запрос
    pub max_expansions: usize,
}

impl Default for GridPathfinder {
    fn default() -> Self {
        Self {
            cell_size: 0.5,
            max_expansions: 4096,
        }
    }
}

/// Потолок радиуса поиска в клетках (при 0.5м: 512м)
const MAX_RADIUS_CELLS: i64 = 1024;

const STRAIGHT_COST: u32 = 10;
const DIAGONAL_COST: u32 = 14;

const NEIGHBORS: [(i32, i32, u32); 8] = [
    (1, 0, STRAIGHT_COST),
    (-1, 0, STRAIGHT_COST),
    (0, 1, STRAIGHT_COST),
    (0, -1, STRAIGHT_COST),
    (1, 1, DIAGONAL_COST),
    (1, -1, DIAGONAL_COST),
    (-1, 1, DIAGONAL_COST),
    (-1, -1, DIAGONAL_COST),
];

/// Octile distance в единицах стоимости
fn octile(from: IVec2, to: IVec2) -> u32 {
    let d = (to - from).abs();
    let (lo, hi) = (d.x.min(d.y) as u32, d.x.max(d.y) as u32);
    STRAIGHT_COST * hi + (DIAGONAL_COST - STRAIGHT_COST) * lo
}

/// Сетка вокруг start с кэшем проходимости
struct SearchGrid<'a> {
    request: &'a PathRequest,
    probe: &'a dyn ObstacleProbe,
    cell_size: f32,
    radius_cells: i64,
    walkable: HashMap<IVec2, bool>,
}

impl SearchGrid<'_> {
    fn to_world(&self, cell: IVec2) -> Vec3 {
        self.request.start
            + Vec3::new(cell.x as f32 * self.cell_size, 0.0, cell.y as f32 * self.cell_size)
    }

    fn in_bounds(&self, cell: IVec2) -> bool {
        let (x, y) = (cell.x as i64, cell.y as i64);
        x * x + y * y <= self.radius_cells * self.radius_cells
    }

    fn is_walkable(&mut self, cell: IVec2) -> bool {
        // Start всегда проходим: агент мог уже прижаться к стене
        if cell == IVec2::ZERO {
            return true;
        }
        if !self.in_bounds(cell) {
            return false;
        }
        if let Some(&cached) = self.walkable.get(&cell) {
            return cached;
        }
        let point = self.to_world(cell);
        let free = !self
            .probe
            .overlaps(point, self.request.clearance, self.request.class);
        self.walkable.insert(cell, free);
        free
    }
}

/// Оставляет только клетки где меняется направление (и последнюю)
fn prune_collinear(cells: &[IVec2]) -> Vec<IVec2> {
    let mut kept = Vec::new();
    for i in 1..cells.len() {
        let is_last = i + 1 == cells.len();
        if is_last || cells[i] - cells[i - 1] != cells[i + 1] - cells[i] {
            kept.push(cells[i]);
        }
    }
    kept
}

fn reconstruct(came_from: &HashMap<IVec2, IVec2>, end: IVec2) -> Vec<IVec2> {
    let mut cells = vec![end];
    let mut current = end;
    while let Some(&previous) = came_from.get(&current) {
        cells.push(previous);
        current = previous;
    }
    cells.reverse();
    cells
}

impl PathFinder for GridPathfinder {
    fn find_path(&self, request: &PathRequest, probe: &dyn ObstacleProbe) -> Option<Vec<Vec3>> {
        if !(self.cell_size > 0.0 && request.search_radius.is_finite()) {
            return None;
        }
        // `as i64` насыщается, потолок держит `x * x` и i32 координаты в пределах
        let radius_cells =
            ((request.search_radius / self.cell_size).floor() as i64).min(MAX_RADIUS_CELLS);
        if radius_cells < 1 {
            return None;
        }

        let mut grid = SearchGrid {
            request,
            probe,
            cell_size: self.cell_size,
            radius_cells,
            walkable: HashMap::new(),
        };

        let offset = request.goal - request.start;
        // Дальняя цель прижимается к краю сетки (сразу за радиусом): остаётся
        // недостижимой, а octile не переполняется
        let limit = (radius_cells + 1) as f32;
        let goal_cell = IVec2::new(
            (offset.x / self.cell_size).round().clamp(-limit, limit) as i32,
            (offset.z / self.cell_size).round().clamp(-limit, limit) as i32,
        );
        if goal_cell == IVec2::ZERO {
            return Some(vec![request.goal]);
        }
        let goal_in_grid = grid.is_walkable(goal_cell);

        let mut open = BinaryHeap::new();
        let mut g_score: HashMap<IVec2, u32> = HashMap::new();
        let mut came_from: HashMap<IVec2, IVec2> = HashMap::new();

        let start_distance = request.start.distance(request.goal);
        let mut closest = (start_distance, IVec2::ZERO);

        g_score.insert(IVec2::ZERO, 0);
        open.push(Reverse((octile(IVec2::ZERO, goal_cell), 0u32, 0i32, 0i32)));

        let mut expansions = 0;
        while let Some(Reverse((_, g, x, y))) = open.pop() {
            let cell = IVec2::new(x, y);
            if g > g_score.get(&cell).copied().unwrap_or(u32::MAX) {
                continue; // устаревшая запись в heap
            }

            if goal_in_grid && cell == goal_cell {
                let cells = reconstruct(&came_from, cell);
                let mut path: Vec<Vec3> = prune_collinear(&cells)
                    .into_iter()
                    .map(|c| grid.to_world(c))
                    .collect();
                if let Some(last) = path.last_mut() {
                    *last = request.goal;
                }
                return Some(path);
            }

            expansions += 1;
            if expansions > self.max_expansions {
                break;
            }

            let distance = grid.to_world(cell).distance(request.goal);
            if distance < closest.0 {
                closest = (distance, cell);
            }

            for (dx, dy, cost) in NEIGHBORS {
                let next = cell + IVec2::new(dx, dy);
                if !grid.is_walkable(next) {
                    continue;
                }
                let diagonal = dx != 0 && dy != 0;
                if diagonal
                    && !(grid.is_walkable(cell + IVec2::new(dx, 0))
                        && grid.is_walkable(cell + IVec2::new(0, dy)))
                {
                    continue;
                }

                let next_g = g + cost;
                if next_g < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                    g_score.insert(next, next_g);
                    came_from.insert(next, cell);
                    open.push(Reverse((
                        next_g + octile(next, goal_cell),
                        next_g,
                        next.x,
                        next.y,
                    )));
                }
            }
        }

        // Цель вне радиуса или недостижима: частичный путь к ближайшей клетке
        let (_, best) = closest;
        if best == IVec2::ZERO {
            return None;
        }
        let cells = reconstruct(&came_from, best);
        Some(
            prune_collinear(&cells)
                .into_iter()
                .map(|c| grid.to_world(c))
                .collect(),
        )
    }
}
