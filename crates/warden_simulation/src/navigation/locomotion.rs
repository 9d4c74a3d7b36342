//! Locomotion: шаг движения к цели с обходом препятствий
//!
//! Порядок внутри тика:
//! 1. probe к эффективной цели (текущий waypoint пути, если путь активен);
//!    попали → просим путь у pathfinder, непустой путь становится активным
//! 2. иначе ведём по активному пути: дошли до waypoint → следующий,
//!    путь кончился → очищаем и идём к исходной цели
//! 3. сдвиг на `speed * dt` по normalized направлению

use bevy::prelude::*;

use super::path::NavigationPath;
use super::pathfinding::{PathFinder, PathRequest};
use super::probe::ObstacleProbe;
use crate::ai::EnemyConfig;

/// Результат одного шага
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringStep {
    pub position: Vec3,
    /// Куда реально шли в этом тике (цель или waypoint пути)
    pub destination: Vec3,
    /// В этом тике был назначен новый путь
    pub path_assigned: bool,
    /// В этом тике активный путь был пройден и очищен
    pub path_completed: bool,
}

/// Один тик locomotion для врага в `position`, идущего к `target`
pub fn steer(
    position: Vec3,
    target: Vec3,
    config: &EnemyConfig,
    path: &mut NavigationPath,
    probe: &dyn ObstacleProbe,
    pathfinder: &dyn PathFinder,
    delta_secs: f32,
) -> SteeringStep {
    let clearance = config.obstacle_avoidance_distance;
    let mut destination = target;
    let mut path_assigned = false;
    let mut path_completed = false;

    // Пока путь активен, луч идёт к его waypoint, а не к исходной цели:
    // иначе стена впереди давала бы новый запрос пути каждый тик
    let probe_target = path.current_waypoint().unwrap_or(target);
    let blocked = probe
        .raycast(
            position,
            probe_target - position,
            clearance,
            config.obstacle_class,
        )
        .is_some();

    if blocked {
        let request = PathRequest {
            start: position,
            goal: target,
            search_radius: config.pathfinding_distance,
            clearance,
            class: config.obstacle_class,
        };
        // Нет пути → просто идём к цели, старый путь не трогаем
        if let Some(waypoints) = pathfinder.find_path(&request, probe) {
            path_assigned = path.assign(waypoints);
        }
    } else if path.is_active() {
        if let Some(waypoint) = path.current_waypoint() {
            if position.distance(waypoint) < clearance {
                path.advance();
            }
        }

        match path.current_waypoint() {
            Some(waypoint) => destination = waypoint,
            None => {
                path.clear();
                path_completed = true;
            }
        }
    }

    // normalize_or_zero: уже на месте → стоим, без NaN
    let direction = (destination - position).normalize_or_zero();
    SteeringStep {
        position: position + direction * config.speed * delta_secs,
        destination,
        path_assigned,
        path_completed,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Mutex;

    use super::*;
    use crate::components::CollisionClass;
    use crate::navigation::ProbeHit;

    /// Probe по сценарию: попадание только в первые `hits` вызовов
    struct ScriptedProbe {
        hits: Cell<usize>,
    }

    impl ScriptedProbe {
        fn hits(count: usize) -> Self {
            Self {
                hits: Cell::new(count),
            }
        }
    }

    impl ObstacleProbe for ScriptedProbe {
        fn raycast(
            &self,
            origin: Vec3,
            direction: Vec3,
            max: f32,
            _: CollisionClass,
        ) -> Option<ProbeHit> {
            let left = self.hits.get();
            if left == 0 {
                return None;
            }
            self.hits.set(left - 1);
            Some(ProbeHit {
                distance: max,
                point: origin + direction.normalize_or_zero() * max,
            })
        }

        fn overlaps(&self, _: Vec3, _: f32, _: CollisionClass) -> bool {
            false
        }
    }

    /// Pathfinder с фиксированным ответом, запоминает запросы
    struct FixedPath {
        path: Option<Vec<Vec3>>,
        requests: Mutex<Vec<PathRequest>>,
    }

    impl FixedPath {
        fn new(path: Option<Vec<Vec3>>) -> Self {
            Self {
                path,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl PathFinder for FixedPath {
        fn find_path(&self, request: &PathRequest, _: &dyn ObstacleProbe) -> Option<Vec<Vec3>> {
            self.requests.lock().unwrap().push(*request);
            self.path.clone()
        }
    }

    fn config() -> EnemyConfig {
        EnemyConfig {
            speed: 2.0,
            obstacle_avoidance_distance: 1.0,
            pathfinding_distance: 5.0,
            ..default()
        }
    }

    #[test]
    fn test_direct_movement_without_obstacles() {
        let mut path = NavigationPath::default();
        let step = steer(
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            &config(),
            &mut path,
            &ScriptedProbe::hits(0),
            &FixedPath::new(None),
            0.5,
        );

        // speed 2 * dt 0.5 = 1 метр по X
        assert!((step.position - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
        assert!(!step.path_assigned);
        assert!(!path.is_active());
    }

    #[test]
    fn test_obstacle_hit_requests_path_and_next_tick_heads_to_first_waypoint() {
        let p1 = Vec3::new(0.0, 0.0, 3.0);
        let p2 = Vec3::new(4.0, 0.0, 3.0);
        let target = Vec3::new(10.0, 0.0, 0.0);
        let probe = ScriptedProbe::hits(1);
        let finder = FixedPath::new(Some(vec![p1, p2]));
        let mut path = NavigationPath::default();

        let first = steer(Vec3::ZERO, target, &config(), &mut path, &probe, &finder, 0.1);
        assert!(first.path_assigned);
        assert_eq!(path.current_waypoint(), Some(p1));

        let requests = finder.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].start, Vec3::ZERO);
        assert_eq!(requests[0].goal, target);
        assert_eq!(requests[0].search_radius, 5.0);
        assert_eq!(requests[0].clearance, 1.0);
        drop(requests);

        let second = steer(first.position, target, &config(), &mut path, &probe, &finder, 0.1);
        assert_eq!(second.destination, p1);
        let direction = (second.position - first.position).normalize();
        let expected = (p1 - first.position).normalize();
        assert!(direction.dot(expected) > 0.999, "moving {:?}, expected {:?}", direction, expected);
    }

    #[test]
    fn test_no_path_found_falls_back_to_direct_movement() {
        let target = Vec3::new(0.0, 0.0, 10.0);
        let mut path = NavigationPath::default();
        let step = steer(
            Vec3::ZERO,
            target,
            &config(),
            &mut path,
            &ScriptedProbe::hits(1),
            &FixedPath::new(None),
            0.5,
        );

        assert!(!step.path_assigned);
        assert!(!path.is_active());
        assert_eq!(step.destination, target);
        assert!((step.position - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_empty_path_is_not_installed() {
        let mut path = NavigationPath::default();
        let step = steer(
            Vec3::ZERO,
            Vec3::X * 5.0,
            &config(),
            &mut path,
            &ScriptedProbe::hits(1),
            &FixedPath::new(Some(vec![])),
            0.1,
        );
        assert!(!step.path_assigned);
        assert!(!path.is_active());
    }

    #[test]
    fn test_reaching_last_waypoint_completes_path() {
        let p1 = Vec3::new(0.5, 0.0, 0.0);
        let target = Vec3::new(0.0, 0.0, -8.0);
        let mut path = NavigationPath::default();
        path.assign(vec![p1]);

        // В 0.5 м от P1 (< clearance 1.0) → путь пройден, идём к исходной цели
        let step = steer(
            Vec3::ZERO,
            target,
            &config(),
            &mut path,
            &ScriptedProbe::hits(0),
            &FixedPath::new(None),
            0.5,
        );

        assert!(step.path_completed);
        assert!(!path.is_active());
        assert!(path.waypoints().is_empty());
        assert_eq!(step.destination, target);
        assert!((step.position - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_path_assigned_within_clearance_advances_next_tick() {
        // Путь из одной точки уже в зоне clearance в тик назначения
        let p1 = Vec3::new(0.3, 0.0, 0.0);
        let target = Vec3::new(6.0, 0.0, 0.0);
        let probe = ScriptedProbe::hits(1);
        let finder = FixedPath::new(Some(vec![p1]));
        let mut path = NavigationPath::default();

        let first = steer(Vec3::ZERO, target, &config(), &mut path, &probe, &finder, 0.01);
        assert!(first.path_assigned);

        let second = steer(first.position, target, &config(), &mut path, &probe, &finder, 0.01);
        assert!(second.path_completed);
        assert_eq!(second.destination, target);
    }

    #[test]
    fn test_at_target_does_not_produce_nan() {
        let position = Vec3::new(2.0, 0.0, 2.0);
        let mut path = NavigationPath::default();
        let step = steer(
            position,
            position,
            &config(),
            &mut path,
            &ScriptedProbe::hits(0),
            &FixedPath::new(None),
            0.016,
        );

        assert!(step.position.is_finite());
        assert_eq!(step.position, position);
    }

    #[test]
    fn test_probe_follows_active_waypoint() {
        // Probe бьёт только в направлении исходной цели (+X), путь уходит по +Z
        struct WallAlongX;
        impl ObstacleProbe for WallAlongX {
            fn raycast(
            &self,
            origin: Vec3,
            direction: Vec3,
            max: f32,
            _: CollisionClass,
        ) -> Option<ProbeHit> {
                (direction.normalize_or_zero().x > 0.9).then(|| ProbeHit {
                    distance: max,
                    point: origin + Vec3::X * max,
                })
            }
            fn overlaps(&self, _: Vec3, _: f32, _: CollisionClass) -> bool {
                false
            }
        }

        let p1 = Vec3::new(0.0, 0.0, 3.0);
        let target = Vec3::new(10.0, 0.0, 0.0);
        let finder = FixedPath::new(Some(vec![p1, Vec3::new(10.0, 0.0, 3.0)]));
        let mut path = NavigationPath::default();

        let first = steer(Vec3::ZERO, target, &config(), &mut path, &WallAlongX, &finder, 0.1);
        assert!(first.path_assigned);

        let second = steer(first.position, target, &config(), &mut path, &WallAlongX, &finder, 0.1);
        assert_eq!(second.destination, p1);
        assert_eq!(finder.requests.lock().unwrap().len(), 1, "detour must not be re-planned");
    }
}
