//! Тесты детерминизма
//!
//! Demo сцена с одинаковым seed должна давать идентичные состояния врагов

use std::time::Duration;

use warden_simulation::demo::{spawn_demo_scene, DemoPlugin};
use warden_simulation::{create_headless_app, enemy_snapshot, step_simulation, SimulationPlugin};

const ENEMY_COUNT: usize = 6;
const OBSTACLE_COUNT: usize = 8;
const TICK: Duration = Duration::from_millis(16);

/// Запускает demo сцену и возвращает snapshot врагов
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, DemoPlugin));

    spawn_demo_scene(app.world_mut(), ENEMY_COUNT, OBSTACLE_COUNT)
        .expect("demo scene is valid");

    for _ in 0..tick_count {
        step_simulation(&mut app, TICK);
    }

    enemy_snapshot(app.world_mut())
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 1000;

    let snapshot1 = run_simulation(SEED, TICK_COUNT);
    let snapshot2 = run_simulation(SEED, TICK_COUNT);

    assert!(!snapshot1.is_empty());
    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 500;

    // 3 прогона: все должны совпасть с первым
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_seeds_diverge() {
    assert_ne!(run_simulation(1, 100), run_simulation(2, 100));
}
