//! Headless симуляция WARDEN
//!
//! Seeded demo сцена: патрульные враги + блуждающий игрок, 1000 fixed тиков

use std::process::ExitCode;
use std::time::Duration;

use warden_simulation::demo::{spawn_demo_scene, DemoPlugin};
use warden_simulation::{create_headless_app, step_simulation, EnemyState, SimulationPlugin};

const TICKS: usize = 1000;
const ENEMY_COUNT: usize = 4;
const OBSTACLE_COUNT: usize = 6;

fn main() -> ExitCode {
    let seed = 42;
    println!("Starting WARDEN headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, DemoPlugin));

    let scene = match spawn_demo_scene(app.world_mut(), ENEMY_COUNT, OBSTACLE_COUNT) {
        Ok(scene) => scene,
        Err(err) => {
            eprintln!("Demo scene rejected: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let delta = Duration::from_secs_f64(1.0 / warden_simulation::FIXED_TIMESTEP_HZ);
    for tick in 0..TICKS {
        step_simulation(&mut app, delta);

        if tick % 100 == 0 {
            let states: Vec<&'static str> = scene
                .enemies
                .iter()
                .filter_map(|&enemy| app.world().get::<EnemyState>(enemy))
                .map(EnemyState::label)
                .collect();
            println!("Tick {}: {:?}", tick, states);
        }
    }

    println!("Simulation complete!");
    ExitCode::SUCCESS
}
