//! WARDEN Simulation Core
//!
//! Патрульный враг на Bevy ECS (headless):
//! - perception по дистанции до игрока (Patrolling / Pursuing / Investigating)
//! - locomotion с обходом препятствий (probe + pathfinding)
//! - alert broadcast соседям по контакту с игроком
//!
//! Physics, raycast и pathfinding: collaborators за трейтами
//! (`ObstacleProbe`, `PathFinder`); встроенные реализации в `navigation`.

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod actor;
pub mod ai;
pub mod components;
pub mod demo;
pub mod logger;
pub mod navigation;

// Re-export базовых типов для удобства
pub use actor::{
    link_alert_group, spawn_enemy, spawn_enemy_group, spawn_obstacle, spawn_player, EnemyBlueprint,
};
pub use ai::{
    ConfigError, EnemyAiPlugin, EnemyAiSet, EnemyAlerted, EnemyConfig, EnemyContact, EnemyState,
    EnemyStateChanged,
};
pub use components::*;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use navigation::{GridPathfinder, NavigationPath, ObstacleField, Pathfinding};

/// Шаг fixed timestep (60 Hz)
pub const FIXED_TIMESTEP_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(FIXED_TIMESTEP_HZ))
            .add_plugins(EnemyAiPlugin);

        // Seed мог поставить create_headless_app: не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(FIXED_TIMESTEP_HZ));

    app
}

/// Один fixed тик с точным delta (без wall clock)
///
/// Двигает generic `Time` на `delta` и прогоняет `FixedUpdate` ровно один раз.
/// Тесты и demo используют это вместо `app.update()`, чтобы число тиков не
/// зависело от реального времени.
///
/// `First` тут не запускается, поэтому буферы AI событий свапаем сами:
/// событие живёт два тика, потом отбрасывается.
pub fn step_simulation(app: &mut App, delta: Duration) {
    let world = app.world_mut();
    world.resource_mut::<Time>().advance_by(delta);
    world.run_schedule(FixedUpdate);

    update_events::<EnemyContact>(world);
    update_events::<EnemyAlerted>(world);
    update_events::<EnemyStateChanged>(world);
}

fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Snapshot врагов для сравнения детерминизма
///
/// Entity index + Debug состояния + позиция, отсортировано по index.
pub fn enemy_snapshot(world: &mut World) -> Vec<u8> {
    let mut query = world.query_filtered::<(Entity, &EnemyState, &Transform), With<ai::Enemy>>();
    let mut enemies: Vec<_> = query.iter(world).collect();
    enemies.sort_by_key(|(entity, _, _)| entity.index());

    let mut snapshot = Vec::new();
    for (entity, state, transform) in enemies {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", state).as_bytes());
        for axis in transform.translation.to_array() {
            snapshot.extend_from_slice(&axis.to_le_bytes());
        }
    }

    snapshot
}
