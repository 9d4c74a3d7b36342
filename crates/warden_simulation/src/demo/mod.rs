//! Headless demo сцена
//!
//! Seeded арена: препятствия, группа врагов с маршрутами, блуждающий игрок.
//! `emit_proximity_contacts` подменяет host physics trigger'ы: враг вплотную
//! к игроку → `EnemyContact` (только на "вход" в контакт).

use std::collections::HashSet;

use bevy::prelude::*;
use rand::Rng;

use crate::actor::{spawn_enemy_group, spawn_obstacle, spawn_player, EnemyBlueprint};
use crate::ai::{ConfigError, Enemy, EnemyAiSet, EnemyContact};
use crate::components::{CollisionClass, Player};
use crate::DeterministicRng;

/// Половина стороны квадратной арены (метры)
pub const ARENA_HALF_SIZE: f32 = 20.0;

/// Дистанция "касания" игрока (радиус trigger коллайдера)
pub const CONTACT_RADIUS: f32 = 0.75;

/// Блуждание игрока: прямо, периодически новый случайный курс
#[derive(Component, Debug, Clone)]
pub struct PlayerWander {
    pub speed: f32,
    pub heading: Vec3,
    pub turn_timer: Timer,
}

impl Default for PlayerWander {
    fn default() -> Self {
        Self {
            speed: 1.5,
            heading: Vec3::X,
            turn_timer: Timer::from_seconds(2.0, TimerMode::Repeating),
        }
    }
}

/// Entities demo сцены
#[derive(Debug, Clone)]
pub struct DemoScene {
    pub player: Entity,
    pub enemies: Vec<Entity>,
    pub obstacles: Vec<Entity>,
}

fn random_point(rng: &mut impl Rng, half_size: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-half_size..half_size),
        0.0,
        rng.gen_range(-half_size..half_size),
    )
}

/// Спавнит seeded сцену (seed берётся из `DeterministicRng`)
pub fn spawn_demo_scene(
    world: &mut World,
    enemy_count: usize,
    obstacle_count: usize,
) -> Result<DemoScene, ConfigError> {
    let (obstacle_boxes, blueprints) = {
        let mut rng = world.resource_mut::<DeterministicRng>();
        let rng = &mut rng.rng;

        let obstacle_boxes: Vec<(Vec3, Vec3)> = (0..obstacle_count)
            .map(|_| {
                let center = random_point(rng, ARENA_HALF_SIZE * 0.75);
                let half_extents =
                    Vec3::new(rng.gen_range(0.5..2.0), 1.0, rng.gen_range(0.5..2.0));
                (center, half_extents)
            })
            .collect();

        let blueprints: Vec<EnemyBlueprint> = (0..enemy_count)
            .map(|_| {
                let home = random_point(rng, ARENA_HALF_SIZE * 0.75);
                let waypoints = (0..3)
                    .map(|_| home + random_point(rng, 5.0))
                    .collect();
                EnemyBlueprint::new(home, waypoints)
            })
            .collect();

        (obstacle_boxes, blueprints)
    };

    let player = spawn_player(world, Vec3::ZERO);
    world.entity_mut(player).insert(PlayerWander::default());

    let obstacles = obstacle_boxes
        .into_iter()
        .map(|(center, half_extents)| spawn_obstacle(world, center, half_extents))
        .collect();
    let enemies = spawn_enemy_group(world, &blueprints)?;

    crate::log_info(&format!(
        "🗺️ Demo scene: {} enemies, {} obstacles (seed {})",
        enemy_count,
        obstacle_count,
        world.resource::<DeterministicRng>().seed
    ));

    Ok(DemoScene {
        player,
        enemies,
        obstacles,
    })
}

/// Система: игрок блуждает по арене, отражаясь от границ
pub fn wander_player(
    mut players: Query<(&mut Transform, &mut PlayerWander), With<Player>>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
) {
    for (mut transform, mut wander) in players.iter_mut() {
        wander.turn_timer.tick(time.delta());
        if wander.turn_timer.just_finished() {
            let angle = rng.rng.gen::<f32>() * std::f32::consts::TAU;
            wander.heading = Vec3::new(angle.cos(), 0.0, angle.sin());
        }

        let mut next = transform.translation + wander.heading * wander.speed * time.delta_secs();
        if next.x.abs() > ARENA_HALF_SIZE {
            wander.heading.x = -wander.heading.x;
            next.x = next.x.clamp(-ARENA_HALF_SIZE, ARENA_HALF_SIZE);
        }
        if next.z.abs() > ARENA_HALF_SIZE {
            wander.heading.z = -wander.heading.z;
            next.z = next.z.clamp(-ARENA_HALF_SIZE, ARENA_HALF_SIZE);
        }
        transform.translation = next;
    }
}

/// Система: proximity → `EnemyContact` на входе в `CONTACT_RADIUS`
pub fn emit_proximity_contacts(
    players: Query<&Transform, With<Player>>,
    enemies: Query<(Entity, &Transform), (With<Enemy>, Without<Player>)>,
    mut touching: Local<HashSet<Entity>>,
    mut contacts: EventWriter<EnemyContact>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    for (entity, transform) in enemies.iter() {
        let in_contact = transform.translation.distance(player.translation) < CONTACT_RADIUS;
        if in_contact && touching.insert(entity) {
            contacts.write(EnemyContact {
                enemy: entity,
                other: CollisionClass::Player,
            });
        } else if !in_contact {
            touching.remove(&entity);
        }
    }
}

/// Demo plugin: блуждание игрока + proximity contacts до AI систем
pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (wander_player, emit_proximity_contacts)
                .chain()
                .before(EnemyAiSet),
        );
    }
}
