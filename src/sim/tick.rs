//! Fixed timestep simulation tick
//!
//! One call advances the whole world by a single step: boost drain, movement,
//! food consumption, tail trimming, the collision pass, death application,
//! the periodic food spawner, and snapshot building. The caller owns the
//! timer; nothing here touches transport or wall clocks.

use super::collision::{check_food_collisions, check_snake_collisions};
use super::lifecycle::{apply_boost_drain, kill_snake, spawn_random_food};
use super::movement::{trim_snake_tail, update_snake_movement};
use super::snapshot::{build_foods, build_state, FoodsBatch, StateSnapshot};
use super::state::{DeathEvent, World};

/// Everything one tick produced for the outside world
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub deaths: Vec<DeathEvent>,
    pub state: StateSnapshot,
    /// Present only on the reduced food-publish cadence
    pub foods: Option<FoodsBatch>,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World) -> TickOutput {
    world.tick += 1;
    let cfg = world.config.clone();
    let dt = cfg.tick_delta();

    let snake_ids: Vec<u32> = world.snakes.keys().copied().collect();
    for &id in &snake_ids {
        apply_boost_drain(world, id, dt);
        if let Some(snake) = world.snakes.get_mut(&id) {
            update_snake_movement(snake, dt, &cfg);
        }
    }

    check_food_collisions(world);

    // Trim after consumption so food eaten this tick lengthens the body
    for &id in &snake_ids {
        if let Some(snake) = world.snakes.get_mut(&id) {
            trim_snake_tail(snake);
        }
    }

    let pending = check_snake_collisions(world);
    let mut deaths = Vec::with_capacity(pending.len());
    for death in pending {
        if let Some(event) = kill_snake(world, death.snake_id, death.killer_id) {
            deaths.push(event);
        }
    }

    // Interval 0 disables the cadence rather than dividing by it
    if cfg.food_spawn_interval_ticks > 0 && world.tick % cfg.food_spawn_interval_ticks == 0 {
        spawn_random_food(world, cfg.food_spawn_count);
    }

    let state = build_state(world);
    let foods = (cfg.foods_publish_interval_ticks > 0
        && world.tick % cfg.foods_publish_interval_ticks == 0)
        .then(|| build_foods(world));

    TickOutput {
        deaths,
        state,
        foods,
    }
}
