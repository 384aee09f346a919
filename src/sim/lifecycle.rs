//! Entity lifecycle: deaths, food redistribution, spawning, boost drain
//!
//! Everything that creates or destroys entities funnels through here. The
//! collision pass only records deaths; this module applies them, converts
//! dead bodies back into pellets, and runs the periodic food spawner.

use glam::Vec2;
use log::debug;

use super::state::{random_point_in_circle, DeathEvent, Food, World};

/// Remove a snake from the world, unset the owner's reference, and scatter
/// its stored length back into the arena as pellets. Returns `None` if the
/// snake is already gone (e.g. double-reported in the same tick).
pub fn kill_snake(world: &mut World, snake_id: u32, killer_id: Option<u32>) -> Option<DeathEvent> {
    let snake = world.snakes.remove(&snake_id)?;

    if let Some(player) = world.players.get_mut(&snake.owner_id) {
        if player.snake_id == Some(snake_id) {
            player.snake_id = None;
        }
    }

    let pellets = spawn_food_from_body(world, &snake.segments, snake.length);
    debug!(
        "snake {} ({}) died, dropped {} pellets",
        snake_id, snake.name, pellets
    );

    Some(DeathEvent {
        snake_id,
        owner_id: snake.owner_id,
        killer_id,
    })
}

/// Distribute pellets evenly by arclength along a dead body, with a small
/// jitter per pellet. Consuming all of them approximately returns the
/// snake's stored length to the arena. Death drops are exempt from the
/// global food cap.
fn spawn_food_from_body(world: &mut World, segments: &[Vec2], length: f32) -> usize {
    let food_value = world.config.food_value;
    let jitter_radius = world.config.snake_radius;
    let count = ((length / food_value).floor() as usize).max(1);
    let spacing = length / (count + 1) as f32;

    for i in 1..=count {
        let point = point_along_segments(segments, spacing * i as f32);
        let jitter = random_point_in_circle(&mut world.rng, jitter_radius);
        let id = world.next_entity_id();
        world.foods.insert(
            id,
            Food {
                id,
                position: point + jitter,
                value: food_value,
            },
        );
    }

    count
}

/// Walk the polyline from the head and return the point at the given
/// arclength, clamped to the tail.
pub fn point_along_segments(segments: &[Vec2], distance: f32) -> Vec2 {
    let Some(&first) = segments.first() else {
        return Vec2::ZERO;
    };
    let mut remaining = distance.max(0.0);

    for pair in segments.windows(2) {
        let segment = pair[1] - pair[0];
        let segment_length = segment.length();
        if segment_length == 0.0 {
            continue;
        }
        if remaining <= segment_length {
            return pair[0] + segment * (remaining / segment_length);
        }
        remaining -= segment_length;
    }

    *segments.last().unwrap_or(&first)
}

/// Spawn `count` pellets at area-uniform random points inside the arena.
/// Skipped entirely once the global cap is reached.
pub fn spawn_random_food(world: &mut World, count: usize) -> Vec<u32> {
    let mut spawned = Vec::new();
    if world.foods.len() >= world.config.food_max_count {
        return spawned;
    }
    let radius = (world.config.arena_radius - world.config.food_radius).max(0.0);
    let value = world.config.food_value;

    for _ in 0..count {
        let position = random_point_in_circle(&mut world.rng, radius);
        let id = world.next_entity_id();
        world.foods.insert(
            id,
            Food {
                id,
                position,
                value,
            },
        );
        spawned.push(id);
    }

    spawned
}

/// Seed a fresh world with its initial pellet population
pub fn spawn_initial_food(world: &mut World) {
    let count = world.config.initial_food_count;
    spawn_random_food(world, count);
}

/// Boost costs length: drain at a constant rate while above the floor, and
/// convert whole food units of drained length into pellets dropped at the
/// tail. Boosting shuts off once the floor is reached.
pub fn apply_boost_drain(world: &mut World, snake_id: u32, dt: f32) {
    let min_length = world.config.min_length;
    let food_value = world.config.food_value;
    let drain_rate = world.config.boost_drain_per_second;
    let jitter_radius = world.config.snake_radius;

    let Some(snake) = world.snakes.get_mut(&snake_id) else {
        return;
    };
    if !snake.is_boosting {
        return;
    }
    if snake.length <= min_length {
        snake.is_boosting = false;
        snake.boost_accumulator = 0.0;
        return;
    }

    let drain = drain_rate * dt;
    snake.length = (snake.length - drain).max(min_length);
    snake.boost_accumulator += drain;

    let drop_count = (snake.boost_accumulator / food_value).floor() as usize;
    let tail = snake.tail();
    if drop_count > 0 {
        snake.boost_accumulator -= drop_count as f32 * food_value;
    }
    if snake.length <= min_length {
        snake.is_boosting = false;
    }

    for _ in 0..drop_count {
        let offset = random_point_in_circle(&mut world.rng, jitter_radius);
        let id = world.next_entity_id();
        world.foods.insert(
            id,
            Food {
                id,
                position: tail + offset,
                value: food_value,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use proptest::prelude::*;

    fn test_world() -> World {
        World::new(SimConfig::default(), 5)
    }

    fn spawn_test_snake(world: &mut World) -> u32 {
        let owner = world.add_player();
        world.spawn_snake(owner, "t")
    }

    #[test]
    fn test_kill_snake_redistributes_length_as_food() {
        let mut world = test_world();
        let snake_id = spawn_test_snake(&mut world);
        let length = world.snakes[&snake_id].length;
        let expected = (length / world.config.food_value).floor() as usize;

        let event = kill_snake(&mut world, snake_id, None).unwrap();

        assert_eq!(event.snake_id, snake_id);
        assert!(!world.snakes.contains_key(&snake_id));
        assert_eq!(world.foods.len(), expected.max(1));
        let total: f32 = world.foods.values().map(|f| f.value).sum();
        // Pellet values sum back to roughly the stored length
        assert!((total - length).abs() <= world.config.food_value);
    }

    #[test]
    fn test_kill_snake_unsets_player_reference() {
        let mut world = test_world();
        let owner = world.add_player();
        let snake_id = world.spawn_snake(owner, "t");
        kill_snake(&mut world, snake_id, None);
        assert_eq!(world.players[&owner].snake_id, None);
    }

    #[test]
    fn test_kill_snake_twice_is_noop() {
        let mut world = test_world();
        let snake_id = spawn_test_snake(&mut world);
        assert!(kill_snake(&mut world, snake_id, None).is_some());
        let pellets = world.foods.len();
        assert!(kill_snake(&mut world, snake_id, None).is_none());
        assert_eq!(world.foods.len(), pellets);
    }

    #[test]
    fn test_spawn_random_food_within_arena() {
        let mut world = test_world();
        let ids = spawn_random_food(&mut world, 50);
        assert_eq!(ids.len(), 50);
        let limit = world.config.arena_radius - world.config.food_radius;
        for id in ids {
            assert!(world.foods[&id].position.length() <= limit + 1e-3);
        }
    }

    #[test]
    fn test_spawn_random_food_respects_cap() {
        let mut world = test_world();
        world.config.food_max_count = 10;
        spawn_random_food(&mut world, 10);
        let ids = spawn_random_food(&mut world, 5);
        assert!(ids.is_empty());
        assert_eq!(world.foods.len(), 10);
    }

    #[test]
    fn test_boost_drain_reduces_length_and_drops_food() {
        let mut world = test_world();
        let snake_id = spawn_test_snake(&mut world);
        {
            let snake = world.snakes.get_mut(&snake_id).unwrap();
            snake.is_boosting = true;
            snake.length = 200.0;
        }
        let dt = world.config.tick_delta();
        // Enough ticks to drain more than one food unit (30/s drain, 12 unit)
        for _ in 0..15 {
            apply_boost_drain(&mut world, snake_id, dt);
        }
        let snake = &world.snakes[&snake_id];
        assert!(snake.length < 200.0);
        assert_eq!(world.foods.len(), 1);
        assert!(snake.boost_accumulator < world.config.food_value);
    }

    #[test]
    fn test_boost_disabled_at_floor() {
        let mut world = test_world();
        let snake_id = spawn_test_snake(&mut world);
        {
            let snake = world.snakes.get_mut(&snake_id).unwrap();
            snake.is_boosting = true;
            snake.length = world.config.min_length;
        }
        let dt = world.config.tick_delta();
        apply_boost_drain(&mut world, snake_id, dt);
        let snake = &world.snakes[&snake_id];
        assert!(!snake.is_boosting);
        assert_eq!(snake.boost_accumulator, 0.0);
        assert_eq!(snake.length, world.config.min_length);
    }

    #[test]
    fn test_point_along_segments_interpolates() {
        let segments = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        let p = point_along_segments(&segments, 5.0);
        assert!((p - Vec2::new(5.0, 0.0)).length() < 1e-5);
        let p = point_along_segments(&segments, 15.0);
        assert!((p - Vec2::new(10.0, 5.0)).length() < 1e-5);
        // Past the end clamps to the tail
        let p = point_along_segments(&segments, 100.0);
        assert!((p - Vec2::new(10.0, 10.0)).length() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_death_pellet_count_matches_length(length in 40.0f32..2200.0) {
            let mut world = test_world();
            let snake_id = spawn_test_snake(&mut world);
            world.snakes.get_mut(&snake_id).unwrap().length = length;

            kill_snake(&mut world, snake_id, None);

            let expected = ((length / world.config.food_value).floor() as usize).max(1);
            prop_assert_eq!(world.foods.len(), expected);
        }

        #[test]
        fn prop_random_food_inside_disc(seed in 0u64..1000, count in 1usize..32) {
            let mut world = World::new(SimConfig::default(), seed);
            let ids = spawn_random_food(&mut world, count);
            let limit = world.config.arena_radius - world.config.food_radius;
            for id in ids {
                prop_assert!(world.foods[&id].position.length() <= limit + 1e-3);
            }
        }
    }
}
