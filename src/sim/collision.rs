//! Collision detection: food consumption, snake-vs-snake, arena boundary
//!
//! Food queries go through a uniform grid rebuilt each tick. Snake-vs-snake
//! checks are pairwise over the world's stable iteration order; deaths are
//! only *recorded* here and applied after the full pass so same-tick double
//! kills stay symmetric and no map is mutated mid-scan.
//!
//! The head-to-head test is O(n²) by design. That is the reference behavior
//! and stays acceptable up to a few hundred live snakes; reusing the food
//! grid here would be a faithful optimization if that ceiling is ever hit.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use super::state::World;

/// A death recorded during the collision pass, applied afterwards by the
/// lifecycle manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeath {
    pub snake_id: u32,
    pub killer_id: Option<u32>,
}

/// Neighboring cells scanned around a head. Two cells of 64 units comfortably
/// cover the consume distance.
const FOOD_CELL_SCAN: i32 = 2;

#[inline]
fn cell_index(position: Vec2, cell_size: f32) -> (i32, i32) {
    (
        (position.x / cell_size).floor() as i32,
        (position.y / cell_size).floor() as i32,
    )
}

/// Squared distance from `point` to the segment `a`-`b`
pub fn point_to_segment_distance_sq(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let ab_len_sq = ab.length_squared();
    if ab_len_sq == 0.0 {
        return point.distance_squared(a);
    }
    let t = ((point - a).dot(ab) / ab_len_sq).clamp(0.0, 1.0);
    point.distance_squared(a + ab * t)
}

/// Rehash all food into the grid and let every head consume pellets within
/// reach. A pellet removed earlier in the same pass is skipped, so the first
/// snake in iteration order wins a contested pellet.
pub fn check_food_collisions(world: &mut World) {
    let cell_size = world.config.food_cell_size;
    let consume_sq = world.config.consume_distance_sq();
    let max_length = world.config.max_length;

    let mut grid: HashMap<(i32, i32), Vec<u32>> = HashMap::new();
    for food in world.foods.values() {
        grid.entry(cell_index(food.position, cell_size))
            .or_default()
            .push(food.id);
    }

    let snake_ids: Vec<u32> = world.snakes.keys().copied().collect();
    for snake_id in snake_ids {
        let head = match world.snakes.get(&snake_id) {
            Some(snake) => snake.head(),
            None => continue,
        };
        let (base_x, base_y) = cell_index(head, cell_size);

        for dx in -FOOD_CELL_SCAN..=FOOD_CELL_SCAN {
            for dy in -FOOD_CELL_SCAN..=FOOD_CELL_SCAN {
                let Some(bucket) = grid.get(&(base_x + dx, base_y + dy)) else {
                    continue;
                };
                for &food_id in bucket {
                    let Some(food) = world.foods.get(&food_id) else {
                        continue;
                    };
                    if food.position.distance_squared(head) > consume_sq {
                        continue;
                    }
                    let value = food.value;
                    world.foods.remove(&food_id);
                    if let Some(snake) = world.snakes.get_mut(&snake_id) {
                        snake.length = (snake.length + value).min(max_length);
                    }
                }
            }
        }
    }
}

/// Full snake-vs-snake and boundary pass. Iteration follows the snake map
/// order; a snake marked dead is excluded from all further checks, both as
/// attacker and as victim.
pub fn check_snake_collisions(world: &World) -> Vec<PendingDeath> {
    let cfg = &world.config;
    let head_hit_sq = (cfg.snake_radius * 2.0) * (cfg.snake_radius * 2.0);
    let body_hit_sq = cfg.body_hit_radius_sq();
    let boundary = (cfg.arena_radius - cfg.snake_radius).max(0.0);
    let boundary_sq = boundary * boundary;

    let snakes: Vec<_> = world.snakes.values().collect();
    let mut deaths: Vec<PendingDeath> = Vec::new();
    let mut killed: HashSet<u32> = HashSet::new();

    // Head-to-head: both die, crediting each other
    for i in 0..snakes.len() {
        let a = snakes[i];
        if killed.contains(&a.id) {
            continue;
        }
        for b in snakes.iter().skip(i + 1) {
            if killed.contains(&b.id) {
                continue;
            }
            if a.head().distance_squared(b.head()) <= head_hit_sq {
                deaths.push(PendingDeath {
                    snake_id: a.id,
                    killer_id: Some(b.id),
                });
                deaths.push(PendingDeath {
                    snake_id: b.id,
                    killer_id: Some(a.id),
                });
                killed.insert(a.id);
                killed.insert(b.id);
            }
            if killed.contains(&a.id) {
                break;
            }
        }
    }

    // Boundary, then head-to-body against every other snake
    for snake in &snakes {
        if killed.contains(&snake.id) {
            continue;
        }
        let head = snake.head();

        if head.length_squared() > boundary_sq {
            deaths.push(PendingDeath {
                snake_id: snake.id,
                killer_id: None,
            });
            killed.insert(snake.id);
            continue;
        }

        'others: for other in &snakes {
            if other.id == snake.id || killed.contains(&other.id) {
                continue;
            }
            for pair in other.segments.windows(2) {
                if point_to_segment_distance_sq(head, pair[0], pair[1]) <= body_hit_sq {
                    deaths.push(PendingDeath {
                        snake_id: snake.id,
                        killer_id: Some(other.id),
                    });
                    killed.insert(snake.id);
                    break 'others;
                }
            }
        }
    }

    deaths
}
