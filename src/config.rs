//! Simulation tunables
//!
//! All gameplay-affecting values live in one serde-backed struct so a test or
//! a deployment can swap the whole set without touching module state.

use serde::{Deserialize, Serialize};

/// Simulation configuration. Defaults are the production arena values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Ticks per second
    pub tick_rate: u32,
    /// Circular world boundary radius
    pub arena_radius: f32,

    // === Snakes ===
    /// Base cruising speed (units/sec)
    pub snake_speed: f32,
    /// Speed while boosting (units/sec)
    pub boost_speed: f32,
    /// Maximum heading change (radians/sec). Constant for every snake; this
    /// is NOT scaled by body length.
    pub turn_rate: f32,
    /// Collision radius of the head
    pub snake_radius: f32,
    /// Body length at spawn
    pub start_length: f32,
    /// Floor below which boosting is force-disabled
    pub min_length: f32,
    /// Growth cap
    pub max_length: f32,
    /// Length drained per second while boosting
    pub boost_drain_per_second: f32,

    // === Food ===
    /// Collision radius of a pellet
    pub food_radius: f32,
    /// Length granted per pellet
    pub food_value: f32,
    /// Pellets seeded into a fresh world
    pub initial_food_count: usize,
    /// Periodic spawner cadence; 0 disables the spawner
    pub food_spawn_interval_ticks: u64,
    /// Pellets per spawner firing
    pub food_spawn_count: usize,
    /// Global pellet cap
    pub food_max_count: usize,
    /// Cadence of the reduced food-only broadcast; 0 disables it
    pub foods_publish_interval_ticks: u64,
    /// Uniform grid cell size for food consumption queries
    pub food_cell_size: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 30,
            arena_radius: 2000.0,

            snake_speed: 220.0,
            boost_speed: 360.0,
            turn_rate: std::f32::consts::PI * 3.0,
            snake_radius: 16.0,
            start_length: 120.0,
            min_length: 40.0,
            max_length: 2200.0,
            boost_drain_per_second: 30.0,

            food_radius: 6.0,
            food_value: 12.0,
            initial_food_count: 200,
            food_spawn_interval_ticks: 15,
            food_spawn_count: 4,
            food_max_count: 250,
            foods_publish_interval_ticks: 5,
            food_cell_size: 64.0,
        }
    }
}

impl SimConfig {
    /// Fixed timestep in seconds
    #[inline]
    pub fn tick_delta(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Duration of one tick in milliseconds
    #[inline]
    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.tick_rate)
    }

    /// Squared distance at which a head consumes a pellet
    #[inline]
    pub fn consume_distance_sq(&self) -> f32 {
        let d = self.food_radius + self.snake_radius;
        d * d
    }

    /// Squared radius for head-to-body kills
    #[inline]
    pub fn body_hit_radius_sq(&self) -> f32 {
        let r = self.snake_radius * 1.05;
        r * r
    }
}
