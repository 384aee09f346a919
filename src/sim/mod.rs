//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the `World`
//! - Stable iteration order (entity maps are ordered by id)
//! - No transport or platform dependencies

pub mod collision;
pub mod lifecycle;
pub mod movement;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{check_food_collisions, check_snake_collisions, PendingDeath};
pub use lifecycle::{apply_boost_drain, kill_snake, spawn_initial_food, spawn_random_food};
pub use movement::{trim_snake_tail, update_snake_movement};
pub use snapshot::{build_foods, build_state, FoodView, FoodsBatch, SnakeView, StateSnapshot};
pub use state::{random_point_in_circle, DeathEvent, Food, Player, Snake, World, PALETTE};
pub use tick::{tick, TickOutput};
