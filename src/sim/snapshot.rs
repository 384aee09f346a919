//! Outbound world views
//!
//! Immutable value-copies of world state, built once per tick and handed to
//! the transport layer. Views strip simulation-internal fields (`direction`,
//! `boost_accumulator`); field names serialize in the wire's camelCase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Snake, World};

/// Public view of a snake, safe to ship to any observer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnakeView {
    pub id: u32,
    pub name: String,
    pub segments: Vec<Vec2>,
    pub length: f32,
    pub is_boosting: bool,
    pub color: String,
}

/// Public view of a pellet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodView {
    pub id: u32,
    pub position: Vec2,
    pub value: f32,
}

/// Full world snapshot at a simulated time (milliseconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub time: f64,
    pub snakes: Vec<SnakeView>,
    pub foods: Vec<FoodView>,
}

/// Reduced-cadence food-only batch with interleaved x,y positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodsBatch {
    pub time: f64,
    pub ids: Vec<u32>,
    /// x0, y0, x1, y1, ...
    pub positions: Vec<f32>,
    pub values: Vec<f32>,
}

impl FoodsBatch {
    /// De-interleave back into food views (receiver-side merge). A wire-decoded
    /// batch may carry inconsistent array lengths; truncate to the shortest
    /// rather than panic on the receiver.
    pub fn foods(&self) -> Vec<FoodView> {
        let count = self
            .ids
            .len()
            .min(self.positions.len() / 2)
            .min(self.values.len());
        (0..count)
            .map(|i| FoodView {
                id: self.ids[i],
                position: Vec2::new(self.positions[i * 2], self.positions[i * 2 + 1]),
                value: self.values[i],
            })
            .collect()
    }
}

pub fn snake_view(snake: &Snake) -> SnakeView {
    SnakeView {
        id: snake.id,
        name: snake.name.clone(),
        segments: snake.segments.clone(),
        length: snake.length,
        is_boosting: snake.is_boosting,
        color: snake.color.clone(),
    }
}

/// Build the full per-tick snapshot
pub fn build_state(world: &World) -> StateSnapshot {
    StateSnapshot {
        time: world.tick as f64 * world.config.tick_interval_ms(),
        snakes: world.snakes.values().map(snake_view).collect(),
        foods: world
            .foods
            .values()
            .map(|food| FoodView {
                id: food.id,
                position: food.position,
                value: food.value,
            })
            .collect(),
    }
}

/// Build the reduced food-only batch
pub fn build_foods(world: &World) -> FoodsBatch {
    let mut batch = FoodsBatch {
        time: world.tick as f64 * world.config.tick_interval_ms(),
        ids: Vec::with_capacity(world.foods.len()),
        positions: Vec::with_capacity(world.foods.len() * 2),
        values: Vec::with_capacity(world.foods.len()),
    };
    for food in world.foods.values() {
        batch.ids.push(food.id);
        batch.positions.push(food.position.x);
        batch.positions.push(food.position.y);
        batch.values.push(food.value);
    }
    batch
}
