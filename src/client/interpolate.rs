//! Pairwise view interpolation between two snapshots
//!
//! Matching is by id against the older snapshot. Anything present only in
//! the newer snapshot passes through unchanged - a freshly joined snake or
//! freshly spawned pellet has no prior position to blend from.

use std::collections::HashMap;

use glam::Vec2;

use crate::sim::{FoodView, SnakeView};

#[inline]
pub fn interpolate_point(a: Vec2, b: Vec2, alpha: f32) -> Vec2 {
    a + (b - a) * alpha
}

/// Blend snake views. Segments are interpolated index-pairwise over the
/// shorter of the two bodies; extra trailing segments on the newer view
/// (the snake grew) are appended unmodified.
pub fn interpolate_snakes(prev: &[SnakeView], next: &[SnakeView], alpha: f32) -> Vec<SnakeView> {
    let by_id: HashMap<u32, &SnakeView> = prev.iter().map(|snake| (snake.id, snake)).collect();

    next.iter()
        .map(|snake_next| {
            let Some(snake_prev) = by_id.get(&snake_next.id) else {
                return snake_next.clone();
            };

            let shared = snake_prev.segments.len().min(snake_next.segments.len());
            let mut segments = Vec::with_capacity(snake_next.segments.len());
            for i in 0..shared {
                segments.push(interpolate_point(
                    snake_prev.segments[i],
                    snake_next.segments[i],
                    alpha,
                ));
            }
            segments.extend_from_slice(&snake_next.segments[shared..]);

            SnakeView {
                segments,
                ..snake_next.clone()
            }
        })
        .collect()
}

/// Blend food views; only the position is interpolated, never the value.
pub fn interpolate_foods(prev: &[FoodView], next: &[FoodView], alpha: f32) -> Vec<FoodView> {
    let by_id: HashMap<u32, &FoodView> = prev.iter().map(|food| (food.id, food)).collect();

    next.iter()
        .map(|food_next| {
            let Some(food_prev) = by_id.get(&food_next.id) else {
                return food_next.clone();
            };
            FoodView {
                position: interpolate_point(food_prev.position, food_next.position, alpha),
                ..food_next.clone()
            }
        })
        .collect()
}
