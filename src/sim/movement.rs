//! Per-tick heading and position integration
//!
//! Each snake turns toward its target direction at a fixed angular rate,
//! advances its head, and then has its tail trimmed back to the target
//! length. Movement never touches other snakes, so the pass is a plain
//! sequential loop over the world's snakes.

use glam::Vec2;

use super::state::Snake;
use crate::config::SimConfig;
use crate::{polar_to_cartesian, wrap_angle};

/// Turn toward the target heading (clamped to `turn_rate * dt`) and prepend
/// the new head position. Tail trimming is a separate step so that food eaten
/// this tick extends the body before the trim.
pub fn update_snake_movement(snake: &mut Snake, dt: f32, cfg: &SimConfig) {
    let target = if snake.target_direction.is_finite() {
        wrap_angle(snake.target_direction)
    } else {
        snake.direction
    };

    let delta = wrap_angle(target - snake.direction);
    let max_delta = cfg.turn_rate * dt;
    let applied = delta.clamp(-max_delta, max_delta);
    snake.direction = wrap_angle(snake.direction + applied);

    let speed = if snake.is_boosting {
        cfg.boost_speed
    } else {
        snake.speed
    };
    let distance = speed * dt;
    if distance <= 0.0 {
        return;
    }

    let head = snake.head();
    let next = head + polar_to_cartesian(distance, snake.direction);
    snake.segments.insert(0, next);
}

/// Walk the polyline from the head accumulating arclength; once the target
/// length is reached, cut with an interpolated point and discard the rest.
/// The result always keeps at least two points (head duplicated if needed).
pub fn trim_snake_tail(snake: &mut Snake) {
    if snake.segments.is_empty() {
        return;
    }

    let max_length = snake.length.max(0.0);
    let mut trimmed = vec![snake.segments[0]];
    let mut remaining = max_length;

    for i in 0..snake.segments.len() - 1 {
        let current = snake.segments[i];
        let next = snake.segments[i + 1];
        let segment = next - current;
        let segment_length = segment.length();

        if segment_length == 0.0 {
            continue;
        }

        if remaining >= segment_length {
            remaining -= segment_length;
            trimmed.push(next);
        } else {
            let t = remaining / segment_length;
            trimmed.push(current + segment * t);
            break;
        }
    }

    if trimmed.len() == 1 {
        trimmed.push(trimmed[0]);
    }

    snake.segments = trimmed;
}

/// Total arclength of the kept polyline
pub fn polyline_length(segments: &[Vec2]) -> f32 {
    segments
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .sum()
}
