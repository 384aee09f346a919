//! Serpent Arena - an authoritative snake arena simulation
//!
//! Core modules:
//! - `sim`: Deterministic tick-driven simulation (movement, collisions, lifecycle)
//! - `protocol`: Wire message types and validation
//! - `session`: Player intent application and death notification fan-out
//! - `client`: Receiver-side snapshot buffer with time-shifted interpolation
//! - `config`: Data-driven simulation tunables

pub mod client;
pub mod config;
pub mod protocol;
pub mod session;
pub mod sim;

pub use config::SimConfig;
pub use sim::{DeathEvent, Food, Player, Snake, World};

use glam::Vec2;

/// Normalize angle to (-π, π]. Modular reduction, not iterative subtraction:
/// for very large magnitudes the ulp exceeds 2π and a subtraction loop would
/// never make progress. Exactly π stays π, so a half-turn target keeps its
/// sign.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
