//! Headless authoritative server loop
//!
//! Runs the simulation at the configured tick rate and logs a heartbeat once
//! per second. Transport is out of scope here; snapshots produced each tick
//! are where a network layer would fan out to connected clients.

use std::time::{Duration, Instant};

use log::info;

use serpent_arena::config::SimConfig;
use serpent_arena::sim::{spawn_initial_food, tick};
use serpent_arena::World;

fn main() {
    env_logger::init();

    let config = SimConfig::default();
    let seed = std::env::var("SERPENT_SEED")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(rand::random::<u64>);

    info!(
        "starting arena: radius={} tick_rate={} seed={seed}",
        config.arena_radius, config.tick_rate
    );

    let tick_interval = Duration::from_secs_f32(config.tick_delta());
    let mut world = World::new(config, seed);
    spawn_initial_food(&mut world);

    let started = Instant::now();
    let mut next_tick = Instant::now();
    let mut last_heartbeat = Instant::now();

    loop {
        let output = tick(&mut world);

        for death in &output.deaths {
            info!(
                "snake {} died (killer: {:?})",
                death.snake_id, death.killer_id
            );
        }

        if last_heartbeat.elapsed() >= Duration::from_secs(1) {
            info!(
                "tick {} uptime {:.0}s snakes={} foods={}",
                world.tick,
                started.elapsed().as_secs_f64(),
                world.snakes.len(),
                world.foods.len()
            );
            last_heartbeat = Instant::now();
        }

        next_tick += tick_interval;
        let now = Instant::now();
        if next_tick > now {
            std::thread::sleep(next_tick - now);
        } else {
            // Fell behind; catch up without sleeping
            next_tick = now;
        }
    }
}
