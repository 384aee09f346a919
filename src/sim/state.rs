//! World state and entity types
//!
//! The `World` exclusively owns every snake, food pellet, and player record.
//! Entities are kept in `BTreeMap`s so per-tick iteration order is stable,
//! which is what makes collision tie-breaks deterministic.

use std::collections::BTreeMap;
use std::f32::consts::PI;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::polar_to_cartesian;

/// Spawn color palette, assigned round-robin by RNG
pub const PALETTE: [&str; 8] = [
    "#22d3ee", "#4ade80", "#facc15", "#f97316", "#f43f5e", "#a78bfa", "#60a5fa", "#f472b6",
];

/// A controllable body: ordered point sequence, head first, always >= 2 points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    pub id: u32,
    pub owner_id: u32,
    pub name: String,
    /// Polyline with `segments[0]` as the head
    pub segments: Vec<Vec2>,
    /// Current heading (radians)
    pub direction: f32,
    /// Desired heading (radians)
    pub target_direction: f32,
    /// Base speed; boosting overrides with the configured boost speed
    pub speed: f32,
    /// Target body length; the polyline arclength tracks this after trimming
    pub length: f32,
    pub is_boosting: bool,
    pub color: String,
    /// Fractional drained length pending conversion into dropped pellets
    pub boost_accumulator: f32,
}

impl Snake {
    /// Head position. Construction guarantees at least two segments.
    #[inline]
    pub fn head(&self) -> Vec2 {
        self.segments[0]
    }

    /// Tail position (last segment)
    #[inline]
    pub fn tail(&self) -> Vec2 {
        self.segments[self.segments.len() - 1]
    }
}

/// A consumable pellet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub id: u32,
    pub position: Vec2,
    /// Length granted on consumption
    pub value: f32,
}

/// A connected participant. Holds the owned snake's id, never a reference;
/// the snake itself lives in `World::snakes`.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: u32,
    /// Unset between death and an explicit rejoin
    pub snake_id: Option<u32>,
    /// Display name from the last accepted join; kept here so kill credits
    /// can name a killer whose snake died in the same tick
    pub name: String,
    pub eliminations: u32,
}

/// Produced once per death, consumed by the lifecycle manager and forwarded
/// to the session layer for notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeathEvent {
    pub snake_id: u32,
    pub owner_id: u32,
    pub killer_id: Option<u32>,
}

/// Area-uniform random point inside a disc of the given radius
pub fn random_point_in_circle<R: Rng>(rng: &mut R, radius: f32) -> Vec2 {
    let theta = rng.random_range(0.0..std::f32::consts::TAU);
    let r = rng.random_range(0.0f32..1.0).sqrt() * radius;
    Vec2::new(theta.cos() * r, theta.sin() * r)
}

/// All live entities plus the seeded generator driving every random decision.
#[derive(Debug)]
pub struct World {
    /// Monotonically increasing simulation step counter
    pub tick: u64,
    pub snakes: BTreeMap<u32, Snake>,
    pub foods: BTreeMap<u32, Food>,
    pub players: BTreeMap<u32, Player>,
    pub config: SimConfig,
    pub rng: Pcg32,
    next_id: u32,
}

impl World {
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self {
            tick: 0,
            snakes: BTreeMap::new(),
            foods: BTreeMap::new(),
            players: BTreeMap::new(),
            config,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Register a connected participant. The snake is only created on an
    /// explicit join (see `session`).
    pub fn add_player(&mut self) -> u32 {
        let id = self.next_entity_id();
        self.players.insert(
            id,
            Player {
                id,
                snake_id: None,
                name: String::new(),
                eliminations: 0,
            },
        );
        id
    }

    /// Drop a participant and any snake they still control. Called on
    /// disconnect; there is no retry.
    pub fn remove_player(&mut self, player_id: u32) {
        if let Some(player) = self.players.remove(&player_id) {
            if let Some(snake_id) = player.snake_id {
                self.snakes.remove(&snake_id);
            }
        }
    }

    /// Create a fresh snake for `owner_id` at a random spawn point, replacing
    /// any snake the player still controls. Returns the new snake's id.
    pub fn spawn_snake(&mut self, owner_id: u32, name: &str) -> u32 {
        if let Some(old_id) = self
            .players
            .get(&owner_id)
            .and_then(|player| player.snake_id)
        {
            self.snakes.remove(&old_id);
        }

        let id = self.next_entity_id();
        let cfg = &self.config;
        let spawn_radius = (cfg.arena_radius - cfg.snake_radius * 2.0).max(0.0);
        let length = cfg.start_length;
        let speed = cfg.snake_speed;

        let direction = self.rng.random_range(-PI..PI);
        let head = random_point_in_circle(&mut self.rng, spawn_radius);
        let tail = head - polar_to_cartesian(length, direction);
        let color = PALETTE[self.rng.random_range(0..PALETTE.len())].to_string();

        let snake = Snake {
            id,
            owner_id,
            name: name.to_string(),
            segments: vec![head, tail],
            direction,
            target_direction: direction,
            speed,
            length,
            is_boosting: false,
            color,
            boost_accumulator: 0.0,
        };
        self.snakes.insert(id, snake);

        if let Some(player) = self.players.get_mut(&owner_id) {
            player.snake_id = Some(id);
            player.name = name.to_string();
        }

        id
    }

    /// Reverse lookup from a snake to its controlling player
    pub fn find_player_by_snake_id(&self, snake_id: u32) -> Option<&Player> {
        self.players
            .values()
            .find(|player| player.snake_id == Some(snake_id))
    }
}
