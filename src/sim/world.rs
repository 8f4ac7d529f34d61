//! Procedural world streaming
//!
//! The sea is a strip of fixed-width tiles laid end to end along -x. A new
//! tile (and its rocks) is spawned ahead whenever the boat gets close to the
//! frontier, and rocks and tiles that have fallen behind are dropped so the
//! live set stays bounded no matter how far the boat rows.
//!
//! The streamer is the only owner of tiles and obstacles. Renderers look
//! them up by id and never hold on to them.

use std::collections::VecDeque;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::OBSTACLE_Y;
use crate::tuning::Tuning;

/// Rock shapes the renderer can instantiate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleVariant {
    RockSmall,
    RockMedium,
    RockLarge,
    RockSpire,
    RockFlat,
}

impl ObstacleVariant {
    pub const CATALOG: [ObstacleVariant; 5] = [
        ObstacleVariant::RockSmall,
        ObstacleVariant::RockMedium,
        ObstacleVariant::RockLarge,
        ObstacleVariant::RockSpire,
        ObstacleVariant::RockFlat,
    ];
}

/// A rock in the water
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec3,
    /// Rotation about the vertical axis (degrees)
    pub yaw: f32,
    /// Tilt about the travel axis (degrees)
    pub roll: f32,
    pub variant: ObstacleVariant,
}

/// A segment of sea
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    pub origin_x: f32,
}

/// Streaming parameters, copied out of [`Tuning`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub tile_width: f32,
    pub tile_cap: usize,
    pub obstacle_half_span: f32,
    pub extension_margin: f32,
    pub trailing_margin: f32,
    pub obstacles_per_tile: usize,
    pub lateral_extent: f32,
    pub clearance_half_width: f32,
    pub initial_tile_x: f32,
    pub initial_obstacle_span: (f32, f32),
}

impl From<&Tuning> for WorldConfig {
    fn from(t: &Tuning) -> Self {
        Self {
            tile_width: t.tile_width,
            tile_cap: t.tile_cap,
            obstacle_half_span: t.tile_obstacle_half_span,
            extension_margin: t.extension_margin,
            trailing_margin: t.trailing_margin,
            obstacles_per_tile: t.obstacles_per_tile,
            lateral_extent: t.lateral_extent,
            clearance_half_width: t.clearance_half_width,
            initial_tile_x: t.initial_tile_x,
            initial_obstacle_span: t.initial_obstacle_span,
        }
    }
}

impl WorldConfig {
    /// Whether any lateral position lies outside the clearance band
    pub fn has_room(&self) -> bool {
        self.lateral_extent.is_finite() && self.lateral_extent > self.clearance_half_width.max(0.0)
    }
}

/// What happened during an extension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extension {
    pub tile: Tile,
    pub obstacles_spawned: usize,
    pub obstacles_evicted: usize,
    pub tile_evicted: Option<Tile>,
}

/// Owns the live tiles and obstacles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldStreamer {
    pub config: WorldConfig,
    /// Live tiles, oldest first
    tiles: VecDeque<Tile>,
    /// Live obstacles (sorted by id)
    obstacles: Vec<Obstacle>,
    /// Origin of the furthest-ahead tile
    frontier_x: f32,
    rng: Pcg32,
    next_id: u32,
}

impl WorldStreamer {
    /// Create a world with its starting tile and rocks
    pub fn new(config: WorldConfig, seed: u64) -> Self {
        let mut world = Self {
            frontier_x: config.initial_tile_x,
            config,
            tiles: VecDeque::new(),
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        world.seed_initial();
        world
    }

    pub fn from_tuning(tuning: &Tuning, seed: u64) -> Self {
        Self::new(WorldConfig::from(tuning), seed)
    }

    /// Drop everything and rebuild the starting world from a new seed
    pub fn reset(&mut self, seed: u64) {
        self.tiles.clear();
        self.obstacles.clear();
        self.rng = Pcg32::seed_from_u64(seed);
        self.next_id = 1;
        self.frontier_x = self.config.initial_tile_x;
        self.seed_initial();
    }

    fn seed_initial(&mut self) {
        let id = self.next_entity_id();
        self.tiles.push_back(Tile {
            id,
            origin_x: self.config.initial_tile_x,
        });
        let (start, end) = self.config.initial_obstacle_span;
        self.spawn_obstacles(self.config.obstacles_per_tile, start, end);
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacle(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles
            .binary_search_by_key(&id, |o| o.id)
            .ok()
            .map(|i| &self.obstacles[i])
    }

    pub fn frontier_x(&self) -> f32 {
        self.frontier_x
    }

    /// Spawn `count` rocks between `x_start` and `x_end` (either order)
    ///
    /// Lateral position is rejection-sampled until it clears the band around
    /// the centerline. Returns the number of rocks placed, which is zero when
    /// the band leaves no room in the field (see [`WorldConfig::has_room`]).
    pub fn spawn_obstacles(&mut self, count: usize, x_start: f32, x_end: f32) -> usize {
        if !self.config.has_room() {
            log::warn!(
                "No room for rocks: clearance {} vs lateral extent {}",
                self.config.clearance_half_width,
                self.config.lateral_extent
            );
            return 0;
        }
        let (lo, hi) = if x_start <= x_end {
            (x_start, x_end)
        } else {
            (x_end, x_start)
        };
        let extent = self.config.lateral_extent;
        let clearance = self.config.clearance_half_width;

        for _ in 0..count {
            let pick = self.rng.random_range(0..ObstacleVariant::CATALOG.len());
            let variant = ObstacleVariant::CATALOG[pick];
            let x = if hi > lo { self.rng.random_range(lo..hi) } else { lo };
            let mut z = 0.0_f32;
            while z.abs() <= clearance {
                z = self.rng.random_range(-extent..extent);
            }
            let yaw = self.rng.random_range(0.0..180.0);
            let roll = self.rng.random_range(0.0..180.0);

            let id = self.next_entity_id();
            self.obstacles.push(Obstacle {
                id,
                pos: Vec3::new(x, OBSTACLE_Y, z),
                yaw,
                roll,
                variant,
            });
        }
        count
    }

    /// Extend and evict as needed for the boat's current position
    ///
    /// At most one tile is added per call.
    pub fn update(&mut self, boat_x: f32) -> Option<Extension> {
        if boat_x < self.frontier_x - self.config.extension_margin {
            Some(self.extend(boat_x))
        } else {
            None
        }
    }

    fn extend(&mut self, boat_x: f32) -> Extension {
        let origin_x = self.frontier_x - self.config.tile_width;
        let tile = Tile {
            id: self.next_entity_id(),
            origin_x,
        };
        self.tiles.push_back(tile);

        let half = self.config.obstacle_half_span;
        let obstacles_spawned =
            self.spawn_obstacles(self.config.obstacles_per_tile, origin_x + half, origin_x - half);
        self.frontier_x = origin_x;

        let obstacles_evicted = self.evict_behind(boat_x);
        let tile_evicted = if self.tiles.len() > self.config.tile_cap {
            self.evict_oldest_tile()
        } else {
            None
        };

        log::debug!(
            "Extended world: tile {} at x={}, +{} rocks, -{} rocks, {} tiles live",
            tile.id,
            origin_x,
            obstacles_spawned,
            obstacles_evicted,
            self.tiles.len()
        );

        Extension {
            tile,
            obstacles_spawned,
            obstacles_evicted,
            tile_evicted,
        }
    }

    /// Remove rocks more than the trailing margin behind the boat
    pub fn evict_behind(&mut self, boat_x: f32) -> usize {
        let limit = boat_x + self.config.trailing_margin;
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.pos.x <= limit);
        before - self.obstacles.len()
    }

    /// Remove the oldest tile. No-op on an empty pool.
    pub fn evict_oldest_tile(&mut self) -> Option<Tile> {
        self.tiles.pop_front()
    }
}
