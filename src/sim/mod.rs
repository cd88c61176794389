//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of I/O:
//! - Randomness comes from a caller-supplied RNG
//! - Persistence is the engine's concern
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, Resolution, check_collisions, player_rect};
pub use snapshot::Snapshot;
pub use spawn::SpawnRates;
pub use state::{
    Body, Coin, GameEvent, GamePhase, Obstacle, ObstacleKind, Player, Scoreboard, World,
};
pub use tick::{apply_move, tick};
