//! Lane Runner - A three-lane endless runner
//!
//! Core modules:
//! - `sim`: Simulation (player actions, spawning, collisions, scoring)
//! - `engine`: Owned game engine wrapping the simulation and persistence
//! - `highscores`: High score storage
//! - `input`: Direction and key command mapping
//! - `settings`: Data-driven runtime configuration

pub mod engine;
pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;

pub use engine::Engine;
pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore, StoreError};
pub use input::{Command, Direction};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Nominal driver cadence (the per-tick spawn rates assume this)
    pub const TICK_HZ: u32 = 60;
    /// Largest frame delta the driver feeds into a tick
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Canvas dimensions (y grows downward)
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 500.0;

    /// Canonical x for lanes 0 (left), 1 (center), 2 (right)
    pub const LANE_POSITIONS: [f32; 3] = [150.0, 300.0, 450.0];
    pub const LANE_COUNT: u8 = 3;
    pub const CENTER_LANE: u8 = 1;

    /// Player box, feet at PLAYER_Y
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_Y: f32 = 400.0;

    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HEIGHT: f32 = 60.0;
    pub const COIN_SIZE: f32 = 20.0;

    /// Peak jump offset, reached at JUMP_PEAK_TIME
    pub const JUMP_MAX: f32 = 80.0;
    pub const JUMP_PEAK_TIME: f32 = 0.5;
    pub const JUMP_DURATION: f32 = 1.0;
    pub const SLIDE_DURATION: f32 = 1.0;

    /// Scroll speed of obstacles and coins at 1x (units/s)
    pub const SCROLL_SPEED: f32 = 300.0;
    /// Distance gained per second at 1x
    pub const DISTANCE_RATE: f32 = 100.0;
    /// Score gained per second at 1x
    pub const SCORE_RATE: f32 = 10.0;
    /// Distance per +1.0 of speed multiplier
    pub const DISTANCE_PER_SPEED_STEP: f32 = 10_000.0;
    pub const MIN_SPEED_MULTIPLIER: f32 = 1.0;
    pub const MAX_SPEED_MULTIPLIER: f32 = 3.0;

    /// Spawn probabilities per tick
    pub const OBSTACLE_SPAWN_RATE: f64 = 0.02;
    pub const COIN_SPAWN_RATE: f64 = 0.03;
    pub const OBSTACLE_SPAWN_Y: f32 = -50.0;
    pub const COIN_SPAWN_Y: f32 = -30.0;
    /// Anything at or below this y is swept
    pub const CLEANUP_Y: f32 = 600.0;

    pub const COIN_BONUS: u64 = 50;
    pub const STARTING_LIVES: u8 = 3;
}

/// Canonical x coordinate for a lane (out-of-range lanes clamp to the edge)
#[inline]
pub fn lane_x(lane: u8) -> f32 {
    let idx = (lane as usize).min(consts::LANE_POSITIONS.len() - 1);
    consts::LANE_POSITIONS[idx]
}

/// Speed multiplier for a cumulative distance
#[inline]
pub fn speed_for_distance(distance: u64) -> f32 {
    (consts::MIN_SPEED_MULTIPLIER + distance as f32 / consts::DISTANCE_PER_SPEED_STEP)
        .clamp(consts::MIN_SPEED_MULTIPLIER, consts::MAX_SPEED_MULTIPLIER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_x() {
        assert_eq!(lane_x(0), 150.0);
        assert_eq!(lane_x(1), 300.0);
        assert_eq!(lane_x(2), 450.0);
        assert_eq!(lane_x(7), 450.0);
    }

    #[test]
    fn test_speed_for_distance() {
        assert_eq!(speed_for_distance(0), 1.0);
        assert!((speed_for_distance(5_000) - 1.5).abs() < 1e-6);
        assert_eq!(speed_for_distance(20_000), 3.0);
        assert_eq!(speed_for_distance(1_000_000), 3.0);
    }
}
