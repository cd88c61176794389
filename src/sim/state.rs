//! Game state and core simulation types
//!
//! Everything the engine owns lives in [`World`]; a reset replaces it wholesale.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{lane_x, speed_for_distance};

/// Current phase of gameplay, derived from the scoreboard flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Game is paused (toggle)
    Paused,
    /// Run ended, only a reset leaves this phase
    GameOver,
}

/// Shared shape of every entity: position plus box size.
///
/// `active == false` means the entity is excluded from collision and
/// rendering but still sits in storage until the next cleanup pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            width,
            height,
            active: true,
        }
    }

    /// Scroll downward by `dy`
    #[inline]
    pub fn advance(&mut self, dy: f32) {
        self.pos.y += dy;
    }

    /// True once scrolled past the bottom sweep line
    #[inline]
    pub fn off_screen(&self) -> bool {
        self.pos.y >= CLEANUP_Y
    }
}

/// The player avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// 0 = left, 1 = center, 2 = right
    pub lane: u8,
    pub jumping: bool,
    pub sliding: bool,
    /// Current vertical offset, 0 when grounded
    pub jump_height: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            body: Body::new(
                Vec2::new(lane_x(CENTER_LANE), PLAYER_Y),
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            lane: CENTER_LANE,
            jumping: false,
            sliding: false,
            jump_height: 0.0,
        }
    }
}

impl Player {
    /// Move to a lane and snap x to its canonical coordinate
    pub fn set_lane(&mut self, lane: u8) {
        self.lane = lane.min(LANE_COUNT - 1);
        self.body.pos.x = lane_x(self.lane);
    }

    /// Grounded, not sliding, not mid-action
    pub fn is_idle(&self) -> bool {
        !self.jumping && !self.sliding
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Tree,
    Rock,
    Pit,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Tree, ObstacleKind::Rock, ObstacleKind::Pit];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Tree => "tree",
            ObstacleKind::Rock => "rock",
            ObstacleKind::Pit => "pit",
        }
    }

    /// Pits are cleared by jumping; trees and rocks by sliding
    pub fn avoided_by(&self, player: &Player) -> bool {
        match self {
            ObstacleKind::Pit => player.jumping,
            ObstacleKind::Tree | ObstacleKind::Rock => player.sliding,
        }
    }
}

/// An obstacle scrolling down a lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: Body,
    pub kind: ObstacleKind,
    pub lane: u8,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, lane: u8) -> Self {
        Self {
            body: Body::new(
                Vec2::new(lane_x(lane), OBSTACLE_SPAWN_Y),
                OBSTACLE_WIDTH,
                OBSTACLE_HEIGHT,
            ),
            kind,
            lane,
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub body: Body,
    pub lane: u8,
    pub collected: bool,
}

impl Coin {
    pub fn new(lane: u8) -> Self {
        Self {
            body: Body::new(Vec2::new(lane_x(lane), COIN_SPAWN_Y), COIN_SIZE, COIN_SIZE),
            lane,
            collected: false,
        }
    }
}

/// Score, lives and run flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u64,
    pub distance: u64,
    pub coins_collected: u32,
    pub lives: u8,
    pub speed_multiplier: f32,
    pub game_over: bool,
    pub paused: bool,
    /// Survives resets; loaded from storage at engine construction
    pub high_score: u64,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(0, STARTING_LIVES)
    }
}

impl Scoreboard {
    /// Fresh scoreboard; `lives` is raised to at least 1
    pub fn new(high_score: u64, lives: u8) -> Self {
        Self {
            score: 0,
            distance: 0,
            coins_collected: 0,
            lives: lives.max(1),
            speed_multiplier: MIN_SPEED_MULTIPLIER,
            game_over: false,
            paused: false,
            high_score,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Running
        }
    }

    /// Advance distance and score for `dt` seconds, then rescale speed
    pub fn advance(&mut self, dt: f32) {
        let step = dt * self.speed_multiplier;
        // Float-to-int casts saturate; the sums must too
        self.distance = self
            .distance
            .saturating_add((DISTANCE_RATE * step).floor() as u64);
        self.score = self.score.saturating_add((SCORE_RATE * step).floor() as u64);
        // Distance never shrinks, so neither does the multiplier
        self.speed_multiplier = speed_for_distance(self.distance);
    }
}

/// Things that happened during a tick (for logging and persistence)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { kind: ObstacleKind, lane: u8 },
    CoinSpawned { lane: u8 },
    /// Obstacle overlapped and cost a life
    ObstacleHit { kind: ObstacleKind, lives_left: u8 },
    /// Obstacle overlapped but was jumped or slid past
    ObstacleAvoided { kind: ObstacleKind },
    CoinCollected { total: u32 },
    /// Lives reached zero this tick
    GameOver { score: u64 },
}

/// Complete simulation state owned by the engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub scoreboard: Scoreboard,
    /// Seconds into the current jump
    pub jump_timer: f32,
    /// Seconds into the current slide
    pub slide_timer: f32,
}

impl World {
    /// Fresh run that keeps a known high score
    pub fn new(high_score: u64) -> Self {
        Self::with_lives(high_score, STARTING_LIVES)
    }

    /// Fresh run with a custom number of starting lives
    pub fn with_lives(high_score: u64, lives: u8) -> Self {
        Self {
            scoreboard: Scoreboard::new(high_score, lives),
            ..Default::default()
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.scoreboard.phase()
    }

    /// Sweep everything that scrolled past the bottom edge
    pub fn cleanup(&mut self) {
        self.obstacles.retain(|o| !o.body.off_screen());
        self.coins.retain(|c| !c.body.off_screen());
    }
}
