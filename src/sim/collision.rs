//! Collision detection and resolution
//!
//! Everything is an axis-aligned box in canvas space (y grows downward).
//! Obstacles and coins are centered on their position; the player box
//! stands on the player's position and is lifted by the jump offset.

use super::state::{Body, Coin, GameEvent, Obstacle, Player, Scoreboard};
use crate::consts::COIN_BONUS;

/// Axis-aligned rectangle, (x, y) is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of `body` centered on its position
    pub fn centered(body: &Body) -> Self {
        Self::new(
            body.pos.x - half(body.width),
            body.pos.y - half(body.height),
            body.width,
            body.height,
        )
    }

    /// Strict AABB overlap (touching edges do not collide)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Whole-unit half of a size, matching the canonical integer box sizes
#[inline]
fn half(size: f32) -> f32 {
    (size / 2.0).floor()
}

/// Player collision box: half height while sliding, lifted while jumping
pub fn player_rect(player: &Player) -> Rect {
    let lift = if player.jumping { player.jump_height } else { 0.0 };
    let height = if player.sliding {
        half(player.body.height)
    } else {
        player.body.height
    };
    Rect::new(
        player.body.pos.x - half(player.body.width),
        player.body.pos.y - height - lift,
        player.body.width,
        height,
    )
}

/// Outcome of an obstacle overlapping the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Hit,
    Avoided,
}

/// Decide hit/avoid for an overlapping obstacle and retire it.
///
/// The obstacle is deactivated either way so it resolves at most once.
pub fn resolve_obstacle(obstacle: &mut Obstacle, player: &Player) -> Resolution {
    obstacle.body.active = false;
    if obstacle.kind.avoided_by(player) {
        Resolution::Avoided
    } else {
        Resolution::Hit
    }
}

/// Take one life; returns true when this hit ended the run
pub fn apply_hit(board: &mut Scoreboard) -> bool {
    board.lives = board.lives.saturating_sub(1);
    if board.lives == 0 && !board.game_over {
        board.game_over = true;
        return true;
    }
    false
}

/// Test every active obstacle and uncollected coin against the player
pub fn check_collisions(
    player: &Player,
    obstacles: &mut [Obstacle],
    coins: &mut [Coin],
    board: &mut Scoreboard,
    events: &mut Vec<GameEvent>,
) {
    let player_box = player_rect(player);

    for obstacle in obstacles.iter_mut().filter(|o| o.body.active) {
        if !player_box.overlaps(&Rect::centered(&obstacle.body)) {
            continue;
        }
        match resolve_obstacle(obstacle, player) {
            Resolution::Hit => {
                let ended = apply_hit(board);
                log::debug!(
                    "Hit {} in lane {}, {} lives left",
                    obstacle.kind.as_str(),
                    obstacle.lane,
                    board.lives
                );
                events.push(GameEvent::ObstacleHit {
                    kind: obstacle.kind,
                    lives_left: board.lives,
                });
                if ended {
                    events.push(GameEvent::GameOver { score: board.score });
                }
            }
            Resolution::Avoided => {
                events.push(GameEvent::ObstacleAvoided {
                    kind: obstacle.kind,
                });
            }
        }
    }

    for coin in coins.iter_mut().filter(|c| !c.collected) {
        if player_box.overlaps(&Rect::centered(&coin.body)) {
            coin.collected = true;
            board.coins_collected = board.coins_collected.saturating_add(1);
            board.score = board.score.saturating_add(COIN_BONUS);
            events.push(GameEvent::CoinCollected {
                total: board.coins_collected,
            });
        }
    }
}
