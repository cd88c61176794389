//! Per-tick random spawning of obstacles and coins

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Coin, GameEvent, Obstacle, ObstacleKind, World};
use crate::consts::*;

/// Base spawn probabilities per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRates {
    /// Scaled by the speed multiplier
    pub obstacle: f64,
    /// Not scaled
    pub coin: f64,
}

impl Default for SpawnRates {
    fn default() -> Self {
        Self {
            obstacle: OBSTACLE_SPAWN_RATE,
            coin: COIN_SPAWN_RATE,
        }
    }
}

/// Roll for at most one obstacle, in a random lane with a random kind
pub fn spawn_obstacle<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    base_rate: f64,
) -> Option<GameEvent> {
    let chance = base_rate * world.scoreboard.speed_multiplier as f64;
    if rng.random::<f64>() >= chance {
        return None;
    }
    let lane = rng.random_range(0..LANE_COUNT);
    let kind = *ObstacleKind::ALL.choose(rng)?;
    log::debug!("Spawned {} in lane {}", kind.as_str(), lane);
    world.obstacles.push(Obstacle::new(kind, lane));
    Some(GameEvent::ObstacleSpawned { kind, lane })
}

/// Roll for at most one coin in a random lane
pub fn spawn_coin<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    base_rate: f64,
) -> Option<GameEvent> {
    if rng.random::<f64>() >= base_rate {
        return None;
    }
    let lane = rng.random_range(0..LANE_COUNT);
    world.coins.push(Coin::new(lane));
    Some(GameEvent::CoinSpawned { lane })
}
