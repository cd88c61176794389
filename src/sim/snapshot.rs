//! Read-only view of the world for renderers

use serde::{Deserialize, Serialize};

use super::state::{Coin, GamePhase, Obstacle, Player, Scoreboard, World};

/// Point-in-time copy of everything a renderer draws.
///
/// Owns its data, so nothing done to a snapshot reaches the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Player,
    /// Active obstacles only
    pub obstacles: Vec<Obstacle>,
    /// Uncollected coins only
    pub coins: Vec<Coin>,
    pub state: Scoreboard,
}

impl Snapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            player: world.player.clone(),
            obstacles: world
                .obstacles
                .iter()
                .filter(|o| o.body.active)
                .cloned()
                .collect(),
            coins: world
                .coins
                .iter()
                .filter(|c| !c.collected)
                .cloned()
                .collect(),
            state: world.scoreboard.clone(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
