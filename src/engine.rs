//! Game engine
//!
//! Owns the world, the RNG and the high score store. Every call takes
//! `&mut self`, so callers on several threads must serialize access
//! (e.g. behind a `Mutex`).

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::STARTING_LIVES;
use crate::highscores::HighScoreStore;
use crate::input::{Command, Direction};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, Snapshot, SpawnRates, World};

pub struct Engine<S: HighScoreStore> {
    world: World,
    rng: Pcg32,
    rates: SpawnRates,
    starting_lives: u8,
    store: S,
}

impl<S: HighScoreStore> Engine<S> {
    /// Build an engine from settings, loading the stored high score
    pub fn new(store: S, settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Starting engine with seed {}", seed);
        let mut engine = Self::with_seed(store, seed);
        engine.rates = settings.spawn_rates();
        engine.set_starting_lives(settings.starting_lives);
        engine.world = World::with_lives(engine.high_score(), engine.starting_lives);
        engine
    }

    /// Build an engine with default spawn rates and a fixed seed
    pub fn with_seed(store: S, seed: u64) -> Self {
        let high_score = match store.load() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Could not load high score, starting at 0: {}", e);
                0
            }
        };
        Self {
            world: World::new(high_score),
            rng: Pcg32::seed_from_u64(seed),
            rates: SpawnRates::default(),
            starting_lives: STARTING_LIVES,
            store,
        }
    }

    /// Override spawn probabilities
    pub fn set_spawn_rates(&mut self, rates: SpawnRates) {
        self.rates = rates;
    }

    /// Lives for every run started by a later `reset`
    pub fn set_starting_lives(&mut self, lives: u8) {
        self.starting_lives = lives.max(1);
    }

    /// Advance one frame
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        let events = sim::tick(&mut self.world, &mut self.rng, &self.rates, dt);
        if let Some(score) = events.iter().find_map(|e| match e {
            GameEvent::GameOver { score } => Some(*score),
            _ => None,
        }) {
            log::info!(
                "Game over: score {}, distance {}, coins {}",
                score,
                self.world.scoreboard.distance,
                self.world.scoreboard.coins_collected
            );
            self.save_high_score();
        }
        events
    }

    /// Lane change, jump or slide
    pub fn move_player(&mut self, direction: Direction) {
        sim::apply_move(&mut self.world, direction);
    }

    /// Move by name; unknown names are ignored
    pub fn move_named(&mut self, direction: &str) {
        match direction.parse::<Direction>() {
            Ok(direction) => self.move_player(direction),
            Err(e) => log::debug!("Ignoring move: {}", e),
        }
    }

    /// Toggle pause. Has no effect once the run is over.
    pub fn pause(&mut self) {
        let board = &mut self.world.scoreboard;
        if board.game_over {
            return;
        }
        board.paused = !board.paused;
        log::info!("{}", if board.paused { "Paused" } else { "Resumed" });
    }

    /// Start a fresh run, keeping the high score
    pub fn reset(&mut self) {
        self.world = World::with_lives(self.world.scoreboard.high_score, self.starting_lives);
        log::info!("Run reset");
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Move(direction) => self.move_player(direction),
            Command::Pause => self.pause(),
            Command::Reset => self.reset(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.world)
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase()
    }

    pub fn high_score(&self) -> u64 {
        self.world.scoreboard.high_score
    }

    /// Read-only access to the full world, including retired entities
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// One-line summary for logs
    pub fn status_line(&self) -> String {
        let board = &self.world.scoreboard;
        format!(
            "{:?} score={} distance={} coins={} lives={} speed={:.2}x high={}",
            board.phase(),
            board.score,
            board.distance,
            board.coins_collected,
            board.lives,
            board.speed_multiplier,
            board.high_score
        )
    }

    /// Record a new best score; storage failures are logged, not raised
    fn save_high_score(&mut self) {
        let board = &mut self.world.scoreboard;
        if board.score <= board.high_score {
            return;
        }
        board.high_score = board.score;
        if let Err(e) = self.store.save(board.high_score) {
            log::warn!("Could not save high score: {}", e);
        }
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
