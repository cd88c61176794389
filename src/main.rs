//! Lane Runner headless driver
//!
//! Runs the engine on a fixed timestep with a simple autopilot and logs
//! the run. Rendering and key transport live elsewhere.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;

use lane_runner::consts::*;
use lane_runner::sim::{GamePhase, ObstacleKind, Snapshot};
use lane_runner::{Command, Direction, Engine, JsonFileStore, Settings};

#[derive(Debug, Parser)]
#[command(name = "lane-runner", about = "Run the lane runner simulation headless")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// RNG seed (overrides settings)
    #[arg(long)]
    seed: Option<u64>,
    /// Pace the loop against the wall clock
    #[arg(long)]
    realtime: bool,
    /// Key presses to replay before the autopilot takes over (e.g. "ArrowLeft,w")
    #[arg(long, value_delimiter = ',')]
    keys: Vec<String>,
}

/// Fixed-step loop state
struct Driver {
    engine: Engine<JsonFileStore>,
    tick_dt: f32,
    accumulator: f32,
    elapsed: f32,
    next_report: f32,
}

impl Driver {
    fn new(settings: &Settings) -> Self {
        let store = JsonFileStore::new(settings.high_score_file.clone());
        Self {
            engine: Engine::new(store, settings),
            tick_dt: settings.tick_dt(),
            accumulator: 0.0,
            elapsed: 0.0,
            next_report: 1.0,
        }
    }

    /// Feed one frame's worth of time, running whole ticks only
    fn update(&mut self, frame_dt: f32) {
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.tick_dt && substeps < MAX_SUBSTEPS {
            if let Some(command) = autopilot(&self.engine.snapshot()) {
                self.engine.apply(command);
            }
            self.engine.tick(self.tick_dt);
            self.accumulator -= self.tick_dt;
            self.elapsed += self.tick_dt;
            substeps += 1;
        }

        if self.elapsed >= self.next_report {
            log::info!("t={:.0}s {}", self.elapsed, self.engine.status_line());
            self.next_report += 1.0;
        }
    }
}

/// Dodge whatever is about to reach the player's lane
fn autopilot(snapshot: &Snapshot) -> Option<Command> {
    if snapshot.phase() != GamePhase::Running {
        return None;
    }
    let player = &snapshot.player;
    let threat = |lane: u8| {
        snapshot
            .obstacles
            .iter()
            .filter(|o| o.lane == lane)
            .filter(|o| o.body.pos.y > PLAYER_Y - 200.0 && o.body.pos.y < PLAYER_Y + 40.0)
            .max_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y))
    };

    let incoming = threat(player.lane)?;
    if !player.is_idle() {
        return None;
    }

    // Prefer sidestepping into a clear lane
    let neighbours = [player.lane.checked_sub(1), Some(player.lane + 1)];
    for lane in neighbours.into_iter().flatten() {
        if lane < LANE_COUNT && threat(lane).is_none() {
            let direction = if lane < player.lane {
                Direction::Left
            } else {
                Direction::Right
            };
            return Some(Command::Move(direction));
        }
    }

    // Otherwise wait until it is close, then jump or slide
    if incoming.body.pos.y < PLAYER_Y - 120.0 {
        return None;
    }
    Some(Command::Move(match incoming.kind {
        ObstacleKind::Pit => Direction::Up,
        ObstacleKind::Tree | ObstacleKind::Rock => Direction::Down,
    }))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut settings = Settings::load_or_default(args.settings.as_deref());
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let mut driver = Driver::new(&settings);

    for key in &args.keys {
        match Command::from_key(key) {
            Some(command) => driver.engine.apply(command),
            None => log::warn!("Ignoring unmapped key {:?}", key),
        }
    }

    let frame = Duration::from_secs_f32(driver.tick_dt);
    let mut last = Instant::now();
    while driver.elapsed < args.seconds {
        let frame_dt = if args.realtime {
            std::thread::sleep(frame);
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;
            dt
        } else {
            driver.tick_dt
        };
        driver.update(frame_dt);

        if driver.engine.phase() == GamePhase::GameOver {
            break;
        }
    }

    let snapshot = driver.engine.snapshot();
    log::info!("Finished: {}", driver.engine.status_line());
    println!("{}", snapshot.to_json()?);
    Ok(())
}
