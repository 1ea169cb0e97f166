use std::{error::Error, time::{Duration, Instant}};

use crate::input::KeyTracker;
use crate::render;
use crate::state::{GameState, GRID_HEIGHT, GRID_WIDTH};
use crate::term::TermManager;

use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

pub const DEFAULT_TPS: u32 = 20;

// Upper bound for one wait on terminal input, keeps quit responsive at low tick rates.
const POLL_SLICE: Duration = Duration::from_millis(5);

#[derive(Clone, Debug)]
pub struct Config {
    pub tps: u32,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config { tps: DEFAULT_TPS, seed: None }
    }
}

impl Config {
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.tps.max(1)
    }
}

pub struct SnakeGame {
    term: TermManager,
    tracker: KeyTracker,
    state: GameState,
    rng: StdRng,
    tick: Duration,
}

impl SnakeGame {
    pub fn new(config: &Config) -> Result<Self, Box<dyn Error>> {
        let mut term = TermManager::new(GRID_WIDTH, GRID_HEIGHT)?;

        let (w, h) = term.get_terminal_size();
        let (need_w, need_h) = term.required_size();
        if w < need_w || h < need_h {
            return Err(format!(
                "terminal is {}x{}, snake needs at least {}x{}",
                w, h, need_w, need_h
            ).into());
        }

        term.setup()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = GameState::new(&mut rng);

        Ok(SnakeGame { term, tracker: KeyTracker::new(), state, rng, tick: config.tick_period() })
    }

    /// Runs until a quit key is pressed.
    pub fn run(&mut self) -> crossterm::Result<()> {
        info!("starting, one tick every {:?}", self.tick);
        self.draw()?;

        let mut next_tick = Instant::now() + self.tick;

        loop {
            let wait = next_tick.saturating_duration_since(Instant::now()).min(POLL_SLICE);
            let keys = self.term.read_key_events_queue(wait)?;
            self.tracker.process_events(&keys);

            if self.tracker.quit_requested() {
                info!("quit with score {}", self.state.score());
                return Ok(());
            }

            let now = Instant::now();
            if now < next_tick {
                continue;
            }

            let was_running = self.state.is_running();
            self.state.update(self.tracker.take_input(), &mut self.rng);
            if was_running && !self.state.is_running() {
                info!("game over, score {}, length {}", self.state.score(), self.state.snake().len());
            }
            self.draw()?;

            let (deadline, lag) = advance_deadline(next_tick, now, self.tick);
            if let Some(lag) = lag {
                warn!("tick clock fell behind by {:?}, skipping ahead", lag);
            }
            next_tick = deadline;
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw(&mut self) -> crossterm::Result<()> {
        render::draw(&self.state.render(), &mut self.term);
        self.term.present()
    }
}

/// Deadline for the tick after one that was due at `deadline` and ran at
/// `now`. Keeps the schedule while less than a period late (one catch-up
/// tick); otherwise re-bases on `now` and reports how far behind it was.
fn advance_deadline(deadline: Instant, now: Instant, period: Duration) -> (Instant, Option<Duration>) {
    let next = deadline + period;
    if now > next {
        (now + period, Some(now - next))
    } else {
        (next, None)
    }
}
