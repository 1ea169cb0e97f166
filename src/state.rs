use log::{debug, info, trace};
use rand::Rng;

use crate::Coords;
use crate::snake::{Snake, Direction::{*, self}};

pub const GRID_WIDTH: i32 = 75;
pub const GRID_HEIGHT: i32 = 50;

const INITIAL_HEAD: Coords = (1, 0);
const INITIAL_SNAKE_LENGTH: usize = 2;
const INITIAL_DIRECTION: Direction = Right;

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const RESTART_TEXT: &str = "Press SPACE to Restart";

/// Keys held during one tick, plus the edge-triggered restart signal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub restart: bool,
}

/// Everything a frame needs, detached from the live state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub food: Coords,
    /// Head first; the flag marks the head.
    pub snake: Vec<(Coords, bool)>,
    pub score: u32,
    pub running: bool,
    pub overlay: Option<[&'static str; 2]>,
}

#[derive(Clone, Debug)]
pub struct GameState {
    score: u32,
    direction: Direction,
    food: Coords,
    snake: Snake,
    running: bool,
}

impl GameState {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        GameState {
            score: 0,
            direction: INITIAL_DIRECTION,
            food: random_cell(rng),
            snake: Snake::new(INITIAL_HEAD, INITIAL_SNAKE_LENGTH, INITIAL_DIRECTION),
            running: true,
        }
    }

    /// Replaces the whole state with a fresh game.
    pub fn init<R: Rng>(&mut self, rng: &mut R) {
        *self = GameState::new(rng);
    }

    /// Advances the game by one tick.
    ///
    /// While the game is over only `input.restart` has an effect. Otherwise
    /// the order is: steer, push the new head, eat, grow or drop the tail,
    /// then check the walls and the body as they stand after that.
    pub fn update<R: Rng>(&mut self, input: Input, rng: &mut R) {
        if !self.running {
            if input.restart {
                info!("restarting after a score of {}", self.score);
                self.init(rng);
            }
            return;
        }

        self.steer(&input);

        let new_head = self.snake.push_head(self.direction);
        trace!("head -> {:?}", new_head);

        if new_head == self.food {
            self.score += 1;
            self.snake.grow();
            self.food = random_cell(rng);
            debug!("ate food at {:?}, score {}, next food at {:?}", new_head, self.score, self.food);
        }

        self.snake.settle_tail();

        if !in_bounds(new_head) {
            info!("hit the wall at {:?}, final score {}", new_head, self.score);
            self.running = false;
        }
        if self.snake.bites_itself() {
            info!("ran into itself at {:?}, final score {}", new_head, self.score);
            self.running = false;
        }
    }

    pub fn render(&self) -> Snapshot {
        Snapshot {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            food: self.food,
            snake: self.snake.body().enumerate().map(|(i, &pos)| (pos, i == 0)).collect(),
            score: self.score,
            running: self.running,
            overlay: if self.running { None } else { Some([GAME_OVER_TEXT, RESTART_TEXT]) },
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub fn food(&self) -> Coords {
        self.food
    }

    // Turns are only taken across the current axis; first match in
    // Up, Down, Left, Right order wins.
    fn steer(&mut self, input: &Input) {
        let turn = if self.direction.is_horizontal() && input.up {
            Some(Up)
        } else if self.direction.is_horizontal() && input.down {
            Some(Down)
        } else if self.direction.is_vertical() && input.left {
            Some(Left)
        } else if self.direction.is_vertical() && input.right {
            Some(Right)
        } else {
            None
        };

        if let Some(dir) = turn {
            debug!("turning {:?} -> {:?}", self.direction, dir);
            self.direction = dir;
        }
    }
}

fn random_cell<R: Rng>(rng: &mut R) -> Coords {
    (rng.gen_range(0..GRID_WIDTH), rng.gen_range(0..GRID_HEIGHT))
}

fn in_bounds((x, y): Coords) -> bool {
    (0..GRID_WIDTH).contains(&x) && (0..GRID_HEIGHT).contains(&y)
}
