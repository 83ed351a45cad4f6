//! One tick of game state: move, resolve portals and collisions, eat, speed up.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::error::{GameError, PlacementError};
use crate::grid::Grid;
use crate::items::ItemSpawner;
use crate::obstacles::Obstacles;
use crate::snake::{Direction, Moved, Snake};
use crate::Coords;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBite,
    Obstacle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickResult {
    Running,
    /// The head entered a portal and came out at `exit`.
    Teleporting { entrance: Coords, exit: Coords },
    /// `next` is `None` when that was the last item needed to win.
    ItemConsumed { at: Coords, next: Option<Coords> },
    Collided(Collision),
}

impl TickResult {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickResult::Collided(_))
    }
}

/// What one tick changed, for the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub result: TickResult,
    pub moved: Moved,
    /// Where the head ended up, after any teleport.
    pub head: Coords,
    /// The vacated tail was kept this tick.
    pub grew: bool,
}

pub struct Simulation {
    grid: Grid,
    snake: Snake,
    obstacles: Obstacles,
    items: Option<ItemSpawner>,
    rng: StdRng,
    interval: Duration,
    speedup: f64,
    eaten: u32,
    target: Option<u32>,
    max_attempts: u32,
}

impl Simulation {
    /// Build the field described by `config`, seeding the RNG from
    /// `config.seed` when present.
    pub fn new(config: &Config) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Fails on an invalid config or when placement runs out of attempts.
    pub fn with_rng(config: &Config, mut rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;

        let mut grid = Grid::with_portals(config.width, config.height, config.portals);
        let snake = Snake::new(config.start, config.initial_length, config.max_length, config.direction);

        let obstacles = Obstacles::generate(
            &mut grid,
            &config.obstacles,
            config.start,
            snake.body(),
            config.max_attempts,
            &mut rng,
        )?;

        let items = if config.items.enabled {
            let mut spawner = ItemSpawner::new(config.items.pool_size, config.items.margin);
            spawner.spawn(&mut grid, snake.body(), &obstacles, config.max_attempts, &mut rng)?;
            Some(spawner)
        } else {
            None
        };

        log::info!(
            "new game on {}x{}: {} obstacles, items {}, portals {}",
            config.width,
            config.height,
            obstacles.len(),
            if items.is_some() { "on" } else { "off" },
            if config.portals { "on" } else { "off" },
        );

        Ok(Simulation {
            grid,
            snake,
            obstacles,
            items,
            rng,
            interval: config.tick_interval(),
            speedup: config.speedup,
            eaten: 0,
            target: config.items.enabled.then_some(config.items.target),
            max_attempts: config.max_attempts,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn obstacles(&self) -> &Obstacles {
        &self.obstacles
    }

    pub fn item(&self) -> Option<Coords> {
        self.items.as_ref().and_then(|items| items.active())
    }

    /// Current delay between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Items eaten so far; this is the score.
    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    pub fn has_won(&self) -> bool {
        self.target.map_or(false, |target| self.eaten >= target)
    }

    /// Ignored when `direction` is the reverse of the current heading.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        self.snake.set_direction(direction)
    }

    /// Advance the game by one tick.
    ///
    /// Only fails when a replacement item cannot be placed.
    pub fn step(&mut self) -> Result<Step, PlacementError> {
        let moved = self.snake.step();
        let mut head = moved.new_head;
        let mut result = TickResult::Running;

        if !self.grid.in_bounds(head) || self.grid.is_edge(head) {
            match self.grid.portal_exit(head) {
                Some(exit) => {
                    self.snake.relocate_head(exit);
                    result = TickResult::Teleporting { entrance: head, exit };
                    head = exit;
                }
                None => return Ok(self.collided(moved, Collision::Wall)),
            }
        }

        if self.snake.bites(head) {
            return Ok(self.collided(moved, Collision::SelfBite));
        }

        if self.obstacles.contains(head) {
            return Ok(self.collided(moved, Collision::Obstacle));
        }

        let mut grew = false;

        if let Some(items) = self.items.as_mut() {
            if items.active() == Some(head) {
                items.consume(&mut self.grid);
                grew = self.snake.grow(moved.old_tail);
                self.interval = self.interval.mul_f64(self.speedup);
                self.eaten += 1;

                let next = if self.target.map_or(false, |target| self.eaten >= target) {
                    None
                } else {
                    Some(items.spawn(&mut self.grid, self.snake.body(), &self.obstacles, self.max_attempts, &mut self.rng)?)
                };

                log::debug!("item {} eaten at {:?}, interval now {:?}", self.eaten, head, self.interval);
                result = TickResult::ItemConsumed { at: head, next };
            }
        }

        log::trace!("tick: {:?} head {:?}", result, head);
        Ok(Step { result, moved, head, grew })
    }

    fn collided(&self, moved: Moved, collision: Collision) -> Step {
        log::info!("collision with {:?} at {:?}", collision, moved.new_head);
        Step { result: TickResult::Collided(collision), moved, head: self.snake.head(), grew: false }
    }
}
