use std::{io, thread::sleep};

use crate::config::KeyConfig;
use crate::error::GameError;
use crate::grid::Cell;
use crate::sim::{Collision, Simulation, Step, TickResult};
use crate::snake::Direction::{self, *};
use crate::Coords;

pub const BORDER_CHAR: char = '#';
pub const OBSTACLE_CHAR: char = '#';
pub const ITEM_CHAR: char = '6';
pub const HEAD_CHAR: char = 'O';
pub const BODY_CHAR: char = 'X';
pub const EMPTY_CHAR: char = ' ';

/// Yields at most one pending key per call, without blocking.
pub trait InputSource {
    fn poll_key(&mut self) -> io::Result<Option<char>>;
}

/// Draws single-character cells at 1-indexed grid positions.
pub trait Renderer {
    fn draw(&mut self, pos: Coords, symbol: char) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Stop,
}

/// Key bindings.
#[derive(Clone, Debug)]
pub struct Controls {
    keys: KeyConfig,
}

impl Controls {
    pub fn new(keys: KeyConfig) -> Self {
        let lower = |c: char| c.to_ascii_lowercase();
        let keys = KeyConfig {
            up: lower(keys.up),
            down: lower(keys.down),
            left: lower(keys.left),
            right: lower(keys.right),
            stop: lower(keys.stop),
        };
        Controls { keys }
    }

    /// `None` for keys that are not bound.
    pub fn command(&self, key: char) -> Option<Command> {
        let key = key.to_ascii_lowercase();
        let k = &self.keys;

        match key {
            _ if key == k.stop => Some(Command::Stop),
            _ if key == k.up => Some(Command::Turn(Up)),
            _ if key == k.down => Some(Command::Turn(Down)),
            _ if key == k.left => Some(Command::Turn(Left)),
            _ if key == k.right => Some(Command::Turn(Right)),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Stopped,
    Collided(Collision),
    Won,
}

impl GameOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            GameOutcome::Stopped => "Stopped.",
            GameOutcome::Collided(_) => "Game over!",
            GameOutcome::Won => "You won!",
        }
    }
}

pub struct Game<I, R> {
    sim: Simulation,
    controls: Controls,
    input: I,
    renderer: R,
}

impl<I: InputSource, R: Renderer> Game<I, R> {
    pub fn new(sim: Simulation, controls: Controls, input: I, renderer: R) -> Self {
        Game { sim, controls, input, renderer }
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn score(&self) -> u32 {
        self.sim.eaten()
    }

    /// Play until the snake crashes, the player stops, or the last item is eaten.
    pub fn run(&mut self) -> Result<GameOutcome, GameError> {
        self.draw_board()?;

        loop {
            if let Some(outcome) = self.tick()? {
                log::info!("game ended: {:?}, score {}", outcome, self.score());
                return Ok(outcome);
            }
            sleep(self.sim.interval());
        }
    }

    /// One input -> direction -> step -> render cycle, without the delay.
    pub fn tick(&mut self) -> Result<Option<GameOutcome>, GameError> {
        if let Some(key) = self.input.poll_key()? {
            match self.controls.command(key) {
                Some(Command::Stop) => return Ok(Some(GameOutcome::Stopped)),
                Some(Command::Turn(dir)) => {
                    if !self.sim.set_direction(dir) {
                        log::trace!("ignored reversal to {:?}", dir);
                    }
                }
                None => {}
            }
        }

        let step = self.sim.step()?;
        self.render_step(&step)?;

        Ok(match step.result {
            TickResult::Collided(collision) => Some(GameOutcome::Collided(collision)),
            _ if self.sim.has_won() => Some(GameOutcome::Won),
            _ => None,
        })
    }

    /// Borders, obstacles, the first item and the snake.
    pub fn draw_board(&mut self) -> io::Result<()> {
        for (pos, cell) in self.sim.grid().iter() {
            let symbol = match cell {
                Cell::Empty => continue,
                Cell::Border => BORDER_CHAR,
                Cell::Obstacle => OBSTACLE_CHAR,
                Cell::Item => ITEM_CHAR,
            };
            self.renderer.draw(pos, symbol)?;
        }

        for (i, pos) in self.sim.snake().body().iter().enumerate() {
            let ch = if i == 0 { HEAD_CHAR } else { BODY_CHAR };
            self.renderer.draw(*pos, ch)?;
        }

        self.renderer.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn render_step(&mut self, step: &Step) -> io::Result<()> {
        if step.result.is_terminal() {
            return self.renderer.flush();
        }

        if !step.grew {
            self.renderer.draw(step.moved.old_tail, EMPTY_CHAR)?;
        }

        if self.sim.snake().len() > 1 {
            self.renderer.draw(step.moved.old_head, BODY_CHAR)?;
        }

        self.renderer.draw(step.head, HEAD_CHAR)?;

        if let TickResult::ItemConsumed { next: Some(next), .. } = step.result {
            self.renderer.draw(next, ITEM_CHAR)?;
        }

        self.renderer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let c = Controls::new(KeyConfig::default());

        assert_eq!(c.command('z'), Some(Command::Turn(Up)));
        assert_eq!(c.command('s'), Some(Command::Turn(Down)));
        assert_eq!(c.command('q'), Some(Command::Turn(Left)));
        assert_eq!(c.command('D'), Some(Command::Turn(Right)));
        assert_eq!(c.command('a'), Some(Command::Stop));
        assert_eq!(c.command('x'), None);
        assert_eq!(c.command(' '), None);
    }

    #[test]
    fn uppercase_bindings_match_either_case() {
        let keys = KeyConfig { up: 'W', down: 'S', left: 'A', right: 'D', stop: 'X' };
        let c = Controls::new(keys);

        assert_eq!(c.command('w'), Some(Command::Turn(Up)));
        assert_eq!(c.command('W'), Some(Command::Turn(Up)));
        assert_eq!(c.command('x'), Some(Command::Stop));
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(GameOutcome::Won.message(), "You won!");
        assert_eq!(GameOutcome::Collided(Collision::Wall).message(), "Game over!");
    }
}
