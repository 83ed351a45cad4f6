pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod items;
pub mod obstacles;
pub mod sim;
pub mod snake;
pub mod term;

pub type TermInt = u16;

/// A 1-indexed `(x, y)` cell position. `(1, 1)` is the top-left border corner.
pub type Coords = (TermInt, TermInt);

pub use config::Config;
pub use error::{ConfigError, GameError, PlacementError};
pub use game::{Command, Game, GameOutcome, InputSource, Renderer};
pub use sim::{Collision, Simulation, TickResult};
pub use snake::Direction;
