//! Game tunables.
//!
//! * Looks for `snake-arena.toml` in the cwd unless a path is given.
//! * Every field has a default, so the file and each of its tables are optional.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::snake::{Direction, Snake};
use crate::{Coords, TermInt};

pub const DEFAULT_CONFIG_FILE: &str = "snake-arena.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grid size in cells, border ring included.
    pub width: TermInt,
    pub height: TermInt,
    /// Initial head position. The body trails behind it, away from `direction`.
    pub start: Coords,
    pub direction: Direction,
    pub initial_length: usize,
    pub max_length: usize,
    /// Initial delay between two ticks.
    pub tick_ms: u64,
    /// Tick interval multiplier applied after each item.
    pub speedup: f64,
    pub portals: bool,
    /// Retry cap for every random placement.
    pub max_attempts: u32,
    pub seed: Option<u64>,
    pub obstacles: ObstacleConfig,
    pub items: ItemConfig,
    pub keys: KeyConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub enabled: bool,
    pub count: usize,
    /// Side length of each square block.
    pub side: TermInt,
    /// Minimum distance between the grid edge and a block's top-left corner.
    pub margin: TermInt,
    /// Half-widths of the no-obstacle zone around the starting head.
    pub exclusion_x: TermInt,
    pub exclusion_y: TermInt,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    pub enabled: bool,
    /// Number of slots the spawner cycles through.
    pub pool_size: usize,
    /// Items to eat for a win.
    pub target: u32,
    /// Distance kept from the border ring.
    pub margin: TermInt,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub up: char,
    pub down: char,
    pub left: char,
    pub right: char,
    pub stop: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 80,
            height: 40,
            start: (40, 20),
            direction: Direction::Right,
            initial_length: 10,
            max_length: 20,
            tick_ms: 150,
            speedup: 0.9,
            portals: true,
            max_attempts: 10_000,
            seed: None,
            obstacles: ObstacleConfig::default(),
            items: ItemConfig::default(),
            keys: KeyConfig::default(),
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self { enabled: true, count: 4, side: 5, margin: 3, exclusion_x: 15, exclusion_y: 5 }
    }
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self { enabled: true, pool_size: 10, target: 10, margin: 1 }
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self { up: 'z', down: 's', left: 'q', right: 'd', stop: 'a' }
    }
}

impl Config {
    /// Load from a TOML file. Without an explicit path a missing default file
    /// yields the defaults; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (p, explicit) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        match fs::read_to_string(p) {
            Ok(text) => Self::from_toml(&text, p),
            Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io { path: p.to_path_buf(), source }),
        }
    }

    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse { path: origin.to_path_buf(), source })
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };
        let (w, h) = (self.width, self.height);

        if w < 10 || h < 10 {
            return invalid(format!("grid {}x{} is smaller than 10x10", w, h));
        }

        let (sx, sy) = self.start;
        if sx < 2 || sx > w - 1 || sy < 2 || sy > h - 1 {
            return invalid(format!("start {:?} is outside the playfield", self.start));
        }

        if self.initial_length == 0 || self.initial_length > self.max_length {
            return invalid(format!(
                "initial length {} must be between 1 and max length {}",
                self.initial_length, self.max_length
            ));
        }

        let snake = Snake::new(self.start, self.initial_length, self.max_length, self.direction);
        if snake.body().iter().any(|&(x, y)| x < 2 || x > w - 1 || y < 2 || y > h - 1) {
            return invalid(format!(
                "a snake of length {} heading {:?} does not fit behind {:?}",
                self.initial_length, self.direction, self.start
            ));
        }

        if self.tick_ms == 0 {
            return invalid("tick interval must be positive".into());
        }

        if !(self.speedup > 0.0 && self.speedup <= 1.0) {
            return invalid(format!("speedup {} must be in (0, 1]", self.speedup));
        }

        if self.max_attempts == 0 {
            return invalid("max_attempts must be positive".into());
        }

        let obs = &self.obstacles;
        if obs.enabled && obs.count > 0 {
            if obs.side == 0 {
                return invalid("obstacle side must be positive".into());
            }
            if obs.margin < 2 {
                return invalid("obstacle margin must keep blocks off the border (>= 2)".into());
            }
            let span = obs.side as u32 + 2 * obs.margin as u32;
            if span > w as u32 || span > h as u32 {
                return invalid(format!("obstacles of side {} with margin {} do not fit the grid", obs.side, obs.margin));
            }
        }

        let items = &self.items;
        if items.enabled {
            if items.pool_size == 0 || items.target == 0 {
                return invalid("item pool size and target must be positive".into());
            }
            if items.margin == 0 || 2 * items.margin as u32 + 1 > w.min(h) as u32 {
                return invalid(format!("item margin {} leaves no room for items", items.margin));
            }
        }

        let k = &self.keys;
        let keys = [k.up, k.down, k.left, k.right, k.stop].map(|c| c.to_ascii_lowercase());
        for (i, a) in keys.iter().enumerate() {
            if keys[i + 1..].contains(a) {
                return invalid(format!("key '{}' is bound twice", a));
            }
        }

        Ok(())
    }
}
