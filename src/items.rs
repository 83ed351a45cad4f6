use rand::Rng;

use crate::error::PlacementError;
use crate::grid::Grid;
use crate::obstacles::Obstacles;
use crate::{Coords, TermInt};

/// Places the single active item, cycling through a fixed number of pool slots.
///
/// Each slot remembers the last position spawned into it; a new item never
/// reuses a position still recorded in another slot.
pub struct ItemSpawner {
    pool: Vec<Option<Coords>>,
    current: usize,
    /// The item on the board. Slots keep their position after it is eaten.
    active: Option<Coords>,
    margin: TermInt,
}

impl ItemSpawner {
    pub fn new(pool_size: usize, margin: TermInt) -> Self {
        ItemSpawner { pool: vec![None; pool_size.max(1)], current: 0, active: None, margin }
    }

    /// The item waiting to be eaten, if any.
    pub fn active(&self) -> Option<Coords> {
        self.active
    }

    pub fn cursor(&self) -> usize {
        self.current
    }

    pub fn recorded(&self) -> impl Iterator<Item = Coords> + '_ {
        self.pool.iter().flatten().copied()
    }

    /// Pick a free position for the current slot and mark it on the grid.
    pub fn spawn<R: Rng>(
        &mut self,
        grid: &mut Grid,
        snake: &[Coords],
        obstacles: &Obstacles,
        max_attempts: u32,
        rng: &mut R,
    ) -> Result<Coords, PlacementError> {
        let (lo_x, hi_x) = (1 + self.margin, grid.width() - self.margin);
        let (lo_y, hi_y) = (1 + self.margin, grid.height() - self.margin);

        for _ in 0..max_attempts {
            let pos = (rng.gen_range(lo_x..=hi_x), rng.gen_range(lo_y..=hi_y));

            let taken = self.pool.iter().enumerate().any(|(i, slot)| i != self.current && *slot == Some(pos));

            if taken || snake.contains(&pos) || obstacles.contains(pos) || grid.is_blocking(pos) {
                continue;
            }

            self.place(grid, pos);
            log::debug!("item slot {} at {:?}", self.current, pos);
            return Ok(pos);
        }

        Err(PlacementError::Item { attempts: max_attempts })
    }

    /// Put the current slot's item at `pos`, replacing whatever was there.
    pub fn place(&mut self, grid: &mut Grid, pos: Coords) {
        self.pool[self.current] = Some(pos);
        self.active = Some(pos);
        grid.set_item(pos);
    }

    /// Mark the current item eaten and move to the next slot, wrapping around.
    pub fn consume(&mut self, grid: &mut Grid) -> Option<Coords> {
        let eaten = self.active.take();
        if let Some(pos) = eaten {
            grid.clear_item(pos);
        }
        self.current = (self.current + 1) % self.pool.len();
        eaten
    }
}
