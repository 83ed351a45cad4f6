use rand::Rng;

use crate::config::ObstacleConfig;
use crate::error::PlacementError;
use crate::grid::Grid;
use crate::{Coords, TermInt};

/// An immovable square block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Obstacle {
    top_left: Coords,
    side: TermInt,
}

impl Obstacle {
    pub fn new(top_left: Coords, side: TermInt) -> Self {
        Obstacle { top_left, side }
    }

    pub fn top_left(&self) -> Coords {
        self.top_left
    }

    pub fn bottom_right(&self) -> Coords {
        (self.top_left.0 + self.side - 1, self.top_left.1 + self.side - 1)
    }

    pub fn contains(&self, pos: Coords) -> bool {
        let (x0, y0) = self.top_left;
        let (x1, y1) = self.bottom_right();
        pos.0 >= x0 && pos.0 <= x1 && pos.1 >= y0 && pos.1 <= y1
    }

    pub fn intersects(&self, min: Coords, max: Coords) -> bool {
        let (x0, y0) = self.top_left;
        let (x1, y1) = self.bottom_right();
        x0 <= max.0 && min.0 <= x1 && y0 <= max.1 && min.1 <= y1
    }

    pub fn overlaps(&self, other: &Obstacle) -> bool {
        self.intersects(other.top_left, other.bottom_right())
    }

    pub fn cells(&self) -> impl Iterator<Item = Coords> {
        let (x0, y0) = self.top_left;
        let side = self.side;
        (0..side).flat_map(move |dy| (0..side).map(move |dx| (x0 + dx, y0 + dy)))
    }
}

/// Every obstacle placed on the grid, kept for collision queries.
#[derive(Debug, Default)]
pub struct Obstacles {
    blocks: Vec<Obstacle>,
}

impl Obstacles {
    pub fn none() -> Self {
        Obstacles::default()
    }

    /// Place `settings.count` blocks at random, none overlapping another, none
    /// touching the exclusion zone around `spawn` or any cell in `keep_clear`,
    /// and stamp them into `grid`.
    pub fn generate<R: Rng>(
        grid: &mut Grid,
        settings: &ObstacleConfig,
        spawn: Coords,
        keep_clear: &[Coords],
        max_attempts: u32,
        rng: &mut R,
    ) -> Result<Self, PlacementError> {
        let mut placed = Obstacles::none();
        if !settings.enabled {
            return Ok(placed);
        }

        let side = settings.side;
        let lo = settings.margin;
        let span = side.saturating_add(settings.margin);
        let (hi_x, hi_y) = match (grid.width().checked_sub(span), grid.height().checked_sub(span)) {
            (Some(x), Some(y)) if x >= lo && y >= lo && side > 0 => (x, y),
            _ if settings.count == 0 => return Ok(placed),
            _ => return Err(PlacementError::Obstacle { index: 0, attempts: 0 }),
        };

        let zone_min = (spawn.0.saturating_sub(settings.exclusion_x), spawn.1.saturating_sub(settings.exclusion_y));
        let zone_max = (spawn.0.saturating_add(settings.exclusion_x), spawn.1.saturating_add(settings.exclusion_y));

        for index in 0..settings.count {
            let mut accepted = None;

            for _ in 0..max_attempts {
                let candidate = Obstacle::new((rng.gen_range(lo..=hi_x), rng.gen_range(lo..=hi_y)), side);

                if candidate.intersects(zone_min, zone_max) || keep_clear.iter().any(|&p| candidate.contains(p)) {
                    continue;
                }

                if placed.try_place(grid, candidate) {
                    accepted = Some(candidate);
                    break;
                }
            }

            let block = accepted.ok_or(PlacementError::Obstacle { index, attempts: max_attempts })?;
            log::debug!("obstacle {} at {:?}", index, block.top_left());
        }

        Ok(placed)
    }

    /// Stamp `block` into `grid` unless it overlaps a block already placed.
    pub fn try_place(&mut self, grid: &mut Grid, block: Obstacle) -> bool {
        if self.blocks.iter().any(|b| b.overlaps(&block)) {
            return false;
        }
        grid.place_obstacle(block.top_left(), block.side);
        self.blocks.push(block);
        true
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.blocks.iter().any(|b| b.contains(pos))
    }

    pub fn cells(&self) -> impl Iterator<Item = Coords> + '_ {
        self.blocks.iter().flat_map(|b| b.cells())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
