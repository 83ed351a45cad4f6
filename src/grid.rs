use crate::{Coords, TermInt};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Border,
    Obstacle,
    Item,
}

/// The playing field: a bordered rectangle of `width * height` cells, 1-indexed.
///
/// The outer ring is `Border` except for the (optional) portal openings at the
/// midpoint of each edge. Obstacles are stamped in once at generation time; the
/// only cell that changes afterwards is the single tracked `Item`.
pub struct Grid {
    width: TermInt,
    height: TermInt,
    cells: Vec<Cell>,
    portals: Vec<(Coords, Coords)>,
    item: Option<Coords>,
}

impl Grid {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        Self::with_portals(width, height, true)
    }

    pub fn with_portals(width: TermInt, height: TermInt, portals: bool) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 1..=height {
            for x in 1..=width {
                let border = x == 1 || x == width || y == 1 || y == height;
                cells.push(if border { Cell::Border } else { Cell::Empty });
            }
        }

        let mut grid = Grid { width, height, cells, portals: vec![], item: None };

        if portals {
            let (mid_x, mid_y) = (width / 2, height / 2);
            let top = (mid_x, 1);
            let bottom = (mid_x, height);
            let left = (1, mid_y);
            let right = (width, mid_y);

            for entrance in [top, bottom, left, right] {
                grid.set(entrance, Cell::Empty);
            }
            grid.portals = vec![(top, bottom), (bottom, top), (left, right), (right, left)];
        }

        grid
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn in_bounds(&self, pos: Coords) -> bool {
        pos.0 >= 1 && pos.1 >= 1 && pos.0 <= self.width && pos.1 <= self.height
    }

    /// `None` for positions off the grid.
    pub fn cell(&self, pos: Coords) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// True on the outer ring, portal openings included.
    pub fn is_edge(&self, pos: Coords) -> bool {
        pos.0 == 1 || pos.1 == 1 || pos.0 == self.width || pos.1 == self.height
    }

    /// Walls and obstacles block; anything off the grid blocks too.
    pub fn is_blocking(&self, pos: Coords) -> bool {
        matches!(self.cell(pos), None | Some(Cell::Border) | Some(Cell::Obstacle))
    }

    /// Where a head entering `pos` reappears, if `pos` is a portal opening.
    pub fn portal_exit(&self, pos: Coords) -> Option<Coords> {
        self.portals.iter().find(|(entrance, _)| *entrance == pos).map(|(_, exit)| *exit)
    }

    pub fn portals(&self) -> impl Iterator<Item = Coords> + '_ {
        self.portals.iter().map(|(entrance, _)| *entrance)
    }

    /// Stamp a `side x side` block with its top-left corner at `top_left`.
    /// Overlap checks are the caller's job.
    pub fn place_obstacle(&mut self, top_left: Coords, side: TermInt) {
        for dy in 0..side {
            for dx in 0..side {
                self.set((top_left.0 + dx, top_left.1 + dy), Cell::Obstacle);
            }
        }
    }

    pub fn item(&self) -> Option<Coords> {
        self.item
    }

    /// Mark `pos` as the item cell, clearing the previous one.
    pub fn set_item(&mut self, pos: Coords) {
        if let Some(old) = self.item.take() {
            self.set(old, Cell::Empty);
        }
        self.set(pos, Cell::Item);
        self.item = Some(pos);
    }

    pub fn clear_item(&mut self, pos: Coords) {
        if self.item == Some(pos) {
            self.item = None;
            self.set(pos, Cell::Empty);
        }
    }

    /// Every cell with its position, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coords, Cell)> + '_ {
        let w = self.width as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            (((i % w) as TermInt + 1, (i / w) as TermInt + 1), *cell)
        })
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, pos: Coords) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some((pos.1 as usize - 1) * self.width as usize + (pos.0 as usize - 1))
    }

    fn set(&mut self, pos: Coords, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_ring_with_portal_gaps() {
        let g = Grid::new(80, 40);

        assert_eq!(g.cell((1, 1)), Some(Cell::Border));
        assert_eq!(g.cell((80, 40)), Some(Cell::Border));
        assert_eq!(g.cell((1, 19)), Some(Cell::Border));
        assert_eq!(g.cell((2, 2)), Some(Cell::Empty));
        assert_eq!(g.cell((0, 5)), None);
        assert_eq!(g.cell((81, 5)), None);

        for p in [(40, 1), (40, 40), (1, 20), (80, 20)] {
            assert_eq!(g.cell(p), Some(Cell::Empty));
            assert!(g.is_edge(p));
            assert!(!g.is_blocking(p));
        }
    }

    #[test]
    fn portals_lead_to_the_opposite_edge() {
        let g = Grid::new(80, 40);

        assert_eq!(g.portal_exit((40, 1)), Some((40, 40)));
        assert_eq!(g.portal_exit((40, 40)), Some((40, 1)));
        assert_eq!(g.portal_exit((1, 20)), Some((80, 20)));
        assert_eq!(g.portal_exit((80, 20)), Some((1, 20)));
        assert_eq!(g.portal_exit((1, 21)), None);
    }

    #[test]
    fn closed_grid_has_no_portals() {
        let g = Grid::with_portals(80, 40, false);

        assert_eq!(g.portals().count(), 0);
        assert!(g.is_blocking((1, 20)));
        assert_eq!(g.portal_exit((1, 20)), None);
    }

    #[test]
    fn obstacles_block() {
        let mut g = Grid::new(20, 20);
        g.place_obstacle((5, 6), 3);

        assert!(g.is_blocking((5, 6)));
        assert!(g.is_blocking((7, 8)));
        assert!(!g.is_blocking((8, 8)));
        assert!(!g.is_blocking((5, 5)));
        assert_eq!(g.iter().filter(|(_, c)| *c == Cell::Obstacle).count(), 9);
    }

    #[test]
    fn single_tracked_item() {
        let mut g = Grid::new(20, 20);
        g.set_item((3, 3));
        g.set_item((4, 4));

        assert_eq!(g.cell((3, 3)), Some(Cell::Empty));
        assert_eq!(g.cell((4, 4)), Some(Cell::Item));
        assert_eq!(g.iter().filter(|(_, c)| *c == Cell::Item).count(), 1);

        g.clear_item((3, 3));
        assert_eq!(g.item(), Some((4, 4)));
        g.clear_item((4, 4));
        assert_eq!(g.item(), None);
        assert_eq!(g.cell((4, 4)), Some(Cell::Empty));
    }
}
