use serde::Deserialize;

use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// The neighbour of `pos` in this direction. Never underflows; a step off
    /// the top or left edge lands on row/column 0, which is outside every grid.
    pub fn shift(self, pos: Coords) -> Coords {
        match self {
            Up => (pos.0, pos.1.saturating_sub(1)),
            Down => (pos.0, pos.1 + 1),
            Left => (pos.0.saturating_sub(1), pos.1),
            Right => (pos.0 + 1, pos.1),
        }
    }
}

/// Cells touched by one step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Moved {
    pub new_head: Coords,
    pub old_head: Coords,
    pub old_tail: Coords,
}

/// Body segments, head first.
pub struct Snake {
    body: Vec<Coords>,
    direction: Direction,
    max_len: usize,
}

impl Snake {
    /// A straight snake with its head at `head`, trailing away from `direction`.
    pub fn new(head: Coords, size: usize, max_len: usize, direction: Direction) -> Self {
        let back = direction.opposite();
        let mut body = Vec::with_capacity(max_len);
        let mut pos = head;

        for _ in 0..size {
            body.push(pos);
            pos = back.shift(pos);
        }

        Snake { body, direction, max_len }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Turn, unless `requested` would reverse the snake onto itself.
    /// Returns whether the direction was accepted.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if requested == self.direction.opposite() {
            return false;
        }
        self.direction = requested;
        true
    }

    /// Advance one cell. Every segment takes its predecessor's place and the
    /// tail cell is vacated.
    pub fn step(&mut self) -> Moved {
        let old_head = self.head();
        let new_head = self.direction.shift(old_head);

        self.body.insert(0, new_head);
        let old_tail = self.body.pop().unwrap_or(old_head);

        Moved { new_head, old_head, old_tail }
    }

    /// Move the head elsewhere after a step, e.g. out of a portal.
    pub fn relocate_head(&mut self, pos: Coords) {
        self.body[0] = pos;
    }

    /// Keep the tail vacated by the last step. No-op at max length.
    pub fn grow(&mut self, old_tail: Coords) -> bool {
        if self.body.len() >= self.max_len {
            return false;
        }
        self.body.push(old_tail);
        true
    }

    /// Whether `pos` is covered by any segment after the head.
    pub fn bites(&self, pos: Coords) -> bool {
        self.body[1..].contains(&pos)
    }
}
