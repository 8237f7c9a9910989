//! Cost model of the search: unit steps, a Manhattan heuristic over lattice cells
//! and an additive penalty for every change of heading.
use grid_util::point::Point as Cell;

use crate::STEP_COST;

/// The four axis-aligned headings, in the order successors are generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    Right,
    Down,
    Left,
    Up,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Right, Heading::Down, Heading::Left, Heading::Up];

    /// Unit cell offset. Down is +y, matching canvas coordinates.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::Right => (1, 0),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Up => (0, -1),
        }
    }

    pub fn step(self, cell: &Cell) -> Cell {
        let (dx, dy) = self.delta();
        Cell::new(cell.x + dx, cell.y + dy)
    }
}

/// Manhattan distance in lattice steps. Never overestimates the remaining cost since
/// every move is a single axis-aligned step costing at least [STEP_COST].
pub fn heuristic(a: &Cell, b: &Cell) -> u32 {
    ((a.x - b.x).unsigned_abs() + (a.y - b.y).unsigned_abs()) * STEP_COST
}

/// Penalty for entering a cell with heading `next` after arriving with `incoming`.
/// The first step out of the start has no incoming heading and is never penalized.
pub fn turn_penalty(incoming: Option<Heading>, next: Heading, penalty: u32) -> u32 {
    match incoming {
        Some(h) if h != next => penalty,
        _ => 0,
    }
}

/// Cost of one move, including the turn penalty.
pub fn move_cost(incoming: Option<Heading>, next: Heading, penalty: u32) -> u32 {
    STEP_COST + turn_penalty(incoming, next, penalty)
}
