use grid_util::point::Point as Cell;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cost::Heading;
use crate::error::{Result, RouteError};
use crate::geometry::{Point, Rect};
use crate::obstacle::Obstacles;
use crate::N_SMALLVEC_SIZE;

/// Slack used when converting bounds to cell indices, so that a bound lying exactly on
/// a lattice line is not lost to floating point error.
const CELL_EPSILON: f64 = 1e-9;

/// The lattice of points `origin + (i, j) * step`, restricted to the cells whose points
/// fall inside a bounding rectangle. Cells are addressed by integer offsets from the
/// origin, so the origin itself is cell `(0, 0)`.
#[derive(Clone, Debug)]
pub struct Lattice {
    origin: Point,
    step: f64,
    min: Cell,
    max: Cell,
}

impl Lattice {
    pub fn new(origin: Point, step: f64, bounds: &Rect) -> Result<Lattice> {
        let to_range = |lo: f64, hi: f64, o: f64| -> Result<(i32, i32)> {
            let first = ((lo - o) / step - CELL_EPSILON).ceil();
            let last = ((hi - o) / step + CELL_EPSILON).floor();
            let limit = (i32::MAX / 4) as f64;
            if !(first.abs() < limit && last.abs() < limit) {
                return Err(RouteError::invalid(format!(
                    "search area spans too many lattice cells for step {step}"
                )));
            }
            Ok((first as i32, last as i32))
        };
        let (min_x, max_x) = to_range(bounds.left(), bounds.right(), origin.x)?;
        let (min_y, max_y) = to_range(bounds.top(), bounds.bottom(), origin.y)?;
        Ok(Lattice {
            origin,
            step,
            min: Cell::new(min_x, min_y),
            max: Cell::new(max_x, max_y),
        })
    }

    pub fn width(&self) -> usize {
        (self.max.x - self.min.x + 1).max(0) as usize
    }

    pub fn height(&self) -> usize {
        (self.max.y - self.min.y + 1).max(0) as usize
    }

    /// Number of cells inside the bounds, saturating on overflow.
    pub fn len(&self) -> usize {
        self.width().saturating_mul(self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    /// The canvas point of a cell.
    pub fn point(&self, cell: &Cell) -> Point {
        Point::new(
            self.origin.x + cell.x as f64 * self.step,
            self.origin.y + cell.y as f64 * self.step,
        )
    }

    /// The cell whose point is nearest to `point`, i.e. within half a step on each axis.
    pub fn snap(&self, point: &Point) -> Cell {
        Cell::new(
            ((point.x - self.origin.x) / self.step).round() as i32,
            ((point.y - self.origin.y) / self.step).round() as i32,
        )
    }

    /// The corners of the lattice square containing `point` that lie within the bounds.
    /// A coordinate on a lattice line contributes a single index on its axis.
    pub fn surrounding(&self, point: &Point) -> SmallVec<[Cell; N_SMALLVEC_SIZE]> {
        let span = |v: f64, o: f64| {
            let f = (v - o) / self.step;
            f.floor() as i32..=f.ceil() as i32
        };
        let mut cells = SmallVec::new();
        for y in span(point.y, self.origin.y) {
            for x in span(point.x, self.origin.x) {
                let cell = Cell::new(x, y);
                if self.contains(&cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Whether `point` coincides with a lattice point.
    pub fn on_lattice(&self, point: &Point) -> bool {
        self.point(&self.snap(point)) == *point
    }

    fn get_ix(&self, cell: &Cell) -> usize {
        (cell.y - self.min.y) as usize * self.width() + (cell.x - self.min.x) as usize
    }

    /// Whether a single step from `from` towards `heading` stays in bounds and clear of
    /// every obstacle, including the segment between the two points.
    pub fn can_move(&self, from: &Cell, heading: Heading, obstacles: &Obstacles) -> bool {
        let to = heading.step(from);
        self.contains(&to) && !obstacles.segment_blocked(&self.point(from), &self.point(&to))
    }

    /// All traversable moves out of `cell`, in [Heading::ALL] order.
    pub fn neighbourhood(
        &self,
        cell: &Cell,
        obstacles: &Obstacles,
    ) -> SmallVec<[(Cell, Heading); N_SMALLVEC_SIZE]> {
        Heading::ALL
            .into_iter()
            .filter(|h| self.can_move(cell, *h, obstacles))
            .map(|h| (h.step(cell), h))
            .collect()
    }

    /// Generates a [UnionFind] structure in which cells joined by a traversable step
    /// share a component.
    pub fn generate_components(&self, obstacles: &Obstacles) -> UnionFind<usize> {
        debug!(
            "Generating connected components over {}x{} cells",
            self.width(),
            self.height()
        );
        let mut components = UnionFind::new(self.len());
        for y in self.min.y..=self.max.y {
            for x in self.min.x..=self.max.x {
                let cell = Cell::new(x, y);
                for heading in [Heading::Right, Heading::Down] {
                    if self.can_move(&cell, heading, obstacles) {
                        components.union(self.get_ix(&cell), self.get_ix(&heading.step(&cell)));
                    }
                }
            }
        }
        components
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, components: &UnionFind<usize>, start: &Cell, goal: &Cell) -> bool {
        self.contains(start)
            && self.contains(goal)
            && components.equiv(self.get_ix(start), self.get_ix(goal))
    }
}
