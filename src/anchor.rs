//! Connection points on rectangle edges, and routing between two of them.
use core::fmt;

use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::router::{route, RouteParams};

/// One of the four sides of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Outward unit normal of the edge.
    pub fn normal(self) -> (f64, f64) {
        match self {
            Edge::Top => (0.0, -1.0),
            Edge::Right => (1.0, 0.0),
            Edge::Bottom => (0.0, 1.0),
            Edge::Left => (-1.0, 0.0),
        }
    }

    /// Moves `point` away from the shape by `distance` along the outward normal.
    pub fn offset(self, point: &Point, distance: f64) -> Point {
        let (nx, ny) = self.normal();
        Point::new(point.x + nx * distance, point.y + ny * distance)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
        };
        f.write_str(name)
    }
}

impl Rect {
    /// Midpoint of the given edge.
    pub fn anchor(&self, edge: Edge) -> Point {
        match edge {
            Edge::Top => Point::new(self.position.x, self.top()),
            Edge::Right => Point::new(self.right(), self.position.y),
            Edge::Bottom => Point::new(self.position.x, self.bottom()),
            Edge::Left => Point::new(self.left(), self.position.y),
        }
    }

    /// The edge `point` lies on, within `tolerance`. Left and right are tested before
    /// top and bottom, so a corner resolves to a vertical edge.
    pub fn connected_edge(&self, point: &Point, tolerance: f64) -> Option<Edge> {
        let within_x = point.x >= self.left() - tolerance && point.x <= self.right() + tolerance;
        let within_y = point.y >= self.top() - tolerance && point.y <= self.bottom() + tolerance;
        if within_y && (point.x - self.left()).abs() <= tolerance {
            Some(Edge::Left)
        } else if within_y && (point.x - self.right()).abs() <= tolerance {
            Some(Edge::Right)
        } else if within_x && (point.y - self.top()).abs() <= tolerance {
            Some(Edge::Top)
        } else if within_x && (point.y - self.bottom()).abs() <= tolerance {
            Some(Edge::Bottom)
        } else {
            None
        }
    }
}

/// Routes a connector from the `from_edge` midpoint of `from` to the `to_edge` midpoint
/// of `to`. Both anchors are pushed out by `params.clearance` before routing, and both
/// rectangles count as obstacles along with `others`. The result runs from anchor to
/// anchor; it is empty if no route exists.
pub fn route_between(
    from: &Rect,
    from_edge: Edge,
    to: &Rect,
    to_edge: Edge,
    others: &[Rect],
    params: &RouteParams,
) -> Result<Vec<Point>> {
    let start_anchor = from.anchor(from_edge);
    let end_anchor = to.anchor(to_edge);
    let start = from_edge.offset(&start_anchor, params.clearance);
    let end = to_edge.offset(&end_anchor, params.clearance);

    let mut obstacles = Vec::with_capacity(others.len() + 2);
    obstacles.push(*from);
    obstacles.push(*to);
    obstacles.extend_from_slice(others);

    let path = route(start, end, &obstacles, params)?;
    if path.is_empty() {
        return Ok(path);
    }
    let mut wire = Vec::with_capacity(path.len() + 2);
    if path.first() != Some(&start_anchor) {
        wire.push(start_anchor);
    }
    wire.extend(path);
    if wire.last() != Some(&end_anchor) {
        wire.push(end_anchor);
    }
    Ok(wire)
}
