use crate::geometry::{Point, Rect};

/// Checks whether `point` lies strictly inside any obstacle grown by `clearance`.
/// Points exactly on an inflated boundary are free, which lets a connector run
/// at exactly `clearance` distance from a shape.
pub fn is_blocked(point: &Point, obstacles: &[Rect], clearance: f64) -> bool {
    obstacles
        .iter()
        .any(|rect| rect.inflate(clearance).contains_strict(point))
}

/// The obstacle list of a single routing call, with inflation applied once up front.
#[derive(Clone, Debug)]
pub struct Obstacles {
    inflated: Vec<Rect>,
}

impl Obstacles {
    pub fn new(obstacles: &[Rect], clearance: f64) -> Obstacles {
        Obstacles {
            inflated: obstacles.iter().map(|r| r.inflate(clearance)).collect(),
        }
    }

    pub fn inflated(&self) -> &[Rect] {
        &self.inflated
    }

    pub fn point_blocked(&self, point: &Point) -> bool {
        self.inflated.iter().any(|rect| rect.contains_strict(point))
    }

    /// Tests an axis-aligned segment against the open inflated rectangles. A segment
    /// that only touches a boundary is free. Segments that are neither horizontal nor
    /// vertical are tested through their bounding box, which is conservative.
    pub fn segment_blocked(&self, a: &Point, b: &Point) -> bool {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        self.inflated.iter().any(|rect| {
            overlaps_open(x0, x1, rect.left(), rect.right())
                && overlaps_open(y0, y1, rect.top(), rect.bottom())
        })
    }
}

/// Whether the closed interval [lo, hi] meets the open interval (left, right).
fn overlaps_open(lo: f64, hi: f64, left: f64, right: f64) -> bool {
    lo < right && hi > left
}
