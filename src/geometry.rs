use core::fmt;

/// A point on the canvas. The y axis grows downward, as on a screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
    pub fn manhattan_distance(&self, other: &Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Size {
        Size { width, height }
    }
}

/// An axis-aligned rectangle. `position` is its center, not a corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(position: Point, size: Size) -> Rect {
        Rect { position, size }
    }
    /// Builds a rectangle from its center coordinates and dimensions.
    pub const fn centered(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect::new(Point::new(x, y), Size::new(width, height))
    }
    /// Builds the smallest rectangle containing both corners.
    pub fn from_corners(a: Point, b: Point) -> Rect {
        let (left, right) = (a.x.min(b.x), a.x.max(b.x));
        let (top, bottom) = (a.y.min(b.y), a.y.max(b.y));
        Rect::centered(
            (left + right) / 2.0,
            (top + bottom) / 2.0,
            right - left,
            bottom - top,
        )
    }

    pub fn left(&self) -> f64 {
        self.position.x - self.size.width / 2.0
    }
    pub fn right(&self) -> f64 {
        self.position.x + self.size.width / 2.0
    }
    pub fn top(&self) -> f64 {
        self.position.y - self.size.height / 2.0
    }
    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.height / 2.0
    }

    /// The same rectangle grown by `margin` on all four sides.
    pub fn inflate(&self, margin: f64) -> Rect {
        Rect::new(
            self.position,
            Size::new(
                self.size.width + 2.0 * margin,
                self.size.height + 2.0 * margin,
            ),
        )
    }

    /// Strict containment: points on the boundary are outside.
    pub fn contains_strict(&self, point: &Point) -> bool {
        point.x > self.left()
            && point.x < self.right()
            && point.y > self.top()
            && point.y < self.bottom()
    }

    /// Inclusive containment, used for search bounds.
    pub fn contains_inclusive(&self, point: &Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_corners(
            Point::new(self.left().min(other.left()), self.top().min(other.top())),
            Point::new(
                self.right().max(other.right()),
                self.bottom().max(other.bottom()),
            ),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.size.width.is_finite() && self.size.height.is_finite()
    }
}
