//! # ortho_router
//!
//! Routes orthogonal connector lines between points on a canvas, detouring around
//! rectangular obstacles. The route is found with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) over a lattice of points spaced
//! a fixed step apart, rooted at the start point. Each step costs one unit and every
//! change of direction adds a configurable penalty, so straighter wires win over
//! shorter zigzags. Obstacles are grown by a clearance margin so that wires keep a
//! visible distance from the shapes they avoid.
//!
//! Every call is a pure function of its inputs; nothing is cached between calls.
//! Before searching, free lattice cells are grouped into
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling the search area when no path exists.
//!
//! ```
//! use ortho_router::{route, Point, Rect, RouteParams};
//!
//! let params = RouteParams { clearance: 0.0, ..RouteParams::default() };
//! let obstacle = Rect::centered(10.0, 0.0, 10.0, 10.0);
//! let path = route(Point::new(0.0, 0.0), Point::new(20.0, 0.0), &[obstacle], &params).unwrap();
//! assert_eq!(path.len(), 5);
//! ```
pub mod anchor;
pub mod astar;
pub mod cost;
pub mod error;
pub mod geometry;
pub mod lattice;
pub mod obstacle;
pub mod router;

pub use anchor::{route_between, Edge};
pub use error::{Result, RouteError};
pub use geometry::{Point, Rect, Size};
pub use obstacle::{is_blocked, Obstacles};
pub use router::{corners, route, solve, turns, OrthogonalRouter, Route, RouteParams};

/// Cost of a single lattice step.
pub const STEP_COST: u32 = 1;
/// Default distance between neighbouring lattice points.
pub const DEFAULT_STEP: f64 = 10.0;
/// Default margin kept between a route and every obstacle.
pub const DEFAULT_CLEARANCE: f64 = 10.0;
/// Default cost of a change of direction, in steps.
pub const DEFAULT_TURN_PENALTY: u32 = 10;
/// Two steps' worth of room around everything the default search area has to cover.
pub const DEFAULT_PADDING: f64 = 2.0 * DEFAULT_STEP;
/// Largest search area, in cells, for which the connected-component pass is run.
pub const COMPONENT_PRECHECK_LIMIT: usize = 1 << 18;
const N_SMALLVEC_SIZE: usize = 4;
