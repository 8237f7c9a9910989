use grid_util::point::Point as Cell;
use itertools::Itertools;
use log::{debug, info, warn};
use smallvec::SmallVec;

use crate::astar::{astar, Search};
use crate::cost::{heuristic, move_cost, Heading};
use crate::error::{Result, RouteError};
use crate::geometry::{Point, Rect};
use crate::lattice::Lattice;
use crate::obstacle::Obstacles;
use crate::{
    COMPONENT_PRECHECK_LIMIT, DEFAULT_CLEARANCE, DEFAULT_PADDING, DEFAULT_STEP,
    DEFAULT_TURN_PENALTY,
};

/// Parameters of a routing call.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteParams {
    /// Distance between neighbouring lattice points.
    pub step: f64,
    /// Margin added around every obstacle before testing for containment.
    pub clearance: f64,
    /// Cost added for every change of direction, in units of one step.
    pub turn_penalty: u32,
    /// Margin around start, end and the inflated obstacles when `bounds` is unset. Never
    /// less than one `step` is applied.
    pub padding: f64,
    /// Explicit search area. Must contain both endpoints.
    pub bounds: Option<Rect>,
    /// Maximum number of node expansions before the search is abandoned.
    pub max_expansions: Option<usize>,
    /// Rule out unreachable goals with a connected-component pass before searching.
    pub precheck: bool,
}

impl Default for RouteParams {
    fn default() -> RouteParams {
        RouteParams {
            step: DEFAULT_STEP,
            clearance: DEFAULT_CLEARANCE,
            turn_penalty: DEFAULT_TURN_PENALTY,
            padding: DEFAULT_PADDING,
            bounds: None,
            max_expansions: None,
            precheck: true,
        }
    }
}

impl RouteParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(RouteError::invalid(format!(
                "step must be positive and finite, got {}",
                self.step
            )));
        }
        if !(self.clearance.is_finite() && self.clearance >= 0.0) {
            return Err(RouteError::invalid(format!(
                "clearance must be non-negative and finite, got {}",
                self.clearance
            )));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(RouteError::invalid(format!(
                "padding must be non-negative and finite, got {}",
                self.padding
            )));
        }
        if let Some(bounds) = &self.bounds {
            if !bounds.is_finite() || bounds.size.width < 0.0 || bounds.size.height < 0.0 {
                return Err(RouteError::invalid(format!("malformed bounds {bounds:?}")));
            }
        }
        Ok(())
    }
}

/// A routed connector.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Every lattice point visited from the start, followed by the corner and end point
    /// of the final connection when the end is off the lattice.
    pub points: Vec<Point>,
    /// Accumulated cost: one per step plus the turn penalties.
    pub cost: u32,
    /// Number of nodes the search expanded.
    pub expansions: usize,
}

impl Route {
    /// The route reduced to its first point, its corners and its last point.
    pub fn corners(&self) -> Vec<Point> {
        corners(&self.points)
    }

    /// Number of direction changes along the route.
    pub fn turns(&self) -> usize {
        turns(&self.points)
    }

    /// Total length of the polyline in canvas units.
    pub fn length(&self) -> f64 {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.manhattan_distance(b))
            .sum()
    }
}

fn direction(a: &Point, b: &Point) -> (i8, i8) {
    let sign = |v: f64| {
        if v > 0.0 {
            1
        } else if v < 0.0 {
            -1
        } else {
            0
        }
    };
    (sign(b.x - a.x), sign(b.y - a.y))
}

/// Drops every point that continues its predecessor's segment in the same direction.
pub fn corners(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = points.iter().take(1).copied().collect();
    for (a, b, c) in points.iter().tuple_windows() {
        if direction(a, b) != direction(b, c) {
            out.push(*b);
        }
    }
    if points.len() > 1 {
        out.extend(points.last().copied());
    }
    out
}

/// Counts direction changes between consecutive segments.
pub fn turns(points: &[Point]) -> usize {
    points
        .iter()
        .tuple_windows()
        .filter(|(a, b, c)| direction(a, b) != direction(b, c))
        .count()
}

/// A search state. The incoming heading is part of the state so that the cost of a
/// later turn is known exactly when a cell is expanded. `exit` marks the terminal state
/// reached by leaving the lattice through that entry of the exit list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct State {
    cell: Cell,
    heading: Option<Heading>,
    exit: Option<usize>,
}

/// Routes connectors with a fixed set of [RouteParams].
#[derive(Clone, Debug, Default)]
pub struct OrthogonalRouter {
    pub params: RouteParams,
}

impl OrthogonalRouter {
    pub fn new(params: RouteParams) -> OrthogonalRouter {
        OrthogonalRouter { params }
    }

    /// Computes the waypoints from `start` to `end`. An empty vector means no path exists.
    pub fn route(&self, start: Point, end: Point, obstacles: &[Rect]) -> Result<Vec<Point>> {
        route(start, end, obstacles, &self.params)
    }

    /// Like [route](Self::route), but also reports cost and search effort.
    pub fn solve(&self, start: Point, end: Point, obstacles: &[Rect]) -> Result<Option<Route>> {
        solve(start, end, obstacles, &self.params)
    }
}

/// Computes the waypoints of an orthogonal connector from `start` to `end` that keeps
/// `params.clearance` away from every obstacle. Returns an empty vector if no such path
/// exists within the search bounds.
pub fn route(
    start: Point,
    end: Point,
    obstacles: &[Rect],
    params: &RouteParams,
) -> Result<Vec<Point>> {
    Ok(solve(start, end, obstacles, params)?
        .map(|route| route.points)
        .unwrap_or_default())
}

fn validate_input(start: &Point, end: &Point, obstacles: &[Rect]) -> Result<()> {
    if !start.is_finite() || !end.is_finite() {
        return Err(RouteError::invalid(format!(
            "endpoints must be finite, got {start} and {end}"
        )));
    }
    for (i, rect) in obstacles.iter().enumerate() {
        if !rect.is_finite() || !(rect.size.width > 0.0 && rect.size.height > 0.0) {
            return Err(RouteError::invalid(format!(
                "obstacle {i} must have a finite, positive size, got {rect:?}"
            )));
        }
    }
    Ok(())
}

/// The area searched when the caller gives no bounds: everything that matters to the
/// route, padded so that detours around the outermost obstacles remain possible. The
/// padding is at least one step, so a lattice line always runs outside every obstacle.
fn default_bounds(start: &Point, end: &Point, obstacles: &Obstacles, padding: f64) -> Rect {
    obstacles
        .inflated()
        .iter()
        .fold(Rect::from_corners(*start, *end), |acc, r| acc.union(r))
        .inflate(padding)
}

fn heading_towards(from: &Point, to: &Point) -> Heading {
    if to.x > from.x {
        Heading::Right
    } else if to.x < from.x {
        Heading::Left
    } else if to.y > from.y {
        Heading::Down
    } else {
        Heading::Up
    }
}

/// A way off the lattice: from the point of `cell`, through at most one corner, to the
/// end point. `via` is empty when the end point is the lattice point itself.
#[derive(Clone, Debug, PartialEq)]
struct Exit {
    cell: Cell,
    from: Point,
    via: SmallVec<[Point; 2]>,
}

impl Exit {
    /// Cost of following `via` after arriving with `incoming`, priced like lattice steps.
    fn cost(&self, incoming: Option<Heading>, penalty: u32) -> u32 {
        let mut heading = incoming;
        let mut cost = 0;
        for (a, b) in std::iter::once(&self.from).chain(&self.via).tuple_windows() {
            let next = heading_towards(a, b);
            cost += move_cost(heading, next, penalty);
            heading = Some(next);
        }
        cost
    }
}

/// Every free cell around `end` together with each obstacle-free orthogonal connection
/// from it to `end`, bending through `(cell.x, end.y)` or `(end.x, cell.y)`.
fn exits_around(lattice: &Lattice, end: &Point, obstacles: &Obstacles) -> Vec<Exit> {
    let mut exits: Vec<Exit> = Vec::new();
    for cell in lattice.surrounding(end) {
        let from = lattice.point(&cell);
        if obstacles.point_blocked(&from) {
            continue;
        }
        for corner in [Point::new(from.x, end.y), Point::new(end.x, from.y)] {
            let via: SmallVec<[Point; 2]> = [corner, *end]
                .into_iter()
                .filter(|p| *p != from)
                .dedup()
                .collect();
            let exit = Exit { cell, from, via };
            let clear = std::iter::once(&exit.from)
                .chain(&exit.via)
                .tuple_windows()
                .all(|(a, b)| !obstacles.segment_blocked(a, b));
            if clear && !exits.contains(&exit) {
                exits.push(exit);
            }
        }
    }
    exits
}

/// Computes the cheapest route from `start` to `end`, or [None] if there is none.
///
/// The lattice is rooted at `start`. When `end` is not a lattice point, the route leaves
/// the lattice at one of the cells around `end` and finishes with at most two axis-aligned
/// pieces, priced and obstacle-checked like any other step. An endpoint inside an
/// inflated obstacle fails fast with [None].
pub fn solve(
    start: Point,
    end: Point,
    obstacles: &[Rect],
    params: &RouteParams,
) -> Result<Option<Route>> {
    params.validate()?;
    validate_input(&start, &end, obstacles)?;
    let inflated = Obstacles::new(obstacles, params.clearance);
    if inflated.point_blocked(&start) {
        info!("Start {} lies within an obstacle", start);
        return Ok(None);
    }
    if inflated.point_blocked(&end) {
        info!("End {} lies within an obstacle", end);
        return Ok(None);
    }
    if start == end {
        return Ok(Some(Route {
            points: vec![start],
            cost: 0,
            expansions: 0,
        }));
    }

    let bounds = match params.bounds {
        Some(bounds) => {
            if !bounds.contains_inclusive(&start) || !bounds.contains_inclusive(&end) {
                return Err(RouteError::invalid(format!(
                    "bounds {bounds:?} must contain both {start} and {end}"
                )));
            }
            bounds
        }
        None => default_bounds(&start, &end, &inflated, params.padding.max(params.step)),
    };
    let lattice = Lattice::new(start, params.step, &bounds)?;
    let origin = Cell::new(0, 0);
    if !lattice.on_lattice(&end) {
        debug!("{} is off the lattice, connecting from the cells around it", end);
    }
    let exits = exits_around(&lattice, &end, &inflated);
    if exits.is_empty() {
        info!("No lattice point around {} connects to it", end);
        return Ok(None);
    }

    let prechecked = params.precheck && lattice.len() <= COMPONENT_PRECHECK_LIMIT;
    if prechecked {
        let components = lattice.generate_components(&inflated);
        if !exits
            .iter()
            .any(|exit| lattice.reachable(&components, &origin, &exit.cell))
        {
            info!("{} is not reachable from {}", end, start);
            return Ok(None);
        }
        debug!("{} is reachable from {}, computing path", end, start);
    }

    let penalty = params.turn_penalty;
    let result = astar(
        &State {
            cell: origin,
            heading: None,
            exit: None,
        },
        |state| {
            let mut next: SmallVec<[(State, u32); 8]> = SmallVec::new();
            if state.exit.is_none() {
                let incoming = state.heading;
                for (cell, heading) in lattice.neighbourhood(&state.cell, &inflated) {
                    let moved = State {
                        cell,
                        heading: Some(heading),
                        exit: None,
                    };
                    next.push((moved, move_cost(incoming, heading, penalty)));
                }
                for (i, exit) in exits.iter().enumerate() {
                    if exit.cell == state.cell {
                        let leave = State {
                            exit: Some(i),
                            ..*state
                        };
                        next.push((leave, exit.cost(incoming, penalty)));
                    }
                }
            }
            next
        },
        |state| match state.exit {
            Some(_) => 0,
            None => exits
                .iter()
                .map(|exit| heuristic(&state.cell, &exit.cell))
                .min()
                .unwrap_or(0),
        },
        |state| state.exit.is_some(),
        params.max_expansions,
    );

    match result {
        Search::Found {
            path,
            cost,
            expansions,
        } => {
            let mut points: Vec<Point> = path
                .iter()
                .filter(|s| s.exit.is_none())
                .map(|s| lattice.point(&s.cell))
                .collect();
            if let Some(exit) = path.last().and_then(|s| s.exit).and_then(|i| exits.get(i)) {
                points.extend(exit.via.iter().copied());
            }
            debug!(
                "Routed {} to {} with cost {} after {} expansions",
                start, end, cost, expansions
            );
            Ok(Some(Route {
                points,
                cost,
                expansions,
            }))
        }
        Search::Exhausted { expansions } => {
            if prechecked {
                warn!("Reachable goal could not be pathed to, is the component pass correct?");
            } else {
                info!(
                    "No path from {} to {} after {} expansions",
                    start, end, expansions
                );
            }
            Ok(None)
        }
        Search::OverBudget { expansions } => {
            warn!(
                "Giving up on {} to {} after {} expansions",
                start, end, expansions
            );
            Err(RouteError::SearchBudgetExceeded { expansions })
        }
    }
}
