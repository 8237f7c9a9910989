/// Fuzzes the router on many random obstacle layouts, checking that a route is found
/// exactly when the goal is reachable on the lattice, that every route is valid, and
/// that the cost model behaves as expected when obstacles or penalties change.
use ortho_router::*;
use rand::prelude::*;
use std::collections::{HashMap, VecDeque};

const STEP: f64 = 10.0;
const CELLS: i32 = 20;

fn canvas() -> Rect {
    Rect::from_corners(
        Point::new(0.0, 0.0),
        Point::new(CELLS as f64 * STEP, CELLS as f64 * STEP),
    )
}

fn random_obstacles(rng: &mut StdRng) -> Vec<Rect> {
    let n = rng.gen_range(0..8);
    (0..n)
        .map(|_| {
            Rect::centered(
                rng.gen_range(0.0..200.0),
                rng.gen_range(0.0..200.0),
                rng.gen_range(5.0..60.0),
                rng.gen_range(5.0..60.0),
            )
        })
        .collect()
}

fn random_lattice_point(rng: &mut StdRng) -> Point {
    Point::new(
        rng.gen_range(0..=CELLS) as f64 * STEP,
        rng.gen_range(0..=CELLS) as f64 * STEP,
    )
}

fn params(clearance: f64, turn_penalty: u32) -> RouteParams {
    RouteParams {
        step: STEP,
        clearance,
        turn_penalty,
        bounds: Some(canvas()),
        ..RouteParams::default()
    }
}

fn to_cell(p: Point) -> (i32, i32) {
    ((p.x / STEP).round() as i32, (p.y / STEP).round() as i32)
}

fn to_point((x, y): (i32, i32)) -> Point {
    Point::new(x as f64 * STEP, y as f64 * STEP)
}

/// Breadth-first distances in steps from `start` to every lattice cell it can reach.
fn bfs_distances(start: Point, obstacles: &Obstacles) -> HashMap<(i32, i32), u32> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(to_cell(start), 0u32);
    queue.push_back(to_cell(start));
    while let Some(cell) = queue.pop_front() {
        let d = dist[&cell];
        for (dx, dy) in [(1, 0), (0, 1), (-1, 0), (0, -1)] {
            let next = (cell.0 + dx, cell.1 + dy);
            if next.0 < 0 || next.1 < 0 || next.0 > CELLS || next.1 > CELLS {
                continue;
            }
            if dist.contains_key(&next)
                || obstacles.segment_blocked(&to_point(cell), &to_point(next))
            {
                continue;
            }
            dist.insert(next, d + 1);
            queue.push_back(next);
        }
    }
    dist
}

/// Breadth-first distance in steps over the same lattice, used as ground truth.
fn bfs_distance(start: Point, end: Point, obstacles: &Obstacles) -> Option<u32> {
    if obstacles.point_blocked(&start) || obstacles.point_blocked(&end) {
        return None;
    }
    bfs_distances(start, obstacles).get(&to_cell(end)).copied()
}

/// Cheapest route to an arbitrary `end` when turns are free: the lattice distance to a
/// cell around `end` plus one unit for each piece of an L-shaped, unobstructed
/// connection from that cell to `end`.
fn bfs_cost_off_lattice(start: Point, end: Point, obstacles: &Obstacles) -> Option<u32> {
    if obstacles.point_blocked(&start) || obstacles.point_blocked(&end) {
        return None;
    }
    let dist = bfs_distances(start, obstacles);
    let span = |v: f64| ((v / STEP).floor() as i32)..=((v / STEP).ceil() as i32);
    let mut best: Option<u32> = None;
    for y in span(end.y) {
        for x in span(end.x) {
            let Some(d) = dist.get(&(x, y)) else {
                continue;
            };
            let from = to_point((x, y));
            for corner in [Point::new(from.x, end.y), Point::new(end.x, from.y)] {
                let mut pieces = vec![from, corner, end];
                pieces.dedup();
                if pieces
                    .windows(2)
                    .any(|w| obstacles.segment_blocked(&w[0], &w[1]))
                {
                    continue;
                }
                let cost = d + (pieces.len() - 1) as u32;
                best = Some(best.map_or(cost, |b| b.min(cost)));
            }
        }
    }
    best
}

fn assert_valid(route: &Route, start: Point, end: Point, obstacles: &Obstacles) {
    let points = &route.points;
    assert_eq!(points.first(), Some(&start));
    assert_eq!(points.last(), Some(&end));
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        assert_eq!(a.manhattan_distance(&b), STEP, "{a} -> {b}");
        assert!(a.x == b.x || a.y == b.y);
        assert!(!obstacles.segment_blocked(&a, &b), "{a} -> {b} crosses an obstacle");
    }
    for pt in points {
        assert!(!obstacles.point_blocked(pt));
        assert_eq!((pt.x / STEP).fract(), 0.0);
        assert_eq!((pt.y / STEP).fract(), 0.0);
    }
}

#[test]
fn fuzz() {
    const N_CASES: usize = 400;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_CASES {
        let obstacles = random_obstacles(&mut rng);
        let clearance = if rng.gen_bool(0.5) { 0.0 } else { 10.0 };
        let start = random_lattice_point(&mut rng);
        let end = random_lattice_point(&mut rng);
        let inflated = Obstacles::new(&obstacles, clearance);
        let expected = bfs_distance(start, end, &inflated);

        let p = params(clearance, 10);
        let found = solve(start, end, &obstacles, &p).unwrap();
        assert_eq!(found.is_some(), expected.is_some());
        let again = solve(start, end, &obstacles, &p).unwrap();
        assert_eq!(found, again);

        if let Some(route) = found {
            assert_valid(&route, start, end, &inflated);
            let steps = (route.points.len() - 1) as u32;
            assert_eq!(route.cost, steps + 10 * route.turns() as u32);
        }
    }
}

#[test]
fn fuzz_precheck_agrees_with_search() {
    const N_CASES: usize = 200;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_CASES {
        let obstacles = random_obstacles(&mut rng);
        let start = random_lattice_point(&mut rng);
        let end = random_lattice_point(&mut rng);
        let with = params(10.0, 10);
        let without = RouteParams {
            precheck: false,
            ..with.clone()
        };
        assert_eq!(
            route(start, end, &obstacles, &with).unwrap(),
            route(start, end, &obstacles, &without).unwrap()
        );
    }
}

#[test]
fn fuzz_zero_penalty_is_shortest_path() {
    const N_CASES: usize = 300;
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..N_CASES {
        let obstacles = random_obstacles(&mut rng);
        let start = random_lattice_point(&mut rng);
        let end = random_lattice_point(&mut rng);
        let inflated = Obstacles::new(&obstacles, 0.0);
        let expected = bfs_distance(start, end, &inflated);
        let found = solve(start, end, &obstacles, &params(0.0, 0)).unwrap();
        assert_eq!(found.map(|r| r.cost), expected);
    }
}

#[test]
fn fuzz_turn_penalty_effect() {
    const N_CASES: usize = 200;
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..N_CASES {
        let obstacles = random_obstacles(&mut rng);
        let start = random_lattice_point(&mut rng);
        let end = random_lattice_point(&mut rng);
        let mut previous: Option<Route> = None;
        for penalty in [0, 1, 5, 10, 50] {
            let Some(route) = solve(start, end, &obstacles, &params(0.0, penalty)).unwrap() else {
                assert!(previous.is_none());
                continue;
            };
            if let Some(prev) = &previous {
                assert!(route.turns() <= prev.turns(), "more turns at penalty {penalty}");
                assert!(route.cost >= prev.cost, "lower cost at penalty {penalty}");
                assert!(route.points.len() >= prev.points.len());
            }
            previous = Some(route);
        }
    }
}

#[test]
fn fuzz_adding_obstacles_never_helps() {
    const N_CASES: usize = 300;
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..N_CASES {
        let mut obstacles = random_obstacles(&mut rng);
        let start = random_lattice_point(&mut rng);
        let end = random_lattice_point(&mut rng);
        let p = params(0.0, 10);
        let before = solve(start, end, &obstacles, &p).unwrap();
        obstacles.extend(random_obstacles(&mut rng).into_iter().take(1));
        let after = solve(start, end, &obstacles, &p).unwrap();
        match (before, after) {
            (None, Some(route)) => panic!("extra obstacle opened a path: {:?}", route.points),
            (Some(b), Some(a)) => assert!(a.cost >= b.cost),
            _ => {}
        }
    }
}

#[test]
fn fuzz_off_lattice_end() {
    const N_CASES: usize = 400;
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..N_CASES {
        let obstacles = random_obstacles(&mut rng);
        let clearance = if rng.gen_bool(0.5) { 0.0 } else { 10.0 };
        let start = random_lattice_point(&mut rng);
        let end = Point::new(rng.gen_range(0.0..200.0), rng.gen_range(0.0..200.0));
        let inflated = Obstacles::new(&obstacles, clearance);

        let found = solve(start, end, &obstacles, &params(clearance, 10)).unwrap();
        let shortest = solve(start, end, &obstacles, &params(clearance, 0)).unwrap();
        let expected = bfs_cost_off_lattice(start, end, &inflated);
        assert_eq!(found.is_some(), expected.is_some(), "{start} -> {end}");
        assert_eq!(shortest.as_ref().map(|r| r.cost), expected, "{start} -> {end}");

        if let Some(route) = found {
            let points = &route.points;
            assert_eq!(points.first(), Some(&start));
            assert_eq!(points.last(), Some(&end));
            for w in points.windows(2) {
                let (a, b) = (w[0], w[1]);
                assert!(a != b, "repeated point {a}");
                assert!(a.x == b.x || a.y == b.y, "{a} -> {b} is not axis-aligned");
                assert!(!inflated.segment_blocked(&a, &b), "{a} -> {b} crosses an obstacle");
            }
            // At most a corner and the end point leave the lattice
            for pt in &points[..points.len().saturating_sub(2)] {
                assert_eq!(*pt, to_point(to_cell(*pt)), "{pt} is off the lattice");
            }
            let pieces = (points.len() - 1) as u32;
            assert_eq!(route.cost, pieces + 10 * route.turns() as u32);
        }
    }
}
