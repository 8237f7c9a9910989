use ortho_router::{solve, Point, Rect, RouteParams};

// In this example a connector is routed past a single box sitting on the direct line
//
//  S . # . E
//
// where
// - # marks the obstacle
// - S marks the start
// - E marks the end
//
// No clearance is used, so the route hugs the box.
fn main() {
    let params = RouteParams {
        clearance: 0.0,
        ..RouteParams::default()
    };
    let obstacles = [Rect::centered(20.0, 0.0, 10.0, 10.0)];
    let start = Point::new(0.0, 0.0);
    let end = Point::new(40.0, 0.0);
    match solve(start, end, &obstacles, &params).unwrap() {
        Some(route) => {
            println!("Route with cost {}:", route.cost);
            for p in &route.points {
                println!("{}", p);
            }
            println!("Corners:");
            for p in route.corners() {
                println!("{}", p);
            }
        }
        None => println!("No route from {} to {}", start, end),
    }
}
