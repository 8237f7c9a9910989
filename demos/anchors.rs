use ortho_router::{route_between, Edge, Rect, RouteParams};

// Connects two boxes from every edge of the first to every edge of the second, the way
// a diagram editor would when the user picks connection sides.
fn main() {
    let a = Rect::centered(150.0, 150.0, 100.0, 100.0);
    let b = Rect::centered(400.0, 300.0, 100.0, 100.0);
    let params = RouteParams::default();
    for from in Edge::ALL {
        for to in Edge::ALL {
            match route_between(&a, from, &b, to, &[], &params) {
                Ok(wire) if wire.is_empty() => println!("{from} -> {to}: no route"),
                Ok(wire) => {
                    let corners = ortho_router::corners(&wire);
                    let text = corners
                        .iter()
                        .map(|p| p.to_string())
                        .collect::<Vec<_>>()
                        .join(" ");
                    println!("{from} -> {to}: {text}");
                }
                Err(e) => println!("{from} -> {to}: {e}"),
            }
        }
    }
}
