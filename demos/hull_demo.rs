//! Example: Convex hull of a point file and of a random cloud
//!
//! Run from the crate root so `demos/points.txt` resolves.

use rust_planar_geometry::*;

fn main() -> Result<()> {
    println!("Convex Hull Example");
    println!("===================\n");

    let config = LabConfigBuilder::new()
        .seed(42)
        .points_file("demos/points.txt")
        .build()?;
    let mut lab = GeometryLab::new(config);

    for source in [PointSource::ConfiguredFile, PointSource::Random] {
        let label = format!("{:?}", source);
        let outcome = lab.run(Command::new(Algorithm::ConvexHull, source))?;

        if let Outcome::Hull { points, hull } = outcome {
            println!("{}: {} points, {} on the hull", label, points.len(), hull.len());
            for (a, b) in hull_segments(&hull) {
                println!("  ({:.1}, {:.1}) -> ({:.1}, {:.1})", a.x, a.y, b.x, b.y);
            }
            println!();
        }
    }

    // Clicking mode: the hull follows every new point
    let mut session = lab.session(Algorithm::ConvexHull);
    for p in [
        Point::new(100.0, 100.0),
        Point::new(300.0, 120.0),
        Point::new(200.0, 150.0),
        Point::new(220.0, 320.0),
    ] {
        if let Outcome::Hull { hull, .. } = session.click(p) {
            println!("After click at ({}, {}): hull has {} vertices", p.x, p.y, hull.len());
        }
    }

    Ok(())
}
