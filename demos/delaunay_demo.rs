//! Example: Incremental Delaunay triangulation

use rust_planar_geometry::*;

fn main() -> Result<()> {
    println!("Delaunay Triangulation Example");
    println!("==============================\n");

    let config = LabConfigBuilder::new()
        .seed(2024)
        .random_point_count(30)?
        .build()?;
    let mut lab = GeometryLab::new(config);

    let outcome = lab.run(Command::new(Algorithm::Delaunay, PointSource::Random))?;
    if let Outcome::Delaunay { points, mesh } = outcome {
        let hull = convex_hull(&points).len();
        println!("Points: {}", points.len());
        println!("Triangles: {} (upper bound 2n - h - 2 = {})", mesh.triangle_count(), 2 * points.len() - hull - 2);
        println!("Edges: {} listed, {} distinct", mesh.edges().len(), mesh.unique_edges().len());

        println!("\nSample triangles:");
        for triangle in mesh.triangles().iter().take(5) {
            println!(
                "  ({}, {}) ({}, {}) ({}, {})  circumradius {:.1}",
                triangle.p0.x,
                triangle.p0.y,
                triangle.p1.x,
                triangle.p1.y,
                triangle.p2.x,
                triangle.p2.y,
                triangle.circle.radius_squared.sqrt()
            );
        }
    }

    // A stricter tolerance for small coordinates
    let options = DelaunayOptions {
        tolerance: 1e-12,
        ..Default::default()
    };
    let tiny = [
        Point::new(0.0, 0.0),
        Point::new(0.001, 0.0),
        Point::new(0.0005, 0.0008),
        Point::new(0.0005, 0.0003),
    ];
    let mesh = triangulate_with(&tiny, &options);
    println!("\nMillimetre-scale input: {} triangles", mesh.triangle_count());

    Ok(())
}
