//! Complete workflow demonstration for rust_planar_geometry
//!
//! Dispatches every algorithm against every point source, the way a front
//! end would when its buttons are pressed.

use rust_planar_geometry::*;

fn main() -> Result<()> {
    println!("=== rust_planar_geometry Complete Demo ===\n");

    // Step 1: Configure the lab
    println!("Step 1: Configuring lab...");
    let config = LabConfigBuilder::new()
        .seed(12345)
        .canvas(500, 300)?
        .points_file("demos/points.txt")
        .build()?;

    println!("  Seed: {}", config.seed);
    println!("  Canvas: {}x{}", config.canvas_width, config.canvas_height);
    println!("  Random points per command: {}", config.random_point_count);
    println!("  Point file: {}", config.points_file().display());

    let mut lab = GeometryLab::new(config);

    // Step 2: Run every command
    println!("\nStep 2: Running commands...");
    for algorithm in [Algorithm::ConvexHull, Algorithm::Voronoi, Algorithm::Delaunay] {
        for source in [PointSource::ConfiguredFile, PointSource::Random] {
            let label = format!("{:?}", source);
            let outcome = lab.run(Command::new(algorithm, source))?;
            println!("  {} ({}): {}", algorithm.name(), label, summarize(&outcome));
        }
    }

    // Step 3: Missing files are not fatal
    println!("\nStep 3: Missing point file...");
    let outcome = lab.run(Command::new(
        Algorithm::Delaunay,
        PointSource::File("does/not/exist.txt".into()),
    ))?;
    println!("  {}", summarize(&outcome));

    // Step 4: Clicking mode
    println!("\nStep 4: Click session...");
    let mut session = lab.session(Algorithm::Delaunay);
    for p in [
        Point::new(50.0, 50.0),
        Point::new(250.0, 40.0),
        Point::new(150.0, 220.0),
        Point::new(140.0, 100.0),
    ] {
        let summary = summarize(session.click(p));
        println!("  click ({}, {}) -> {}", p.x, p.y, summary);
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}

fn summarize(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Hull { points, hull } => {
            format!("{} points, {} hull vertices", points.len(), hull.len())
        }
        Outcome::Voronoi { sites, partition } => match partition {
            Some(partition) => format!(
                "{} sites, largest region {} cells",
                sites.len(),
                partition.region_sizes().into_iter().max().unwrap_or(0)
            ),
            None => "no sites, nothing classified".to_string(),
        },
        Outcome::Delaunay { points, mesh } => {
            format!("{} points, {} triangles", points.len(), mesh.triangle_count())
        }
    }
}
