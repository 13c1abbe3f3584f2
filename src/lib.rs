//! Planar computational geometry lab
//!
//! Three independent algorithms over 2D point sets, each a pure function of
//! its input:
//!
//! - [`convex_hull`]: Andrew's monotone chain hull, collinear points dropped
//! - [`RasterPartition`] / [`classify_points`]: brute-force nearest-site
//!   Voronoi partitioning with a lowest-index tie-break
//! - [`triangulate`]: incremental Bowyer-Watson Delaunay triangulation
//!
//! plus the plumbing around them: point files, seeded random point sets and a
//! command dispatcher ([`GeometryLab`]) that a front end can drive.
//!
//! # Quick Start
//!
//! ```rust
//! use rust_planar_geometry::*;
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(4.0, 0.0),
//!     Point::new(4.0, 4.0),
//!     Point::new(0.0, 4.0),
//!     Point::new(2.0, 2.0),
//! ];
//!
//! let hull = convex_hull(&points);
//! assert_eq!(hull.len(), 4);
//!
//! let mesh = triangulate(&points);
//! println!("Generated {} triangles", mesh.triangle_count());
//!
//! let partition = RasterPartition::compute(&points, 8, 8).unwrap();
//! assert_eq!(partition.site_at(0, 0), Some(0));
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): kd-tree nearest-site lookups via [`SiteIndex`]
//! - `parallel`: classify raster rows on the rayon thread pool
//! - `serde`: Enables serialization support for configuration types

// Modules
pub mod error;
pub mod config;
pub mod hull;
pub mod voronoi;
pub mod delaunay;
pub mod source;
pub mod lab;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{GeometryError, Result};
pub use config::{Extent, LabConfig, LabConfigBuilder};
pub use hull::{convex_hull, hull_segments};
pub use voronoi::{classify_points, nearest_site, IncrementalVoronoi, RasterPartition};
pub use delaunay::{triangulate, triangulate_with, Circle, DelaunayOptions, Edge, Triangle, Triangulation};
pub use source::{
    load_points_by_line_or_empty, load_points_or_empty, parse_points, parse_points_by_line,
    read_points_file, read_points_file_by_line,
};
pub use lab::{Algorithm, ClickSession, Command, GeometryLab, Outcome, PointSource};

#[cfg(feature = "spatial-index")]
pub use spatial::SiteIndex;

/// A point in the plane; equality is exact coordinate equality
pub type Point = glam::DVec2;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
