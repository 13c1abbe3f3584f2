//! Command dispatch for the geometry lab
//!
//! A front end (window, terminal, test harness) turns its events into
//! [`Command`]s and hands them to a [`GeometryLab`]; the lab gathers the
//! points, runs the requested algorithm and returns an [`Outcome`] holding
//! both the input points and the geometric result for drawing. Interactive
//! click-to-add modes go through a [`ClickSession`] instead.
//!
//! The lab keeps no point state between commands. Its only mutable state is
//! the seeded generator behind random point sources.

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};

use crate::config::LabConfig;
use crate::delaunay::{triangulate_with, Triangulation};
use crate::error::Result;
use crate::hull::convex_hull;
use crate::source::{
    load_points_by_line_or_empty, load_points_or_empty, random_canvas_points, random_points,
};
use crate::voronoi::{IncrementalVoronoi, RasterPartition};

/// The three demonstrations offered by the lab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    ConvexHull,
    Voronoi,
    Delaunay,
}

impl Algorithm {
    /// Human-readable name, e.g. for window titles
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::ConvexHull => "Convex Hull",
            Algorithm::Voronoi => "Voronoi Diagram",
            Algorithm::Delaunay => "Delaunay Triangulation",
        }
    }
}

/// Where the points for a command come from
#[derive(Debug, Clone, PartialEq)]
pub enum PointSource {
    /// A specific text file
    File(PathBuf),
    /// The file named in [`LabConfig::points_file`]
    ConfiguredFile,
    /// Random points drawn with the lab's seeded generator
    Random,
    /// Points supplied directly by the caller
    Points(Vec<DVec2>),
}

/// A request to run one algorithm on one point source
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub algorithm: Algorithm,
    pub source: PointSource,
}

impl Command {
    pub fn new(algorithm: Algorithm, source: PointSource) -> Self {
        Self { algorithm, source }
    }
}

/// Result of a command, ready for a renderer
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Input points and their hull, counter-clockwise
    Hull { points: Vec<DVec2>, hull: Vec<DVec2> },
    /// Sites and the raster partition; `None` when there were no sites
    Voronoi {
        sites: Vec<DVec2>,
        partition: Option<RasterPartition>,
    },
    /// Input points and their triangulation
    Delaunay { points: Vec<DVec2>, mesh: Triangulation },
}

impl Outcome {
    /// The points the algorithm ran on
    pub fn points(&self) -> &[DVec2] {
        match self {
            Outcome::Hull { points, .. } => points,
            Outcome::Voronoi { sites, .. } => sites,
            Outcome::Delaunay { points, .. } => points,
        }
    }

    /// Which algorithm produced this outcome
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Outcome::Hull { .. } => Algorithm::ConvexHull,
            Outcome::Voronoi { .. } => Algorithm::Voronoi,
            Outcome::Delaunay { .. } => Algorithm::Delaunay,
        }
    }
}

/// Run `algorithm` on `points` with the settings in `config`
fn compute(algorithm: Algorithm, points: Vec<DVec2>, config: &LabConfig) -> Result<Outcome> {
    let outcome = match algorithm {
        Algorithm::ConvexHull => {
            let hull = convex_hull(&points);
            tracing::debug!(points = points.len(), hull = hull.len(), "convex hull computed");
            Outcome::Hull { points, hull }
        }
        Algorithm::Voronoi => {
            let partition = if points.is_empty() {
                tracing::warn!("Voronoi requested without sites; nothing to classify");
                None
            } else {
                let (width, height) = config.canvas();
                let partition = classify_canvas(&points, width, height)?;
                tracing::debug!(sites = points.len(), width, height, "Voronoi raster computed");
                Some(partition)
            };
            Outcome::Voronoi {
                sites: points,
                partition,
            }
        }
        Algorithm::Delaunay => {
            let mesh = triangulate_with(&points, &config.delaunay);
            tracing::debug!(
                points = points.len(),
                triangles = mesh.triangle_count(),
                "Delaunay triangulation computed"
            );
            Outcome::Delaunay { points, mesh }
        }
    };

    Ok(outcome)
}

#[cfg(feature = "spatial-index")]
fn classify_canvas(sites: &[DVec2], width: u32, height: u32) -> Result<RasterPartition> {
    RasterPartition::compute_indexed(sites, width, height)
}

#[cfg(not(feature = "spatial-index"))]
fn classify_canvas(sites: &[DVec2], width: u32, height: u32) -> Result<RasterPartition> {
    RasterPartition::compute(sites, width, height)
}

/// Dispatches commands to the three algorithms
///
/// # Example
///
/// ```
/// use rust_planar_geometry::*;
///
/// let config = LabConfigBuilder::new()
///     .seed(42)
///     .canvas(200, 120)
///     .unwrap()
///     .build()
///     .unwrap();
/// let mut lab = GeometryLab::new(config);
///
/// let outcome = lab
///     .run(Command::new(Algorithm::Delaunay, PointSource::Random))
///     .unwrap();
/// assert_eq!(outcome.points().len(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct GeometryLab {
    config: LabConfig,
    rng: ChaCha8Rng,
}

impl GeometryLab {
    /// Create a lab; random sources are seeded from `config.seed`
    pub fn new(config: LabConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Configuration this lab was created with
    #[inline]
    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    /// Gather the points for `source` as `algorithm` would see them
    ///
    /// Unreadable files yield an empty set. Delaunay reads files line by
    /// line and skips malformed lines; the other algorithms read a token
    /// stream that stops at the first bad token. Random hull points come from
    /// the configured extents; random Voronoi and Delaunay points are integer
    /// canvas positions.
    pub fn load(&mut self, algorithm: Algorithm, source: PointSource) -> Vec<DVec2> {
        match source {
            PointSource::File(path) => Self::load_file(algorithm, &path),
            PointSource::ConfiguredFile => Self::load_file(algorithm, &self.config.points_file),
            PointSource::Points(points) => points,
            PointSource::Random => {
                let count = self.config.random_point_count;
                match algorithm {
                    Algorithm::ConvexHull => random_points(
                        &mut self.rng,
                        count,
                        self.config.random_x,
                        self.config.random_y,
                    ),
                    Algorithm::Voronoi | Algorithm::Delaunay => random_canvas_points(
                        &mut self.rng,
                        count,
                        self.config.canvas_width,
                        self.config.canvas_height,
                    ),
                }
            }
        }
    }

    fn load_file(algorithm: Algorithm, path: &Path) -> Vec<DVec2> {
        match algorithm {
            Algorithm::Delaunay => load_points_by_line_or_empty(path),
            Algorithm::ConvexHull | Algorithm::Voronoi => load_points_or_empty(path),
        }
    }

    /// Execute a command
    ///
    /// # Errors
    ///
    /// Propagates classification errors; an empty point set is not an error.
    pub fn run(&mut self, command: Command) -> Result<Outcome> {
        tracing::debug!(
            algorithm = command.algorithm.name(),
            source = ?command.source,
            "running command"
        );
        let points = self.load(command.algorithm, command.source);
        compute(command.algorithm, points, &self.config)
    }

    /// Start an interactive session for `algorithm` with this lab's settings
    pub fn session(&self, algorithm: Algorithm) -> ClickSession {
        ClickSession::new(algorithm, self.config.clone())
    }
}

/// Interactive mode where points arrive one click at a time
///
/// Every click appends a point and recomputes the result from scratch.
#[derive(Debug, Clone)]
pub struct ClickSession {
    config: LabConfig,
    voronoi: IncrementalVoronoi,
    outcome: Outcome,
    algorithm: Algorithm,
    points: Vec<DVec2>,
}

impl ClickSession {
    /// Create an empty session
    pub fn new(algorithm: Algorithm, config: LabConfig) -> Self {
        let (width, height) = config.canvas();
        Self {
            voronoi: IncrementalVoronoi::new(width, height),
            outcome: empty_outcome(algorithm),
            config,
            algorithm,
            points: Vec::new(),
        }
    }

    /// Algorithm this session runs
    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Points clicked so far, in order
    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Latest result
    #[inline]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Add a clicked point and recompute
    pub fn click(&mut self, point: DVec2) -> &Outcome {
        self.points.push(point);

        self.outcome = match self.algorithm {
            Algorithm::ConvexHull => Outcome::Hull {
                points: self.points.clone(),
                hull: convex_hull(&self.points),
            },
            Algorithm::Voronoi => Outcome::Voronoi {
                sites: self.points.clone(),
                partition: Some(self.voronoi.add_site(point).clone()),
            },
            Algorithm::Delaunay => Outcome::Delaunay {
                points: self.points.clone(),
                mesh: triangulate_with(&self.points, &self.config.delaunay),
            },
        };

        tracing::trace!(
            algorithm = self.algorithm.name(),
            points = self.points.len(),
            "click handled"
        );
        &self.outcome
    }

    /// Forget all points
    pub fn reset(&mut self) {
        self.points.clear();
        self.voronoi.clear();
        self.outcome = empty_outcome(self.algorithm);
    }
}

fn empty_outcome(algorithm: Algorithm) -> Outcome {
    match algorithm {
        Algorithm::ConvexHull => Outcome::Hull {
            points: Vec::new(),
            hull: Vec::new(),
        },
        Algorithm::Voronoi => Outcome::Voronoi {
            sites: Vec::new(),
            partition: None,
        },
        Algorithm::Delaunay => Outcome::Delaunay {
            points: Vec::new(),
            mesh: Triangulation::default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabConfigBuilder;
    use crate::delaunay::triangulate;
    use std::fs;

    fn small_config(seed: u64) -> LabConfig {
        LabConfigBuilder::new()
            .seed(seed)
            .canvas(64, 48)
            .unwrap()
            .random_point_count(12)
            .unwrap()
            .build()
            .unwrap()
    }

    fn square_with_center() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 4.0),
            DVec2::new(0.0, 4.0),
            DVec2::new(2.0, 2.0),
        ]
    }

    #[test]
    fn test_hull_command() {
        let mut lab = GeometryLab::new(small_config(1));
        let outcome = lab
            .run(Command::new(
                Algorithm::ConvexHull,
                PointSource::Points(square_with_center()),
            ))
            .unwrap();

        match outcome {
            Outcome::Hull { points, hull } => {
                assert_eq!(points.len(), 5);
                assert_eq!(hull.len(), 4);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_random_sources_follow_algorithm() {
        let mut lab = GeometryLab::new(small_config(9));
        let config = lab.config().clone();

        let hull_points = lab.load(Algorithm::ConvexHull, PointSource::Random);
        assert_eq!(hull_points.len(), 12);
        assert!(hull_points
            .iter()
            .all(|p| config.random_x.contains(p.x) && config.random_y.contains(p.y)));

        let canvas_points = lab.load(Algorithm::Voronoi, PointSource::Random);
        assert!(canvas_points
            .iter()
            .all(|p| p.x < 64.0 && p.y < 48.0 && p.x.fract() == 0.0));
    }

    #[test]
    fn test_same_seed_replays_session() {
        let mut a = GeometryLab::new(small_config(77));
        let mut b = GeometryLab::new(small_config(77));

        for algorithm in [Algorithm::ConvexHull, Algorithm::Voronoi, Algorithm::Delaunay] {
            let command = Command::new(algorithm, PointSource::Random);
            assert_eq!(a.run(command.clone()).unwrap(), b.run(command).unwrap());
        }
    }

    #[test]
    fn test_voronoi_command_partitions_canvas() {
        let mut lab = GeometryLab::new(small_config(3));
        let outcome = lab
            .run(Command::new(Algorithm::Voronoi, PointSource::Random))
            .unwrap();

        match outcome {
            Outcome::Voronoi { sites, partition } => {
                let partition = partition.unwrap();
                assert_eq!(partition.labels().len(), 64 * 48);
                assert_eq!(partition, RasterPartition::compute(&sites, 64, 48).unwrap());
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_yields_empty_results() {
        let config = LabConfigBuilder::new()
            .seed(1)
            .canvas(8, 8)
            .unwrap()
            .points_file(std::env::temp_dir().join("rust_planar_geometry_missing_points.txt"))
            .build()
            .unwrap();
        let mut lab = GeometryLab::new(config);

        for algorithm in [Algorithm::ConvexHull, Algorithm::Voronoi, Algorithm::Delaunay] {
            let outcome = lab
                .run(Command::new(algorithm, PointSource::ConfiguredFile))
                .unwrap();
            assert!(outcome.points().is_empty());
            assert_eq!(outcome.algorithm(), algorithm);
            assert_eq!(outcome, empty_outcome(algorithm));
        }
    }

    #[test]
    fn test_file_source() {
        let path = std::env::temp_dir().join(format!(
            "rust_planar_geometry_lab_{}.txt",
            std::process::id()
        ));
        fs::write(&path, "0 0\n4 0\n4 4\n0 4\n2 2\n").unwrap();

        let mut lab = GeometryLab::new(small_config(1));
        let outcome = lab
            .run(Command::new(Algorithm::Delaunay, PointSource::File(path.clone())))
            .unwrap();
        fs::remove_file(&path).unwrap();

        match outcome {
            Outcome::Delaunay { points, mesh } => {
                assert_eq!(points, square_with_center());
                assert_eq!(mesh.triangle_count(), 4);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_file_format_follows_algorithm() {
        let path = std::env::temp_dir().join(format!(
            "rust_planar_geometry_lab_lines_{}.txt",
            std::process::id()
        ));
        fs::write(&path, "0 0\n4 0\nsee below\n4 4\n0 4\n2 2\n").unwrap();

        let mut lab = GeometryLab::new(small_config(1));
        let delaunay = lab
            .run(Command::new(Algorithm::Delaunay, PointSource::File(path.clone())))
            .unwrap();
        let hull = lab
            .run(Command::new(Algorithm::ConvexHull, PointSource::File(path.clone())))
            .unwrap();
        fs::remove_file(&path).unwrap();

        match delaunay {
            Outcome::Delaunay { points, mesh } => {
                assert_eq!(points, square_with_center());
                assert_eq!(mesh.triangle_count(), 4);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(
            hull.points(),
            &[DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0)]
        );
    }

    #[test]
    fn test_click_session_hull() {
        let lab = GeometryLab::new(small_config(1));
        let mut session = lab.session(Algorithm::ConvexHull);

        for p in square_with_center() {
            session.click(p);
        }

        assert_eq!(session.points().len(), 5);
        match session.outcome() {
            Outcome::Hull { hull, .. } => assert_eq!(hull.len(), 4),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_click_session_voronoi_matches_batch() {
        let mut session = ClickSession::new(Algorithm::Voronoi, small_config(1));
        assert_eq!(session.outcome(), &empty_outcome(Algorithm::Voronoi));

        let clicks = [DVec2::new(5.0, 5.0), DVec2::new(40.0, 10.0), DVec2::new(20.0, 40.0)];
        for p in clicks {
            session.click(p);
        }

        match session.outcome() {
            Outcome::Voronoi {
                partition: Some(partition),
                ..
            } => {
                assert_eq!(partition, &RasterPartition::compute(&clicks, 64, 48).unwrap());
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_click_session_delaunay_and_reset() {
        let mut session = ClickSession::new(Algorithm::Delaunay, small_config(1));

        session.click(DVec2::new(0.0, 0.0));
        session.click(DVec2::new(10.0, 0.0));
        match session.outcome() {
            Outcome::Delaunay { mesh, .. } => assert!(mesh.is_empty()),
            other => panic!("unexpected outcome {:?}", other),
        }

        session.click(DVec2::new(5.0, 8.0));
        match session.outcome() {
            Outcome::Delaunay { mesh, points } => assert_eq!(mesh, &triangulate(points)),
            other => panic!("unexpected outcome {:?}", other),
        }

        session.reset();
        assert!(session.points().is_empty());
        assert_eq!(session.outcome(), &empty_outcome(Algorithm::Delaunay));
    }
}
