//! Point sources
//!
//! Plain-text point lists, file loading and random point generation. These
//! are the only ways points enter the lab; the algorithms themselves never
//! touch the filesystem.
//!
//! # Text format
//!
//! Whitespace-separated `x y` pairs, conventionally one pair per line:
//!
//! ```text
//! 120.5 300
//! 640   212.25
//! ```

use glam::DVec2;
use rand::Rng;
use std::fs;
use std::path::Path;

use crate::config::Extent;
use crate::error::{GeometryError, Result};

/// Parse a single finite coordinate
#[inline]
fn coordinate(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse points from a whitespace-separated token stream
///
/// Tokens are consumed in pairs regardless of line breaks. Reading stops at
/// the first token that is not a finite number; everything parsed before it
/// is returned. A trailing number without a partner is dropped.
///
/// # Example
///
/// ```
/// use rust_planar_geometry::source::parse_points;
/// use glam::DVec2;
///
/// let points = parse_points("1 2\n3 4\nfive 6\n7 8");
/// assert_eq!(points, vec![DVec2::new(1.0, 2.0), DVec2::new(3.0, 4.0)]);
/// ```
pub fn parse_points(text: &str) -> Vec<DVec2> {
    let mut tokens = text.split_whitespace();
    let mut points = Vec::new();

    while let (Some(x), Some(y)) = (
        tokens.next().and_then(coordinate),
        tokens.next().and_then(coordinate),
    ) {
        points.push(DVec2::new(x, y));
    }

    points
}

/// Parse points line by line
///
/// Takes the first two numbers of every line and ignores anything after
/// them. Lines that do not start with two numbers are skipped and reading
/// continues with the next line.
pub fn parse_points_by_line(text: &str) -> Vec<DVec2> {
    text.lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let x = tokens.next().and_then(coordinate)?;
            let y = tokens.next().and_then(coordinate)?;
            Some(DVec2::new(x, y))
        })
        .collect()
}

/// Read a point file using [`parse_points`]
///
/// # Errors
///
/// Returns [`GeometryError::PointSource`] if the file cannot be read.
pub fn read_points_file(path: impl AsRef<Path>) -> Result<Vec<DVec2>> {
    read_with(path.as_ref(), parse_points)
}

/// Read a point file using [`parse_points_by_line`]
///
/// # Errors
///
/// Returns [`GeometryError::PointSource`] if the file cannot be read.
pub fn read_points_file_by_line(path: impl AsRef<Path>) -> Result<Vec<DVec2>> {
    read_with(path.as_ref(), parse_points_by_line)
}

fn read_with(path: &Path, parse: fn(&str) -> Vec<DVec2>) -> Result<Vec<DVec2>> {
    let text = fs::read_to_string(path).map_err(|err| GeometryError::PointSource {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;

    let points = parse(&text);
    tracing::debug!(path = %path.display(), points = points.len(), "loaded point file");
    Ok(points)
}

/// Read a point file, falling back to an empty set when it is unavailable
///
/// The failure is reported through a `warn` event; callers carry on with no
/// points, which every algorithm handles.
pub fn load_points_or_empty(path: impl AsRef<Path>) -> Vec<DVec2> {
    or_empty(read_points_file(path))
}

/// Line-based counterpart of [`load_points_or_empty`]
pub fn load_points_by_line_or_empty(path: impl AsRef<Path>) -> Vec<DVec2> {
    or_empty(read_points_file_by_line(path))
}

fn or_empty(result: Result<Vec<DVec2>>) -> Vec<DVec2> {
    match result {
        Ok(points) => points,
        Err(err) => {
            tracing::warn!("{}; continuing with an empty point set", err);
            Vec::new()
        }
    }
}

/// Draw `count` points uniformly from the rectangle `x × y`
///
/// # Example
///
/// ```
/// use rust_planar_geometry::source::random_points;
/// use rust_planar_geometry::Extent;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let x = Extent::new(0.0, 10.0).unwrap();
/// let y = Extent::new(-5.0, 5.0).unwrap();
///
/// let points = random_points(&mut rng, 100, x, y);
/// assert_eq!(points.len(), 100);
/// assert!(points.iter().all(|p| x.contains(p.x) && y.contains(p.y)));
/// ```
pub fn random_points<R: Rng + ?Sized>(rng: &mut R, count: usize, x: Extent, y: Extent) -> Vec<DVec2> {
    (0..count)
        .map(|_| DVec2::new(rng.gen_range(x.min()..x.max()), rng.gen_range(y.min()..y.max())))
        .collect()
}

/// Draw `count` integer-valued points from `[0, width) × [0, height)`
///
/// Returns no points when either dimension is zero.
pub fn random_canvas_points<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    width: u32,
    height: u32,
) -> Vec<DVec2> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    (0..count)
        .map(|_| DVec2::new(rng.gen_range(0..width) as f64, rng.gen_range(0..height) as f64))
        .collect()
}
