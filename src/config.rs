//! Lab Configuration and Builder
//!
//! This module provides configuration types for the geometry lab: canvas
//! size, random point generation, the point file location and the
//! triangulation tolerances.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::delaunay::DelaunayOptions;
use crate::error::{GeometryError, Result};

/// Upper bound on randomly generated points per command
const MAX_RANDOM_POINTS: usize = 100_000;

/// Half-open coordinate interval `[min, max)`
///
/// Always finite and non-empty; deserialization goes through [`Extent::new`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ExtentBounds", into = "ExtentBounds"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    min: f64,
    max: f64,
}

/// Unchecked wire form of [`Extent`]
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct ExtentBounds {
    min: f64,
    max: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<ExtentBounds> for Extent {
    type Error = GeometryError;

    fn try_from(bounds: ExtentBounds) -> Result<Self> {
        Extent::new(bounds.min, bounds.max)
    }
}

#[cfg(feature = "serde")]
impl From<Extent> for ExtentBounds {
    fn from(extent: Extent) -> Self {
        Self {
            min: extent.min,
            max: extent.max,
        }
    }
}

impl Extent {
    /// Create an extent, checking that it is finite and non-empty
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either bound is not finite or `min >= max`
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(GeometryError::InvalidConfig(format!(
                "extent must satisfy min < max with finite bounds (got [{}, {}))",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Inclusive lower bound
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Exclusive upper bound
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of the interval
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether `value` falls inside `[min, max)`
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

/// Configuration for a geometry lab session
///
/// The same configuration (including `seed`) always produces the same random
/// point sets, so a session can be replayed exactly.
///
/// # Example
///
/// ```rust
/// use rust_planar_geometry::*;
///
/// let config = LabConfigBuilder::new()
///     .seed(42)
///     .canvas(800, 600)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.canvas_width, 800);
/// assert_eq!(config.random_point_count, 20);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LabConfig {
    /// Seed for every random point set drawn by the session
    pub seed: u64,

    /// Raster width in cells (Voronoi) and horizontal range of canvas points
    pub canvas_width: u32,

    /// Raster height in cells (Voronoi) and vertical range of canvas points
    pub canvas_height: u32,

    /// Number of points generated by a random point source
    pub random_point_count: usize,

    /// Horizontal range of random hull points
    pub random_x: Extent,

    /// Vertical range of random hull points
    pub random_y: Extent,

    /// Text file read by the configured file source
    pub points_file: PathBuf,

    /// In-circumcircle tolerance and super-triangle scale
    pub delaunay: DelaunayOptions,
}

impl LabConfig {
    /// Canvas size as `(width, height)`
    #[inline]
    pub fn canvas(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Path of the configured point file
    #[inline]
    pub fn points_file(&self) -> &Path {
        &self.points_file
    }
}

impl Default for LabConfig {
    fn default() -> Self {
        LabConfigBuilder::new().into_config()
    }
}

/// Builder for creating LabConfig with validation
///
/// # Example
///
/// ```rust
/// use rust_planar_geometry::*;
///
/// // Use defaults
/// let config = LabConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = LabConfigBuilder::new()
///     .seed(12345)
///     .random_point_count(50)
///     .unwrap()
///     .random_extents(0.0, 100.0, 0.0, 50.0)
///     .unwrap()
///     .delaunay_tolerance(1e-6)
///     .unwrap()
///     .points_file("data/points.txt")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct LabConfigBuilder {
    seed: Option<u64>,
    canvas_width: u32,
    canvas_height: u32,
    random_point_count: usize,
    random_x: Extent,
    random_y: Extent,
    points_file: PathBuf,
    delaunay: DelaunayOptions,
}

impl LabConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - canvas: 2000 x 1200
    /// - random_point_count: 20
    /// - random extents: x in [200, 1450), y in [100, 1100)
    /// - points_file: `points.txt`
    /// - delaunay: tolerance 1e-4, super-triangle scale 20
    pub fn new() -> Self {
        Self {
            seed: None,
            canvas_width: 2000,
            canvas_height: 1200,
            random_point_count: 20,
            random_x: Extent { min: 200.0, max: 1450.0 },
            random_y: Extent { min: 100.0, max: 1100.0 },
            points_file: PathBuf::from("points.txt"),
            delaunay: DelaunayOptions::default(),
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the canvas size
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is zero
    pub fn canvas(mut self, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GeometryError::InvalidConfig(format!(
                "canvas dimensions must be > 0 (got {}x{})",
                width, height
            )));
        }
        self.canvas_width = width;
        self.canvas_height = height;
        Ok(self)
    }

    /// Set how many points a random source generates
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if count > 100 000
    pub fn random_point_count(mut self, count: usize) -> Result<Self> {
        if count > MAX_RANDOM_POINTS {
            return Err(GeometryError::InvalidConfig(format!(
                "random point count must be <= {} (got {})",
                MAX_RANDOM_POINTS, count
            )));
        }
        self.random_point_count = count;
        Ok(self)
    }

    /// Set the rectangle random hull points are drawn from
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either range is empty or not finite
    pub fn random_extents(mut self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Result<Self> {
        self.random_x = Extent::new(min_x, max_x)?;
        self.random_y = Extent::new(min_y, max_y)?;
        Ok(self)
    }

    /// Set the point file used by the configured file source
    pub fn points_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.points_file = path.into();
        self
    }

    /// Set the absolute in-circumcircle tolerance
    ///
    /// The tolerance is not scaled to the input; pick it relative to the
    /// coordinate magnitudes in use.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if tolerance is negative or not finite
    pub fn delaunay_tolerance(mut self, tolerance: f64) -> Result<Self> {
        let delaunay = DelaunayOptions { tolerance, ..self.delaunay };
        delaunay.validate()?;
        self.delaunay = delaunay;
        Ok(self)
    }

    /// Set the super-triangle size relative to the input bounding box
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if scale <= 1.0 or not finite
    pub fn super_triangle_scale(mut self, scale: f64) -> Result<Self> {
        let delaunay = DelaunayOptions {
            super_triangle_scale: scale,
            ..self.delaunay
        };
        delaunay.validate()?;
        self.delaunay = delaunay;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<LabConfig> {
        Ok(self.into_config())
    }

    fn into_config(self) -> LabConfig {
        LabConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            random_point_count: self.random_point_count,
            random_x: self.random_x,
            random_y: self.random_y,
            points_file: self.points_file,
            delaunay: self.delaunay,
        }
    }
}

impl Default for LabConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
