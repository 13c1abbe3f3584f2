//! Incremental Delaunay triangulation (Bowyer-Watson)
//!
//! Points are inserted one at a time into a mesh seeded with a single
//! oversized super-triangle. For every insertion the triangles whose
//! circumcircle contains the new point are carved out, and the boundary of
//! that cavity is re-triangulated against the point. Once all points are in,
//! every triangle touching a super-triangle corner is discarded.
//!
//! # Tolerance
//!
//! The in-circumcircle test is `distance² - radius² <= tolerance` with a fixed
//! absolute tolerance (default `1e-4`). It does not adapt to the coordinate
//! scale: inputs with very large or very small magnitudes relative to the
//! tolerance can be misclassified. Use [`DelaunayOptions`] to tune it.
//!
//! Co-circular inputs may triangulate differently depending on insertion
//! order; every result still satisfies the empty-circumcircle property within
//! the tolerance.

use glam::DVec2;
use std::collections::{HashMap, HashSet};

use crate::error::{GeometryError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default absolute tolerance of the in-circumcircle test
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Default size of the super-triangle, in multiples of the larger bounding box side
pub const DEFAULT_SUPER_TRIANGLE_SCALE: f64 = 20.0;

/// Tunables for [`triangulate_with`]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaunayOptions {
    /// Absolute tolerance added to the in-circumcircle comparison
    pub tolerance: f64,
    /// Super-triangle extent relative to the larger bounding box dimension
    pub super_triangle_scale: f64,
}

impl DelaunayOptions {
    /// Check that the tolerance is finite and `>= 0` and the scale finite and `> 1`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the offending field
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(GeometryError::InvalidConfig(format!(
                "Delaunay tolerance must be finite and >= 0 (got {})",
                self.tolerance
            )));
        }
        if !self.super_triangle_scale.is_finite() || self.super_triangle_scale <= 1.0 {
            return Err(GeometryError::InvalidConfig(format!(
                "super-triangle scale must be > 1 (got {})",
                self.super_triangle_scale
            )));
        }
        Ok(())
    }

    /// Replace out-of-range fields with their defaults
    fn sanitized(&self) -> Self {
        if let Err(err) = self.validate() {
            tracing::warn!("{}; falling back to the default for that field", err);
        }
        let defaults = Self::default();
        Self {
            tolerance: if self.tolerance.is_finite() && self.tolerance >= 0.0 {
                self.tolerance
            } else {
                defaults.tolerance
            },
            super_triangle_scale: if self.super_triangle_scale.is_finite()
                && self.super_triangle_scale > 1.0
            {
                self.super_triangle_scale
            } else {
                defaults.super_triangle_scale
            },
        }
    }
}

impl Default for DelaunayOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            super_triangle_scale: DEFAULT_SUPER_TRIANGLE_SCALE,
        }
    }
}

/// Undirected segment between two points
///
/// Two edges are equal when they join the same points in either direction.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub p0: DVec2,
    pub p1: DVec2,
}

impl Edge {
    #[inline]
    pub fn new(p0: DVec2, p1: DVec2) -> Self {
        Self { p0, p1 }
    }

    /// Direction-independent hash key
    fn key(&self) -> EdgeKey {
        let a = point_bits(self.p0);
        let b = point_bits(self.p1);
        if a <= b {
            EdgeKey(a, b)
        } else {
            EdgeKey(b, a)
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.p0 == other.p0 && self.p1 == other.p1) || (self.p0 == other.p1 && self.p1 == other.p0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EdgeKey((u64, u64), (u64, u64));

/// Bit pattern of a point; `+ 0.0` folds `-0.0` into `0.0` so the key agrees with `==`
#[inline]
fn point_bits(p: DVec2) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

/// Circumscribed circle of a triangle
///
/// Stores the squared radius. Degenerate (collinear) triangles produce
/// non-finite values, which never pass the containment test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius_squared: f64,
}

impl Circle {
    /// Circle through three points
    pub fn through(p0: DVec2, p1: DVec2, p2: DVec2) -> Self {
        let ax = p1.x - p0.x;
        let ay = p1.y - p0.y;
        let bx = p2.x - p0.x;
        let by = p2.y - p0.y;

        let m = p1.x * p1.x - p0.x * p0.x + p1.y * p1.y - p0.y * p0.y;
        let u = p2.x * p2.x - p0.x * p0.x + p2.y * p2.y - p0.y * p0.y;
        let s = 1.0 / (2.0 * (ax * by - ay * bx));

        let center = DVec2::new(
            ((p2.y - p0.y) * m + (p0.y - p1.y) * u) * s,
            ((p0.x - p2.x) * m + (p1.x - p0.x) * u) * s,
        );

        Self {
            center,
            radius_squared: p0.distance_squared(center),
        }
    }

    /// True when `p` lies inside or on the circle, within `tolerance`
    #[inline]
    pub fn contains(&self, p: DVec2, tolerance: f64) -> bool {
        self.center.distance_squared(p) - self.radius_squared <= tolerance
    }
}

/// Mesh triangle with its edges and circumcircle
///
/// Triangles are never modified after construction; the triangulator
/// discards and replaces them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p0: DVec2,
    pub p1: DVec2,
    pub p2: DVec2,
    pub e0: Edge,
    pub e1: Edge,
    pub e2: Edge,
    pub circle: Circle,
}

impl Triangle {
    pub fn new(p0: DVec2, p1: DVec2, p2: DVec2) -> Self {
        Self {
            p0,
            p1,
            p2,
            e0: Edge::new(p0, p1),
            e1: Edge::new(p1, p2),
            e2: Edge::new(p0, p2),
            circle: Circle::through(p0, p1, p2),
        }
    }

    #[inline]
    pub fn vertices(&self) -> [DVec2; 3] {
        [self.p0, self.p1, self.p2]
    }

    #[inline]
    pub fn edges(&self) -> [Edge; 3] {
        [self.e0, self.e1, self.e2]
    }

    /// True if `p` is exactly one of the corners
    #[inline]
    pub fn has_vertex(&self, p: DVec2) -> bool {
        self.p0 == p || self.p1 == p || self.p2 == p
    }
}

/// Result of a triangulation
///
/// `edges` is the flattened edge list of all triangles, three per triangle in
/// triangle order. Edges shared by adjacent triangles appear twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    triangles: Vec<Triangle>,
    edges: Vec<Edge>,
}

impl Triangulation {
    fn from_triangles(triangles: Vec<Triangle>) -> Self {
        let edges = triangles.iter().flat_map(Triangle::edges).collect();
        Self { triangles, edges }
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Edge list with shared edges reported once, in first-seen order
    pub fn unique_edges(&self) -> Vec<Edge> {
        let mut seen = HashSet::with_capacity(self.edges.len());
        self.edges
            .iter()
            .filter(|edge| seen.insert(edge.key()))
            .copied()
            .collect()
    }
}

/// Corners of the super-triangle enclosing `points`
///
/// The triangle is centered on the bounding box and extends `scale` times its
/// larger side. Returns `None` for an empty input.
pub fn super_triangle(points: &[DVec2], scale: f64) -> Option<[DVec2; 3]> {
    let (min, max) = bounding_box(points)?;
    let size = max - min;
    let dmax = size.x.max(size.y);
    let mid = (min + max) / 2.0;

    Some([
        DVec2::new(mid.x - scale * dmax, mid.y - dmax),
        DVec2::new(mid.x, mid.y + scale * dmax),
        DVec2::new(mid.x + scale * dmax, mid.y - dmax),
    ])
}

/// Component-wise `(min, max)` of `points`
fn bounding_box(points: &[DVec2]) -> Option<(DVec2, DVec2)> {
    let first = *points.first()?;
    Some(
        points
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
    )
}

/// Triangulate with the default tolerance and super-triangle scale
///
/// Fewer than three points yield an empty triangulation.
///
/// # Example
///
/// ```
/// use rust_planar_geometry::delaunay::triangulate;
/// use glam::DVec2;
///
/// let points = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(4.0, 0.0),
///     DVec2::new(4.0, 4.0),
///     DVec2::new(0.0, 4.0),
///     DVec2::new(2.0, 2.0),
/// ];
///
/// let mesh = triangulate(&points);
/// assert_eq!(mesh.triangle_count(), 4);
/// assert_eq!(mesh.edges().len(), 12);
/// ```
pub fn triangulate(points: &[DVec2]) -> Triangulation {
    triangulate_with(points, &DelaunayOptions::default())
}

/// Triangulate `points` in input order
///
/// A tolerance that is negative or not finite, or a scale that is not above
/// 1, is replaced by its default (see [`DelaunayOptions::validate`]).
pub fn triangulate_with(points: &[DVec2], options: &DelaunayOptions) -> Triangulation {
    if points.len() < 3 {
        return Triangulation::default();
    }
    let options = options.sanitized();

    let corners = match super_triangle(points, options.super_triangle_scale) {
        Some(corners) => corners,
        None => return Triangulation::default(),
    };
    if bounding_box(points).is_some_and(|(min, max)| min == max) {
        tracing::warn!(
            points = points.len(),
            "all points coincide; the triangulation will be empty"
        );
    }

    let mut triangles = vec![Triangle::new(corners[0], corners[1], corners[2])];

    for &point in points {
        let mut cavity: Vec<Edge> = Vec::new();
        let mut kept: Vec<Triangle> = Vec::with_capacity(triangles.len() + 2);

        for triangle in triangles {
            if triangle.circle.contains(point, options.tolerance) {
                cavity.extend(triangle.edges());
            } else {
                kept.push(triangle);
            }
        }

        let boundary = cavity_boundary(cavity);
        tracing::trace!(
            boundary = boundary.len(),
            kept = kept.len(),
            "inserted point ({}, {})",
            point.x,
            point.y
        );

        kept.extend(boundary.into_iter().map(|edge| Triangle::new(edge.p0, edge.p1, point)));
        triangles = kept;
    }

    triangles.retain(|triangle| !corners.iter().any(|&corner| triangle.has_vertex(corner)));

    Triangulation::from_triangles(triangles)
}

/// Keep the edges that occur exactly once in the cavity
///
/// An edge listed twice is shared by two removed triangles and lies inside
/// the cavity. Survivors keep their original order.
fn cavity_boundary(cavity: Vec<Edge>) -> Vec<Edge> {
    let mut counts: HashMap<EdgeKey, usize> = HashMap::with_capacity(cavity.len());
    for edge in &cavity {
        *counts.entry(edge.key()).or_insert(0) += 1;
    }

    cavity
        .into_iter()
        .filter(|edge| counts[&edge.key()] == 1)
        .collect()
}
