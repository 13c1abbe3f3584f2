//! Convex hull construction (Andrew's monotone chain)
//!
//! Builds the boundary polygon of a planar point set. The hull is returned as
//! an open ring in counter-clockwise order starting at the lexicographically
//! smallest point; the closing segment from the last point back to the first
//! is implicit.
//!
//! Collinear points on a hull edge are never kept as vertices, and degenerate
//! inputs (duplicates, all points on one line) produce a shorter ring instead
//! of an error.

use glam::DVec2;
use std::cmp::Ordering;

/// Twice the signed area of the triangle `(o, a, b)`
///
/// Positive for a counter-clockwise (left) turn, negative for a clockwise
/// turn and zero when the three points are collinear.
#[inline]
pub fn cross(o: DVec2, a: DVec2, b: DVec2) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Lexicographic order: x ascending, ties broken by y ascending
fn lexicographic(a: &DVec2, b: &DVec2) -> Ordering {
    a.x.partial_cmp(&b.x)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
}

/// Push `p` onto a chain, first popping every point that would make a
/// non-left turn.
fn push_left_turn(chain: &mut Vec<DVec2>, p: DVec2) {
    while chain.len() >= 2 && cross(chain[chain.len() - 2], chain[chain.len() - 1], p) <= 0.0 {
        chain.pop();
    }
    chain.push(p);
}

/// Compute the convex hull of a point set
///
/// # Arguments
///
/// * `points` - Input points, in any order
///
/// # Returns
///
/// Hull vertices in counter-clockwise order without a repeated endpoint.
/// Zero or one input points are returned unchanged.
///
/// # Example
///
/// ```
/// use rust_planar_geometry::hull::convex_hull;
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
/// let hull = convex_hull(&points);
/// assert_eq!(hull.len(), 4);
/// assert!(!hull.contains(&DVec2::new(2.0, 2.0)));
/// ```
pub fn convex_hull(points: &[DVec2]) -> Vec<DVec2> {
    if points.len() <= 1 {
        return points.to_vec();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(lexicographic);

    let mut lower: Vec<DVec2> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        push_left_turn(&mut lower, p);
    }

    let mut upper: Vec<DVec2> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        push_left_turn(&mut upper, p);
    }

    // Each chain ends where the other one starts
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Segments of the closed hull polygon, ready for drawing
///
/// Connects each vertex to the next and the last vertex back to the first.
/// Returns no segments for fewer than two vertices.
pub fn hull_segments(hull: &[DVec2]) -> Vec<(DVec2, DVec2)> {
    if hull.len() < 2 {
        return Vec::new();
    }

    hull.iter()
        .zip(hull.iter().cycle().skip(1))
        .map(|(&a, &b)| (a, b))
        .collect()
}

/// Check whether `p` lies on or inside a counter-clockwise convex polygon
///
/// `tolerance` is the allowed negative cross product before a point counts as
/// outside an edge; pass `0.0` for an exact test.
pub fn contains_point(hull: &[DVec2], p: DVec2, tolerance: f64) -> bool {
    match hull.len() {
        0 => false,
        1 => hull[0] == p,
        _ => hull_segments(hull)
            .into_iter()
            .all(|(a, b)| cross(a, b, p) >= -tolerance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

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
    fn test_square_excludes_interior_point() {
        let hull = convex_hull(&square_with_center());

        assert_eq!(
            hull,
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(4.0, 0.0),
                DVec2::new(4.0, 4.0),
                DVec2::new(0.0, 4.0),
            ]
        );
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(convex_hull(&[]).is_empty());

        let single = [DVec2::new(3.0, -1.0)];
        assert_eq!(convex_hull(&single), vec![DVec2::new(3.0, -1.0)]);

        let pair = [DVec2::new(5.0, 5.0), DVec2::new(1.0, 2.0)];
        let hull = convex_hull(&pair);
        assert_eq!(hull.len(), 2);
        assert!(hull.contains(&pair[0]));
        assert!(hull.contains(&pair[1]));
    }

    #[test]
    fn test_collinear_points_collapse_to_segment() {
        let points = [
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(3.0, 3.0),
        ];

        let hull = convex_hull(&points);
        assert_eq!(hull, vec![DVec2::new(0.0, 0.0), DVec2::new(3.0, 3.0)]);
    }

    #[test]
    fn test_collinear_edge_points_are_dropped() {
        // (2, 0) and (4, 2) sit on hull edges
        let points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 2.0),
            DVec2::new(4.0, 4.0),
            DVec2::new(0.0, 4.0),
        ];

        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&DVec2::new(2.0, 0.0)));
        assert!(!hull.contains(&DVec2::new(4.0, 2.0)));
    }

    #[test]
    fn test_duplicates_do_not_panic() {
        let points = [DVec2::new(1.0, 1.0); 4];
        let hull = convex_hull(&points);
        assert!(hull.len() <= 2);
        assert!(hull.iter().all(|&p| p == DVec2::new(1.0, 1.0)));

        let mut points = square_with_center();
        points.extend(square_with_center());
        assert_eq!(convex_hull(&points).len(), 4);
    }

    #[test]
    fn test_random_hull_is_convex_and_minimal() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..20 {
            let points: Vec<DVec2> = (0..60)
                .map(|_| DVec2::new(rng.gen_range(200.0..1450.0), rng.gen_range(100.0..1100.0)))
                .collect();
            let hull = convex_hull(&points);
            assert!(hull.len() >= 3);

            for &p in &points {
                assert!(contains_point(&hull, p, 1e-9), "{:?} outside hull", p);
            }

            let n = hull.len();
            for i in 0..n {
                let turn = cross(hull[i], hull[(i + 1) % n], hull[(i + 2) % n]);
                assert!(turn > 0.0, "consecutive hull points must turn left");
            }
        }
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut points = square_with_center();
        let expected = convex_hull(&points);
        points.reverse();
        assert_eq!(convex_hull(&points), expected);
        assert_eq!(convex_hull(&points), convex_hull(&points));
    }

    #[test]
    fn test_hull_segments_close_the_ring() {
        let hull = convex_hull(&square_with_center());
        let segments = hull_segments(&hull);

        assert_eq!(segments.len(), 4);
        assert_eq!(segments[3], (DVec2::new(0.0, 4.0), DVec2::new(0.0, 0.0)));
        assert!(hull_segments(&hull[..1]).is_empty());
    }

    #[test]
    fn test_contains_point() {
        let hull = convex_hull(&square_with_center());

        assert!(contains_point(&hull, DVec2::new(2.0, 2.0), 0.0));
        assert!(contains_point(&hull, DVec2::new(4.0, 1.0), 0.0));
        assert!(!contains_point(&hull, DVec2::new(5.0, 1.0), 0.0));
        assert!(!contains_point(&[], DVec2::ZERO, 0.0));
    }
}
