//! Spatial indexing for fast nearest-site lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

use crate::error::{GeometryError, Result};

/// Widening applied to the nearest distance when gathering tie candidates
const TIE_SLACK: f64 = 1e-9;

/// KD-tree over Voronoi sites
///
/// Answers the same question as [`crate::voronoi::nearest_site`] in
/// O(log n): which site is closest to a query location, with equally close
/// sites resolved to the lowest index. The tree narrows the search to the
/// sites at the nearest distance; the final choice compares exact squared
/// distances so the answer never depends on the tree's traversal order.
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n) plus the number of tied sites
#[derive(Clone)]
pub struct SiteIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
    sites: Vec<DVec2>,
}

impl SiteIndex {
    /// Build the index from site positions
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NoSites`] if `sites` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_planar_geometry::SiteIndex;
    /// use glam::DVec2;
    ///
    /// let sites = vec![
    ///     DVec2::new(0.0, 0.0),
    ///     DVec2::new(10.0, 0.0),
    ///     DVec2::new(0.0, 10.0),
    /// ];
    ///
    /// let index = SiteIndex::new(&sites).unwrap();
    /// assert_eq!(index.find_nearest(DVec2::new(9.0, 1.0)), 1);
    /// assert_eq!(index.find_nearest(DVec2::new(5.0, 0.0)), 0); // tie
    /// ```
    pub fn new(sites: &[DVec2]) -> Result<Self> {
        if sites.is_empty() {
            return Err(GeometryError::NoSites);
        }

        let points: Vec<[f64; 2]> = sites.iter().map(|s| [s.x, s.y]).collect();

        Ok(Self {
            tree: ImmutableKdTree::new_from_slice(&points),
            sites: sites.to_vec(),
        })
    }

    /// Number of indexed sites
    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Always false; an index cannot be built without sites
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Find the site nearest to a position
    ///
    /// # Returns
    ///
    /// Index of the nearest site in the slice the index was built from,
    /// the lowest such index when several sites are equally close.
    pub fn find_nearest(&self, position: DVec2) -> usize {
        let query = [position.x, position.y];
        let nearest = self.tree.nearest_one::<SquaredEuclidean>(&query);

        let reach = nearest.distance + nearest.distance * TIE_SLACK + TIE_SLACK;
        let candidates: Vec<(usize, f64)> = self
            .tree
            .within_unsorted::<SquaredEuclidean>(&query, reach)
            .into_iter()
            .map(|neighbour| (neighbour.item, self.sites[neighbour.item].distance_squared(position)))
            .collect();

        let best = candidates
            .iter()
            .map(|&(_, distance)| distance)
            .fold(f64::INFINITY, f64::min);

        candidates
            .into_iter()
            .filter(|&(_, distance)| distance == best)
            .map(|(idx, _)| idx)
            .min()
            .unwrap_or(nearest.item)
    }
}
