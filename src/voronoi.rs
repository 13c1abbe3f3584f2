//! Brute-force Voronoi partitioning of the plane
//!
//! Every query location is assigned to the site with the smallest squared
//! Euclidean distance. When several sites are equally close the lowest site
//! index wins, so results are deterministic and independent of evaluation
//! order (including the row-parallel raster pass behind the `parallel`
//! feature).
//!
//! Three modes share that primitive:
//!
//! - [`classify_points`] for an arbitrary list of query locations
//! - [`RasterPartition`] for a dense `width x height` grid of integer cells
//! - [`IncrementalVoronoi`] which recomputes the raster after every new site

use glam::DVec2;

use crate::error::{GeometryError, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Index of the nearest site, assuming `sites` is non-empty
///
/// A later site only replaces the current best when it is strictly closer,
/// which resolves ties towards the lowest index.
#[inline]
pub(crate) fn nearest_unchecked(sites: &[DVec2], query: DVec2) -> usize {
    let mut best = 0;
    let mut best_distance = sites[0].distance_squared(query);

    for (idx, site) in sites.iter().enumerate().skip(1) {
        let distance = site.distance_squared(query);
        if distance < best_distance {
            best_distance = distance;
            best = idx;
        }
    }

    best
}

/// Find the site nearest to `query`
///
/// # Errors
///
/// Returns [`GeometryError::NoSites`] if `sites` is empty.
///
/// # Example
///
/// ```
/// use rust_planar_geometry::voronoi::nearest_site;
/// use glam::DVec2;
///
/// let sites = [DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
/// assert_eq!(nearest_site(&sites, DVec2::new(4.0, 0.0)).unwrap(), 0);
/// // Equidistant: the lower index wins
/// assert_eq!(nearest_site(&sites, DVec2::new(5.0, 0.0)).unwrap(), 0);
/// assert_eq!(nearest_site(&sites, DVec2::new(6.0, 0.0)).unwrap(), 1);
/// ```
pub fn nearest_site(sites: &[DVec2], query: DVec2) -> Result<usize> {
    if sites.is_empty() {
        return Err(GeometryError::NoSites);
    }
    Ok(nearest_unchecked(sites, query))
}

/// Classify an arbitrary list of query locations by nearest site
///
/// # Errors
///
/// Returns [`GeometryError::NoSites`] if `sites` is empty, even when
/// `queries` is empty too.
pub fn classify_points(sites: &[DVec2], queries: &[DVec2]) -> Result<Vec<usize>> {
    if sites.is_empty() {
        return Err(GeometryError::NoSites);
    }
    Ok(queries
        .iter()
        .map(|&q| nearest_unchecked(sites, q))
        .collect())
}

/// Nearest-site assignment for every cell of a fixed-size raster
///
/// Cell `(x, y)` covers the integer location `(x, y)` with
/// `0 <= x < width` and `0 <= y < height`. Labels are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterPartition {
    width: u32,
    height: u32,
    site_count: usize,
    labels: Vec<usize>,
}

impl RasterPartition {
    /// Classify every raster cell by brute force, O(width * height * sites)
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NoSites`] if `sites` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_planar_geometry::voronoi::RasterPartition;
    /// use glam::DVec2;
    ///
    /// let sites = [DVec2::new(0.0, 0.0), DVec2::new(3.0, 0.0)];
    /// let partition = RasterPartition::compute(&sites, 4, 1).unwrap();
    /// assert_eq!(partition.labels(), &[0, 0, 1, 1]);
    /// ```
    pub fn compute(sites: &[DVec2], width: u32, height: u32) -> Result<Self> {
        if sites.is_empty() {
            return Err(GeometryError::NoSites);
        }

        let labels = classify_rows(width, height, |query| nearest_unchecked(sites, query));

        Ok(Self {
            width,
            height,
            site_count: sites.len(),
            labels,
        })
    }

    /// Classify every raster cell through a kd-tree over the sites
    ///
    /// Produces exactly the same labels as [`RasterPartition::compute`],
    /// including the lowest-index tie-break.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NoSites`] if `sites` is empty.
    #[cfg(feature = "spatial-index")]
    pub fn compute_indexed(sites: &[DVec2], width: u32, height: u32) -> Result<Self> {
        let index = crate::spatial::SiteIndex::new(sites)?;
        let labels = classify_rows(width, height, |query| index.find_nearest(query));

        Ok(Self {
            width,
            height,
            site_count: sites.len(),
            labels,
        })
    }

    /// Raster width in cells
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in cells
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of sites the raster was classified against
    #[inline]
    pub fn site_count(&self) -> usize {
        self.site_count
    }

    /// Row-major site labels, one per cell
    #[inline]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Site owning cell `(x, y)`, or `None` outside the raster
    pub fn site_at(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.labels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterate over the cells owned by `site`, in row-major order
    pub fn cells_of(&self, site: usize) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width.max(1) as usize;
        self.labels
            .iter()
            .enumerate()
            .filter(move |&(_, &label)| label == site)
            .map(move |(idx, _)| ((idx % width) as u32, (idx / width) as u32))
    }

    /// Number of cells owned by each site
    pub fn region_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.site_count];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }

    /// Group the cells into one region per site (indexed by site)
    pub fn into_regions(self) -> Vec<Vec<(u32, u32)>> {
        let mut regions: Vec<Vec<(u32, u32)>> = vec![Vec::new(); self.site_count];
        let width = self.width.max(1) as usize;

        for (idx, label) in self.labels.into_iter().enumerate() {
            regions[label].push(((idx % width) as u32, (idx / width) as u32));
        }

        regions
    }
}

/// Run `nearest` for every raster cell, row by row
#[cfg(not(feature = "parallel"))]
fn classify_rows<F>(width: u32, height: u32, nearest: F) -> Vec<usize>
where
    F: Fn(DVec2) -> usize,
{
    let mut labels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            labels.push(nearest(DVec2::new(x as f64, y as f64)));
        }
    }
    labels
}

/// Run `nearest` for every raster cell, rows in parallel
///
/// Each cell is computed independently, so the output matches the serial pass.
#[cfg(feature = "parallel")]
fn classify_rows<F>(width: u32, height: u32, nearest: F) -> Vec<usize>
where
    F: Fn(DVec2) -> usize + Sync,
{
    let mut labels = vec![0; width as usize * height as usize];
    if width == 0 {
        return labels;
    }

    labels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, label) in row.iter_mut().enumerate() {
                *label = nearest(DVec2::new(x as f64, y as f64));
            }
        });
    labels
}

/// Voronoi raster rebuilt from scratch each time a site is added
///
/// Mirrors an interactive session where sites arrive one click at a time.
/// Previously classified cells are not patched; every addition triggers a
/// full recomputation over the current site list.
#[derive(Debug, Clone)]
pub struct IncrementalVoronoi {
    width: u32,
    height: u32,
    sites: Vec<DVec2>,
    partition: Option<RasterPartition>,
}

impl IncrementalVoronoi {
    /// Create an empty session over a `width x height` raster
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            sites: Vec::new(),
            partition: None,
        }
    }

    /// Append a site and reclassify the whole raster
    pub fn add_site(&mut self, site: DVec2) -> &RasterPartition {
        self.sites.push(site);
        let labels = classify_rows(self.width, self.height, |query| {
            nearest_unchecked(&self.sites, query)
        });

        tracing::trace!(sites = self.sites.len(), "voronoi raster recomputed");

        self.partition.insert(RasterPartition {
            width: self.width,
            height: self.height,
            site_count: self.sites.len(),
            labels,
        })
    }

    /// Sites added so far, in insertion order
    #[inline]
    pub fn sites(&self) -> &[DVec2] {
        &self.sites
    }

    /// Current partition; `None` until the first site is added
    #[inline]
    pub fn partition(&self) -> Option<&RasterPartition> {
        self.partition.as_ref()
    }

    /// Drop all sites and the current partition
    pub fn clear(&mut self) {
        self.sites.clear();
        self.partition = None;
    }
}
