//! R-tree spatial index over district boundary polygons.
//!
//! Bounding boxes prune the candidate set; the exact ray-casting test in
//! [`crate::geometry`] confirms containment. The index is built once from
//! the full boundary collection and is read-only afterwards, so it can be
//! shared across any number of concurrent readers without locking.

use crate::boundary::BoundaryPolygon;
use crate::error::{GridpostError, Result};
use crate::geometry;
use geo::Point;
use rstar::{AABB, RTree, RTreeObject};

/// One indexed boundary: the precomputed envelope plus the owning polygon.
#[derive(Debug)]
struct IndexedBoundary {
    envelope: AABB<[f64; 2]>,
    boundary: BoundaryPolygon,
}

impl RTreeObject for IndexedBoundary {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Queryable spatial index answering "which district contains this point".
#[derive(Debug)]
pub struct GeoIndex {
    tree: RTree<IndexedBoundary>,
}

impl GeoIndex {
    /// Build the index from the full boundary collection.
    ///
    /// Computes one envelope per polygon by walking every coordinate of
    /// every ring, then bulk-loads the R-tree (O(n log n), no sequential
    /// inserts).
    ///
    /// # Errors
    ///
    /// Returns [`GridpostError::InvalidBoundaryData`] when the collection
    /// is empty. Ring-level structure (minimum 3 positions, finite
    /// coordinates) is enforced by [`BoundaryPolygon`]'s constructors, so
    /// every polygon handed here already satisfies it.
    pub fn build(polygons: Vec<BoundaryPolygon>) -> Result<Self> {
        if polygons.is_empty() {
            return Err(GridpostError::InvalidBoundaryData(
                "cannot build a spatial index from an empty boundary collection".to_string(),
            ));
        }

        let entries = polygons
            .into_iter()
            .map(|boundary| {
                let envelope =
                    geometry::envelope_of_parts(boundary.parts()).ok_or_else(|| {
                        GridpostError::InvalidBoundaryData(format!(
                            "boundary '{}' has no coordinates to index",
                            boundary.district_code
                        ))
                    })?;
                Ok(IndexedBoundary { envelope, boundary })
            })
            .collect::<Result<Vec<_>>>()?;

        let tree = RTree::bulk_load(entries);
        log::info!("built district index over {} boundaries", tree.size());
        Ok(Self { tree })
    }

    /// Find the district whose geometry contains the point, if any.
    ///
    /// Envelope intersection is necessary but not sufficient, so each
    /// candidate's actual geometry is ray-cast tested in the order the
    /// index returns them; the first exact match wins. `None` is the
    /// expected outcome for coordinates outside every known district and
    /// is distinct from a structural failure.
    pub fn find_containing_district(&self, point: Point) -> Option<&BoundaryPolygon> {
        let query = AABB::from_point([point.x(), point.y()]);
        self.tree
            .locate_in_envelope_intersecting(&query)
            .find(|entry| geometry::any_ring_contains(point, entry.boundary.parts()))
            .map(|entry| &entry.boundary)
    }

    /// Number of indexed boundaries.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index holds no boundaries (never true for a built
    /// index; present for API completeness).
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
