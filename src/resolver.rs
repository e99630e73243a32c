//! Address resolution facade wiring the index, codecs, and catalog.
//!
//! `Resolver` is the explicit, injectable object owned by a service's
//! composition root: it holds the lazily built spatial index, the grid and
//! address codecs, and the static catalog. Construct one and share it; the
//! only blocking operation is the first index build.

use crate::address::AddressCodec;
use crate::catalog::DistrictCatalog;
use crate::error::{GridpostError, Result};
use crate::grid::GridCodec;
use crate::loader::{BoundarySource, LazyGeoIndex};
use crate::types::{Coordinates, GridConfig, LocatedAddress, ResolvedAddress};
use geo::Point;
use std::time::Duration;

/// Forward and reverse digital-address resolution.
///
/// # Example
///
/// ```rust
/// use gridpost::{boundaries_from_json_str, InMemorySource, Resolver};
///
/// let fixture = r#"{
///     "type": "FeatureCollection",
///     "features": [{
///         "type": "Feature",
///         "properties": {
///             "districtCode": "GA",
///             "districtName": "Accra Metropolitan",
///             "regionCode": "G",
///             "regionName": "Greater Accra"
///         },
///         "geometry": {
///             "type": "Polygon",
///             "coordinates": [[[-0.21, 5.70], [-0.20, 5.70], [-0.20, 5.71], [-0.21, 5.71], [-0.21, 5.70]]]
///         }
///     }]
/// }"#;
///
/// let boundaries = boundaries_from_json_str(fixture)?;
/// let resolver = Resolver::new(InMemorySource::new(boundaries));
///
/// let resolved = resolver.resolve(5.705, -0.205)?.expect("inside the fixture");
/// assert!(resolved.address.starts_with("GA-"));
///
/// let located = resolver.locate(&resolved.address)?;
/// assert_eq!(located.district_name, "Accra Metropolitan");
/// assert!(located.approximated);
/// # Ok::<(), gridpost::GridpostError>(())
/// ```
pub struct Resolver<S> {
    index: LazyGeoIndex<S>,
    grid: GridCodec,
    codec: AddressCodec,
    catalog: DistrictCatalog,
}

impl<S: BoundarySource> Resolver<S> {
    /// Resolver over the canonical Ghana grid configuration.
    pub fn new(source: S) -> Self {
        Self {
            index: LazyGeoIndex::new(source),
            grid: GridCodec::ghana(),
            codec: AddressCodec::new(),
            catalog: DistrictCatalog::new(),
        }
    }

    /// Resolver over a custom grid configuration.
    pub fn with_config(source: S, config: GridConfig) -> Result<Self> {
        let grid = GridCodec::new(config)?;
        let codec = AddressCodec::with_axis_width(grid.width())?;
        Ok(Self {
            index: LazyGeoIndex::new(source),
            grid,
            codec,
            catalog: DistrictCatalog::new(),
        })
    }

    /// Bound how long callers wait on another caller's in-flight index
    /// build (see [`LazyGeoIndex::with_wait_timeout`]).
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.index = self.index.with_wait_timeout(timeout);
        self
    }

    /// Build the index eagerly, typically at service startup.
    pub fn warm(&self) -> Result<()> {
        self.index.get().map(|_| ())
    }

    /// The grid codec in use.
    pub fn grid(&self) -> &GridCodec {
        &self.grid
    }

    /// Resolve a coordinate to its digital address (forward flow).
    ///
    /// Returns `Ok(None)` when the coordinate is inside the configured
    /// bounds but in no known district, an expected outcome rather than a
    /// fault.
    ///
    /// # Errors
    ///
    /// [`GridpostError::OutOfBounds`] for coordinates outside the
    /// configured rectangle (recoverable: treat as "not applicable");
    /// index build failures propagate as their own typed errors.
    pub fn resolve(&self, latitude: f64, longitude: f64) -> Result<Option<ResolvedAddress>> {
        if !self.grid.bounds().contains(latitude, longitude) {
            return Err(GridpostError::OutOfBounds {
                latitude,
                longitude,
            });
        }

        let index = self.index.get()?;
        let Some(boundary) = index.find_containing_district(Point::new(longitude, latitude))
        else {
            return Ok(None);
        };

        let reference = self.grid.encode(latitude, longitude)?;
        let address = self.codec.compose(&boundary.district_code, &reference, None)?;

        // Prefer the catalog's region name; fall back to what the boundary
        // dataset carried for districts the catalog does not know.
        let region_name = self
            .catalog
            .find_district_by_code(&boundary.district_code)
            .and_then(|district| self.catalog.region_of(district))
            .map_or_else(|| boundary.region_name.clone(), |region| region.name.to_string());

        Ok(Some(ResolvedAddress {
            address,
            district_code: boundary.district_code.clone(),
            district_name: boundary.district_name.clone(),
            region_name,
            coordinates: Coordinates {
                latitude,
                longitude,
            },
        }))
    }

    /// Locate a digital address (reverse flow).
    ///
    /// The returned coordinate is the lower-left corner of the encoded
    /// grid cell; `approximated` is always set accordingly.
    ///
    /// # Errors
    ///
    /// [`GridpostError::InvalidFormat`] for a malformed address string;
    /// [`GridpostError::InvalidInput`] when the district code does not
    /// resolve in the catalog.
    pub fn locate(&self, address: &str) -> Result<LocatedAddress> {
        let parsed = self.codec.parse(address)?;

        let district = self
            .catalog
            .find_district_by_code(&parsed.district_code)
            .ok_or_else(|| {
                GridpostError::InvalidInput(format!(
                    "unknown district code '{}'",
                    parsed.district_code
                ))
            })?;
        let region_name = self
            .catalog
            .region_of(district)
            .map(|region| region.name)
            .unwrap_or_default();

        let coordinates = self.grid.decode(&parsed.grid_ref)?;

        Ok(LocatedAddress {
            district_name: district.name.to_string(),
            region_name: region_name.to_string(),
            coordinates,
            approximated: true,
        })
    }
}
