//! Digital address resolution: district containment lookup, grid reference
//! encoding, and canonical address codecs over a bounded region.
//!
//! ```rust
//! use gridpost::{boundaries_from_json_str, InMemorySource, Resolver};
//!
//! let fixture = r#"{
//!     "type": "FeatureCollection",
//!     "features": [{
//!         "type": "Feature",
//!         "properties": {
//!             "districtCode": "GA",
//!             "districtName": "Accra Metropolitan",
//!             "regionCode": "G",
//!             "regionName": "Greater Accra"
//!         },
//!         "geometry": {
//!             "type": "Polygon",
//!             "coordinates": [[[-0.21, 5.70], [-0.20, 5.70], [-0.20, 5.71], [-0.21, 5.71], [-0.21, 5.70]]]
//!         }
//!     }]
//! }"#;
//!
//! let boundaries = boundaries_from_json_str(fixture)?;
//! let resolver = Resolver::new(InMemorySource::new(boundaries));
//!
//! let resolved = resolver.resolve(5.705, -0.205)?.expect("inside the Accra fixture");
//! assert!(resolved.address.starts_with("GA-"));
//! assert_eq!(resolved.district_name, "Accra Metropolitan");
//! # Ok::<(), gridpost::GridpostError>(())
//! ```

pub mod address;
pub mod boundary;
pub mod catalog;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod index;
pub mod loader;
pub mod resolver;
pub mod types;

pub use address::{AddressCodec, DISTRICT_CODE_LEN, ParsedAddress};
pub use boundary::{
    BoundaryPolygon, boundaries_from_feature_collection, boundaries_from_json_str,
};
pub use catalog::{District, DistrictCatalog, DistrictMatch, REGIONS, Region};
pub use error::{GridpostError, Result};
pub use grid::{GridCodec, GridReference};
pub use index::GeoIndex;
pub use loader::{BoundarySource, InMemorySource, LazyGeoIndex};
pub use resolver::Resolver;
pub use types::{Bounds, Coordinates, GridConfig, LocatedAddress, ResolvedAddress};

pub use geo::{Coord, Point};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GridpostError, Resolver, Result};

    pub use crate::{AddressCodec, GridCodec, GridReference, ParsedAddress};

    pub use crate::{BoundaryPolygon, boundaries_from_feature_collection, boundaries_from_json_str};

    pub use crate::{BoundarySource, GeoIndex, InMemorySource, LazyGeoIndex};

    pub use crate::{Bounds, Coordinates, GridConfig, LocatedAddress, ResolvedAddress};

    pub use crate::{District, DistrictCatalog, Region};

    pub use geo::{Coord, Point};
}
