//! Grid reference quantization within a bounded region.
//!
//! A coordinate is mapped onto a fixed subdivision of the configured
//! bounding rectangle and rendered as a fixed-width decimal cell pair,
//! latitude cell first. Decoding recovers the cell's lower-left corner, so
//! a round trip is lossy: the result is within one cell width of the
//! original on each axis, always rounded down.

use crate::error::{GridpostError, Result};
use crate::types::{Bounds, Coordinates, GridConfig};
use std::fmt;

/// A quantized grid cell reference.
///
/// Holds the latitude and longitude cell indices together with the per-axis
/// decimal width they render at. Under the canonical configuration the
/// width is 4, producing 8-digit references such as `17216589`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridReference {
    lat_cell: u32,
    lon_cell: u32,
    width: u8,
}

impl GridReference {
    /// Build a reference from raw cell indices.
    ///
    /// # Errors
    ///
    /// Returns [`GridpostError::InvalidInput`] when the width is outside
    /// `1..=9` or either index does not fit in `width` decimal digits.
    pub fn new(lat_cell: u32, lon_cell: u32, width: u8) -> Result<Self> {
        if !(1..=9).contains(&width) {
            return Err(GridpostError::InvalidInput(format!(
                "grid reference width must be between 1 and 9, got {width}"
            )));
        }
        let limit = 10u32.pow(u32::from(width));
        if lat_cell >= limit || lon_cell >= limit {
            return Err(GridpostError::InvalidInput(format!(
                "cell indices ({lat_cell}, {lon_cell}) do not fit in {width} digits"
            )));
        }
        Ok(Self {
            lat_cell,
            lon_cell,
            width,
        })
    }

    /// Parse a concatenated reference of exactly `2 * width` digits.
    pub fn parse(text: &str, width: u8) -> Result<Self> {
        let expected = 2 * usize::from(width);
        if text.len() != expected || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GridpostError::InvalidInput(format!(
                "grid reference '{text}' must be exactly {expected} digits"
            )));
        }
        let (lat, lon) = text.split_at(usize::from(width));
        let lat_cell = lat.parse::<u32>().map_err(|e| {
            GridpostError::InvalidInput(format!("invalid latitude cell '{lat}': {e}"))
        })?;
        let lon_cell = lon.parse::<u32>().map_err(|e| {
            GridpostError::InvalidInput(format!("invalid longitude cell '{lon}': {e}"))
        })?;
        Self::new(lat_cell, lon_cell, width)
    }

    /// Latitude cell index.
    pub fn lat_cell(&self) -> u32 {
        self.lat_cell
    }

    /// Longitude cell index.
    pub fn lon_cell(&self) -> u32 {
        self.lon_cell
    }

    /// Per-axis decimal width.
    pub fn width(&self) -> u8 {
        self.width
    }
}

impl fmt::Display for GridReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:0width$}{:0width$}",
            self.lat_cell,
            self.lon_cell,
            width = usize::from(self.width)
        )
    }
}

/// Deterministic coordinate-to-cell quantizer over a bounded rectangle.
///
/// # Example
///
/// ```rust
/// use gridpost::GridCodec;
///
/// let codec = GridCodec::ghana();
/// let reference = codec.encode(5.705, -0.20525).unwrap();
/// assert_eq!(reference.to_string().len(), 8);
///
/// let corner = codec.decode(&reference).unwrap();
/// let (cell_lat, cell_lon) = codec.cell_size();
/// assert!(5.705 - corner.latitude < cell_lat);
/// assert!(-0.20525 - corner.longitude < cell_lon);
/// ```
#[derive(Debug, Clone)]
pub struct GridCodec {
    bounds: Bounds,
    cells: u32,
    width: u8,
}

impl GridCodec {
    /// Build a codec from a validated configuration.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            bounds: config.bounds,
            cells: config.cells_per_axis,
            width: decimal_width(config.cells_per_axis - 1),
        })
    }

    /// The canonical Ghana codec (10 000 cells per axis, width 4).
    pub fn ghana() -> Self {
        Self {
            bounds: Bounds::ghana(),
            cells: 10_000,
            width: 4,
        }
    }

    /// The configured bounding rectangle.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Per-axis decimal width of produced references.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Total digit count of a rendered reference.
    pub fn ref_digits(&self) -> usize {
        2 * usize::from(self.width)
    }

    /// Size of one cell in degrees as `(latitude span, longitude span)`.
    pub fn cell_size(&self) -> (f64, f64) {
        let cells = f64::from(self.cells);
        (
            self.bounds.lat_span() / cells,
            self.bounds.lon_span() / cells,
        )
    }

    /// Quantize a coordinate to its grid cell.
    ///
    /// The exact upper boundary (`latitude == north`, `longitude == east`)
    /// quantizes one past the last cell and is clamped into it; anything
    /// beyond the rectangle fails instead of clamping.
    ///
    /// # Errors
    ///
    /// Returns [`GridpostError::OutOfBounds`] when the coordinate is
    /// outside the configured rectangle.
    pub fn encode(&self, latitude: f64, longitude: f64) -> Result<GridReference> {
        if !self.bounds.contains(latitude, longitude) {
            return Err(GridpostError::OutOfBounds {
                latitude,
                longitude,
            });
        }

        let cells = f64::from(self.cells);
        let lat_cell = ((latitude - self.bounds.south) / self.bounds.lat_span() * cells).floor();
        let lon_cell = ((longitude - self.bounds.west) / self.bounds.lon_span() * cells).floor();

        Ok(GridReference {
            lat_cell: (lat_cell as u32).min(self.cells - 1),
            lon_cell: (lon_cell as u32).min(self.cells - 1),
            width: self.width,
        })
    }

    /// Recover the lower-left corner of a reference's cell.
    ///
    /// This is the inverse affine mapping of [`GridCodec::encode`] applied
    /// to the cell index, not to the original coordinate: the round trip is
    /// lossy and bounded by one cell width per axis.
    ///
    /// # Errors
    ///
    /// Returns [`GridpostError::InvalidInput`] when the reference width
    /// does not match this codec or a cell index is outside the grid.
    pub fn decode(&self, reference: &GridReference) -> Result<Coordinates> {
        if reference.width != self.width {
            return Err(GridpostError::InvalidInput(format!(
                "grid reference width {} does not match codec width {}",
                reference.width, self.width
            )));
        }
        if reference.lat_cell >= self.cells || reference.lon_cell >= self.cells {
            return Err(GridpostError::InvalidInput(format!(
                "grid reference '{reference}' is outside the {}-cell grid",
                self.cells
            )));
        }

        let cells = f64::from(self.cells);
        Ok(Coordinates {
            latitude: self.bounds.south
                + self.bounds.lat_span() * f64::from(reference.lat_cell) / cells,
            longitude: self.bounds.west
                + self.bounds.lon_span() * f64::from(reference.lon_cell) / cells,
        })
    }
}

/// Number of decimal digits needed to render `value`.
fn decimal_width(value: u32) -> u8 {
    let mut width = 1u8;
    let mut rest = value / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_codec_produces_eight_digits() {
        let codec = GridCodec::ghana();
        for (lat, lon) in [
            (4.5, -3.5),
            (5.705, -0.20525),
            (11.2, 1.3),
            (8.0, 0.0),
        ] {
            let reference = codec.encode(lat, lon).expect("in bounds");
            let text = reference.to_string();
            assert_eq!(text.len(), 8, "reference '{text}' for ({lat}, {lon})");
            assert!(text.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn quantization_follows_the_affine_formula() {
        let codec = GridCodec::ghana();
        // (5.705 - 4.5) / 7 * 10000 = 1721.42..., mid-cell and safe to pin.
        let reference = codec.encode(5.705, -0.20525).expect("in bounds");
        assert_eq!(reference.lat_cell(), 1721);
        assert_eq!(reference.lon_cell(), 6589);
        assert_eq!(reference.to_string(), "17216589");
    }

    #[test]
    fn lower_left_origin_encodes_to_zero_cells() {
        let codec = GridCodec::ghana();
        let reference = codec.encode(4.5, -3.5).expect("in bounds");
        assert_eq!(reference.to_string(), "00000000");
    }

    #[test]
    fn upper_edge_clamps_into_the_last_cell() {
        let codec = GridCodec::ghana();

        let corner = codec.encode(11.5, 1.5).expect("upper edge is in bounds");
        assert_eq!(corner.to_string(), "99999999");

        let north_only = codec.encode(11.5, -0.2).expect("in bounds");
        assert_eq!(north_only.lat_cell(), 9999);

        let east_only = codec.encode(5.7, 1.5).expect("in bounds");
        assert_eq!(east_only.lon_cell(), 9999);
    }

    #[test]
    fn out_of_bounds_always_fails_never_clamps() {
        let codec = GridCodec::ghana();
        for (lat, lon) in [
            (11.500001, -0.2),
            (4.499999, -0.2),
            (5.7, 1.500001),
            (5.7, -3.500001),
            (50.0, 50.0),
        ] {
            match codec.encode(lat, lon) {
                Err(GridpostError::OutOfBounds { latitude, longitude }) => {
                    assert_eq!(latitude, lat);
                    assert_eq!(longitude, lon);
                }
                other => panic!("expected OutOfBounds for ({lat}, {lon}), got {other:?}"),
            }
        }
    }

    #[test]
    fn decode_recovers_the_cell_lower_left_corner() {
        let codec = GridCodec::ghana();
        let reference = GridReference::new(1721, 6589, 4).expect("valid");
        let corner = codec.decode(&reference).expect("valid");

        assert!((corner.latitude - 5.7047).abs() < 1e-9);
        assert!((corner.longitude - (-0.2055)).abs() < 1e-9);
    }

    #[test]
    fn round_trip_is_lossy_toward_the_lower_left() {
        let codec = GridCodec::ghana();
        let (cell_lat, cell_lon) = codec.cell_size();

        let mut lat = 4.5;
        while lat < 11.5 {
            let mut lon = -3.5;
            while lon < 1.5 {
                let reference = codec.encode(lat, lon).expect("in bounds");
                let corner = codec.decode(&reference).expect("valid reference");

                let lat_err = lat - corner.latitude;
                let lon_err = lon - corner.longitude;
                assert!(lat_err >= -1e-9, "decode must round down at ({lat}, {lon})");
                assert!(lon_err >= -1e-9, "decode must round down at ({lat}, {lon})");
                assert!(lat_err <= cell_lat + 1e-9, "error above one cell at ({lat}, {lon})");
                assert!(lon_err <= cell_lon + 1e-9, "error above one cell at ({lat}, {lon})");

                lon += 0.37;
            }
            lat += 0.53;
        }
    }

    #[test]
    fn decode_rejects_width_and_range_mismatches() {
        let codec = GridCodec::ghana();

        let wrong_width = GridReference::new(12, 34, 3).expect("valid");
        assert!(matches!(
            codec.decode(&wrong_width),
            Err(GridpostError::InvalidInput(_))
        ));

        // 5000 cells render at width 4 too, so a 4-digit index can still
        // fall outside the configured grid.
        let small = GridCodec::new(GridConfig::default().with_cells_per_axis(5000))
            .expect("valid config");
        assert_eq!(small.width(), 4);
        let out_of_range = GridReference::new(5000, 0, 4).expect("valid");
        assert!(matches!(
            small.decode(&out_of_range),
            Err(GridpostError::InvalidInput(_))
        ));
        let in_range = GridReference::new(4999, 4999, 4).expect("valid");
        small.decode(&in_range).expect("in range");
    }

    #[test]
    fn reference_parsing_is_strict() {
        let reference = GridReference::parse("17216589", 4).expect("valid");
        assert_eq!(reference.lat_cell(), 1721);
        assert_eq!(reference.lon_cell(), 6589);

        for bad in ["1721658", "172165891", "1721x589", "", "1721-6589"] {
            assert!(
                GridReference::parse(bad, 4).is_err(),
                "'{bad}' must be rejected"
            );
        }
    }

    #[test]
    fn derived_width_tracks_the_cell_count() {
        for (cells, width) in [(10u32, 1u8), (100, 2), (5000, 4), (10_000, 4), (100_000, 5)] {
            let codec = GridCodec::new(GridConfig::default().with_cells_per_axis(cells))
                .expect("valid config");
            assert_eq!(codec.width(), width, "cells = {cells}");
        }
    }
}
