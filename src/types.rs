//! Configuration and result types for gridpost.
//!
//! This module provides the serializable configuration consumed by the grid
//! codec and the externally visible result records produced by the resolver.

use crate::error::{GridpostError, Result};
use serde::{Deserialize, Serialize};

/// Geographic bounding rectangle in WGS84 decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Northern latitude limit (inclusive).
    pub north: f64,
    /// Southern latitude limit (inclusive).
    pub south: f64,
    /// Eastern longitude limit (inclusive).
    pub east: f64,
    /// Western longitude limit (inclusive).
    pub west: f64,
}

impl Bounds {
    /// Bounding rectangle covering Ghana.
    pub const fn ghana() -> Self {
        Self {
            north: 11.5,
            south: 4.5,
            east: 1.5,
            west: -3.5,
        }
    }

    /// Whether a coordinate lies within the rectangle (limits inclusive).
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.south
            && latitude <= self.north
            && longitude >= self.west
            && longitude <= self.east
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude extent in degrees.
    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }

    /// Validate the rectangle.
    pub fn validate(&self) -> Result<()> {
        if ![self.north, self.south, self.east, self.west]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(GridpostError::InvalidInput(
                "bounds must be finite".to_string(),
            ));
        }
        if self.north <= self.south {
            return Err(GridpostError::InvalidInput(format!(
                "north ({}) must be greater than south ({})",
                self.north, self.south
            )));
        }
        if self.east <= self.west {
            return Err(GridpostError::InvalidInput(format!(
                "east ({}) must be greater than west ({})",
                self.east, self.west
            )));
        }
        Ok(())
    }
}

/// Grid codec configuration.
///
/// Designed to be easily loadable from JSON while keeping complexity
/// minimal; missing fields fall back to the canonical Ghana deployment.
///
/// # Example
///
/// ```rust
/// use gridpost::GridConfig;
///
/// let config = GridConfig::from_json(r#"{ "cells_per_axis": 5000 }"#).unwrap();
/// assert_eq!(config.cells_per_axis, 5000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Bounding rectangle the grid subdivides.
    #[serde(default = "GridConfig::default_bounds")]
    pub bounds: Bounds,

    /// Number of cells per axis the rectangle is subdivided into.
    #[serde(default = "GridConfig::default_cells_per_axis")]
    pub cells_per_axis: u32,
}

impl GridConfig {
    const fn default_bounds() -> Bounds {
        Bounds::ghana()
    }

    const fn default_cells_per_axis() -> u32 {
        10_000
    }

    /// The canonical deployment: Ghana bounds with 10 000 cells per axis,
    /// giving 4-digit cell indices and 8-digit grid references.
    pub fn ghana() -> Self {
        Self::default()
    }

    /// Replace the bounding rectangle.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Replace the per-axis cell count.
    pub fn with_cells_per_axis(mut self, cells_per_axis: u32) -> Self {
        self.cells_per_axis = cells_per_axis;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;
        if !(10..=100_000).contains(&self.cells_per_axis) {
            return Err(GridpostError::InvalidInput(format!(
                "cells_per_axis must be between 10 and 100000, got {}",
                self.cells_per_axis
            )));
        }
        Ok(())
    }

    /// Load configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| GridpostError::InvalidInput(format!("invalid grid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GridpostError::InvalidInput(format!("failed to serialize config: {e}")))
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            bounds: Self::default_bounds(),
            cells_per_axis: Self::default_cells_per_axis(),
        }
    }
}

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Result of resolving a coordinate to a digital address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAddress {
    /// Canonical digital address, e.g. `GA-1721-6589`.
    pub address: String,
    pub district_code: String,
    pub district_name: String,
    pub region_name: String,
    /// The queried coordinate, echoed back.
    pub coordinates: Coordinates,
}

/// Result of locating a digital address.
///
/// `coordinates` is the lower-left corner of the encoded grid cell, not the
/// coordinate the address was generated from; `approximated` is always set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatedAddress {
    pub district_name: String,
    pub region_name: String,
    pub coordinates: Coordinates,
    pub approximated: bool,
}
