//! District boundary polygons and their GeoJSON-style ingest.
//!
//! The boundary dataset is supplied by a collaborator as an
//! already-deserialized feature collection; this module turns features into
//! validated [`BoundaryPolygon`] values ready for index construction.

use crate::error::{GridpostError, Result};
use crate::geometry::Ring;
use geo::Coord;
use geojson::{Feature, FeatureCollection, GeoJson, Value};

/// One administrative district's shape and identifying metadata.
///
/// Parts are independent solid rings (see [`crate::geometry`]); they are
/// validated at construction and immutable afterwards.
#[derive(Debug, Clone)]
pub struct BoundaryPolygon {
    pub district_code: String,
    pub district_name: String,
    pub region_code: String,
    pub region_name: String,
    parts: Vec<Ring>,
}

impl BoundaryPolygon {
    /// Build a validated boundary polygon.
    ///
    /// # Errors
    ///
    /// Returns [`GridpostError::InvalidBoundaryData`] when the district code
    /// is empty, there are no rings, a ring has fewer than 3 distinct
    /// positions, or any coordinate is non-finite.
    pub fn new(
        district_code: impl Into<String>,
        district_name: impl Into<String>,
        region_code: impl Into<String>,
        region_name: impl Into<String>,
        parts: Vec<Ring>,
    ) -> Result<Self> {
        let district_code = district_code.into();
        if district_code.is_empty() {
            return Err(GridpostError::InvalidBoundaryData(
                "boundary feature has an empty district code".to_string(),
            ));
        }

        let parts = normalize_parts(&district_code, parts)?;

        Ok(Self {
            district_code,
            district_name: district_name.into(),
            region_code: region_code.into(),
            region_name: region_name.into(),
            parts,
        })
    }

    /// The validated rings making up this boundary.
    pub fn parts(&self) -> &[Ring] {
        &self.parts
    }

    /// Build a boundary polygon from a GeoJSON-like feature.
    ///
    /// The feature must carry `districtCode`, `districtName`, `regionCode`
    /// and `regionName` string properties and a `Polygon` or `MultiPolygon`
    /// geometry. Every ring becomes an independent solid part.
    pub fn from_feature(feature: &Feature) -> Result<Self> {
        let district_code = require_property(feature, "districtCode")?;
        let district_name = require_property(feature, "districtName")?;
        let region_code = require_property(feature, "regionCode")?;
        let region_name = require_property(feature, "regionName")?;

        let geometry = feature.geometry.as_ref().ok_or_else(|| {
            GridpostError::InvalidBoundaryData(format!(
                "boundary feature '{district_code}' has no geometry"
            ))
        })?;
        let parts = rings_from_geometry(&district_code, &geometry.value)?;

        Self::new(district_code, district_name, region_code, region_name, parts)
    }
}

fn require_property(feature: &Feature, key: &str) -> Result<String> {
    feature
        .properties
        .as_ref()
        .and_then(|properties| properties.get(key))
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            GridpostError::InvalidBoundaryData(format!(
                "boundary feature is missing the '{key}' property"
            ))
        })
}

fn rings_from_geometry(district_code: &str, value: &Value) -> Result<Vec<Ring>> {
    match value {
        Value::Polygon(rings) => rings
            .iter()
            .map(|ring| ring_from_positions(district_code, ring))
            .collect(),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .flatten()
            .map(|ring| ring_from_positions(district_code, ring))
            .collect(),
        other => Err(GridpostError::InvalidBoundaryData(format!(
            "boundary feature '{district_code}' has unsupported geometry type '{}'",
            geometry_type_name(other)
        ))),
    }
}

fn geometry_type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn ring_from_positions(district_code: &str, positions: &[Vec<f64>]) -> Result<Ring> {
    positions
        .iter()
        .map(|position| {
            if position.len() < 2 {
                return Err(GridpostError::InvalidBoundaryData(format!(
                    "boundary feature '{district_code}' has a position with fewer than 2 values"
                )));
            }
            Ok(Coord {
                x: position[0],
                y: position[1],
            })
        })
        .collect()
}

/// Drop literal closing duplicates and validate ring structure.
fn normalize_parts(district_code: &str, parts: Vec<Ring>) -> Result<Vec<Ring>> {
    if parts.is_empty() {
        return Err(GridpostError::InvalidBoundaryData(format!(
            "boundary '{district_code}' has no rings"
        )));
    }

    let mut normalized = Vec::with_capacity(parts.len());
    for mut ring in parts {
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(GridpostError::InvalidBoundaryData(format!(
                "boundary '{district_code}' has a ring with {} positions (minimum 3)",
                ring.len()
            )));
        }
        if ring.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(GridpostError::InvalidBoundaryData(format!(
                "boundary '{district_code}' contains a non-finite coordinate"
            )));
        }
        normalized.push(ring);
    }
    Ok(normalized)
}

/// Convert a feature collection into validated boundary polygons.
///
/// Any malformed feature fails the whole ingest: a partially loaded
/// boundary set must never reach the spatial index.
pub fn boundaries_from_feature_collection(
    collection: &FeatureCollection,
) -> Result<Vec<BoundaryPolygon>> {
    let boundaries = collection
        .features
        .iter()
        .map(BoundaryPolygon::from_feature)
        .collect::<Result<Vec<_>>>()?;
    log::debug!("parsed {} boundary features", boundaries.len());
    Ok(boundaries)
}

/// Parse a GeoJSON feature-collection string into boundary polygons.
///
/// Convenience for fixtures and embedded datasets; production callers
/// usually hold an already-deserialized [`FeatureCollection`].
pub fn boundaries_from_json_str(json: &str) -> Result<Vec<BoundaryPolygon>> {
    let geojson: GeoJson = json.parse().map_err(|e| {
        GridpostError::InvalidBoundaryData(format!("failed to parse boundary collection: {e}"))
    })?;
    match geojson {
        GeoJson::FeatureCollection(collection) => boundaries_from_feature_collection(&collection),
        _ => Err(GridpostError::InvalidBoundaryData(
            "boundary dataset must be a FeatureCollection".to_string(),
        )),
    }
}
