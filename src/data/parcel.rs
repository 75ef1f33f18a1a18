use crate::core::constants::{
    HEAT_WEIGHT_DEFAULT, HEAT_WEIGHT_MAX, HEAT_WEIGHT_MIN, MINOR_UNITS_PER_MAJOR,
};
use crate::core::geo::LatLng;
use geo::Centroid;
use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a land parcel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParcelId(pub String);

impl ParcelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParcelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ParcelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single land offering: the unit of investment and the unit of rendering.
///
/// Prices are stored in the minor currency unit (kobo) and must be divided
/// by 100 before any tier comparison or display. A parcel may carry a point
/// position, a polygon boundary, or both; one with neither cannot be
/// rendered and is expected to be filtered out upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub id: ParcelId,
    pub title: String,
    pub location: String,
    /// Point position in decimal degrees; absent for polygon-only parcels
    pub position: Option<LatLng>,
    /// Unit price in minor currency units
    pub price_minor: i64,
    /// Number of units still available for investment
    pub units_available: u32,
    /// Ordered boundary vertices (open ring, no implicit closing point)
    pub boundary: Option<Vec<LatLng>>,
    /// Relative demand weight in [0, 1] for the density layer
    pub heat_intensity: Option<f64>,
}

impl Parcel {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        location: impl Into<String>,
        price_minor: i64,
        units_available: u32,
    ) -> Self {
        Self {
            id: ParcelId::new(id),
            title: title.into(),
            location: location.into(),
            position: None,
            price_minor,
            units_available,
            boundary: None,
            heat_intensity: None,
        }
    }

    pub fn with_position(mut self, position: LatLng) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_boundary(mut self, boundary: Vec<LatLng>) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn with_heat_intensity(mut self, intensity: f64) -> Self {
        self.heat_intensity = Some(intensity);
        self
    }

    /// Unit price in major currency units, the basis for tier comparisons
    pub fn price_major(&self) -> f64 {
        self.price_minor as f64 / MINOR_UNITS_PER_MAJOR as f64
    }

    /// The coordinate this parcel is represented by when drawn as a point:
    /// its explicit position if present, otherwise its boundary centroid.
    /// `None` means the parcel has no renderable point representation.
    pub fn representative_point(&self) -> Option<LatLng> {
        if let Some(position) = self.position {
            return Some(position);
        }
        let boundary = self.boundary.as_ref()?;
        if boundary.len() < 3 {
            return None;
        }
        let ring: Vec<geo_types::Coord<f64>> =
            boundary.iter().map(|vertex| vertex.to_coord()).collect();
        let polygon = geo_types::Polygon::new(geo_types::LineString::from(ring), Vec::new());
        polygon.centroid().map(LatLng::from_point)
    }

    /// Density weight for the heat layer, clamped so every parcel leaves a
    /// visible footprint
    pub fn heat_weight(&self) -> f64 {
        self.heat_intensity
            .unwrap_or(HEAT_WEIGHT_DEFAULT)
            .clamp(HEAT_WEIGHT_MIN, HEAT_WEIGHT_MAX)
    }

    /// Whether the parcel has any coordinate the engine can render
    pub fn has_coordinates(&self) -> bool {
        self.position.is_some() || self.boundary.as_ref().is_some_and(|ring| ring.len() >= 3)
    }
}
