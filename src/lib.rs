//! # parcelmap
//!
//! A map rendering and view-state engine for land parcels offered for
//! fractional investment.
//!
//! The engine decides, for a given zoom level and toggle state, which
//! geometric representation to draw for each parcel (clustered markers,
//! filled boundaries, or a density overlay), encodes price and inventory
//! into marker styling, and drives camera and layer lifecycles over a
//! pluggable [`surface::RenderSurface`]. Tile fetching, gesture handling,
//! clustering, and heat-density math stay behind that trait.

pub mod camera;
pub mod core;
pub mod data;
pub mod engine;
pub mod guard;
pub mod layers;
pub mod mode;
pub mod popup;
pub mod style;
pub mod surface;

pub mod prelude;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    geo::{LatLng, LatLngBounds},
    viewport::ViewportState,
};

pub use camera::{CameraController, FlyToCommand, MapRemote};
pub use data::parcel::{Parcel, ParcelId};
pub use engine::{EngineCallbacks, MapInputs, ParcelMap, ViewInput};
pub use mode::RenderMode;
pub use popup::ParcelPopup;
pub use style::{
    color::{color_for_price, opacity_for_units, Color, PriceTier},
    icon::MarkerIcon,
};
pub use surface::{HeatSample, HeatStyle, LayerHandle, RenderSurface, SurfaceEvent};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = MapError;
