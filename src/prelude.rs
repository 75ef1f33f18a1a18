//! Prelude module for common parcelmap types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use parcelmap::prelude::*;`

pub use crate::core::{
    constants::{FLY_TO_ZOOM, POLYGON_ZOOM_THRESHOLD},
    geo::{LatLng, LatLngBounds},
    viewport::ViewportState,
};

pub use crate::data::parcel::{Parcel, ParcelId};

pub use crate::engine::{EngineCallbacks, MapInputs, ParcelMap, ViewInput};

pub use crate::camera::{FlyToCommand, MapRemote};

pub use crate::layers::{
    heat::HeatLayer, markers::MarkerClusterLayer, polygons::PolygonLayer, Highlight,
};

pub use crate::mode::RenderMode;

pub use crate::style::{
    color::{color_for_price, opacity_for_units, Color, PriceTier},
    icon::MarkerIcon,
};

pub use crate::surface::{
    BoundaryStyle, HeatSample, HeatStyle, LayerHandle, RenderSurface, RenderedMarker,
    RenderedPolygon, SurfaceEvent,
};

pub use crate::popup::ParcelPopup;

pub use crate::guard::{GuardConfig, RouteDecision, Session};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
