//! The rendering-surface capability contract.
//!
//! The interactive map (tile fetching, gestures, projection math), the
//! marker-clustering algorithm, and the heat-density algorithm live behind
//! this trait. The engine only orchestrates: it attaches and detaches layer
//! payloads, issues camera commands, and listens to viewport signals.

use crate::core::geo::{LatLng, LatLngBounds};
use crate::data::parcel::ParcelId;
use crate::popup::ParcelPopup;
use crate::style::color::Color;
use crate::style::icon::MarkerIcon;
use crate::Result;
use crossbeam_channel::Receiver;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Opaque reference to a live rendering object (cluster group, polygon set,
/// heat layer). Issued by the surface, owned exclusively by one layer
/// manager, never shared with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerHandle(u64);

impl LayerHandle {
    /// Mints a handle from a surface-side id. Only surface implementations
    /// have a reason to call this.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn into_raw(self) -> u64 {
        self.0
    }
}

/// One point marker ready for the clustering collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedMarker {
    pub parcel: ParcelId,
    pub position: LatLng,
    pub icon: MarkerIcon,
    pub popup: ParcelPopup,
}

/// Stroke/fill styling for one parcel boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryStyle {
    pub fill: Color,
    pub fill_opacity: f32,
    pub stroke: Color,
    pub stroke_weight: f32,
}

/// One filled parcel boundary ready for the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPolygon {
    pub parcel: ParcelId,
    /// Open ring of boundary vertices (no implicit closing point)
    pub ring: Vec<LatLng>,
    pub style: BoundaryStyle,
    pub popup: ParcelPopup,
}

/// One weighted sample for the density overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatSample {
    pub position: LatLng,
    /// Weight in [0.1, 1.0]
    pub weight: f64,
}

/// Gradient stops from low to high density, cold to hot
static DEFAULT_HEAT_GRADIENT: Lazy<Vec<(f64, Color)>> = Lazy::new(|| {
    vec![
        (0.2, Color::rgb(0, 0, 255)),
        (0.4, Color::rgb(0, 255, 255)),
        (0.6, Color::rgb(0, 255, 0)),
        (0.8, Color::rgb(255, 255, 0)),
        (1.0, Color::rgb(255, 0, 0)),
    ]
});

/// Configuration handed to the heat-density collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatStyle {
    /// Radius of influence for each sample (in pixels)
    pub radius: f64,
    /// Blur factor for smoother appearance
    pub blur: f64,
    /// Gradient stops from low to high density
    pub gradient: Vec<(f64, Color)>,
}

impl Default for HeatStyle {
    fn default() -> Self {
        Self {
            radius: 25.0,
            blur: 15.0,
            gradient: DEFAULT_HEAT_GRADIENT.clone(),
        }
    }
}

/// Viewport signals emitted by the surface's native event loop
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// Zoom animation settled at a new level
    ZoomEnd { zoom: f64 },
    /// Pan/zoom finished; the visible window moved
    MoveEnd {
        center: LatLng,
        bounds: LatLngBounds,
    },
}

/// Black-box rendering surface capability.
///
/// Exactly one engine instance owns a surface for its lifetime. Layer
/// attachment returns an opaque handle; detaching an unknown handle is a
/// surface-side error. Camera commands are serialized by the surface, so
/// re-issuing one simply supersedes the previous (last-write-wins).
pub trait RenderSurface {
    /// Hands a marker set to the clustering collaborator
    fn attach_marker_cluster(&mut self, markers: Vec<RenderedMarker>) -> Result<LayerHandle>;

    /// Draws a set of filled parcel boundaries
    fn attach_polygons(&mut self, polygons: Vec<RenderedPolygon>) -> Result<LayerHandle>;

    /// Hands weighted samples to the heat-density collaborator
    fn attach_heat_layer(&mut self, samples: Vec<HeatSample>, style: &HeatStyle)
        -> Result<LayerHandle>;

    /// Removes a live layer from the surface
    fn detach_layer(&mut self, handle: LayerHandle) -> Result<()>;

    /// Animates the camera to center on a target at the given zoom
    fn fly_to(&mut self, target: LatLng, zoom: f64, duration: Duration);

    /// Adjusts the camera to frame the bounds with the given padding
    fn fit_bounds(&mut self, bounds: LatLngBounds, padding: f64);

    /// Asks the surface to recompute its internal dimensions
    fn invalidate_size(&mut self);

    /// Current zoom level
    fn zoom(&self) -> f64;

    /// Currently visible geographic window
    fn visible_bounds(&self) -> LatLngBounds;

    /// Subscribes to the surface's native viewport signals
    fn events(&self) -> Receiver<SurfaceEvent>;
}
