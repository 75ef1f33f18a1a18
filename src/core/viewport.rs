use crate::core::geo::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};

/// The engine's record of the current map view: center, zoom, and the
/// visible bounds last reported by the rendering surface.
///
/// The surface owns pan/zoom gestures; this state is seeded from it at
/// mount and kept current from its `ZoomEnd`/`MoveEnd` signals. The host
/// never writes zoom back in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// Visible bounds, absent until the surface reports them
    pub bounds: Option<LatLngBounds>,
}

impl ViewportState {
    /// Creates a viewport record at the given center and zoom
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            bounds: None,
        }
    }

    /// Applies a zoom change reported by the surface
    pub fn apply_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    /// Applies a move-end reported by the surface
    pub fn apply_move(&mut self, center: LatLng, bounds: LatLngBounds) {
        self.center = center;
        self.bounds = Some(bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_tracks_surface_reports() {
        let mut viewport = ViewportState::new(LatLng::new(6.5, 3.4), 10.0);
        assert!(viewport.bounds.is_none());

        viewport.apply_zoom(13.5);
        assert_eq!(viewport.zoom, 13.5);

        let bounds = LatLngBounds::from_coords(6.0, 3.0, 7.0, 4.0);
        viewport.apply_move(bounds.center(), bounds.clone());
        assert_eq!(viewport.center, LatLng::new(6.5, 3.5));
        assert_eq!(viewport.bounds, Some(bounds));
    }
}
