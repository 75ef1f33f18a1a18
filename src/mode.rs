use crate::core::constants::POLYGON_ZOOM_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Which geometric representation the current view calls for.
///
/// Derived on every render pass from the heatmap toggle and the current
/// zoom; never stored, so there is no stale-mode state to invalidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderMode {
    /// Point-bearing parcels cluster; polygon-bearing parcels render as
    /// clustered centroid markers (many small polygons at low zoom are
    /// visually noisy and expensive)
    ClusteredMarkers,
    /// Point-bearing parcels still cluster; polygon-bearing parcels render
    /// as full filled boundaries
    Polygons,
    /// Continuous density overlay; suppresses all marker and polygon
    /// rendering
    Heatmap,
}

impl RenderMode {
    /// Chooses the rendering strategy for the current toggle state and zoom
    pub fn select(heatmap_enabled: bool, zoom: f64) -> Self {
        if heatmap_enabled {
            RenderMode::Heatmap
        } else if zoom < POLYGON_ZOOM_THRESHOLD {
            RenderMode::ClusteredMarkers
        } else {
            RenderMode::Polygons
        }
    }

    /// Whether clustered point markers are drawn at all in this mode
    pub fn draws_markers(self) -> bool {
        !matches!(self, RenderMode::Heatmap)
    }

    /// Whether polygon-bearing parcels join the cluster as centroid markers
    pub fn clusters_polygon_centroids(self) -> bool {
        matches!(self, RenderMode::ClusteredMarkers)
    }

    /// Whether polygon-bearing parcels render as full boundaries
    pub fn draws_polygons(self) -> bool {
        matches!(self, RenderMode::Polygons)
    }

    /// Whether the density overlay is drawn
    pub fn draws_heatmap(self) -> bool {
        matches!(self, RenderMode::Heatmap)
    }
}
