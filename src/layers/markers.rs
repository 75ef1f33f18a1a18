use crate::data::parcel::Parcel;
use crate::layers::{hash_f32, hash_f64, Highlight};
use crate::popup::ParcelPopup;
use crate::style::icon::MarkerIcon;
use crate::surface::{LayerHandle, RenderSurface, RenderedMarker};
use crate::Result;
use fxhash::{FxHashSet, FxHasher};
use std::hash::Hasher;

/// Owns the clustering collaborator's group handle.
///
/// Receives the point-bearing parcel set plus, at low zoom, the
/// polygon-bearing parcels' representative points. Parcels without a usable
/// point are omitted, not errors.
#[derive(Default)]
pub struct MarkerClusterLayer {
    handle: Option<LayerHandle>,
    fingerprint: Option<u64>,
}

impl MarkerClusterLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the live cluster group with one built from the given
    /// parcels. An unchanged input is a no-op; an empty input leaves no
    /// layer attached.
    pub fn sync<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        point_parcels: &[Parcel],
        centroid_parcels: &[Parcel],
        highlight: &Highlight,
    ) -> Result<()> {
        let markers = build_markers(point_parcels, centroid_parcels, highlight);
        let fingerprint = fingerprint_markers(&markers);
        if self.fingerprint == Some(fingerprint) {
            return Ok(());
        }

        if let Some(old) = self.handle.take() {
            surface.detach_layer(old)?;
        }
        if !markers.is_empty() {
            log::debug!("attaching marker cluster ({} markers)", markers.len());
            self.handle = Some(surface.attach_marker_cluster(markers)?);
        }
        self.fingerprint = Some(fingerprint);
        Ok(())
    }

    /// Disposes the live handle on teardown
    pub fn detach<S: RenderSurface>(&mut self, surface: &mut S) -> Result<()> {
        if let Some(handle) = self.handle.take() {
            log::debug!("detaching marker cluster");
            surface.detach_layer(handle)?;
        }
        self.fingerprint = None;
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }
}

fn build_markers(
    point_parcels: &[Parcel],
    centroid_parcels: &[Parcel],
    highlight: &Highlight,
) -> Vec<RenderedMarker> {
    // a parcel carrying both a position and a boundary appears in both input
    // sets; render it once, point representation first
    let mut seen = FxHashSet::default();
    point_parcels
        .iter()
        .chain(centroid_parcels.iter())
        .filter(|parcel| seen.insert(parcel.id.clone()))
        .filter_map(|parcel| {
            let position = parcel.representative_point()?;
            Some(RenderedMarker {
                parcel: parcel.id.clone(),
                position,
                icon: MarkerIcon::build(
                    parcel.price_minor,
                    parcel.units_available,
                    highlight.is_active(&parcel.id),
                ),
                popup: ParcelPopup::from_parcel(parcel),
            })
        })
        .collect()
}

fn fingerprint_markers(markers: &[RenderedMarker]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_usize(markers.len());
    for marker in markers {
        hasher.write(marker.parcel.as_str().as_bytes());
        hash_f64(&mut hasher, marker.position.lat);
        hash_f64(&mut hasher, marker.position.lng);
        hasher.write_u8(marker.icon.pulse as u8);
        hash_f32(&mut hasher, marker.icon.fill_opacity);
        hasher.write_u8(marker.icon.fill.r);
        hasher.write_u8(marker.icon.fill.g);
        hasher.write_u8(marker.icon.fill.b);
        hasher.write_u32(marker.popup.units_available);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::surface::testing::RecordingSurface;

    fn point_parcel(id: &str, lat: f64, lng: f64) -> Parcel {
        Parcel::new(id, format!("Parcel {id}"), "Epe, Lagos", 150_000, 60)
            .with_position(LatLng::new(lat, lng))
    }

    fn polygon_parcel(id: &str) -> Parcel {
        Parcel::new(id, format!("Parcel {id}"), "Ibeju-Lekki", 600_000, 5).with_boundary(vec![
            LatLng::new(6.0, 3.0),
            LatLng::new(6.0, 3.2),
            LatLng::new(6.2, 3.2),
            LatLng::new(6.2, 3.0),
        ])
    }

    #[test]
    fn test_attaches_points_and_centroids() {
        let mut surface = RecordingSurface::new(10.0);
        let mut layer = MarkerClusterLayer::new();
        let points = vec![point_parcel("a", 6.5, 3.4)];
        let polys = vec![polygon_parcel("b")];

        layer
            .sync(&mut surface, &points, &polys, &Highlight::default())
            .unwrap();

        assert!(layer.is_attached());
        let markers = surface.markers.values().next().unwrap();
        assert_eq!(markers.len(), 2);
        // the polygon parcel rides along as its centroid
        let centroid = &markers[1];
        assert_eq!(centroid.parcel.as_str(), "b");
        assert!((centroid.position.lat - 6.1).abs() < 1e-9);
    }

    #[test]
    fn test_unchanged_input_is_noop() {
        let mut surface = RecordingSurface::new(10.0);
        let mut layer = MarkerClusterLayer::new();
        let points = vec![point_parcel("a", 6.5, 3.4)];

        layer
            .sync(&mut surface, &points, &[], &Highlight::default())
            .unwrap();
        let attach_calls = surface.attach_calls;
        layer
            .sync(&mut surface, &points, &[], &Highlight::default())
            .unwrap();

        assert_eq!(surface.attach_calls, attach_calls);
        assert_eq!(surface.detach_calls, 0);
    }

    #[test]
    fn test_highlight_change_replaces_layer() {
        let mut surface = RecordingSurface::new(10.0);
        let mut layer = MarkerClusterLayer::new();
        let points = vec![point_parcel("a", 6.5, 3.4)];

        layer
            .sync(&mut surface, &points, &[], &Highlight::default())
            .unwrap();
        let highlight = Highlight::new(Some("a".into()), None);
        layer.sync(&mut surface, &points, &[], &highlight).unwrap();

        assert_eq!(surface.detach_calls, 1);
        let markers = surface.markers.values().next().unwrap();
        assert!(markers[0].icon.pulse);
    }

    #[test]
    fn test_hovered_matches_active_styling() {
        let highlight = Highlight::new(None, Some("a".into()));
        let markers = build_markers(&[point_parcel("a", 6.5, 3.4)], &[], &highlight);
        assert!(markers[0].icon.pulse);
    }

    #[test]
    fn test_dual_geometry_parcel_renders_once() {
        let parcel = point_parcel("a", 6.5, 3.4).with_boundary(vec![
            LatLng::new(6.0, 3.0),
            LatLng::new(6.0, 3.2),
            LatLng::new(6.2, 3.2),
            LatLng::new(6.2, 3.0),
        ]);
        let markers = build_markers(
            std::slice::from_ref(&parcel),
            std::slice::from_ref(&parcel),
            &Highlight::default(),
        );
        assert_eq!(markers.len(), 1);
        // the point representation wins over the centroid
        assert_eq!(markers[0].position, LatLng::new(6.5, 3.4));
    }

    #[test]
    fn test_empty_input_leaves_no_live_handle() {
        let mut surface = RecordingSurface::new(10.0);
        let mut layer = MarkerClusterLayer::new();
        let points = vec![point_parcel("a", 6.5, 3.4)];

        layer
            .sync(&mut surface, &points, &[], &Highlight::default())
            .unwrap();
        layer
            .sync(&mut surface, &[], &[], &Highlight::default())
            .unwrap();

        assert!(!layer.is_attached());
        assert_eq!(surface.live_layers(), 0);
    }

    #[test]
    fn test_detach_disposes_handle() {
        let mut surface = RecordingSurface::new(10.0);
        let mut layer = MarkerClusterLayer::new();
        layer
            .sync(
                &mut surface,
                &[point_parcel("a", 6.5, 3.4)],
                &[],
                &Highlight::default(),
            )
            .unwrap();

        layer.detach(&mut surface).unwrap();
        assert_eq!(surface.live_layers(), 0);
        assert!(!layer.is_attached());
    }
}
