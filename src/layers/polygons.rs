use crate::data::parcel::Parcel;
use crate::layers::{hash_f32, hash_f64, Highlight};
use crate::popup::ParcelPopup;
use crate::style::color::color_for_price;
use crate::surface::{BoundaryStyle, LayerHandle, RenderSurface, RenderedPolygon};
use crate::Result;
use fxhash::FxHasher;
use std::hash::Hasher;

/// Fill opacity for boundaries under active styling
const ACTIVE_FILL_OPACITY: f32 = 0.5;
/// Fill opacity for inactive boundaries
const INACTIVE_FILL_OPACITY: f32 = 0.3;
/// Stroke weight for boundaries under active styling
const ACTIVE_STROKE_WEIGHT: f32 = 3.0;
/// Stroke weight for inactive boundaries
const INACTIVE_STROKE_WEIGHT: f32 = 2.0;

/// Owns the polygon set handle; active only when the view calls for full
/// boundaries. Parcels without a usable boundary are omitted, not errors.
#[derive(Default)]
pub struct PolygonLayer {
    handle: Option<LayerHandle>,
    fingerprint: Option<u64>,
}

impl PolygonLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the live polygon set with one built from the given parcels.
    /// An unchanged input is a no-op; an empty input leaves no layer
    /// attached.
    pub fn sync<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        parcels: &[Parcel],
        highlight: &Highlight,
    ) -> Result<()> {
        let polygons = build_polygons(parcels, highlight);
        let fingerprint = fingerprint_polygons(&polygons);
        if self.fingerprint == Some(fingerprint) {
            return Ok(());
        }

        if let Some(old) = self.handle.take() {
            surface.detach_layer(old)?;
        }
        if !polygons.is_empty() {
            log::debug!("attaching polygon set ({} boundaries)", polygons.len());
            self.handle = Some(surface.attach_polygons(polygons)?);
        }
        self.fingerprint = Some(fingerprint);
        Ok(())
    }

    /// Disposes the live handle on teardown
    pub fn detach<S: RenderSurface>(&mut self, surface: &mut S) -> Result<()> {
        if let Some(handle) = self.handle.take() {
            log::debug!("detaching polygon set");
            surface.detach_layer(handle)?;
        }
        self.fingerprint = None;
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }
}

fn build_polygons(parcels: &[Parcel], highlight: &Highlight) -> Vec<RenderedPolygon> {
    parcels
        .iter()
        .filter_map(|parcel| {
            let ring = parcel.boundary.as_ref()?;
            if ring.len() < 3 {
                return None;
            }
            let is_active = highlight.is_active(&parcel.id);
            let tier_color = color_for_price(parcel.price_major());
            Some(RenderedPolygon {
                parcel: parcel.id.clone(),
                ring: ring.clone(),
                style: BoundaryStyle {
                    fill: tier_color,
                    fill_opacity: if is_active {
                        ACTIVE_FILL_OPACITY
                    } else {
                        INACTIVE_FILL_OPACITY
                    },
                    stroke: tier_color,
                    stroke_weight: if is_active {
                        ACTIVE_STROKE_WEIGHT
                    } else {
                        INACTIVE_STROKE_WEIGHT
                    },
                },
                popup: ParcelPopup::from_parcel(parcel),
            })
        })
        .collect()
}

fn fingerprint_polygons(polygons: &[RenderedPolygon]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_usize(polygons.len());
    for polygon in polygons {
        hasher.write(polygon.parcel.as_str().as_bytes());
        hasher.write_usize(polygon.ring.len());
        for vertex in &polygon.ring {
            hash_f64(&mut hasher, vertex.lat);
            hash_f64(&mut hasher, vertex.lng);
        }
        hash_f32(&mut hasher, polygon.style.fill_opacity);
        hash_f32(&mut hasher, polygon.style.stroke_weight);
        hasher.write_u8(polygon.style.fill.r);
        hasher.write_u8(polygon.style.fill.g);
        hasher.write_u8(polygon.style.fill.b);
    }
    hasher.finish()
}
