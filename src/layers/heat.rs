use crate::data::parcel::Parcel;
use crate::layers::hash_f64;
use crate::surface::{HeatSample, HeatStyle, LayerHandle, RenderSurface};
use crate::Result;
use fxhash::FxHasher;
use std::hash::Hasher;

/// Owns the heat-density layer handle; active only when the heatmap toggle
/// is on.
///
/// Consumes every coordinate-bearing parcel, weighted by its clamped heat
/// intensity. On every input change the existing layer is disposed first;
/// an empty input leaves no heat layer at all.
pub struct HeatLayer {
    style: HeatStyle,
    handle: Option<LayerHandle>,
    fingerprint: Option<u64>,
}

impl HeatLayer {
    pub fn new() -> Self {
        Self::with_style(HeatStyle::default())
    }

    pub fn with_style(style: HeatStyle) -> Self {
        Self {
            style,
            handle: None,
            fingerprint: None,
        }
    }

    pub fn style(&self) -> &HeatStyle {
        &self.style
    }

    /// Replaces the live heat layer with one built from the given parcels
    pub fn sync<S: RenderSurface>(&mut self, surface: &mut S, parcels: &[Parcel]) -> Result<()> {
        let samples = build_samples(parcels);
        let fingerprint = fingerprint_samples(&samples);
        if self.fingerprint == Some(fingerprint) {
            return Ok(());
        }

        if let Some(old) = self.handle.take() {
            surface.detach_layer(old)?;
        }
        if !samples.is_empty() {
            log::debug!("attaching heat layer ({} samples)", samples.len());
            self.handle = Some(surface.attach_heat_layer(samples, &self.style)?);
        }
        self.fingerprint = Some(fingerprint);
        Ok(())
    }

    /// Disposes the live handle on teardown
    pub fn detach<S: RenderSurface>(&mut self, surface: &mut S) -> Result<()> {
        if let Some(handle) = self.handle.take() {
            log::debug!("detaching heat layer");
            surface.detach_layer(handle)?;
        }
        self.fingerprint = None;
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }
}

impl Default for HeatLayer {
    fn default() -> Self {
        Self::new()
    }
}

fn build_samples(parcels: &[Parcel]) -> Vec<HeatSample> {
    parcels
        .iter()
        .filter_map(|parcel| {
            Some(HeatSample {
                position: parcel.representative_point()?,
                weight: parcel.heat_weight(),
            })
        })
        .collect()
}

fn fingerprint_samples(samples: &[HeatSample]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_usize(samples.len());
    for sample in samples {
        hash_f64(&mut hasher, sample.position.lat);
        hash_f64(&mut hasher, sample.position.lng);
        hash_f64(&mut hasher, sample.weight);
    }
    hasher.finish()
}
