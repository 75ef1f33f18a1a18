//! Layer lifecycle managers.
//!
//! One manager per renderable layer (clustered markers, polygons, heat
//! density). Each owns a single optional surface handle and replaces it
//! dispose-old-then-create-new whenever its input set or mode changes, so a
//! stale handle is never left attached to the surface.

pub mod heat;
pub mod markers;
pub mod polygons;

use crate::data::parcel::ParcelId;
use std::hash::Hasher;

/// Which parcel ids currently receive active styling. Selected and hovered
/// parcels look identical; only the triggering condition differs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlight {
    pub active: Option<ParcelId>,
    pub hovered: Option<ParcelId>,
}

impl Highlight {
    pub fn new(active: Option<ParcelId>, hovered: Option<ParcelId>) -> Self {
        Self { active, hovered }
    }

    pub fn is_active(&self, id: &ParcelId) -> bool {
        self.active.as_ref() == Some(id) || self.hovered.as_ref() == Some(id)
    }
}

pub(crate) fn hash_f64(hasher: &mut impl Hasher, value: f64) {
    hasher.write_u64(value.to_bits());
}

pub(crate) fn hash_f32(hasher: &mut impl Hasher, value: f32) {
    hasher.write_u32(value.to_bits());
}
