use crate::core::constants::{
    MARKER_CIRCLE_SIZE, MARKER_ICON_ANCHOR, MARKER_ICON_SIZE, MINOR_UNITS_PER_MAJOR,
};
use crate::style::color::{opacity_for_units, Color, PriceTier};
use serde::{Deserialize, Serialize};

/// Path of the bundled placeholder used when an auxiliary image asset is
/// missing or fails to load.
pub const PLACEHOLDER_ASSET: &str = "/assets/placeholder-land.png";

/// Resolves an optional asset reference, falling back to the placeholder
/// rather than leaving a broken visual state
pub fn resolve_asset(primary: Option<&str>) -> &str {
    match primary {
        Some(url) if !url.is_empty() => url,
        _ => PLACEHOLDER_ASSET,
    }
}

/// Renderable marker icon descriptor.
///
/// Fixed-size, anchored bottom-center: an inner circle filled with the
/// parcel's tier color at its inventory opacity, with a contrast border.
/// Active markers (selected or hovered, visually identical) layer an
/// animated pulse ring behind the circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerIcon {
    /// Icon size in logical pixels
    pub size: (u32, u32),
    /// Hot-spot inside the icon
    pub anchor: (u32, u32),
    /// Diameter of the inner circle
    pub circle_size: u32,
    /// Tier color filling the circle
    pub fill: Color,
    /// Inventory-derived fill opacity
    pub fill_opacity: f32,
    /// Contrast border around the circle
    pub border: Color,
    /// Whether the animated pulse ring is layered behind the circle
    pub pulse: bool,
}

impl MarkerIcon {
    /// Builds the icon for a parcel from its raw listing fields.
    ///
    /// `price_minor` is in minor currency units and is converted to major
    /// units before the tier lookup. Total over all inputs; there is no
    /// error case.
    pub fn build(price_minor: i64, units: u32, is_active: bool) -> Self {
        let price_major = price_minor as f64 / MINOR_UNITS_PER_MAJOR as f64;
        let tier = PriceTier::for_price(price_major);
        Self {
            size: MARKER_ICON_SIZE,
            anchor: MARKER_ICON_ANCHOR,
            circle_size: MARKER_CIRCLE_SIZE,
            fill: tier.color(),
            fill_opacity: opacity_for_units(units),
            border: Color::rgb(255, 255, 255),
            pulse: is_active,
        }
    }

    /// Options payload handed to HTML/JS-backed surfaces
    pub fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "iconSize": [self.size.0, self.size.1],
            "iconAnchor": [self.anchor.0, self.anchor.1],
            "circleSize": self.circle_size,
            "fillColor": self.fill.to_hex(),
            "fillOpacity": self.fill_opacity,
            "borderColor": self.border.to_hex(),
            "pulse": self.pulse,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::color::{TIER_GREEN, TIER_RED};

    #[test]
    fn test_icon_converts_minor_units_before_tier_lookup() {
        // 150_000 kobo is 1_500 naira: affordable, not premium
        let icon = MarkerIcon::build(150_000, 60, false);
        assert_eq!(icon.fill, TIER_GREEN);
        assert_eq!(icon.fill_opacity, 1.0);

        let icon = MarkerIcon::build(600_000, 5, false);
        assert_eq!(icon.fill, TIER_RED);
        assert_eq!(icon.fill_opacity, 0.6);
    }

    #[test]
    fn test_icon_geometry_is_fixed() {
        let icon = MarkerIcon::build(0, 0, false);
        assert_eq!(icon.size, (36, 36));
        assert_eq!(icon.anchor, (18, 36));
        assert_eq!(icon.circle_size, 20);
    }

    #[test]
    fn test_active_icon_pulses() {
        assert!(MarkerIcon::build(150_000, 60, true).pulse);
        assert!(!MarkerIcon::build(150_000, 60, false).pulse);
    }

    #[test]
    fn test_options_payload() {
        let options = MarkerIcon::build(150_000, 60, true).options();
        assert_eq!(options["iconSize"], serde_json::json!([36, 36]));
        assert_eq!(options["fillColor"], "#22c55e");
        assert_eq!(options["pulse"], true);
    }

    #[test]
    fn test_asset_fallback() {
        assert_eq!(resolve_asset(Some("/assets/site.png")), "/assets/site.png");
        assert_eq!(resolve_asset(Some("")), PLACEHOLDER_ASSET);
        assert_eq!(resolve_asset(None), PLACEHOLDER_ASSET);
    }
}
