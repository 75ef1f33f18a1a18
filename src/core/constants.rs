//! Engine-wide constants derived from the product's map conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

use std::time::Duration;

/// Zoom level at which polygon-bearing parcels switch from clustered
/// centroid markers to full filled boundaries. Below it, individual
/// boundaries are illegible and clustering keeps the map readable.
pub const POLYGON_ZOOM_THRESHOLD: f64 = 12.0;

/// Zoom level the camera settles at when flying to a selected parcel.
pub const FLY_TO_ZOOM: f64 = 16.0;

/// Duration of the fly-to camera animation.
pub const FLY_TO_DURATION: Duration = Duration::from_millis(1200);

/// Padding (in CSS pixels) applied when framing the full parcel set.
pub const FIT_BOUNDS_PADDING: f64 = 50.0;

/// How long to wait after a layout-affecting change before asking the
/// surface to recompute its dimensions (lets CSS transitions finish).
pub const RESIZE_SETTLE: Duration = Duration::from_millis(300);

/// Marker icon size in logical pixels.
pub const MARKER_ICON_SIZE: (u32, u32) = (36, 36);

/// Anchor inside the icon (hot-spot), bottom-center.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (18, 36);

/// Diameter of the tier-colored circle inside the marker icon.
pub const MARKER_CIRCLE_SIZE: u32 = 20;

/// Minor currency units per major unit (kobo per naira).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Currency symbol used in price displays.
pub const CURRENCY_SYMBOL: &str = "\u{20a6}";

/// Heat sample weights are clamped to this range so every parcel leaves
/// a visible footprint in the density layer.
pub const HEAT_WEIGHT_MIN: f64 = 0.1;
pub const HEAT_WEIGHT_MAX: f64 = 1.0;

/// Weight assigned to parcels that carry no heat intensity of their own.
pub const HEAT_WEIGHT_DEFAULT: f64 = 0.5;
