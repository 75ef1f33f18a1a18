use serde::{Deserialize, Serialize};

/// Plain rgba color carried in layer payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// CSS hex rendering (`#rrggbb`), the form surface payloads expect
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Tier color for affordable parcels
pub const TIER_GREEN: Color = Color {
    r: 34,
    g: 197,
    b: 94,
    a: 255,
};

/// Tier color for mid-priced parcels
pub const TIER_AMBER: Color = Color {
    r: 245,
    g: 158,
    b: 11,
    a: 255,
};

/// Tier color for premium parcels
pub const TIER_RED: Color = Color {
    r: 239,
    g: 68,
    b: 68,
    a: 255,
};

/// One of three price bands driving color encoding.
///
/// Boundaries are inclusive-low, exclusive-high; the premium tier is
/// unbounded above. Zero and negative prices land in the lowest tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    Affordable,
    Mid,
    Premium,
}

impl PriceTier {
    /// Classifies a price given in major currency units
    pub fn for_price(price_major: f64) -> Self {
        if price_major < 2000.0 {
            PriceTier::Affordable
        } else if price_major < 5000.0 {
            PriceTier::Mid
        } else {
            PriceTier::Premium
        }
    }

    pub fn color(self) -> Color {
        match self {
            PriceTier::Affordable => TIER_GREEN,
            PriceTier::Mid => TIER_AMBER,
            PriceTier::Premium => TIER_RED,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceTier::Affordable => "Affordable",
            PriceTier::Mid => "Mid",
            PriceTier::Premium => "Premium",
        }
    }

    /// All tiers in ascending price order, for host-rendered legends
    pub fn legend() -> [PriceTier; 3] {
        [PriceTier::Affordable, PriceTier::Mid, PriceTier::Premium]
    }
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Display color for a price given in major currency units
pub fn color_for_price(price_major: f64) -> Color {
    PriceTier::for_price(price_major).color()
}

/// Display opacity encoding available inventory: plentiful stock renders
/// solid, scarce stock renders faint
pub fn opacity_for_units(units: u32) -> f32 {
    if units > 50 {
        1.0
    } else if units > 10 {
        0.8
    } else {
        0.6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(PriceTier::for_price(1999.99), PriceTier::Affordable);
        assert_eq!(PriceTier::for_price(2000.0), PriceTier::Mid);
        assert_eq!(PriceTier::for_price(4999.99), PriceTier::Mid);
        assert_eq!(PriceTier::for_price(5000.0), PriceTier::Premium);
    }

    #[test]
    fn test_tier_is_total_over_all_inputs() {
        assert_eq!(PriceTier::for_price(0.0), PriceTier::Affordable);
        assert_eq!(PriceTier::for_price(-250.0), PriceTier::Affordable);
        assert_eq!(PriceTier::for_price(f64::MAX), PriceTier::Premium);
    }

    #[test]
    fn test_color_for_price() {
        assert_eq!(color_for_price(1500.0), TIER_GREEN);
        assert_eq!(color_for_price(3000.0), TIER_AMBER);
        assert_eq!(color_for_price(6000.0), TIER_RED);
    }

    #[test]
    fn test_opacity_for_units() {
        assert_eq!(opacity_for_units(51), 1.0);
        assert_eq!(opacity_for_units(50), 0.8);
        assert_eq!(opacity_for_units(11), 0.8);
        assert_eq!(opacity_for_units(10), 0.6);
        assert_eq!(opacity_for_units(0), 0.6);
    }

    #[test]
    fn test_hex_rendering() {
        assert_eq!(TIER_GREEN.to_hex(), "#22c55e");
        assert_eq!(Color::rgb(255, 0, 128).to_hex(), "#ff0080");
    }

    #[test]
    fn test_legend_order() {
        let legend = PriceTier::legend();
        assert_eq!(legend[0].label(), "Affordable");
        assert_eq!(legend[2].color(), TIER_RED);
    }
}
