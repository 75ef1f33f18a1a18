use crate::core::constants::{CURRENCY_SYMBOL, MINOR_UNITS_PER_MAJOR};
use crate::data::parcel::Parcel;
use serde::{Deserialize, Serialize};

/// Info-panel content attached to a rendered marker or polygon.
///
/// The surface opens it on click; the engine only supplies the content and
/// the route of the parcel's detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelPopup {
    pub title: String,
    pub location: String,
    /// Formatted unit price in major currency units
    pub price_display: String,
    pub units_available: u32,
    /// Navigation affordance to the parcel's detail view
    pub detail_route: String,
}

impl ParcelPopup {
    pub fn from_parcel(parcel: &Parcel) -> Self {
        Self {
            title: parcel.title.clone(),
            location: parcel.location.clone(),
            price_display: format_price_minor(parcel.price_minor),
            units_available: parcel.units_available,
            detail_route: format!("/lands/{}", parcel.id),
        }
    }

    /// Options payload handed to HTML/JS-backed surfaces
    pub fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "location": self.location,
            "price": self.price_display,
            "unitsAvailable": self.units_available,
            "detailRoute": self.detail_route,
        })
    }
}

/// Formats a minor-unit price as a major-unit display string,
/// thousands-separated with two decimal places
pub fn format_price_minor(price_minor: i64) -> String {
    let negative = price_minor < 0;
    let minor = price_minor.unsigned_abs();
    let major = minor / MINOR_UNITS_PER_MAJOR as u64;
    let cents = minor % MINOR_UNITS_PER_MAJOR as u64;

    let digits = major.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{CURRENCY_SYMBOL}{grouped}.{cents:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_formatting() {
        assert_eq!(format_price_minor(150_000), "\u{20a6}1,500.00");
        assert_eq!(format_price_minor(123_456_789), "\u{20a6}1,234,567.89");
        assert_eq!(format_price_minor(50), "\u{20a6}0.50");
        assert_eq!(format_price_minor(0), "\u{20a6}0.00");
    }

    #[test]
    fn test_popup_from_parcel() {
        let parcel = Parcel::new("land-9", "Emerald Gardens", "Epe, Lagos", 150_000, 60);
        let popup = ParcelPopup::from_parcel(&parcel);
        assert_eq!(popup.title, "Emerald Gardens");
        assert_eq!(popup.price_display, "\u{20a6}1,500.00");
        assert_eq!(popup.detail_route, "/lands/land-9");

        let options = popup.options();
        assert_eq!(options["unitsAvailable"], 60);
        assert_eq!(options["detailRoute"], "/lands/land-9");
    }
}
