use serde::{Deserialize, Serialize};

const ORDER_URL_BASE: &str = "https://littlecaesars.com/en-us/order/pickup/stores";

/// A franchise store shown on the locations map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub image_url: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub street: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub zip: String,
    /// Decimal degrees as sent by the backend; parsed at render time.
    #[serde(deserialize_with = "super::null_as_default")]
    pub latitude: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub longitude: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub status: bool,
    /// Store number on the external ordering site.
    pub lc_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// `None` when either coordinate is missing or not a finite number.
    pub fn coordinates(&self) -> Option<LatLng> {
        let lat = self.latitude.trim().parse::<f64>().ok()?;
        let lng = self.longitude.trim().parse::<f64>().ok()?;
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        Some(LatLng { lat, lng })
    }

    pub fn address_line(&self) -> String {
        format!("{}, {}, {} {}", self.street, self.city, self.state, self.zip)
    }

    pub fn order_url(&self) -> Option<String> {
        self.lc_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| format!("{ORDER_URL_BASE}/{n}/order-time/"))
    }
}
