use serde::{Deserialize, Serialize};

use super::non_empty;

/// Fallback shown wherever the site title is needed and settings are unavailable.
pub const FALLBACK_TITLE: &str = "PNE PIZZA";

/// Site-wide settings singleton, edited in the backend admin.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub id: i64,
    pub website_title: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
    pub logo_image: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    #[serde(rename = "Google_Maps_API_Key")]
    pub google_maps_api_key: Option<String>,
    #[serde(rename = "Google_Analytics_ID")]
    pub google_analytics_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Settings {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.website_title)
    }

    pub fn logo(&self) -> Option<&str> {
        non_empty(&self.logo_image)
    }

    /// Short brand name: everything before the first `-` of the site title.
    pub fn brand_name(&self) -> Option<&str> {
        self.title()
            .and_then(|t| t.split('-').next())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn facebook_link(&self) -> Option<String> {
        non_empty(&self.facebook_url).map(|v| social_link(v, "https://facebook.com/"))
    }

    pub fn instagram_link(&self) -> Option<String> {
        non_empty(&self.instagram_url).map(|v| social_link(v, "https://instagram.com/"))
    }
}

/// Accepts either a full URL or a bare handle.
fn social_link(value: &str, base: &str) -> String {
    if value.starts_with("http") {
        value.to_string()
    } else {
        format!("{base}{}", value.trim_start_matches('@'))
    }
}
