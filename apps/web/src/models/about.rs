use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROFILE_IMAGE: &str = "/images/default-profile.jpg";

/// One entry of the company timeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Milestone {
    #[serde(deserialize_with = "super::null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: String,
}

impl Milestone {
    /// "March 2019". Unparseable dates are shown as sent.
    pub fn display_date(&self) -> String {
        parse_date(&self.date)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.date.clone())
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TeamMember {
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub role: String,
    pub profile_image: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: String,
}

impl TeamMember {
    pub fn image_src(&self) -> &str {
        super::non_empty(&self.profile_image).unwrap_or(DEFAULT_PROFILE_IMAGE)
    }
}
