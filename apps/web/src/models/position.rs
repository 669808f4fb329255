use serde::{Deserialize, Serialize};

/// A job opening as published by the applicant-tracking backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Position {
    #[serde(deserialize_with = "super::null_as_default")]
    pub uuid: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub digest_key: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub title: String,
    /// HTML fragment authored in the ATS.
    #[serde(deserialize_with = "super::null_as_default")]
    pub overview: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub number: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub access: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub pay_amount: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub pay_frequency: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub job_type: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub normalized_titles: Vec<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub remote_type: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub job_url: String,
    pub location: Option<JobLocation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JobLocation {
    #[serde(deserialize_with = "super::null_as_default")]
    pub uuid: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub digest_key: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub postal_code: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub country: String,
}

impl JobLocation {
    /// "City, State", or the country when neither is known.
    pub fn display(&self) -> Option<String> {
        let parts: Vec<&str> = [self.city.trim(), self.state.trim()]
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            let country = self.country.trim();
            return (!country.is_empty()).then(|| country.to_string());
        }
        Some(parts.join(", "))
    }
}

impl Position {
    pub fn location_display(&self) -> Option<String> {
        self.location.as_ref().and_then(JobLocation::display)
    }
}

/// `full_time` -> `Full Time`.
pub fn format_job_type(raw: &str) -> String {
    raw.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
