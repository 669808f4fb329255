//! Form bodies. Field order is the wire order of the JSON body.

use serde::{Deserialize, Serialize};

use super::FormFields;
use crate::api_client::{ACQUISITIONS_PATH, CONTACTS_PATH, FEEDBACK_PATH};

const DEFAULT_RATING: u8 = 5;

fn default_rating() -> u8 {
    DEFAULT_RATING
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn collect_blank(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| blank(value))
        .map(|(name, _)| *name)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackSubmission {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default = "default_rating")]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub email: String,
}

impl Default for FeedbackSubmission {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            rating: DEFAULT_RATING,
            comment: String::new(),
            email: String::new(),
        }
    }
}

impl FormFields for FeedbackSubmission {
    const ENDPOINT: &'static str = FEEDBACK_PATH;
    const NAME: &'static str = "feedback";

    fn invalid_fields(&self) -> Vec<&'static str> {
        let mut invalid = collect_blank(&[
            ("customer_name", self.customer_name.as_str()),
            ("email", self.email.as_str()),
            ("comment", self.comment.as_str()),
        ]);
        if !(1..=5).contains(&self.rating) {
            invalid.push("rating");
        }
        invalid
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl FormFields for ContactSubmission {
    const ENDPOINT: &'static str = CONTACTS_PATH;
    const NAME: &'static str = "contact";

    fn invalid_fields(&self) -> Vec<&'static str> {
        collect_blank(&[
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("message", self.message.as_str()),
        ])
    }
}

/// Store-sale enquiry from a franchise owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AcquisitionSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub info: String,
}

impl FormFields for AcquisitionSubmission {
    const ENDPOINT: &'static str = ACQUISITIONS_PATH;
    const NAME: &'static str = "acquisition";

    fn invalid_fields(&self) -> Vec<&'static str> {
        collect_blank(&[
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("info", self.info.as_str()),
        ])
    }
}
