//! Controlled forms that POST once to a backend collection.
//!
//! `FormSubmitter` owns the field values, the in-flight flag and the success
//! banner. Validation failures never reach the network; transport failures
//! keep the fields so the visitor can retry as-is.

pub mod fields;
pub mod handlers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

use crate::api_client::{FetchError, JsonPoster};

pub use fields::{AcquisitionSubmission, ContactSubmission, FeedbackSubmission};

/// How long the success banner stays up.
pub const SUCCESS_BANNER_DURATION: Duration = Duration::from_secs(5);

/// A form body bound to one backend collection.
pub trait FormFields: Serialize + Default + Clone + Send + Sync {
    /// Collection path the body is POSTed to.
    const ENDPOINT: &'static str;
    /// Short label for logs.
    const NAME: &'static str;

    /// Names of required fields that are blank or out of range.
    fn invalid_fields(&self) -> Vec<&'static str>;
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Please fill in: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("Failed to encode form: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Shared view of whether a submission is in flight; drives the disabled
/// state of the submit button.
#[derive(Debug, Clone, Default)]
pub struct SubmitIndicator(Arc<AtomicBool>);

impl SubmitIndicator {
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, active: bool) {
        self.0.store(active, Ordering::Release);
    }
}

#[derive(Debug, Clone, Default)]
pub struct SuccessBanner {
    shown_at: Option<Instant>,
}

impl SuccessBanner {
    pub fn show(&mut self) {
        self.shown_at = Some(Instant::now());
    }

    pub fn hide(&mut self) {
        self.shown_at = None;
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.shown_at
            .map(|shown| now.saturating_duration_since(shown) < SUCCESS_BANNER_DURATION)
            .unwrap_or(false)
    }

    /// Time left before the banner hides itself.
    pub fn remaining(&self) -> Duration {
        self.shown_at
            .map(|shown| SUCCESS_BANNER_DURATION.saturating_sub(shown.elapsed()))
            .unwrap_or(Duration::ZERO)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing submitted yet.
    #[default]
    Idle,
    Submitted,
    Invalid,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct FormSubmitter<F: FormFields> {
    fields: F,
    indicator: SubmitIndicator,
    banner: SuccessBanner,
    error: Option<String>,
    outcome: SubmitOutcome,
}

impl<F: FormFields> FormSubmitter<F> {
    pub fn new() -> Self {
        Self::with_fields(F::default())
    }

    pub fn with_fields(fields: F) -> Self {
        Self {
            fields,
            indicator: SubmitIndicator::default(),
            banner: SuccessBanner::default(),
            error: None,
            outcome: SubmitOutcome::Idle,
        }
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    #[cfg(test)]
    pub fn indicator(&self) -> SubmitIndicator {
        self.indicator.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.indicator.is_active()
    }

    pub fn banner(&self) -> &SuccessBanner {
        &self.banner
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn outcome(&self) -> SubmitOutcome {
        self.outcome.clone()
    }

    /// Validates, serialises and POSTs the current fields.
    pub async fn submit<P>(&mut self, poster: &P) -> Result<(), FormError>
    where
        P: JsonPoster + ?Sized,
    {
        self.banner.hide();

        let invalid = self.fields.invalid_fields();
        if !invalid.is_empty() {
            let err = FormError::Validation(invalid);
            self.error = Some(err.to_string());
            self.outcome = SubmitOutcome::Invalid;
            return Err(err);
        }

        let body = serde_json::to_vec(&self.fields)?;
        let submission_id = Uuid::new_v4();

        self.indicator.set(true);
        let result = poster.post_json(F::ENDPOINT, body).await;
        self.indicator.set(false);

        match result {
            Ok(()) => {
                info!("{} form submitted (submission {submission_id})", F::NAME);
                self.fields = F::default();
                self.error = None;
                self.banner.show();
                self.outcome = SubmitOutcome::Submitted;
                Ok(())
            }
            Err(e) => {
                error!("Error submitting {} form (submission {submission_id}): {e}", F::NAME);
                self.error =
                    Some("Something went wrong sending your message. Please try again.".into());
                self.outcome = SubmitOutcome::Failed;
                Err(e.into())
            }
        }
    }
}
