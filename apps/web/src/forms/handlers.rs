use axum::{extract::State, http::StatusCode, response::Html, Form};

use super::{
    AcquisitionSubmission, ContactSubmission, FeedbackSubmission, FormSubmitter, SubmitOutcome,
};
use crate::pages::handlers::{render_home, render_sell_your_store, HomeForms, HomeQuery};
use crate::state::AppState;

fn status_for(outcome: SubmitOutcome) -> StatusCode {
    match outcome {
        SubmitOutcome::Idle | SubmitOutcome::Submitted => StatusCode::OK,
        SubmitOutcome::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Failed => StatusCode::BAD_GATEWAY,
    }
}

/// POST /feedback
///
/// The home page is rendered after the submit completes, so a successful
/// submission is reflected in the re-fetched testimonials.
pub async fn handle_feedback(
    State(state): State<AppState>,
    Form(fields): Form<FeedbackSubmission>,
) -> (StatusCode, Html<String>) {
    let mut forms = HomeForms {
        feedback: FormSubmitter::with_fields(fields),
        ..Default::default()
    };
    // Failures are recorded on the submitter and rendered inline.
    let _ = forms.feedback.submit(&state.api).await;
    let status = status_for(forms.feedback.outcome());

    let html = render_home(&state, &HomeQuery::default(), &forms).await;
    (status, Html(html))
}

/// POST /contact
pub async fn handle_contact(
    State(state): State<AppState>,
    Form(fields): Form<ContactSubmission>,
) -> (StatusCode, Html<String>) {
    let mut forms = HomeForms {
        contact: FormSubmitter::with_fields(fields),
        ..Default::default()
    };
    let _ = forms.contact.submit(&state.api).await;
    let status = status_for(forms.contact.outcome());

    let html = render_home(&state, &HomeQuery::default(), &forms).await;
    (status, Html(html))
}

/// POST /sell-your-store
pub async fn handle_acquisition(
    State(state): State<AppState>,
    Form(fields): Form<AcquisitionSubmission>,
) -> (StatusCode, Html<String>) {
    let mut form = FormSubmitter::with_fields(fields);
    let _ = form.submit(&state.api).await;
    let status = status_for(form.outcome());

    (status, Html(render_sell_your_store(&state, &form).await))
}
