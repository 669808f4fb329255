use crate::forms::{FeedbackSubmission, FormSubmitter};
use crate::models::feedback::select_for_display;
use crate::models::Feedback;
use crate::render::{
    input, inline_error, section, spinner, submit_button, success_banner, text, textarea,
};
use crate::resource::ResourceState;

const SUCCESS_MESSAGE: &str =
    "Thank you for your feedback! We appreciate you taking the time to share your thoughts.";

pub fn render(
    state: &ResourceState<Vec<Feedback>>,
    form: &FormSubmitter<FeedbackSubmission>,
) -> String {
    let inner = format!(
        r#"<h2>Customer Feedback</h2><div class="two-column"><div><h3>Leave a Review</h3>{form}</div><div><h3>What Our Customers Say</h3><div class="testimonials">{list}</div></div></div>"#,
        form = render_form(form),
        list = render_list(state),
    );
    section(Some("feedback"), "bg-warm", &inner)
}

fn render_form(form: &FormSubmitter<FeedbackSubmission>) -> String {
    let fields = form.fields();
    let mut html = success_banner(form.banner(), SUCCESS_MESSAGE);
    if let Some(error) = form.error() {
        html.push_str(&inline_error(error));
    }

    let stars: String = (1..=5u8)
        .map(|star| {
            let checked = if star == fields.rating { " checked" } else { "" };
            format!(
                r#"<label class="star"><input type="radio" name="rating" value="{star}"{checked}><span aria-label="{star} stars"></span></label>"#
            )
        })
        .collect();

    html.push_str(&format!(
        r##"<form method="post" action="/feedback#feedback">{name}{email}<div class="field"><span class="label">Rating</span><div class="rating">{stars}</div></div>{comment}{button}</form>"##,
        name = input("customer_name", "Name", "text", &fields.customer_name),
        email = input("email", "Email", "email", &fields.email),
        comment = textarea("comment", "Comment", &fields.comment, 4),
        button = submit_button("Submit Feedback", form.is_submitting()),
    ));
    html
}

fn render_list(state: &ResourceState<Vec<Feedback>>) -> String {
    if state.loading {
        return spinner("Loading feedback");
    }

    let shown = select_for_display(&state.data);
    if shown.is_empty() {
        return r#"<p class="empty">No feedbacks available yet.</p>"#.to_string();
    }

    shown
        .iter()
        .map(|feedback| {
            let stars = "&#9733;".repeat(usize::from(feedback.rating));
            format!(
                r#"<article class="card testimonial" data-animate="fade-up"><header><span>{}</span><span class="stars" aria-label="{} out of 5">{stars}</span></header><p>{}</p></article>"#,
                text(&feedback.customer_name),
                feedback.rating,
                text(&feedback.comment),
            )
        })
        .collect()
}
