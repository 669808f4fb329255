//! Store acquisition pitch: a short home preview and the full inquiry page.

use crate::forms::{AcquisitionSubmission, FormSubmitter};
use crate::render::{input, inline_error, section, submit_button, success_banner, textarea};

const SUCCESS_MESSAGE: &str = "Thank you for your interest! We will contact you soon.";

const INTRO: &str = "PNE Pizza LLC specializes in acquiring and operating Little Caesars locations with a proven track record of success.";

const BENEFITS: &[&str] = &[
    "Experienced team managing multiple locations across Ohio and Indiana.",
    "Seamless and professional transition process.",
    "Commitment to maintaining the legacy and success of your store.",
];

const STEPS: &[&str] = &[
    "Fill out the contact form with your store details.",
    "Our team will review your information and reach out to you.",
    "We'll schedule a call to discuss your store and potential acquisition.",
    "If both parties agree, we'll begin the due diligence process.",
    "Upon successful completion, we'll finalize the acquisition.",
];

const REQUIREMENTS: &[&str] = &[
    "Must be an authorized Little Caesars franchise location.",
    "Minimum of 2 years in operation.",
    "Consistent sales performance.",
    "Compliance with Little Caesars brand standards.",
];

pub fn render_preview() -> String {
    let inner = format!(
        r#"<h2>Sell Your Store to PNE Pizza LLC</h2><p class="lead">Are you a Little Caesars franchise owner looking to sell? {INTRO}</p><a class="button" href="/sell-your-store">Learn More About Selling Your Store</a>"#
    );
    section(Some("sell-your-store"), "bg-dark", &inner)
}

pub fn render_page(form: &FormSubmitter<AcquisitionSubmission>) -> String {
    let fields = form.fields();
    let mut form_html = success_banner(form.banner(), SUCCESS_MESSAGE);
    if let Some(error) = form.error() {
        form_html.push_str(&inline_error(error));
    }
    form_html.push_str(&format!(
        r##"<form method="post" action="/sell-your-store#inquiry">{}{}{}{}{}</form>"##,
        input("name", "Name", "text", &fields.name),
        input("email", "Email", "email", &fields.email),
        input("phone", "Phone", "tel", &fields.phone),
        textarea("info", "Store Information", &fields.info, 6),
        submit_button("Submit", form.is_submitting()),
    ));

    let pitch = format!(
        r#"<div class="pitch" data-animate="fade-up"><p>{INTRO}</p><h3>Why Choose PNE Pizza LLC?</h3><ul class="benefits">{}</ul><h3>Steps to Get Started</h3><ol class="steps">{}</ol><h3>Requirements</h3><ul class="requirements">{}</ul></div>"#,
        list_items(BENEFITS),
        list_items(STEPS),
        list_items(REQUIREMENTS),
    );

    let mut html = section(
        None,
        "bg-dark page-header",
        "<h1>Sell Your Store to PNE Pizza LLC</h1>",
    );
    html.push_str(&section(
        Some("inquiry"),
        "bg-light",
        &format!(
            r#"<div class="two-column">{pitch}<div class="card form-card"><h3>Contact Us</h3>{form_html}</div></div>"#
        ),
    ));
    html
}

fn list_items(items: &[&str]) -> String {
    items.iter().map(|item| format!("<li>{item}</li>")).collect()
}
