use crate::forms::{ContactSubmission, FormSubmitter};
use crate::render::{input, inline_error, section, submit_button, success_banner, textarea};

const SUCCESS_MESSAGE: &str =
    "Thank you for contacting us! We'll get back to you as soon as possible.";

pub fn render(form: &FormSubmitter<ContactSubmission>) -> String {
    let fields = form.fields();
    let mut body = success_banner(form.banner(), SUCCESS_MESSAGE);
    if let Some(error) = form.error() {
        body.push_str(&inline_error(error));
    }
    body.push_str(&format!(
        r##"<form method="post" action="/contact#contact">{}{}{}{}{}</form>"##,
        input("name", "Name", "text", &fields.name),
        input("email", "Email", "email", &fields.email),
        input("phone", "Phone", "tel", &fields.phone),
        textarea("message", "Message", &fields.message, 5),
        submit_button("Send Message", form.is_submitting()),
    ));

    let inner = format!(
        r#"<h2>Contact Us</h2><p class="lead">Questions, catering or large orders? Send us a note.</p><div class="card form-card">{body}</div>"#
    );
    section(Some("contact"), "bg-light", &inner)
}
