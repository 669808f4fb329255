//! Small HTML building blocks shared by sections and pages.
//!
//! Everything that comes from the backend or the visitor goes through `text`
//! or `attr`. The only raw markup accepted from outside is the job overview,
//! which passes through `trusted_fragment`.

use std::borrow::Cow;

use crate::forms::SuccessBanner;

pub fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

pub fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// Backend-authored HTML. Script and style elements are neutralised; the
/// rest is kept as authored.
pub fn trusted_fragment(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let lower = html.to_ascii_lowercase();
    let mut rest = 0;
    for (idx, _) in lower.match_indices('<') {
        let tail = &lower[idx + 1..];
        let tail = tail.strip_prefix('/').unwrap_or(tail);
        if tail.starts_with("script") || tail.starts_with("style") || tail.starts_with("iframe") {
            out.push_str(&html[rest..idx]);
            out.push_str("&lt;");
            rest = idx + 1;
        }
    }
    out.push_str(&html[rest..]);
    out
}

/// Wraps section content in the animated container the scroll shell observes.
pub fn section(id: Option<&str>, class: &str, inner: &str) -> String {
    let id_attr = id
        .map(|id| format!(r#" id="{}""#, attr(id)))
        .unwrap_or_default();
    format!(
        r#"<section{id_attr} class="section {class}" data-animate="fade-up"><div class="container">{inner}</div></section>"#
    )
}

pub fn spinner(label: &str) -> String {
    format!(
        r#"<div class="spinner" role="status" aria-live="polite"><span class="visually-hidden">{}</span></div>"#,
        text(label)
    )
}

pub fn inline_error(message: &str) -> String {
    format!(r#"<p class="inline-error" role="alert">{}</p>"#, text(message))
}

pub fn input(id: &str, label: &str, kind: &str, value: &str) -> String {
    format!(
        r#"<div class="field"><label for="{id}">{label}</label><input id="{id}" name="{id}" type="{kind}" value="{value}" required></div>"#,
        id = attr(id),
        label = text(label),
        kind = attr(kind),
        value = attr(value),
    )
}

pub fn textarea(id: &str, label: &str, value: &str, rows: u8) -> String {
    format!(
        r#"<div class="field"><label for="{id}">{label}</label><textarea id="{id}" name="{id}" rows="{rows}" required>{value}</textarea></div>"#,
        id = attr(id),
        label = text(label),
        value = text(value),
    )
}

/// Submit control; disabled and relabelled while a request is in flight.
pub fn submit_button(label: &str, busy: bool) -> String {
    if busy {
        r#"<button type="submit" disabled aria-busy="true">Submitting...</button>"#.to_string()
    } else {
        format!(r#"<button type="submit">{}</button>"#, text(label))
    }
}

/// Success banner that the shell script hides once `data-dismiss-after`
/// milliseconds have passed.
pub fn success_banner(banner: &SuccessBanner, message: &str) -> String {
    if !banner.is_visible() {
        return String::new();
    }
    format!(
        r#"<div class="alert alert-success" role="status" data-dismiss-after="{}">{}</div>"#,
        banner.remaining().as_millis(),
        text(message)
    )
}
