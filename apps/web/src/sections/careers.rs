//! Job openings, either as the capped home preview or the full careers page.

use std::collections::HashMap;

use crate::models::position::format_job_type;
use crate::models::Position;
use crate::render::{attr, inline_error, section, spinner, text, trusted_fragment};
use crate::resource::ResourceState;

/// Openings shown on the home page before "Show More Openings".
pub const HOME_LIMIT: usize = 8;

const PERKS: [(&str, &str); 4] = [
    (
        "Competitive Pay",
        "We offer above-industry standard wages to all our team members.",
    ),
    (
        "Immediate Pay",
        "Access your earnings when you need them with our immediate pay option.",
    ),
    (
        "Comprehensive Benefits",
        "Health, dental, and vision insurance for eligible employees.",
    ),
    (
        "Growth Opportunities",
        "Clear path for advancement and professional development.",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareersVariant {
    Home,
    Full,
}

/// Which position overviews are expanded, keyed by position uuid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpandState(HashMap<String, bool>);

impl ExpandState {
    /// Parses the comma-separated `expanded` query value.
    pub fn from_query(raw: Option<&str>) -> Self {
        let map = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| (id.to_string(), true))
            .collect();
        Self(map)
    }

    pub fn is_expanded(&self, uuid: &str) -> bool {
        self.0.get(uuid).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, uuid: &str) {
        let entry = self.0.entry(uuid.to_string()).or_insert(false);
        *entry = !*entry;
    }

    /// Query value after toggling `uuid`, ids sorted for stable links.
    pub fn toggled_query(&self, uuid: &str) -> String {
        let mut next = self.clone();
        next.toggle(uuid);
        let mut ids: Vec<&str> = next
            .0
            .iter()
            .filter(|(_, expanded)| **expanded)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids.join(",")
    }
}

pub fn render(
    state: &ResourceState<Vec<Position>>,
    variant: CareersVariant,
    expand: &ExpandState,
) -> String {
    let inner = match variant {
        CareersVariant::Home => format!(
            r#"<h2>Join Our Team</h2>{}{}<a class="button button-outline" href="/careers">Show More Openings</a>"#,
            why_join(),
            body(state, variant, expand),
        ),
        CareersVariant::Full => format!(
            "<h2>Career Opportunities</h2>{}",
            body(state, variant, expand)
        ),
    };
    section(Some("careers"), "bg-light", &inner)
}

fn why_join() -> String {
    let perks: String = PERKS
        .iter()
        .map(|(title, detail)| {
            format!(r#"<li class="perk"><h4>{title}</h4><p>{detail}</p></li>"#)
        })
        .collect();
    format!(
        r#"<div class="why-join" data-animate="fade-up"><h3>Why Join PNE Pizza?</h3><p>At PNE Pizza, we're more than just a workplace - we're a family. We're committed to creating an environment where our employees can thrive, grow, and enjoy their work.</p><ul class="perks">{perks}</ul><div class="culture"><h4>Employee-Obsessed Culture</h4><p>We believe that happy employees make for happy customers. That's why we've implemented a scorecard system to ensure fair evaluations and reward exceptional performance. Join a team that truly values your contributions!</p></div></div>"#
    )
}

fn body(state: &ResourceState<Vec<Position>>, variant: CareersVariant, expand: &ExpandState) -> String {
    if state.loading {
        return spinner("Loading job openings");
    }
    if let Some(error) = &state.error {
        return match variant {
            CareersVariant::Home => inline_error("Unable to load job openings"),
            CareersVariant::Full => inline_error(&format!("Error: {error}")),
        };
    }
    if state.data.is_empty() {
        return r#"<p class="empty">No job openings available at this time.</p>"#.to_string();
    }

    let shown = match variant {
        CareersVariant::Home => &state.data[..state.data.len().min(HOME_LIMIT)],
        CareersVariant::Full => &state.data[..],
    };

    let mut html = String::from(r#"<div class="job-grid">"#);
    for position in shown {
        html.push_str(&card(position, variant, expand));
    }
    html.push_str("</div>");
    html
}

fn card(position: &Position, variant: CareersVariant, expand: &ExpandState) -> String {
    let mut tags = Vec::new();
    if let Some(location) = position.location_display() {
        tags.push(location);
    }
    if !position.job_type.is_empty() {
        tags.push(format_job_type(&position.job_type));
    }
    if !position.remote_type.is_empty() {
        tags.push(format_job_type(&position.remote_type));
    }
    let tags: String = tags
        .iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, text(tag)))
        .collect();

    let pay = if position.pay_amount.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="pay">{} {}</p>"#,
            text(&position.pay_amount),
            text(&format_job_type(&position.pay_frequency))
        )
    };

    let expanded = expand.is_expanded(&position.uuid);
    let clamp = if expanded { "" } else { " line-clamp-3" };
    let toggle_path = match variant {
        CareersVariant::Home => "/",
        CareersVariant::Full => "/careers",
    };
    let toggle = format!(
        r##"<a class="toggle" href="{toggle_path}?expanded={}#careers">{}</a>"##,
        attr(&expand.toggled_query(&position.uuid)),
        if expanded { "Show Less" } else { "Read More" },
    );

    let apply = if position.job_url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<a class="button" href="{}" target="_blank" rel="noopener noreferrer">Apply Now</a>"#,
            attr(&position.job_url)
        )
    };

    format!(
        r#"<article class="card job" data-animate="fade-up" data-position="{uuid}"><h3>{title}</h3><div class="tags">{tags}</div>{pay}<div class="overview{clamp}">{overview}</div>{toggle}{apply}</article>"#,
        uuid = attr(&position.uuid),
        title = text(&position.title),
        overview = trusted_fragment(&position.overview),
    )
}
