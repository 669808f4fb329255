//! About page: company timeline, values and team.

use crate::models::{Milestone, TeamMember};
use crate::render::{attr, inline_error, section, spinner, text};
use crate::resource::ResourceState;

const VALUES: &[(&str, &str)] = &[
    (
        "Customer Obsessed",
        "We put our customers at the heart of everything we do, striving to exceed their expectations with every pizza we serve.",
    ),
    (
        "Employee Obsessed",
        "We value our team members and are committed to their growth, well-being, and success within our organization.",
    ),
    (
        "Quality-Driven",
        "We are dedicated to maintaining the highest standards of quality in our products, service, and operations.",
    ),
];

const VISION: &str = "Our vision is to continue this growth trajectory, using our revenue to develop more stores and create better job opportunities in the communities we serve. We believe in reinvesting in our business and our people, fostering a cycle of growth and community development.";

pub fn render(
    milestones: &ResourceState<Vec<Milestone>>,
    team: &ResourceState<Vec<TeamMember>>,
) -> String {
    let mut html = section(
        None,
        "bg-dark page-header",
        "<h1>About PNE Pizza</h1>",
    );
    html.push_str(&section(
        Some("journey"),
        "bg-light",
        &format!(
            r#"<h2>Our Journey</h2>{}<p class="vision">{VISION}</p>"#,
            timeline(milestones)
        ),
    ));
    html.push_str(&section(
        Some("values"),
        "bg-warm",
        &format!("<h2>Core Values</h2><div class=\"value-grid\">{}</div>", values()),
    ));
    html.push_str(&section(
        Some("team"),
        "bg-light",
        &format!("<h2>Our Leadership</h2>{}", team_grid(team)),
    ));
    html
}

fn timeline(state: &ResourceState<Vec<Milestone>>) -> String {
    if state.loading {
        return spinner("Loading milestones");
    }
    if let Some(error) = &state.error {
        return inline_error(&format!("Error: {error}"));
    }

    let items: String = state
        .data
        .iter()
        .map(|m| {
            format!(
                r#"<li class="timeline-item" data-animate="fade-up"><time>{}</time><h3>{}</h3><p>{}</p></li>"#,
                text(&m.display_date()),
                text(&m.title),
                text(&m.description),
            )
        })
        .collect();
    format!(r#"<ol class="timeline">{items}</ol>"#)
}

fn values() -> String {
    VALUES
        .iter()
        .map(|(title, body)| format!(r#"<div class="card value"><h3>{title}</h3><p>{body}</p></div>"#))
        .collect()
}

fn team_grid(state: &ResourceState<Vec<TeamMember>>) -> String {
    if state.loading {
        return spinner("Loading team");
    }
    if let Some(error) = &state.error {
        return inline_error(&format!("Error: {error}"));
    }

    let cards: String = state
        .data
        .iter()
        .map(|member| {
            format!(
                r#"<article class="card member" data-animate="fade-up"><img src="{src}" alt="{alt}" loading="lazy"><h3>{name}</h3><p class="role">{role}</p><p>{desc}</p></article>"#,
                src = attr(member.image_src()),
                alt = attr(&member.name),
                name = text(&member.name),
                role = text(&member.role),
                desc = text(&member.description),
            )
        })
        .collect();
    format!(r#"<div class="team-grid">{cards}</div>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_dates_and_team_fallback_image() {
        let milestones = ResourceState::ready(vec![Milestone {
            date: "2019-03-14".into(),
            title: "First store".into(),
            description: "Opened in Columbus".into(),
        }]);
        let team = ResourceState::ready(vec![TeamMember {
            name: "Ada".into(),
            role: "Owner".into(),
            profile_image: None,
            description: String::new(),
        }]);

        let html = render(&milestones, &team);
        assert!(html.contains("<time>March 2019</time>"));
        assert!(html.contains(r#"src="/images/default-profile.jpg""#));
        assert!(html.contains("Customer Obsessed"));
        assert!(html.contains("striving to exceed their expectations with every pizza we serve"));
        assert!(html.contains("Quality-Driven"));
        assert!(html.contains(r#"<p class="vision">Our vision is to continue this growth trajectory"#));
    }

    #[test]
    fn test_sections_fail_independently() {
        let milestones: ResourceState<Vec<Milestone>> = ResourceState::failed("HTTP 503");
        let team = ResourceState::loading();
        let html = render(&milestones, &team);
        assert!(html.contains("Error: HTTP 503"));
        assert!(html.contains("Loading team"));
    }
}
