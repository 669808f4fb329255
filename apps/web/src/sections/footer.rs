use crate::models::settings::FALLBACK_TITLE;
use crate::models::Settings;
use crate::render::{attr, text};

const QUICK_LINKS: &[(&str, &str)] = &[
    ("Home", "/"),
    ("Locations", "/#locations"),
    ("About Us", "/about"),
    ("Find a job", "/#careers"),
    ("Sell Your Store", "/sell-your-store"),
];

/// Footer with brand, quick links and whichever social profiles are set.
pub fn render(settings: Option<&Settings>, year: i32) -> String {
    let title = settings
        .and_then(Settings::brand_name)
        .unwrap_or(FALLBACK_TITLE);

    let links: String = QUICK_LINKS
        .iter()
        .map(|(label, href)| format!(r#"<li><a href="{href}">{label}</a></li>"#))
        .collect();

    let mut social = String::new();
    if let Some(url) = settings.and_then(Settings::facebook_link) {
        social.push_str(&social_icon(&url, "Facebook"));
    }
    if let Some(url) = settings.and_then(Settings::instagram_link) {
        social.push_str(&social_icon(&url, "Instagram"));
    }
    social.push_str(r##"<a href="#" aria-label="Twitter" class="social social-twitter"></a>"##);

    format!(
        r#"<footer class="footer"><div class="container footer-grid"><div><h3>{title}</h3><p>Authorized Little Caesars Franchise</p><p>&copy; {year} All rights reserved.</p></div><div><h3>Quick Links</h3><ul>{links}</ul></div><div><h3>Connect With Us</h3><div class="social-links">{social}</div></div></div></footer>"#,
        title = text(title),
    )
}

fn social_icon(url: &str, network: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer" aria-label="{network}" class="social social-{}"></a>"#,
        attr(url),
        network.to_ascii_lowercase()
    )
}
