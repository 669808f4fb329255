use crate::models::settings::FALLBACK_TITLE;
use crate::models::Settings;
use crate::render::attr;

pub const NAV_LINKS: &[(&str, &str)] = &[
    ("Home", "/"),
    ("About", "/about"),
    ("Jobs", "/careers"),
    ("Contact", "/#contact"),
    ("Sell Your Store", "/sell-your-store"),
];

pub fn render(settings: Option<&Settings>, current_path: &str) -> String {
    let brand = match settings.and_then(Settings::logo) {
        Some(logo) => format!(
            r#"<img class="logo" src="{}" alt="{}">"#,
            attr(logo),
            attr(settings.and_then(Settings::title).unwrap_or("PNE PIZZA Logo"))
        ),
        None => format!(r#"<span class="brand">{FALLBACK_TITLE}</span>"#),
    };

    let links: String = NAV_LINKS
        .iter()
        .map(|(label, href)| {
            let current = if *href == current_path {
                r#" aria-current="page""#
            } else {
                ""
            };
            format!(r#"<li><a href="{href}"{current}>{label}</a></li>"#)
        })
        .collect();

    format!(
        r#"<header class="navbar" data-sticky><nav><a class="home" href="/">{brand}</a><button class="menu-toggle" aria-label="Toggle menu" data-menu-toggle></button><ul class="nav-links">{links}</ul></nav></header>"#
    )
}
