use crate::models::{non_empty, Settings};

pub const DEFAULT_TITLE: &str = "PNE Pizza";
pub const DEFAULT_DESCRIPTION: &str = "Your local pizza restaurant";
pub const DEFAULT_KEYWORDS: &str = "pizza, restaurant";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKey {
    Home,
    About,
    Careers,
    SellYourStore,
}

struct PageEntry {
    title: &'static str,
    description: &'static str,
    keywords: &'static str,
}

impl PageKey {
    fn entry(self) -> PageEntry {
        match self {
            PageKey::Home => PageEntry {
                title: "PNE Pizza - Delicious Pizza Near You",
                description: "Find the best pizza in town at PNE Pizza. Order online for delivery or pickup.",
                keywords: "pizza, delivery, takeout, PNE Pizza, restaurant",
            },
            PageKey::About => PageEntry {
                title: "About PNE Pizza - Our Story",
                description: "Learn about PNE Pizza's journey, our values, and our commitment to quality pizza.",
                keywords: "about PNE Pizza, pizza history, pizza company, pizza values",
            },
            PageKey::Careers => PageEntry {
                title: "Careers at PNE Pizza - Join Our Team",
                description: "Explore job opportunities at PNE Pizza. Join our team and grow your career with us.",
                keywords: "pizza jobs, restaurant careers, PNE Pizza employment, food service jobs",
            },
            PageKey::SellYourStore => PageEntry {
                title: "Sell Your Pizza Store to PNE Pizza",
                description: "Looking to sell your pizza franchise? PNE Pizza is interested in acquiring successful pizza locations.",
                keywords: "sell pizza franchise, pizza store acquisition, franchise sales, restaurant selling",
            },
        }
    }
}

/// Resolved `<head>` metadata for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub og_image: Option<String>,
}

impl PageMetadata {
    /// Per-page value first, then the site settings, then built-in defaults.
    pub fn resolve(page: PageKey, settings: Option<&Settings>) -> Self {
        let entry = page.entry();

        Self {
            title: first_of(entry.title, settings.and_then(Settings::title), DEFAULT_TITLE),
            description: first_of(
                entry.description,
                settings.and_then(|s| non_empty(&s.description)),
                DEFAULT_DESCRIPTION,
            ),
            keywords: first_of(
                entry.keywords,
                settings.and_then(|s| non_empty(&s.keywords)),
                DEFAULT_KEYWORDS,
            ),
            og_image: settings
                .and_then(|s| non_empty(&s.google_analytics_id))
                .filter(|id| id.contains("og-image"))
                .map(str::to_string),
        }
    }
}

fn first_of(own: &str, from_settings: Option<&str>, default: &str) -> String {
    if !own.is_empty() {
        return own.to_string();
    }
    from_settings.unwrap_or(default).to_string()
}
