//! Page composition: metadata, navbar, the page's sections, footer and the
//! browser shell script that drives animation, banner dismissal and the map.

pub mod handlers;
pub mod metadata;

use chrono::{Datelike, Utc};

use crate::models::Settings;
use crate::render::attr;
use crate::sections::{footer, navbar};

pub use metadata::{PageKey, PageMetadata};

/// Client hooks for `data-animate`, `data-dismiss-after`, `data-menu-toggle`
/// and the `#locations-map` container.
const SHELL_SCRIPT: &str = r#"<script>
document.querySelectorAll('[data-dismiss-after]').forEach(function (el) {
  setTimeout(function () { el.remove(); }, Number(el.dataset.dismissAfter));
});
(function () {
  var seen = new IntersectionObserver(function (entries) {
    entries.forEach(function (e) { if (e.isIntersecting) { e.target.classList.add('in-view'); seen.unobserve(e.target); } });
  }, { threshold: 0.1 });
  document.querySelectorAll('[data-animate]').forEach(function (el) { seen.observe(el); });
})();
document.querySelectorAll('[data-menu-toggle]').forEach(function (btn) {
  btn.addEventListener('click', function () { document.body.classList.toggle('menu-open'); });
});
(function () {
  var el = document.getElementById('locations-map');
  if (!el || !el.dataset.apiKey) { return; }
  window.initLocationsMap = function () {
    var map = new google.maps.Map(el, {
      center: JSON.parse(el.dataset.center),
      zoom: Number(el.dataset.zoom),
      mapId: el.dataset.mapId || undefined
    });
    JSON.parse(el.dataset.markers).forEach(function (m) {
      var marker = new google.maps.Marker({ position: m.position, title: m.title, map: map });
      marker.addListener('click', function () { window.location = '/?location=' + m.index + '#locations'; });
    });
    map.addListener('click', function () { window.location = '/#locations'; });
  };
  var s = document.createElement('script');
  s.src = 'https://maps.googleapis.com/maps/api/js?key=' + encodeURIComponent(el.dataset.apiKey) + '&callback=initLocationsMap';
  s.async = true;
  document.head.appendChild(s);
})();
</script>"#;

pub struct Page<'a> {
    pub key: PageKey,
    pub path: &'a str,
    pub settings: Option<&'a Settings>,
}

impl Page<'_> {
    pub fn compose(&self, main: &str) -> String {
        let meta = PageMetadata::resolve(self.key, self.settings);
        format!(
            "<!DOCTYPE html><html lang=\"en\"><head>{head}</head><body><div class=\"scroll-shell\">{nav}<main>{main}</main>{footer}</div>{SHELL_SCRIPT}</body></html>",
            head = head(&meta),
            nav = navbar::render(self.settings, self.path),
            footer = footer::render(self.settings, Utc::now().year()),
        )
    }
}

fn head(meta: &PageMetadata) -> String {
    let mut html = format!(
        r#"<meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title><meta name="description" content="{description}"><meta name="keywords" content="{keywords}"><meta property="og:title" content="{title}"><meta property="og:description" content="{description}">"#,
        title = attr(&meta.title),
        description = attr(&meta.description),
        keywords = attr(&meta.keywords),
    );
    if let Some(image) = &meta.og_image {
        html.push_str(&format!(
            r#"<meta property="og:image" content="{}">"#,
            attr(image)
        ));
    }
    html.push_str(r#"<link rel="stylesheet" href="/styles.css">"#);
    html
}
