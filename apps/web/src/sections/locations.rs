use crate::config::MapsConfig;
use crate::models::Location;
use crate::render::{attr, inline_error, section, spinner, text};
use crate::resource::ResourceState;
use crate::sections::map::{LocationsMap, MarkerLayer};

/// Renders the map container and the store list. `state` carries the load
/// status; `map` already holds the loaded locations and any selection.
pub fn render(
    state: &ResourceState<Vec<Location>>,
    map: &LocationsMap<MarkerLayer>,
    maps: &MapsConfig,
) -> String {
    let mut inner = String::from("<h2>Our Locations</h2><div class=\"locations-grid\">");

    inner.push_str(&map_panel(state, map, maps));
    inner.push_str(&list_panel(state, map));
    inner.push_str("</div>");

    section(Some("locations"), "bg-white", &inner)
}

fn map_panel(
    state: &ResourceState<Vec<Location>>,
    map: &LocationsMap<MarkerLayer>,
    maps: &MapsConfig,
) -> String {
    let markers = serde_json::to_string(map.widget().active()).unwrap_or_else(|_| "[]".into());
    let center = serde_json::to_string(&map.center()).unwrap_or_else(|_| "null".into());

    let mut html = format!(
        r#"<div class="map-panel"><div id="locations-map" data-center="{}" data-zoom="{}" data-markers="{}" data-map-id="{}" data-api-key="{}">"#,
        attr(&center),
        map.zoom(),
        attr(&markers),
        attr(maps.map_id.as_deref().unwrap_or_default()),
        attr(maps.api_key.as_deref().unwrap_or_default()),
    );
    if state.loading {
        html.push_str(&spinner("Loading map"));
    }
    if let Some((_, location)) = map.selected() {
        html.push_str(&info_overlay(location));
    }
    html.push_str("</div></div>");
    html
}

fn info_overlay(location: &Location) -> String {
    let order = location
        .order_url()
        .map(|url| {
            format!(
                r#"<a class="button order" href="{}" target="_blank" rel="noopener noreferrer">Order Now</a>"#,
                attr(&url)
            )
        })
        .unwrap_or_default();

    format!(
        r##"<div class="info-window" role="dialog"><a class="close" href="/#locations" aria-label="Close">&times;</a><h4>{name}</h4><p>{street}<br>{city}, {state} {zip}</p><img src="{image}" alt="{name_attr}"><p>{description}</p>{order}</div>"##,
        name = text(&location.name),
        street = text(&location.street),
        city = text(&location.city),
        state = text(&location.state),
        zip = text(&location.zip),
        image = attr(&location.image_url),
        name_attr = attr(&location.name),
        description = text(&location.description),
    )
}

fn list_panel(state: &ResourceState<Vec<Location>>, map: &LocationsMap<MarkerLayer>) -> String {
    let locations = map.locations();
    let count = locations.len();
    let noun = if count == 1 { "Store" } else { "Stores" };

    let mut html = format!(
        r#"<div class="locations-list"><div class="list-header"><h3>Franchise Locations</h3><span>{count} {noun}</span></div>"#
    );

    if let Some(error) = &state.error {
        tracing::debug!("Rendering locations without data: {error}");
        html.push_str(&inline_error("Unable to load locations right now."));
    }

    html.push_str("<ul>");
    let selected = map.selected().map(|(i, _)| i);
    for (index, location) in locations.iter().enumerate() {
        let class = if selected == Some(index) {
            "location selected"
        } else {
            "location"
        };
        let order = location
            .order_url()
            .map(|url| {
                format!(
                    r#"<a class="order-online" href="{}" target="_blank" rel="noopener noreferrer">Order Online</a>"#,
                    attr(&url)
                )
            })
            .unwrap_or_default();
        html.push_str(&format!(
            r##"<li class="{class}"><a href="/?location={index}#locations"><h4>{}</h4><p>{}</p></a>{order}</li>"##,
            text(&location.name),
            text(&location.address_line()),
        ));
    }
    html.push_str("</ul></div>");
    html
}
