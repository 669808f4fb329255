use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::config::MapsConfig;
use crate::forms::{AcquisitionSubmission, ContactSubmission, FeedbackSubmission, FormSubmitter};
use crate::models::non_empty;
use crate::pages::{Page, PageKey};
use crate::resource::ResourceHandle;
use crate::sections::careers::{CareersVariant, ExpandState};
use crate::sections::map::{LocationsMap, MarkerLayer};
use crate::sections::{about, careers, contact, feedback, hero, locations, sell_store};
use crate::settings::SettingsSnapshot;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Index into the location list; anything unparseable is ignored.
    pub location: Option<String>,
    pub expanded: Option<String>,
}

impl HomeQuery {
    fn location_index(&self) -> Option<usize> {
        self.location.as_deref()?.trim().parse().ok()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CareersQuery {
    pub expanded: Option<String>,
}

/// Form state carried into a home page render.
#[derive(Default)]
pub struct HomeForms {
    pub feedback: FormSubmitter<FeedbackSubmission>,
    pub contact: FormSubmitter<ContactSubmission>,
}

/// GET /
pub async fn handle_home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Html<String> {
    Html(render_home(&state, &query, &HomeForms::default()).await)
}

/// GET /about
pub async fn handle_about(State(state): State<AppState>) -> Html<String> {
    let milestones = ResourceHandle::mount("milestones", {
        let api = state.api.clone();
        async move { api.milestones().await }
    });
    let team = ResourceHandle::mount("team members", {
        let api = state.api.clone();
        async move { api.team_members().await }
    });

    let (snapshot, milestones, team) =
        tokio::join!(state.site_settings(), milestones.settle(), team.settle());

    let page = Page {
        key: PageKey::About,
        path: "/about",
        settings: snapshot.settings(),
    };
    Html(page.compose(&about::render(&milestones, &team)))
}

/// GET /careers
pub async fn handle_careers(
    State(state): State<AppState>,
    Query(query): Query<CareersQuery>,
) -> Html<String> {
    let positions = ResourceHandle::mount("positions", {
        let api = state.api.clone();
        async move { api.positions().await }
    });
    let (snapshot, positions) = tokio::join!(state.site_settings(), positions.settle());

    let expand = ExpandState::from_query(query.expanded.as_deref());
    let page = Page {
        key: PageKey::Careers,
        path: "/careers",
        settings: snapshot.settings(),
    };
    Html(page.compose(&careers::render(&positions, CareersVariant::Full, &expand)))
}

/// GET /sell-your-store
pub async fn handle_sell_your_store(State(state): State<AppState>) -> Html<String> {
    Html(render_sell_your_store(&state, &FormSubmitter::new()).await)
}

pub async fn render_home(state: &AppState, query: &HomeQuery, forms: &HomeForms) -> String {
    let positions = ResourceHandle::mount("positions", {
        let api = state.api.clone();
        async move { api.positions().await }
    });
    let stores = ResourceHandle::mount("locations", {
        let api = state.api.clone();
        async move { api.locations().await }
    });
    let testimonials = ResourceHandle::mount("feedback", {
        let api = state.api.clone();
        async move { api.feedback().await }
    });

    let (snapshot, positions, stores, testimonials) = tokio::join!(
        state.site_settings(),
        positions.settle(),
        stores.settle(),
        testimonials.settle(),
    );

    let maps = maps_config(&state.config.maps, &snapshot);
    let mut map = LocationsMap::new(MarkerLayer::default());
    map.load(stores.data.clone());
    if let Some(index) = query.location_index() {
        map.select(index);
    }
    let locations_html = locations::render(&stores, &map, &maps);

    let expand = ExpandState::from_query(query.expanded.as_deref());
    let mut main = hero::render();
    main.push_str(&locations_html);
    main.push_str(&feedback::render(&testimonials, &forms.feedback));
    main.push_str(&careers::render(&positions, CareersVariant::Home, &expand));
    main.push_str(&contact::render(&forms.contact));
    main.push_str(&sell_store::render_preview());

    let page = Page {
        key: PageKey::Home,
        path: "/",
        settings: snapshot.settings(),
    };
    page.compose(&main)
}

pub async fn render_sell_your_store(
    state: &AppState,
    form: &FormSubmitter<AcquisitionSubmission>,
) -> String {
    let snapshot = state.site_settings().await;
    let page = Page {
        key: PageKey::SellYourStore,
        path: "/sell-your-store",
        settings: snapshot.settings(),
    };
    page.compose(&sell_store::render_page(form))
}

/// Configured maps credentials, falling back to the key stored in settings.
fn maps_config(configured: &MapsConfig, snapshot: &SettingsSnapshot) -> MapsConfig {
    let api_key = configured.api_key.clone().or_else(|| {
        snapshot
            .settings()
            .and_then(|s| non_empty(&s.google_maps_api_key))
            .map(str::to_string)
    });
    MapsConfig {
        api_key,
        map_id: configured.map_id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use std::time::Duration;

    use crate::routes::build_router;
    use crate::test_support::{
        closed_port_url, spawn_backend, test_config, test_state, test_state_with,
    };

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn positions_json(n: usize) -> Value {
        let positions: Vec<Value> = (0..n)
            .map(|i| json!({"uuid": format!("job-{i}"), "title": format!("Shift Lead {i}"), "status": "published"}))
            .collect();
        json!({"success": true, "data": {"positions": positions}})
    }

    fn backend(positions: Value) -> Router {
        Router::new()
            .route(
                "/api/v1/settings",
                get(|| async {
                    Json(json!({"success": true, "data": {
                        "id": 1,
                        "website_title": "Slice House - Fresh Pizza",
                        "facebook_url": "slicehouse",
                        "Google_Maps_API_Key": "maps-key"
                    }}))
                }),
            )
            .route("/api/v1/positions", get(move || async move { Json(positions) }))
            .route(
                "/api/v1/locations",
                get(|| async {
                    Json(json!([
                        {"name": "Downtown", "latitude": "39.96", "longitude": "-83.00", "lc_number": "1234"},
                        {"name": "Uptown", "latitude": "40.06", "longitude": "-82.90"}
                    ]))
                }),
            )
            .route(
                "/api/v1/feedback",
                get(|| async {
                    Json(json!([
                        {"customer_name": "Ann", "rating": 5, "comment": "Great", "email": ""},
                        {"customer_name": "Bob", "rating": 2, "comment": "Cold", "email": ""}
                    ]))
                }),
            )
    }

    #[tokio::test]
    async fn test_home_renders_every_section() {
        let url = spawn_backend(backend(positions_json(10))).await;
        let (status, html) = get_page(build_router(test_state(&url)), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<title>PNE Pizza - Delicious Pizza Near You</title>"));
        assert!(html.contains(">Slice House<"));
        assert!(html.contains("https://facebook.com/slicehouse"));
        assert!(html.contains("2 Stores"));
        assert!(html.contains(r#"data-api-key="maps-key""#));
        assert!(html.contains("Ann"));
        assert!(!html.contains("Cold"));
        assert_eq!(html.matches(r#"class="card job""#).count(), 8);
        assert!(html.contains("Show More Openings"));
        assert!(html.contains("Why Join PNE Pizza?"));
        assert!(html.contains(r#"action="/contact#contact""#));
    }

    #[tokio::test]
    async fn test_home_selects_location_from_query() {
        let url = spawn_backend(backend(positions_json(0))).await;
        let (_, html) = get_page(build_router(test_state(&url)), "/?location=0").await;
        assert!(html.contains(r#"class="info-window""#));
        assert!(html.contains(r#"data-zoom="15""#));
        assert!(html.contains("littlecaesars.com/en-us/order/pickup/stores/1234/order-time/"));

        let (status, html) = get_page(build_router(test_state(&url)), "/?location=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!html.contains(r#"class="info-window""#));
        assert!(html.contains(r#"data-zoom="6""#));
    }

    #[tokio::test]
    async fn test_empty_positions_show_empty_state() {
        let url = spawn_backend(backend(positions_json(0))).await;
        let (_, html) = get_page(build_router(test_state(&url)), "/careers").await;
        assert!(html.contains("No job openings available at this time."));
        assert!(html.contains("<title>Careers at PNE Pizza - Join Our Team</title>"));
    }

    #[tokio::test]
    async fn test_careers_page_lists_all_and_expands() {
        let url = spawn_backend(backend(positions_json(10))).await;
        let (_, html) = get_page(build_router(test_state(&url)), "/careers?expanded=job-3").await;
        assert_eq!(html.matches(r#"class="card job""#).count(), 10);
        assert_eq!(html.matches("line-clamp-3").count(), 9);
    }

    #[tokio::test]
    async fn test_backend_down_still_renders_fallbacks() {
        let url = closed_port_url().await;
        let (status, html) = get_page(build_router(test_state(&url)), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#"<span class="brand">PNE PIZZA</span>"#));
        assert!(html.contains("<h3>PNE PIZZA</h3>"));
        assert!(!html.contains("facebook.com"));
        assert!(!html.contains("instagram.com"));
        assert!(html.contains("Unable to load job openings"));
        assert!(html.contains("Show More Openings"));
        assert!(html.contains("No feedbacks available yet."));
    }

    #[tokio::test]
    async fn test_about_page() {
        let backend = Router::new()
            .route(
                "/api/v1/milestones",
                get(|| async {
                    Json(json!([{"date": "2020-06-01", "title": "Expansion", "description": "Ten stores"}]))
                }),
            )
            .route(
                "/api/v1/team-members",
                get(|| async { Json(json!([{"name": "Ada", "role": "Owner", "description": "Founder"}])) }),
            );
        let url = spawn_backend(backend).await;
        let (_, html) = get_page(build_router(test_state(&url)), "/about").await;
        assert!(html.contains("June 2020"));
        assert!(html.contains("/images/default-profile.jpg"));
        assert!(html.contains("<title>About PNE Pizza - Our Story</title>"));
    }

    #[tokio::test]
    async fn test_sell_your_store_page() {
        let url = closed_port_url().await;
        let (status, html) = get_page(build_router(test_state(&url)), "/sell-your-store").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#"action="/sell-your-store#inquiry""#));
        assert!(html.contains("Sell Your Store to PNE Pizza LLC"));
    }

    #[tokio::test]
    async fn test_hung_settings_backend_does_not_block_pages() {
        let backend = Router::new().route(
            "/api/v1/settings",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Json(json!({"success": true, "data": {"website_title": "Never"}}))
            }),
        );
        let url = spawn_backend(backend).await;
        let mut config = test_config(&url);
        config.settings_wait = Duration::from_millis(200);
        let app = build_router(test_state_with(config));

        let (status, html) = tokio::time::timeout(
            Duration::from_secs(5),
            get_page(app, "/sell-your-store"),
        )
        .await
        .expect("page rendered while settings were hung");

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#"<span class="brand">PNE PIZZA</span>"#));
        assert!(!html.contains("Never"));
    }
}
