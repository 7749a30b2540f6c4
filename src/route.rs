//! Route definitions for the short-link API
//!
//! - `GET /{id}` - Redirects to the destination (public endpoint)
//! - `POST /api/urls` - Creates a new short link
//! - `GET /api/urls` - Lists links with pagination
//! - `GET /api/urls/{id}` - Shows one link's access statistics

use axum::middleware;
use axum::routing::get;
use axum::Router;

use crate::handler::{create_short_url, link_stats, list_urls, redirect_url, AppState};
use crate::middleware::auth_middleware;

/// Creates the Axum router with every route and the shared state attached
///
/// ```no_run
/// # use shortlink::config::AppConfig;
/// # use shortlink::handler::AppState;
/// # use shortlink::persistence::Persistence;
/// # use shortlink::route::create_app;
/// # use shortlink::service::LinkService;
/// let config = AppConfig::default();
/// let links = LinkService::open(Persistence::new(&config.data_file), &config.base_url);
/// let app = create_app(AppState::new(links, config));
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/urls", get(list_urls).post(create_short_url))
        .route("/urls/{id}", get(link_stats))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/{id}", get(redirect_url))
        .nest("/api", api_routes)
        .with_state(state)
}
