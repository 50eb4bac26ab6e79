/// HTTP routing
use crate::{
    api,
    error::{Result, ServerError},
    middleware,
    state::AppState,
};
use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router
///
/// `/health` and `/register` are public; every `/memories` route requires a
/// valid session token.
pub fn create_router(app_state: AppState, cors_origins: &[String]) -> Result<Router> {
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/register", post(api::auth::register));

    let protected_routes = Router::new()
        .route(
            "/memories",
            get(api::memories::list_memories).post(api::memories::create_memory),
        )
        .route(
            "/memories/:id",
            get(api::memories::get_memory)
                .put(api::memories::update_memory)
                .delete(api::memories::delete_memory),
        )
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.sessions),
            middleware::auth_middleware,
        ));

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(cors_layer(cors_origins)?)
        .with_state(app_state))
}

/// CORS policy: mirror any origin when the list is empty, otherwise allow only the listed ones
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        let origins = origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ServerError::Config(format!("Invalid CORS origin: {}", origin)))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}
