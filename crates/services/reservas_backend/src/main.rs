// File: services/reservas_backend/src/main.rs
use axum::Router;
use http::{header, Method};
use reservas_config::load_config;
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

mod app_state;

use app_state::AppState;

/// `/api` with health, catalog, auth and calendar routes.
fn api_router(state: &AppState) -> Router {
    let router = reservas_common::routes(state.catalog.clone())
        .merge(reservas_auth::routes(state.auth.clone()))
        .merge(reservas_gcal::routes(state.gcal.clone()));
    Router::new().nest("/api", router)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Arc::new(load_config()?);
    let _log_guard = reservas_common::init_from_config(&config.logging);

    let state = AppState::from_config(&config)?;
    let mut app = api_router(&state);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use reservas_auth::doc::AuthApiDoc;
        use reservas_gcal::doc::GcalApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Reservas API",
                version = "0.1.0",
                description = "Room reservations on Google Calendar",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(GcalApiDoc::openapi());
        openapi_doc.merge(AuthApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    if let Some(dir) = config.server.static_dir.as_deref() {
        info!("Serving static files from {}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    let app = app.layer(cors_layer()).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
