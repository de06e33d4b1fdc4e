//! # Server Configuration
//!
//! Router, shared state and listener setup for the clinic CRM.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers::{self, api, customers, pets};
use crate::telemetry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(customers::index))
        .route("/customers", get(customers::list_customers))
        .route("/customer/{id}", get(customers::customer_detail))
        .route(
            "/add_customer",
            get(customers::add_customer_form).post(customers::add_customer),
        )
        .route(
            "/edit_customer/{id}",
            get(customers::edit_customer_form).post(customers::edit_customer),
        )
        .route("/delete_customer/{id}", post(customers::delete_customer))
        .route(
            "/add_pet/{customer_id}",
            get(pets::add_pet_form).post(pets::add_pet),
        )
        .route(
            "/edit_pet/{id}",
            get(pets::edit_pet_form).post(pets::edit_pet),
        )
        .route("/delete_pet/{id}", post(pets::delete_pet))
        .route("/api/customers", get(api::api_customers))
        .route("/api/customer/{id}", get(api::api_customer))
        .route("/api/pets", get(api::api_pets))
        .route("/health", get(handlers::health))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(telemetry::trace_context_middleware))
}

/// Starts the server with the given configuration
pub async fn run_server(config: &AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let addr = config
        .bind_addr()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    let app = create_app(AppState { db });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, profile = %config.profile, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health,
        crate::handlers::api::api_customers,
        crate::handlers::api::api_customer,
        crate::handlers::api::api_pets,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::models::CustomerRecord,
            crate::models::PetRecord,
            crate::error::ApiError,
        )
    ),
    tags(
        (name = "customers", description = "Clinic customers and their pets"),
        (name = "pets", description = "Registered pets"),
        (name = "service", description = "Service information"),
    ),
    info(
        title = "Veterinary CRM API",
        description = "Read-only JSON API for the clinic's customers and pets",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
