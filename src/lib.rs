//! Workshop Service Management System
//!
//! Backend de gestión de taller: usuarios con roles (Admin, Mechanic,
//! Customer), vehículos y registros de servicio con su ciclo de vida.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{routing::get, Json, Router};
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use serde_json::json;
use state::AppState;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

/// Construir el router completo de la aplicación
pub fn build_router(state: AppState) -> Router {
    let cors = if state.config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&state.config.cors_origins)
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", routes::auth_routes::create_auth_router(state.clone()))
        .nest("/api/users", routes::user_routes::create_user_router(state.clone()))
        .nest("/api/cars", routes::car_routes::create_car_router(state.clone()))
        .nest(
            "/api/service-records",
            routes::service_record_routes::create_service_record_router(state.clone()),
        )
        // CORS en la posición interior: el preflight se sintetiza con el
        // body por defecto de las rutas, no con los de trace/compresión
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "workshop-system",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
