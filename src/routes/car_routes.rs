use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use crate::controllers::car_controller::CarController;
use crate::dto::car_dto::{CarResponse, CreateCarRequest, UpdateCarRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, require_admin};
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

/// Lecturas para cualquier usuario autenticado; mutaciones solo admin.
pub fn create_car_router(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_car))
        .route("/:id", put(update_car))
        .route("/:id", delete(delete_car))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/", get(list_cars))
        .route("/:id", get(get_car))
        .route("/customer/:customer_id", get(cars_by_customer))
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<CarResponse>>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let cars = controller.list().await?;
    Ok(Json(cars))
}

async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CarResponse>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let car = controller.get(id).await?;
    Ok(Json(car))
}

async fn cars_by_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let cars = controller.by_customer(customer_id).await?;
    Ok(Json(cars))
}

async fn create_car(
    State(state): State<AppState>,
    Json(request): Json<CreateCarRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CarResponse>>), AppError> {
    let controller = CarController::new(state.pool.clone());
    let car = controller.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            car,
            "Vehículo registrado exitosamente".to_string(),
        )),
    ))
}

async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCarRequest>,
) -> Result<Json<ApiResponse<CarResponse>>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let car = controller.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        car,
        "Vehículo actualizado exitosamente".to_string(),
    )))
}

async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let controller = CarController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
