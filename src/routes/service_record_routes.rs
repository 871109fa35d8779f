use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use crate::controllers::service_record_controller::ServiceRecordController;
use crate::dto::service_record_dto::{
    CostResponse, CreateServiceRecordRequest, ServiceRecordResponse, UpdateServiceRecordRequest,
};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

/// Registros de servicio. El alcance por rol se resuelve en el controller.
pub fn create_service_record_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_records))
        .route("/", post(create_record))
        .route("/:id", get(get_record))
        .route("/:id", put(update_record))
        .route("/:id", delete(delete_record))
        .route("/:id/assign/:mechanic_id", post(assign_mechanic))
        .route("/:id/complete", post(complete_record))
        .route("/:id/cost", get(record_cost))
        .route("/mechanic/:id", get(records_by_mechanic))
        .route("/customer/:id", get(records_by_customer))
        .route("/requester/:id", get(records_by_requester))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_records(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<ServiceRecordResponse>>, AppError> {
    let controller = ServiceRecordController::new(state.pool.clone());
    let records = controller.list(&user).await?;
    Ok(Json(records))
}

async fn create_record(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateServiceRecordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let controller = ServiceRecordController::new(state.pool.clone());
    let record = controller.create(&user, request).await?;
    let location = format!("/api/service-records/{}", record.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record),
    ))
}

async fn get_record(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceRecordResponse>, AppError> {
    let controller = ServiceRecordController::new(state.pool.clone());
    let record = controller.get(&user, id).await?;
    Ok(Json(record))
}

async fn update_record(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateServiceRecordRequest>,
) -> Result<StatusCode, AppError> {
    let controller = ServiceRecordController::new(state.pool.clone());
    controller.update(&user, id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_record(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let controller = ServiceRecordController::new(state.pool.clone());
    controller.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn assign_mechanic(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((id, mechanic_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let controller = ServiceRecordController::new(state.pool.clone());
    controller.assign_mechanic(&user, id, mechanic_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn complete_record(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let controller = ServiceRecordController::new(state.pool.clone());
    controller.complete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn record_cost(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CostResponse>, AppError> {
    let controller = ServiceRecordController::new(state.pool.clone());
    let cost = controller.cost(id).await?;
    Ok(Json(cost))
}

async fn records_by_mechanic(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ServiceRecordResponse>>, AppError> {
    let controller = ServiceRecordController::new(state.pool.clone());
    let records = controller.list_by_mechanic(&user, id).await?;
    Ok(Json(records))
}

async fn records_by_customer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ServiceRecordResponse>>, AppError> {
    let controller = ServiceRecordController::new(state.pool.clone());
    let records = controller.list_by_customer(&user, id).await?;
    Ok(Json(records))
}

async fn records_by_requester(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ServiceRecordResponse>>, AppError> {
    let controller = ServiceRecordController::new(state.pool.clone());
    let records = controller.list_by_requester(&user, id).await?;
    Ok(Json(records))
}
