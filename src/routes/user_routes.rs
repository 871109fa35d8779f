use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use crate::controllers::user_controller::UserController;
use crate::dto::user_dto::{UpdateUserRequest, UserResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, require_admin};
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

/// Administración de usuarios. Todo el router es solo para administradores.
pub fn create_user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/role/:role", get(list_users_by_role))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
        .route("/:id/roles/:role", post(add_role))
        .route("/:id/roles/:role", delete(remove_role))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let users = controller.list().await?;
    Ok(Json(users))
}

async fn list_users_by_role(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let users = controller.list_by_role(&role).await?;
    Ok(Json(users))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let user = controller.get(id).await?;
    Ok(Json(user))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let user = controller.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        user,
        "Usuario actualizado exitosamente".to_string(),
    )))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let controller = UserController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_role(
    State(state): State<AppState>,
    Path((id, role)): Path<(Uuid, String)>,
) -> Result<StatusCode, AppError> {
    let controller = UserController::new(state.pool.clone());
    controller.add_role(id, &role).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_role(
    State(state): State<AppState>,
    Path((id, role)): Path<(Uuid, String)>,
) -> Result<StatusCode, AppError> {
    let controller = UserController::new(state.pool.clone());
    controller.remove_role(id, &role).await?;
    Ok(StatusCode::NO_CONTENT)
}
