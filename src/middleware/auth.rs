//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de usuarios autenticados.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::{
    models::user::UserRole,
    repositories::user_repository::UserRepository,
    services::authorization_service,
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token, JwtConfig},
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub roles: Vec<UserRole>,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)
        .map_err(|_| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    // Decodificar y validar JWT
    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &jwt_config)
        .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    // Verificar que el usuario existe en la base de datos
    let repository = UserRepository::new(state.pool.clone());
    let user = repository
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    // Cargar sus roles actuales
    let roles: Vec<UserRole> = repository
        .roles_of(user.id)
        .await?
        .iter()
        .filter_map(|name| UserRole::from_str(name))
        .collect();

    // Inyectar usuario autenticado en las extensions
    let authenticated_user = AuthenticatedUser {
        user_id: user.id,
        full_name: user.full_name(),
        email: user.email,
        roles,
    };
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Middleware para verificar permisos de admin
pub async fn require_admin(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !authorization_service::is_admin(&user.roles) {
        return Err(AppError::Forbidden(
            "Se requieren permisos de administrador".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
