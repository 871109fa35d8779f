use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterUserRequest};
use crate::dto::user_dto::UserResponse;
use crate::dto::ApiResponse;
use crate::models::user::{User, UserRole};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct AuthController {
    repository: UserRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn register(
        &self,
        request: RegisterUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        // Rol solicitado, Customer por defecto
        let role = match request.role.as_deref() {
            Some(name) => {
                UserRole::from_str(name).ok_or_else(|| bad_request_error("Rol desconocido"))?
            }
            None => UserRole::Customer,
        };

        // Verificar que el email no esté registrado
        if self.repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict(
                "El email ya está registrado".to_string(),
            ));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let user = User {
            id: Uuid::new_v4(),
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password_hash,
            phone_number: request.phone_number,
            address: request.address,
            created_at: Utc::now(),
        };

        let saved = self.repository.create(&user).await?;

        // Otorgar el rol si existe en la base
        if let Some(role_row) = self.repository.find_role_by_name(role.as_str()).await? {
            self.repository.add_role(saved.id, role_row.id).await?;
        }

        let roles = self.repository.roles_of(saved.id).await?;

        Ok(ApiResponse::success_with_message(
            UserResponse::from_user(saved, roles),
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    pub async fn login(
        &self,
        request: LoginRequest,
        config: &EnvironmentConfig,
    ) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let jwt_config = JwtConfig::from(config);
        let token = generate_token(user.id, &user.email, &jwt_config)?;
        let roles = self.repository.roles_of(user.id).await?;

        Ok(LoginResponse::new(
            token,
            jwt_config.expiration,
            UserResponse::from_user(user, roles),
        ))
    }

    pub async fn me(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let roles = self.repository.roles_of(user.id).await?;

        Ok(UserResponse::from_user(user, roles))
    }
}
