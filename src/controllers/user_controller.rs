use crate::dto::user_dto::{UpdateUserRequest, UserResponse};
use crate::models::user::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.repository.find_all().await?;

        let mut responses = Vec::with_capacity(users.len());
        for user in users {
            let roles = self.repository.roles_of(user.id).await?;
            responses.push(UserResponse::from_user(user, roles));
        }

        Ok(responses)
    }

    pub async fn list_by_role(&self, role_name: &str) -> Result<Vec<UserResponse>, AppError> {
        let role = UserRole::from_str(role_name)
            .ok_or_else(|| AppError::NotFound("Rol no encontrado".to_string()))?;

        let users = self.repository.find_by_role(role.as_str()).await?;

        let mut responses = Vec::with_capacity(users.len());
        for user in users {
            let roles = self.repository.roles_of(user.id).await?;
            responses.push(UserResponse::from_user(user, roles));
        }

        Ok(responses)
    }

    pub async fn get(&self, id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let roles = self.repository.roles_of(user.id).await?;

        Ok(UserResponse::from_user(user, roles))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        request.validate()?;

        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        // Si cambia el email, verificar que no pertenezca a otro usuario
        if let Some(email) = request.email {
            if !email.eq_ignore_ascii_case(&user.email)
                && self.repository.email_exists(&email).await?
            {
                return Err(AppError::Conflict(
                    "El email ya está registrado".to_string(),
                ));
            }
            user.email = email;
        }

        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if let Some(phone_number) = request.phone_number {
            user.phone_number = Some(phone_number);
        }
        if let Some(address) = request.address {
            user.address = Some(address);
        }
        if let Some(password) = request.password {
            user.password_hash = hash(&password, DEFAULT_COST)
                .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;
        }

        let updated = self.repository.update(&user).await?;
        let roles = self.repository.roles_of(updated.id).await?;

        Ok(UserResponse::from_user(updated, roles))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let rows = self.repository.delete(id).await?;

        if rows == 0 {
            return Err(AppError::NotFound("Usuario no encontrado".to_string()));
        }

        Ok(())
    }

    pub async fn add_role(&self, user_id: Uuid, role_name: &str) -> Result<(), AppError> {
        if self.repository.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("Usuario no encontrado".to_string()));
        }

        let role = UserRole::from_str(role_name)
            .ok_or_else(|| AppError::NotFound("Rol no encontrado".to_string()))?;

        let role_row = self
            .repository
            .find_role_by_name(role.as_str())
            .await?
            .ok_or_else(|| AppError::NotFound("Rol no encontrado".to_string()))?;

        self.repository.add_role(user_id, role_row.id).await?;

        Ok(())
    }

    pub async fn remove_role(&self, user_id: Uuid, role_name: &str) -> Result<(), AppError> {
        if self.repository.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("Usuario no encontrado".to_string()));
        }

        let role = UserRole::from_str(role_name)
            .ok_or_else(|| AppError::NotFound("Rol no encontrado".to_string()))?;

        let role_row = self
            .repository
            .find_role_by_name(role.as_str())
            .await?
            .ok_or_else(|| AppError::NotFound("Rol no encontrado".to_string()))?;

        self.repository.remove_role(user_id, role_row.id).await?;

        Ok(())
    }
}
