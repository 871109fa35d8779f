//! DTOs de usuarios

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::User;
use crate::utils::validation::{validate_password, validate_phone};

/// Response de usuario para la API (sin password)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn from_user(user: User, roles: Vec<String>) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            address: user.address,
            roles,
            created_at: user.created_at,
        }
    }
}

/// Request para actualizar un usuario existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone_number: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub address: Option<String>,

    #[validate(custom = "validate_password")]
    pub password: Option<String>,
}
