//! DTOs de autenticación

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::user_dto::UserResponse;
use crate::utils::validation::{validate_password, validate_phone};

/// Request para registrar un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(email)]
    pub email: String,

    #[validate(custom = "validate_password")]
    pub password: String,

    #[validate(must_match = "password")]
    pub confirm_password: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(custom = "validate_phone")]
    pub phone_number: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub address: Option<String>,

    /// Rol solicitado; por defecto Customer
    pub role: Option<String>,
}

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Response de login con token de acceso
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

impl LoginResponse {
    pub fn new(access_token: String, expires_in: u64, user: UserResponse) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}
