//! DTOs del sistema
//!
//! Este módulo contiene los tipos de request y response de la API.

pub mod auth_dto;
pub mod car_dto;
pub mod service_record_dto;
pub mod user_dto;

use serde::Serialize;

/// Response genérica de la API
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
