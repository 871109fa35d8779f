//! DTOs de vehículos

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::validate_registration_number;

/// Request para registrar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(custom = "validate_registration_number")]
    pub registration_number: String,

    pub customer_id: Uuid,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(custom = "validate_registration_number")]
    pub registration_number: Option<String>,

    pub customer_id: Option<Uuid>,
}

/// Response de vehículo con el nombre del dueño
#[derive(Debug, Serialize)]
pub struct CarResponse {
    pub id: Uuid,
    pub registration_number: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
}
