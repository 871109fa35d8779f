//! DTOs de registros de servicio

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::service_record::ServiceStatus;
use crate::utils::validation::{validate_hours_worked, validate_service_cost};

/// Request para crear un registro de servicio
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRecordRequest {
    #[validate(length(min = 1, max = 1000))]
    pub description: String,

    #[validate(custom = "validate_hours_worked")]
    pub hours_worked: Decimal,

    pub customer_id: Uuid,
    pub car_id: Uuid,
    pub assigned_mechanic_id: Uuid,
}

/// Request para actualizar un registro de servicio.
/// El id viaja también en el body y debe coincidir con el de la ruta.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServiceRecordRequest {
    pub id: Uuid,

    #[validate(length(min = 1, max = 1000))]
    pub description: Option<String>,

    #[validate(custom = "validate_hours_worked")]
    pub hours_worked: Option<Decimal>,

    #[validate(custom = "validate_service_cost")]
    pub service_cost: Option<Decimal>,

    pub status: Option<ServiceStatus>,

    pub assigned_mechanic_id: Option<Uuid>,
}

/// Response de registro de servicio con nombres denormalizados
#[derive(Debug, Serialize)]
pub struct ServiceRecordResponse {
    pub id: Uuid,
    pub service_date: DateTime<Utc>,
    pub completion_date: Option<DateTime<Utc>>,
    pub description: String,
    pub hours_worked: Decimal,
    pub service_cost: Decimal,
    pub status: ServiceStatus,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub car_id: Uuid,
    pub car_registration_number: String,
    pub assigned_mechanic_id: Uuid,
    pub mechanic_name: String,
    pub requested_by_id: Uuid,
    pub requested_by_name: String,
}

/// Response del costo total de un servicio
#[derive(Debug, Serialize)]
pub struct CostResponse {
    #[serde(rename = "TotalCost")]
    pub total_cost: Decimal,
}
