//! Modelo de Car
//!
//! Este módulo contiene el struct Car del registro de vehículos del taller.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Car - mapea exactamente a la tabla cars
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: Uuid,
    pub registration_number: String,
    pub customer_id: Uuid,
    pub created_at: DateTime<Utc>,
}
