//! Modelo de ServiceRecord
//!
//! Este módulo contiene el registro de servicio del taller y su lógica de
//! transición de estados y cálculo de costos. Mapea exactamente al schema
//! PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

lazy_static! {
    /// Tarifa por hora del taller
    pub static ref HOURLY_RATE: Decimal = Decimal::new(7500, 2);
}

/// Estado del servicio - mapea al ENUM service_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "service_status", rename_all = "snake_case")]
pub enum ServiceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Pending => "Pending",
            ServiceStatus::InProgress => "InProgress",
            ServiceStatus::Completed => "Completed",
            ServiceStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(ServiceStatus::Pending),
            "inprogress" | "in_progress" => Some(ServiceStatus::InProgress),
            "completed" => Some(ServiceStatus::Completed),
            "cancelled" => Some(ServiceStatus::Cancelled),
            _ => None,
        }
    }
}

/// Calcular el costo de un servicio a partir de las horas trabajadas.
/// Las horas parciales se facturan como hora completa.
pub fn cost_for_hours(hours: Decimal) -> Decimal {
    (hours.ceil() * *HOURLY_RATE).round_dp(2)
}

/// ServiceRecord - mapea exactamente a la tabla service_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceRecord {
    pub id: Uuid,
    pub service_date: DateTime<Utc>,
    pub completion_date: Option<DateTime<Utc>>,
    pub description: String,
    pub hours_worked: Decimal,
    pub service_cost: Decimal,
    pub status: ServiceStatus,
    pub customer_id: Uuid,
    pub car_id: Uuid,
    pub assigned_mechanic_id: Uuid,
    pub requested_by_id: Uuid,
}

/// Cambios parciales sobre un registro de servicio
#[derive(Debug, Clone, Default)]
pub struct ServiceRecordChanges {
    pub description: Option<String>,
    pub hours_worked: Option<Decimal>,
    pub service_cost: Option<Decimal>,
    pub status: Option<ServiceStatus>,
    pub assigned_mechanic_id: Option<Uuid>,
}

impl ServiceRecord {
    /// Crear un nuevo registro de servicio en estado Pending
    pub fn new(
        description: String,
        hours_worked: Decimal,
        customer_id: Uuid,
        car_id: Uuid,
        assigned_mechanic_id: Uuid,
        requested_by_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            service_date: Utc::now(),
            completion_date: None,
            service_cost: cost_for_hours(hours_worked),
            description,
            hours_worked,
            status: ServiceStatus::Pending,
            customer_id,
            car_id,
            assigned_mechanic_id,
            requested_by_id,
        }
    }

    /// Aplicar una actualización parcial sobre el registro.
    ///
    /// El orden de aplicación es relevante: las horas recalculan el costo
    /// y un costo explícito en el mismo cambio lo sobreescribe después.
    pub fn apply_update(&mut self, changes: ServiceRecordChanges, now: DateTime<Utc>) {
        if let Some(description) = changes.description {
            self.description = description;
        }

        if let Some(hours) = changes.hours_worked {
            self.hours_worked = hours;
            self.service_cost = cost_for_hours(hours);
        }

        if let Some(cost) = changes.service_cost {
            self.service_cost = cost;
        }

        if let Some(status) = changes.status {
            self.apply_status(status, now);
        }

        if let Some(mechanic_id) = changes.assigned_mechanic_id {
            self.assigned_mechanic_id = mechanic_id;
        }
    }

    /// Cambiar el estado del registro.
    ///
    /// La fecha de finalización se fija una sola vez, en la primera
    /// transición a Completed, y nunca se borra después.
    pub fn apply_status(&mut self, status: ServiceStatus, now: DateTime<Utc>) {
        self.status = status;
        if status == ServiceStatus::Completed && self.completion_date.is_none() {
            self.completion_date = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn sample_record() -> ServiceRecord {
        ServiceRecord::new(
            "Cambio de frenos".to_string(),
            dec("2"),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        )
    }

    #[test]
    fn test_cost_for_hours() {
        assert_eq!(cost_for_hours(dec("0")), dec("0.00"));
        assert_eq!(cost_for_hours(dec("1")), dec("75.00"));
        assert_eq!(cost_for_hours(dec("2")), dec("150.00"));
        assert_eq!(cost_for_hours(dec("2.5")), dec("225.00"));
        assert_eq!(cost_for_hours(dec("3.5")), dec("300.00"));
        assert_eq!(cost_for_hours(dec("0.1")), dec("75.00"));
    }

    #[test]
    fn test_new_record_defaults() {
        let record = sample_record();
        assert_eq!(record.status, ServiceStatus::Pending);
        assert_eq!(record.completion_date, None);
        assert_eq!(record.service_cost, dec("150.00"));
    }

    #[test]
    fn test_apply_update_empty_changes_is_noop() {
        let mut record = sample_record();
        let before = record.clone();

        record.apply_update(ServiceRecordChanges::default(), Utc::now());

        assert_eq!(record.description, before.description);
        assert_eq!(record.hours_worked, before.hours_worked);
        assert_eq!(record.service_cost, before.service_cost);
        assert_eq!(record.status, before.status);
        assert_eq!(record.assigned_mechanic_id, before.assigned_mechanic_id);
    }

    #[test]
    fn test_apply_update_hours_recompute_cost() {
        let mut record = sample_record();
        let changes = ServiceRecordChanges {
            hours_worked: Some(dec("3.5")),
            ..Default::default()
        };

        record.apply_update(changes, Utc::now());

        assert_eq!(record.hours_worked, dec("3.5"));
        assert_eq!(record.service_cost, dec("300.00"));
    }

    #[test]
    fn test_apply_update_explicit_cost_wins_over_hours() {
        let mut record = sample_record();
        let changes = ServiceRecordChanges {
            hours_worked: Some(dec("3.5")),
            service_cost: Some(dec("199.99")),
            ..Default::default()
        };

        record.apply_update(changes, Utc::now());

        assert_eq!(record.hours_worked, dec("3.5"));
        assert_eq!(record.service_cost, dec("199.99"));
    }

    #[test]
    fn test_apply_update_cost_without_hours() {
        let mut record = sample_record();
        let changes = ServiceRecordChanges {
            service_cost: Some(dec("500.00")),
            ..Default::default()
        };

        record.apply_update(changes, Utc::now());

        assert_eq!(record.hours_worked, dec("2"));
        assert_eq!(record.service_cost, dec("500.00"));
    }

    #[test]
    fn test_apply_update_reassigns_mechanic() {
        let mut record = sample_record();
        let new_mechanic = Uuid::new_v4();
        let changes = ServiceRecordChanges {
            assigned_mechanic_id: Some(new_mechanic),
            ..Default::default()
        };

        record.apply_update(changes, Utc::now());

        assert_eq!(record.assigned_mechanic_id, new_mechanic);
    }

    #[test]
    fn test_completion_date_set_on_first_completion() {
        let mut record = sample_record();
        let t1 = Utc::now();

        record.apply_status(ServiceStatus::Completed, t1);

        assert_eq!(record.status, ServiceStatus::Completed);
        assert_eq!(record.completion_date, Some(t1));
    }

    #[test]
    fn test_completion_date_is_monotonic() {
        let mut record = sample_record();
        let t1 = Utc::now();
        let t2 = t1 + Duration::hours(1);
        let t3 = t2 + Duration::hours(1);

        record.apply_status(ServiceStatus::Completed, t1);
        // Reabrir el servicio no borra la fecha
        record.apply_status(ServiceStatus::InProgress, t2);
        assert_eq!(record.completion_date, Some(t1));

        // Completarlo de nuevo conserva la fecha original
        record.apply_status(ServiceStatus::Completed, t3);
        assert_eq!(record.completion_date, Some(t1));
    }

    #[test]
    fn test_apply_update_status_sets_completion_date() {
        let mut record = sample_record();
        let now = Utc::now();
        let changes = ServiceRecordChanges {
            status: Some(ServiceStatus::Completed),
            ..Default::default()
        };

        record.apply_update(changes, now);

        assert_eq!(record.status, ServiceStatus::Completed);
        assert_eq!(record.completion_date, Some(now));
    }

    #[test]
    fn test_service_status_round_trip() {
        for status in [
            ServiceStatus::Pending,
            ServiceStatus::InProgress,
            ServiceStatus::Completed,
            ServiceStatus::Cancelled,
        ] {
            assert_eq!(ServiceStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ServiceStatus::from_str("in_progress"), Some(ServiceStatus::InProgress));
        assert_eq!(ServiceStatus::from_str("done"), None);
    }
}
