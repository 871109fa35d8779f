use crate::dto::service_record_dto::{
    CostResponse, CreateServiceRecordRequest, ServiceRecordResponse, UpdateServiceRecordRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::service_record::{
    cost_for_hours, ServiceRecord, ServiceRecordChanges, ServiceStatus,
};
use crate::models::user::UserRole;
use crate::repositories::car_repository::CarRepository;
use crate::repositories::service_record_repository::ServiceRecordRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::authorization_service::{self, RecordScope};
use crate::utils::errors::{bad_request_error, forbidden_error, AppError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct ServiceRecordController {
    records: ServiceRecordRepository,
    users: UserRepository,
    cars: CarRepository,
}

impl ServiceRecordController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            records: ServiceRecordRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            cars: CarRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        actor: &AuthenticatedUser,
    ) -> Result<Vec<ServiceRecordResponse>, AppError> {
        let rows = match authorization_service::list_scope(actor.user_id, &actor.roles) {
            RecordScope::All => self.records.find_all_detailed().await?,
            RecordScope::Mechanic(id) => self.records.find_by_mechanic(id).await?,
            RecordScope::Customer(id) => self.records.find_by_customer(id).await?,
            RecordScope::Requester(id) => self.records.find_by_requester(id).await?,
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_mechanic(
        &self,
        actor: &AuthenticatedUser,
        mechanic_id: Uuid,
    ) -> Result<Vec<ServiceRecordResponse>, AppError> {
        if !authorization_service::is_admin(&actor.roles) {
            return Err(forbidden_error(
                "list records by mechanic",
                "administrator role required",
            ));
        }

        let rows = self.records.find_by_mechanic(mechanic_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_customer(
        &self,
        actor: &AuthenticatedUser,
        customer_id: Uuid,
    ) -> Result<Vec<ServiceRecordResponse>, AppError> {
        if !authorization_service::is_admin(&actor.roles) {
            return Err(forbidden_error(
                "list records by customer",
                "administrator role required",
            ));
        }

        let rows = self.records.find_by_customer(customer_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_requester(
        &self,
        actor: &AuthenticatedUser,
        requested_by_id: Uuid,
    ) -> Result<Vec<ServiceRecordResponse>, AppError> {
        if !authorization_service::is_admin(&actor.roles) {
            return Err(forbidden_error(
                "list records by requester",
                "administrator role required",
            ));
        }

        let rows = self.records.find_by_requester(requested_by_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ServiceRecordResponse, AppError> {
        let record = self
            .records
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Registro de servicio no encontrado".to_string()))?;

        // El registro existe: si no es visible para el actor, 403, no 404
        if !authorization_service::can_view_record(actor.user_id, &actor.roles, &record) {
            return Err(forbidden_error(
                "view service record",
                "record does not belong to this user",
            ));
        }

        let row = self
            .records
            .find_detailed(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Registro de servicio no encontrado".to_string()))?;

        Ok(row.into())
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateServiceRecordRequest,
    ) -> Result<ServiceRecordResponse, AppError> {
        if !authorization_service::can_create_records(&actor.roles) {
            return Err(forbidden_error(
                "create service records",
                "administrator role required",
            ));
        }

        request.validate()?;

        if self.users.find_by_id(request.customer_id).await?.is_none() {
            return Err(bad_request_error("El cliente indicado no existe"));
        }

        let car = self
            .cars
            .find_by_id(request.car_id)
            .await?
            .ok_or_else(|| bad_request_error("El vehículo indicado no existe"))?;

        // El vehículo debe pertenecer al cliente del registro
        if car.customer_id != request.customer_id {
            return Err(bad_request_error(
                "El vehículo no pertenece al cliente indicado",
            ));
        }

        self.ensure_mechanic(request.assigned_mechanic_id).await?;

        let record = ServiceRecord::new(
            request.description,
            request.hours_worked,
            request.customer_id,
            request.car_id,
            request.assigned_mechanic_id,
            actor.user_id,
        );

        let created = self.records.create(&record).await?;

        let row = self
            .records
            .find_detailed(created.id)
            .await?
            .ok_or_else(|| {
                AppError::Internal("Registro creado pero no encontrado".to_string())
            })?;

        Ok(row.into())
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateServiceRecordRequest,
    ) -> Result<(), AppError> {
        if request.id != id {
            return Err(bad_request_error("ID mismatch"));
        }

        request.validate()?;

        let mut record = self
            .records
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Registro de servicio no encontrado".to_string()))?;

        if !authorization_service::can_edit_record(actor.user_id, &actor.roles, &record) {
            return Err(forbidden_error(
                "update service record",
                "only the administrator or the assigned mechanic can edit it",
            ));
        }

        // Reasignar mecánico por PUT es operación de administrador
        if let Some(mechanic_id) = request.assigned_mechanic_id {
            if !authorization_service::can_assign_mechanic(&actor.roles) {
                return Err(forbidden_error(
                    "reassign mechanic",
                    "administrator role required",
                ));
            }
            self.ensure_mechanic(mechanic_id).await?;
        }

        let changes = ServiceRecordChanges {
            description: request.description,
            hours_worked: request.hours_worked,
            service_cost: request.service_cost,
            status: request.status,
            assigned_mechanic_id: request.assigned_mechanic_id,
        };

        record.apply_update(changes, Utc::now());

        let rows = self.records.save(&record).await?;
        if rows == 0 {
            // Borrado concurrente entre la lectura y la escritura
            return Err(AppError::NotFound(
                "Registro de servicio no encontrado".to_string(),
            ));
        }

        info!("Servicio {} actualizado por {}", record.id, actor.email);

        Ok(())
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        if !authorization_service::can_delete_records(&actor.roles) {
            return Err(forbidden_error(
                "delete service records",
                "administrator role required",
            ));
        }

        let rows = self.records.delete(id).await?;
        if removal_outcome(rows)? {
            info!("Servicio {} eliminado por {}", id, actor.email);
        }

        Ok(())
    }

    pub async fn assign_mechanic(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        mechanic_id: Uuid,
    ) -> Result<(), AppError> {
        if !authorization_service::can_assign_mechanic(&actor.roles) {
            return Err(forbidden_error(
                "assign mechanics",
                "administrator role required",
            ));
        }

        let record = self.records.find_by_id(id).await?;

        let mechanic_is_valid = self.users.find_by_id(mechanic_id).await?.is_some()
            && self
                .users
                .has_role(mechanic_id, UserRole::Mechanic.as_str())
                .await?;

        let record = assignment_outcome(record, mechanic_is_valid, mechanic_id, Utc::now())?;

        self.records.save(&record).await?;

        info!(
            "Servicio {} asignado al mecánico {} por {}",
            record.id, mechanic_id, actor.email
        );

        Ok(())
    }

    pub async fn complete(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        let mut record = self
            .records
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Registro de servicio no encontrado".to_string()))?;

        if !authorization_service::can_complete_record(actor.user_id, &actor.roles, &record) {
            return Err(forbidden_error(
                "complete service record",
                "only the administrator or the assigned mechanic can complete it",
            ));
        }

        record.apply_status(ServiceStatus::Completed, Utc::now());

        self.records.save(&record).await?;

        info!("Servicio {} completado por {}", record.id, actor.email);

        Ok(())
    }

    pub async fn cost(&self, id: Uuid) -> Result<CostResponse, AppError> {
        let record = self.records.find_by_id(id).await?;

        Ok(CostResponse {
            total_cost: quoted_cost(record),
        })
    }

    async fn ensure_mechanic(&self, mechanic_id: Uuid) -> Result<(), AppError> {
        if self.users.find_by_id(mechanic_id).await?.is_none() {
            return Err(bad_request_error("El mecánico indicado no existe"));
        }

        if !self
            .users
            .has_role(mechanic_id, UserRole::Mechanic.as_str())
            .await?
        {
            return Err(bad_request_error(
                "El usuario indicado no tiene rol de mecánico",
            ));
        }

        Ok(())
    }
}

/// Cotización de un servicio: se recalcula desde las horas trabajadas,
/// no desde el costo almacenado. Registro inexistente: coste 0, sin error.
fn quoted_cost(record: Option<ServiceRecord>) -> Decimal {
    record
        .map(|record| cost_for_hours(record.hours_worked))
        .unwrap_or(Decimal::ZERO)
}

/// Resultado de una asignación una vez consultados registro y mecánico.
/// Usuario inexistente o sin rol Mechanic: 404, sin mutación.
fn assignment_outcome(
    record: Option<ServiceRecord>,
    mechanic_is_valid: bool,
    mechanic_id: Uuid,
    now: DateTime<Utc>,
) -> Result<ServiceRecord, AppError> {
    let mut record = record
        .ok_or_else(|| AppError::NotFound("Registro de servicio no encontrado".to_string()))?;

    if !mechanic_is_valid {
        return Err(AppError::NotFound("Mecánico no encontrado".to_string()));
    }

    let changes = ServiceRecordChanges {
        assigned_mechanic_id: Some(mechanic_id),
        ..Default::default()
    };
    record.apply_update(changes, now);

    Ok(record)
}

/// Un borrado sin filas afectadas no es un error: el id inexistente se ignora
fn removal_outcome(rows: u64) -> Result<bool, AppError> {
    Ok(rows > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn sample_record() -> ServiceRecord {
        ServiceRecord::new(
            "Revisión de suspensión".to_string(),
            dec("2"),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        )
    }

    #[test]
    fn test_quoted_cost_recomputed_from_hours() {
        let mut record = sample_record();
        record.apply_update(
            ServiceRecordChanges {
                hours_worked: Some(dec("3.5")),
                service_cost: Some(dec("199.99")),
                ..Default::default()
            },
            Utc::now(),
        );

        // El costo manual queda almacenado, pero la cotización sale de las horas
        assert_eq!(record.service_cost, dec("199.99"));
        assert_eq!(quoted_cost(Some(record)), dec("300.00"));
    }

    #[test]
    fn test_quoted_cost_is_zero_for_missing_record() {
        assert_eq!(quoted_cost(None), Decimal::ZERO);
    }

    #[test]
    fn test_assignment_requires_existing_record() {
        let err = assignment_outcome(None, true, Uuid::new_v4(), Utc::now()).unwrap_err();

        assert!(matches!(
            err,
            AppError::NotFound(ref msg) if msg == "Registro de servicio no encontrado"
        ));
    }

    #[test]
    fn test_assignment_rejects_unknown_or_roleless_mechanic() {
        let err = assignment_outcome(Some(sample_record()), false, Uuid::new_v4(), Utc::now())
            .unwrap_err();

        // Sin registro resultante no hay escritura posible
        assert!(matches!(
            err,
            AppError::NotFound(ref msg) if msg == "Mecánico no encontrado"
        ));
    }

    #[test]
    fn test_assignment_changes_only_the_mechanic() {
        let record = sample_record();
        let new_mechanic = Uuid::new_v4();

        let updated =
            assignment_outcome(Some(record), true, new_mechanic, Utc::now()).unwrap();

        assert_eq!(updated.assigned_mechanic_id, new_mechanic);
        assert_eq!(updated.status, ServiceStatus::Pending);
        assert_eq!(updated.completion_date, None);
    }

    #[test]
    fn test_removal_outcome_unknown_id_is_silent() {
        assert!(matches!(removal_outcome(0), Ok(false)));
    }

    #[test]
    fn test_removal_outcome_reports_deletion() {
        assert!(matches!(removal_outcome(1), Ok(true)));
    }
}
