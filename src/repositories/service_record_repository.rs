use crate::dto::service_record_dto::ServiceRecordResponse;
use crate::models::service_record::{ServiceRecord, ServiceStatus};
use crate::utils::errors::AppError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

// Fila de registro de servicio con los nombres resueltos por JOIN
#[derive(Debug, sqlx::FromRow)]
pub struct ServiceRecordRow {
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

impl From<ServiceRecordRow> for ServiceRecordResponse {
    fn from(row: ServiceRecordRow) -> Self {
        Self {
            id: row.id,
            service_date: row.service_date,
            completion_date: row.completion_date,
            description: row.description,
            hours_worked: row.hours_worked,
            service_cost: row.service_cost,
            status: row.status,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            car_id: row.car_id,
            car_registration_number: row.car_registration_number,
            assigned_mechanic_id: row.assigned_mechanic_id,
            mechanic_name: row.mechanic_name,
            requested_by_id: row.requested_by_id,
            requested_by_name: row.requested_by_name,
        }
    }
}

const RECORD_DETAIL_SELECT: &str = r#"
    SELECT sr.id, sr.service_date, sr.completion_date, sr.description,
           sr.hours_worked, sr.service_cost, sr.status,
           sr.customer_id, cu.first_name || ' ' || cu.last_name AS customer_name,
           sr.car_id, ca.registration_number AS car_registration_number,
           sr.assigned_mechanic_id, me.first_name || ' ' || me.last_name AS mechanic_name,
           sr.requested_by_id, rq.first_name || ' ' || rq.last_name AS requested_by_name
    FROM service_records sr
    JOIN users cu ON cu.id = sr.customer_id
    JOIN cars ca ON ca.id = sr.car_id
    JOIN users me ON me.id = sr.assigned_mechanic_id
    JOIN users rq ON rq.id = sr.requested_by_id
"#;

pub struct ServiceRecordRepository {
    pool: PgPool,
}

impl ServiceRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, record: &ServiceRecord) -> Result<ServiceRecord, AppError> {
        let created = sqlx::query_as::<_, ServiceRecord>(
            r#"
            INSERT INTO service_records
                (id, service_date, completion_date, description, hours_worked, service_cost,
                 status, customer_id, car_id, assigned_mechanic_id, requested_by_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#
        )
        .bind(record.id)
        .bind(record.service_date)
        .bind(record.completion_date)
        .bind(&record.description)
        .bind(record.hours_worked)
        .bind(record.service_cost)
        .bind(record.status)
        .bind(record.customer_id)
        .bind(record.car_id)
        .bind(record.assigned_mechanic_id)
        .bind(record.requested_by_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating service record: {}", e)))?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceRecord>, AppError> {
        let record = sqlx::query_as::<_, ServiceRecord>(
            "SELECT * FROM service_records WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error finding service record: {}", e)))?;

        Ok(record)
    }

    pub async fn find_detailed(&self, id: Uuid) -> Result<Option<ServiceRecordRow>, AppError> {
        let query = format!("{} WHERE sr.id = $1", RECORD_DETAIL_SELECT);
        let record = sqlx::query_as::<_, ServiceRecordRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding service record: {}", e)))?;

        Ok(record)
    }

    pub async fn find_all_detailed(&self) -> Result<Vec<ServiceRecordRow>, AppError> {
        let query = format!("{} ORDER BY sr.service_date DESC", RECORD_DETAIL_SELECT);
        let records = sqlx::query_as::<_, ServiceRecordRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing service records: {}", e)))?;

        Ok(records)
    }

    pub async fn find_by_mechanic(&self, mechanic_id: Uuid) -> Result<Vec<ServiceRecordRow>, AppError> {
        let query = format!(
            "{} WHERE sr.assigned_mechanic_id = $1 ORDER BY sr.service_date DESC",
            RECORD_DETAIL_SELECT
        );
        let records = sqlx::query_as::<_, ServiceRecordRow>(&query)
            .bind(mechanic_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing records by mechanic: {}", e)))?;

        Ok(records)
    }

    pub async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<ServiceRecordRow>, AppError> {
        let query = format!(
            "{} WHERE sr.customer_id = $1 ORDER BY sr.service_date DESC",
            RECORD_DETAIL_SELECT
        );
        let records = sqlx::query_as::<_, ServiceRecordRow>(&query)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing records by customer: {}", e)))?;

        Ok(records)
    }

    pub async fn find_by_requester(&self, requested_by_id: Uuid) -> Result<Vec<ServiceRecordRow>, AppError> {
        let query = format!(
            "{} WHERE sr.requested_by_id = $1 ORDER BY sr.service_date DESC",
            RECORD_DETAIL_SELECT
        );
        let records = sqlx::query_as::<_, ServiceRecordRow>(&query)
            .bind(requested_by_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing records by requester: {}", e)))?;

        Ok(records)
    }

    /// Persistir el estado completo de un registro ya cargado.
    /// Última escritura gana: no hay token de versión.
    pub async fn save(&self, record: &ServiceRecord) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE service_records
            SET description = $2, hours_worked = $3, service_cost = $4, status = $5,
                completion_date = $6, assigned_mechanic_id = $7
            WHERE id = $1
            "#
        )
        .bind(record.id)
        .bind(&record.description)
        .bind(record.hours_worked)
        .bind(record.service_cost)
        .bind(record.status)
        .bind(record.completion_date)
        .bind(record.assigned_mechanic_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating service record: {}", e)))?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM service_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting service record: {}", e)))?;

        Ok(result.rows_affected())
    }
}
