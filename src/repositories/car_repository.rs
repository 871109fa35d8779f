use crate::dto::car_dto::CarResponse;
use crate::models::car::Car;
use crate::utils::errors::AppError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

// Fila de vehículo con el nombre del dueño resuelto por JOIN
#[derive(Debug, sqlx::FromRow)]
pub struct CarWithOwner {
    pub id: Uuid,
    pub registration_number: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<CarWithOwner> for CarResponse {
    fn from(row: CarWithOwner) -> Self {
        Self {
            id: row.id,
            registration_number: row.registration_number,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            created_at: row.created_at,
        }
    }
}

const CAR_WITH_OWNER_SELECT: &str = r#"
    SELECT c.id, c.registration_number, c.customer_id,
           u.first_name || ' ' || u.last_name AS customer_name,
           c.created_at
    FROM cars c
    JOIN users u ON u.id = c.customer_id
"#;

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, car: &Car) -> Result<Car, AppError> {
        let created = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (id, registration_number, customer_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#
        )
        .bind(car.id)
        .bind(&car.registration_number)
        .bind(car.customer_id)
        .bind(car.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating car: {}", e)))?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding car: {}", e)))?;

        Ok(car)
    }

    pub async fn find_by_id_with_owner(&self, id: Uuid) -> Result<Option<CarWithOwner>, AppError> {
        let query = format!("{} WHERE c.id = $1", CAR_WITH_OWNER_SELECT);
        let car = sqlx::query_as::<_, CarWithOwner>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding car: {}", e)))?;

        Ok(car)
    }

    pub async fn find_all_with_owner(&self) -> Result<Vec<CarWithOwner>, AppError> {
        let query = format!("{} ORDER BY c.registration_number", CAR_WITH_OWNER_SELECT);
        let cars = sqlx::query_as::<_, CarWithOwner>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing cars: {}", e)))?;

        Ok(cars)
    }

    pub async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<CarWithOwner>, AppError> {
        let query = format!(
            "{} WHERE c.customer_id = $1 ORDER BY c.registration_number",
            CAR_WITH_OWNER_SELECT
        );
        let cars = sqlx::query_as::<_, CarWithOwner>(&query)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing cars by customer: {}", e)))?;

        Ok(cars)
    }

    pub async fn registration_number_exists(
        &self,
        registration_number: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM cars
                WHERE registration_number = $1 AND ($2::uuid IS NULL OR id != $2)
            )
            "#
        )
        .bind(registration_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking registration number: {}", e)))?;

        Ok(result.0)
    }

    /// Actualizar un vehículo. Devuelve las filas afectadas para detectar
    /// el caso en que el registro fue borrado de forma concurrente.
    pub async fn update(&self, car: &Car) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE cars SET registration_number = $2, customer_id = $3 WHERE id = $1"
        )
        .bind(car.id)
        .bind(&car.registration_number)
        .bind(car.customer_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating car: {}", e)))?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error().and_then(|db| db.code()) {
                // 23503: el vehículo tiene registros de servicio
                Some(code) if code == "23503" => AppError::Conflict(
                    "No se puede eliminar un vehículo con servicios registrados".to_string(),
                ),
                _ => AppError::Database(format!("Error deleting car: {}", e)),
            })?;

        Ok(result.rows_affected())
    }
}
