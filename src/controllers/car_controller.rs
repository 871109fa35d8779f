use crate::dto::car_dto::{CarResponse, CreateCarRequest, UpdateCarRequest};
use crate::models::car::Car;
use crate::models::user::UserRole;
use crate::repositories::car_repository::CarRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::normalize_registration_number;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct CarController {
    repository: CarRepository,
    users: UserRepository,
}

impl CarController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CarRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateCarRequest) -> Result<CarResponse, AppError> {
        request.validate()?;

        let registration_number = normalize_registration_number(&request.registration_number);

        // El propietario debe existir y tener rol Customer
        if self.users.find_by_id(request.customer_id).await?.is_none() {
            return Err(bad_request_error("El cliente indicado no existe"));
        }
        if !self
            .users
            .has_role(request.customer_id, UserRole::Customer.as_str())
            .await?
        {
            return Err(bad_request_error(
                "El usuario indicado no tiene rol de cliente",
            ));
        }

        if self
            .repository
            .registration_number_exists(&registration_number, None)
            .await?
        {
            return Err(AppError::Conflict(
                "Ya existe un vehículo con esa matrícula".to_string(),
            ));
        }

        let car = Car {
            id: Uuid::new_v4(),
            registration_number,
            customer_id: request.customer_id,
            created_at: Utc::now(),
        };

        let created = self.repository.create(&car).await?;

        let row = self
            .repository
            .find_by_id_with_owner(created.id)
            .await?
            .ok_or_else(|| AppError::Internal("Vehículo creado pero no encontrado".to_string()))?;

        Ok(row.into())
    }

    pub async fn list(&self) -> Result<Vec<CarResponse>, AppError> {
        let rows = self.repository.find_all_with_owner().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<CarResponse, AppError> {
        let row = self
            .repository
            .find_by_id_with_owner(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(row.into())
    }

    pub async fn by_customer(&self, customer_id: Uuid) -> Result<Vec<CarResponse>, AppError> {
        let rows = self.repository.find_by_customer(customer_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: Uuid, request: UpdateCarRequest) -> Result<CarResponse, AppError> {
        request.validate()?;

        let mut car = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if let Some(registration_number) = request.registration_number {
            let registration_number = normalize_registration_number(&registration_number);

            if self
                .repository
                .registration_number_exists(&registration_number, Some(id))
                .await?
            {
                return Err(AppError::Conflict(
                    "Ya existe un vehículo con esa matrícula".to_string(),
                ));
            }

            car.registration_number = registration_number;
        }

        if let Some(customer_id) = request.customer_id {
            if self.users.find_by_id(customer_id).await?.is_none() {
                return Err(bad_request_error("El cliente indicado no existe"));
            }
            if !self
                .users
                .has_role(customer_id, UserRole::Customer.as_str())
                .await?
            {
                return Err(bad_request_error(
                    "El usuario indicado no tiene rol de cliente",
                ));
            }
            car.customer_id = customer_id;
        }

        let rows = self.repository.update(&car).await?;
        if rows == 0 {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        let row = self
            .repository
            .find_by_id_with_owner(car.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(row.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let rows = self.repository.delete(id).await?;

        if rows == 0 {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        Ok(())
    }
}
