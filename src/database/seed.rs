//! Datos de demostración para desarrollo
//!
//! Carga el juego de datos demo (admin, mecánicos, clientes, vehículos y un
//! par de servicios) de forma idempotente. Solo se ejecuta en development.

use crate::models::car::Car;
use crate::models::service_record::{ServiceRecord, ServiceStatus};
use crate::models::user::{User, UserRole};
use crate::repositories::car_repository::CarRepository;
use crate::repositories::service_record_repository::ServiceRecordRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use bcrypt::{hash, DEFAULT_COST};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

const DEMO_PASSWORD: &str = "Dorset001^";

pub async fn seed_demo_data(pool: &PgPool) -> Result<(), AppError> {
    let users = UserRepository::new(pool.clone());
    let cars = CarRepository::new(pool.clone());
    let records = ServiceRecordRepository::new(pool.clone());

    let admin = ensure_user(
        &users,
        "admin@carservice.com",
        "Admin",
        "User",
        None,
        None,
        UserRole::Admin,
    )
    .await?;

    let mechanic1 = ensure_user(
        &users,
        "mechanic1@carservice.com",
        "John",
        "Doe",
        None,
        None,
        UserRole::Mechanic,
    )
    .await?;

    ensure_user(
        &users,
        "mechanic2@carservice.com",
        "Jane",
        "Smith",
        None,
        None,
        UserRole::Mechanic,
    )
    .await?;

    let customer1 = ensure_user(
        &users,
        "customer1@carservice.com",
        "Alice",
        "Johnson",
        Some("1234567890"),
        Some("123 Main St"),
        UserRole::Customer,
    )
    .await?;

    let customer2 = ensure_user(
        &users,
        "customer2@carservice.com",
        "Bob",
        "Williams",
        Some("9876543210"),
        Some("456 Elm St"),
        UserRole::Customer,
    )
    .await?;

    seed_cars(pool, &cars, customer1.id, customer2.id).await?;
    seed_service_records(pool, &cars, &records, customer1.id, mechanic1.id, admin.id).await?;

    info!("🌱 Datos de demostración listos");

    Ok(())
}

async fn ensure_user(
    users: &UserRepository,
    email: &str,
    first_name: &str,
    last_name: &str,
    phone_number: Option<&str>,
    address: Option<&str>,
    role: UserRole,
) -> Result<User, AppError> {
    if let Some(existing) = users.find_by_email(email).await? {
        return Ok(existing);
    }

    let password_hash = hash(DEMO_PASSWORD, DEFAULT_COST)
        .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

    let user = User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        password_hash,
        phone_number: phone_number.map(str::to_string),
        address: address.map(str::to_string),
        created_at: Utc::now(),
    };

    let created = users.create(&user).await?;

    if let Some(role_row) = users.find_role_by_name(role.as_str()).await? {
        users.add_role(created.id, role_row.id).await?;
    }

    info!("🌱 Usuario demo creado: {}", created.email);

    Ok(created)
}

async fn seed_cars(
    pool: &PgPool,
    cars: &CarRepository,
    customer1_id: Uuid,
    customer2_id: Uuid,
) -> Result<(), AppError> {
    if any_rows(pool, "cars").await? {
        return Ok(());
    }

    for (registration_number, customer_id) in [
        ("ABC123", customer1_id),
        ("XYZ789", customer1_id),
        ("DEF456", customer2_id),
    ] {
        let car = Car {
            id: Uuid::new_v4(),
            registration_number: registration_number.to_string(),
            customer_id,
            created_at: Utc::now(),
        };
        cars.create(&car).await?;
    }

    info!("🌱 Vehículos demo creados");

    Ok(())
}

async fn seed_service_records(
    pool: &PgPool,
    cars: &CarRepository,
    records: &ServiceRecordRepository,
    customer1_id: Uuid,
    mechanic1_id: Uuid,
    admin_id: Uuid,
) -> Result<(), AppError> {
    if any_rows(pool, "service_records").await? {
        return Ok(());
    }

    let customer1_cars = cars.find_by_customer(customer1_id).await?;
    let car = match customer1_cars.first() {
        Some(car) => car,
        None => return Ok(()),
    };

    let mut completed = ServiceRecord::new(
        "Regular maintenance and oil change".to_string(),
        Decimal::new(15, 1),
        customer1_id,
        car.id,
        mechanic1_id,
        admin_id,
    );
    completed.service_date = Utc::now() - Duration::days(7);
    completed.status = ServiceStatus::Completed;
    completed.completion_date = Some(Utc::now() - Duration::days(6));
    records.create(&completed).await?;

    let in_progress = ServiceRecord {
        status: ServiceStatus::InProgress,
        ..ServiceRecord::new(
            "Brake system check".to_string(),
            Decimal::ZERO,
            customer1_id,
            car.id,
            mechanic1_id,
            admin_id,
        )
    };
    records.create(&in_progress).await?;

    info!("🌱 Servicios demo creados");

    Ok(())
}

async fn any_rows(pool: &PgPool, table: &str) -> Result<bool, AppError> {
    let query = format!("SELECT EXISTS(SELECT 1 FROM {})", table);
    let row: (bool,) = sqlx::query_as(&query)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking table {}: {}", table, e)))?;

    Ok(row.0)
}
