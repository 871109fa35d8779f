use crate::models::user::{Role, User};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> Result<User, AppError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, first_name, last_name, password_hash, phone_number, address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(&user.phone_number)
        .bind(&user.address)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating user: {}", e)))?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding user: {}", e)))?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding user by email: {}", e)))?;

        Ok(user)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))"
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking email: {}", e)))?;

        Ok(result.0)
    }

    pub async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing users: {}", e)))?;

        Ok(users)
    }

    pub async fn find_by_role(&self, role_name: &str) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.* FROM users u
            JOIN user_roles ur ON ur.user_id = u.id
            JOIN roles r ON r.id = ur.role_id
            WHERE LOWER(r.name) = LOWER($1)
            ORDER BY u.last_name, u.first_name
            "#
        )
        .bind(role_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing users by role: {}", e)))?;

        Ok(users)
    }

    pub async fn update(&self, user: &User) -> Result<User, AppError> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $2, first_name = $3, last_name = $4, password_hash = $5,
                phone_number = $6, address = $7
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(&user.phone_number)
        .bind(&user.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating user: {}", e)))?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error().and_then(|db| db.code()) {
                // 23503: el usuario está referenciado por vehículos o servicios
                Some(code) if code == "23503" => AppError::Conflict(
                    "No se puede eliminar un usuario con vehículos o servicios asociados"
                        .to_string(),
                ),
                _ => AppError::Database(format!("Error deleting user: {}", e)),
            })?;

        Ok(result.rows_affected())
    }

    pub async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE LOWER(name) = LOWER($1)")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding role: {}", e)))?;

        Ok(role)
    }

    /// Roles de un usuario, ordenados por nombre
    pub async fn roles_of(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        let roles: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT r.name FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error loading user roles: {}", e)))?;

        Ok(roles.into_iter().map(|(name,)| name).collect())
    }

    pub async fn has_role(&self, user_id: Uuid, role_name: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM user_roles ur
                JOIN roles r ON r.id = ur.role_id
                WHERE ur.user_id = $1 AND LOWER(r.name) = LOWER($2)
            )
            "#
        )
        .bind(user_id)
        .bind(role_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking role membership: {}", e)))?;

        Ok(result.0)
    }

    /// Agregar un rol a un usuario. Idempotente si ya lo tiene.
    pub async fn add_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2) ON CONFLICT DO NOTHING"
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error adding role: {}", e)))?;

        Ok(())
    }

    pub async fn remove_role(&self, user_id: Uuid, role_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role_id = $2")
            .bind(user_id)
            .bind(role_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error removing role: {}", e)))?;

        Ok(result.rows_affected())
    }
}
