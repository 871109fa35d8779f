//! Modelo de User
//!
//! Este módulo contiene el struct User y los roles del sistema.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Mechanic,
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Mechanic => "Mechanic",
            UserRole::Customer => "Customer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(UserRole::Admin),
            "mechanic" => Some(UserRole::Mechanic),
            "customer" => Some(UserRole::Customer),
            _ => None,
        }
    }
}

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Nombre completo para mostrar en la API
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Role - mapea exactamente a la tabla roles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_round_trip() {
        for role in [UserRole::Admin, UserRole::Mechanic, UserRole::Customer] {
            assert_eq!(UserRole::from_str(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_user_role_from_str_case_insensitive() {
        assert_eq!(UserRole::from_str("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_str("mechanic"), Some(UserRole::Mechanic));
        assert_eq!(UserRole::from_str("Customer"), Some(UserRole::Customer));
        assert_eq!(UserRole::from_str("driver"), None);
    }

    #[test]
    fn test_full_name() {
        let user = User {
            id: Uuid::new_v4(),
            email: "john.doe@carservice.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            password_hash: "hash".to_string(),
            phone_number: None,
            address: None,
            created_at: Utc::now(),
        };
        assert_eq!(user.full_name(), "John Doe");
    }
}
