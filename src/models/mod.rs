//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod car;
pub mod service_record;
pub mod user;

pub use car::Car;
pub use service_record::{ServiceRecord, ServiceRecordChanges, ServiceStatus};
pub use user::{Role, User, UserRole};
