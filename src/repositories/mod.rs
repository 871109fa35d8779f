//! Repositorios de acceso a datos
//!
//! Este módulo contiene el acceso a PostgreSQL, un repositorio por agregado.

pub mod car_repository;
pub mod service_record_repository;
pub mod user_repository;

pub use car_repository::CarRepository;
pub use service_record_repository::ServiceRecordRepository;
pub use user_repository::UserRepository;
