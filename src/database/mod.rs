//! Módulo de base de datos
//!
//! Maneja la conexión, las migraciones y los datos de demostración.

pub mod connection;
pub mod seed;

pub use connection::{create_pool, run_migrations};
pub use seed::seed_demo_data;
