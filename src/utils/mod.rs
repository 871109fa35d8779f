//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y JWT.

pub mod errors;
pub mod validation;
pub mod jwt;

pub use errors::{AppError, AppResult};
