//! Services module
//!
//! Este módulo contiene la lógica de negocio transversal de la aplicación.

pub mod authorization_service;
