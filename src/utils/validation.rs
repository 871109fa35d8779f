//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! específicos del taller: matrículas, horas trabajadas y credenciales.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Formato de matrícula: letras, dígitos, espacios y guiones
    static ref REGISTRATION_NUMBER_RE: Regex =
        Regex::new(r"^[A-Z0-9][A-Z0-9 -]{1,49}$").unwrap();
}

/// Validar formato de matrícula de vehículo
pub fn validate_registration_number(value: &str) -> Result<(), ValidationError> {
    let normalized = value.trim().to_uppercase();
    if !REGISTRATION_NUMBER_RE.is_match(&normalized) {
        let mut error = ValidationError::new("registration_number");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Normalizar matrícula antes de persistirla
pub fn normalize_registration_number(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Validar horas trabajadas (0 a 1000)
pub fn validate_hours_worked(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::from(1000) {
        let mut error = ValidationError::new("hours_worked");
        error.add_param("min".into(), &0);
        error.add_param("max".into(), &1000);
        error.add_param("actual".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar costo de servicio (no negativo)
pub fn validate_service_cost(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut error = ValidationError::new("service_cost");
        error.add_param("actual".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar fortaleza de contraseña
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());

    if value.len() < 8 || !has_upper || !has_lower || !has_digit {
        let mut error = ValidationError::new("password");
        error.add_param(
            "requirements".into(),
            &"minimum 8 characters with uppercase, lowercase and digit".to_string(),
        );
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_digit(10)).collect::<String>();
    if clean_phone.len() < 10 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn test_validate_registration_number() {
        assert!(validate_registration_number("ABC123").is_ok());
        assert!(validate_registration_number("abc123").is_ok());
        assert!(validate_registration_number("AB-123-CD").is_ok());
        assert!(validate_registration_number("A").is_err());
        assert!(validate_registration_number("ABC_123").is_err());
        assert!(validate_registration_number(&"X".repeat(51)).is_err());
    }

    #[test]
    fn test_normalize_registration_number() {
        assert_eq!(normalize_registration_number("  abc123 "), "ABC123");
    }

    #[test]
    fn test_validate_hours_worked() {
        assert!(validate_hours_worked(&dec("0")).is_ok());
        assert!(validate_hours_worked(&dec("2.5")).is_ok());
        assert!(validate_hours_worked(&dec("1000")).is_ok());
        assert!(validate_hours_worked(&dec("-0.5")).is_err());
        assert!(validate_hours_worked(&dec("1000.01")).is_err());
    }

    #[test]
    fn test_validate_service_cost() {
        assert!(validate_service_cost(&dec("0")).is_ok());
        assert!(validate_service_cost(&dec("75.00")).is_ok());
        assert!(validate_service_cost(&dec("-1")).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Dorset001").is_ok());
        assert!(validate_password("short1A").is_err());
        assert!(validate_password("alllowercase1").is_err());
        assert!(validate_password("ALLUPPERCASE1").is_err());
        assert!(validate_password("NoDigitsHere").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("1234567890").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }
}
