//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! de entrada antes de tocar la base de datos.

use rust_decimal::Decimal;

use crate::utils::errors::{AppError, AppResult};

/// Validar que un string no esté vacío
pub fn require_not_empty(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

/// Validar que un precio sea estrictamente positivo
pub fn require_positive_price(value: Decimal, field: &str) -> AppResult<()> {
    if value <= Decimal::ZERO {
        return Err(AppError::BadRequest(format!(
            "{} must be a positive amount",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_require_not_empty() {
        assert!(require_not_empty("Toyota Corolla", "name").is_ok());
        assert!(require_not_empty("", "name").is_err());
        assert!(require_not_empty("   ", "name").is_err());
    }

    #[test]
    fn test_require_positive_price() {
        assert!(require_positive_price(dec("49.99"), "daily_price").is_ok());
        assert!(require_positive_price(dec("0"), "daily_price").is_err());
        assert!(require_positive_price(dec("-10.00"), "daily_price").is_err());
    }
}
