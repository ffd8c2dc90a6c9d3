//! Utilidades de fechas para reservas
//!
//! Este módulo contiene el parsing de fechas de reserva, el conteo de días
//! inclusivos y la detección de solapamiento entre rangos.

use chrono::NaiveDate;

use crate::utils::errors::{AppError, AppResult};

/// Parsear una fecha en formato ISO (YYYY-MM-DD).
/// Rechaza cualquier otro formato y las fechas de calendario inexistentes.
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    let trimmed = value.trim();

    // chrono acepta "2024-1-5" sin padding; el contrato exige ISO estricto
    if trimmed.len() != 10 {
        return Err(AppError::BadRequest(format!(
            "Invalid date '{}': expected YYYY-MM-DD",
            value
        )));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!("Invalid date '{}': expected YYYY-MM-DD", value))
    })
}

/// Número de días del rango inclusivo [start, end].
/// Para un rango válido el resultado siempre es >= 1.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> AppResult<i64> {
    if end < start {
        return Err(AppError::InvalidRange(
            "end date must be on or after start date".to_string(),
        ));
    }

    Ok((end - start).num_days() + 1)
}

/// Dos rangos inclusivos se solapan salvo que uno termine estrictamente
/// antes de que empiece el otro. Rangos que se tocan en un día SÍ se
/// solapan: no se permite entregar y recoger el mismo vehículo el mismo día.
pub fn ranges_overlap(
    existing_start: NaiveDate,
    existing_end: NaiveDate,
    new_start: NaiveDate,
    new_end: NaiveDate,
) -> bool {
    !(existing_end < new_start || existing_start > new_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_valid_date() {
        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_bad_formats() {
        assert!(parse_date("15/01/2024").is_err());
        assert!(parse_date("2024-1-5").is_err());
        assert!(parse_date("2024-01-15T00:00:00").is_err());
        assert!(parse_date("").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_parse_rejects_nonexistent_dates() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn test_inclusive_days() {
        assert_eq!(
            inclusive_days(date("2024-01-15"), date("2024-01-20")).unwrap(),
            6
        );
        assert_eq!(
            inclusive_days(date("2024-01-15"), date("2024-01-15")).unwrap(),
            1
        );
    }

    #[test]
    fn test_inclusive_days_rejects_inverted_range() {
        let result = inclusive_days(date("2024-01-20"), date("2024-01-15"));
        assert!(matches!(result, Err(AppError::InvalidRange(_))));
    }

    #[test]
    fn test_overlap_detection() {
        // Solapamiento parcial
        assert!(ranges_overlap(
            date("2024-01-10"),
            date("2024-01-15"),
            date("2024-01-14"),
            date("2024-01-20")
        ));

        // Rango contenido
        assert!(ranges_overlap(
            date("2024-01-10"),
            date("2024-01-20"),
            date("2024-01-12"),
            date("2024-01-14")
        ));

        // Rangos disjuntos
        assert!(!ranges_overlap(
            date("2024-01-10"),
            date("2024-01-15"),
            date("2024-01-16"),
            date("2024-01-20")
        ));
        assert!(!ranges_overlap(
            date("2024-01-16"),
            date("2024-01-20"),
            date("2024-01-10"),
            date("2024-01-15")
        ));
    }

    #[test]
    fn test_touching_day_counts_as_overlap() {
        // La reserva existente termina el día que empieza la nueva
        assert!(ranges_overlap(
            date("2024-01-10"),
            date("2024-01-15"),
            date("2024-01-15"),
            date("2024-01-20")
        ));
        // Y al revés
        assert!(ranges_overlap(
            date("2024-01-15"),
            date("2024-01-20"),
            date("2024-01-10"),
            date("2024-01-15")
        ));
    }
}
