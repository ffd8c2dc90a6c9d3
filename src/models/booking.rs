//! Modelo de Booking
//!
//! Este módulo contiene el struct Booking, su enum de estado y la
//! proyección con datos de cliente y vehículo para los listados.
//!
//! Invariantes de la tabla bookings:
//! - Para un vehículo fijo, no hay dos reservas 'active' con rangos
//!   [start_date, end_date] solapados (los rangos que se tocan en un
//!   día cuentan como solapados).
//! - total_price = precio diario en el momento de crear × días inclusivos,
//!   redondeado a 2 decimales; inmutable después de la creación.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Estado de la reserva - mapea al ENUM booking_status
///
/// Transiciones permitidas: active → cancelled, active → returned.
/// Ambos estados finales son terminales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Cancelled,
    Returned,
}

/// Booking principal - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reserva con resumen de cliente y vehículo, para listados y respuestas
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookingWithDetails {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub vehicle_id: i32,
    pub vehicle_name: String,
    pub registration_number: String,
    pub daily_price: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&BookingStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
        assert_eq!(
            serde_json::to_string(&BookingStatus::Returned).unwrap(),
            "\"returned\""
        );
    }

    #[test]
    fn test_dates_serialize_as_iso() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-01-15\"");
    }
}
