//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus enums de tipo y
//! disponibilidad. Mapea exactamente al schema PostgreSQL con
//! primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Tipo de vehículo - mapea al ENUM vehicle_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Bike,
    Van,
    #[sqlx(rename = "SUV")]
    #[serde(rename = "SUV")]
    Suv,
}

/// Disponibilidad del vehículo - mapea al ENUM availability_status
///
/// El flag se almacena directamente y se actualiza al crear/cancelar/devolver
/// una reserva. Es correcto mientras se mantenga la invariante de una sola
/// reserva activa por vehículo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "availability_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Booked,
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i32,
    pub name: String,
    pub vehicle_type: VehicleType,
    pub registration_number: String,
    pub daily_price: Decimal,
    pub availability_status: AvailabilityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_serialization() {
        assert_eq!(serde_json::to_string(&VehicleType::Car).unwrap(), "\"car\"");
        assert_eq!(serde_json::to_string(&VehicleType::Suv).unwrap(), "\"SUV\"");

        let parsed: VehicleType = serde_json::from_str("\"SUV\"").unwrap();
        assert_eq!(parsed, VehicleType::Suv);
        assert!(serde_json::from_str::<VehicleType>("\"truck\"").is_err());
    }

    #[test]
    fn test_availability_serialization() {
        assert_eq!(
            serde_json::to_string(&AvailabilityStatus::Booked).unwrap(),
            "\"booked\""
        );
    }
}
