use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::booking::{BookingStatus, BookingWithDetails};
use crate::utils::errors::AppError;

// Request para crear una reserva.
// Los campos son opcionales para poder responder InvalidInput con un
// mensaje claro en vez del rechazo genérico del deserializador.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub customer_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// Request para cancelar o devolver una reserva
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: Option<String>,
}

impl UpdateBookingStatusRequest {
    /// Resolver el estado objetivo. Solo se aceptan los dos estados
    /// terminales; cualquier otro valor (incluido "active") es inválido.
    pub fn target_status(&self) -> Result<BookingStatus, AppError> {
        match self.status.as_deref() {
            Some("cancelled") => Ok(BookingStatus::Cancelled),
            Some("returned") => Ok(BookingStatus::Returned),
            _ => Err(AppError::BadRequest("unsupported status update".to_string())),
        }
    }
}

// Response de reserva con snapshot del vehículo en el momento de crear
#[derive(Debug, Serialize)]
pub struct BookingResponse {
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
    pub created_at: String,
}

impl From<BookingWithDetails> for BookingResponse {
    fn from(booking: BookingWithDetails) -> Self {
        Self {
            id: booking.id,
            customer_id: booking.customer_id,
            customer_name: booking.customer_name,
            vehicle_id: booking.vehicle_id,
            vehicle_name: booking.vehicle_name,
            registration_number: booking.registration_number,
            daily_price: booking.daily_price,
            start_date: booking.start_date,
            end_date: booking.end_date,
            total_price: booking.total_price,
            status: booking.status,
            created_at: booking.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_status_accepts_terminal_states() {
        let request = UpdateBookingStatusRequest {
            status: Some("cancelled".to_string()),
        };
        assert_eq!(request.target_status().unwrap(), BookingStatus::Cancelled);

        let request = UpdateBookingStatusRequest {
            status: Some("returned".to_string()),
        };
        assert_eq!(request.target_status().unwrap(), BookingStatus::Returned);
    }

    #[test]
    fn test_target_status_rejects_everything_else() {
        for value in [Some("active"), Some("ACTIVE"), Some("finished"), Some(""), None] {
            let request = UpdateBookingStatusRequest {
                status: value.map(String::from),
            };
            assert!(matches!(
                request.target_status(),
                Err(AppError::BadRequest(_))
            ));
        }
    }
}
