//! Controller de reservas - el núcleo del sistema
//!
//! Este módulo implementa la máquina de estados de las reservas:
//! creación (detección de solapamiento, cálculo de precio, escritura
//! atómica) y transición de estado (cancelar/devolver).
//!
//! Contrato de concurrencia: toda escritura que toca reserva + vehículo
//! corre dentro de una única transacción que primero adquiere el lock
//! exclusivo de la fila del vehículo (SELECT ... FOR UPDATE). Dos
//! createBooking concurrentes sobre el mismo vehículo no pueden pasar
//! ambos el chequeo de solapamiento: el segundo espera el lock y ve la
//! reserva del primero. Si la transacción se suelta sin commit, sqlx
//! hace rollback y no queda ningún estado parcial.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use crate::dto::booking_dto::{BookingResponse, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::dto::ApiResponse;
use crate::models::auth::AuthUser;
use crate::models::booking::BookingStatus;
use crate::models::user::UserRole;
use crate::models::vehicle::AvailabilityStatus;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::access_policy;
use crate::utils::dates;
use crate::utils::errors::AppError;

/// Precio total de la reserva: precio diario en el momento de crear ×
/// días inclusivos, redondeado a 2 decimales. Inmutable después.
fn compute_total_price(daily_price: Decimal, days: i64) -> Decimal {
    (daily_price * Decimal::from(days)).round_dp(2)
}

/// La cancelación solo está permitida estrictamente antes de la fecha
/// de inicio: el mismo día de inicio ya no se puede cancelar
fn cancellation_allowed(today: NaiveDate, start_date: NaiveDate) -> bool {
    today < start_date
}

/// Solo una reserva activa puede transicionar; cancelled y returned
/// son estados terminales
fn ensure_active(status: BookingStatus) -> Result<(), AppError> {
    if status != BookingStatus::Active {
        return Err(AppError::InvalidState(
            "booking is not active and cannot be updated".to_string(),
        ));
    }
    Ok(())
}

pub struct BookingController {
    pool: PgPool,
    bookings: BookingRepository,
    users: UserRepository,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bookings: BookingRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(
        &self,
        actor: &AuthUser,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        // Resolver el cliente efectivo: un customer solo reserva para sí
        // mismo; un admin debe indicar para qué cliente reserva
        let customer_id = match actor.role {
            UserRole::Customer => actor.id,
            UserRole::Admin => request.customer_id.ok_or_else(|| {
                AppError::BadRequest("customer_id is required for admin bookings".to_string())
            })?,
        };

        let vehicle_id = request
            .vehicle_id
            .ok_or_else(|| AppError::BadRequest("vehicle_id is required".to_string()))?;
        let start_raw = request
            .start_date
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("start_date is required".to_string()))?;
        let end_raw = request
            .end_date
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("end_date is required".to_string()))?;

        let start_date = dates::parse_date(start_raw)?;
        let end_date = dates::parse_date(end_raw)?;
        let days = dates::inclusive_days(start_date, end_date)?;

        let customer = self
            .users
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        // Unidad de trabajo atómica: lock del vehículo, chequeo de
        // solapamiento, insert y flip de disponibilidad
        let mut tx = self.pool.begin().await?;

        let vehicle = VehicleRepository::find_by_id_for_update(&mut tx, vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let active = BookingRepository::active_for_vehicle(&mut tx, vehicle_id).await?;
        let overlaps = active.iter().any(|existing| {
            dates::ranges_overlap(existing.start_date, existing.end_date, start_date, end_date)
        });
        if overlaps {
            return Err(AppError::Conflict(
                "vehicle not available for selected dates".to_string(),
            ));
        }

        let total_price = compute_total_price(vehicle.daily_price, days);

        let booking = BookingRepository::insert(
            &mut tx,
            customer_id,
            vehicle_id,
            start_date,
            end_date,
            total_price,
        )
        .await?;

        VehicleRepository::set_status(&mut tx, vehicle_id, AvailabilityStatus::Booked).await?;

        tx.commit().await?;

        info!(
            "Reserva {} creada: vehículo {} del {} al {} por {}",
            booking.id, vehicle_id, start_date, end_date, total_price
        );

        // Snapshot del vehículo en el momento de crear
        let response = BookingResponse {
            id: booking.id,
            customer_id: booking.customer_id,
            customer_name: customer.full_name,
            vehicle_id: booking.vehicle_id,
            vehicle_name: vehicle.name,
            registration_number: vehicle.registration_number,
            daily_price: vehicle.daily_price,
            start_date: booking.start_date,
            end_date: booking.end_date,
            total_price: booking.total_price,
            status: booking.status,
            created_at: booking.created_at.to_rfc3339(),
        };

        Ok(ApiResponse::success_with_message(
            response,
            "Reserva creada exitosamente".to_string(),
        ))
    }

    pub async fn list(&self, actor: &AuthUser) -> Result<Vec<BookingResponse>, AppError> {
        let bookings = match actor.role {
            UserRole::Admin => self.bookings.list_all().await?,
            UserRole::Customer => self.bookings.list_by_customer(actor.id).await?,
        };

        Ok(bookings.into_iter().map(BookingResponse::from).collect())
    }

    pub async fn transition(
        &self,
        actor: &AuthUser,
        booking_id: i32,
        request: UpdateBookingStatusRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        let target = request.target_status()?;

        let mut tx = self.pool.begin().await?;

        let booking = BookingRepository::find_by_id_for_update(&mut tx, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        ensure_active(booking.status)?;

        match target {
            BookingStatus::Cancelled => {
                if !access_policy::can_cancel_booking(actor, &booking) {
                    return Err(AppError::Forbidden(
                        "you can only cancel your own bookings".to_string(),
                    ));
                }
                if !cancellation_allowed(Utc::now().date_naive(), booking.start_date) {
                    return Err(AppError::InvalidState(
                        "cancellation allowed only before start date".to_string(),
                    ));
                }
            }
            BookingStatus::Returned => {
                if !access_policy::can_return_booking(actor) {
                    return Err(AppError::Forbidden(
                        "only an admin can mark a booking as returned".to_string(),
                    ));
                }
            }
            BookingStatus::Active => unreachable!("target_status never yields active"),
        }

        // Lock del vehículo para no correr contra el chequeo de
        // solapamiento de un create concurrente
        VehicleRepository::find_by_id_for_update(&mut tx, booking.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        BookingRepository::update_status(&mut tx, booking_id, target).await?;

        // Con una sola reserva activa por vehículo a la vez, cerrar la
        // reserva deja el vehículo disponible
        VehicleRepository::set_status(&mut tx, booking.vehicle_id, AvailabilityStatus::Available)
            .await?;

        tx.commit().await?;

        info!("Reserva {} actualizada a {:?}", booking_id, target);

        let updated = self
            .bookings
            .find_with_details(booking_id)
            .await?
            .ok_or_else(|| AppError::Internal("booking vanished after update".to_string()))?;

        Ok(ApiResponse::success_with_message(
            updated.into(),
            "Reserva actualizada exitosamente".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_total_price_for_six_day_range() {
        // 100.00/día por un rango inclusivo de 6 días
        assert_eq!(compute_total_price(dec("100.00"), 6), dec("600.00"));
    }

    #[test]
    fn test_total_price_single_day() {
        assert_eq!(compute_total_price(dec("49.99"), 1), dec("49.99"));
    }

    #[test]
    fn test_total_price_rounds_to_two_decimals() {
        assert_eq!(compute_total_price(dec("33.333"), 3), dec("100.00"));
        assert_eq!(compute_total_price(dec("10.005"), 1), dec("10.00"));
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_cancellation_allowed_before_start() {
        assert!(cancellation_allowed(date("2025-03-09"), date("2025-03-10")));
    }

    #[test]
    fn test_cancellation_rejected_on_start_date() {
        assert!(!cancellation_allowed(date("2025-03-10"), date("2025-03-10")));
    }

    #[test]
    fn test_cancellation_rejected_after_start_date() {
        assert!(!cancellation_allowed(date("2025-03-11"), date("2025-03-10")));
    }

    #[test]
    fn test_active_booking_can_transition() {
        assert!(ensure_active(BookingStatus::Active).is_ok());
    }

    #[test]
    fn test_terminal_states_cannot_transition() {
        for status in [BookingStatus::Cancelled, BookingStatus::Returned] {
            match ensure_active(status) {
                Err(AppError::InvalidState(msg)) => {
                    assert_eq!(msg, "booking is not active and cannot be updated");
                }
                other => panic!("se esperaba InvalidState, se obtuvo {:?}", other.err()),
            }
        }
    }
}
