//! Repositorio de reservas
//!
//! Las lecturas de listados van directas al pool. Todas las escrituras
//! reciben la conexión de una transacción abierta por el controller:
//! el insert de la reserva y el flip de disponibilidad del vehículo
//! tienen que confirmar juntos o no confirmar ninguno.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::models::booking::{Booking, BookingStatus, BookingWithDetails};
use crate::utils::errors::AppError;

const BOOKING_DETAILS_QUERY: &str = r#"
    SELECT b.id, b.customer_id, u.full_name AS customer_name,
           b.vehicle_id, v.name AS vehicle_name, v.registration_number, v.daily_price,
           b.start_date, b.end_date, b.total_price, b.status,
           b.created_at, b.updated_at
    FROM bookings b
    JOIN users u ON u.id = b.customer_id
    JOIN vehicles v ON v.id = b.vehicle_id
"#;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todas las reservas, con resumen de cliente y vehículo,
    /// ordenadas de más reciente a más antigua.
    pub async fn list_all(&self) -> Result<Vec<BookingWithDetails>, AppError> {
        let query = format!("{} ORDER BY b.id DESC", BOOKING_DETAILS_QUERY);
        let bookings = sqlx::query_as::<_, BookingWithDetails>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    /// Las reservas de un cliente concreto, mismo orden que list_all
    pub async fn list_by_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<BookingWithDetails>, AppError> {
        let query = format!(
            "{} WHERE b.customer_id = $1 ORDER BY b.id DESC",
            BOOKING_DETAILS_QUERY
        );
        let bookings = sqlx::query_as::<_, BookingWithDetails>(&query)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    pub async fn find_with_details(
        &self,
        id: i32,
    ) -> Result<Option<BookingWithDetails>, AppError> {
        let query = format!("{} WHERE b.id = $1", BOOKING_DETAILS_QUERY);
        let booking = sqlx::query_as::<_, BookingWithDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    /// Reservas activas de un vehículo, dentro de la transacción del
    /// caller. Con la fila del vehículo lockeada, este es el conjunto
    /// contra el que se comprueba el solapamiento de fechas.
    pub async fn active_for_vehicle(
        conn: &mut PgConnection,
        vehicle_id: i32,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE vehicle_id = $1 AND status = 'active'",
        )
        .bind(vehicle_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(bookings)
    }

    /// Insertar una reserva en estado 'active', dentro de la transacción
    /// del caller
    pub async fn insert(
        conn: &mut PgConnection,
        customer_id: i32,
        vehicle_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_price: Decimal,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (customer_id, vehicle_id, start_date, end_date, total_price, status)
            VALUES ($1, $2, $3, $4, $5, 'active')
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(vehicle_id)
        .bind(start_date)
        .bind(end_date)
        .bind(total_price)
        .fetch_one(&mut *conn)
        .await?;

        Ok(booking)
    }

    /// Leer una reserva con lock exclusivo de fila, dentro de la
    /// transacción del caller
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: i32,
    ) -> Result<Option<Booking>, AppError> {
        let booking =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(booking)
    }

    /// Actualizar el estado de una reserva, dentro de la transacción
    /// del caller
    pub async fn update_status(
        conn: &mut PgConnection,
        id: i32,
        status: BookingStatus,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut *conn)
        .await?;

        Ok(booking)
    }
}
