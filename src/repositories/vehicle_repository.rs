//! Repositorio de vehículos (inventario)
//!
//! CRUD estándar sobre la tabla vehicles más las dos operaciones que
//! usa el Booking Ledger dentro de sus transacciones: lectura con lock
//! exclusivo de la fila y escritura incondicional del flag de
//! disponibilidad. La validación de negocio vive en los controllers.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::models::vehicle::{AvailabilityStatus, Vehicle, VehicleType};
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        vehicle_type: VehicleType,
        registration_number: String,
        daily_price: Decimal,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (name, vehicle_type, registration_number, daily_price, availability_status)
            VALUES ($1, $2, $3, $4, 'available')
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(vehicle_type)
        .bind(registration_number)
        .bind(daily_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    pub async fn registration_exists(&self, registration_number: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE registration_number = $1)",
        )
        .bind(registration_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: i32,
        name: Option<String>,
        vehicle_type: Option<VehicleType>,
        registration_number: Option<String>,
        daily_price: Option<Decimal>,
    ) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET name = $2, vehicle_type = $3, registration_number = $4, daily_price = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(vehicle_type.unwrap_or(current.vehicle_type))
        .bind(registration_number.unwrap_or(current.registration_number))
        .bind(daily_price.unwrap_or(current.daily_price))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Eliminar un vehículo. Corre en una transacción con la fila del
    /// vehículo lockeada: un create concurrente no puede colarse entre el
    /// conteo de reservas activas y el borrado. Con cero reservas activas
    /// el delete es válido; las reservas históricas (cancelled/returned)
    /// se eliminan junto con el vehículo.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        Self::find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        let active: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM bookings WHERE vehicle_id = $1 AND status = 'active'",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if active.0 > 0 {
            return Err(AppError::Conflict(
                "vehicle has active bookings and cannot be deleted".to_string(),
            ));
        }

        sqlx::query("DELETE FROM bookings WHERE vehicle_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Leer un vehículo con lock exclusivo de fila, dentro de la
    /// transacción del caller. Serializa los intentos concurrentes de
    /// reservar, cancelar o devolver el mismo vehículo.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: i32,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(vehicle)
    }

    /// Escritura incondicional del flag de disponibilidad, dentro de la
    /// transacción del caller. Sin validación de negocio.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: i32,
        status: AvailabilityStatus,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE vehicles SET availability_status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}
