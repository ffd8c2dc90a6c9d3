//! Controller de vehículos (inventario)
//!
//! CRUD estándar. Las escrituras requieren rol admin; eliminar un
//! vehículo con reservas activas falla con Conflict.

use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::dto::ApiResponse;
use crate::models::auth::AuthUser;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::access_policy;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::validation::{require_not_empty, require_positive_price};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        actor: &AuthUser,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        if !access_policy::can_manage_vehicles(actor) {
            return Err(AppError::Forbidden(
                "only an admin can manage vehicles".to_string(),
            ));
        }

        request.validate()?;
        require_not_empty(&request.name, "name")?;
        require_not_empty(&request.registration_number, "registration_number")?;
        require_positive_price(request.daily_price, "daily_price")?;

        if self
            .repository
            .registration_exists(&request.registration_number)
            .await?
        {
            return Err(conflict_error(
                "Vehicle",
                "registration_number",
                &request.registration_number,
            ));
        }

        let vehicle = self
            .repository
            .create(
                request.name,
                request.vehicle_type,
                request.registration_number,
                request.daily_price,
            )
            .await?;

        info!("Vehículo {} creado por admin {}", vehicle.id, actor.id);

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        actor: &AuthUser,
        id: i32,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        if !access_policy::can_manage_vehicles(actor) {
            return Err(AppError::Forbidden(
                "only an admin can manage vehicles".to_string(),
            ));
        }

        request.validate()?;

        if let Some(price) = request.daily_price {
            require_positive_price(price, "daily_price")?;
        }

        if let Some(registration) = &request.registration_number {
            let current = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

            if registration != &current.registration_number
                && self.repository.registration_exists(registration).await?
            {
                return Err(conflict_error("Vehicle", "registration_number", registration));
            }
        }

        let vehicle = self
            .repository
            .update(
                id,
                request.name,
                request.vehicle_type,
                request.registration_number,
                request.daily_price,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, actor: &AuthUser, id: i32) -> Result<(), AppError> {
        if !access_policy::can_manage_vehicles(actor) {
            return Err(AppError::Forbidden(
                "only an admin can manage vehicles".to_string(),
            ));
        }

        // El guard de reservas activas vive en el repositorio, dentro de
        // la misma transacción que el borrado
        self.repository.delete(id).await?;
        info!("Vehículo {} eliminado por admin {}", id, actor.id);
        Ok(())
    }
}
