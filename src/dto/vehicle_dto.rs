use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{AvailabilityStatus, Vehicle, VehicleType};

// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    pub vehicle_type: VehicleType,

    #[validate(length(min = 2, max = 20))]
    pub registration_number: String,

    pub daily_price: Decimal,
}

// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    pub vehicle_type: Option<VehicleType>,

    #[validate(length(min = 2, max = 20))]
    pub registration_number: Option<String>,

    pub daily_price: Option<Decimal>,
}

// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: i32,
    pub name: String,
    pub vehicle_type: VehicleType,
    pub registration_number: String,
    pub daily_price: Decimal,
    pub availability_status: AvailabilityStatus,
    pub created_at: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            vehicle_type: vehicle.vehicle_type,
            registration_number: vehicle.registration_number,
            daily_price: vehicle.daily_price,
            availability_status: vehicle.availability_status,
            created_at: vehicle.created_at.to_rfc3339(),
        }
    }
}
