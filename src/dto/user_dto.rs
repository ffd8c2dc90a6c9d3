use serde::Deserialize;
use validator::Validate;

use crate::models::user::UserRole;

// Request para que un admin cree un usuario con rol explícito
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 72))]
    pub password: String,

    pub role: UserRole,
}

// Request para actualizar un usuario existente.
// Cambiar el rol requiere ser admin; el resto lo puede hacer el propio usuario.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub full_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 72))]
    pub password: Option<String>,

    pub role: Option<UserRole>,
}
