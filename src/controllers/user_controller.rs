//! Controller de usuarios
//!
//! CRUD de usuarios con las reglas de la política de acceso: un usuario
//! edita su propio perfil, un admin edita cualquiera; cambiar roles y
//! eliminar usuarios es exclusivo del admin, que tampoco puede eliminar
//! su propia cuenta.

use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::auth_dto::UserResponse;
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::dto::ApiResponse;
use crate::models::auth::AuthUser;
use crate::repositories::user_repository::UserRepository;
use crate::services::access_policy;
use crate::utils::errors::AppError;

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        actor: &AuthUser,
        request: CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        if !access_policy::can_change_role(actor) {
            return Err(AppError::Forbidden(
                "only an admin can create users".to_string(),
            ));
        }

        request.validate()?;

        if self.repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict(
                "a user with this email already exists".to_string(),
            ));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        let user = self
            .repository
            .create(request.full_name, request.email, password_hash, request.role)
            .await?;

        info!("Usuario {} creado por admin {}", user.id, actor.id);

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Usuario creado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self, actor: &AuthUser) -> Result<Vec<UserResponse>, AppError> {
        if !access_policy::can_list_users(actor) {
            return Err(AppError::Forbidden(
                "only an admin can list users".to_string(),
            ));
        }

        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_by_id(&self, actor: &AuthUser, id: i32) -> Result<UserResponse, AppError> {
        if !access_policy::can_update_user(actor, id) {
            return Err(AppError::Forbidden(
                "you can only view your own profile".to_string(),
            ));
        }

        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    pub async fn update(
        &self,
        actor: &AuthUser,
        id: i32,
        request: UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        if !access_policy::can_update_user(actor, id) {
            return Err(AppError::Forbidden(
                "you can only update your own profile".to_string(),
            ));
        }

        if request.role.is_some() && !access_policy::can_change_role(actor) {
            return Err(AppError::Forbidden(
                "only an admin can change roles".to_string(),
            ));
        }

        request.validate()?;

        if let Some(email) = &request.email {
            if let Some(existing) = self.repository.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::Conflict(
                        "a user with this email already exists".to_string(),
                    ));
                }
            }
        }

        let password_hash = match &request.password {
            Some(password) => Some(
                bcrypt::hash(password, bcrypt::DEFAULT_COST)
                    .map_err(|e| AppError::Hash(e.to_string()))?,
            ),
            None => None,
        };

        let user = self
            .repository
            .update(id, request.full_name, request.email, password_hash, request.role)
            .await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Usuario actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, actor: &AuthUser, id: i32) -> Result<(), AppError> {
        if !access_policy::can_delete_user(actor, id) {
            return Err(AppError::Forbidden(
                "only an admin can delete users, and never their own account".to_string(),
            ));
        }

        self.repository.delete(id).await?;
        info!("Usuario {} eliminado por admin {}", id, actor.id);
        Ok(())
    }
}
