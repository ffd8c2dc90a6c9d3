//! Controller de autenticación
//!
//! Registro, login y consulta del usuario actual. Los passwords se
//! almacenan con bcrypt; el login emite un JWT con id + rol.

use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::dto::ApiResponse;
use crate::models::auth::AuthUser;
use crate::models::user::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{self, JwtConfig};

pub struct AuthController {
    repository: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt_config: JwtConfig::from(config),
        }
    }

    /// El registro público siempre crea un customer. Los admins se crean
    /// desde el endpoint de usuarios, por otro admin.
    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
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
            .create(
                request.full_name,
                request.email,
                password_hash,
                UserRole::Customer,
            )
            .await?;

        info!("Usuario {} registrado", user.id);

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        if !valid {
            return Err(AppError::Unauthorized("invalid credentials".to_string()));
        }

        let token = jwt::generate_token(user.id, user.role, &self.jwt_config)?;

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn me(&self, actor: &AuthUser) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }
}
