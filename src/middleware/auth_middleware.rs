//! Middleware de autenticación
//!
//! Extrae el Bearer token del header Authorization, lo verifica y deja
//! el actor (id + rol) en las extensiones del request para los handlers.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::models::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{self, JwtConfig};

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("expected a Bearer token".to_string()))?;

    let claims = jwt::verify_token(token, &JwtConfig::from(&state.config))?;

    let user_id: i32 = claims
        .sub
        .parse()
        .map_err(|_| AppError::Jwt("invalid token subject".to_string()))?;

    request.extensions_mut().insert(AuthUser {
        id: user_id,
        role: claims.role,
    });

    Ok(next.run(request).await)
}
