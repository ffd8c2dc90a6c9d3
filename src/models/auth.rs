//! Actor autenticado
//!
//! Este módulo define la identidad (id + rol) que el middleware de
//! autenticación extrae del JWT y que cada operación recibe por llamada.
//! El Booking Ledger nunca la muta: es un token de capacidad.

use crate::models::user::UserRole;

/// Identidad autenticada que realiza una operación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
