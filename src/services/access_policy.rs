//! Política de acceso
//!
//! Predicados puros de autorización (actor vs. recurso), sin I/O.
//! Los controllers las invocan explícitamente en lugar de comparar
//! strings de rol ad hoc.

use crate::models::auth::AuthUser;
use crate::models::booking::Booking;

/// Un usuario puede actualizar su propio perfil; un admin puede
/// actualizar cualquiera.
pub fn can_update_user(actor: &AuthUser, target_id: i32) -> bool {
    actor.is_admin() || actor.id == target_id
}

/// Cambiar el rol de un usuario requiere ser admin
pub fn can_change_role(actor: &AuthUser) -> bool {
    actor.is_admin()
}

/// Eliminar usuarios requiere ser admin, y nunca la propia cuenta
pub fn can_delete_user(actor: &AuthUser, target_id: i32) -> bool {
    actor.is_admin() && actor.id != target_id
}

/// Listar todos los usuarios requiere ser admin
pub fn can_list_users(actor: &AuthUser) -> bool {
    actor.is_admin()
}

/// Crear/actualizar/eliminar vehículos requiere ser admin
pub fn can_manage_vehicles(actor: &AuthUser) -> bool {
    actor.is_admin()
}

/// Cancelar una reserva: el admin o el cliente dueño de la reserva
pub fn can_cancel_booking(actor: &AuthUser, booking: &Booking) -> bool {
    actor.is_admin() || actor.id == booking.customer_id
}

/// Marcar una reserva como devuelta: solo el admin
pub fn can_return_booking(actor: &AuthUser) -> bool {
    actor.is_admin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::BookingStatus;
    use crate::models::user::UserRole;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn admin() -> AuthUser {
        AuthUser {
            id: 1,
            role: UserRole::Admin,
        }
    }

    fn customer(id: i32) -> AuthUser {
        AuthUser {
            id,
            role: UserRole::Customer,
        }
    }

    fn booking_of(customer_id: i32) -> Booking {
        Booking {
            id: 10,
            customer_id,
            vehicle_id: 5,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            total_price: Decimal::new(30000, 2),
            status: BookingStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_update_policy() {
        assert!(can_update_user(&admin(), 99));
        assert!(can_update_user(&customer(7), 7));
        assert!(!can_update_user(&customer(7), 8));

        assert!(can_change_role(&admin()));
        assert!(!can_change_role(&customer(7)));
    }

    #[test]
    fn test_admin_only_policies() {
        assert!(can_manage_vehicles(&admin()));
        assert!(!can_manage_vehicles(&customer(7)));

        assert!(can_list_users(&admin()));
        assert!(!can_list_users(&customer(7)));
    }

    #[test]
    fn test_delete_user_policy() {
        assert!(can_delete_user(&admin(), 7));
        // Ni el admin puede eliminar su propia cuenta
        assert!(!can_delete_user(&admin(), 1));
        assert!(!can_delete_user(&customer(7), 8));
        assert!(!can_delete_user(&customer(7), 7));
    }

    #[test]
    fn test_cancel_policy() {
        let booking = booking_of(7);
        assert!(can_cancel_booking(&admin(), &booking));
        assert!(can_cancel_booking(&customer(7), &booking));
        assert!(!can_cancel_booking(&customer(8), &booking));
    }

    #[test]
    fn test_return_is_admin_only_even_for_owner() {
        assert!(can_return_booking(&admin()));
        // El dueño de la reserva tampoco puede marcarla como devuelta
        assert!(!can_return_booking(&customer(7)));
    }
}
