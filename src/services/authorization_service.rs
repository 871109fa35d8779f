//! Reglas de autorización del taller
//!
//! Este módulo concentra la matriz de permisos por rol sobre los
//! registros de servicio. La administración de usuarios y vehículos
//! se protege en las rutas con el guard de administrador.

use uuid::Uuid;

use crate::models::service_record::ServiceRecord;
use crate::models::user::UserRole;

/// Alcance de listado de registros según el rol del actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordScope {
    /// Todos los registros del taller
    All,
    /// Registros asignados a un mecánico
    Mechanic(Uuid),
    /// Registros de los vehículos de un cliente
    Customer(Uuid),
    /// Registros solicitados por un usuario
    Requester(Uuid),
}

/// Verifica si el actor tiene el rol Admin
pub fn is_admin(roles: &[UserRole]) -> bool {
    roles.contains(&UserRole::Admin)
}

/// Verifica si el actor tiene el rol Mechanic
pub fn is_mechanic(roles: &[UserRole]) -> bool {
    roles.contains(&UserRole::Mechanic)
}

/// Verifica si el actor tiene el rol Customer
pub fn is_customer(roles: &[UserRole]) -> bool {
    roles.contains(&UserRole::Customer)
}

/// Verifica si el actor puede crear registros de servicio
pub fn can_create_records(roles: &[UserRole]) -> bool {
    is_admin(roles)
}

/// Verifica si el actor puede eliminar registros de servicio
pub fn can_delete_records(roles: &[UserRole]) -> bool {
    is_admin(roles)
}

/// Verifica si el actor puede asignar o reasignar mecánicos
pub fn can_assign_mechanic(roles: &[UserRole]) -> bool {
    is_admin(roles)
}

/// Verifica si el actor puede editar un registro concreto.
/// Un mecánico solo puede editar los registros que tiene asignados.
pub fn can_edit_record(user_id: Uuid, roles: &[UserRole], record: &ServiceRecord) -> bool {
    if is_admin(roles) {
        return true;
    }
    is_mechanic(roles) && record.assigned_mechanic_id == user_id
}

/// Verifica si el actor puede completar un registro concreto
pub fn can_complete_record(user_id: Uuid, roles: &[UserRole], record: &ServiceRecord) -> bool {
    if is_admin(roles) {
        return true;
    }
    is_mechanic(roles) && record.assigned_mechanic_id == user_id
}

/// Verifica si el actor puede ver un registro concreto
pub fn can_view_record(user_id: Uuid, roles: &[UserRole], record: &ServiceRecord) -> bool {
    if is_admin(roles) {
        return true;
    }
    if is_mechanic(roles) && record.assigned_mechanic_id == user_id {
        return true;
    }
    record.customer_id == user_id || record.requested_by_id == user_id
}

/// Alcance de listado para el actor.
/// Los roles se resuelven en cascada: Admin, luego Mechanic, luego Customer.
pub fn list_scope(user_id: Uuid, roles: &[UserRole]) -> RecordScope {
    if is_admin(roles) {
        RecordScope::All
    } else if is_mechanic(roles) {
        RecordScope::Mechanic(user_id)
    } else if is_customer(roles) {
        RecordScope::Customer(user_id)
    } else {
        RecordScope::Requester(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::service_record::ServiceRecord;
    use rust_decimal::Decimal;

    fn record_for(customer_id: Uuid, mechanic_id: Uuid, requester_id: Uuid) -> ServiceRecord {
        ServiceRecord::new(
            "Revisión general".to_string(),
            Decimal::from(2),
            customer_id,
            Uuid::new_v4(),
            mechanic_id,
            requester_id,
        )
    }

    #[test]
    fn test_admin_capabilities() {
        let admin_id = Uuid::new_v4();
        let roles = vec![UserRole::Admin];
        let record = record_for(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        assert!(can_create_records(&roles));
        assert!(can_delete_records(&roles));
        assert!(can_assign_mechanic(&roles));
        assert!(can_edit_record(admin_id, &roles, &record));
        assert!(can_complete_record(admin_id, &roles, &record));
        assert!(can_view_record(admin_id, &roles, &record));
        assert_eq!(list_scope(admin_id, &roles), RecordScope::All);
    }

    #[test]
    fn test_mechanic_capabilities() {
        let mechanic_id = Uuid::new_v4();
        let roles = vec![UserRole::Mechanic];
        let assigned = record_for(Uuid::new_v4(), mechanic_id, Uuid::new_v4());
        let other = record_for(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        assert!(!can_create_records(&roles));
        assert!(!can_delete_records(&roles));
        assert!(!can_assign_mechanic(&roles));

        assert!(can_edit_record(mechanic_id, &roles, &assigned));
        assert!(!can_edit_record(mechanic_id, &roles, &other));
        assert!(can_complete_record(mechanic_id, &roles, &assigned));
        assert!(!can_complete_record(mechanic_id, &roles, &other));
        assert!(can_view_record(mechanic_id, &roles, &assigned));
        assert!(!can_view_record(mechanic_id, &roles, &other));

        assert_eq!(
            list_scope(mechanic_id, &roles),
            RecordScope::Mechanic(mechanic_id)
        );
    }

    #[test]
    fn test_customer_capabilities() {
        let customer_id = Uuid::new_v4();
        let roles = vec![UserRole::Customer];
        let own = record_for(customer_id, Uuid::new_v4(), Uuid::new_v4());
        let other = record_for(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        assert!(!can_create_records(&roles));
        assert!(!can_delete_records(&roles));
        assert!(!can_edit_record(customer_id, &roles, &own));
        assert!(!can_complete_record(customer_id, &roles, &own));

        assert!(can_view_record(customer_id, &roles, &own));
        assert!(!can_view_record(customer_id, &roles, &other));

        assert_eq!(
            list_scope(customer_id, &roles),
            RecordScope::Customer(customer_id)
        );
    }

    #[test]
    fn test_requester_can_view_own_request() {
        let requester_id = Uuid::new_v4();
        let roles: Vec<UserRole> = vec![];
        let record = record_for(Uuid::new_v4(), Uuid::new_v4(), requester_id);

        assert!(can_view_record(requester_id, &roles, &record));
        assert_eq!(
            list_scope(requester_id, &roles),
            RecordScope::Requester(requester_id)
        );
    }

    #[test]
    fn test_role_cascade_prefers_mechanic_over_customer() {
        let user_id = Uuid::new_v4();
        let roles = vec![UserRole::Customer, UserRole::Mechanic];

        assert_eq!(list_scope(user_id, &roles), RecordScope::Mechanic(user_id));
    }
}
