use uuid::Uuid;

use crate::application::error::ServiceError;
use crate::domain::users::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    User { id: Uuid, role: Role },
    Anonymous,
}

impl Actor {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Actor::User { id, .. } => Some(*id),
            Actor::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Actor::User { role, .. } => Some(*role),
            Actor::Anonymous => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    LawyerProfile,
    FirmProfile,
    PendingChange,
    Review,
    ContactMessage,
    Notification,
    AuditLog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Moderate,
    Respond,
}

// Presentation resolves the Actor from the session; every role decision lives here.

pub fn allows(role: Option<Role>, resource: Resource, action: Action) -> bool {
    use Action::*;
    use Resource::*;
    use Role::*;

    let Some(role) = role else {
        // Visitors may only use the public contact form.
        return matches!((resource, action), (ContactMessage, Create));
    };
    if role == Admin {
        return true;
    }
    match (resource, action) {
        (LawyerProfile, Read | Create | Update) => matches!(role, Lawyer | LawyerFirmOwner),
        (FirmProfile, Read | Create | Update) => matches!(role, FirmOwner | LawyerFirmOwner),
        (Review, Create) => role == Client,
        (Review, Respond) => matches!(role, Lawyer | FirmOwner | LawyerFirmOwner),
        (ContactMessage, Create) => true,
        (ContactMessage, Read | Update) => matches!(role, Lawyer | FirmOwner | LawyerFirmOwner),
        (Notification, Read | Update) => true,
        _ => false,
    }
}

pub fn require(actor: &Actor, resource: Resource, action: Action) -> Result<(), ServiceError> {
    if allows(actor.role(), resource, action) {
        Ok(())
    } else {
        tracing::debug!(?actor, ?resource, ?action, "capability_denied");
        Err(ServiceError::Unauthorized)
    }
}

/// Like [`require`], for operations that need a signed-in user.
pub fn require_user(
    actor: &Actor,
    resource: Resource,
    action: Action,
) -> Result<(Uuid, Role), ServiceError> {
    require(actor, resource, action)?;
    match actor {
        Actor::User { id, role } => Ok((*id, *role)),
        Actor::Anonymous => Err(ServiceError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> Actor {
        Actor::User {
            id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn approvals_are_admin_only() {
        for role in [
            Role::Lawyer,
            Role::FirmOwner,
            Role::LawyerFirmOwner,
            Role::Client,
        ] {
            assert!(!allows(Some(role), Resource::PendingChange, Action::Moderate));
            assert!(!allows(Some(role), Resource::AuditLog, Action::Read));
        }
        assert!(allows(
            Some(Role::Admin),
            Resource::PendingChange,
            Action::Moderate
        ));
        assert!(!allows(None, Resource::PendingChange, Action::Read));
    }

    #[test]
    fn profile_writes_follow_role_lists() {
        assert!(allows(Some(Role::Lawyer), Resource::LawyerProfile, Action::Create));
        assert!(allows(
            Some(Role::LawyerFirmOwner),
            Resource::LawyerProfile,
            Action::Update
        ));
        assert!(!allows(Some(Role::FirmOwner), Resource::LawyerProfile, Action::Create));
        assert!(!allows(Some(Role::Client), Resource::LawyerProfile, Action::Create));
        assert!(allows(Some(Role::FirmOwner), Resource::FirmProfile, Action::Update));
        assert!(!allows(Some(Role::Lawyer), Resource::FirmProfile, Action::Create));
    }

    #[test]
    fn visitors_can_only_send_messages() {
        assert!(require(&Actor::Anonymous, Resource::ContactMessage, Action::Create).is_ok());
        assert!(matches!(
            require_user(&Actor::Anonymous, Resource::Review, Action::Create),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn only_clients_write_reviews() {
        assert!(require_user(&user(Role::Client), Resource::Review, Action::Create).is_ok());
        assert!(require_user(&user(Role::Lawyer), Resource::Review, Action::Create).is_err());
    }
}
