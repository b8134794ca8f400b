use uuid::Uuid;

use crate::domain::profiles::entity::EntityType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    ProfileCreated,
    ProfileUpdated,
    ChangeApproved,
    ChangeRejected,
    ReviewModerated,
    ReviewResponded,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::ProfileCreated => "PROFILE_CREATED",
            AuditAction::ProfileUpdated => "PROFILE_UPDATED",
            AuditAction::ChangeApproved => "CHANGE_APPROVED",
            AuditAction::ChangeRejected => "CHANGE_REJECTED",
            AuditAction::ReviewModerated => "REVIEW_MODERATED",
            AuditAction::ReviewResponded => "REVIEW_RESPONDED",
        }
    }
}

/// What the audit row is about. Reviews are audited under their own type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditSubject {
    Profile(EntityType),
    Review,
}

impl AuditSubject {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditSubject::Profile(t) => t.as_str(),
            AuditSubject::Review => "REVIEW",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub actor_id: Option<Uuid>,
    pub action: AuditAction,
    pub subject: AuditSubject,
    pub entity_id: Uuid,
    pub details: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct AuditLog {
    pub id: Uuid,
    pub actor_id: Option<Uuid>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub details: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
