use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Lawyer,
    Firm,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Lawyer => "LAWYER",
            EntityType::Firm => "FIRM",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LAWYER" => Some(EntityType::Lawyer),
            "FIRM" => Some(EntityType::Firm),
            _ => None,
        }
    }
}

/// A reference to exactly one directory profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileRef {
    Lawyer(Uuid),
    Firm(Uuid),
}

impl ProfileRef {
    pub fn new(entity_type: EntityType, id: Uuid) -> Self {
        match entity_type {
            EntityType::Lawyer => ProfileRef::Lawyer(id),
            EntityType::Firm => ProfileRef::Firm(id),
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            ProfileRef::Lawyer(_) => EntityType::Lawyer,
            ProfileRef::Firm(_) => EntityType::Firm,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            ProfileRef::Lawyer(id) | ProfileRef::Firm(id) => *id,
        }
    }

    pub fn lawyer_id(&self) -> Option<Uuid> {
        match self {
            ProfileRef::Lawyer(id) => Some(*id),
            ProfileRef::Firm(_) => None,
        }
    }

    pub fn firm_id(&self) -> Option<Uuid> {
        match self {
            ProfileRef::Firm(id) => Some(*id),
            ProfileRef::Lawyer(_) => None,
        }
    }

    /// Rebuilds a reference from the paired nullable columns used in storage.
    pub fn from_columns(lawyer_id: Option<Uuid>, firm_id: Option<Uuid>) -> Option<Self> {
        match (lawyer_id, firm_id) {
            (Some(id), None) => Some(ProfileRef::Lawyer(id)),
            (None, Some(id)) => Some(ProfileRef::Firm(id)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileStatus {
    Draft,
    Pending,
    Published,
}

impl ProfileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileStatus::Draft => "DRAFT",
            ProfileStatus::Pending => "PENDING",
            ProfileStatus::Published => "PUBLISHED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(ProfileStatus::Draft),
            "PENDING" => Some(ProfileStatus::Pending),
            "PUBLISHED" => Some(ProfileStatus::Published),
            _ => None,
        }
    }

    /// PENDING is never stored: a draft with an outstanding change reads as pending.
    pub fn effective(self, has_pending_change: bool) -> Self {
        match self {
            ProfileStatus::Draft if has_pending_change => ProfileStatus::Pending,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_columns_requires_exactly_one_target() {
        let id = Uuid::new_v4();
        assert_eq!(
            ProfileRef::from_columns(Some(id), None),
            Some(ProfileRef::Lawyer(id))
        );
        assert_eq!(
            ProfileRef::from_columns(None, Some(id)),
            Some(ProfileRef::Firm(id))
        );
        assert_eq!(ProfileRef::from_columns(Some(id), Some(id)), None);
        assert_eq!(ProfileRef::from_columns(None, None), None);
    }

    #[test]
    fn effective_status_only_promotes_drafts() {
        assert_eq!(
            ProfileStatus::Draft.effective(true),
            ProfileStatus::Pending
        );
        assert_eq!(ProfileStatus::Draft.effective(false), ProfileStatus::Draft);
        assert_eq!(
            ProfileStatus::Published.effective(true),
            ProfileStatus::Published
        );
    }
}
