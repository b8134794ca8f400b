use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::profiles::entity::{EntityType, ProfileRef};
use crate::domain::profiles::firm::{FirmCollections, FirmDetails};
use crate::domain::profiles::lawyer::{LawyerCollections, LawyerDetails};
use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeStatus {
    Pending,
    Approved,
    Rejected,
}

impl ChangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeStatus::Pending => "PENDING",
            ChangeStatus::Approved => "APPROVED",
            ChangeStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(ChangeStatus::Pending),
            "APPROVED" => Some(ChangeStatus::Approved),
            "REJECTED" => Some(ChangeStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawyerChange {
    pub slug: String,
    pub details: LawyerDetails,
    #[serde(default)]
    pub collections: LawyerCollections,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmChange {
    pub slug: String,
    pub details: FirmDetails,
    #[serde(default)]
    pub collections: FirmCollections,
}

/// Proposed profile content, stored as the `changes_json` column.
///
/// The JSON carries an `entityType` tag, so a payload can only ever be
/// applied to the entity type it was validated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entityType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposedChanges {
    Lawyer(LawyerChange),
    Firm(FirmChange),
}

impl ProposedChanges {
    pub fn entity_type(&self) -> EntityType {
        match self {
            ProposedChanges::Lawyer(_) => EntityType::Lawyer,
            ProposedChanges::Firm(_) => EntityType::Firm,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            ProposedChanges::Lawyer(c) => &c.slug,
            ProposedChanges::Firm(c) => &c.slug,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            ProposedChanges::Lawyer(c) => c.details.full_name(),
            ProposedChanges::Firm(c) => c.details.name.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ProposedChanges::Lawyer(c) => c.details.validate(),
            ProposedChanges::Firm(c) => c.details.validate(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_json(value: serde_json::Value) -> anyhow::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone)]
pub struct PendingChange {
    pub id: Uuid,
    pub entity: ProfileRef,
    pub submitted_by: Uuid,
    pub changes: ProposedChanges,
    pub status: ChangeStatus,
    pub reviewed_by: Option<Uuid>,
    pub review_note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl PendingChange {
    pub fn is_pending(&self) -> bool {
        self.status == ChangeStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_is_tagged_by_entity_type() {
        let change = ProposedChanges::Lawyer(LawyerChange {
            slug: "jane-doe".into(),
            details: LawyerDetails {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                ..Default::default()
            },
            collections: LawyerCollections::default(),
        });
        let value = change.to_json().unwrap();
        assert_eq!(value["entityType"], json!("LAWYER"));
        assert_eq!(value["slug"], json!("jane-doe"));
        assert_eq!(value["details"]["firstName"], json!("Jane"));
    }

    #[test]
    fn firm_payload_does_not_parse_as_lawyer_fields() {
        let value = json!({
            "entityType": "FIRM",
            "slug": "doe-partners",
            "details": { "name": "Doe & Partners", "email": "a@b.co", "phone": "555" },
            "collections": { "practiceAreas": ["Tax"] }
        });
        let parsed = ProposedChanges::from_json(value).unwrap();
        assert_eq!(parsed.entity_type(), EntityType::Firm);
        assert_eq!(parsed.display_name(), "Doe & Partners");
        match parsed {
            ProposedChanges::Firm(c) => assert_eq!(c.collections.practice_areas, vec!["Tax"]),
            ProposedChanges::Lawyer(_) => panic!("expected firm payload"),
        }
    }

    #[test]
    fn unknown_entity_type_is_rejected() {
        let value = json!({ "entityType": "JUDGE", "slug": "x", "details": {} });
        assert!(ProposedChanges::from_json(value).is_err());
    }
}
