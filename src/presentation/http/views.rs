use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::profiles::SubmissionOutcomeDto;
use crate::domain::changes::pending_change::{PendingChange, ProposedChanges};
use crate::domain::profiles::collections::{Certification, CourtAppearance, FirmLocation};
use crate::domain::profiles::firm::{FirmCollections, FirmDetails, LawFirm};
use crate::domain::profiles::lawyer::{Lawyer, LawyerCollections, LawyerDetails};
use crate::domain::reviews::review::{RatingSummary, Review};
use crate::presentation::http::error::ApiError;

// --- request bodies shared by the profile endpoints ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificationBody {
    #[serde(default)]
    pub name: String,
    pub issuer: Option<String>,
    pub year: Option<i32>,
}

impl From<CertificationBody> for Certification {
    fn from(b: CertificationBody) -> Self {
        Certification {
            name: b.name,
            issuer: b.issuer,
            year: b.year,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourtAppearanceBody {
    #[serde(default)]
    pub court: String,
    #[serde(default)]
    pub case_count: i32,
}

impl From<CourtAppearanceBody> for CourtAppearance {
    fn from(b: CourtAppearanceBody) -> Self {
        CourtAppearance {
            court: b.court,
            case_count: b.case_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationBody {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub zip_code: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

impl From<LocationBody> for FirmLocation {
    fn from(b: LocationBody) -> Self {
        FirmLocation {
            address: b.address,
            city: b.city,
            state: b.state,
            zip_code: b.zip_code,
            is_primary: b.is_primary,
        }
    }
}

/// Parses a required path-free identifier field of a request body.
pub fn parse_uuid(field: &str, value: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value.trim()).map_err(|_| ApiError::bad_request(format!("Invalid {field}")))
}

// --- response views ---

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LawyerView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slug: String,
    pub status: String,
    #[schema(value_type = Object)]
    pub details: LawyerDetails,
    #[schema(value_type = Object)]
    pub collections: LawyerCollections,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Lawyer> for LawyerView {
    fn from(l: Lawyer) -> Self {
        LawyerView {
            id: l.id,
            user_id: l.user_id,
            slug: l.slug,
            status: l.status.as_str().to_string(),
            details: l.details,
            collections: l.collections,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FirmView {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub slug: String,
    pub status: String,
    #[schema(value_type = Object)]
    pub details: FirmDetails,
    #[schema(value_type = Object)]
    pub collections: FirmCollections,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<LawFirm> for FirmView {
    fn from(f: LawFirm) -> Self {
        FirmView {
            id: f.id,
            owner_id: f.owner_id,
            slug: f.slug,
            status: f.status.as_str().to_string(),
            details: f.details,
            collections: f.collections,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingChangeView {
    pub id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub submitted_by: Uuid,
    pub status: String,
    /// Tagged payload: `{"entityType": "LAWYER" | "FIRM", "slug", "details", "collections"}`
    #[schema(value_type = Object)]
    pub changes: ProposedChanges,
    pub reviewed_by: Option<Uuid>,
    pub review_note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<PendingChange> for PendingChangeView {
    fn from(c: PendingChange) -> Self {
        PendingChangeView {
            id: c.id,
            entity_type: c.entity.entity_type().as_str().to_string(),
            entity_id: c.entity.id(),
            submitted_by: c.submitted_by,
            status: c.status.as_str().to_string(),
            changes: c.changes,
            reviewed_by: c.reviewed_by,
            review_note: c.review_note,
            created_at: c.created_at,
            reviewed_at: c.reviewed_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub entity_type: String,
    pub entity_id: Uuid,
    pub slug: String,
    /// Effective status after the submission
    pub status: String,
    pub change_id: Uuid,
    pub created: bool,
}

impl From<SubmissionOutcomeDto> for SubmissionResponse {
    fn from(o: SubmissionOutcomeDto) -> Self {
        SubmissionResponse {
            entity_type: o.entity.entity_type().as_str().to_string(),
            entity_id: o.entity.id(),
            slug: o.slug,
            status: o.status.as_str().to_string(),
            change_id: o.change_id,
            created: o.created,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingView {
    pub average: f64,
    pub count: i64,
}

impl From<RatingSummary> for RatingView {
    fn from(r: RatingSummary) -> Self {
        RatingView {
            average: r.average,
            count: r.count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponseView {
    pub content: String,
    pub responded_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub id: Uuid,
    pub target_type: String,
    pub target_id: Uuid,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub communication_rating: i16,
    pub expertise_rating: i16,
    pub value_rating: i16,
    pub outcome_rating: Option<i16>,
    pub overall_rating: f64,
    pub status: String,
    pub response: Option<ReviewResponseView>,
    /// Only present on moderation endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderation_note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ReviewView {
    /// Public shape: hides the author id and the moderator's note.
    pub fn public(r: Review) -> Self {
        let mut view = Self::moderation(r);
        view.author_id = None;
        view.moderation_note = None;
        view
    }

    pub fn moderation(r: Review) -> Self {
        ReviewView {
            id: r.id,
            target_type: r.target.entity_type().as_str().to_string(),
            target_id: r.target.id(),
            author_name: r.author_name,
            title: r.title,
            content: r.content,
            communication_rating: r.ratings.communication,
            expertise_rating: r.ratings.expertise,
            value_rating: r.ratings.value,
            outcome_rating: r.ratings.outcome,
            overall_rating: r.overall_rating,
            status: r.status.as_str().to_string(),
            response: r.response.map(|resp| ReviewResponseView {
                content: resp.content,
                responded_at: resp.responded_at,
            }),
            author_id: Some(r.author_id),
            moderation_note: r.moderation_note,
            created_at: r.created_at,
        }
    }
}
