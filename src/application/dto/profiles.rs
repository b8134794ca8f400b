use uuid::Uuid;

use crate::domain::changes::pending_change::{ChangeStatus, PendingChange};
use crate::domain::profiles::entity::{ProfileRef, ProfileStatus};
use crate::domain::profiles::firm::LawFirm;
use crate::domain::profiles::lawyer::Lawyer;
use crate::domain::reviews::review::RatingSummary;

#[derive(Debug, Clone)]
pub struct SubmissionOutcomeDto {
    pub entity: ProfileRef,
    pub slug: String,
    pub status: ProfileStatus,
    pub change_id: Uuid,
    pub created: bool,
}

#[derive(Debug, Clone)]
pub struct OwnLawyerProfileDto {
    pub lawyer: Lawyer,
    pub effective_status: ProfileStatus,
    pub pending_change: Option<PendingChange>,
}

#[derive(Debug, Clone)]
pub struct OwnFirmProfileDto {
    pub firm: LawFirm,
    pub effective_status: ProfileStatus,
    pub pending_change: Option<PendingChange>,
}

#[derive(Debug, Clone)]
pub struct PublicLawyerDto {
    pub lawyer: Lawyer,
    pub rating: RatingSummary,
}

#[derive(Debug, Clone)]
pub struct PublicFirmDto {
    pub firm: LawFirm,
    pub rating: RatingSummary,
    pub lawyers: Vec<Lawyer>,
}

/// The live entity a change targets, as it is before the decision.
#[derive(Debug, Clone)]
pub enum LiveProfileDto {
    Lawyer(Lawyer),
    Firm(LawFirm),
}

#[derive(Debug, Clone)]
pub struct ChangeDetailDto {
    pub change: PendingChange,
    pub current: Option<LiveProfileDto>,
}

#[derive(Debug, Clone)]
pub struct ChangeDecisionDto {
    pub change_id: Uuid,
    pub status: ChangeStatus,
    pub entity: ProfileRef,
    /// Slug the entity carries after the decision.
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update,
}
