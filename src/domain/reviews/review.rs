use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::profiles::entity::ProfileRef;
use crate::domain::validation::ValidationError;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
    Flagged,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "PENDING",
            ReviewStatus::Approved => "APPROVED",
            ReviewStatus::Rejected => "REJECTED",
            ReviewStatus::Flagged => "FLAGGED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(ReviewStatus::Pending),
            "APPROVED" => Some(ReviewStatus::Approved),
            "REJECTED" => Some(ReviewStatus::Rejected),
            "FLAGGED" => Some(ReviewStatus::Flagged),
            _ => None,
        }
    }

    /// Rejected reviews are final; every other state can move to a different one.
    pub fn can_transition_to(&self, next: ReviewStatus) -> bool {
        use ReviewStatus::*;
        matches!(
            (self, next),
            (Pending, Approved | Rejected | Flagged)
                | (Flagged, Approved | Rejected)
                | (Approved, Flagged | Rejected)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject,
    Flag,
}

impl ModerationAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" => Some(ModerationAction::Approve),
            "reject" => Some(ModerationAction::Reject),
            "flag" => Some(ModerationAction::Flag),
            _ => None,
        }
    }

    pub fn target_status(&self) -> ReviewStatus {
        match self {
            ModerationAction::Approve => ReviewStatus::Approved,
            ModerationAction::Reject => ReviewStatus::Rejected,
            ModerationAction::Flag => ReviewStatus::Flagged,
        }
    }
}

/// Component ratings collected by the review form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratings {
    pub communication: i16,
    pub expertise: i16,
    pub value: i16,
    pub outcome: Option<i16>,
}

impl Ratings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut fields = vec![
            ("communicationRating", self.communication),
            ("expertiseRating", self.expertise),
            ("valueRating", self.value),
        ];
        if let Some(outcome) = self.outcome {
            fields.push(("outcomeRating", outcome));
        }
        for (name, value) in fields {
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(ValidationError(format!(
                    "{name} must be between {MIN_RATING} and {MAX_RATING}"
                )));
            }
        }
        Ok(())
    }

    /// Mean of the three core ratings, or of all four when an outcome was given.
    pub fn overall(&self) -> f64 {
        let mut sum = f64::from(self.communication + self.expertise + self.value);
        let mut n = 3.0;
        if let Some(outcome) = self.outcome {
            sum += f64::from(outcome);
            n += 1.0;
        }
        sum / n
    }
}

#[derive(Debug, Clone)]
pub struct ReviewResponse {
    pub content: String,
    pub responded_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct Review {
    pub id: Uuid,
    pub target: ProfileRef,
    pub author_id: Uuid,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub ratings: Ratings,
    pub overall_rating: f64,
    pub status: ReviewStatus,
    pub moderation_note: Option<String>,
    pub response: Option<ReviewResponse>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Aggregate over approved reviews only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub average: f64,
    pub count: i64,
}
