use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::profiles::collections::{
    Certification, CollectionDelta, CourtAppearance, Stored, reconcile,
};
use crate::domain::profiles::entity::ProfileStatus;
use crate::domain::validation::{ValidationError, require_fields, require_non_negative};

/// Scalar profile fields of a lawyer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawyerDetails {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub bar_number: Option<String>,
    #[serde(default)]
    pub years_experience: Option<i32>,
    #[serde(default)]
    pub hourly_rate: Option<i32>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub firm_id: Option<Uuid>,
}

impl LawyerDetails {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_fields(&[
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
        ])?;
        require_non_negative("yearsExperience", self.years_experience)?;
        require_non_negative("hourlyRate", self.hourly_rate)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawyerCollections {
    #[serde(default)]
    pub specialisations: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub court_appearances: Vec<CourtAppearance>,
}

#[derive(Debug, Clone, Default)]
pub struct StoredLawyerCollections {
    pub specialisations: Vec<Stored<String>>,
    pub languages: Vec<Stored<String>>,
    pub certifications: Vec<Stored<Certification>>,
    pub court_appearances: Vec<Stored<CourtAppearance>>,
}

#[derive(Debug, Clone, Default)]
pub struct LawyerCollectionsDelta {
    pub specialisations: CollectionDelta<String>,
    pub languages: CollectionDelta<String>,
    pub certifications: CollectionDelta<Certification>,
    pub court_appearances: CollectionDelta<CourtAppearance>,
}

impl LawyerCollectionsDelta {
    pub fn is_empty(&self) -> bool {
        self.specialisations.is_empty()
            && self.languages.is_empty()
            && self.certifications.is_empty()
            && self.court_appearances.is_empty()
    }
}

impl StoredLawyerCollections {
    pub fn diff(&self, desired: &LawyerCollections) -> LawyerCollectionsDelta {
        LawyerCollectionsDelta {
            specialisations: reconcile(&self.specialisations, &desired.specialisations),
            languages: reconcile(&self.languages, &desired.languages),
            certifications: reconcile(&self.certifications, &desired.certifications),
            court_appearances: reconcile(&self.court_appearances, &desired.court_appearances),
        }
    }

    pub fn into_plain(self) -> LawyerCollections {
        LawyerCollections {
            specialisations: self.specialisations.into_iter().map(|s| s.item).collect(),
            languages: self.languages.into_iter().map(|s| s.item).collect(),
            certifications: self.certifications.into_iter().map(|s| s.item).collect(),
            court_appearances: self.court_appearances.into_iter().map(|s| s.item).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Lawyer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slug: String,
    pub status: ProfileStatus,
    pub details: LawyerDetails,
    pub collections: LawyerCollections,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Lawyer {
    pub fn display_name(&self) -> String {
        self.details.full_name()
    }

    pub fn is_published(&self) -> bool {
        self.status == ProfileStatus::Published
    }
}
