use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::profiles::collections::{
    CollectionDelta, CourtAppearance, FirmLocation, Stored, reconcile,
};
use crate::domain::profiles::entity::ProfileStatus;
use crate::domain::validation::{ValidationError, require_fields, require_non_negative};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub firm_size: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl FirmDetails {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_fields(&[
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
        ])?;
        require_non_negative("foundedYear", self.founded_year)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmCollections {
    #[serde(default)]
    pub locations: Vec<FirmLocation>,
    #[serde(default)]
    pub practice_areas: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub court_appearances: Vec<CourtAppearance>,
}

impl FirmCollections {
    /// The flagged primary location, else the first one listed.
    pub fn primary_location(&self) -> Option<&FirmLocation> {
        self.locations
            .iter()
            .find(|l| l.is_primary)
            .or_else(|| self.locations.first())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoredFirmCollections {
    pub locations: Vec<Stored<FirmLocation>>,
    pub practice_areas: Vec<Stored<String>>,
    pub languages: Vec<Stored<String>>,
    pub court_appearances: Vec<Stored<CourtAppearance>>,
}

#[derive(Debug, Clone, Default)]
pub struct FirmCollectionsDelta {
    pub locations: CollectionDelta<FirmLocation>,
    pub practice_areas: CollectionDelta<String>,
    pub languages: CollectionDelta<String>,
    pub court_appearances: CollectionDelta<CourtAppearance>,
}

impl FirmCollectionsDelta {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.practice_areas.is_empty()
            && self.languages.is_empty()
            && self.court_appearances.is_empty()
    }
}

impl StoredFirmCollections {
    pub fn diff(&self, desired: &FirmCollections) -> FirmCollectionsDelta {
        FirmCollectionsDelta {
            locations: reconcile(&self.locations, &desired.locations),
            practice_areas: reconcile(&self.practice_areas, &desired.practice_areas),
            languages: reconcile(&self.languages, &desired.languages),
            court_appearances: reconcile(&self.court_appearances, &desired.court_appearances),
        }
    }

    pub fn into_plain(self) -> FirmCollections {
        FirmCollections {
            locations: self.locations.into_iter().map(|s| s.item).collect(),
            practice_areas: self.practice_areas.into_iter().map(|s| s.item).collect(),
            languages: self.languages.into_iter().map(|s| s.item).collect(),
            court_appearances: self.court_appearances.into_iter().map(|s| s.item).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LawFirm {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub slug: String,
    pub status: ProfileStatus,
    pub details: FirmDetails,
    pub collections: FirmCollections,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl LawFirm {
    pub fn is_published(&self) -> bool {
        self.status == ProfileStatus::Published
    }
}
