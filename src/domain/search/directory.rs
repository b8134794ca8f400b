use std::cmp::Ordering;

use uuid::Uuid;

use crate::domain::profiles::entity::EntityType;
use crate::domain::validation::ValidationError;

pub const MAX_TAKE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    #[default]
    All,
    Lawyer,
    Firm,
}

impl SearchType {
    pub fn includes(&self, entity_type: EntityType) -> bool {
        match self {
            SearchType::All => true,
            SearchType::Lawyer => entity_type == EntityType::Lawyer,
            SearchType::Firm => entity_type == EntityType::Firm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Rating,
    Reviews,
    Experience,
    Name,
}

/// Query-string values as received.
#[derive(Debug, Clone, Default)]
pub struct RawSearchParams {
    pub query: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub areas: Option<String>,
    pub rating: Option<String>,
    pub experience: Option<String>,
    pub kind: Option<String>,
    pub sort: Option<String>,
    pub take: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub query: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    /// Lowercased practice-area names; a hit must carry at least one.
    pub areas: Vec<String>,
    pub min_rating: Option<f64>,
    pub min_experience: Option<i32>,
    pub kind: SearchType,
    pub sort: SortOrder,
    pub take: i64,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SearchCriteria {
    pub fn parse(raw: RawSearchParams, default_take: i64) -> Result<Self, ValidationError> {
        let min_rating = match non_blank(raw.rating) {
            Some(v) => {
                let r: f64 = v
                    .parse()
                    .map_err(|_| ValidationError::new("rating must be a number"))?;
                if !(0.0..=5.0).contains(&r) {
                    return Err(ValidationError::new("rating must be between 0 and 5"));
                }
                Some(r)
            }
            None => None,
        };
        let min_experience = match non_blank(raw.experience) {
            Some(v) => {
                let years: i32 = v
                    .parse()
                    .map_err(|_| ValidationError::new("experience must be a whole number"))?;
                Some(years.max(0))
            }
            None => None,
        };
        let kind = match non_blank(raw.kind).map(|k| k.to_ascii_lowercase()).as_deref() {
            None | Some("all") => SearchType::All,
            Some("lawyer") | Some("lawyers") => SearchType::Lawyer,
            Some("firm") | Some("firms") => SearchType::Firm,
            Some(_) => return Err(ValidationError::new("type must be lawyer, firm or all")),
        };
        let sort = match non_blank(raw.sort).map(|s| s.to_ascii_lowercase()).as_deref() {
            None | Some("rating") => SortOrder::Rating,
            Some("reviews") => SortOrder::Reviews,
            Some("experience") => SortOrder::Experience,
            Some("name") => SortOrder::Name,
            Some(_) => {
                return Err(ValidationError::new(
                    "sort must be rating, reviews, experience or name",
                ));
            }
        };
        let take = non_blank(raw.take)
            .and_then(|t| t.parse::<i64>().ok())
            .unwrap_or(default_take)
            .clamp(1, MAX_TAKE);
        let areas = raw
            .areas
            .map(|a| {
                a.split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            query: non_blank(raw.query),
            location: non_blank(raw.location),
            state: non_blank(raw.state),
            areas,
            min_rating,
            min_experience,
            kind,
            sort,
            take,
        })
    }

    /// Firms carry no years-of-experience figure, so an experience filter excludes them.
    pub fn wants(&self, entity_type: EntityType) -> bool {
        if !self.kind.includes(entity_type) {
            return false;
        }
        !(entity_type == EntityType::Firm && self.min_experience.is_some())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryHit {
    pub kind: EntityType,
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub specialisations: Vec<String>,
    pub rating: f64,
    pub review_count: i64,
    pub years_experience: Option<i32>,
    pub image_url: Option<String>,
}

fn by_name(a: &DirectoryHit, b: &DirectoryHit) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

fn desc_f64(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

pub fn sort_hits(hits: &mut [DirectoryHit], sort: SortOrder) {
    hits.sort_by(|a, b| match sort {
        SortOrder::Rating => desc_f64(a.rating, b.rating)
            .then(b.review_count.cmp(&a.review_count))
            .then_with(|| by_name(a, b)),
        SortOrder::Reviews => b
            .review_count
            .cmp(&a.review_count)
            .then(desc_f64(a.rating, b.rating))
            .then_with(|| by_name(a, b)),
        SortOrder::Experience => b
            .years_experience
            .unwrap_or(-1)
            .cmp(&a.years_experience.unwrap_or(-1))
            .then(desc_f64(a.rating, b.rating))
            .then_with(|| by_name(a, b)),
        SortOrder::Name => by_name(a, b),
    });
}

/// Applies the numeric thresholds, orders the merged hits and cuts to `take`.
pub fn finalize(mut hits: Vec<DirectoryHit>, criteria: &SearchCriteria) -> Vec<DirectoryHit> {
    if let Some(min) = criteria.min_rating {
        hits.retain(|h| h.rating >= min);
    }
    if let Some(min) = criteria.min_experience {
        hits.retain(|h| h.years_experience.unwrap_or(0) >= min);
    }
    sort_hits(&mut hits, criteria.sort);
    hits.truncate(criteria.take.max(0) as usize);
    hits
}
