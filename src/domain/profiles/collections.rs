use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An item of a profile-owned collection, matched across edits by its natural key.
pub trait CollectionItem: Clone + PartialEq {
    fn natural_key(&self) -> String;
}

impl CollectionItem for String {
    fn natural_key(&self) -> String {
        self.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl CollectionItem for Certification {
    fn natural_key(&self) -> String {
        format!(
            "{}|{}",
            self.name.trim().to_lowercase(),
            self.issuer.as_deref().unwrap_or("").trim().to_lowercase()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtAppearance {
    pub court: String,
    #[serde(default)]
    pub case_count: i32,
}

impl CollectionItem for CourtAppearance {
    fn natural_key(&self) -> String {
        self.court.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmLocation {
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

impl CollectionItem for FirmLocation {
    fn natural_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.address.trim().to_lowercase(),
            self.city.trim().to_lowercase(),
            self.state.trim().to_lowercase()
        )
    }
}

/// A persisted collection row.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<T> {
    pub id: Uuid,
    pub item: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionDelta<T> {
    pub insert: Vec<T>,
    pub update: Vec<Stored<T>>,
    pub delete: Vec<Uuid>,
}

impl<T> Default for CollectionDelta<T> {
    fn default() -> Self {
        Self {
            insert: Vec::new(),
            update: Vec::new(),
            delete: Vec::new(),
        }
    }
}

impl<T> CollectionDelta<T> {
    pub fn is_empty(&self) -> bool {
        self.insert.is_empty() && self.update.is_empty() && self.delete.is_empty()
    }
}

/// Computes the writes that turn `existing` into `desired`.
///
/// Rows are matched on [`CollectionItem::natural_key`]. A matched row whose
/// value changed becomes an update that keeps its id; unmatched desired items
/// are inserted and unmatched rows deleted. Duplicate keys in `desired`
/// collapse to their first occurrence, duplicate stored rows beyond the first
/// are deleted.
pub fn reconcile<T: CollectionItem>(existing: &[Stored<T>], desired: &[T]) -> CollectionDelta<T> {
    let mut by_key: HashMap<String, &Stored<T>> = HashMap::new();
    let mut delta = CollectionDelta::default();
    for row in existing {
        let key = row.item.natural_key();
        if by_key.contains_key(&key) {
            delta.delete.push(row.id);
        } else {
            by_key.insert(key, row);
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    for item in desired {
        let key = item.natural_key();
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        match by_key.remove(&key) {
            Some(row) if row.item == *item => {}
            Some(row) => delta.update.push(Stored {
                id: row.id,
                item: item.clone(),
            }),
            None => delta.insert.push(item.clone()),
        }
    }

    let mut leftovers: Vec<Uuid> = by_key.into_values().map(|row| row.id).collect();
    leftovers.sort();
    delta.delete.extend(leftovers);
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored<T>(item: T) -> Stored<T> {
        Stored {
            id: Uuid::new_v4(),
            item,
        }
    }

    #[test]
    fn keeps_updates_inserts_and_deletes() {
        let family = stored("Family Law".to_string());
        let tax = stored("Tax".to_string());
        let existing = vec![family.clone(), tax.clone()];
        let desired = vec!["family law".to_string(), "Immigration".to_string()];

        let delta = reconcile(&existing, &desired);

        assert_eq!(
            delta.update,
            vec![Stored {
                id: family.id,
                item: "family law".to_string()
            }]
        );
        assert_eq!(delta.insert, vec!["Immigration".to_string()]);
        assert_eq!(delta.delete, vec![tax.id]);
    }

    #[test]
    fn identical_sets_produce_no_writes() {
        let existing = vec![
            stored(CourtAppearance {
                court: "Supreme Court".into(),
                case_count: 3,
            }),
            stored(CourtAppearance {
                court: "District Court".into(),
                case_count: 10,
            }),
        ];
        let desired: Vec<CourtAppearance> = existing.iter().map(|s| s.item.clone()).collect();
        assert!(reconcile(&existing, &desired).is_empty());
    }

    #[test]
    fn changed_value_with_same_key_is_an_update() {
        let row = stored(CourtAppearance {
            court: "Supreme Court".into(),
            case_count: 3,
        });
        let desired = vec![CourtAppearance {
            court: "Supreme Court".into(),
            case_count: 4,
        }];
        let delta = reconcile(std::slice::from_ref(&row), &desired);
        assert!(delta.insert.is_empty());
        assert!(delta.delete.is_empty());
        assert_eq!(delta.update.len(), 1);
        assert_eq!(delta.update[0].id, row.id);
        assert_eq!(delta.update[0].item.case_count, 4);
    }

    #[test]
    fn duplicates_collapse() {
        let a = stored("English".to_string());
        let b = stored("english".to_string());
        let desired = vec![
            "English".to_string(),
            "ENGLISH".to_string(),
            "  ".to_string(),
        ];
        let delta = reconcile(&[a.clone(), b.clone()], &desired);
        assert!(delta.insert.is_empty());
        assert!(delta.update.is_empty());
        assert_eq!(delta.delete, vec![b.id]);
    }

    #[test]
    fn empty_desired_deletes_everything() {
        let rows = vec![stored("Spanish".to_string()), stored("French".to_string())];
        let delta = reconcile(&rows, &[]);
        assert_eq!(delta.delete.len(), 2);
        assert!(delta.insert.is_empty());
    }
}
