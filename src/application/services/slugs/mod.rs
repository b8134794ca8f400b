use uuid::Uuid;

use crate::application::ports::slug_lookup::SlugLookup;
use crate::domain::profiles::slug::{candidate, slugify};

const MAX_PROBES: u32 = 500;

/// First free slug among `base`, `base-1`, `base-2`, ... ignoring `exclude`'s own row.
pub async fn allocate_slug<L: SlugLookup + ?Sized>(
    lookup: &L,
    base: &str,
    exclude: Option<Uuid>,
) -> anyhow::Result<String> {
    let base = slugify(base);
    for attempt in 0..MAX_PROBES {
        let slug = candidate(&base, attempt);
        if !lookup.slug_taken(&slug, exclude).await? {
            return Ok(slug);
        }
    }
    // Pathological collision run: fall back to a random suffix.
    let suffix = Uuid::new_v4().simple().to_string();
    Ok(format!("{}-{}", base, &suffix[..8]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct Taken(HashMap<String, Uuid>);

    #[async_trait]
    impl SlugLookup for Taken {
        async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> anyhow::Result<bool> {
            Ok(self
                .0
                .get(slug)
                .map(|owner| Some(*owner) != exclude)
                .unwrap_or(false))
        }
    }

    #[tokio::test]
    async fn free_base_is_used_verbatim() {
        let lookup = Taken(HashMap::new());
        let slug = allocate_slug(&lookup, "Jane Doe", None).await.unwrap();
        assert_eq!(slug, "jane-doe");
    }

    #[tokio::test]
    async fn collisions_get_numeric_suffix() {
        let mut taken = HashMap::new();
        taken.insert("jane-doe".to_string(), Uuid::new_v4());
        taken.insert("jane-doe-1".to_string(), Uuid::new_v4());
        let slug = allocate_slug(&Taken(taken), "jane-doe", None).await.unwrap();
        assert_eq!(slug, "jane-doe-2");
    }

    #[tokio::test]
    async fn own_row_does_not_collide() {
        let me = Uuid::new_v4();
        let mut taken = HashMap::new();
        taken.insert("jane-doe".to_string(), me);
        let slug = allocate_slug(&Taken(taken), "jane-doe", Some(me))
            .await
            .unwrap();
        assert_eq!(slug, "jane-doe");
    }
}
