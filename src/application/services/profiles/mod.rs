use uuid::Uuid;

use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::domain::profiles::entity::ProfileRef;

/// The live, published profile a review or message is addressed to.
#[derive(Debug, Clone)]
pub struct PublishedTarget {
    pub target: ProfileRef,
    pub owner_id: Uuid,
    pub name: String,
    pub slug: String,
}

impl PublishedTarget {
    pub fn public_path(&self) -> String {
        match self.target {
            ProfileRef::Lawyer(_) => format!("/lawyers/{}", self.slug),
            ProfileRef::Firm(_) => format!("/firms/{}", self.slug),
        }
    }
}

pub async fn resolve_published<L, F>(
    lawyers: &L,
    firms: &F,
    target: ProfileRef,
) -> anyhow::Result<Option<PublishedTarget>>
where
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
{
    let resolved = match target {
        ProfileRef::Lawyer(id) => lawyers
            .get(id)
            .await?
            .filter(|l| l.is_published())
            .map(|l| PublishedTarget {
                target,
                owner_id: l.user_id,
                name: l.display_name(),
                slug: l.slug,
            }),
        ProfileRef::Firm(id) => firms
            .get(id)
            .await?
            .filter(|f| f.is_published())
            .map(|f| PublishedTarget {
                target,
                owner_id: f.owner_id,
                name: f.details.name,
                slug: f.slug,
            }),
    };
    Ok(resolved)
}

/// Every profile owned by `user_id`, for inbox and response checks.
pub async fn owned_profiles<L, F>(
    lawyers: &L,
    firms: &F,
    user_id: Uuid,
) -> anyhow::Result<Vec<ProfileRef>>
where
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
{
    let mut out = Vec::new();
    if let Some(l) = lawyers.find_by_owner(user_id).await? {
        out.push(ProfileRef::Lawyer(l.id));
    }
    if let Some(f) = firms.find_by_owner(user_id).await? {
        out.push(ProfileRef::Firm(f.id));
    }
    Ok(out)
}
