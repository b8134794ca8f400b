use crate::application::access::{self, Action, Actor, Resource};
use crate::application::dto::profiles::OwnLawyerProfileDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::pending_change_repository::PendingChangeRepository;
use crate::domain::profiles::entity::ProfileRef;

pub struct GetOwnLawyerProfile<'a, L, C>
where
    L: LawyerRepository + ?Sized,
    C: PendingChangeRepository + ?Sized,
{
    pub lawyers: &'a L,
    pub changes: &'a C,
}

impl<'a, L, C> GetOwnLawyerProfile<'a, L, C>
where
    L: LawyerRepository + ?Sized,
    C: PendingChangeRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Actor) -> ServiceResult<OwnLawyerProfileDto> {
        let (user_id, _) = access::require_user(actor, Resource::LawyerProfile, Action::Read)?;
        let lawyer = self
            .lawyers
            .find_by_owner(user_id)
            .await?
            .ok_or(ServiceError::NotFound("Lawyer profile"))?;
        let pending_change = self
            .changes
            .find_pending_for(ProfileRef::Lawyer(lawyer.id))
            .await?;
        Ok(OwnLawyerProfileDto {
            effective_status: lawyer.status.effective(pending_change.is_some()),
            lawyer,
            pending_change,
        })
    }
}
