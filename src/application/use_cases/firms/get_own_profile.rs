use crate::application::access::{self, Action, Actor, Resource};
use crate::application::dto::profiles::OwnFirmProfileDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::pending_change_repository::PendingChangeRepository;
use crate::domain::profiles::entity::ProfileRef;

pub struct GetOwnFirmProfile<'a, F, C>
where
    F: FirmRepository + ?Sized,
    C: PendingChangeRepository + ?Sized,
{
    pub firms: &'a F,
    pub changes: &'a C,
}

impl<'a, F, C> GetOwnFirmProfile<'a, F, C>
where
    F: FirmRepository + ?Sized,
    C: PendingChangeRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Actor) -> ServiceResult<OwnFirmProfileDto> {
        let (user_id, _) = access::require_user(actor, Resource::FirmProfile, Action::Read)?;
        let firm = self
            .firms
            .find_by_owner(user_id)
            .await?
            .ok_or(ServiceError::NotFound("Firm profile"))?;
        let pending_change = self
            .changes
            .find_pending_for(ProfileRef::Firm(firm.id))
            .await?;
        Ok(OwnFirmProfileDto {
            effective_status: firm.status.effective(pending_change.is_some()),
            firm,
            pending_change,
        })
    }
}
