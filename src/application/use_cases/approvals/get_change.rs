use uuid::Uuid;

use crate::application::access::{self, Action, Actor, Resource};
use crate::application::dto::profiles::{ChangeDetailDto, LiveProfileDto};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::pending_change_repository::PendingChangeRepository;
use crate::domain::profiles::entity::ProfileRef;

pub struct GetChange<'a, C, L, F>
where
    C: PendingChangeRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
{
    pub changes: &'a C,
    pub lawyers: &'a L,
    pub firms: &'a F,
}

impl<'a, C, L, F> GetChange<'a, C, L, F>
where
    C: PendingChangeRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Actor, id: Uuid) -> ServiceResult<ChangeDetailDto> {
        access::require(actor, Resource::PendingChange, Action::Read)?;
        let change = self
            .changes
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound("Change"))?;
        let current = match change.entity {
            ProfileRef::Lawyer(id) => self.lawyers.get(id).await?.map(LiveProfileDto::Lawyer),
            ProfileRef::Firm(id) => self.firms.get(id).await?.map(LiveProfileDto::Firm),
        };
        Ok(ChangeDetailDto { change, current })
    }
}
