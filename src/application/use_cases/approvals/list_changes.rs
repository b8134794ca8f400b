use crate::application::access::{self, Action, Actor, Resource};
use crate::application::error::ServiceResult;
use crate::application::ports::pending_change_repository::PendingChangeRepository;
use crate::domain::changes::pending_change::{ChangeStatus, PendingChange};

pub struct ListChanges<'a, C: PendingChangeRepository + ?Sized> {
    pub changes: &'a C,
}

impl<'a, C: PendingChangeRepository + ?Sized> ListChanges<'a, C> {
    pub async fn execute(
        &self,
        actor: &Actor,
        status: Option<ChangeStatus>,
        limit: i64,
    ) -> ServiceResult<Vec<PendingChange>> {
        access::require(actor, Resource::PendingChange, Action::Read)?;
        Ok(self.changes.list(status, limit.clamp(1, 500)).await?)
    }
}
