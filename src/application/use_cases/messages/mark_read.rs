use uuid::Uuid;

use crate::application::access::{self, Action, Actor, Resource};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::message_repository::MessageRepository;
use crate::application::services::profiles::owned_profiles;

pub struct MarkMessageRead<'a, M, L, F>
where
    M: MessageRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
{
    pub messages: &'a M,
    pub lawyers: &'a L,
    pub firms: &'a F,
}

impl<'a, M, L, F> MarkMessageRead<'a, M, L, F>
where
    M: MessageRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Actor, id: Uuid) -> ServiceResult<()> {
        let (user_id, _) = access::require_user(actor, Resource::ContactMessage, Action::Update)?;
        // Someone else's message looks the same as a missing one.
        let message = self
            .messages
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound("Message"))?;
        let owned = owned_profiles(self.lawyers, self.firms, user_id).await?;
        if !owned.contains(&message.target) {
            return Err(ServiceError::NotFound("Message"));
        }
        if !self.messages.mark_read(id).await? {
            return Err(ServiceError::NotFound("Message"));
        }
        Ok(())
    }
}
