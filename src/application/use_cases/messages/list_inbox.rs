use crate::application::access::{self, Action, Actor, Resource};
use crate::application::error::ServiceResult;
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::message_repository::MessageRepository;
use crate::application::services::profiles::owned_profiles;
use crate::domain::messages::contact_message::ContactMessage;

pub struct ListInbox<'a, M, L, F>
where
    M: MessageRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
{
    pub messages: &'a M,
    pub lawyers: &'a L,
    pub firms: &'a F,
}

impl<'a, M, L, F> ListInbox<'a, M, L, F>
where
    M: MessageRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Actor) -> ServiceResult<Vec<ContactMessage>> {
        let (user_id, _) = access::require_user(actor, Resource::ContactMessage, Action::Read)?;
        let targets = owned_profiles(self.lawyers, self.firms, user_id).await?;
        if targets.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.messages.list_for_targets(&targets).await?)
    }
}
