use crate::application::access::{self, Action, Actor, Resource};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::message_repository::MessageRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::services::notify::notify_user;
use crate::application::services::profiles::resolve_published;
use crate::domain::messages::contact_message::{ContactMessage, NewContactMessage};
use crate::domain::notifications::notification::{NewNotification, NotificationKind};
use crate::domain::validation::clean_optional;

pub struct SendMessage<'a, M, L, F, N>
where
    M: MessageRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    pub messages: &'a M,
    pub lawyers: &'a L,
    pub firms: &'a F,
    pub notifications: &'a N,
}

impl<'a, M, L, F, N> SendMessage<'a, M, L, F, N>
where
    M: MessageRepository + ?Sized,
    L: LawyerRepository + ?Sized,
    F: FirmRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        input: NewContactMessage,
    ) -> ServiceResult<ContactMessage> {
        access::require(actor, Resource::ContactMessage, Action::Create)?;
        input.validate()?;
        let input = NewContactMessage {
            sender_name: input.sender_name.trim().to_string(),
            sender_email: input.sender_email.trim().to_string(),
            sender_phone: clean_optional(input.sender_phone),
            subject: clean_optional(input.subject),
            body: input.body.trim().to_string(),
            ..input
        };

        let target = resolve_published(self.lawyers, self.firms, input.target)
            .await?
            .ok_or(ServiceError::NotFound("Profile"))?;
        let message = self.messages.create(&input).await?;

        notify_user(
            self.notifications,
            target.owner_id,
            NewNotification {
                kind: NotificationKind::ContactMessage,
                title: format!("New message from {}", message.sender_name),
                message: message
                    .subject
                    .clone()
                    .unwrap_or_else(|| "You have a new contact request.".into()),
                link: Some("/dashboard/messages".into()),
            },
        )
        .await;
        tracing::info!(message_id = %message.id, target_id = %message.target.id(), "contact_message_sent");
        Ok(message)
    }
}
