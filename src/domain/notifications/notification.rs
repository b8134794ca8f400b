use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    ProfileSubmitted,
    ChangeApproved,
    ChangeRejected,
    ReviewSubmitted,
    ReviewPublished,
    ContactMessage,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::ProfileSubmitted => "PROFILE_SUBMITTED",
            NotificationKind::ChangeApproved => "CHANGE_APPROVED",
            NotificationKind::ChangeRejected => "CHANGE_REJECTED",
            NotificationKind::ReviewSubmitted => "REVIEW_SUBMITTED",
            NotificationKind::ReviewPublished => "REVIEW_PUBLISHED",
            NotificationKind::ContactMessage => "CONTACT_MESSAGE",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
