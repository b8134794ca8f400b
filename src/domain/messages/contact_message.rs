use uuid::Uuid;

use crate::domain::profiles::entity::ProfileRef;
use crate::domain::validation::{ValidationError, is_valid_email, require_fields};

#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub target: ProfileRef,
    pub sender_name: String,
    pub sender_email: String,
    pub sender_phone: Option<String>,
    pub subject: Option<String>,
    pub body: String,
}

impl NewContactMessage {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_fields(&[
            ("name", self.sender_name.as_str()),
            ("email", self.sender_email.as_str()),
            ("message", self.body.as_str()),
        ])?;
        if !is_valid_email(&self.sender_email) {
            return Err(ValidationError::new("email is not a valid address"));
        }
        if self.body.len() > 5000 {
            return Err(ValidationError::new("message is too long"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub id: Uuid,
    pub target: ProfileRef,
    pub sender_name: String,
    pub sender_email: String,
    pub sender_phone: Option<String>,
    pub subject: Option<String>,
    pub body: String,
    pub read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
