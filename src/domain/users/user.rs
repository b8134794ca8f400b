use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Lawyer,
    FirmOwner,
    LawyerFirmOwner,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Lawyer => "LAWYER",
            Role::FirmOwner => "FIRM_OWNER",
            Role::LawyerFirmOwner => "LAWYER_FIRM_OWNER",
            Role::Client => "CLIENT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "LAWYER" => Some(Role::Lawyer),
            "FIRM_OWNER" => Some(Role::FirmOwner),
            "LAWYER_FIRM_OWNER" => Some(Role::LawyerFirmOwner),
            "CLIENT" => Some(Role::Client),
            _ => None,
        }
    }

    /// Admin accounts are only created by the startup seed.
    pub fn self_registrable(&self) -> bool {
        !matches!(self, Role::Admin)
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}
