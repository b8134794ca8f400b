use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::hash_password;
use crate::domain::users::user::Role;

pub struct EnsureAdmin<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> EnsureAdmin<'a, R> {
    /// Creates the seed admin unless the email is already registered.
    /// Returns true when a row was inserted.
    pub async fn execute(&self, email: &str, password: &str) -> anyhow::Result<bool> {
        let email = email.trim().to_lowercase();
        if let Some(existing) = self.repo.find_by_email(&email).await? {
            if existing.role != Role::Admin {
                tracing::warn!(user_id = %existing.id, "admin_seed_email_taken_by_non_admin");
            }
            return Ok(false);
        }
        let hash = hash_password(password)?;
        let user = self
            .repo
            .create_user(&email, "Administrator", &hash, Role::Admin)
            .await?;
        tracing::info!(user_id = %user.id, "admin_seeded");
        Ok(true)
    }
}
