use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::application::use_cases::auth::hash_password;
use crate::domain::users::user::Role;
use crate::domain::validation::{is_valid_email, require_fields};

const MIN_PASSWORD_LEN: usize = 8;

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> ServiceResult<UserRow> {
        require_fields(&[
            ("email", req.email.as_str()),
            ("name", req.name.as_str()),
            ("password", req.password.as_str()),
            ("role", req.role.as_str()),
        ])?;
        let role = Role::parse(&req.role)
            .filter(Role::self_registrable)
            .ok_or_else(|| ServiceError::validation("role is not allowed"))?;
        let email = req.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(ServiceError::validation("email is not a valid address"));
        }
        if req.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict("Email is already registered".into()));
        }

        let hash = hash_password(&req.password)?;
        let user = self
            .repo
            .create_user(&email, req.name.trim(), &hash, role)
            .await?;
        tracing::info!(user_id = %user.id, role = role.as_str(), "user_registered");
        Ok(UserRow {
            password_hash: None,
            ..user
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryStore;
    use crate::application::use_cases::auth::login::{Login, LoginRequest};

    fn req(role: &str) -> RegisterRequest {
        RegisterRequest {
            email: "Jane@Example.com".into(),
            name: "Jane Doe".into(),
            password: "correct horse".into(),
            role: role.into(),
        }
    }

    #[tokio::test]
    async fn admin_cannot_self_register() {
        let store = InMemoryStore::new();
        let err = Register { repo: &store }
            .execute(&req("ADMIN"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = InMemoryStore::new();
        let uc = Register { repo: &store };
        uc.execute(&req("lawyer")).await.unwrap();
        let err = uc.execute(&req("CLIENT")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn registered_user_can_log_in() {
        let store = InMemoryStore::new();
        let user = Register { repo: &store }
            .execute(&req("FIRM_OWNER"))
            .await
            .unwrap();
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.role, Role::FirmOwner);
        assert!(user.password_hash.is_none());

        let login = Login { repo: &store };
        let ok = login
            .execute(&LoginRequest {
                email: "jane@example.com".into(),
                password: "correct horse".into(),
            })
            .await
            .unwrap();
        assert_eq!(ok.map(|u| u.id), Some(user.id));
        let bad = login
            .execute(&LoginRequest {
                email: "jane@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap();
        assert!(bad.is_none());
    }
}
