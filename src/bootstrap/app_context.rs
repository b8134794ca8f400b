use std::sync::Arc;

use crate::application::ports::audit_log_repository::AuditLogRepository;
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::health_check::HealthCheck;
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::message_repository::MessageRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::pending_change_repository::PendingChangeRepository;
use crate::application::ports::review_repository::ReviewRepository;
use crate::application::ports::search_repository::SearchRepository;
use crate::application::ports::specialisation_repository::SpecialisationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;
use crate::infrastructure::db::repositories::audit_log_repository_sqlx::SqlxAuditLogRepository;
use crate::infrastructure::db::repositories::firm_repository_sqlx::SqlxFirmRepository;
use crate::infrastructure::db::repositories::lawyer_repository_sqlx::SqlxLawyerRepository;
use crate::infrastructure::db::repositories::message_repository_sqlx::SqlxMessageRepository;
use crate::infrastructure::db::repositories::notification_repository_sqlx::SqlxNotificationRepository;
use crate::infrastructure::db::repositories::pending_change_repository_sqlx::SqlxPendingChangeRepository;
use crate::infrastructure::db::repositories::review_repository_sqlx::SqlxReviewRepository;
use crate::infrastructure::db::repositories::search_repository_sqlx::SqlxSearchRepository;
use crate::infrastructure::db::repositories::specialisation_repository_sqlx::SqlxSpecialisationRepository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use crate::infrastructure::db::{PgHealthCheck, PgPool};

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    lawyer_repo: Arc<dyn LawyerRepository>,
    firm_repo: Arc<dyn FirmRepository>,
    change_repo: Arc<dyn PendingChangeRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    audit_repo: Arc<dyn AuditLogRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    message_repo: Arc<dyn MessageRepository>,
    search_repo: Arc<dyn SearchRepository>,
    specialisation_repo: Arc<dyn SpecialisationRepository>,
    health: Arc<dyn HealthCheck>,
}

impl AppServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        lawyer_repo: Arc<dyn LawyerRepository>,
        firm_repo: Arc<dyn FirmRepository>,
        change_repo: Arc<dyn PendingChangeRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        audit_repo: Arc<dyn AuditLogRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        message_repo: Arc<dyn MessageRepository>,
        search_repo: Arc<dyn SearchRepository>,
        specialisation_repo: Arc<dyn SpecialisationRepository>,
        health: Arc<dyn HealthCheck>,
    ) -> Self {
        Self {
            user_repo,
            lawyer_repo,
            firm_repo,
            change_repo,
            review_repo,
            audit_repo,
            notification_repo,
            message_repo,
            search_repo,
            specialisation_repo,
            health,
        }
    }

    /// Wires every port to its Postgres adapter over one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(SqlxUserRepository::new(pool.clone())),
            Arc::new(SqlxLawyerRepository::new(pool.clone())),
            Arc::new(SqlxFirmRepository::new(pool.clone())),
            Arc::new(SqlxPendingChangeRepository::new(pool.clone())),
            Arc::new(SqlxReviewRepository::new(pool.clone())),
            Arc::new(SqlxAuditLogRepository::new(pool.clone())),
            Arc::new(SqlxNotificationRepository::new(pool.clone())),
            Arc::new(SqlxMessageRepository::new(pool.clone())),
            Arc::new(SqlxSearchRepository::new(pool.clone())),
            Arc::new(SqlxSpecialisationRepository::new(pool.clone())),
            Arc::new(PgHealthCheck::new(pool)),
        )
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn lawyer_repo(&self) -> Arc<dyn LawyerRepository> {
        self.services.lawyer_repo.clone()
    }

    pub fn firm_repo(&self) -> Arc<dyn FirmRepository> {
        self.services.firm_repo.clone()
    }

    pub fn change_repo(&self) -> Arc<dyn PendingChangeRepository> {
        self.services.change_repo.clone()
    }

    pub fn review_repo(&self) -> Arc<dyn ReviewRepository> {
        self.services.review_repo.clone()
    }

    pub fn audit_repo(&self) -> Arc<dyn AuditLogRepository> {
        self.services.audit_repo.clone()
    }

    pub fn notification_repo(&self) -> Arc<dyn NotificationRepository> {
        self.services.notification_repo.clone()
    }

    pub fn message_repo(&self) -> Arc<dyn MessageRepository> {
        self.services.message_repo.clone()
    }

    pub fn search_repo(&self) -> Arc<dyn SearchRepository> {
        self.services.search_repo.clone()
    }

    pub fn specialisation_repo(&self) -> Arc<dyn SpecialisationRepository> {
        self.services.specialisation_repo.clone()
    }

    pub fn health(&self) -> Arc<dyn HealthCheck> {
        self.services.health.clone()
    }
}

#[cfg(test)]
impl AppContext {
    /// Every port backed by the same in-memory store.
    pub fn in_memory(
        store: Arc<crate::application::testing::InMemoryStore>,
    ) -> Self {
        let services = AppServices::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
        );
        Self::new(Config::for_tests(), services)
    }
}
