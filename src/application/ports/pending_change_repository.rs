use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::changes::pending_change::{ChangeStatus, PendingChange, ProposedChanges};
use crate::domain::profiles::entity::ProfileRef;

#[derive(Debug, Clone)]
pub struct NewPendingChange {
    pub entity: ProfileRef,
    pub submitted_by: Uuid,
    pub changes: ProposedChanges,
}

#[async_trait]
pub trait PendingChangeRepository: Send + Sync {
    /// Stores the change, replacing the payload of the entity's outstanding
    /// PENDING change when there is one.
    async fn upsert_pending(&self, change: &NewPendingChange) -> anyhow::Result<PendingChange>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<PendingChange>>;
    async fn find_pending_for(&self, entity: ProfileRef) -> anyhow::Result<Option<PendingChange>>;
    async fn list(
        &self,
        status: Option<ChangeStatus>,
        limit: i64,
    ) -> anyhow::Result<Vec<PendingChange>>;

    /// Moves a PENDING change to `status`. Returns false if it was no longer pending.
    async fn mark_processed(
        &self,
        id: Uuid,
        status: ChangeStatus,
        reviewer_id: Uuid,
        note: Option<&str>,
    ) -> anyhow::Result<bool>;
}
