pub mod approve_change;
pub mod get_change;
pub mod list_changes;
pub mod reject_change;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::pending_change_repository::PendingChangeRepository;
use crate::domain::changes::pending_change::PendingChange;
use uuid::Uuid;

/// Loads a change that is still awaiting a decision.
pub(crate) async fn load_pending<C: PendingChangeRepository + ?Sized>(
    changes: &C,
    id: Uuid,
) -> ServiceResult<PendingChange> {
    let change = changes
        .get(id)
        .await?
        .ok_or(ServiceError::NotFound("Change"))?;
    if !change.is_pending() {
        return Err(ServiceError::validation("Change has already been processed"));
    }
    Ok(change)
}
