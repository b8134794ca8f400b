//! In-memory implementations of every port, shared by use-case tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::application::access::Actor;
use crate::application::ports::audit_log_repository::AuditLogRepository;
use crate::application::ports::firm_repository::FirmRepository;
use crate::application::ports::health_check::HealthCheck;
use crate::application::ports::lawyer_repository::LawyerRepository;
use crate::application::ports::message_repository::MessageRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::pending_change_repository::{
    NewPendingChange, PendingChangeRepository,
};
use crate::application::ports::review_repository::{NewReview, ReviewRepository};
use crate::application::ports::search_repository::SearchRepository;
use crate::application::ports::slug_lookup::SlugLookup;
use crate::application::ports::specialisation_repository::SpecialisationRepository;
use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::domain::audit::audit_log::{AuditLog, NewAuditLog};
use crate::domain::changes::pending_change::{ChangeStatus, PendingChange};
use crate::domain::messages::contact_message::{ContactMessage, NewContactMessage};
use crate::domain::notifications::notification::{NewNotification, Notification};
use crate::domain::profiles::collections::{CollectionDelta, Stored};
use crate::domain::profiles::entity::{EntityType, ProfileRef, ProfileStatus};
use crate::domain::profiles::firm::{
    FirmCollections, FirmCollectionsDelta, FirmDetails, LawFirm, StoredFirmCollections,
};
use crate::domain::profiles::lawyer::{
    Lawyer, LawyerCollections, LawyerCollectionsDelta, LawyerDetails, StoredLawyerCollections,
};
use crate::domain::profiles::specialisation::Specialisation;
use crate::domain::reviews::review::{RatingSummary, Review, ReviewResponse, ReviewStatus};
use crate::domain::search::directory::{DirectoryHit, SearchCriteria};
use crate::domain::users::user::Role;

struct LawyerEntry {
    lawyer: Lawyer,
    stored: StoredLawyerCollections,
}

struct FirmEntry {
    firm: LawFirm,
    stored: StoredFirmCollections,
}

#[derive(Default)]
struct State {
    users: Vec<UserRow>,
    lawyers: Vec<LawyerEntry>,
    firms: Vec<FirmEntry>,
    changes: Vec<PendingChange>,
    reviews: Vec<Review>,
    audit: Vec<AuditLog>,
    notifications: Vec<Notification>,
    messages: Vec<ContactMessage>,
    specialisations: Vec<Specialisation>,
}

/// One store backing all ports, so a test can pass `&store` everywhere.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    fail_notifications: bool,
}

fn apply_delta<T: Clone>(rows: &mut Vec<Stored<T>>, delta: &CollectionDelta<T>) {
    rows.retain(|r| !delta.delete.contains(&r.id));
    for updated in &delta.update {
        if let Some(row) = rows.iter_mut().find(|r| r.id == updated.id) {
            row.item = updated.item.clone();
        }
    }
    for item in &delta.insert {
        rows.push(Stored {
            id: Uuid::new_v4(),
            item: item.clone(),
        });
    }
}

impl LawyerEntry {
    fn snapshot(&self) -> Lawyer {
        Lawyer {
            collections: self.stored.clone().into_plain(),
            ..self.lawyer.clone()
        }
    }
}

impl FirmEntry {
    fn snapshot(&self) -> LawFirm {
        LawFirm {
            collections: self.stored.clone().into_plain(),
            ..self.firm.clone()
        }
    }
}

impl State {
    fn rating(&self, target: ProfileRef) -> RatingSummary {
        let approved: Vec<f64> = self
            .reviews
            .iter()
            .filter(|r| r.target == target && r.status == ReviewStatus::Approved)
            .map(|r| r.overall_rating)
            .collect();
        if approved.is_empty() {
            return RatingSummary::default();
        }
        RatingSummary {
            average: approved.iter().sum::<f64>() / approved.len() as f64,
            count: approved.len() as i64,
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose notification inserts always fail.
    pub fn failing_notifications() -> Self {
        Self {
            fail_notifications: true,
            ..Self::default()
        }
    }

    pub fn add_user(&self, role: Role, name: &str) -> Actor {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().users.push(UserRow {
            id,
            email: format!("{id}@example.test"),
            name: name.into(),
            role,
            password_hash: None,
        });
        Actor::User { id, role }
    }

    pub fn add_specialisation(&self, name: &str, slug: &str) {
        self.state
            .lock()
            .unwrap()
            .specialisations
            .push(Specialisation {
                id: Uuid::new_v4(),
                name: name.into(),
                slug: slug.into(),
            });
    }

    /// Inserts a lawyer row directly, bypassing the approval workflow.
    pub fn seed_lawyer(
        &self,
        owner: Uuid,
        slug: &str,
        details: LawyerDetails,
        collections: LawyerCollections,
        status: ProfileStatus,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let delta = StoredLawyerCollections::default().diff(&collections);
        let mut entry = LawyerEntry {
            lawyer: Lawyer {
                id,
                user_id: owner,
                slug: slug.into(),
                status,
                details,
                collections: LawyerCollections::default(),
                created_at: now,
                updated_at: now,
            },
            stored: StoredLawyerCollections::default(),
        };
        apply_delta(&mut entry.stored.specialisations, &delta.specialisations);
        apply_delta(&mut entry.stored.languages, &delta.languages);
        apply_delta(&mut entry.stored.certifications, &delta.certifications);
        apply_delta(&mut entry.stored.court_appearances, &delta.court_appearances);
        self.state.lock().unwrap().lawyers.push(entry);
        id
    }

    pub fn seed_firm(
        &self,
        owner: Uuid,
        slug: &str,
        details: FirmDetails,
        status: ProfileStatus,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.state.lock().unwrap().firms.push(FirmEntry {
            firm: LawFirm {
                id,
                owner_id: owner,
                slug: slug.into(),
                status,
                details,
                collections: FirmCollections::default(),
                created_at: now,
                updated_at: now,
            },
            stored: StoredFirmCollections::default(),
        });
        id
    }

    pub fn firm(&self, id: Uuid) -> Option<LawFirm> {
        let state = self.state.lock().unwrap();
        state
            .firms
            .iter()
            .find(|e| e.firm.id == id)
            .map(FirmEntry::snapshot)
    }

    pub fn lawyer(&self, id: Uuid) -> Option<Lawyer> {
        let state = self.state.lock().unwrap();
        state
            .lawyers
            .iter()
            .find(|e| e.lawyer.id == id)
            .map(LawyerEntry::snapshot)
    }

    pub fn lawyer_count(&self) -> usize {
        self.state.lock().unwrap().lawyers.len()
    }

    pub fn firm_count(&self) -> usize {
        self.state.lock().unwrap().firms.len()
    }

    pub fn change_list(&self) -> Vec<PendingChange> {
        self.state.lock().unwrap().changes.clone()
    }

    pub fn audit_actions(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.audit.iter().map(|a| a.action.clone()).collect()
    }

    pub fn notifications_for(&self, user_id: Uuid) -> Vec<Notification> {
        let state = self.state.lock().unwrap();
        state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn set_review_status(&self, id: Uuid, status: ReviewStatus) {
        let mut state = self.state.lock().unwrap();
        if let Some(r) = state.reviews.iter_mut().find(|r| r.id == id) {
            r.status = status;
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
        role: Role,
    ) -> anyhow::Result<UserRow> {
        let mut state = self.state.lock().unwrap();
        anyhow::ensure!(
            !state.users.iter().any(|u| u.email == email),
            "duplicate email"
        );
        let row = UserRow {
            id: Uuid::new_v4(),
            email: email.into(),
            name: name.into(),
            role,
            password_hash: Some(password_hash.into()),
        };
        state.users.push(row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_by_role(&self, role: Role) -> anyhow::Result<Vec<UserRow>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }
}

// Stricter than Postgres: lawyer and firm slugs share one namespace here.
#[async_trait]
impl SlugLookup for InMemoryStore {
    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> anyhow::Result<bool> {
        let state = self.state.lock().unwrap();
        let lawyer = state
            .lawyers
            .iter()
            .any(|e| e.lawyer.slug == slug && Some(e.lawyer.id) != exclude);
        let firm = state
            .firms
            .iter()
            .any(|e| e.firm.slug == slug && Some(e.firm.id) != exclude);
        Ok(lawyer || firm)
    }
}

#[async_trait]
impl LawyerRepository for InMemoryStore {
    async fn insert_draft(
        &self,
        user_id: Uuid,
        slug: &str,
        details: &LawyerDetails,
    ) -> anyhow::Result<Lawyer> {
        let id = self.seed_lawyer(
            user_id,
            slug,
            details.clone(),
            LawyerCollections::default(),
            ProfileStatus::Draft,
        );
        self.lawyer(id)
            .ok_or_else(|| anyhow::anyhow!("lawyer vanished"))
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Lawyer>> {
        Ok(self.lawyer(id))
    }

    async fn find_by_owner(&self, user_id: Uuid) -> anyhow::Result<Option<Lawyer>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .lawyers
            .iter()
            .find(|e| e.lawyer.user_id == user_id)
            .map(LawyerEntry::snapshot))
    }

    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Lawyer>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .lawyers
            .iter()
            .find(|e| e.lawyer.slug == slug)
            .map(LawyerEntry::snapshot))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        slug: &str,
        details: &LawyerDetails,
        status: ProfileStatus,
    ) -> anyhow::Result<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(entry) = state.lawyers.iter_mut().find(|e| e.lawyer.id == id) else {
            return Ok(false);
        };
        entry.lawyer.slug = slug.into();
        entry.lawyer.details = details.clone();
        entry.lawyer.status = status;
        entry.lawyer.updated_at = Utc::now();
        Ok(true)
    }

    async fn stored_collections(&self, id: Uuid) -> anyhow::Result<StoredLawyerCollections> {
        let state = self.state.lock().unwrap();
        Ok(state
            .lawyers
            .iter()
            .find(|e| e.lawyer.id == id)
            .map(|e| e.stored.clone())
            .unwrap_or_default())
    }

    async fn apply_collections(
        &self,
        id: Uuid,
        delta: &LawyerCollectionsDelta,
    ) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        let entry = state
            .lawyers
            .iter_mut()
            .find(|e| e.lawyer.id == id)
            .ok_or_else(|| anyhow::anyhow!("lawyer not found"))?;
        apply_delta(&mut entry.stored.specialisations, &delta.specialisations);
        apply_delta(&mut entry.stored.languages, &delta.languages);
        apply_delta(&mut entry.stored.certifications, &delta.certifications);
        apply_delta(&mut entry.stored.court_appearances, &delta.court_appearances);
        Ok(())
    }

    async fn list_published_for_firm(&self, firm_id: Uuid) -> anyhow::Result<Vec<Lawyer>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .lawyers
            .iter()
            .filter(|e| e.lawyer.is_published() && e.lawyer.details.firm_id == Some(firm_id))
            .map(LawyerEntry::snapshot)
            .collect())
    }
}

#[async_trait]
impl FirmRepository for InMemoryStore {
    async fn insert_draft(
        &self,
        owner_id: Uuid,
        slug: &str,
        details: &FirmDetails,
    ) -> anyhow::Result<LawFirm> {
        let id = self.seed_firm(owner_id, slug, details.clone(), ProfileStatus::Draft);
        FirmRepository::get(self, id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("firm vanished"))
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<LawFirm>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .firms
            .iter()
            .find(|e| e.firm.id == id)
            .map(FirmEntry::snapshot))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Option<LawFirm>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .firms
            .iter()
            .find(|e| e.firm.owner_id == owner_id)
            .map(FirmEntry::snapshot))
    }

    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<LawFirm>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .firms
            .iter()
            .find(|e| e.firm.slug == slug)
            .map(FirmEntry::snapshot))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        slug: &str,
        details: &FirmDetails,
        status: ProfileStatus,
    ) -> anyhow::Result<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(entry) = state.firms.iter_mut().find(|e| e.firm.id == id) else {
            return Ok(false);
        };
        entry.firm.slug = slug.into();
        entry.firm.details = details.clone();
        entry.firm.status = status;
        entry.firm.updated_at = Utc::now();
        Ok(true)
    }

    async fn stored_collections(&self, id: Uuid) -> anyhow::Result<StoredFirmCollections> {
        let state = self.state.lock().unwrap();
        Ok(state
            .firms
            .iter()
            .find(|e| e.firm.id == id)
            .map(|e| e.stored.clone())
            .unwrap_or_default())
    }

    async fn apply_collections(
        &self,
        id: Uuid,
        delta: &FirmCollectionsDelta,
    ) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        let entry = state
            .firms
            .iter_mut()
            .find(|e| e.firm.id == id)
            .ok_or_else(|| anyhow::anyhow!("firm not found"))?;
        apply_delta(&mut entry.stored.locations, &delta.locations);
        apply_delta(&mut entry.stored.practice_areas, &delta.practice_areas);
        apply_delta(&mut entry.stored.languages, &delta.languages);
        apply_delta(&mut entry.stored.court_appearances, &delta.court_appearances);
        Ok(())
    }
}

#[async_trait]
impl PendingChangeRepository for InMemoryStore {
    async fn upsert_pending(&self, change: &NewPendingChange) -> anyhow::Result<PendingChange> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .changes
            .iter_mut()
            .find(|c| c.entity == change.entity && c.is_pending())
        {
            existing.changes = change.changes.clone();
            existing.submitted_by = change.submitted_by;
            return Ok(existing.clone());
        }
        let row = PendingChange {
            id: Uuid::new_v4(),
            entity: change.entity,
            submitted_by: change.submitted_by,
            changes: change.changes.clone(),
            status: ChangeStatus::Pending,
            reviewed_by: None,
            review_note: None,
            created_at: Utc::now(),
            reviewed_at: None,
        };
        state.changes.push(row.clone());
        Ok(row)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<PendingChange>> {
        let state = self.state.lock().unwrap();
        Ok(state.changes.iter().find(|c| c.id == id).cloned())
    }

    async fn find_pending_for(&self, entity: ProfileRef) -> anyhow::Result<Option<PendingChange>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .changes
            .iter()
            .find(|c| c.entity == entity && c.is_pending())
            .cloned())
    }

    async fn list(
        &self,
        status: Option<ChangeStatus>,
        limit: i64,
    ) -> anyhow::Result<Vec<PendingChange>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .changes
            .iter()
            .rev()
            .filter(|c| status.is_none_or(|s| c.status == s))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn mark_processed(
        &self,
        id: Uuid,
        status: ChangeStatus,
        reviewer_id: Uuid,
        note: Option<&str>,
    ) -> anyhow::Result<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(change) = state
            .changes
            .iter_mut()
            .find(|c| c.id == id && c.is_pending())
        else {
            return Ok(false);
        };
        change.status = status;
        change.reviewed_by = Some(reviewer_id);
        change.review_note = note.map(str::to_string);
        change.reviewed_at = Some(Utc::now());
        Ok(true)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn create(&self, review: &NewReview) -> anyhow::Result<Review> {
        let now = Utc::now();
        let row = Review {
            id: Uuid::new_v4(),
            target: review.target,
            author_id: review.author_id,
            author_name: review.author_name.clone(),
            title: review.title.clone(),
            content: review.content.clone(),
            ratings: review.ratings,
            overall_rating: review.overall_rating,
            status: ReviewStatus::Pending,
            moderation_note: None,
            response: None,
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().reviews.push(row.clone());
        Ok(row)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Review>> {
        let state = self.state.lock().unwrap();
        Ok(state.reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn exists_for_author(
        &self,
        target: ProfileRef,
        author_id: Uuid,
    ) -> anyhow::Result<bool> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reviews
            .iter()
            .any(|r| r.target == target && r.author_id == author_id))
    }

    async fn list_for_target(
        &self,
        target: ProfileRef,
        status: Option<ReviewStatus>,
    ) -> anyhow::Result<Vec<Review>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reviews
            .iter()
            .filter(|r| r.target == target && status.is_none_or(|s| r.status == s))
            .cloned()
            .collect())
    }

    async fn list_by_status(
        &self,
        status: Option<ReviewStatus>,
        limit: i64,
    ) -> anyhow::Result<Vec<Review>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reviews
            .iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
        note: Option<&str>,
    ) -> anyhow::Result<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(review) = state.reviews.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        review.status = status;
        review.moderation_note = note.map(str::to_string);
        review.updated_at = Utc::now();
        Ok(true)
    }

    async fn set_response(&self, id: Uuid, content: &str) -> anyhow::Result<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(review) = state
            .reviews
            .iter_mut()
            .find(|r| r.id == id && r.response.is_none())
        else {
            return Ok(false);
        };
        review.response = Some(ReviewResponse {
            content: content.into(),
            responded_at: Utc::now(),
        });
        Ok(true)
    }

    async fn rating_summary(&self, target: ProfileRef) -> anyhow::Result<RatingSummary> {
        Ok(self.state.lock().unwrap().rating(target))
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryStore {
    async fn record(&self, entry: &NewAuditLog) -> anyhow::Result<()> {
        self.state.lock().unwrap().audit.push(AuditLog {
            id: Uuid::new_v4(),
            actor_id: entry.actor_id,
            action: entry.action.as_str().into(),
            entity_type: entry.subject.as_str().into(),
            entity_id: entry.entity_id,
            details: entry.details.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<AuditLog>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .audit
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn create(&self, user_id: Uuid, notification: &NewNotification) -> anyhow::Result<()> {
        anyhow::ensure!(!self.fail_notifications, "notification store offline");
        self.state.lock().unwrap().notifications.push(Notification {
            id: Uuid::new_v4(),
            user_id,
            kind: notification.kind.as_str().into(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            link: notification.link.clone(),
            read: false,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
        limit: i64,
    ) -> anyhow::Result<Vec<Notification>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.read))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(n) = state
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        else {
            return Ok(false);
        };
        n.read = true;
        Ok(true)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> anyhow::Result<u64> {
        let mut state = self.state.lock().unwrap();
        let mut changed = 0;
        for n in state
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.read)
        {
            n.read = true;
            changed += 1;
        }
        Ok(changed)
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn create(&self, message: &NewContactMessage) -> anyhow::Result<ContactMessage> {
        let row = ContactMessage {
            id: Uuid::new_v4(),
            target: message.target,
            sender_name: message.sender_name.clone(),
            sender_email: message.sender_email.clone(),
            sender_phone: message.sender_phone.clone(),
            subject: message.subject.clone(),
            body: message.body.clone(),
            read: false,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().messages.push(row.clone());
        Ok(row)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<ContactMessage>> {
        let state = self.state.lock().unwrap();
        Ok(state.messages.iter().find(|m| m.id == id).cloned())
    }

    async fn list_for_targets(
        &self,
        targets: &[ProfileRef],
    ) -> anyhow::Result<Vec<ContactMessage>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .messages
            .iter()
            .filter(|m| targets.contains(&m.target))
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(m) = state.messages.iter_mut().find(|m| m.id == id) else {
            return Ok(false);
        };
        m.read = true;
        Ok(true)
    }
}

#[async_trait]
impl SearchRepository for InMemoryStore {
    async fn search_lawyers(&self, criteria: &SearchCriteria) -> anyhow::Result<Vec<DirectoryHit>> {
        let state = self.state.lock().unwrap();
        let query = criteria.query.as_deref().map(str::to_lowercase);
        let hits = state
            .lawyers
            .iter()
            .filter(|e| e.lawyer.is_published())
            .map(LawyerEntry::snapshot)
            .filter(|l| {
                query
                    .as_deref()
                    .is_none_or(|q| l.display_name().to_lowercase().contains(q))
            })
            .filter(|l| {
                criteria
                    .state
                    .as_deref()
                    .is_none_or(|s| l.details.state.as_deref() == Some(s))
            })
            .filter(|l| {
                criteria.areas.is_empty()
                    || l.collections
                        .specialisations
                        .iter()
                        .any(|s| criteria.areas.contains(&s.to_lowercase()))
            })
            .map(|l| {
                let rating = state.rating(ProfileRef::Lawyer(l.id));
                DirectoryHit {
                    kind: EntityType::Lawyer,
                    id: l.id,
                    name: l.display_name(),
                    slug: l.slug,
                    city: l.details.city,
                    state: l.details.state,
                    specialisations: l.collections.specialisations,
                    rating: rating.average,
                    review_count: rating.count,
                    years_experience: l.details.years_experience,
                    image_url: l.details.photo_url,
                }
            })
            .collect();
        Ok(hits)
    }

    async fn search_firms(&self, criteria: &SearchCriteria) -> anyhow::Result<Vec<DirectoryHit>> {
        let state = self.state.lock().unwrap();
        let query = criteria.query.as_deref().map(str::to_lowercase);
        let hits = state
            .firms
            .iter()
            .filter(|e| e.firm.is_published())
            .map(FirmEntry::snapshot)
            .filter(|f| {
                query
                    .as_deref()
                    .is_none_or(|q| f.details.name.to_lowercase().contains(q))
            })
            .map(|f| {
                let rating = state.rating(ProfileRef::Firm(f.id));
                let primary = f.collections.primary_location().cloned();
                DirectoryHit {
                    kind: EntityType::Firm,
                    id: f.id,
                    slug: f.slug,
                    name: f.details.name,
                    city: primary.as_ref().map(|l| l.city.clone()),
                    state: primary.map(|l| l.state),
                    specialisations: f.collections.practice_areas,
                    rating: rating.average,
                    review_count: rating.count,
                    years_experience: None,
                    image_url: f.details.logo_url,
                }
            })
            .collect();
        Ok(hits)
    }
}

#[async_trait]
impl SpecialisationRepository for InMemoryStore {
    async fn list_all(&self) -> anyhow::Result<Vec<Specialisation>> {
        let state = self.state.lock().unwrap();
        let mut out = state.specialisations.clone();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }
}

#[async_trait]
impl HealthCheck for InMemoryStore {
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
