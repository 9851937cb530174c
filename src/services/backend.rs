use async_trait::async_trait;
use crate::errors::BackendResult;
use crate::leads::StatusChange;
use crate::models::{
    AuthPayload, Credentials, Lead, LeadStats, MeetingSlot, NewLead, Registration,
    TrainingUpdate, User,
};

/// The REST backend that owns users, leads and candidates. Every call that
/// needs a session takes the bearer token explicitly.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn register(&self, registration: &Registration) -> BackendResult<AuthPayload>;
    async fn login(&self, credentials: &Credentials) -> BackendResult<AuthPayload>;
    async fn me(&self, token: &str) -> BackendResult<User>;
    async fn update_training(&self, token: &str, update: &TrainingUpdate) -> BackendResult<User>;

    async fn leads(&self, token: &str) -> BackendResult<Vec<Lead>>;
    async fn create_lead(&self, token: &str, lead: &NewLead) -> BackendResult<Lead>;
    async fn lead_stats(&self, token: &str) -> BackendResult<LeadStats>;
    async fn all_leads(&self, token: &str) -> BackendResult<Vec<Lead>>;
    async fn update_lead_status(
        &self,
        token: &str,
        lead_id: &str,
        change: &StatusChange,
    ) -> BackendResult<Lead>;

    async fn candidates(&self, token: &str) -> BackendResult<Vec<User>>;
    async fn schedule_interview(&self, token: &str, candidate_id: &str, slot: &MeetingSlot) -> BackendResult<()>;
    async fn approve_candidate(&self, token: &str, candidate_id: &str) -> BackendResult<()>;
}
