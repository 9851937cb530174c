//! In-memory stand-ins for the backend and the watch store.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use crate::errors::{BackendError, BackendResult};
use crate::leads::StatusChange;
use crate::models::{
    AuthPayload, Credentials, HunterProfile, HunterRef, Lead, LeadStats, LeadStatus, MeetingSlot,
    NewLead, Registration, TrainingUpdate, User,
};
use crate::training::WatchProgress;
use super::{Backend, WatchStore};

pub const COMMISSION_RATE: f64 = 0.1;

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    passwords: HashMap<String, String>,
    tokens: HashMap<String, String>,
    leads: Vec<Lead>,
}

/// Behaves like the real backend closely enough for the workflows: a
/// training update with zero progress wipes watched videos, and completing
/// a lead freezes its commission.
#[derive(Default)]
pub struct FakeBackend {
    inner: Mutex<Inner>,
    pub calls: AtomicUsize,
}

impl FakeBackend {
    pub async fn with_user(user: User, token: &str) -> Self {
        let backend = Self::default();
        backend.insert_user(user, token).await;
        backend
    }

    pub async fn insert_user(&self, user: User, token: &str) {
        let mut inner = self.inner.lock().await;
        inner.tokens.insert(token.to_string(), user.id.clone());
        inner.users.insert(user.id.clone(), user);
    }

    pub async fn user(&self, id: &str) -> Option<User> {
        self.inner.lock().await.users.get(id).cloned()
    }

    /// Makes the backend forget a token, as if it expired.
    pub async fn revoke(&self, token: &str) {
        self.inner.lock().await.tokens.remove(token);
    }

    pub async fn insert_lead(&self, lead: Lead) {
        self.inner.lock().await.leads.push(lead);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn track(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn caller(inner: &Inner, token: &str) -> BackendResult<User> {
        inner
            .tokens
            .get(token)
            .and_then(|id| inner.users.get(id))
            .cloned()
            .ok_or(BackendError::Unauthorized)
    }

    fn require_admin(inner: &Inner, token: &str) -> BackendResult<User> {
        let user = Self::caller(inner, token)?;
        if !user.is_admin() {
            return Err(BackendError::Rejected {
                status: 403,
                message: "Not authorized as admin".to_string(),
            });
        }
        Ok(user)
    }
}

pub fn sample_lead(id: &str, hunter_id: &str, status: LeadStatus) -> Lead {
    let now = Utc::now();
    Lead {
        id: id.to_string(),
        client_name: format!("Client {}", id),
        company_name: format!("Company {}", id),
        email: format!("{}@client.in", id),
        phone: "9876543210".to_string(),
        alternate_phone: None,
        address: None,
        business_type: "Retail".to_string(),
        project_requirements: "Storefront website".to_string(),
        budget: 50000.0,
        additional_notes: None,
        status,
        commission_rate: COMMISSION_RATE,
        project_value: None,
        commission_earned: None,
        hunter: HunterRef::Profile(HunterProfile {
            id: hunter_id.to_string(),
            name: format!("Hunter {}", hunter_id),
            email: format!("{}@example.com", hunter_id),
        }),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn register(&self, registration: &Registration) -> BackendResult<AuthPayload> {
        self.track();
        let mut inner = self.inner.lock().await;
        if inner.users.values().any(|u| u.email == registration.email) {
            return Err(BackendError::Rejected {
                status: 400,
                message: "User already exists".to_string(),
            });
        }
        let id = format!("u{}", inner.users.len() + 1);
        let user = User {
            id: id.clone(),
            name: registration.name.clone(),
            email: registration.email.clone(),
            phone: registration.phone.clone(),
            role: Default::default(),
            dashboard_access: false,
            training_progress: 0,
            videos_watched: Vec::new(),
            quiz_passed: false,
            meeting_scheduled: false,
        };
        let token = format!("token-{}", id);
        inner.passwords.insert(registration.email.clone(), registration.password.clone());
        inner.tokens.insert(token.clone(), id.clone());
        inner.users.insert(id, user.clone());
        Ok(AuthPayload { token, user })
    }

    async fn login(&self, credentials: &Credentials) -> BackendResult<AuthPayload> {
        self.track();
        let inner = self.inner.lock().await;
        let invalid = || BackendError::Rejected {
            status: 400,
            message: "Invalid credentials".to_string(),
        };
        if inner.passwords.get(&credentials.email) != Some(&credentials.password) {
            return Err(invalid());
        }
        let user = inner
            .users
            .values()
            .find(|u| u.email == credentials.email)
            .cloned()
            .ok_or_else(invalid)?;
        let token = inner
            .tokens
            .iter()
            .find(|(_, id)| **id == user.id)
            .map(|(token, _)| token.clone())
            .ok_or_else(invalid)?;
        Ok(AuthPayload { token, user })
    }

    async fn me(&self, token: &str) -> BackendResult<User> {
        self.track();
        let inner = self.inner.lock().await;
        Self::caller(&inner, token)
    }

    async fn update_training(&self, token: &str, update: &TrainingUpdate) -> BackendResult<User> {
        self.track();
        let mut inner = self.inner.lock().await;
        let id = Self::caller(&inner, token)?.id;
        let user = inner.users.get_mut(&id).ok_or(BackendError::Unauthorized)?;

        if update.training_progress == 0 {
            user.videos_watched.clear();
        }
        if let Some(video_id) = update.video_id {
            if !user.videos_watched.contains(&video_id) {
                user.videos_watched.push(video_id);
            }
        }
        user.training_progress = user.videos_watched.len() as u32;
        user.quiz_passed = update.quiz_passed;
        user.meeting_scheduled = update.meeting_scheduled;
        user.dashboard_access = update.dashboard_access;
        Ok(user.clone())
    }

    async fn leads(&self, token: &str) -> BackendResult<Vec<Lead>> {
        self.track();
        let inner = self.inner.lock().await;
        let user = Self::caller(&inner, token)?;
        Ok(inner.leads.iter().filter(|l| l.hunter.id() == user.id).cloned().collect())
    }

    async fn create_lead(&self, token: &str, lead: &NewLead) -> BackendResult<Lead> {
        self.track();
        let mut inner = self.inner.lock().await;
        let user = Self::caller(&inner, token)?;
        let mut created = sample_lead(&format!("l{}", inner.leads.len() + 1), &user.id, LeadStatus::Pending);
        created.client_name = lead.client_name.clone();
        created.company_name = lead.company_name.clone();
        created.email = lead.email.clone();
        created.phone = lead.phone.clone();
        created.business_type = lead.business_type.clone();
        created.project_requirements = lead.project_requirements.clone();
        created.budget = lead.budget;
        inner.leads.push(created.clone());
        Ok(created)
    }

    async fn lead_stats(&self, token: &str) -> BackendResult<LeadStats> {
        self.track();
        let inner = self.inner.lock().await;
        let user = Self::caller(&inner, token)?;
        let own: Vec<&Lead> = inner.leads.iter().filter(|l| l.hunter.id() == user.id).collect();
        Ok(LeadStats {
            total_leads: own.len() as u32,
            converted_leads: own.iter().filter(|l| l.status == LeadStatus::Completed).count() as u32,
            total_earnings: own.iter().filter_map(|l| l.earned_commission()).sum(),
        })
    }

    async fn all_leads(&self, token: &str) -> BackendResult<Vec<Lead>> {
        self.track();
        let inner = self.inner.lock().await;
        Self::require_admin(&inner, token)?;
        Ok(inner.leads.clone())
    }

    async fn update_lead_status(
        &self,
        token: &str,
        lead_id: &str,
        change: &StatusChange,
    ) -> BackendResult<Lead> {
        self.track();
        let mut inner = self.inner.lock().await;
        Self::require_admin(&inner, token)?;
        let lead = inner
            .leads
            .iter_mut()
            .find(|l| l.id == lead_id)
            .ok_or(BackendError::Rejected {
                status: 404,
                message: "Lead not found".to_string(),
            })?;
        change.apply_to(lead, Utc::now());
        Ok(lead.clone())
    }

    async fn candidates(&self, token: &str) -> BackendResult<Vec<User>> {
        self.track();
        let inner = self.inner.lock().await;
        Self::require_admin(&inner, token)?;
        Ok(inner
            .users
            .values()
            .filter(|u| !u.is_admin() && u.quiz_passed && !u.dashboard_access)
            .cloned()
            .collect())
    }

    async fn schedule_interview(&self, token: &str, candidate_id: &str, _slot: &MeetingSlot) -> BackendResult<()> {
        self.track();
        let mut inner = self.inner.lock().await;
        Self::require_admin(&inner, token)?;
        match inner.users.get_mut(candidate_id) {
            Some(user) => {
                user.meeting_scheduled = true;
                Ok(())
            }
            None => Err(BackendError::Rejected {
                status: 404,
                message: "User not found".to_string(),
            }),
        }
    }

    async fn approve_candidate(&self, token: &str, candidate_id: &str) -> BackendResult<()> {
        self.track();
        let mut inner = self.inner.lock().await;
        Self::require_admin(&inner, token)?;
        match inner.users.get_mut(candidate_id) {
            Some(user) => {
                user.dashboard_access = true;
                Ok(())
            }
            None => Err(BackendError::Rejected {
                status: 404,
                message: "User not found".to_string(),
            }),
        }
    }
}

#[derive(Default)]
pub struct MemoryWatchStore {
    entries: Mutex<HashMap<(String, u32), WatchProgress>>,
}

impl MemoryWatchStore {
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[async_trait]
impl WatchStore for MemoryWatchStore {
    async fn get(&self, user_id: &str, video_id: u32) -> Result<Option<WatchProgress>, redis::RedisError> {
        Ok(self.entries.lock().await.get(&(user_id.to_string(), video_id)).copied())
    }

    async fn put(&self, user_id: &str, video_id: u32, progress: &WatchProgress) -> Result<(), redis::RedisError> {
        self.entries
            .lock()
            .await
            .insert((user_id.to_string(), video_id), *progress);
        Ok(())
    }

    async fn clear(&self, user_id: &str) -> Result<(), redis::RedisError> {
        self.entries.lock().await.retain(|(user, _), _| user != user_id);
        Ok(())
    }
}
