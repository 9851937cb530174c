use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// Snapshot of a user as returned by the backend. Every gate transition
/// replaces the local copy wholesale with the backend's answer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub dashboard_access: bool,
    #[serde(default)]
    pub training_progress: u32,
    #[serde(default)]
    pub videos_watched: Vec<u32>,
    #[serde(default)]
    pub quiz_passed: bool,
    #[serde(default)]
    pub meeting_scheduled: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn has_watched(&self, video_id: u32) -> bool {
        self.videos_watched.contains(&video_id)
    }

    pub fn watched_count(&self) -> u32 {
        self.videos_watched.iter().collect::<BTreeSet<_>>().len() as u32
    }

    /// Progress must match the distinct watched videos, and dashboard access
    /// requires both the quiz and the meeting.
    pub fn is_consistent(&self) -> bool {
        let progress_ok = self.training_progress == self.watched_count();
        let access_ok = !self.dashboard_access || (self.quiz_passed && self.meeting_scheduled);
        progress_ok && access_ok
    }
}

#[cfg(test)]
pub(crate) fn hunter(id: &str) -> User {
    User {
        id: id.to_string(),
        name: format!("Hunter {}", id),
        email: format!("{}@example.com", id),
        phone: None,
        role: Role::User,
        dashboard_access: false,
        training_progress: 0,
        videos_watched: Vec::new(),
        quiz_passed: false,
        meeting_scheduled: false,
    }
}
