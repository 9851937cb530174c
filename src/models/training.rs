use serde::{Deserialize, Serialize};
use super::user::User;

/// Full target state sent with `PUT /auth/training`. The backend answers
/// with the authoritative user snapshot.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingUpdate {
    pub training_progress: u32,
    pub quiz_passed: bool,
    pub meeting_scheduled: bool,
    pub dashboard_access: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub video_id: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSlot {
    pub meeting_date: String,
    pub meeting_time: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}
