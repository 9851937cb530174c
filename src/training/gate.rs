//! Stage rules of the training gate. These functions never talk to the
//! backend; they decide which [`TrainingUpdate`] to send and the backend's
//! answer becomes the new user snapshot.

use serde::Serialize;
use crate::errors::GateError;
use crate::models::{TrainingUpdate, User};
use super::quiz::QuizScore;
use super::VIDEO_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum TrainingStage {
    Video { current: u32 },
    Quiz,
    AwaitingApproval { meeting_scheduled: bool },
    Granted,
}

impl TrainingStage {
    pub fn of(user: &User) -> Self {
        if user.dashboard_access {
            return TrainingStage::Granted;
        }
        if user.quiz_passed {
            return TrainingStage::AwaitingApproval {
                meeting_scheduled: user.meeting_scheduled,
            };
        }
        match (1..=VIDEO_COUNT).find(|id| !user.has_watched(*id)) {
            Some(current) => TrainingStage::Video { current },
            None => TrainingStage::Quiz,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum VideoAccess {
    Available,
    /// Shown as the "complete previous video first" screen.
    Locked { required: u32 },
}

pub fn video_access(user: &User, video_id: u32) -> Result<VideoAccess, GateError> {
    if video_id == 0 {
        return Err(GateError::UnknownVideo(video_id));
    }
    if video_id > 1 && !user.has_watched(video_id - 1) {
        return Ok(VideoAccess::Locked { required: video_id - 1 });
    }
    if video_id > VIDEO_COUNT {
        return Err(GateError::UnknownVideo(video_id));
    }
    Ok(VideoAccess::Available)
}

/// `None` when the video was already recorded as watched.
pub fn complete_video(user: &User, video_id: u32) -> Result<Option<TrainingUpdate>, GateError> {
    if user.dashboard_access {
        return Err(GateError::AlreadyGranted);
    }
    if let VideoAccess::Locked { required } = video_access(user, video_id)? {
        return Err(GateError::VideoLocked {
            requested: video_id,
            required,
        });
    }
    if user.has_watched(video_id) {
        return Ok(None);
    }

    Ok(Some(TrainingUpdate {
        training_progress: user.watched_count() + 1,
        quiz_passed: false,
        meeting_scheduled: false,
        dashboard_access: false,
        video_id: Some(video_id),
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizVerdict {
    Passed(TrainingUpdate),
    /// Failing wipes every watched video and sends the hunter back to video 1.
    Failed(TrainingUpdate),
}

impl QuizVerdict {
    pub fn update(&self) -> TrainingUpdate {
        match self {
            QuizVerdict::Passed(update) | QuizVerdict::Failed(update) => *update,
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, QuizVerdict::Passed(_))
    }
}

pub fn judge_quiz(user: &User, score: QuizScore, pass_mark: usize) -> Result<QuizVerdict, GateError> {
    match TrainingStage::of(user) {
        TrainingStage::Quiz => {}
        TrainingStage::Granted => return Err(GateError::AlreadyGranted),
        _ => return Err(GateError::QuizUnavailable),
    }

    if score.passes(pass_mark) {
        Ok(QuizVerdict::Passed(TrainingUpdate {
            training_progress: VIDEO_COUNT,
            quiz_passed: true,
            meeting_scheduled: false,
            dashboard_access: false,
            video_id: None,
        }))
    } else {
        Ok(QuizVerdict::Failed(TrainingUpdate {
            training_progress: 0,
            quiz_passed: false,
            meeting_scheduled: false,
            dashboard_access: false,
            video_id: None,
        }))
    }
}

/// Requests the interview. Access itself is granted later by an admin.
pub fn submit_completion(user: &User) -> Result<TrainingUpdate, GateError> {
    match TrainingStage::of(user) {
        TrainingStage::AwaitingApproval { meeting_scheduled: false } => Ok(TrainingUpdate {
            training_progress: VIDEO_COUNT,
            quiz_passed: true,
            meeting_scheduled: true,
            dashboard_access: false,
            video_id: None,
        }),
        TrainingStage::AwaitingApproval { meeting_scheduled: true } => Err(GateError::AlreadySubmitted),
        TrainingStage::Granted => Err(GateError::AlreadyGranted),
        TrainingStage::Video { .. } | TrainingStage::Quiz => Err(GateError::QuizNotPassed),
    }
}

/// An admin may only grant access to someone who passed and requested the interview.
pub fn ensure_approvable(candidate: &User) -> Result<(), GateError> {
    match TrainingStage::of(candidate) {
        TrainingStage::AwaitingApproval { meeting_scheduled: true } => Ok(()),
        TrainingStage::Granted => Err(GateError::AlreadyGranted),
        _ => Err(GateError::CandidateNotReady(candidate.id.clone())),
    }
}
