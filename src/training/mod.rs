//! Training gate: three videos watched in order, a quiz, then an interview
//! request that an admin turns into dashboard access.

mod video;
mod quiz;
mod gate;
mod flow;

pub use video::{PlayerEvent, WatchOutcome, WatchProgress, WatchRules};
pub use quiz::{BankError, QuestionBank, QuestionView, QuizScore};
pub use gate::{
    complete_video, ensure_approvable, judge_quiz, submit_completion, video_access, QuizVerdict,
    TrainingStage, VideoAccess,
};
pub use flow::{GateView, PlaybackReport, QuizReport, TrainingFlow, VideoCard};

#[cfg(test)]
pub(crate) use quiz::answers_with_correct;

use serde::Serialize;

pub const VIDEO_COUNT: u32 = 3;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingVideo {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub video_id: &'static str,
    /// Placeholder until the player reports the real duration.
    pub nominal_duration: u32,
}

pub const VIDEOS: [TrainingVideo; VIDEO_COUNT as usize] = [
    TrainingVideo {
        id: 1,
        title: "10 Steps That'll Turn You Into A Sales Machine",
        description: "Learn the essential sales techniques to become an effective client hunter.",
        video_id: "amdXa3CfzHw",
        nominal_duration: 300,
    },
    TrainingVideo {
        id: 2,
        title: "Give Me 7 Minutes and Land 3 Web Design Clients [FAST]",
        description: "Quick strategies to find and convert potential clients for web design services.",
        video_id: "OrIxvWCdkEc",
        nominal_duration: 300,
    },
    TrainingVideo {
        id: 3,
        title: "How to sell websites to local businesses (FULL BLUEPRINT)",
        description: "Complete guide on selling web services to local businesses and closing deals.",
        video_id: "14Drjuj-TGw",
        nominal_duration: 300,
    },
];

pub fn find_video(id: u32) -> Option<&'static TrainingVideo> {
    VIDEOS.iter().find(|video| video.id == id)
}
