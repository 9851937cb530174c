use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension, Json,
};
use serde::Serialize;
use crate::errors::{AppResult, GateError};
use crate::middleware::SessionContext;
use crate::models::{QuizSubmission, User};
use crate::state::AppState;
use crate::training::{
    find_video, video_access, GateView, PlaybackReport, PlayerEvent, QuestionView, QuizReport,
    TrainingFlow, TrainingVideo, VideoAccess,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    pub id: u32,
    #[serde(flatten)]
    pub access: VideoAccess,
    pub video: Option<TrainingVideo>,
    pub completed: bool,
}

pub async fn serve_gate(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> AppResult<Json<GateView>> {
    let view = TrainingFlow::from_state(&state).view(&ctx).await?;
    Ok(Json(view))
}

/// A locked video is a normal answer telling the client which video to finish first.
pub async fn video_status(
    Extension(ctx): Extension<SessionContext>,
    video_id: Result<Path<u32>, PathRejection>,
) -> AppResult<Json<VideoStatus>> {
    let Path(video_id) = video_id?;
    let access = video_access(&ctx.user, video_id)?;
    let video = match access {
        VideoAccess::Available => Some(*find_video(video_id).ok_or(GateError::UnknownVideo(video_id))?),
        VideoAccess::Locked { .. } => None,
    };

    Ok(Json(VideoStatus {
        id: video_id,
        access,
        video,
        completed: ctx.user.has_watched(video_id),
    }))
}

pub async fn player_event(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    video_id: Result<Path<u32>, PathRejection>,
    Json(event): Json<PlayerEvent>,
) -> AppResult<Json<PlaybackReport>> {
    let Path(video_id) = video_id?;
    let report = TrainingFlow::from_state(&state)
        .record_event(&ctx, video_id, event)
        .await?;
    Ok(Json(report))
}

pub async fn quiz_questions(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> AppResult<Json<serde_json::Value>> {
    let flow = TrainingFlow::from_state(&state);
    let questions: Vec<QuestionView<'_>> = flow.questions(&ctx)?;
    Ok(Json(serde_json::json!({
        "questions": questions,
        "passMark": state.config.training.pass_mark,
    })))
}

pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Json(submission): Json<QuizSubmission>,
) -> AppResult<Json<QuizReport>> {
    let report = TrainingFlow::from_state(&state)
        .submit_quiz(&ctx, &submission)
        .await?;
    Ok(Json(report))
}

pub async fn complete_training(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> AppResult<Json<User>> {
    let user = TrainingFlow::from_state(&state).submit_completion(&ctx).await?;
    Ok(Json(user))
}
