use serde::Serialize;
use tracing::{info, warn};
use crate::config::TrainingConfig;
use crate::errors::{AppResult, GateError};
use crate::middleware::SessionContext;
use crate::models::{QuizSubmission, TrainingUpdate, User};
use crate::services::{Backend, WatchStore};
use crate::state::AppState;
use super::gate::{self, QuizVerdict, TrainingStage, VideoAccess};
use super::quiz::{QuestionBank, QuestionView, QuizScore};
use super::video::{PlayerEvent, WatchProgress, WatchRules};
use super::{TrainingVideo, VIDEOS};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCard {
    #[serde(flatten)]
    pub video: TrainingVideo,
    pub completed: bool,
    pub locked: bool,
    pub watch_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateView {
    pub stage: TrainingStage,
    pub videos: Vec<VideoCard>,
    pub quiz_available: bool,
    pub question_count: usize,
    pub pass_mark: usize,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackReport {
    pub video_id: u32,
    pub watch: WatchProgress,
    pub percent: f64,
    pub seek_to: Option<f64>,
    pub completed: bool,
    pub stage: TrainingStage,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizReport {
    pub passed: bool,
    pub score: QuizScore,
    pub message: String,
    pub stage: TrainingStage,
    pub user: User,
}

/// Runs gate transitions for one session: decide locally, persist through a
/// single training update, then take the backend's user as the new truth.
pub struct TrainingFlow<'a> {
    backend: &'a dyn Backend,
    watch_store: &'a dyn WatchStore,
    bank: &'a QuestionBank,
    config: &'a TrainingConfig,
}

impl<'a> TrainingFlow<'a> {
    pub fn new(
        backend: &'a dyn Backend,
        watch_store: &'a dyn WatchStore,
        bank: &'a QuestionBank,
        config: &'a TrainingConfig,
    ) -> Self {
        Self { backend, watch_store, bank, config }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(
            state.backend.as_ref(),
            state.watch_store.as_ref(),
            state.question_bank.as_ref(),
            &state.config.training,
        )
    }

    pub async fn view(&self, ctx: &SessionContext) -> AppResult<GateView> {
        let user = &ctx.user;
        let mut videos = Vec::with_capacity(VIDEOS.len());
        for video in VIDEOS {
            let completed = user.has_watched(video.id);
            let locked = matches!(gate::video_access(user, video.id)?, VideoAccess::Locked { .. });
            let watch_percent = if completed {
                100.0
            } else {
                self.watch_store
                    .get(&user.id, video.id)
                    .await?
                    .map(|progress| progress.percent())
                    .unwrap_or(0.0)
            };
            videos.push(VideoCard { video, completed, locked, watch_percent });
        }

        let stage = TrainingStage::of(user);
        Ok(GateView {
            stage,
            videos,
            quiz_available: stage == TrainingStage::Quiz,
            question_count: self.bank.len(),
            pass_mark: self.config.pass_mark,
            poll_interval_ms: self.config.poll_interval_secs * 1000,
        })
    }

    pub async fn record_event(
        &self,
        ctx: &SessionContext,
        video_id: u32,
        event: PlayerEvent,
    ) -> AppResult<PlaybackReport> {
        let user = &ctx.user;
        if user.dashboard_access {
            return Err(GateError::AlreadyGranted.into());
        }
        if let VideoAccess::Locked { required } = gate::video_access(user, video_id)? {
            return Err(GateError::VideoLocked { requested: video_id, required }.into());
        }

        let mut progress = self
            .watch_store
            .get(&user.id, video_id)
            .await?
            .unwrap_or_default();
        if user.has_watched(video_id) {
            progress.completed = true;
        }

        let outcome = progress.apply(event, WatchRules::from(self.config));
        self.watch_store.put(&user.id, video_id, &outcome.progress).await?;

        if let Some(position) = outcome.seek_to {
            info!("User {} skipped ahead in video {}, rewinding to {:.1}s", user.id, video_id, position);
        }

        let mut user = user.clone();
        if outcome.progress.completed && !user.has_watched(video_id) {
            if let Some(update) = gate::complete_video(&user, video_id)? {
                user = self.persist(ctx, update).await?;
                info!("User {} completed training video {}", user.id, video_id);
            }
        }

        Ok(PlaybackReport {
            video_id,
            watch: outcome.progress,
            percent: outcome.progress.percent(),
            seek_to: outcome.seek_to,
            completed: user.has_watched(video_id),
            stage: TrainingStage::of(&user),
            user,
        })
    }

    pub fn questions(&self, ctx: &SessionContext) -> AppResult<Vec<QuestionView<'a>>> {
        match TrainingStage::of(&ctx.user) {
            TrainingStage::Quiz => Ok(self.bank.views()),
            TrainingStage::Granted => Err(GateError::AlreadyGranted.into()),
            _ => Err(GateError::QuizUnavailable.into()),
        }
    }

    pub async fn submit_quiz(&self, ctx: &SessionContext, submission: &QuizSubmission) -> AppResult<QuizReport> {
        let score = self.bank.grade(&submission.answers);
        let verdict = gate::judge_quiz(&ctx.user, score, self.config.pass_mark)?;
        let user = self.persist(ctx, verdict.update()).await?;

        let message = match verdict {
            QuizVerdict::Passed(_) => {
                info!("User {} passed the quiz with {}/{}", user.id, score.correct, score.total);
                format!(
                    "Congratulations! You passed the quiz with {} out of {} correct.",
                    score.correct, score.total
                )
            }
            QuizVerdict::Failed(_) => {
                info!("User {} failed the quiz with {}/{}, training reset", user.id, score.correct, score.total);
                self.watch_store.clear(&user.id).await?;
                if !user.videos_watched.is_empty() {
                    warn!("Backend kept watched videos for {} after a quiz reset", user.id);
                }
                format!(
                    "You didn't pass the quiz. You got {} out of {} correct. Please watch all videos again and try again.",
                    score.correct, score.total
                )
            }
        };

        Ok(QuizReport {
            passed: verdict.passed(),
            score,
            message,
            stage: TrainingStage::of(&user),
            user,
        })
    }

    pub async fn submit_completion(&self, ctx: &SessionContext) -> AppResult<User> {
        let update = gate::submit_completion(&ctx.user)?;
        let user = self.persist(ctx, update).await?;
        info!("User {} submitted training completion", user.id);
        Ok(user)
    }

    async fn persist(&self, ctx: &SessionContext, update: TrainingUpdate) -> AppResult<User> {
        let user = self.backend.update_training(&ctx.token, &update).await?;
        if !user.is_consistent() {
            warn!(
                "Backend returned inconsistent training state for {}: progress {}, watched {:?}",
                user.id, user.training_progress, user.videos_watched
            );
        }
        Ok(user)
    }
}
