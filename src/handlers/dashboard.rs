use axum::{
    extract::State,
    Extension, Json,
};
use serde::Serialize;
use crate::errors::{AppError, AppResult};
use crate::leads::StatsView;
use crate::middleware::{SessionContext, ViewState};
use crate::models::User;
use crate::state::AppState;
use super::leads::LeadSummary;

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardView {
    Hunter {
        user: User,
        leads: Vec<LeadSummary>,
        stats: StatsView,
    },
    Admin {
        user: User,
        candidates: Vec<User>,
    },
}

pub async fn serve_dashboard(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> AppResult<Json<DashboardView>> {
    tracing::info!("Accessing dashboard for {}", ctx.user.id);

    let view = match ctx.view() {
        ViewState::Admin { .. } => {
            let candidates = state.backend.candidates(&ctx.token).await?;
            DashboardView::Admin {
                user: ctx.user,
                candidates,
            }
        }
        ViewState::Hunter { .. } => {
            let leads = state.backend.leads(&ctx.token).await?;
            let stats = state.backend.lead_stats(&ctx.token).await?;
            DashboardView::Hunter {
                user: ctx.user,
                leads: leads.into_iter().map(LeadSummary::from).collect(),
                stats: StatsView::from(stats),
            }
        }
        ViewState::Guest => return Err(AppError::Auth("Not authenticated".into())),
    };

    Ok(Json(view))
}
