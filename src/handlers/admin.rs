use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Serialize;
use crate::errors::{AppResult, GateError};
use crate::leads::{LeadFilter, StatusChange};
use crate::middleware::SessionContext;
use crate::models::{LeadFilterQuery, MeetingSlot, ScheduleForm, StatusUpdateForm, User};
use crate::state::AppState;
use crate::training::ensure_approvable;
use super::leads::LeadSummary;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdated {
    pub lead: LeadSummary,
    pub message: String,
}

pub async fn admin_leads(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Query(query): Query<LeadFilterQuery>,
) -> AppResult<Json<Vec<LeadSummary>>> {
    ctx.require_admin()?;
    let filter = LeadFilter::from_query(&query)?;

    let leads = state.backend.all_leads(&ctx.token).await?;
    Ok(Json(filter.apply(leads).into_iter().map(LeadSummary::from).collect()))
}

pub async fn update_lead_status(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Path(lead_id): Path<String>,
    Json(form): Json<StatusUpdateForm>,
) -> AppResult<Json<StatusUpdated>> {
    ctx.require_admin()?;
    let change = StatusChange::from_form(&form)?;

    let lead = state
        .backend
        .update_lead_status(&ctx.token, &lead_id, &change)
        .await?;

    if let Some(expected) = change.commission_at(lead.commission_rate) {
        if lead.commission_earned != Some(expected) {
            tracing::warn!(
                "Lead {} commission {:?} differs from expected {}",
                lead.id, lead.commission_earned, expected
            );
        }
    }
    tracing::info!("Admin {} moved lead {} to {}", ctx.user.id, lead.id, change.status());

    Ok(Json(StatusUpdated {
        message: format!("Lead status updated to {}", change.status()),
        lead: LeadSummary::from(lead),
    }))
}

pub async fn list_candidates(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> AppResult<Json<Vec<User>>> {
    ctx.require_admin()?;
    Ok(Json(state.backend.candidates(&ctx.token).await?))
}

pub async fn schedule_candidate(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Path(candidate_id): Path<String>,
    Json(form): Json<ScheduleForm>,
) -> AppResult<Json<serde_json::Value>> {
    ctx.require_admin()?;
    let slot = MeetingSlot {
        meeting_date: form.meeting_date,
        meeting_time: form.meeting_time,
    };

    state
        .backend
        .schedule_interview(&ctx.token, &candidate_id, &slot)
        .await?;
    tracing::info!("Interview with {} scheduled for {} {}", candidate_id, slot.meeting_date, slot.meeting_time);

    Ok(Json(serde_json::json!({
        "message": format!(
            "Meeting scheduled with candidate for {} at {}",
            slot.meeting_date, slot.meeting_time
        ),
    })))
}

pub async fn approve_candidate(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Path(candidate_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    ctx.require_admin()?;

    let candidates = state.backend.candidates(&ctx.token).await?;
    let candidate = candidates
        .iter()
        .find(|c| c.id == candidate_id)
        .ok_or_else(|| GateError::CandidateNotFound(candidate_id.clone()))?;
    ensure_approvable(candidate)?;

    state.backend.approve_candidate(&ctx.token, &candidate_id).await?;
    tracing::info!("Admin {} approved candidate {}", ctx.user.id, candidate_id);

    Ok(Json(serde_json::json!({ "message": "Candidate approved successfully!" })))
}
