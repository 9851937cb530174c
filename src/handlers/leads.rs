use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use crate::errors::AppResult;
use crate::leads::{validate_lead, StatsView};
use crate::middleware::SessionContext;
use crate::models::{Lead, LeadForm, LeadStatus};
use crate::state::AppState;
use crate::utils::format_currency;

/// A lead row with the amounts already formatted for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSummary {
    #[serde(flatten)]
    pub lead: Lead,
    pub budget_display: String,
    pub commission_display: String,
}

impl From<Lead> for LeadSummary {
    fn from(lead: Lead) -> Self {
        let commission_display = match (lead.status, lead.earned_commission()) {
            (LeadStatus::Completed, Some(earned)) => format_currency(earned, 2),
            (LeadStatus::Rejected, _) => "N/A".to_string(),
            _ => "Pending".to_string(),
        };
        Self {
            budget_display: format_currency(lead.budget, 2),
            commission_display,
            lead,
        }
    }
}

pub async fn list_leads(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> AppResult<Json<Vec<LeadSummary>>> {
    let leads = state.backend.leads(&ctx.token).await?;
    Ok(Json(leads.into_iter().map(LeadSummary::from).collect()))
}

pub async fn create_lead(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Json(form): Json<LeadForm>,
) -> AppResult<(StatusCode, Json<LeadSummary>)> {
    // Rejected here before anything is sent to the backend
    let lead = validate_lead(&form)?;

    let created = state.backend.create_lead(&ctx.token, &lead).await?;
    tracing::info!("Hunter {} submitted lead {}", ctx.user.id, created.id);
    Ok((StatusCode::CREATED, Json(LeadSummary::from(created))))
}

pub async fn lead_stats(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> AppResult<Json<StatsView>> {
    let stats = state.backend.lead_stats(&ctx.token).await?;
    Ok(Json(StatsView::from(stats)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::sample_lead;

    #[test]
    fn commission_display_by_status() {
        let mut lead = sample_lead("l1", "h1", LeadStatus::Completed);
        lead.commission_earned = Some(8000.0);
        assert_eq!(LeadSummary::from(lead).commission_display, "₹8,000.00");

        let lead = sample_lead("l2", "h1", LeadStatus::Rejected);
        assert_eq!(LeadSummary::from(lead).commission_display, "N/A");

        let lead = sample_lead("l3", "h1", LeadStatus::InProgress);
        let summary = LeadSummary::from(lead);
        assert_eq!(summary.commission_display, "Pending");
        assert_eq!(summary.budget_display, "₹50,000.00");
    }
}
