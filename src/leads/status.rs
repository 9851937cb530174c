use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::errors::ValidationError;
use crate::models::{Lead, LeadStatus, StatusUpdateForm};

/// An admin-chosen status transition. Any status may follow any other;
/// only `completed` carries extra data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    status: LeadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_value: Option<f64>,
}

pub fn commission(project_value: f64, commission_rate: f64) -> f64 {
    project_value * commission_rate
}

impl StatusChange {
    pub fn new(status: LeadStatus, project_value: Option<f64>) -> Result<Self, ValidationError> {
        let project_value = match status {
            LeadStatus::Completed => match project_value {
                Some(value) if value.is_finite() && value > 0.0 => Some(value),
                _ => return Err(ValidationError::InvalidProjectValue),
            },
            _ => None,
        };

        Ok(Self { status, project_value })
    }

    pub fn from_form(form: &StatusUpdateForm) -> Result<Self, ValidationError> {
        Self::new(form.status, form.project_value)
    }

    pub fn status(&self) -> LeadStatus {
        self.status
    }

    pub fn project_value(&self) -> Option<f64> {
        self.project_value
    }

    /// Commission the hunter will earn if this change is applied.
    pub fn commission_at(&self, commission_rate: f64) -> Option<f64> {
        self.project_value.map(|value| commission(value, commission_rate))
    }

    pub fn apply_to(&self, lead: &mut Lead, now: DateTime<Utc>) {
        lead.status = self.status;
        if let Some(value) = self.project_value {
            lead.project_value = Some(value);
            lead.commission_earned = Some(commission(value, lead.commission_rate));
        }
        lead.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::sample_lead;

    #[test]
    fn completing_requires_positive_value() {
        for value in [None, Some(0.0), Some(-10.0), Some(f64::NAN)] {
            assert_eq!(
                StatusChange::new(LeadStatus::Completed, value),
                Err(ValidationError::InvalidProjectValue)
            );
        }
    }

    #[test]
    fn other_statuses_drop_project_value() {
        let change = StatusChange::new(LeadStatus::InProgress, Some(1000.0)).unwrap();
        assert_eq!(change.project_value(), None);
        assert_eq!(
            serde_json::to_value(change).unwrap(),
            serde_json::json!({ "status": "in_progress" })
        );
    }

    #[test]
    fn completion_freezes_commission() {
        for value in [1.0, 80000.0, 123456.78] {
            let mut lead = sample_lead("l1", "h1", LeadStatus::Contacted);
            lead.commission_rate = 0.15;
            let change = StatusChange::new(LeadStatus::Completed, Some(value)).unwrap();
            change.apply_to(&mut lead, Utc::now());

            assert_eq!(lead.status, LeadStatus::Completed);
            assert_eq!(lead.project_value, Some(value));
            assert_eq!(lead.commission_earned, Some(value * 0.15));
            assert_eq!(lead.earned_commission(), Some(value * 0.15));
        }
    }

    #[test]
    fn any_status_can_follow_any_other() {
        let mut lead = sample_lead("l1", "h1", LeadStatus::Pending);
        for status in [LeadStatus::Rejected, LeadStatus::Pending, LeadStatus::InProgress, LeadStatus::Contacted] {
            StatusChange::new(status, None).unwrap().apply_to(&mut lead, Utc::now());
            assert_eq!(lead.status, status);
        }
    }

    #[test]
    fn leaving_completed_hides_commission() {
        let mut lead = sample_lead("l1", "h1", LeadStatus::Pending);
        StatusChange::new(LeadStatus::Completed, Some(50000.0))
            .unwrap()
            .apply_to(&mut lead, Utc::now());
        assert!(lead.earned_commission().is_some());

        StatusChange::new(LeadStatus::Rejected, None)
            .unwrap()
            .apply_to(&mut lead, Utc::now());
        assert_eq!(lead.earned_commission(), None);
    }

    #[test]
    fn preview_matches_applied_commission() {
        let change = StatusChange::new(LeadStatus::Completed, Some(90000.0)).unwrap();
        assert_eq!(change.commission_at(0.1), Some(commission(90000.0, 0.1)));
        assert_eq!(StatusChange::new(LeadStatus::Pending, None).unwrap().commission_at(0.1), None);
    }
}
