use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Pending,
    Contacted,
    InProgress,
    Completed,
    Rejected,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::Pending,
        LeadStatus::Contacted,
        LeadStatus::InProgress,
        LeadStatus::Completed,
        LeadStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Pending => "pending",
            LeadStatus::Contacted => "contacted",
            LeadStatus::InProgress => "in_progress",
            LeadStatus::Completed => "completed",
            LeadStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown lead status: {}", s))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HunterProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// The owning hunter comes back either populated or as a bare id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum HunterRef {
    Profile(HunterProfile),
    Id(String),
}

impl HunterRef {
    pub fn id(&self) -> &str {
        match self {
            HunterRef::Profile(profile) => &profile.id,
            HunterRef::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            HunterRef::Profile(profile) => Some(&profile.name),
            HunterRef::Id(_) => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(rename = "_id")]
    pub id: String,
    pub client_name: String,
    #[serde(default)]
    pub company_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub alternate_phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub business_type: String,
    pub project_requirements: String,
    pub budget: f64,
    #[serde(default)]
    pub additional_notes: Option<String>,
    pub status: LeadStatus,
    pub commission_rate: f64,
    #[serde(default)]
    pub project_value: Option<f64>,
    #[serde(default)]
    pub commission_earned: Option<f64>,
    pub hunter: HunterRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Earned commission only counts while the lead is completed.
    pub fn earned_commission(&self) -> Option<f64> {
        match self.status {
            LeadStatus::Completed => self.commission_earned,
            _ => None,
        }
    }
}

/// Validated lead ready for `POST /leads`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    pub client_name: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub business_type: String,
    pub project_requirements: String,
    pub budget: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LeadStats {
    pub total_leads: u32,
    pub converted_leads: u32,
    pub total_earnings: f64,
}
