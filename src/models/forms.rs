use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use super::lead::LeadStatus;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Body of `POST /auth/login` on the backend.
#[derive(Debug, Serialize, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register` on the backend.
#[derive(Debug, Serialize, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Raw lead form as typed by the hunter. Budget stays a string until
/// validation so inputs like "₹50,000" can be accepted.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadForm {
    pub client_name: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub alternate_phone: String,
    pub address: String,
    pub business_type: String,
    pub project_requirements: String,
    pub budget: String,
    pub additional_notes: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateForm {
    pub status: LeadStatus,
    #[serde(default)]
    pub project_value: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LeadFilterQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleForm {
    pub meeting_date: String,
    pub meeting_time: String,
}

/// Selected option text keyed by question id.
#[derive(Debug, Deserialize, Default)]
pub struct QuizSubmission {
    #[serde(default)]
    pub answers: HashMap<String, String>,
}
