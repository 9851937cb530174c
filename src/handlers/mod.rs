mod auth;
mod training;
mod leads;
mod admin;
mod dashboard;
mod proxy;

pub use auth::{serve_shell, handle_login, handle_register, handle_logout, current_user, health};
pub use training::{serve_gate, video_status, player_event, quiz_questions, submit_quiz, complete_training};
pub use leads::{list_leads, create_lead, lead_stats, LeadSummary};
pub use admin::{admin_leads, update_lead_status, list_candidates, schedule_candidate, approve_candidate};
pub use dashboard::serve_dashboard;
pub use proxy::proxy_request;
