mod user;
mod forms;
mod lead;
mod training;

pub use user::{Role, User};
pub use forms::{
    Credentials, LeadFilterQuery, LeadForm, LoginForm, QuizSubmission, RegisterForm,
    Registration, ScheduleForm, StatusUpdateForm,
};
pub use lead::{HunterProfile, HunterRef, Lead, LeadStats, LeadStatus, NewLead};
pub use training::{AuthPayload, MeetingSlot, TrainingUpdate};

#[cfg(test)]
pub(crate) use user::hunter;
