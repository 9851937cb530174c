mod validation;
mod status;
mod filter;
mod stats;

pub use validation::{validate_lead, validate_registration, MIN_PASSWORD_LEN};
pub use status::{commission, StatusChange};
pub use filter::{LeadFilter, StatusFilter};
pub use stats::StatsView;
