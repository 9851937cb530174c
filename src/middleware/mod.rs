mod auth;
mod guard;
mod session;

pub use auth::require_auth;
pub use guard::{decide, is_public, Route};
pub use session::{forget_token, store_token, SessionContext, ViewState, TOKEN_KEY};
