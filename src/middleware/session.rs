use serde::Serialize;
use tower_sessions::Session;
use tracing::warn;
use crate::errors::{AppError, AppResult};
use crate::models::User;

pub const TOKEN_KEY: &str = "auth_token";

/// What the visitor may see, decided from the session user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewState {
    Guest,
    Hunter { dashboard_access: bool },
    Admin { dashboard_access: bool },
}

impl ViewState {
    pub fn of(user: Option<&User>) -> Self {
        match user {
            None => ViewState::Guest,
            Some(user) if user.is_admin() => ViewState::Admin {
                dashboard_access: user.dashboard_access,
            },
            Some(user) => ViewState::Hunter {
                dashboard_access: user.dashboard_access,
            },
        }
    }
}

/// The signed-in session, loaded once per request by the auth middleware
/// and handed to handlers as an extension.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub token: String,
    pub user: User,
}

impl SessionContext {
    pub fn view(&self) -> ViewState {
        ViewState::of(Some(&self.user))
    }

    pub fn require_admin(&self) -> AppResult<()> {
        match self.view() {
            ViewState::Admin { .. } => Ok(()),
            _ => Err(AppError::Forbidden("Admin access required".to_string())),
        }
    }
}

pub async fn store_token(session: &Session, token: &str) -> AppResult<()> {
    session.insert(TOKEN_KEY, token.to_string()).await?;
    Ok(())
}

pub async fn forget_token(session: &Session) {
    if let Err(e) = session.remove::<String>(TOKEN_KEY).await {
        warn!("Session removal error: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{hunter, Role};

    #[test]
    fn view_state_by_role_and_access() {
        assert_eq!(ViewState::of(None), ViewState::Guest);

        let mut user = hunter("h1");
        assert_eq!(ViewState::of(Some(&user)), ViewState::Hunter { dashboard_access: false });

        user.dashboard_access = true;
        assert_eq!(ViewState::of(Some(&user)), ViewState::Hunter { dashboard_access: true });

        user.role = Role::Admin;
        assert_eq!(ViewState::of(Some(&user)), ViewState::Admin { dashboard_access: true });

        user.dashboard_access = false;
        assert_eq!(ViewState::of(Some(&user)), ViewState::Admin { dashboard_access: false });
    }

    #[test]
    fn only_admins_pass_admin_check() {
        let ctx = SessionContext {
            token: "t".to_string(),
            user: hunter("h1"),
        };
        assert!(matches!(ctx.require_admin(), Err(AppError::Forbidden(_))));

        let mut admin = hunter("a1");
        admin.role = Role::Admin;
        let ctx = SessionContext {
            token: "t".to_string(),
            user: admin,
        };
        assert!(ctx.require_admin().is_ok());
    }
}
