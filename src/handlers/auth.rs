use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Json,
};
use serde::Serialize;
use tower_sessions::Session;
use crate::errors::{AppError, AppResult, BackendError};
use crate::leads::validate_registration;
use crate::middleware::{forget_token, store_token, SessionContext, ViewState};
use crate::models::{Credentials, LoginForm, RegisterForm, User};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub user: User,
    pub view: ViewState,
}

impl SessionView {
    fn new(user: User) -> Self {
        let view = ViewState::of(Some(&user));
        Self { user, view }
    }
}

/// Landing, login and register pages all load the same client shell.
pub async fn serve_shell(State(state): State<AppState>) -> impl IntoResponse {
    let path = format!("{}/index.html", state.config.server.static_dir);
    let shell = tokio::fs::read_to_string(&path)
        .await
        .unwrap_or_else(|_| "Error loading page".to_string());
    Html(shell)
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn handle_register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterForm>,
) -> AppResult<Json<SessionView>> {
    let registration = validate_registration(&form)?;
    tracing::info!("Registration attempt for {}", registration.email);

    let payload = state.backend.register(&registration).await?;
    store_token(&session, &payload.token).await?;

    // New hunters always start locked out of the dashboard
    let mut user = payload.user;
    user.dashboard_access = false;
    Ok(Json(SessionView::new(user)))
}

pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for {}", form.email);

    let credentials = Credentials {
        email: form.email,
        password: form.password,
    };
    match state.backend.login(&credentials).await {
        Ok(payload) => {
            store_token(&session, &payload.token).await?;
            tracing::info!("Login successful for {}", payload.user.email);
            Ok(Json(SessionView::new(payload.user)).into_response())
        }
        Err(e) => {
            tracing::warn!("Login failed for {}: {}", credentials.email, e);
            forget_token(&session).await;
            // Bad credentials are an inline message, not a session expiry
            Err(match e {
                BackendError::Unauthorized => AppError::Backend(BackendError::Rejected {
                    status: 401,
                    message: "Login failed. Please check your credentials.".to_string(),
                }),
                other => other.into(),
            })
        }
    }
}

pub async fn handle_logout(session: Session) -> Response {
    forget_token(&session).await;
    Redirect::to("/").into_response()
}

pub async fn current_user(Extension(ctx): Extension<SessionContext>) -> Json<SessionView> {
    Json(SessionView::new(ctx.user))
}
