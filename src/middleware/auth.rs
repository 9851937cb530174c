use axum::{
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    extract::{Request, State},
    body::Body,
};
use tower_sessions::Session;
use tracing::debug;
use crate::errors::{AppError, AppResult, BackendError, SessionExpired};
use crate::state::AppState;
use super::guard::{decide, is_public, Route};
use super::session::{forget_token, SessionContext, ViewState, TOKEN_KEY};

async fn load_context(state: &AppState, session: &Session) -> AppResult<Option<SessionContext>> {
    let Some(token) = session.get::<String>(TOKEN_KEY).await? else {
        return Ok(None);
    };

    match state.backend.me(&token).await {
        Ok(user) => Ok(Some(SessionContext { token, user })),
        Err(BackendError::Unauthorized) => {
            Err(AppError::Auth("Session expired. Please login again.".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    if is_public(&path) {
        return next.run(req).await;
    }

    let context = match load_context(&state, &session).await {
        Ok(context) => context,
        Err(err) => {
            let response = err.into_response();
            if response.extensions().get::<SessionExpired>().is_some() {
                forget_token(&session).await;
            }
            return response;
        }
    };

    let view = ViewState::of(context.as_ref().map(|ctx| &ctx.user));
    let context = match (decide(view, &path), context) {
        (Route::Render, Some(context)) => context,
        (Route::Redirect(to), _) => {
            debug!("Guard redirected {} to {}", path, to);
            return Redirect::to(to).into_response();
        }
        (Route::Render, None) => return Redirect::to("/login").into_response(),
    };

    req.extensions_mut().insert(context);
    let response = next.run(req).await;

    if response.extensions().get::<SessionExpired>().is_some() {
        forget_token(&session).await;
    }
    response
}
