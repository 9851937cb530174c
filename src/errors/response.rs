use axum::{
    response::{IntoResponse, Response, Redirect},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::{error, warn};
use urlencoding;
use crate::errors::{
    AppError,
    backend::BackendError,
};

/// How long the client keeps an error banner on screen.
pub const BANNER_DISMISS_MS: u64 = 5000;

/// Marker placed on responses that must drop the stored session token.
#[derive(Debug, Clone, Copy)]
pub struct SessionExpired;

// The IntoResponse implementation turns every failure into a transient banner
// message; none of them is fatal to the process.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Authentication errors drop the session and go back to login
            AppError::Auth(msg) => {
                let mut response = Redirect::to(&format!("/login?error={}", urlencoding::encode(&msg)))
                    .into_response();
                response.extensions_mut().insert(SessionExpired);
                response
            }

            AppError::Forbidden(msg) => banner(StatusCode::FORBIDDEN, msg),

            AppError::Validation(err) => banner(StatusCode::BAD_REQUEST, err.to_string()),

            AppError::Gate(err) => banner(StatusCode::CONFLICT, err.to_string()),

            AppError::Backend(err) => convert_backend_error(err),

            AppError::Path(rejection) => {
                warn!("Rejected path parameters: {}", rejection);
                banner(rejection.status(), rejection.body_text())
            }

            AppError::Redis(e) => {
                error!("Redis error: {}", e);
                banner(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update progress".to_string())
            }

            AppError::Session(e) => {
                error!("Session error: {}", e);
                banner(StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        }
    }
}

pub fn banner(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(json!({ "message": message, "dismissAfterMs": BANNER_DISMISS_MS })),
    )
        .into_response()
}

fn convert_backend_error(err: BackendError) -> Response {
    match err {
        BackendError::Rejected { status, message } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            banner(status, message)
        }

        BackendError::Network(ref e) => {
            warn!("Backend unreachable: {}", e);
            banner(StatusCode::BAD_GATEWAY, err.to_string())
        }

        BackendError::Malformed(ref detail) => {
            warn!("Malformed backend response: {}", detail);
            banner(StatusCode::BAD_GATEWAY, err.to_string())
        }

        // Converted to AppError::Auth before it gets here
        BackendError::Unauthorized => {
            let mut response = Redirect::to("/login").into_response();
            response.extensions_mut().insert(SessionExpired);
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{GateError, ValidationError};
    use axum::http::header::LOCATION;

    #[test]
    fn auth_errors_redirect_and_expire_session() {
        let response = AppError::Auth("Session expired".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "/login?error=Session%20expired"
        );
        assert!(response.extensions().get::<SessionExpired>().is_some());
    }

    #[test]
    fn backend_unauthorized_converts_to_auth() {
        let err: AppError = BackendError::Unauthorized.into();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let validation = AppError::from(ValidationError::InvalidBudget).into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let gate = AppError::from(GateError::QuizUnavailable).into_response();
        assert_eq!(gate.status(), StatusCode::CONFLICT);

        let rejected = AppError::from(BackendError::Rejected {
            status: 404,
            message: "Lead not found".to_string(),
        })
        .into_response();
        assert_eq!(rejected.status(), StatusCode::NOT_FOUND);
    }
}
