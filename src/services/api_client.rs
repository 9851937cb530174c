use async_trait::async_trait;
use axum::http::{HeaderMap, Method};
use bytes::Bytes;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use tracing::{debug, warn};
use crate::config::BackendConfig;
use crate::errors::{BackendError, BackendResult};
use crate::leads::StatusChange;
use crate::models::{
    AuthPayload, Credentials, Lead, LeadStats, MeetingSlot, NewLead, Registration,
    TrainingUpdate, User,
};
use super::Backend;

/// reqwest-backed client for the REST backend.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Deserialize)]
struct LeadEnvelope {
    lead: Lead,
}

#[derive(Deserialize)]
struct LeadsEnvelope {
    leads: Vec<Lead>,
}

#[derive(Deserialize)]
struct StatsEnvelope {
    stats: LeadStats,
}

#[derive(Deserialize)]
struct CandidatesEnvelope {
    candidates: Vec<User>,
}

impl ApiClient {
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Relays a raw request for the CORS proxy. Status codes are passed
    /// through untouched; only transport failures are errors. The portal's
    /// own session cookie never leaves this service.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        mut headers: HeaderMap,
        body: Bytes,
    ) -> Result<reqwest::Response, reqwest::Error> {
        headers.remove(axum::http::header::HOST);
        headers.remove(axum::http::header::CONTENT_LENGTH);
        headers.remove(axum::http::header::COOKIE);
        debug!("Proxying {} {}", method, path_and_query);

        self.http
            .request(method, self.url(path_and_query))
            .headers(headers)
            .body(body)
            .send()
            .await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> BackendResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized);
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            warn!("Backend rejected request with {}: {}", status, message);
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| BackendError::Malformed(e.to_string()))
    }

    async fn send_empty(&self, request: RequestBuilder) -> BackendResult<()> {
        self.send::<serde_json::Value>(request).await.map(|_| ())
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn register(&self, registration: &Registration) -> BackendResult<AuthPayload> {
        self.send(self.http.post(self.url("/auth/register")).json(registration)).await
    }

    async fn login(&self, credentials: &Credentials) -> BackendResult<AuthPayload> {
        self.send(self.http.post(self.url("/auth/login")).json(credentials)).await
    }

    async fn me(&self, token: &str) -> BackendResult<User> {
        let envelope: UserEnvelope = self
            .send(self.http.get(self.url("/auth/me")).bearer_auth(token))
            .await?;
        Ok(envelope.user)
    }

    async fn update_training(&self, token: &str, update: &TrainingUpdate) -> BackendResult<User> {
        let envelope: UserEnvelope = self
            .send(self.http.put(self.url("/auth/training")).bearer_auth(token).json(update))
            .await?;
        Ok(envelope.user)
    }

    async fn leads(&self, token: &str) -> BackendResult<Vec<Lead>> {
        let envelope: LeadsEnvelope = self
            .send(self.http.get(self.url("/leads")).bearer_auth(token))
            .await?;
        Ok(envelope.leads)
    }

    async fn create_lead(&self, token: &str, lead: &NewLead) -> BackendResult<Lead> {
        let envelope: LeadEnvelope = self
            .send(self.http.post(self.url("/leads")).bearer_auth(token).json(lead))
            .await?;
        Ok(envelope.lead)
    }

    async fn lead_stats(&self, token: &str) -> BackendResult<LeadStats> {
        let envelope: StatsEnvelope = self
            .send(self.http.get(self.url("/leads/stats")).bearer_auth(token))
            .await?;
        Ok(envelope.stats)
    }

    async fn all_leads(&self, token: &str) -> BackendResult<Vec<Lead>> {
        let envelope: LeadsEnvelope = self
            .send(self.http.get(self.url("/leads/all")).bearer_auth(token))
            .await?;
        Ok(envelope.leads)
    }

    async fn update_lead_status(
        &self,
        token: &str,
        lead_id: &str,
        change: &StatusChange,
    ) -> BackendResult<Lead> {
        let url = self.url(&format!("/leads/{}/status", urlencoding::encode(lead_id)));
        let envelope: LeadEnvelope = self
            .send(self.http.put(url).bearer_auth(token).json(change))
            .await?;
        Ok(envelope.lead)
    }

    async fn candidates(&self, token: &str) -> BackendResult<Vec<User>> {
        let envelope: CandidatesEnvelope = self
            .send(self.http.get(self.url("/auth/admin/candidates")).bearer_auth(token))
            .await?;
        Ok(envelope.candidates)
    }

    async fn schedule_interview(&self, token: &str, candidate_id: &str, slot: &MeetingSlot) -> BackendResult<()> {
        let url = self.url(&format!("/auth/admin/schedule/{}", urlencoding::encode(candidate_id)));
        self.send_empty(self.http.put(url).bearer_auth(token).json(slot)).await
    }

    async fn approve_candidate(&self, token: &str, candidate_id: &str) -> BackendResult<()> {
        let url = self.url(&format!("/auth/admin/approve/{}", urlencoding::encode(candidate_id)));
        self.send_empty(self.http.put(url).bearer_auth(token).json(&serde_json::json!({})))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadStatus;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&BackendConfig {
            api_url: format!("{}/api/", server.uri()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn user_json() -> serde_json::Value {
        json!({
            "_id": "u1", "name": "Asha", "email": "asha@example.com", "role": "user",
            "dashboardAccess": false, "trainingProgress": 1, "videosWatched": [1],
            "quizPassed": false, "meetingScheduled": false
        })
    }

    #[tokio::test]
    async fn me_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "user": user_json() })))
            .mount(&server)
            .await;

        let user = client_for(&server).me("tok-1").await.unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.videos_watched, vec![1]);
    }

    #[tokio::test]
    async fn unauthorized_is_distinguished() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })))
            .mount(&server)
            .await;

        let err = client_for(&server).me("stale").await.unwrap_err();
        assert!(matches!(err, BackendError::Unauthorized));
    }

    #[tokio::test]
    async fn rejection_carries_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid credentials" })))
            .mount(&server)
            .await;

        let credentials = Credentials {
            email: "asha@example.com".to_string(),
            password: "wrong".to_string(),
        };
        match client_for(&server).login(&credentials).await {
            Err(BackendError::Rejected { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("unexpected result: {:?}", other.map(|p| p.token)),
        }
    }

    #[tokio::test]
    async fn training_update_sends_full_target_state() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/auth/training"))
            .and(body_json(json!({
                "trainingProgress": 1,
                "quizPassed": false,
                "meetingScheduled": false,
                "dashboardAccess": false,
                "videoId": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user_json() })))
            .expect(1)
            .mount(&server)
            .await;

        let update = TrainingUpdate {
            training_progress: 1,
            quiz_passed: false,
            meeting_scheduled: false,
            dashboard_access: false,
            video_id: Some(1),
        };
        let user = client_for(&server).update_training("tok", &update).await.unwrap();
        assert_eq!(user.training_progress, 1);
    }

    #[tokio::test]
    async fn status_change_omits_project_value_unless_completed() {
        let server = MockServer::start().await;
        let lead = json!({
            "_id": "l1", "clientName": "Kiran", "email": "k@shop.in", "phone": "9876543210",
            "businessType": "Retail", "projectRequirements": "Website", "budget": 50000,
            "status": "contacted", "commissionRate": 0.1, "hunter": "h1",
            "createdAt": "2024-03-01T10:00:00Z", "updatedAt": "2024-03-02T10:00:00Z"
        });
        Mock::given(method("PUT"))
            .and(path("/api/leads/l1/status"))
            .and(body_json(json!({ "status": "contacted" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lead": lead })))
            .mount(&server)
            .await;

        let change = StatusChange::new(LeadStatus::Contacted, None).unwrap();
        let updated = client_for(&server).update_lead_status("tok", "l1", &change).await.unwrap();
        assert_eq!(updated.status, LeadStatus::Contacted);
    }

    #[tokio::test]
    async fn malformed_body_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leads/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).lead_stats("tok").await.unwrap_err();
        assert!(matches!(err, BackendError::Malformed(_)));
    }

    #[tokio::test]
    async fn forward_keeps_status_and_drops_local_headers() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/leads/l9"))
            .and(header("x-requested-with", "XMLHttpRequest"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Lead not found" })))
            .mount(&server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("host", "portal.example".parse().unwrap());
        headers.insert("cookie", "session=abc123".parse().unwrap());
        headers.insert("x-requested-with", "XMLHttpRequest".parse().unwrap());

        let response = client_for(&server)
            .forward(Method::DELETE, "/leads/l9", headers, Bytes::new())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(received[0].headers.get("cookie").is_none());
        assert_ne!(received[0].headers.get("host").unwrap(), "portal.example");
    }
}
