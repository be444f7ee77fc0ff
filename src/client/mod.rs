//! API client with the retry-with-wake-detection interceptor.
//!
//! Every outbound call goes through [`ApiClient::execute`]. Successful
//! responses pass through unchanged. A transport-level failure (no HTTP
//! response at all) gets exactly one automatic retry, steered by a health
//! probe: an awake backend means the failure was a blip and the call is
//! replayed immediately; an unreachable one means a suspected cold start,
//! so the wake-cycle machinery is signalled and the replay waits a fixed
//! delay. HTTP 401 is terminal: the session is wiped and never retried.

mod dispatch;
mod error;
mod request;
pub mod types;


pub use dispatch::{ApiResponse, Dispatch, HttpDispatcher, TransportError};
pub use error::ApiError;
pub use request::ApiRequest;

use crate::config::ApiConfig;
use crate::probe::{HealthProbe, ProbeOutcome};
use crate::session::SessionStore;
use crate::status::BackendStatusMonitor;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use types::{
    CompanyProfile, LoginResponse, PurchaseOrder, ResetPasswordRequest, User, UserPayload,
};

/// REST client for the purchase-order backend.
pub struct ApiClient {
    dispatcher: Arc<dyn Dispatch>,
    probe: Arc<HealthProbe>,
    monitor: Arc<BackendStatusMonitor>,
    session: Arc<SessionStore>,
    retry_delay: Duration,
}

impl ApiClient {
    /// Production client over HTTP.
    pub fn new(
        config: &ApiConfig,
        retry_delay: Duration,
        session: Arc<SessionStore>,
        probe: Arc<HealthProbe>,
        monitor: Arc<BackendStatusMonitor>,
    ) -> Self {
        let dispatcher = Arc::new(HttpDispatcher::new(
            &config.base_url,
            config.timeout(),
            session.clone(),
        ));
        Self::with_dispatcher(dispatcher, retry_delay, session, probe, monitor)
    }

    /// Client with a custom dispatcher (for testing).
    pub fn with_dispatcher(
        dispatcher: Arc<dyn Dispatch>,
        retry_delay: Duration,
        session: Arc<SessionStore>,
        probe: Arc<HealthProbe>,
        monitor: Arc<BackendStatusMonitor>,
    ) -> Self {
        Self {
            dispatcher,
            probe,
            monitor,
            session,
            retry_delay,
        }
    }

    /// Send a request through the resilience interceptor.
    ///
    /// Returns any received HTTP response as `Ok` (callers decide what a
    /// non-2xx status means), except 401, which clears the session and
    /// surfaces as [`ApiError::Unauthorized`]. Transport failures are
    /// retried at most once.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let first = match self.dispatcher.dispatch(&request).await {
            Ok(response) => return self.screen(response),
            Err(transport) => transport,
        };

        if request.is_retried() {
            return Err(first.into());
        }

        tracing::debug!(
            path = %request.path(),
            error = ?first,
            "Request failed at transport level, checking backend health"
        );
        metrics::counter!("podesk_request_retries_total").increment(1);
        let retry = request.into_retry();

        match self.probe.probe().await {
            ProbeOutcome::Awake => {
                // False alarm: the backend is up, replay right away.
                tracing::debug!(path = %retry.path(), "Backend awake, replaying request");
            }
            ProbeOutcome::Unreachable => {
                tracing::info!(
                    path = %retry.path(),
                    delay_seconds = self.retry_delay.as_secs(),
                    "Backend presumed cold-starting, delaying replay"
                );
                self.monitor.trigger_wakeup();
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        match self.dispatcher.dispatch(&retry).await {
            Ok(response) => self.screen(response),
            Err(transport) => Err(transport.into()),
        }
    }

    /// 401 is a hard auth failure, independent of the wake logic.
    fn screen(&self, response: ApiResponse) -> Result<ApiResponse, ApiError> {
        if response.status == 401 {
            self.session.expire();
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }

    fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ApiError> {
        if !response.is_success() {
            return Err(ApiError::Api {
                status: response.status,
                message: response.error_message(),
            });
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn request_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        Self::decode(response)
    }

    async fn request_ok(&self, request: ApiRequest) -> Result<(), ApiError> {
        let response = self.execute(request).await?;
        if !response.is_success() {
            return Err(ApiError::Api {
                status: response.status,
                message: response.error_message(),
            });
        }
        Ok(())
    }

    fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(value).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    /// Log in and persist the session on success.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let login: LoginResponse = self
            .request_json(ApiRequest::post("/auth/login", body))
            .await?;

        self.session.save(&login.token, &login.user);
        tracing::info!(username = %login.user.username, "Logged in");
        Ok(login)
    }

    /// Drop the persisted session.
    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("Logged out");
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        self.request_json(ApiRequest::get("/users")).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        self.request_json(ApiRequest::get(format!("/users/{id}")))
            .await
    }

    pub async fn create_user(&self, user: &UserPayload) -> Result<User, ApiError> {
        self.request_json(ApiRequest::post("/users", Self::to_json(user)?))
            .await
    }

    pub async fn update_user(&self, id: &str, user: &UserPayload) -> Result<User, ApiError> {
        self.request_json(ApiRequest::put(format!("/users/{id}"), Self::to_json(user)?))
            .await
    }

    pub async fn reset_password(
        &self,
        id: &str,
        request: &ResetPasswordRequest,
    ) -> Result<(), ApiError> {
        self.request_ok(ApiRequest::post(
            format!("/users/{id}/reset-password"),
            Self::to_json(request)?,
        ))
        .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.request_ok(ApiRequest::delete(format!("/users/{id}")))
            .await
    }

    // ------------------------------------------------------------------
    // Purchase orders
    // ------------------------------------------------------------------

    pub async fn get_orders(&self) -> Result<Vec<PurchaseOrder>, ApiError> {
        self.request_json(ApiRequest::get("/orders")).await
    }

    pub async fn get_order(&self, id: &str) -> Result<PurchaseOrder, ApiError> {
        self.request_json(ApiRequest::get(format!("/orders/{id}")))
            .await
    }

    pub async fn create_order(&self, order: &PurchaseOrder) -> Result<PurchaseOrder, ApiError> {
        self.request_json(ApiRequest::post("/orders", Self::to_json(order)?))
            .await
    }

    pub async fn update_order(
        &self,
        id: &str,
        order: &PurchaseOrder,
    ) -> Result<PurchaseOrder, ApiError> {
        self.request_json(ApiRequest::put(
            format!("/orders/{id}"),
            Self::to_json(order)?,
        ))
        .await
    }

    pub async fn delete_order(&self, id: &str) -> Result<(), ApiError> {
        self.request_ok(ApiRequest::delete(format!("/orders/{id}")))
            .await
    }

    // ------------------------------------------------------------------
    // Company profile
    // ------------------------------------------------------------------

    pub async fn get_company_profile(&self) -> Result<CompanyProfile, ApiError> {
        self.request_json(ApiRequest::get("/company")).await
    }

    pub async fn update_company_profile(
        &self,
        profile: &CompanyProfile,
    ) -> Result<CompanyProfile, ApiError> {
        self.request_json(ApiRequest::post("/company", Self::to_json(profile)?))
            .await
    }

    /// The session this client reads its token from.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// The status monitor this client signals on suspected cold starts.
    pub fn monitor(&self) -> &Arc<BackendStatusMonitor> {
        &self.monitor
    }
}
