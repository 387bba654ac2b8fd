//! # Door Service
//!
//! HTTP receiver for signed unlock commands.
//!
//! | Route | Result |
//! |---|---|
//! | `POST /` | 200 opened, 401 not authenticated, 400 bad duration, 403 non-local origin |
//! | `GET /health` | 200 `ok` |
//!
//! Every authentication failure gets the same 401 body; the reason is only
//! logged.

use crate::controller::DoorController;
use crate::domain::config::{ConfigError, DoorServiceConfig};
use crate::domain::errors::ServiceError;
use crate::ports::outbound::Actuator;
use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use dk_03_signed_request::{
    current_timestamp, is_private, load_authorized_apps, AuthorizedApp, RequestVerifier,
    SignedRequestError, HMAC_HEADER,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info, warn};

pub const AUTH_FAILED_BODY: &str = "Authentication failed";
pub const NOT_LOCAL_BODY: &str = "Only local addresses may issue door commands.";

/// Door service state
pub struct DoorService {
    config: DoorServiceConfig,
    verifier: RequestVerifier,
    controller: DoorController,
}

impl DoorService {
    /// Create a new door service
    pub fn new(
        config: DoorServiceConfig,
        apps: Vec<AuthorizedApp>,
        actuator: Arc<dyn Actuator>,
    ) -> Result<Self, ServiceError> {
        config.validate()?;
        if apps.is_empty() {
            warn!("no authorized apps loaded; every command will be refused");
        }
        let verifier = RequestVerifier::new(apps, config.freshness_window());
        Ok(Self {
            config,
            verifier,
            controller: DoorController::new(actuator),
        })
    }

    /// Create a door service from the apps listed in `config.tokens_file`
    pub fn from_config(
        config: DoorServiceConfig,
        actuator: Arc<dyn Actuator>,
    ) -> Result<Self, ServiceError> {
        let tokens = config
            .tokens_file
            .as_deref()
            .ok_or(ConfigError::MissingTokens)?;
        let apps = load_authorized_apps(tokens)?;
        info!(apps = apps.len(), tokens = %tokens.display(), "Loaded authorized apps");
        Self::new(config, apps, actuator)
    }

    pub fn config(&self) -> &DoorServiceConfig {
        &self.config
    }

    /// Build the HTTP router
    pub fn router(&self) -> Router {
        let state = AppState {
            verifier: self.verifier.clone(),
            controller: self.controller.clone(),
            local_only: self.config.local_only,
        };

        // Body limit outside the timeout: `Timeout` needs a `Default` inner body
        let middleware = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(self.config.max_body_bytes))
            .layer(TimeoutLayer::new(self.config.request_timeout));

        Router::new()
            .route("/", post(handle_unlock))
            .route("/health", get(health_check))
            .layer(middleware)
            .with_state(state)
    }

    /// Bind the configured address and serve until the process stops
    pub async fn run(self) -> Result<(), ServiceError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServiceError::Bind { addr, source })?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServiceError> {
        let router = self.router();
        if let Ok(addr) = listener.local_addr() {
            info!(
                addr = %addr,
                local_only = self.config.local_only,
                max_open_seconds = self.config.max_open_seconds,
                apps = self.verifier.apps().len(),
                "Starting door service"
            );
        }
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(ServiceError::Serve)
    }
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    verifier: RequestVerifier,
    controller: DoorController,
    local_only: bool,
}

async fn health_check() -> &'static str {
    "ok"
}

async fn handle_unlock(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let tag = headers.get(HMAC_HEADER).and_then(|v| v.to_str().ok());
    let verified = match state.verifier.verify(&body, tag, current_timestamp()) {
        Ok(verified) => verified,
        Err(SignedRequestError::DurationOutOfRange { seconds, max }) => {
            error!(
                max_open_time = max,
                requested_time = seconds,
                "Cannot open for requested timespan"
            );
            return (
                StatusCode::BAD_REQUEST,
                format!("Can only open door for between 1 and {} seconds.", max),
            );
        }
        Err(e) => {
            warn!(error = %e, "Rejected door command");
            return (StatusCode::UNAUTHORIZED, AUTH_FAILED_BODY.to_string());
        }
    };

    let origin = peer.map(|ConnectInfo(addr)| addr.ip());
    if state.local_only && !origin.is_some_and(is_private) {
        error!(
            requesting_ip = ?origin,
            app = %verified.app,
            "Cannot serve authenticated request as origin is not local"
        );
        return (StatusCode::FORBIDDEN, NOT_LOCAL_BODY.to_string());
    }

    let seconds = verified.seconds();
    state.controller.unlock_for(Duration::from_secs(seconds));
    info!(app = %verified.app, seconds, "Opening door!");
    (
        StatusCode::OK,
        format!("Success, door opening for {} seconds", seconds),
    )
}
