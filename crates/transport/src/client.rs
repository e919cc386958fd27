//! TransportClient: the three game requests (plus a read-only state fetch)
//! against a configured base address.
//!
//! Every operation resolves to a single outcome value. There is no retry
//! logic here; the timeout covers connect, write and read of one exchange.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{ClientConfig, Endpoint, EndpointError};
use crate::core::{parser, Snapshot};
use crate::error::TransportError;
use crate::http::{self, HttpResponse, Method};
use crate::types::Direction;

pub const HEALTH_PATH: &str = "/health";
pub const START_PATH: &str = "/start";
pub const ACTION_PATH: &str = "/action";
pub const STATE_PATH: &str = "/state";

/// Longest server message carried into an error.
const MAX_ERROR_MESSAGE: usize = 200;

#[derive(Debug, Clone)]
pub struct TransportClient {
    endpoint: Arc<Endpoint>,
    timeout: Duration,
}

/// Error body sent by the server, e.g. `{"error": "Game not started"}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl TransportClient {
    pub fn new(endpoint: Endpoint, timeout: Duration) -> Self {
        Self {
            endpoint: Arc::new(endpoint),
            timeout,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, EndpointError> {
        Ok(Self::new(config.endpoint()?, config.timeout))
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET /health`. True only for a 2xx answer; every failure is `false`.
    pub async fn check_health(&self) -> bool {
        match self.request(Method::Get, HEALTH_PATH, None).await {
            Ok(resp) => {
                debug!(status = resp.status, "health check answered");
                resp.is_success()
            }
            Err(e) => {
                debug!(error = %e, "health check failed");
                false
            }
        }
    }

    /// `POST /start` with an empty body.
    pub async fn start_game(&self) -> Result<Snapshot, TransportError> {
        self.fetch_snapshot(Method::Post, START_PATH, Some(""))
            .await
    }

    /// `POST /action` with `{"direction": "<UP|DOWN|LEFT|RIGHT>"}`.
    pub async fn submit_action(&self, direction: Direction) -> Result<Snapshot, TransportError> {
        let body = serde_json::json!({ "direction": direction.as_str() }).to_string();
        self.fetch_snapshot(Method::Post, ACTION_PATH, Some(&body))
            .await
    }

    /// `GET /state`: the current snapshot without advancing the game.
    pub async fn fetch_state(&self) -> Result<Snapshot, TransportError> {
        self.fetch_snapshot(Method::Get, STATE_PATH, None).await
    }

    async fn fetch_snapshot(
        &self,
        method: Method,
        path: &'static str,
        body: Option<&str>,
    ) -> Result<Snapshot, TransportError> {
        let resp = self.request(method, path, body).await?;
        if !resp.is_success() {
            let message = error_message(&resp);
            warn!(path, status = resp.status, %message, "server rejected request");
            return Err(TransportError::Server {
                status: Some(resp.status),
                message,
            });
        }
        parser::parse(&resp.body).map_err(|e| {
            warn!(path, error = %e.cause, "undecodable snapshot");
            TransportError::from(e)
        })
    }

    async fn request(
        &self,
        method: Method,
        path: &'static str,
        body: Option<&str>,
    ) -> Result<HttpResponse, TransportError> {
        let started = Instant::now();
        let outcome =
            tokio::time::timeout(self.timeout, http::send(&self.endpoint, method, path, body)).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(resp)) => {
                debug!(method = method.as_str(), path, status = resp.status, elapsed_ms, "request done");
                Ok(resp)
            }
            Ok(Err(e)) => {
                debug!(method = method.as_str(), path, error = %e, elapsed_ms, "request failed");
                Err(e)
            }
            Err(_) => {
                debug!(method = method.as_str(), path, elapsed_ms, "request timed out");
                Err(TransportError::Timeout {
                    path,
                    timeout_ms: self.timeout.as_millis() as u64,
                })
            }
        }
    }
}

fn error_message(resp: &HttpResponse) -> String {
    let from_json = serde_json::from_str::<ErrorBody>(&resp.body)
        .ok()
        .and_then(|b| b.error.or(b.message));
    let message = match from_json {
        Some(m) => m,
        None if resp.body.trim().is_empty() => resp.reason.clone(),
        None => resp.body.trim().to_string(),
    };
    message.chars().take(MAX_ERROR_MESSAGE).collect()
}
