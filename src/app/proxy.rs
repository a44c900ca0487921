//! Edge-side forwarding of shuffle requests to the compute service.
//!
//! Each request moves through
//! `Received -> Validating -> {Rejected | Forwarding} -> {Succeeded |
//! UpstreamFailed | NetworkFailed}` exactly once. The terminal state is
//! carried by [`ForwardOutcome`], and [`ForwardOutcome::into_response`] is
//! the only place that decides what the client sees.

use crate::core::gate;
use crate::domain::model::{ErrorEnvelope, GroupingRequest, GroupingResult};
use crate::domain::ports::{BackendReply, ShuffleBackend};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Received,
    Validating,
    Rejected,
    Forwarding,
    Succeeded,
    UpstreamFailed,
    NetworkFailed,
}

impl RequestState {
    pub fn is_terminal(self) -> bool {
        !matches!(
            self,
            RequestState::Received | RequestState::Validating | RequestState::Forwarding
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForwardOutcome {
    /// Stopped at the edge before any backend call.
    Rejected(ErrorEnvelope),
    Succeeded(GroupingResult),
    /// Backend answered with a non-2xx status.
    UpstreamFailed { status: u16, envelope: ErrorEnvelope },
    /// Backend unreachable, timed out, or sent an unreadable success body.
    /// `reason` is for logs only.
    NetworkFailed { reason: String },
}

impl ForwardOutcome {
    pub fn state(&self) -> RequestState {
        match self {
            ForwardOutcome::Rejected(_) => RequestState::Rejected,
            ForwardOutcome::Succeeded(_) => RequestState::Succeeded,
            ForwardOutcome::UpstreamFailed { .. } => RequestState::UpstreamFailed,
            ForwardOutcome::NetworkFailed { .. } => RequestState::NetworkFailed,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ForwardOutcome::Rejected(_) => StatusCode::BAD_REQUEST,
            ForwardOutcome::Succeeded(_) => StatusCode::OK,
            ForwardOutcome::UpstreamFailed { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ForwardOutcome::NetworkFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classifies a reply that made it back from the backend.
    pub fn from_reply(reply: BackendReply) -> Self {
        if !reply.is_success() {
            return ForwardOutcome::UpstreamFailed {
                status: reply.status,
                envelope: ErrorEnvelope::from_upstream_body(&reply.body),
            };
        }

        match serde_json::from_slice::<GroupingResult>(&reply.body) {
            Ok(result) => ForwardOutcome::Succeeded(result),
            Err(e) => ForwardOutcome::NetworkFailed {
                reason: format!("unreadable backend response: {}", e),
            },
        }
    }
}

impl IntoResponse for ForwardOutcome {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ForwardOutcome::Succeeded(result) => (status, Json(result)).into_response(),
            ForwardOutcome::Rejected(envelope)
            | ForwardOutcome::UpstreamFailed { envelope, .. } => {
                (status, Json(envelope)).into_response()
            }
            ForwardOutcome::NetworkFailed { .. } => {
                (status, Json(ErrorEnvelope::network())).into_response()
            }
        }
    }
}

#[derive(Clone)]
pub struct ForwardingProxy {
    backend: Arc<dyn ShuffleBackend>,
    validate_at_edge: bool,
}

impl ForwardingProxy {
    pub fn new(backend: Arc<dyn ShuffleBackend>) -> Self {
        Self {
            backend,
            validate_at_edge: true,
        }
    }

    /// When disabled the edge is a pure relay and every body is forwarded.
    pub fn with_edge_validation(mut self, enabled: bool) -> Self {
        self.validate_at_edge = enabled;
        self
    }

    /// Decodes and validates a body without consuming it.
    pub fn precheck(body: &[u8]) -> Result<(), ErrorEnvelope> {
        let request: GroupingRequest = serde_json::from_slice(body)
            .map_err(|e| ErrorEnvelope::invalid_request(e.to_string()))?;
        gate::validate(&request)
            .map(|_| ())
            .map_err(|e| ErrorEnvelope::validation(e.to_string()))
    }

    /// Handles one client request. The body reaches the backend unmodified
    /// and is sent at most once.
    pub async fn handle(&self, body: Vec<u8>) -> ForwardOutcome {
        tracing::debug!(state = ?RequestState::Received, bytes = body.len(), "shuffle request");

        if self.validate_at_edge {
            tracing::trace!(state = ?RequestState::Validating);
            if let Err(envelope) = Self::precheck(&body) {
                tracing::info!(
                    state = ?RequestState::Rejected,
                    error = %envelope.error,
                    "rejected at edge: {}",
                    envelope.message
                );
                return ForwardOutcome::Rejected(envelope);
            }
        }

        tracing::trace!(state = ?RequestState::Forwarding);
        let outcome = match self.backend.shuffle(body).await {
            Ok(reply) => ForwardOutcome::from_reply(reply),
            Err(e) => ForwardOutcome::NetworkFailed {
                reason: e.to_string(),
            },
        };

        match &outcome {
            ForwardOutcome::Succeeded(result) => tracing::info!(
                state = ?outcome.state(),
                groups = result.groups.len(),
                "shuffle forwarded"
            ),
            ForwardOutcome::UpstreamFailed { status, envelope } => tracing::info!(
                state = ?outcome.state(),
                status,
                "backend rejected request: {}",
                envelope.message
            ),
            ForwardOutcome::NetworkFailed { reason } => tracing::error!(
                state = ?outcome.state(),
                "backend call failed: {}",
                reason
            ),
            ForwardOutcome::Rejected(_) => {}
        }

        outcome
    }
}
