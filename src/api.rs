use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::RideSummary;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or transport failure before a body could be read
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status on an endpoint that carries no error body
    #[error("server returned {status}")]
    Status { status: StatusCode },

    /// Response body was not the expected JSON shape
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// The server processed the request and refused it
    #[error("{message}")]
    Rejected { message: String },
}

/// The three ride actions share one request/response contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideAction {
    Book,
    Start,
    Complete,
}

impl RideAction {
    pub fn endpoint(&self) -> &'static str {
        match self {
            RideAction::Book => "/api/book_ride",
            RideAction::Start => "/api/start_ride",
            RideAction::Complete => "/api/complete_ride",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RideAction::Book => "book",
            RideAction::Start => "start",
            RideAction::Complete => "complete",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            RideAction::Book => "Ride booked successfully!",
            RideAction::Start => "Ride started successfully!",
            RideAction::Complete => "Ride completed successfully!",
        }
    }

    /// Shown when the server rejects the action without an error message.
    pub fn fallback_error(&self) -> &'static str {
        match self {
            RideAction::Book => "Failed to book ride",
            RideAction::Start => "Failed to start ride",
            RideAction::Complete => "Failed to complete ride",
        }
    }

    /// Shown when the request never produced a usable response.
    pub fn generic_error(&self) -> &'static str {
        match self {
            RideAction::Book => "An error occurred while booking the ride",
            RideAction::Start => "An error occurred while starting the ride",
            RideAction::Complete => "An error occurred while completing the ride",
        }
    }
}

#[derive(Serialize)]
struct ActionRequest {
    ride_id: i64,
}

/// Body shape shared by all three action endpoints. The server sends
/// `{"error": ...}` with a 4xx status and no `success` field, so `success`
/// defaults to false and the body is parsed regardless of HTTP status.
#[derive(Debug, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    #[allow(dead_code)]
    pub message: Option<String>,
}

impl ActionResponse {
    pub fn into_outcome(self, action: RideAction) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected {
                message: self
                    .error
                    .unwrap_or_else(|| action.fallback_error().to_string()),
            })
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder().build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the current set of available rides.
    pub async fn fetch_rides(&self) -> Result<Vec<RideSummary>, ApiError> {
        let response = self.http.get(self.url("/api/rides")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status });
        }
        response.json().await.map_err(ApiError::Decode)
    }

    /// Submit one ride action. A single attempt, no retries.
    pub async fn ride_action(&self, action: RideAction, ride_id: i64) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(action.endpoint()))
            .json(&ActionRequest { ride_id })
            .send()
            .await?;
        let body: ActionResponse = response.json().await.map_err(ApiError::Decode)?;
        body.into_outcome(action)
    }
}
