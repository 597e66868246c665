//! Slack Web API request/response models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct PostMessageRequest {
    pub channel: String,
    pub text: String,
    pub mrkdwn: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    pub ok: bool,
    pub ts: Option<String>,
    pub error: Option<String>,
}

/// Response from files.getUploadURLExternal
#[derive(Debug, Clone, Deserialize)]
pub struct UploadUrlResponse {
    pub ok: bool,
    pub upload_url: Option<String>,
    pub file_id: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteUploadRequest {
    pub files: Vec<UploadedFile>,
    pub channel_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadedFile {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompleteUploadResponse {
    pub ok: bool,
    pub error: Option<String>,
}

/// Errors from the notification sink.
#[derive(Debug, Clone)]
pub enum SlackError {
    /// Slack answered ok=false
    ApiError(String),
    /// Non-success HTTP status
    HttpError(i32, String),
    /// Network/request failure
    RequestError(String),
    /// Body did not parse as the expected shape
    DeserializationError(String),
    /// Image buffer empty or not a PNG
    InvalidImage(String),
}

impl std::fmt::Display for SlackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlackError::ApiError(msg) => write!(f, "Slack API Error: {}", msg),
            SlackError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            SlackError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            SlackError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
            SlackError::InvalidImage(msg) => write!(f, "Invalid Image: {}", msg),
        }
    }
}
