use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use tracing::{info, warn};

use super::models::{
    CompleteUploadRequest, CompleteUploadResponse, PostMessageRequest, PostMessageResponse,
    SlackError, UploadUrlResponse, UploadedFile,
};
use crate::models::ChartImage;

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Pause between consecutive image uploads to avoid flooding the channel
const UPLOAD_PAUSE: Duration = Duration::from_millis(1500);

/// Slack notifier: posts the market summary message and uploads chart
/// images to a single channel.
pub struct SlackNotifier {
    http_client: HttpClient,
    bot_token: String,
    channel_id: String,
    base_url: String,
}

impl SlackNotifier {
    const DEFAULT_BASE_URL: &'static str = "https://slack.com/api";

    pub fn new(bot_token: String, channel_id: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            bot_token,
            channel_id,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a notifier with a custom base URL (for testing)
    pub fn with_base_url(bot_token: String, channel_id: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            bot_token,
            channel_id,
            base_url,
        }
    }

    fn create_headers(&self) -> Result<HeaderMap, SlackError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.bot_token))
            .map_err(|e| SlackError::RequestError(format!("Failed to create auth header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);
        Ok(headers)
    }

    /// POST /chat.postMessage
    pub async fn send_message(&self, text: &str) -> Result<(), SlackError> {
        let url = format!("{}/chat.postMessage", self.base_url);
        let body = PostMessageRequest {
            channel: self.channel_id.clone(),
            text: text.to_string(),
            mrkdwn: true,
        };

        let response = self
            .http_client
            .post(&url)
            .headers(self.create_headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| SlackError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16() as i32;
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::HttpError(status, body));
        }

        let parsed = response
            .json::<PostMessageResponse>()
            .await
            .map_err(|e| SlackError::DeserializationError(format!("Failed to parse response: {}", e)))?;
        if !parsed.ok {
            return Err(SlackError::ApiError(
                parsed.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        info!("Message sent: ts={}", parsed.ts.as_deref().unwrap_or("-"));
        Ok(())
    }

    /// Upload one image through the external upload flow:
    /// files.getUploadURLExternal, raw POST of the bytes, then
    /// files.completeUploadExternal to share it into the channel.
    pub async fn upload_image(&self, image: &ChartImage) -> Result<(), SlackError> {
        if image.bytes.is_empty() {
            return Err(SlackError::InvalidImage("image buffer is empty".to_string()));
        }
        if image.bytes.len() < PNG_SIGNATURE.len() || image.bytes[..8] != PNG_SIGNATURE {
            return Err(SlackError::InvalidImage(format!(
                "{} is not a PNG buffer",
                image.filename
            )));
        }

        info!("Uploading {} ({} bytes)", image.filename, image.bytes.len());

        let url = format!("{}/files.getUploadURLExternal", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.bot_token)
            .query(&[
                ("filename", image.filename.as_str()),
                ("length", &image.bytes.len().to_string()),
            ])
            .send()
            .await
            .map_err(|e| SlackError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16() as i32;
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::HttpError(status, body));
        }

        let ticket = response
            .json::<UploadUrlResponse>()
            .await
            .map_err(|e| SlackError::DeserializationError(format!("Failed to parse response: {}", e)))?;
        if !ticket.ok {
            return Err(SlackError::ApiError(
                ticket.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        let upload_url = ticket
            .upload_url
            .ok_or_else(|| SlackError::ApiError("missing upload_url".to_string()))?;
        let file_id = ticket
            .file_id
            .ok_or_else(|| SlackError::ApiError("missing file_id".to_string()))?;

        let upload = self
            .http_client
            .post(&upload_url)
            .body(image.bytes.clone())
            .send()
            .await
            .map_err(|e| SlackError::RequestError(format!("Upload failed: {}", e)))?;
        if !upload.status().is_success() {
            let status = upload.status().as_u16() as i32;
            let body = upload.text().await.unwrap_or_default();
            return Err(SlackError::HttpError(status, body));
        }

        let complete_url = format!("{}/files.completeUploadExternal", self.base_url);
        let body = CompleteUploadRequest {
            files: vec![UploadedFile {
                id: file_id,
                title: image.title.clone(),
            }],
            channel_id: self.channel_id.clone(),
        };
        let response = self
            .http_client
            .post(&complete_url)
            .headers(self.create_headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| SlackError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16() as i32;
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::HttpError(status, body));
        }

        let parsed = response
            .json::<CompleteUploadResponse>()
            .await
            .map_err(|e| SlackError::DeserializationError(format!("Failed to parse response: {}", e)))?;
        if !parsed.ok {
            return Err(SlackError::ApiError(
                parsed.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        info!("Uploaded {}", image.filename);
        Ok(())
    }

    /// Send the summary text, then upload each image in sequence. A failed
    /// image posts a warning in its place and the remaining images still go
    /// out; only a failure of the text message itself aborts.
    pub async fn send_message_with_images(
        &self,
        text: &str,
        images: &[ChartImage],
    ) -> Result<(), SlackError> {
        self.send_message(text).await?;

        for image in images {
            if let Err(e) = self.upload_image(image).await {
                warn!("Failed to upload {}: {}", image.filename, e);
                let notice = format!("⚠️ 画像「{}」のアップロードに失敗しました", image.title);
                if let Err(e) = self.send_message(&notice).await {
                    warn!("Failed to post upload-failure notice: {}", e);
                }
            }
            tokio::time::sleep(UPLOAD_PAUSE).await;
        }
        Ok(())
    }

    /// Post a cycle-level failure notice to the channel.
    pub async fn send_error_message(&self, detail: &str) -> Result<(), SlackError> {
        let now = chrono::Utc::now().with_timezone(&chrono::FixedOffset::east_opt(9 * 3600).expect("valid JST offset"));
        let text = format!(
            "❌ *株価取得エラー*\n\nエラー内容: {}\n時刻: {}",
            detail,
            now.format("%Y/%m/%d %H:%M")
        );
        self.send_message(&text).await
    }
}
