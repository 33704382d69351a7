use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ImageHostConfig;

/// 画像ホスト（imgbb 互換 API）クライアント
#[derive(Clone)]
pub struct ImageHostClient {
    client: Client,
    url: String,
    api_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("image host rejected upload: {status}")]
    Rejected { status: reqwest::StatusCode },

    #[error("image host error: {0}")]
    Internal(String),
}

/// アップロード済み画像の URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostedImage {
    pub photo_url: String,
    pub thumbnail_url: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: UploadData,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: String,
    thumb: Thumb,
}

#[derive(Debug, Deserialize)]
struct Thumb {
    url: String,
}

impl From<UploadResponse> for HostedImage {
    fn from(response: UploadResponse) -> Self {
        Self {
            photo_url: response.data.url,
            thumbnail_url: response.data.thumb.url,
        }
    }
}

impl ImageHostClient {
    pub fn new(config: &ImageHostConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// 画像を base64 でアップロードし、表示用 URL とサムネイル URL を返す。
    ///
    /// 再試行は行わない。
    pub async fn upload(&self, image: &[u8]) -> Result<HostedImage, HostError> {
        let encoded = STANDARD.encode(image);

        let response = self
            .client
            .post(&self.url)
            .form(&[("key", self.api_key.as_str()), ("image", encoded.as_str())])
            .send()
            .await
            .map_err(|e| HostError::Internal(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, "unexpected response from image host");
            return Err(HostError::Rejected { status });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| HostError::Internal(format!("invalid response body: {e}")))?;

        Ok(body.into())
    }
}
