//! Cloudinary remote media backend
//!
//! Uploads go through the signed upload API:
//! `POST {api_base}/v1_1/{cloud_name}/image/upload` with a multipart body. The
//! transformation is applied by the service before storing (an "incoming"
//! transformation), so the stored asset already honours the bounding box.

use crate::traits::{MediaBackend, RemoteAsset, StorageError, StorageResult, UploadOptions};
use async_trait::async_trait;
use keepsake_core::RemoteMediaConfig;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    public_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Cloudinary implementation of [`MediaBackend`]
pub struct CloudinaryBackend {
    http_client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    api_base: String,
}

impl Debug for CloudinaryBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CloudinaryBackend")
            .field("cloud_name", &self.cloud_name)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl CloudinaryBackend {
    pub fn new(config: &RemoteMediaConfig) -> StorageResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create HTTP client for remote media backend: {}",
                    e
                ))
            })?;

        Ok(Self {
            http_client,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn upload_url(&self) -> String {
        format!("{}/v1_1/{}/image/upload", self.api_base, self.cloud_name)
    }

    /// Sign the upload parameters: sorted `key=value` pairs joined by `&`, followed by
    /// the API secret, hashed with SHA-256.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let to_sign = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl MediaBackend for CloudinaryBackend {
    async fn upload(
        &self,
        source_path: &Path,
        options: &UploadOptions,
    ) -> StorageResult<RemoteAsset> {
        let data = tokio::fs::read(source_path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to read {}: {}",
                source_path.display(),
                e
            ))
        })?;
        let size = data.len();
        let file_name = source_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let transformation = options.transform.to_transformation_string();
        let signature = self.sign(&[
            ("folder", options.folder.as_str()),
            ("timestamp", timestamp.as_str()),
            ("transformation", transformation.as_str()),
        ]);

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(data).file_name(file_name),
            )
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", options.folder.clone())
            .text("transformation", transformation)
            .text("signature", signature);

        let start = Instant::now();

        let response = self
            .http_client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                StorageError::BackendError(format!("Remote media request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            StorageError::InvalidResponse(format!("Failed to read remote media response: {}", e))
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(StorageError::BackendError(format!(
                "Remote media upload rejected: {} - {}",
                status, message
            )));
        }

        let parsed: UploadResponse = serde_json::from_str(&body).map_err(|e| {
            StorageError::InvalidResponse(format!("Failed to parse remote media response: {}", e))
        })?;

        let secure_url = parsed
            .secure_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                StorageError::InvalidResponse("Response is missing secure_url".to_string())
            })?;

        tracing::info!(
            source_path = %source_path.display(),
            folder = %options.folder,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Remote media upload successful"
        );

        Ok(RemoteAsset {
            secure_url,
            public_id: parsed.public_id,
        })
    }

    fn backend_name(&self) -> &'static str {
        "cloudinary"
    }
}
