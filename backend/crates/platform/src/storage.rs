//! Object Storage Client
//!
//! Document uploads go to a Supabase-style storage REST API. Objects are
//! addressed as `{bucket}/{path}`; uploads upsert so re-submitting the
//! same document path overwrites the previous object.

use serde::Deserialize;
use thiserror::Error;

/// Storage service configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base URL of the storage service, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// Service-role key (server-side only)
    pub service_key: String,
    /// Target bucket
    pub bucket: String,
}

/// Result of a successful upload
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Bucket-relative object path
    pub path: String,
    /// Short-lived signed URL for immediate client access
    pub signed_url: Option<String>,
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("storage service rejected the request (status {status})")]
    Service { status: u16 },
}

/// Trait for object storage backends
#[trait_variant::make(ObjectStore: Send)]
pub trait LocalObjectStore {
    /// Upload `bytes` to `path`, returning the stored path and a signed URL.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;

    /// Create a signed URL for an existing object.
    async fn signed_url(
        &self,
        path: &str,
        expires_in_secs: u64,
    ) -> Result<Option<String>, StorageError>;
}

#[derive(Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

/// Supabase storage REST implementation
#[derive(Clone)]
pub struct SupabaseStorage {
    client: reqwest::Client,
    config: StorageConfig,
}

impl SupabaseStorage {
    /// Signed URLs handed back from uploads expire after an hour.
    const UPLOAD_SIGNED_URL_TTL_SECS: u64 = 3600;

    pub fn new(config: StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url, self.config.bucket, path
        )
    }

    fn sign_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/sign/{}/{}",
            self.config.base_url, self.config.bucket, path
        )
    }
}

impl ObjectStore for SupabaseStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let response = self
            .client
            .post(self.object_url(path))
            .bearer_auth(&self.config.service_key)
            .header("content-type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(status = status, path = %path, "storage upload failed");
            return Err(StorageError::Service { status });
        }

        // Qualified: `self.signed_url` would be ambiguous between the
        // generated trait and its Local variant.
        let signed_url =
            ObjectStore::signed_url(self, path, Self::UPLOAD_SIGNED_URL_TTL_SECS).await?;

        Ok(StoredObject {
            path: path.to_string(),
            signed_url,
        })
    }

    async fn signed_url(
        &self,
        path: &str,
        expires_in_secs: u64,
    ) -> Result<Option<String>, StorageError> {
        let response = self
            .client
            .post(self.sign_url(path))
            .bearer_auth(&self.config.service_key)
            .json(&serde_json::json!({ "expiresIn": expires_in_secs }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(status = status, path = %path, "storage sign failed");
            return Err(StorageError::Service { status });
        }

        let signed: SignResponse = response.json().await?;
        Ok(Some(format!(
            "{}/storage/v1{}",
            self.config.base_url, signed.signed_url
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_storage() -> SupabaseStorage {
        SupabaseStorage::new(StorageConfig {
            base_url: "https://xyz.supabase.co".to_string(),
            service_key: "service-key".to_string(),
            bucket: "documents".to_string(),
        })
    }

    #[test]
    fn test_object_url_shape() {
        let storage = test_storage();
        assert_eq!(
            storage.object_url("u1/application/hsc/file.pdf"),
            "https://xyz.supabase.co/storage/v1/object/documents/u1/application/hsc/file.pdf"
        );
    }

    #[test]
    fn test_sign_url_shape() {
        let storage = test_storage();
        assert_eq!(
            storage.sign_url("u1/account/sslc/file.pdf"),
            "https://xyz.supabase.co/storage/v1/object/sign/documents/u1/account/sslc/file.pdf"
        );
    }
}
