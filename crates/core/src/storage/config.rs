//! Storage configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: Cloudflare R2, Supabase, AWS S3, DigitalOcean Spaces
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// AWS region.
        region: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create S3-compatible provider (Cloudflare R2, Supabase, AWS S3).
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Base URL for public object access, e.g. a CDN domain in front of the
    /// bucket. When unset, URLs are derived from the provider itself.
    pub public_base_url: Option<String>,
}

impl StorageConfig {
    /// Create a new storage config.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            public_base_url: None,
        }
    }

    /// Set the base URL for public object access.
    #[must_use]
    pub fn with_public_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.public_base_url = Some(base_url.into());
        self
    }

    /// Build the publicly reachable URL for a stored object.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        if let Some(base) = &self.public_base_url {
            return format!("{}/{key}", base.trim_end_matches('/'));
        }
        match &self.provider {
            StorageProvider::S3 {
                endpoint, bucket, ..
            } => format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
            StorageProvider::LocalFs { root } => {
                format!("file://{}/{key}", root.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_provider_s3() {
        let provider = StorageProvider::s3(
            "https://account.r2.cloudflarestorage.com",
            "inquiry-photos",
            "access_key",
            "secret_key",
            "auto",
        );
        assert_eq!(provider.name(), "s3");
    }

    #[test]
    fn test_storage_provider_local() {
        let provider = StorageProvider::local_fs("./uploads");
        assert_eq!(provider.name(), "local");
    }

    #[test]
    fn test_public_url_from_s3_endpoint() {
        let config = StorageConfig::new(StorageProvider::s3(
            "https://account.r2.cloudflarestorage.com/",
            "inquiry-photos",
            "access_key",
            "secret_key",
            "auto",
        ));
        assert_eq!(
            config.public_url("inquiries/1/abc-garden.jpg"),
            "https://account.r2.cloudflarestorage.com/inquiry-photos/inquiries/1/abc-garden.jpg"
        );
    }

    #[test]
    fn test_public_url_prefers_base_override() {
        let config = StorageConfig::new(StorageProvider::s3(
            "https://account.r2.cloudflarestorage.com",
            "inquiry-photos",
            "access_key",
            "secret_key",
            "auto",
        ))
        .with_public_base_url("https://photos.niwaki.example/");
        assert_eq!(
            config.public_url("inquiries/1/abc-garden.jpg"),
            "https://photos.niwaki.example/inquiries/1/abc-garden.jpg"
        );
    }

    #[test]
    fn test_public_url_local_fs() {
        let config = StorageConfig::new(StorageProvider::local_fs("/tmp/uploads"));
        assert_eq!(
            config.public_url("inquiries/1/abc-garden.jpg"),
            "file:///tmp/uploads/inquiries/1/abc-garden.jpg"
        );
    }
}
