//! Storage service implementation using Apache OpenDAL.

use opendal::{ErrorKind, Operator, services};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Storage service for inquiry photos.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
        }
    }

    /// Generate a storage key for an inquiry photo.
    ///
    /// Format: `inquiries/{inquiry_id}/{uuid}-{sanitized_filename}`. The UUID
    /// keeps repeated uploads of the same filename from colliding.
    #[must_use]
    pub fn photo_key(inquiry_id: i32, filename: &str) -> String {
        format!(
            "inquiries/{inquiry_id}/{}-{}",
            Uuid::new_v4(),
            sanitize_filename(filename)
        )
    }

    /// Write an object and return its publicly reachable URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        // Fs has no content-type metadata; only attach it where supported.
        if self.operator.info().full_capability().write_with_content_type {
            self.operator
                .write_with(key, data)
                .content_type(content_type)
                .await
                .map_err(StorageError::from)?;
        } else {
            self.operator
                .write(key, data)
                .await
                .map_err(StorageError::from)?;
        }

        Ok(self.config.public_url(key))
    }

    /// Check if an object exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        match self.operator.stat(key).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(_) => false,
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

/// Sanitize filename for storage key.
///
/// Removes or replaces characters that could cause issues in storage paths.
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("garden.jpg"), "garden.jpg");
        assert_eq!(sanitize_filename("my photo (1).jpg"), "my_photo__1_.jpg");
        assert_eq!(sanitize_filename("test@#$%.png"), "test____.png");
        assert_eq!(sanitize_filename("庭の写真.jpg"), "____.jpg");
    }

    #[test]
    fn test_photo_key_format() {
        let key = StorageService::photo_key(7, "garden.jpg");

        assert!(key.starts_with("inquiries/7/"));
        assert!(key.ends_with("-garden.jpg"));

        let parts: Vec<&str> = key.split('/').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "inquiries");
        assert_eq!(parts[1], "7");
    }

    #[test]
    fn test_photo_key_unique_per_call() {
        let first = StorageService::photo_key(1, "garden.jpg");
        let second = StorageService::photo_key(1, "garden.jpg");
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_put_and_exists() {
        let dir = tempfile::tempdir().expect("should create tempdir");
        let config = StorageConfig::new(StorageProvider::local_fs(dir.path()));
        let service = StorageService::from_config(config).expect("should create service");

        let key = StorageService::photo_key(1, "garden.jpg");
        let url = service
            .put(&key, b"jpeg bytes".to_vec(), "image/jpeg")
            .await
            .expect("should write object");

        assert!(url.ends_with(&key));
        assert!(service.exists(&key).await);
        assert!(!service.exists("inquiries/1/missing.jpg").await);
    }

    #[tokio::test]
    async fn test_put_uses_public_base_url() {
        let dir = tempfile::tempdir().expect("should create tempdir");
        let config = StorageConfig::new(StorageProvider::local_fs(dir.path()))
            .with_public_base_url("https://photos.niwaki.example");
        let service = StorageService::from_config(config).expect("should create service");

        let url = service
            .put("inquiries/1/abc-garden.jpg", b"bytes".to_vec(), "image/jpeg")
            .await
            .expect("should write object");

        assert_eq!(
            url,
            "https://photos.niwaki.example/inquiries/1/abc-garden.jpg"
        );
    }

    #[test]
    fn test_provider_name() {
        let config = StorageConfig::new(StorageProvider::local_fs("./uploads"));
        let service = StorageService::from_config(config).expect("should create service");
        assert_eq!(service.provider_name(), "local");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Sanitized filenames only contain safe characters.
    proptest! {
        #[test]
        fn prop_sanitized_filename_safe_chars(filename in ".*") {
            let sanitized = sanitize_filename(&filename);

            for c in sanitized.chars() {
                let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
                prop_assert!(is_safe, "Unexpected character in sanitized filename: {}", c);
            }
        }
    }

    // Every stored photo key matches inquiries/{inquiry_id}/{uuid}-{filename}.
    proptest! {
        #[test]
        fn prop_photo_key_format(
            inquiry_id in 1i32..100_000,
            filename in ".*",
        ) {
            let key = StorageService::photo_key(inquiry_id, &filename);

            let parts: Vec<&str> = key.split('/').collect();
            prop_assert_eq!(parts.len(), 3);
            prop_assert_eq!(parts[0], "inquiries");
            prop_assert_eq!(parts[1], inquiry_id.to_string());

            // {uuid}-{sanitized}: hyphenated UUID is 36 chars, then the separator
            prop_assert!(parts[2].len() >= 37);
            prop_assert!(parts[2].ends_with(&sanitize_filename(&filename)));
        }
    }

    // Photo keys never collide for repeated uploads of the same file.
    proptest! {
        #[test]
        fn prop_photo_key_unique(filename in "[a-zA-Z0-9_-]{1,50}\\.[a-z]{2,4}") {
            let first = StorageService::photo_key(1, &filename);
            let second = StorageService::photo_key(1, &filename);
            prop_assert_ne!(first, second);
        }
    }
}
