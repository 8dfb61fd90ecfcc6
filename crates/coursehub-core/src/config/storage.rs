//! Blob store configuration.

use serde::{Deserialize, Serialize};

/// Top-level blob storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Provider to use: `"local"`, `"memory"` or `"s3"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Bucket (or bucket-equivalent namespace) holding every course object.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Maximum upload size in bytes (default 50 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Lifetime of issued signed URLs.
    #[serde(default = "default_signed_url_ttl")]
    pub signed_url_ttl_seconds: u64,
    /// Secret used to sign download links for the local and memory providers.
    #[serde(default = "default_signing_secret")]
    pub signing_secret: String,
    /// Serialize the replace sequence per storage path inside this process.
    #[serde(default)]
    pub serialize_path_writes: bool,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            bucket: default_bucket(),
            max_upload_size_bytes: default_max_upload(),
            signed_url_ttl_seconds: default_signed_url_ttl(),
            signing_secret: default_signing_secret(),
            serialize_path_writes: false,
            local: LocalStorageConfig::default(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path; the bucket becomes a directory below it.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// Endpoint URL (for non-AWS services like MinIO). Empty for AWS.
    #[serde(default)]
    pub endpoint: String,
    /// Region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Use path-style addressing.
    #[serde(default = "default_true")]
    pub force_path_style: bool,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            access_key: String::new(),
            secret_key: String::new(),
            force_path_style: true,
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_bucket() -> String {
    "course-materials".to_string()
}

fn default_max_upload() -> u64 {
    52_428_800 // 50 MB
}

fn default_signed_url_ttl() -> u64 {
    60
}

fn default_signing_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_local_root() -> String {
    "./data/storage".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_true() -> bool {
    true
}
