//! Signed download links for providers without native presigning.
//!
//! A link is `{base_url}/api/blobs/{path}?expires={unix}&token={sig}` where
//! `sig = base64url(sha256(secret || bucket "/" path "/" expires))`. The blob
//! route verifies the token before streaming the object.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{TimeZone, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_core::traits::SignedUrl;

/// Characters left unescaped inside a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// HMAC-less SHA-256 URL signer bound to one bucket.
#[derive(Clone)]
pub struct UrlSigner {
    secret: Vec<u8>,
    bucket: String,
    base_url: String,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner")
            .field("bucket", &self.bucket)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl UrlSigner {
    /// Create a signer. `base_url` is the externally reachable server URL.
    pub fn new(secret: &[u8], bucket: &str, base_url: &str) -> Self {
        Self {
            secret: secret.to_vec(),
            bucket: bucket.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a link for `path` valid for `ttl` from now.
    pub fn sign(&self, path: &str, ttl: Duration) -> SignedUrl {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::seconds(60));
        let expires_at = Utc::now() + ttl;
        let expires = expires_at.timestamp();
        let token = self.token(path, expires);

        let encoded_path = path
            .split('/')
            .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");

        SignedUrl {
            url: format!(
                "{}/api/blobs/{encoded_path}?expires={expires}&token={token}",
                self.base_url
            ),
            expires_at: Utc.timestamp_opt(expires, 0).single().unwrap_or(expires_at),
        }
    }

    /// Check a presented `(path, expires, token)` triple.
    ///
    /// Expired links and bad signatures are both permission errors.
    pub fn verify(&self, path: &str, expires: i64, token: &str) -> AppResult<()> {
        if Utc::now().timestamp() > expires {
            return Err(AppError::permission_denied("Download link has expired"));
        }
        let expected = self.token(path, expires);
        if expected.as_bytes().ct_eq(token.as_bytes()).into() {
            Ok(())
        } else {
            Err(AppError::permission_denied("Invalid download link signature"))
        }
    }

    fn token(&self, path: &str, expires: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update(format!("{}/{path}/{expires}", self.bucket).as_bytes());
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}
