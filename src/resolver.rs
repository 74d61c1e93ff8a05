//! Remote release resolution
//!
//! The core treats "find the latest published version and its download
//! URL" as an opaque provider behind the `RemoteResolver` trait. Page
//! scraping, browser automation, or an API call are interchangeable
//! behind it; the bundled `FeedResolver` consumes a small JSON release
//! feed so the core never depends on any page structure.

use crate::client::HttpClient;
use crate::domain::{DriverVersion, RemoteRelease};
use crate::error::ResolveError;
use async_trait::async_trait;
use serde::Deserialize;

/// Default release feed URL
pub const DEFAULT_FEED_URL: &str = "https://download.nvidia.com/drivers/latest.json";

/// Trait for remote release resolvers
///
/// Implementations must be safe to call at most once per update cycle;
/// no caching is required.
#[async_trait]
pub trait RemoteResolver: Send + Sync {
    /// Human-readable provider name, used in error messages
    fn provider_name(&self) -> &'static str;

    /// Resolve the latest published release
    async fn resolve_latest(&self) -> Result<RemoteRelease, ResolveError>;
}

/// JSON release feed document
#[derive(Debug, Deserialize)]
struct ReleaseFeed {
    /// Dotted version string, e.g. "560.35.03"
    version: String,
    /// Absolute HTTPS URL of the installer
    download_url: String,
}

/// Resolver consuming a JSON release feed
pub struct FeedResolver {
    client: HttpClient,
    feed_url: String,
}

impl FeedResolver {
    /// Create a resolver for the given feed URL
    pub fn new(client: HttpClient, feed_url: impl Into<String>) -> Self {
        Self {
            client,
            feed_url: feed_url.into(),
        }
    }

    /// Validate and convert a feed document into a release
    fn release_from_feed(&self, feed: ReleaseFeed) -> Result<RemoteRelease, ResolveError> {
        let version =
            DriverVersion::parse(&feed.version).map_err(|source| ResolveError::InvalidVersion {
                text: feed.version.clone(),
                source,
            })?;

        if !feed.download_url.starts_with("https://") {
            return Err(ResolveError::InsecureUrl {
                url: feed.download_url,
            });
        }

        Ok(RemoteRelease::new(version, feed.download_url))
    }
}

#[async_trait]
impl RemoteResolver for FeedResolver {
    fn provider_name(&self) -> &'static str {
        "release feed"
    }

    async fn resolve_latest(&self) -> Result<RemoteRelease, ResolveError> {
        let response = self.client.get(&self.feed_url).await.map_err(|e| {
            if e.is_timeout() {
                ResolveError::timeout(self.provider_name())
            } else {
                ResolveError::failed(self.provider_name(), e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::failed(
                self.provider_name(),
                format!("HTTP {}", status),
            ));
        }

        let feed: ReleaseFeed = response
            .json()
            .await
            .map_err(|e| ResolveError::invalid_response(self.provider_name(), e.to_string()))?;

        self.release_from_feed(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> FeedResolver {
        FeedResolver::new(HttpClient::new().unwrap(), DEFAULT_FEED_URL)
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(resolver().provider_name(), "release feed");
    }

    #[test]
    fn test_release_from_well_formed_feed() {
        let feed: ReleaseFeed = serde_json::from_str(
            r#"{"version": "560.10", "download_url": "https://download.example.com/560.10.exe"}"#,
        )
        .unwrap();

        let release = resolver().release_from_feed(feed).unwrap();
        assert_eq!(release.version, DriverVersion::parse("560.10").unwrap());
        assert_eq!(
            release.download_url,
            "https://download.example.com/560.10.exe"
        );
    }

    #[test]
    fn test_release_feed_rejects_bad_version() {
        let feed = ReleaseFeed {
            version: "560.x".to_string(),
            download_url: "https://download.example.com/560.exe".to_string(),
        };
        let err = resolver().release_from_feed(feed).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidVersion { .. }));
    }

    #[test]
    fn test_release_feed_rejects_insecure_url() {
        let feed = ReleaseFeed {
            version: "560.10".to_string(),
            download_url: "http://download.example.com/560.exe".to_string(),
        };
        let err = resolver().release_from_feed(feed).unwrap_err();
        assert!(matches!(err, ResolveError::InsecureUrl { .. }));
    }

    #[test]
    fn test_malformed_feed_document_fails_to_decode() {
        let result = serde_json::from_str::<ReleaseFeed>(r#"{"version": 560.10}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_feed_is_resolution_failure() {
        // Port 9 (discard) refuses connections on any sane test host
        let resolver = FeedResolver::new(
            HttpClient::with_timeout(std::time::Duration::from_secs(2)).unwrap(),
            "http://127.0.0.1:9/latest.json",
        );
        let err = resolver.resolve_latest().await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Failed { .. } | ResolveError::Timeout { .. }
        ));
    }
}
