//! HTTP resource provider for ingest-hosted logos.
//!
//! The ingestion service hosts uploaded logos at public URLs that permit
//! cross-origin reads, which is exactly what lets the export rasterizer
//! fetch them back here. Responses are cached for the session so the
//! preview and a subsequent export fetch each logo once.

use papier_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Debug)]
pub struct HttpResourceProvider {
    client: reqwest::blocking::Client,
    cache: RwLock<HashMap<String, SharedResourceData>>,
}

impl Default for HttpResourceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpResourceProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self { client, cache: RwLock::new(HashMap::new()) }
    }

    fn is_http(url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }
}

impl ResourceProvider for HttpResourceProvider {
    fn load(&self, url: &str) -> Result<SharedResourceData, ResourceError> {
        if !Self::is_http(url) {
            return Err(ResourceError::InvalidFormat(format!(
                "not an http(s) URL: {}",
                url
            )));
        }

        if let Ok(cache) = self.cache.read()
            && let Some(hit) = cache.get(url)
        {
            return Ok(hit.clone());
        }

        log::debug!("Fetching resource {}", url);
        let response = self.client.get(url).send().map_err(|e| {
            ResourceError::LoadFailed { path: url.to_string(), message: e.to_string() }
        })?;

        if !response.status().is_success() {
            return Err(ResourceError::LoadFailed {
                path: url.to_string(),
                message: format!("status {}", response.status()),
            });
        }

        let bytes = response.bytes().map_err(|e| ResourceError::LoadFailed {
            path: url.to_string(),
            message: e.to_string(),
        })?;
        let data: SharedResourceData = Arc::new(bytes.to_vec());

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(url.to_string(), data.clone());
        }
        Ok(data)
    }

    fn exists(&self, url: &str) -> bool {
        if let Ok(cache) = self.cache.read()
            && cache.contains_key(url)
        {
            return true;
        }
        Self::is_http(url)
    }

    fn name(&self) -> &'static str {
        "HttpResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_schemes() {
        let provider = HttpResourceProvider::new();
        assert!(matches!(
            provider.load("file:///etc/passwd"),
            Err(ResourceError::InvalidFormat(_))
        ));
        assert!(matches!(
            provider.load("logo.png"),
            Err(ResourceError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_exists_is_scheme_based_before_any_fetch() {
        let provider = HttpResourceProvider::new();
        assert!(provider.exists("https://img.example/logo.png"));
        assert!(!provider.exists("ftp://img.example/logo.png"));
    }
}
