use crate::error::{Error, Result};
use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

/// An [`HttpClient`] wrapper that injects an API key as an HTTP header.
///
/// The header name and value are validated once at construction so
/// `execute` cannot fail on them.
pub struct ApiKey<C> {
    inner: C,
    header_name: HeaderName,
    key: HeaderValue,
}

impl<C> ApiKey<C> {
    pub fn new(inner: C, header_name: &str, key: &str) -> Result<Self> {
        let header_name = HeaderName::from_bytes(header_name.as_bytes())
            .map_err(|e| Error::Config(format!("invalid header name '{header_name}': {e}")))?;
        let mut key = HeaderValue::from_str(key)
            .map_err(|e| Error::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);

        Ok(Self {
            inner,
            header_name,
            key,
        })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.key.clone());
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unused;

    #[async_trait]
    impl HttpClient for Unused {
        async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            unreachable!("not called in these tests")
        }
    }

    #[test]
    fn test_rejects_invalid_header_name() {
        assert!(matches!(ApiKey::new(Unused, "bad header", "k"), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_control_characters_in_key() {
        assert!(matches!(ApiKey::new(Unused, "x-goog-api-key", "abc\n"), Err(Error::Config(_))));
    }

    #[test]
    fn test_key_is_sensitive() {
        let client = ApiKey::new(Unused, "x-goog-api-key", "secret").unwrap();
        assert_eq!(client.header_name, "x-goog-api-key");
        assert!(client.key.is_sensitive());
    }
}
