//! Blocking HTTP transport with timeout, retry and exponential backoff.

use crate::error::LookupError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Settings for the deps.dev HTTP transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpSettings {
    /// Base URL of the API, without trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Doubles after every retry, capped at `max_backoff`.
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.deps.dev/v3".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(10),
        }
    }
}

fn http_err(reason: impl Into<String>) -> LookupError {
    LookupError::Http(reason.into())
}

#[derive(Debug)]
pub struct HttpClient {
    settings: HttpSettings,
    client: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new(settings: HttpSettings) -> Result<Self, LookupError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("depscore/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| http_err(e.to_string()))?;
        Ok(Self { settings, client })
    }

    /// GET `path` (relative to the base URL) and decode the JSON body.
    ///
    /// Transport errors and 5xx responses are retried; 404 maps to
    /// [`LookupError::NotFound`] and other 4xx responses fail immediately.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LookupError> {
        let url = format!("{}{}", self.settings.base_url.trim_end_matches('/'), path);
        let mut backoff = self.settings.initial_backoff;
        let mut last_err = String::new();

        for attempt in 0..=self.settings.max_retries {
            if attempt > 0 {
                tracing::warn!(
                    "deps.dev: retry attempt {}/{} after {:?} ({})",
                    attempt,
                    self.settings.max_retries,
                    backoff,
                    last_err
                );
                std::thread::sleep(backoff);
                backoff = (backoff * 2).min(self.settings.max_backoff);
            }

            tracing::debug!(%url, "deps.dev request");
            match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.json::<T>().map_err(|e| {
                            LookupError::Malformed(format!("decoding {path}: {e}"))
                        });
                    }
                    if status == StatusCode::NOT_FOUND {
                        return Err(LookupError::NotFound(path.to_string()));
                    }
                    if status.is_client_error() {
                        let body_text = resp.text().unwrap_or_default();
                        return Err(http_err(format!("HTTP {status} for {path}: {body_text}")));
                    }
                    last_err = format!("HTTP {status}");
                }
                Err(e) => {
                    last_err = e.to_string();
                }
            }
        }

        Err(http_err(format!(
            "all {} retries exhausted for {path}: {last_err}",
            self.settings.max_retries
        )))
    }
}


#[cfg(test)]
mod tests {
    use super::stub_server::StubServer;
    use super::*;

    fn client(base_url: &str, max_retries: u32) -> HttpClient {
        HttpClient::new(HttpSettings {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(5),
            max_retries,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(2),
        })
        .expect("client should build")
    }

    #[test]
    fn default_settings_target_public_api() {
        let settings = HttpSettings::default();
        assert_eq!(settings.base_url, "https://api.deps.dev/v3");
        assert_eq!(settings.max_retries, 3);
        assert!(settings.initial_backoff < settings.max_backoff);
    }

    #[test]
    fn unreachable_host_fails_after_retries() {
        let client = client("http://127.0.0.1:9", 1);

        let err = client
            .get_json::<serde_json::Value>("/projects/x")
            .expect_err("nothing listens on the discard port");
        assert!(
            matches!(err, LookupError::Http(ref msg) if msg.contains("retries exhausted")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn success_decodes_json_body() {
        let server = StubServer::start(|_| (200, r#"{"id": "github.com/a/b"}"#.to_string()));

        let body: serde_json::Value = client(&server.base_url, 2)
            .get_json("/projects/github.com%2Fa%2Fb")
            .expect("request should succeed");

        assert_eq!(body["id"], "github.com/a/b");
        assert_eq!(server.requests(), vec!["/projects/github.com%2Fa%2Fb"]);
    }

    #[test]
    fn not_found_is_not_retried() {
        let server = StubServer::start(|_| (404, r#"{"error": "not found"}"#.to_string()));

        let err = client(&server.base_url, 2)
            .get_json::<serde_json::Value>("/systems/npm/packages/missing/versions/1")
            .expect_err("404 should fail");

        assert!(
            matches!(err, LookupError::NotFound(ref path) if path == "/systems/npm/packages/missing/versions/1"),
            "unexpected error: {err}"
        );
        assert_eq!(server.requests().len(), 1);
    }

    #[test]
    fn client_errors_fail_on_first_attempt() {
        let server = StubServer::start(|_| (403, "forbidden".to_string()));

        let err = client(&server.base_url, 2)
            .get_json::<serde_json::Value>("/projects/x")
            .expect_err("403 should fail");

        assert!(
            matches!(err, LookupError::Http(ref msg) if msg.contains("403") && msg.contains("forbidden")),
            "unexpected error: {err}"
        );
        assert_eq!(server.requests().len(), 1);
    }

    #[test]
    fn server_errors_are_retried_until_exhausted() {
        let server = StubServer::start(|_| (500, String::new()));

        let err = client(&server.base_url, 2)
            .get_json::<serde_json::Value>("/projects/x")
            .expect_err("500 should fail");

        assert!(
            matches!(err, LookupError::Http(ref msg) if msg.contains("all 2 retries exhausted") && msg.contains("HTTP 500")),
            "unexpected error: {err}"
        );
        assert_eq!(server.requests().len(), 3);
    }

    #[test]
    fn server_error_then_success_recovers() {
        let mut calls = 0;
        let server = StubServer::start(move |_| {
            calls += 1;
            if calls == 1 {
                (503, String::new())
            } else {
                (200, "[1, 2]".to_string())
            }
        });

        let body: Vec<u32> = client(&server.base_url, 2)
            .get_json("/projects/x")
            .expect("second attempt should succeed");

        assert_eq!(body, vec![1, 2]);
        assert_eq!(server.requests().len(), 2);
    }

    #[test]
    fn undecodable_body_is_malformed() {
        let server = StubServer::start(|_| (200, "not json".to_string()));

        let err = client(&server.base_url, 2)
            .get_json::<serde_json::Value>("/projects/x")
            .expect_err("body is not json");

        assert!(matches!(err, LookupError::Malformed(_)), "unexpected error: {err}");
        assert_eq!(server.requests().len(), 1);
    }
}
