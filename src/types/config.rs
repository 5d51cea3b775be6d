use crate::depsdotdev::transport::HttpSettings;
use crate::error::DepscoreError;
use crate::report::OutputFormat;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepscoreConfig {
    pub depsdotdev: Option<DepsDotDevConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepsDotDevConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub initial_backoff_ms: Option<u64>,
    pub max_backoff_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

impl DepscoreConfig {
    pub fn http_settings(&self) -> HttpSettings {
        let defaults = HttpSettings::default();
        match &self.depsdotdev {
            Some(api) => HttpSettings {
                base_url: api.base_url.clone().unwrap_or(defaults.base_url),
                timeout: api
                    .timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.timeout),
                max_retries: api.max_retries.unwrap_or(defaults.max_retries),
                initial_backoff: api
                    .initial_backoff_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.initial_backoff),
                max_backoff: api
                    .max_backoff_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.max_backoff),
            },
            None => defaults,
        }
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|output| output.format)
    }

    pub fn validate(&self) -> Result<(), DepscoreError> {
        let settings = self.http_settings();

        if !(settings.base_url.starts_with("https://") || settings.base_url.starts_with("http://"))
        {
            return Err(DepscoreError::ConfigParse(format!(
                "depsdotdev.base_url must be an http(s) URL (found {:?})",
                settings.base_url
            )));
        }
        if settings.timeout.is_zero() {
            return Err(DepscoreError::ConfigParse(
                "depsdotdev.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if settings.initial_backoff > settings.max_backoff {
            return Err(DepscoreError::ConfigParse(format!(
                "depsdotdev.initial_backoff_ms ({}) must not exceed depsdotdev.max_backoff_ms ({})",
                settings.initial_backoff.as_millis(),
                settings.max_backoff.as_millis()
            )));
        }

        Ok(())
    }
}
