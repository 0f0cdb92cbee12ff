use crate::constants::{ARTIFACT_RETRY_MS, JOB_STATUS_RETRY_MS, PAN_ZOOM_ATTACH_DELAY_MS};
use crate::graph::MatchStrategy;
use crate::polling::RetryPolicy;

/// Runtime configuration for the viewer pages.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    base_url: String,
    /// Delay between job-status polls.
    pub job_retry_ms: u32,
    /// Delay between artifact existence checks.
    pub artifact_retry_ms: u32,
    /// Ceiling on poll attempts (None polls until a terminal answer).
    pub max_poll_attempts: Option<u32>,
    pub pan_zoom_delay_ms: u32,
    pub match_strategy: MatchStrategy,
}

impl Default for ViewerConfig {
    /// Same-origin relative URLs, 3 s / 5 s retry delays and no ceiling.
    fn default() -> Self {
        Self {
            base_url: String::new(),
            job_retry_ms: JOB_STATUS_RETRY_MS,
            artifact_retry_ms: ARTIFACT_RETRY_MS,
            max_poll_attempts: None,
            pan_zoom_delay_ms: PAN_ZOOM_ATTACH_DELAY_MS,
            match_strategy: MatchStrategy::Exact,
        }
    }
}

impl ViewerConfig {
    /// Build from the compile-time environment.  `VIEWER_API_BASE_URL`
    /// points the status endpoint at another origin and
    /// `VIEWER_MAX_POLL_ATTEMPTS` caps polling; both are optional.
    pub fn from_build_env() -> Self {
        let mut config = match option_env!("VIEWER_API_BASE_URL") {
            Some(url) => Self::from_url(url),
            None => Self::default(),
        };
        config.max_poll_attempts = option_env!("VIEWER_MAX_POLL_ATTEMPTS")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|n| *n > 0);
        config
    }

    /// Create a config whose endpoints live under `url`.
    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Status endpoint for a queued workflow.
    pub fn queue_url(&self, workflow_id: &str) -> String {
        format!("{}/queue/{}", self.base_url, workflow_id.trim())
    }

    pub fn job_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.job_retry_ms, self.max_poll_attempts)
    }

    pub fn artifact_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.artifact_retry_ms, self.max_poll_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_relative_queue_url() {
        let config = ViewerConfig::default();
        assert_eq!(config.queue_url("42"), "/queue/42");
        assert_eq!(config.job_policy().delay_ms, 3000);
        assert_eq!(config.artifact_policy().delay_ms, 5000);
        assert_eq!(config.job_policy().max_attempts, None);
    }

    #[test]
    fn from_url_trims_trailing_slash() {
        let config = ViewerConfig::from_url("https://view.example.org/");
        assert_eq!(
            config.queue_url(" abc \n"),
            "https://view.example.org/queue/abc"
        );
    }
}
