//! Configuration for the task backend client.

use std::env;
use std::time::Duration;

/// Default backend URL (local development server).
const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Configuration for [`crate::TaskServerClient`].
#[derive(Debug, Clone)]
pub struct TaskServerConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,

    /// Timeout for the connectivity probe.
    pub probe_timeout: Duration,
}

impl Default for TaskServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            probe_timeout: Duration::from_secs(3),
        }
    }
}

impl TaskServerConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            ..Default::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Optional:
    /// - `TASK_SERVER_URL` - backend base URL (default: http://localhost:3001)
    pub fn from_env() -> Self {
        match env::var("TASK_SERVER_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// URL of the tasks collection.
    pub fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    /// URL of a single task.
    pub fn task_url(&self, id: i64) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }
}
