//! HTTP client for the task backend.

use assistant_core::{async_trait, NewTask, StoreError, Task, TaskPatch, TaskStore};
use chrono::Utc;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::TaskServerConfig;

/// Creation body: the caller's payload plus the client-side timestamp.
#[derive(Debug, Serialize)]
struct CreateBody<'a> {
    #[serde(flatten)]
    task: &'a NewTask,
    #[serde(rename = "createdAt")]
    created_at: String,
}

/// Client for the REST task backend.
pub struct TaskServerClient {
    client: Client,
    config: TaskServerConfig,
}

impl TaskServerClient {
    /// Create a client with the given configuration.
    pub fn new(config: TaskServerConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .build()
            .map_err(|e| StoreError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`TaskServerConfig::from_env`].
    pub fn from_env() -> Result<Self, StoreError> {
        Self::new(TaskServerConfig::from_env())
    }

    /// Get the configuration.
    pub fn config(&self) -> &TaskServerConfig {
        &self.config
    }

    /// Probe the backend: can we reach `GET /tasks` within the probe
    /// timeout? Never errors; unreachable means `false`.
    pub async fn ping(&self) -> bool {
        let result = self
            .client
            .get(self.config.tasks_url())
            .timeout(self.config.probe_timeout)
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Task backend probe failed: {}", e);
                false
            }
        }
    }

}

/// Map a transport-level failure.
fn request_error(e: reqwest::Error) -> StoreError {
    StoreError::Network(e.to_string())
}

/// Turn a non-2xx response into the right [`StoreError`].
///
/// `id` is used to report 404s as [`StoreError::NotFound`].
async fn check_status(response: Response, id: Option<i64>) -> Result<Response, StoreError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
    }

    let message = response.text().await.unwrap_or_default();
    warn!("Task backend error ({}): {}", status.as_u16(), message);

    Err(StoreError::Server {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TaskStore for TaskServerClient {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        debug!("Fetching tasks from {}", self.config.tasks_url());

        let response = self
            .client
            .get(self.config.tasks_url())
            .send()
            .await
            .map_err(request_error)?;

        let response = check_status(response, None).await?;
        let tasks: Vec<Task> = response
            .json()
            .await
            .map_err(|e| StoreError::Network(format!("Failed to parse task list: {}", e)))?;

        debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn get(&self, id: i64) -> Result<Task, StoreError> {
        debug!("Fetching task {}", id);

        let response = self
            .client
            .get(self.config.task_url(id))
            .send()
            .await
            .map_err(request_error)?;

        let response = check_status(response, Some(id)).await?;
        response
            .json::<Task>()
            .await
            .map_err(|e| StoreError::Network(format!("Failed to parse task: {}", e)))
    }

    async fn create(&self, task: NewTask) -> Result<Task, StoreError> {
        debug!("Creating task: {}", task.title);

        let body = CreateBody {
            task: &task,
            created_at: Utc::now().to_rfc3339(),
        };

        let response = self
            .client
            .post(self.config.tasks_url())
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let response = check_status(response, None).await?;
        let created: Task = response
            .json()
            .await
            .map_err(|e| StoreError::Network(format!("Failed to parse created task: {}", e)))?;

        info!("Created task {} ({})", created.id, created.title);
        Ok(created)
    }

    async fn update(&self, id: i64, patch: TaskPatch) -> Result<Task, StoreError> {
        debug!("Updating task {}", id);

        let response = self
            .client
            .patch(self.config.task_url(id))
            .json(&patch)
            .send()
            .await
            .map_err(request_error)?;

        let response = check_status(response, Some(id)).await?;
        let updated: Task = response
            .json()
            .await
            .map_err(|e| StoreError::Network(format!("Failed to parse updated task: {}", e)))?;

        info!("Updated task {}", id);
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        debug!("Deleting task {}", id);

        let response = self
            .client
            .delete(self.config.task_url(id))
            .send()
            .await
            .map_err(request_error)?;

        check_status(response, Some(id)).await?;

        info!("Deleted task {}", id);
        Ok(())
    }
}
