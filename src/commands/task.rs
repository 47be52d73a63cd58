//! Task Endpoint
//!
//! `GET`, `POST` and `DELETE` on `{api_base}/task`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::transport_error;
use crate::config::AppConfig;
use crate::models::{NewTaskRecord, TaskRecord};
use crate::sync::{parse_task_list, SyncError, SyncResult, TaskApi};

#[derive(Serialize)]
struct UserIdQuery<'a> {
    id: &'a str,
}

/// Error body of a rejected create
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct HttpTaskApi {
    client: reqwest::Client,
    task_url: String,
}

impl HttpTaskApi {
    pub fn new(config: &AppConfig, origin: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            task_url: config.endpoint(origin, "task"),
        }
    }
}

#[async_trait(?Send)]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self, user_id: &str) -> SyncResult<Vec<TaskRecord>> {
        let response = self
            .client
            .get(&self.task_url)
            .query(&UserIdQuery { id: user_id })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }
        let body = response.text().await.map_err(transport_error)?;
        parse_task_list(&body)
    }

    async fn create_task(&self, task: &NewTaskRecord<'_>) -> SyncResult<()> {
        let response = self
            .client
            .post(&self.task_url)
            .json(task)
            .send()
            .await
            .map_err(|e| SyncError::CreateFailed {
                name: task.name.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(SyncError::CreateFailed {
            name: task.name.to_string(),
            message: rejection_message(&body, status.as_u16()),
        })
    }

    async fn delete_all_tasks(&self, user_id: &str) -> SyncResult<()> {
        let response = self
            .client
            .delete(&self.task_url)
            .query(&UserIdQuery { id: user_id })
            .send()
            .await
            .map_err(|e| SyncError::DeleteFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::DeleteFailed(format!("status {}", status.as_u16())));
        }
        Ok(())
    }
}

/// `message` of a `{ "message": ... }` body, or a generic status line
fn rejection_message(body: &str, status: u16) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Failed to save task (status {})", status))
}
