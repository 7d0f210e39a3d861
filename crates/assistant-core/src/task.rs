//! Task payload types shared by the collaborators.

use serde::{Deserialize, Serialize};

/// A task as owned by the REST backend.
///
/// The backend assigns the numeric identifier; the client sets
/// `created_at` at creation time (RFC 3339).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Payload for creating a task.
///
/// The store fills in the identifier and creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
}

impl NewTask {
    /// Create a new, uncompleted task payload.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }
}

/// Partial update for a task. `None` fields are left untouched and are
/// omitted from the serialized body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// A patch that only flips the completion flag.
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// A task held in the encrypted local vault.
///
/// Same visible shape as [`Task`] but with a client-generated string
/// identifier; the vault assigns id and timestamp on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_skips_none_fields() {
        let patch = TaskPatch::completed(true);
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"completed":true}"#);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::completed(false).is_empty());
    }

    #[test]
    fn test_task_created_at_field_name() {
        let task = Task {
            id: 7,
            title: "Comprar pan".to_string(),
            description: String::new(),
            completed: false,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"createdAt\""));
    }

    #[test]
    fn test_task_missing_description_defaults_empty() {
        let json = r#"{"id":1,"title":"t","completed":false,"createdAt":"2024-01-01T00:00:00Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, "");
    }
}
