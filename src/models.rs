//! Frontend Models
//!
//! Board entities and the wire records exchanged with the task store.

use serde::{Deserialize, Serialize};

/// Identifier of a task on the board.
///
/// Locally created tasks carry a short random id; hydrated tasks carry
/// the id assigned by the remote store.
pub type TaskId = String;

/// One of the five fixed lanes of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerKey {
    #[serde(rename = "container1")]
    Unassigned,
    #[serde(rename = "container2")]
    ImportantNotUrgent,
    #[serde(rename = "container3")]
    ImportantUrgent,
    #[serde(rename = "container4")]
    NotImportantNotUrgent,
    #[serde(rename = "container5")]
    NotImportantUrgent,
}

impl ContainerKey {
    /// Board order, also the order lanes are flushed on save
    pub const ALL: [ContainerKey; 5] = [
        ContainerKey::Unassigned,
        ContainerKey::ImportantNotUrgent,
        ContainerKey::ImportantUrgent,
        ContainerKey::NotImportantNotUrgent,
        ContainerKey::NotImportantUrgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKey::Unassigned => "container1",
            ContainerKey::ImportantNotUrgent => "container2",
            ContainerKey::ImportantUrgent => "container3",
            ContainerKey::NotImportantNotUrgent => "container4",
            ContainerKey::NotImportantUrgent => "container5",
        }
    }

    /// Parse a container literal. Task ids never collide with these.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "container1" => Some(ContainerKey::Unassigned),
            "container2" => Some(ContainerKey::ImportantNotUrgent),
            "container3" => Some(ContainerKey::ImportantUrgent),
            "container4" => Some(ContainerKey::NotImportantNotUrgent),
            "container5" => Some(ContainerKey::NotImportantUrgent),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContainerKey::Unassigned => "Unassigned",
            ContainerKey::ImportantNotUrgent => "Important, Not Urgent",
            ContainerKey::ImportantUrgent => "Important, Urgent",
            ContainerKey::NotImportantNotUrgent => "Not Important, Not Urgent",
            ContainerKey::NotImportantUrgent => "Not Important, Urgent",
        }
    }

    /// Position of this lane in [`ContainerKey::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for ContainerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single task on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: TaskId,
    pub name: String,
    /// Creation date, `YYYY-MM-DD`
    pub date: String,
    pub note: String,
}

/// Task as returned by `GET /task`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub note: String,
    /// Raw container literal; unknown values are handled at hydration
    pub container: String,
}

impl From<TaskRecord> for TaskItem {
    fn from(record: TaskRecord) -> Self {
        TaskItem {
            id: record.id,
            name: record.name,
            date: record.date,
            note: record.note,
        }
    }
}

/// Body of `POST /task`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTaskRecord<'a> {
    pub name: &'a str,
    pub note: &'a str,
    pub date: &'a str,
    #[serde(rename = "userId")]
    pub user_id: &'a str,
    pub container: ContainerKey,
}
