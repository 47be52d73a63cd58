//! Sync Gateway
//!
//! Hydrates the board from the remote task store and flushes it back.
//!
//! Save is destructive replace: delete every task of the user, then
//! recreate one row per task on the board. It is not atomic. A failure
//! after the delete leaves the remote store empty or partially populated
//! relative to the in-memory board; the board itself is never touched.
//! A save is refused until the remote tasks have been loaded once, since
//! flushing a board that lacks them would erase them.

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::board::Board;
use crate::models::{NewTaskRecord, TaskRecord};

pub type SyncResult<T> = Result<T, SyncError>;

/// Failures surfaced to the user. `Display` is the notice text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("User ID is not available. Try again in a few seconds.")]
    NoIdentity,
    #[error("Could not reach the task store: {0}")]
    Http(String),
    #[error("Failed to fetch tasks (status {0})")]
    Status(u16),
    #[error("Invalid task data format: {0}")]
    Format(String),
    #[error("Failed to delete existing tasks: {0}")]
    DeleteFailed(String),
    #[error("Error saving task \"{name}\": {message}")]
    CreateFailed { name: String, message: String },
    #[error("A save is already in progress")]
    SaveInProgress,
    #[error("Tasks are still loading. Try again once they are shown.")]
    NotLoaded,
}

/// Authentication state reported by the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Loading,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub status: AuthStatus,
    pub user_id: Option<String>,
}

impl Session {
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            user_id: Some(user_id.into()),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            status: AuthStatus::Unauthenticated,
            user_id: None,
        }
    }

    /// User id, only when the session is authenticated
    pub fn user_id(&self) -> SyncResult<&str> {
        match (self.status, self.user_id.as_deref()) {
            (AuthStatus::Authenticated, Some(id)) if !id.is_empty() => Ok(id),
            _ => Err(SyncError::NoIdentity),
        }
    }
}

/// Hydration runs once, on the transition into `Authenticated`
pub fn should_load(previous: Option<AuthStatus>, current: AuthStatus) -> bool {
    current == AuthStatus::Authenticated && previous != Some(AuthStatus::Authenticated)
}

/// Third-party session provider
#[async_trait(?Send)]
pub trait IdentityProvider {
    async fn session(&self) -> Session;
}

/// Remote task store, scoped by user id
#[async_trait(?Send)]
pub trait TaskApi {
    async fn list_tasks(&self, user_id: &str) -> SyncResult<Vec<TaskRecord>>;

    async fn create_task(&self, task: &NewTaskRecord<'_>) -> SyncResult<()>;

    async fn delete_all_tasks(&self, user_id: &str) -> SyncResult<()>;
}

/// Accepted bodies of the task listing
#[derive(Deserialize)]
#[serde(untagged)]
enum TaskListResponse {
    Bare(Vec<TaskRecord>),
    Wrapped { tasks: Vec<TaskRecord> },
}

/// Parse a listing that is either `[...]` or `{ "tasks": [...] }`
pub fn parse_task_list(body: &str) -> SyncResult<Vec<TaskRecord>> {
    match serde_json::from_str::<TaskListResponse>(body) {
        Ok(TaskListResponse::Bare(tasks)) | Ok(TaskListResponse::Wrapped { tasks }) => Ok(tasks),
        Err(e) => Err(SyncError::Format(e.to_string())),
    }
}

/// Outcome of a save that got past the delete
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub created: usize,
    pub failures: Vec<SyncError>,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct SyncGateway {
    api: Rc<dyn TaskApi>,
    saving: Cell<bool>,
    /// Set by the first successful load
    loaded: Cell<bool>,
}

/// Clears the in-flight flag however the save ends
struct SaveGuard<'a>(&'a Cell<bool>);

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl SyncGateway {
    pub fn new(api: Rc<dyn TaskApi>) -> Self {
        Self {
            api,
            saving: Cell::new(false),
            loaded: Cell::new(false),
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving.get()
    }

    /// Fetch every task of the session's user
    pub async fn load(&self, session: &Session) -> SyncResult<Vec<TaskRecord>> {
        let user_id = session.user_id()?;
        log::info!("[SYNC] loading tasks for user {}", user_id);
        let records = self.api.list_tasks(user_id).await?;
        log::info!("[SYNC] loaded {} tasks", records.len());
        self.loaded.set(true);
        Ok(records)
    }

    /// Replace the user's remote tasks with the board's content.
    ///
    /// A failed delete aborts before any create. Failed creates are
    /// collected in the report and do not stop the remaining ones.
    pub async fn save(&self, user_id: &str, board: &Board) -> SyncResult<SaveReport> {
        if user_id.is_empty() {
            return Err(SyncError::NoIdentity);
        }
        if !self.loaded.get() {
            log::warn!("[SYNC] save rejected, tasks have not been loaded");
            return Err(SyncError::NotLoaded);
        }
        if self.saving.replace(true) {
            log::warn!("[SYNC] save rejected, another save is in flight");
            return Err(SyncError::SaveInProgress);
        }
        let _guard = SaveGuard(&self.saving);

        log::info!("[SYNC] saving {} tasks for user {}", board.len(), user_id);
        self.api.delete_all_tasks(user_id).await.map_err(|e| {
            log::error!("[SYNC] delete-all failed, save aborted: {}", e);
            match e {
                SyncError::DeleteFailed(_) => e,
                other => SyncError::DeleteFailed(other.to_string()),
            }
        })?;

        let mut report = SaveReport::default();
        for (key, lane) in board.iter() {
            for task in lane {
                let body = NewTaskRecord {
                    name: &task.name,
                    note: &task.note,
                    date: &task.date,
                    user_id,
                    container: key,
                };
                match self.api.create_task(&body).await {
                    Ok(()) => report.created += 1,
                    Err(e) => {
                        log::error!("[SYNC] create failed for {} in {}: {}", task.id, key, e);
                        report.failures.push(create_failure(&task.name, e));
                    }
                }
            }
        }
        log::info!(
            "[SYNC] save finished: {} created, {} failed",
            report.created,
            report.failures.len()
        );
        Ok(report)
    }
}

fn create_failure(name: &str, e: SyncError) -> SyncError {
    match e {
        SyncError::CreateFailed { .. } => e,
        other => SyncError::CreateFailed {
            name: name.to_string(),
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::board_with;
    use crate::models::ContainerKey;
    use crate::models::ContainerKey::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List(String),
        Create { name: String, container: ContainerKey, user_id: String },
        DeleteAll(String),
    }

    /// In-memory task store recording every call
    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<Call>>,
        listing: String,
        fail_delete: bool,
        fail_names: Vec<&'static str>,
    }

    impl FakeApi {
        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn creates(&self) -> usize {
            self.calls().iter().filter(|c| matches!(c, Call::Create { .. })).count()
        }
    }

    #[async_trait(?Send)]
    impl TaskApi for FakeApi {
        async fn list_tasks(&self, user_id: &str) -> SyncResult<Vec<TaskRecord>> {
            self.calls.borrow_mut().push(Call::List(user_id.to_string()));
            parse_task_list(&self.listing)
        }

        async fn create_task(&self, task: &NewTaskRecord<'_>) -> SyncResult<()> {
            self.calls.borrow_mut().push(Call::Create {
                name: task.name.to_string(),
                container: task.container,
                user_id: task.user_id.to_string(),
            });
            if self.fail_names.iter().any(|n| *n == task.name) {
                return Err(SyncError::CreateFailed {
                    name: task.name.to_string(),
                    message: "validation failed".to_string(),
                });
            }
            Ok(())
        }

        async fn delete_all_tasks(&self, user_id: &str) -> SyncResult<()> {
            self.calls.borrow_mut().push(Call::DeleteAll(user_id.to_string()));
            if self.fail_delete {
                return Err(SyncError::DeleteFailed("status 500".to_string()));
            }
            Ok(())
        }
    }

    /// Gateway past its initial load
    fn gateway(api: &Rc<FakeApi>) -> SyncGateway {
        let gateway = SyncGateway::new(api.clone());
        gateway.loaded.set(true);
        gateway
    }

    const RECORDS: &str = r#"
        {"_id":"r1","name":"Plan","date":"2024-01-02","note":"q1","container":"container2"},
        {"_id":"r2","name":"Fire","date":"2024-01-03","note":"now","container":"container3"},
        {"_id":"r3","name":"Nap","date":"2024-01-04","note":"zz","container":"container2"}
    "#;

    #[test]
    fn test_parse_both_listing_shapes() {
        let bare = parse_task_list(&format!("[{}]", RECORDS)).unwrap();
        let wrapped = parse_task_list(&format!(r#"{{"tasks":[{}]}}"#, RECORDS)).unwrap();
        assert_eq!(bare.len(), 3);
        assert_eq!(bare, wrapped);

        let mut from_bare = Board::new();
        from_bare.hydrate(bare);
        let mut from_wrapped = Board::new();
        from_wrapped.hydrate(wrapped);
        assert_eq!(from_bare, from_wrapped);
        assert_eq!(from_bare.lane(ImportantNotUrgent).len(), 2);
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for body in [r#"{"items":[]}"#, r#"{"tasks":{}}"#, r#""tasks""#, "null", "not json"] {
            assert!(
                matches!(parse_task_list(body), Err(SyncError::Format(_))),
                "accepted {}",
                body
            );
        }
    }

    #[test]
    fn test_should_load_only_on_transition() {
        use super::AuthStatus::*;
        assert!(should_load(None, Authenticated));
        assert!(should_load(Some(Loading), Authenticated));
        assert!(should_load(Some(Unauthenticated), Authenticated));
        assert!(!should_load(Some(Authenticated), Authenticated));
        assert!(!should_load(Some(Loading), Unauthenticated));
        assert!(!should_load(None, Loading));
    }

    #[test]
    fn test_session_user_id_requires_authentication() {
        assert_eq!(Session::authenticated("u1").user_id(), Ok("u1"));
        assert_eq!(Session::unauthenticated().user_id(), Err(SyncError::NoIdentity));
        let loading = Session {
            status: AuthStatus::Loading,
            user_id: Some("u1".to_string()),
        };
        assert_eq!(loading.user_id(), Err(SyncError::NoIdentity));
    }

    #[tokio::test]
    async fn test_load_fetches_once_for_user() {
        let api = Rc::new(FakeApi {
            listing: format!(r#"{{"tasks":[{}]}}"#, RECORDS),
            ..Default::default()
        });
        let records = gateway(&api).load(&Session::authenticated("u1")).await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(api.calls(), vec![Call::List("u1".to_string())]);
    }

    #[tokio::test]
    async fn test_load_without_identity_makes_no_request() {
        let api = Rc::new(FakeApi::default());
        let err = gateway(&api).load(&Session::default()).await.unwrap_err();
        assert_eq!(err, SyncError::NoIdentity);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_load_format_error() {
        let api = Rc::new(FakeApi {
            listing: r#"{"message":"oops"}"#.to_string(),
            ..Default::default()
        });
        let err = gateway(&api).load(&Session::authenticated("u1")).await.unwrap_err();
        assert!(matches!(err, SyncError::Format(_)));
    }

    #[tokio::test]
    async fn test_save_deletes_then_creates_every_task() {
        let api = Rc::new(FakeApi::default());
        let board = board_with(&[
            (Unassigned, &["a"]),
            (ImportantUrgent, &["b", "c"]),
            (NotImportantUrgent, &["d"]),
        ]);

        let report = gateway(&api).save("u1", &board).await.unwrap();

        assert_eq!(report.created, 4);
        assert!(report.is_complete());
        let calls = api.calls();
        assert_eq!(calls[0], Call::DeleteAll("u1".to_string()));
        assert_eq!(
            calls[1..],
            [
                Call::Create { name: "Task a".into(), container: Unassigned, user_id: "u1".into() },
                Call::Create { name: "Task b".into(), container: ImportantUrgent, user_id: "u1".into() },
                Call::Create { name: "Task c".into(), container: ImportantUrgent, user_id: "u1".into() },
                Call::Create { name: "Task d".into(), container: NotImportantUrgent, user_id: "u1".into() },
            ]
        );
    }

    #[tokio::test]
    async fn test_save_aborts_when_delete_fails() {
        let api = Rc::new(FakeApi {
            fail_delete: true,
            ..Default::default()
        });
        let board = board_with(&[(Unassigned, &["a", "b"])]);
        let before = board.clone();

        let err = gateway(&api).save("u1", &board).await.unwrap_err();

        assert!(matches!(err, SyncError::DeleteFailed(_)));
        assert_eq!(api.creates(), 0);
        assert_eq!(board, before);
    }

    #[tokio::test]
    async fn test_save_reports_each_create_failure() {
        let api = Rc::new(FakeApi {
            fail_names: vec!["Task a", "Task c"],
            ..Default::default()
        });
        let board = board_with(&[(Unassigned, &["a", "b"]), (ImportantNotUrgent, &["c", "d"])]);

        let report = gateway(&api).save("u1", &board).await.unwrap();

        assert_eq!(api.creates(), 4);
        assert_eq!(report.created, 2);
        assert_eq!(report.failures.len(), 2);
        assert!(report.failures[0].to_string().contains("Task a"));
        assert!(report.failures[1].to_string().contains("Task c"));
    }

    #[tokio::test]
    async fn test_save_without_user_id() {
        let api = Rc::new(FakeApi::default());
        let err = gateway(&api).save("", &Board::new()).await.unwrap_err();
        assert_eq!(err, SyncError::NoIdentity);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_save_rejects_reentry() {
        let api = Rc::new(FakeApi::default());
        let gateway = gateway(&api);
        let board = board_with(&[(Unassigned, &["a"])]);

        gateway.saving.set(true);
        let err = gateway.save("u1", &board).await.unwrap_err();
        assert_eq!(err, SyncError::SaveInProgress);
        assert!(api.calls().is_empty());

        gateway.saving.set(false);
        gateway.save("u1", &board).await.unwrap();
        assert!(!gateway.is_saving());
    }

    #[tokio::test]
    async fn test_save_flag_cleared_after_failure() {
        let api = Rc::new(FakeApi {
            fail_delete: true,
            ..Default::default()
        });
        let gateway = gateway(&api);
        assert!(gateway.save("u1", &Board::new()).await.is_err());
        assert!(!gateway.is_saving());
    }

    #[tokio::test]
    async fn test_save_refused_until_tasks_loaded() {
        let api = Rc::new(FakeApi {
            listing: format!("[{}]", RECORDS),
            ..Default::default()
        });
        let gateway = SyncGateway::new(api.clone());

        // The board while the listing is still in flight
        let err = gateway.save("u1", &Board::new()).await.unwrap_err();
        assert_eq!(err, SyncError::NotLoaded);
        assert!(api.calls().is_empty());
        assert!(!gateway.is_saving());

        let mut board = Board::new();
        board.hydrate(gateway.load(&Session::authenticated("u1")).await.unwrap());
        assert!(gateway.loaded.get());

        let report = gateway.save("u1", &board).await.unwrap();
        assert_eq!(report.created, 3);
        assert_eq!(api.calls()[1], Call::DeleteAll("u1".to_string()));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_save_refused() {
        let api = Rc::new(FakeApi {
            listing: "not json".to_string(),
            ..Default::default()
        });
        let gateway = SyncGateway::new(api.clone());
        assert!(gateway.load(&Session::authenticated("u1")).await.is_err());
        assert!(!gateway.loaded.get());

        let err = gateway.save("u1", &Board::new()).await.unwrap_err();
        assert_eq!(err, SyncError::NotLoaded);
        assert_eq!(api.calls(), vec![Call::List("u1".to_string())]);
    }
}
