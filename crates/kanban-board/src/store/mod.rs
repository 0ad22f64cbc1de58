//! The project store: authoritative in-memory state of the current board.
//!
//! Writes go through the `BoardRemote`. Most of them are pessimistic (local
//! state changes only after the remote confirms); reordering projects is
//! optimistic and rolled back if the remote refuses.

mod saver;
mod state;

pub use saver::SessionSaver;
pub use state::BoardState;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use kanban_core::{KanbanError, KanbanResult, StateCell};
use kanban_domain::{
    array_move, BoardId, FieldUpdate, FilterUpdate, Project, ProjectId, ProjectUpdate, Task,
    TaskId, TaskStatus, TaskUpdate, UserId,
};
use kanban_persistence::{BoardRemote, NewProject, NewTask, SessionSnapshot, SessionStorage};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Result of a reorder or move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Order changed within the same list.
    Reordered,
    /// Task moved to another project after the remote confirmed.
    Moved,
    /// Nothing to do, e.g. dropping a project on its own slot.
    Unchanged,
    /// Applied optimistically, then restored after the remote refused.
    RolledBack,
    /// The remote refused or failed; local state untouched.
    Rejected,
    /// A referenced project or task is not on the board.
    NotFound,
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Reordered | Self::Moved)
    }
}

/// Fields of the add-task dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub status: TaskStatus,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee_id: Option<UserId>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            title: title.into(),
            status,
            description: None,
            due_date: None,
            assignee_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_assignee(mut self, assignee_id: impl Into<UserId>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }
}

pub struct ProjectStore {
    remote: Arc<dyn BoardRemote>,
    state: StateCell<BoardState>,
    save_tx: Option<mpsc::UnboundedSender<SessionSnapshot>>,
}

impl ProjectStore {
    /// A store that keeps nothing between runs.
    pub fn new(remote: Arc<dyn BoardRemote>) -> Self {
        Self {
            remote,
            state: StateCell::new(BoardState::default()),
            save_tx: None,
        }
    }

    /// A store that queues a session snapshot after every change.
    ///
    /// Returns the store and the receiving end of the save queue, to be
    /// drained by a `SessionSaver`.
    pub fn with_session_saving(
        remote: Arc<dyn BoardRemote>,
        restored: Option<SessionSnapshot>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionSnapshot>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let initial = restored.map(BoardState::from_session).unwrap_or_default();
        let store = Self {
            remote,
            state: StateCell::new(initial),
            save_tx: Some(tx),
        };
        (store, rx)
    }

    /// Restore the last saved session and wire saving back to the same
    /// storage. An unreadable session starts fresh.
    pub async fn hydrate(
        remote: Arc<dyn BoardRemote>,
        storage: Arc<dyn SessionStorage>,
    ) -> (Self, SessionSaver) {
        let restored = match storage.load().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Discarding unreadable session: {}", e);
                None
            }
        };
        if let Some(ref session) = restored {
            tracing::info!(
                "Restored session for board {:?} with {} projects",
                session.board_id,
                session.projects.len()
            );
        }
        let (store, rx) = Self::with_session_saving(remote, restored);
        (store, SessionSaver::new(storage, rx))
    }

    pub fn snapshot(&self) -> Arc<BoardState> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<BoardState>> {
        self.state.subscribe()
    }

    pub fn projects(&self) -> Arc<Vec<Project>> {
        self.state.get().projects.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.get().is_loading
    }

    /// Apply a state transition and queue a session save if it changed
    /// anything.
    fn commit<F>(&self, f: F) -> bool
    where
        F: FnOnce(&BoardState) -> Option<BoardState>,
    {
        // Queued while the cell is locked so saves arrive in commit order
        self.state
            .update_then(f, |next| {
                if let Some(tx) = &self.save_tx {
                    if tx.send(next.to_session()).is_err() {
                        tracing::debug!("Session saver gone; skipping save");
                    }
                }
            })
            .is_some()
    }

    fn require_user(state: &BoardState) -> KanbanResult<String> {
        state.acting_user.clone().ok_or(KanbanError::Unauthenticated)
    }

    pub fn sign_in(&self, email: impl Into<String>) {
        let email = email.into();
        self.commit(|s| {
            if s.acting_user.as_deref() == Some(email.as_str()) {
                return None;
            }
            Some(BoardState {
                acting_user: Some(email),
                ..s.clone()
            })
        });
    }

    /// Forget the user and everything loaded on their behalf.
    pub fn sign_out(&self) {
        tracing::info!("Signing out; clearing board state");
        self.commit(|s| (*s != BoardState::default()).then(BoardState::default));
    }

    /// Switch to another board. Switching resets the loaded projects and the
    /// filter; selecting the current board is a no-op.
    pub fn select_board(&self, board_id: impl Into<BoardId>) {
        let board_id = board_id.into();
        self.commit(|s| {
            if s.board_id.as_deref() == Some(board_id.as_str()) {
                return None;
            }
            tracing::debug!("Selecting board {}", board_id);
            Some(BoardState {
                board_id: Some(board_id),
                acting_user: s.acting_user.clone(),
                ..BoardState::default()
            })
        });
    }

    pub fn set_filter(&self, update: FilterUpdate) {
        self.commit(|s| {
            let filter = s.filter.merge(update);
            if filter == s.filter {
                return None;
            }
            Some(BoardState {
                filter,
                ..s.clone()
            })
        });
    }

    /// Fetch the board's projects and their tasks.
    ///
    /// Never fails: a project whose tasks cannot be fetched is shown empty,
    /// and a board whose projects cannot be fetched is shown with none.
    pub async fn load_projects(&self, board_id: &str) {
        self.select_board(board_id);
        self.commit(|s| {
            Some(BoardState {
                is_loading: true,
                ..s.clone()
            })
        });

        let projects = match self.remote.fetch_projects(board_id).await {
            Ok(projects) => {
                let fetches = projects.iter().map(|p| self.remote.fetch_tasks(&p.id));
                let task_lists = join_all(fetches).await;
                projects
                    .into_iter()
                    .zip(task_lists)
                    .map(|(mut project, tasks)| {
                        project.tasks = match tasks {
                            Ok(tasks) => tasks
                                .into_iter()
                                .map(|mut task| {
                                    if task.project_id != project.id {
                                        tracing::debug!(
                                            "Task {} listed under project {} points at {}",
                                            task.id,
                                            project.id,
                                            task.project_id
                                        );
                                        task.project_id = project.id.clone();
                                    }
                                    task
                                })
                                .collect(),
                            Err(e) => {
                                tracing::warn!(
                                    "Failed to load tasks for project {}: {}",
                                    project.id,
                                    e
                                );
                                Vec::new()
                            }
                        };
                        project
                    })
                    .collect()
            }
            Err(e) => {
                tracing::warn!("Failed to load projects for board {}: {}", board_id, e);
                Vec::new()
            }
        };

        let count = projects.len();
        let applied = self.commit(|s| {
            if s.board_id.as_deref() != Some(board_id) {
                return None;
            }
            Some(BoardState {
                projects: Arc::new(projects),
                is_loading: false,
                ..s.clone()
            })
        });
        if applied {
            tracing::info!("Loaded {} projects for board {}", count, board_id);
        } else {
            tracing::debug!("Board changed while loading {}; discarding result", board_id);
        }
    }

    pub async fn add_project(
        &self,
        title: impl Into<String>,
        description: Option<String>,
    ) -> KanbanResult<ProjectId> {
        let state = self.state.get();
        let board_id = state.board_id.clone().ok_or(KanbanError::NoBoardSelected)?;
        let email = Self::require_user(&state)?;

        let mut project = self
            .remote
            .create_project(NewProject {
                title: title.into(),
                description,
                board_id: board_id.clone(),
                acting_user_email: email,
            })
            .await?
            .ok_or_else(|| KanbanError::Remote("project was not created".to_string()))?;
        project.tasks.clear();

        let project_id = project.id.clone();
        tracing::info!("Created project {} ({})", project.title, project_id);
        self.commit(|s| {
            if s.board_id.as_deref() != Some(board_id.as_str()) {
                return None;
            }
            let mut projects = s.projects.as_ref().clone();
            projects.push(project);
            Some(s.with_projects(projects))
        });
        Ok(project_id)
    }

    pub async fn rename_project(
        &self,
        project_id: &str,
        title: impl Into<String>,
        description: FieldUpdate<String>,
    ) -> KanbanResult<()> {
        let email = Self::require_user(&self.state.get())?;
        let patch_description = description.is_change();

        let updated = self
            .remote
            .update_project(
                project_id,
                ProjectUpdate {
                    title: Some(title.into()),
                    description,
                },
                &email,
            )
            .await?
            .ok_or_else(|| KanbanError::Remote(format!("project {} was not updated", project_id)))?;

        self.commit(|s| {
            let index = s.project_index(project_id)?;
            let mut projects = s.projects.as_ref().clone();
            let project = &mut projects[index];
            project.title = updated.title;
            if patch_description {
                project.description = updated.description;
            }
            project.updated_at = updated.updated_at;
            Some(s.with_projects(projects))
        });
        Ok(())
    }

    /// Delete a project and, through the remote's cascade, its tasks.
    pub async fn remove_project(&self, project_id: &str) -> KanbanResult<()> {
        let email = Self::require_user(&self.state.get())?;

        if !self.remote.delete_project(project_id, &email).await? {
            return Err(KanbanError::Remote(format!(
                "project {} was not deleted",
                project_id
            )));
        }

        tracing::info!("Deleted project {}", project_id);
        self.commit(|s| {
            let index = s.project_index(project_id)?;
            let mut projects = s.projects.as_ref().clone();
            projects.remove(index);
            Some(s.with_projects(projects))
        });
        Ok(())
    }

    /// Move `active_id` to the slot of `over_id` before asking the remote,
    /// restoring the previous order if the remote refuses.
    pub async fn reorder_projects(&self, active_id: &str, over_id: &str) -> KanbanResult<MoveOutcome> {
        let email = Self::require_user(&self.state.get())?;

        let mut found = false;
        let mut orders: Option<(Vec<ProjectId>, Vec<ProjectId>)> = None;
        self.commit(|s| {
            let from = s.project_index(active_id)?;
            let to = s.project_index(over_id)?;
            found = true;
            if from == to {
                return None;
            }
            let moved = array_move(s.projects.as_slice(), from, to);
            let new_order = moved.iter().map(|p| p.id.clone()).collect();
            orders = Some((s.project_ids(), new_order));
            Some(s.with_projects(moved))
        });

        let Some((previous_order, new_order)) = orders else {
            if !found {
                tracing::warn!(
                    "Cannot reorder projects {} -> {}: not on the board",
                    active_id,
                    over_id
                );
                return Ok(MoveOutcome::NotFound);
            }
            return Ok(MoveOutcome::Unchanged);
        };

        let confirmed = match self.remote.reorder_projects(new_order, &email).await {
            Ok(confirmed) => confirmed,
            Err(e) => {
                tracing::warn!("Reordering projects failed: {}", e);
                false
            }
        };
        if confirmed {
            tracing::debug!("Moved project {} to the slot of {}", active_id, over_id);
            return Ok(MoveOutcome::Reordered);
        }

        tracing::warn!("Remote refused project order; rolling back");
        self.commit(|s| Some(s.with_projects(restore_order(&s.projects, &previous_order))));
        Ok(MoveOutcome::RolledBack)
    }

    pub async fn add_task(&self, project_id: &str, draft: TaskDraft) -> KanbanResult<TaskId> {
        let email = Self::require_user(&self.state.get())?;

        let task = self
            .remote
            .create_task(NewTask {
                project_id: project_id.to_string(),
                title: draft.title,
                acting_user_email: email,
                description: draft.description,
                due_date: draft.due_date,
                assignee_id: draft.assignee_id,
                status: Some(draft.status),
            })
            .await?;

        let task_id = task.id.clone();
        tracing::info!("Created task {} ({}) in {}", task.title, task_id, project_id);
        let appended = self.commit(|s| {
            let index = s.project_index(project_id)?;
            let mut projects = s.projects.as_ref().clone();
            projects[index].tasks.push(task);
            Some(s.with_projects(projects))
        });
        if !appended {
            tracing::warn!("Project {} left the board before task {} arrived", project_id, task_id);
        }
        Ok(task_id)
    }

    /// Update a task and replace it wherever it currently lives.
    pub async fn update_task(&self, task_id: &str, update: TaskUpdate) -> KanbanResult<Task> {
        let email = Self::require_user(&self.state.get())?;

        let updated = self.remote.update_task(task_id, update, &email).await?;

        let replacement = updated.clone();
        self.commit(|s| {
            let (pi, ti) = s.locate_task(task_id)?;
            let mut projects = s.projects.as_ref().clone();
            projects[pi].tasks[ti] = replacement;
            Some(s.with_projects(projects))
        });
        Ok(updated)
    }

    pub async fn remove_task(&self, task_id: &str) -> KanbanResult<()> {
        self.remote.delete_task(task_id).await?;

        tracing::info!("Deleted task {}", task_id);
        self.commit(|s| {
            let (pi, ti) = s.locate_task(task_id)?;
            let mut projects = s.projects.as_ref().clone();
            projects[pi].tasks.remove(ti);
            Some(s.with_projects(projects))
        });
        Ok(())
    }

    /// Move a task into `target_project_id`.
    ///
    /// Within the same project the task is re-appended at the tail locally
    /// and nothing is sent. Across projects the remote must confirm first;
    /// a refusal leaves local state untouched. Never returns an error: this
    /// runs mid-gesture, so failures are logged instead.
    pub async fn move_task(&self, task_id: &str, target_project_id: &str) -> MoveOutcome {
        let state = self.state.get();
        let Some(source) = state.project_of_task(task_id) else {
            tracing::warn!("Cannot move task {}: not on the board", task_id);
            return MoveOutcome::NotFound;
        };
        if state.project(target_project_id).is_none() {
            tracing::warn!(
                "Cannot move task {}: project {} not on the board",
                task_id,
                target_project_id
            );
            return MoveOutcome::NotFound;
        }

        if source.id == target_project_id {
            self.commit(|s| {
                let (pi, ti) = s.locate_task(task_id)?;
                if s.projects[pi].id != target_project_id || ti + 1 == s.projects[pi].tasks.len() {
                    return None;
                }
                let mut projects = s.projects.as_ref().clone();
                let task = projects[pi].tasks.remove(ti);
                projects[pi].tasks.push(task);
                Some(s.with_projects(projects))
            });
            return MoveOutcome::Reordered;
        }

        let Some(email) = state.acting_user.clone() else {
            tracing::warn!("Cannot move task {}: no signed-in user", task_id);
            return MoveOutcome::Rejected;
        };
        let source_id = source.id.clone();
        drop(state);

        let moved = match self.remote.move_task(&email, task_id, target_project_id).await {
            Ok(Some(task)) => task,
            Ok(None) => {
                tracing::warn!(
                    "Remote refused moving task {} from {} to {}",
                    task_id,
                    source_id,
                    target_project_id
                );
                return MoveOutcome::Rejected;
            }
            Err(e) => {
                tracing::warn!("Moving task {} failed: {}", task_id, e);
                return MoveOutcome::Rejected;
            }
        };

        // Membership may have changed while the remote call was in flight
        let applied = self.commit(|s| {
            let target = s.project_index(target_project_id)?;
            let (pi, ti) = s.locate_task(task_id)?;
            let mut projects = s.projects.as_ref().clone();
            projects[pi].tasks.remove(ti);
            let mut task = moved;
            task.project_id = target_project_id.to_string();
            projects[target].tasks.push(task);
            Some(s.with_projects(projects))
        });
        if applied {
            tracing::debug!("Moved task {} to project {}", task_id, target_project_id);
            MoveOutcome::Moved
        } else {
            tracing::warn!(
                "Task {} or project {} left the board during the move",
                task_id,
                target_project_id
            );
            MoveOutcome::NotFound
        }
    }
}

/// Put projects back in `order`; projects not listed keep their relative
/// order at the end.
fn restore_order(projects: &[Project], order: &[ProjectId]) -> Vec<Project> {
    let mut restored: Vec<Project> = order
        .iter()
        .filter_map(|id| projects.iter().find(|p| &p.id == id).cloned())
        .collect();
    restored.extend(projects.iter().filter(|p| !order.contains(&p.id)).cloned());
    restored
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_persistence::{FailurePlan, InMemoryRemote, MemorySessionStorage, RemoteCall};

    struct Fixture {
        remote: Arc<InMemoryRemote>,
        store: ProjectStore,
        board_id: String,
        email: String,
    }

    async fn fixture(project_titles: &[&str]) -> Fixture {
        let remote = Arc::new(InMemoryRemote::new());
        let owner = remote.add_user("owner@example.com", None);
        let board = remote.add_board("Roadmap", &owner);
        for title in project_titles {
            remote.insert_project(Project::new(
                board.id.clone(),
                title.to_string(),
                None,
                owner.id.clone(),
            ));
        }
        let store = ProjectStore::new(remote.clone());
        store.sign_in(owner.email.clone());
        store.load_projects(&board.id).await;
        Fixture {
            remote,
            store,
            board_id: board.id,
            email: owner.email,
        }
    }

    fn titles(store: &ProjectStore) -> Vec<String> {
        store.projects().iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn test_restore_order_keeps_unknown_projects() {
        let a = Project::new("b".into(), "A".into(), None, "u".into());
        let b = Project::new("b".into(), "B".into(), None, "u".into());
        let c = Project::new("b".into(), "C".into(), None, "u".into());
        let current = vec![b.clone(), a.clone(), c.clone()];
        let restored = restore_order(&current, &[a.id.clone(), b.id.clone()]);
        assert_eq!(restored, vec![a, b, c]);
    }

    #[tokio::test]
    async fn test_add_project_requires_board_and_user() {
        let store = ProjectStore::new(Arc::new(InMemoryRemote::new()));
        let err = store.add_project("Ops", None).await.unwrap_err();
        assert!(matches!(err, KanbanError::NoBoardSelected));

        store.select_board("board-1");
        let err = store.add_project("Ops", None).await.unwrap_err();
        assert!(matches!(err, KanbanError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_add_project_appends() {
        let f = fixture(&["One"]).await;
        let id = f.store.add_project("Two", Some("second".into())).await.unwrap();
        assert_eq!(titles(&f.store), vec!["One", "Two"]);
        let added = f.store.snapshot().project(&id).cloned().unwrap();
        assert!(added.tasks.is_empty());
        assert_eq!(added.description.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_add_project_remote_refusal_is_error() {
        let f = fixture(&[]).await;
        f.store.sign_in("stranger@example.com");
        let err = f.store.add_project("Nope", None).await.unwrap_err();
        assert!(matches!(err, KanbanError::Remote(_)));
        assert!(f.store.projects().is_empty());
    }

    #[tokio::test]
    async fn test_rename_project_patches_in_place() {
        let f = fixture(&["One", "Two"]).await;
        let id = f.store.projects()[1].id.clone();
        f.store
            .rename_project(&id, "Second", FieldUpdate::Set("desc".into()))
            .await
            .unwrap();
        let snapshot = f.store.snapshot();
        let project = snapshot.project(&id).unwrap();
        assert_eq!(project.title, "Second");
        assert_eq!(project.description.as_deref(), Some("desc"));

        f.store
            .rename_project(&id, "Third", FieldUpdate::NoChange)
            .await
            .unwrap();
        let snapshot = f.store.snapshot();
        assert_eq!(snapshot.project(&id).unwrap().description.as_deref(), Some("desc"));
        assert_eq!(titles(&f.store), vec!["One", "Third"]);
    }

    #[tokio::test]
    async fn test_remove_project_waits_for_remote() {
        let f = fixture(&["One", "Two"]).await;
        let id = f.store.projects()[0].id.clone();

        f.remote.update_failures(|plan| plan.fail_writes = true);
        assert!(f.store.remove_project(&id).await.is_err());
        assert_eq!(titles(&f.store), vec!["One", "Two"]);

        f.remote.set_failures(FailurePlan::default());
        f.store.remove_project(&id).await.unwrap();
        assert_eq!(titles(&f.store), vec!["Two"]);
    }

    #[tokio::test]
    async fn test_reorder_projects_commits_new_order() {
        let f = fixture(&["One", "Two", "Three"]).await;
        let ids = f.store.snapshot().project_ids();

        let outcome = f.store.reorder_projects(&ids[0], &ids[2]).await.unwrap();
        assert_eq!(outcome, MoveOutcome::Reordered);
        assert_eq!(titles(&f.store), vec!["Two", "Three", "One"]);
        assert_eq!(
            f.remote.project_order(&f.board_id),
            vec![ids[1].clone(), ids[2].clone(), ids[0].clone()]
        );
    }

    #[tokio::test]
    async fn test_reorder_projects_is_optimistic() {
        let f = fixture(&["One", "Two"]).await;
        let ids = f.store.snapshot().project_ids();
        let mut rx = f.store.subscribe();
        rx.borrow_and_update();

        f.remote.update_failures(|plan| plan.reject_reorder = true);
        let outcome = f.store.reorder_projects(&ids[0], &ids[1]).await.unwrap();
        assert_eq!(outcome, MoveOutcome::RolledBack);

        // The optimistic order was published before the rollback
        assert!(rx.has_changed().unwrap());
        assert_eq!(titles(&f.store), vec!["One", "Two"]);
    }

    #[tokio::test]
    async fn test_reorder_missing_or_same_project() {
        let f = fixture(&["One", "Two"]).await;
        let ids = f.store.snapshot().project_ids();
        assert_eq!(
            f.store.reorder_projects(&ids[0], "missing").await.unwrap(),
            MoveOutcome::NotFound
        );
        assert_eq!(
            f.store.reorder_projects(&ids[1], &ids[1]).await.unwrap(),
            MoveOutcome::Unchanged
        );
        assert!(f.remote.calls().iter().all(|c| !matches!(c, RemoteCall::ReorderProjects { .. })));
    }

    #[tokio::test]
    async fn test_reorder_requires_user() {
        let f = fixture(&["One", "Two"]).await;
        let ids = f.store.snapshot().project_ids();
        f.store.sign_out();
        let err = f.store.reorder_projects(&ids[0], &ids[1]).await.unwrap_err();
        assert!(err.is_precondition());
    }

    #[tokio::test]
    async fn test_task_lifecycle() {
        let f = fixture(&["One", "Two"]).await;
        let project_id = f.store.projects()[0].id.clone();

        let task_id = f
            .store
            .add_task(
                &project_id,
                TaskDraft::new("Write docs", TaskStatus::Todo).with_description("README"),
            )
            .await
            .unwrap();
        assert_eq!(f.store.snapshot().task(&task_id).unwrap().title, "Write docs");

        let updated = f
            .store
            .update_task(
                &task_id,
                TaskUpdate::title("Write more docs").with_status(TaskStatus::Done),
            )
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Done);
        assert_eq!(f.store.snapshot().task(&task_id), Some(&updated));

        f.store.remove_task(&task_id).await.unwrap();
        assert!(f.store.snapshot().task(&task_id).is_none());
        assert!(f.remote.task(&task_id).is_none());
    }

    #[tokio::test]
    async fn test_update_task_error_propagates() {
        let f = fixture(&["One"]).await;
        let err = f
            .store
            .update_task("missing", TaskUpdate::title("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, KanbanError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_set_filter_leaves_projects_alone() {
        let f = fixture(&["One"]).await;
        let before = f.store.projects();
        f.store.set_filter(FilterUpdate::status(Some(TaskStatus::Done)));
        assert_eq!(f.store.snapshot().filter.status, Some(TaskStatus::Done));
        assert!(Arc::ptr_eq(&before, &f.store.projects()));
    }

    #[tokio::test]
    async fn test_select_board_resets_projects() {
        let f = fixture(&["One"]).await;
        f.store.set_filter(FilterUpdate::search(Some("x".into())));
        f.store.select_board("another-board");
        let state = f.store.snapshot();
        assert!(state.projects.is_empty());
        assert_eq!(state.acting_user.as_deref(), Some(f.email.as_str()));
        assert_eq!(state.filter, Default::default());
    }

    #[tokio::test]
    async fn test_same_project_move_twice_matches_once() {
        let f = fixture(&["One"]).await;
        let project_id = f.store.projects()[0].id.clone();
        let mut ids = Vec::new();
        for title in ["A", "B", "C"] {
            ids.push(
                f.store
                    .add_task(&project_id, TaskDraft::new(title, TaskStatus::Todo))
                    .await
                    .unwrap(),
            );
        }

        assert_eq!(f.store.move_task(&ids[0], &project_id).await, MoveOutcome::Reordered);
        let once = f.store.projects();
        assert_eq!(f.store.move_task(&ids[0], &project_id).await, MoveOutcome::Reordered);

        assert_eq!(f.store.projects(), once);
        let order: Vec<String> = once[0].tasks.iter().map(|t| t.title.clone()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_move_outcome_is_applied() {
        assert!(MoveOutcome::Reordered.is_applied());
        assert!(MoveOutcome::Moved.is_applied());
        assert!(!MoveOutcome::RolledBack.is_applied());
        assert!(!MoveOutcome::Rejected.is_applied());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_queued_snapshots_follow_commit_order() {
        let (store, mut rx) =
            ProjectStore::with_session_saving(Arc::new(InMemoryRemote::new()), None);
        let store = Arc::new(store);

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.sign_in(format!("user{}@example.com", i % 5));
                    store.select_board(format!("board-{}", i % 3));
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let mut last = None;
        while let Ok(snapshot) = rx.try_recv() {
            last = Some(snapshot);
        }
        assert_eq!(last.unwrap(), store.snapshot().to_session());
    }

    #[tokio::test]
    async fn test_session_saving_queues_snapshots() {
        let remote = Arc::new(InMemoryRemote::new());
        let storage = Arc::new(MemorySessionStorage::new());
        let (store, saver) = ProjectStore::hydrate(remote, storage.clone()).await;

        store.sign_in("alice@example.com");
        store.select_board("board-1");
        store.set_filter(FilterUpdate::status(Some(TaskStatus::Todo)));
        drop(store);

        let saves = saver.run().await;
        assert!(saves >= 1);
        let saved = storage.load().await.unwrap().unwrap();
        assert_eq!(saved.board_id.as_deref(), Some("board-1"));
        assert_eq!(saved.acting_user.as_deref(), Some("alice@example.com"));
        assert_eq!(saved.filter.status, Some(TaskStatus::Todo));
    }
}
