use kanban_domain::{BoardId, Project, TaskFilters};
use serde::{Deserialize, Serialize};

/// Session format version written into storage envelopes.
pub const SESSION_FORMAT_VERSION: u32 = 1;

/// What survives a restart: the selected board, the signed-in user, the
/// filter and the last known projects with their tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub board_id: Option<BoardId>,
    #[serde(default)]
    pub acting_user: Option<String>,
    #[serde(default)]
    pub filter: TaskFilters,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl SessionSnapshot {
    pub fn is_empty(&self) -> bool {
        self.board_id.is_none() && self.acting_user.is_none() && self.projects.is_empty()
    }
}
