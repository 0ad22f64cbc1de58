use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

pub type BoardId = String;

/// A board owns an ordered sequence of projects. The order itself is held by
/// whoever lists the board's projects; the board only carries ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: UserId,
    #[serde(default)]
    pub member_ids: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    pub fn new(title: String, description: Option<String>, owner_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: crate::new_id(),
            title,
            description,
            owner_id,
            member_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_member(&mut self, user_id: UserId) {
        if user_id != self.owner_id && !self.member_ids.contains(&user_id) {
            self.member_ids.push(user_id);
            self.updated_at = Utc::now();
        }
    }

    pub fn is_accessible_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id || self.member_ids.iter().any(|m| m == user_id)
    }
}
