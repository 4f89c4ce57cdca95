//! Player and PlayerTimeStat data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in lineups, plans and the play-time ledger).
pub type PlayerId = Uuid;

/// A roster player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Role labels assigned to this player, in the order they were toggled on.
    pub roles: Vec<String>,
}

impl Player {
    /// Create a new player with the given name and no roles.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            roles: Vec::new(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Assign the role if missing, unassign it otherwise.
    pub fn toggle_role(&mut self, role: &str) {
        if self.has_role(role) {
            self.roles.retain(|r| r != role);
        } else {
            self.roles.push(role.to_string());
        }
    }

    pub fn remove_role(&mut self, role: &str) {
        self.roles.retain(|r| r != role);
    }
}

/// Play-time view of a player (for API / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerTimeStat {
    pub id: PlayerId,
    pub name: String,
    pub roles: Vec<String>,
    pub seconds: u32,
    /// `m:ss` rendering of `seconds`.
    pub time_formatted: String,
}
