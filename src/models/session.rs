//! Session, SessionPhase, SetupStep and LiveClock.

use crate::models::court::{Half, Position};
use crate::models::plan::{GameConfig, GamePlan};
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Roster cap; adding beyond it is ignored.
pub const MAX_PLAYERS: usize = 15;

/// Errors that can occur during session operations.
///
/// Bad form input (blank names, duplicate roles, unparsable numbers) is not an error;
/// those inputs are ignored or replaced by defaults.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// Session is not in a phase that allows this action.
    InvalidState,
    /// Too few players on the roster to leave the players step.
    NotEnoughPlayers { required: usize, current: usize },
    /// Starting lineup does not fill every position.
    LineupIncomplete { required: usize, selected: usize },
    /// The game plan step is the last setup step; use start instead.
    NoNextStep,
    /// Half number other than 1 or 2.
    InvalidHalf(u8),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InvalidState => write!(f, "Invalid state for this action"),
            SessionError::NotEnoughPlayers { required, current } => {
                write!(f, "Need at least {} players ({}/{})", required, current, required)
            }
            SessionError::LineupIncomplete { required, selected } => {
                write!(f, "Select {} players to start the game ({}/{})", required, selected, required)
            }
            SessionError::NoNextStep => write!(f, "Game plan is the last setup step"),
            SessionError::InvalidHalf(n) => write!(f, "Half must be 1 or 2 (got {})", n),
        }
    }
}

impl std::error::Error for SessionError {}

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// Whether the organizer is still setting up or the game is running.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Setup,
    Live,
}

/// Setup wizard step. Any step can be selected; "continue" is gated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    #[default]
    Players,
    Roles,
    Starting,
    GamePlan,
}

impl SetupStep {
    pub const ALL: [SetupStep; 4] = [
        SetupStep::Players,
        SetupStep::Roles,
        SetupStep::Starting,
        SetupStep::GamePlan,
    ];

    pub fn next(self) -> Option<SetupStep> {
        match self {
            SetupStep::Players => Some(SetupStep::Roles),
            SetupStep::Roles => Some(SetupStep::Starting),
            SetupStep::Starting => Some(SetupStep::GamePlan),
            SetupStep::GamePlan => None,
        }
    }
}

/// Runtime clock state for the live game.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LiveClock {
    pub current_half: Half,
    /// 0-based; interval number `current_interval_index + 1` in the plan.
    pub current_interval_index: usize,
    /// Seconds left until the next substitution boundary.
    pub time_until_next_sub: u32,
    pub running: bool,
}

impl LiveClock {
    pub fn new(substitution_interval_secs: u32) -> Self {
        Self {
            current_half: Half::First,
            current_interval_index: 0,
            time_until_next_sub: substitution_interval_secs,
            running: false,
        }
    }
}

/// Full session state: roster, setup progress, plan, and live game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub phase: SessionPhase,
    pub setup_step: SetupStep,
    pub players: Vec<Player>,
    /// Role labels available for tagging players.
    pub roles: Vec<String>,
    /// Selected starters in selection order (PG first).
    pub starting_lineup: Vec<PlayerId>,
    pub config: GameConfig,
    pub game_plan: GamePlan,
    /// Who currently occupies each position.
    pub active_positions: BTreeMap<Position, PlayerId>,
    /// Cumulative on-court seconds per player.
    pub play_time: HashMap<PlayerId, u32>,
    pub clock: LiveClock,
    /// When the current live game was started.
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Session {
    /// Create a new session in Setup with an empty roster and an empty plan.
    pub fn new(config: GameConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: SessionPhase::Setup,
            setup_step: SetupStep::Players,
            players: Vec::new(),
            roles: Vec::new(),
            starting_lineup: Vec::new(),
            config,
            game_plan: GamePlan::new(config.interval_count()),
            active_positions: BTreeMap::new(),
            play_time: HashMap::new(),
            clock: LiveClock::new(config.substitution_interval_secs),
            started_at: None,
        }
    }

    /// Create a session with an initial roster. Still in Setup.
    pub fn with_players(players: Vec<Player>, config: GameConfig) -> Self {
        Self {
            players,
            ..Self::new(config)
        }
    }

    pub fn interval_count(&self) -> usize {
        self.config.interval_count()
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Live game with the clock ticking.
    pub fn is_clock_running(&self) -> bool {
        self.phase == SessionPhase::Live && self.clock.running
    }

    /// Error unless the session is still being set up.
    pub fn ensure_setup(&self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Setup {
            return Err(SessionError::InvalidState);
        }
        Ok(())
    }

    /// Error unless the game is live.
    pub fn ensure_live(&self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Live {
            return Err(SessionError::InvalidState);
        }
        Ok(())
    }

    /// Add a player (Setup only). Blank names and a full roster are ignored (`Ok(None)`).
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<Option<PlayerId>, SessionError> {
        self.ensure_setup()?;
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() || self.players.len() >= MAX_PLAYERS {
            return Ok(None);
        }
        let player = Player::new(name_trimmed);
        let id = player.id;
        self.players.push(player);
        Ok(Some(id))
    }

    /// Remove a player by id (Setup only); also drops them from the starting lineup.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), SessionError> {
        self.ensure_setup()?;
        self.players.retain(|p| p.id != player_id);
        self.starting_lineup.retain(|&id| id != player_id);
        Ok(())
    }

    /// Add a role label (Setup only). Blank and duplicate labels are ignored.
    pub fn add_role(&mut self, name: impl Into<String>) -> Result<bool, SessionError> {
        self.ensure_setup()?;
        let name = name.into();
        let role = name.trim();
        if role.is_empty() || self.roles.iter().any(|r| r == role) {
            return Ok(false);
        }
        self.roles.push(role.to_string());
        Ok(true)
    }

    /// Remove a role label and unassign it from every player (Setup only).
    pub fn remove_role(&mut self, role: &str) -> Result<(), SessionError> {
        self.ensure_setup()?;
        self.roles.retain(|r| r != role);
        for p in &mut self.players {
            p.remove_role(role);
        }
        Ok(())
    }

    /// Toggle a known role on a player (Setup only). Unknown roles or players are ignored.
    pub fn toggle_player_role(&mut self, player_id: PlayerId, role: &str) -> Result<(), SessionError> {
        self.ensure_setup()?;
        if !self.roles.iter().any(|r| r == role) {
            return Ok(());
        }
        if let Some(p) = self.get_player_mut(player_id) {
            p.toggle_role(role);
        }
        Ok(())
    }

    /// Select or deselect a starter (Setup only). Selection is capped at the number of positions.
    pub fn toggle_starting(&mut self, player_id: PlayerId) -> Result<(), SessionError> {
        self.ensure_setup()?;
        if self.starting_lineup.contains(&player_id) {
            self.starting_lineup.retain(|&id| id != player_id);
        } else if self.starting_lineup.len() < Position::COUNT && self.get_player(player_id).is_some() {
            self.starting_lineup.push(player_id);
        }
        Ok(())
    }

    /// Set the half length (Setup only). Out-of-range values fall back to the default.
    /// Rebuilds an empty plan if the interval count changes.
    pub fn set_half_length_minutes(&mut self, minutes: u32) -> Result<(), SessionError> {
        self.ensure_setup()?;
        let config = GameConfig {
            half_length_minutes: GameConfig::checked_half_length_minutes(minutes),
            ..self.config
        };
        self.apply_config(config);
        Ok(())
    }

    /// Set the substitution interval (Setup only). Out-of-range values fall back to the default.
    /// Rebuilds an empty plan if the interval count changes.
    pub fn set_substitution_interval_secs(&mut self, secs: u32) -> Result<(), SessionError> {
        self.ensure_setup()?;
        let config = GameConfig {
            substitution_interval_secs: GameConfig::checked_substitution_interval_secs(secs),
            ..self.config
        };
        self.apply_config(config);
        Ok(())
    }

    fn apply_config(&mut self, config: GameConfig) {
        let previous_count = self.interval_count();
        self.config = config;
        self.clock.time_until_next_sub = config.substitution_interval_secs;
        let count = config.interval_count();
        if count != previous_count {
            log::debug!(
                "Interval count changed {} -> {}; game plan reset for session {}",
                previous_count,
                count,
                self.id
            );
            self.game_plan = GamePlan::new(count);
        }
    }
}
