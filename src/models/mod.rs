//! Data structures for the rotation planner: players, positions, game plan, session state.

mod court;
mod plan;
mod player;
mod session;

pub use court::{Half, Position};
pub use plan::{
    GameConfig, GamePlan, IntervalPlan, SubstitutionEntry, DEFAULT_HALF_LENGTH_MINUTES,
    DEFAULT_SUBSTITUTION_INTERVAL_SECS, HALF_LENGTH_MINUTES_RANGE, SUBSTITUTION_INTERVAL_SECS_RANGE,
};
pub use player::{Player, PlayerId, PlayerTimeStat};
pub use session::{
    LiveClock, Session, SessionError, SessionId, SessionPhase, SetupStep, MAX_PLAYERS,
};
