//! Basketball rotation planner: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    bench_players, clear_entry, continue_setup, format_time, interval_windows, lineup_positions,
    manual_substitution, next_half, pause_clock, planned_substitutions, player_stats, reset_game,
    select_interval, select_step, set_half_length_input, set_incoming, set_outgoing,
    set_substitution_interval_input, start_clock, start_game, tick, toggle_clock, IntervalWindow,
    PlannedSwap,
};
pub use models::{
    GameConfig, GamePlan, Half, IntervalPlan, LiveClock, Player, PlayerId, PlayerTimeStat,
    Position, Session, SessionError, SessionId, SessionPhase, SetupStep, SubstitutionEntry,
    DEFAULT_HALF_LENGTH_MINUTES, DEFAULT_SUBSTITUTION_INTERVAL_SECS, HALF_LENGTH_MINUTES_RANGE,
    MAX_PLAYERS, SUBSTITUTION_INTERVAL_SECS_RANGE,
};
