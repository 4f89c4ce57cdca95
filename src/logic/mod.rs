//! Rotation planner business logic: setup wizard, game plan, live clock, views.

mod clock;
mod game_plan;
mod setup;
mod substitution;
mod views;

pub use clock::{
    next_half, pause_clock, reset_game, select_interval, start_clock, tick, toggle_clock,
};
pub use game_plan::{clear_entry, set_incoming, set_outgoing};
pub use setup::{
    continue_setup, select_step, set_half_length_input, set_substitution_interval_input,
    start_game,
};
pub use substitution::manual_substitution;
pub use views::{
    bench_players, format_time, interval_windows, lineup_positions, planned_substitutions,
    player_stats, IntervalWindow, PlannedSwap,
};
