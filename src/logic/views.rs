//! Read-only views derived from the session on demand: bench, play-time stats,
//! interval windows and the planned swaps for the current interval.

use crate::models::{GameConfig, Player, PlayerTimeStat, Position, Session};
use serde::Serialize;

/// Seconds as `m:ss`. Minutes keep counting past 59.
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Roster players not currently on court.
pub fn bench_players(session: &Session) -> Vec<&Player> {
    session
        .players
        .iter()
        .filter(|p| !session.active_positions.values().any(|&id| id == p.id))
        .collect()
}

/// Every roster player with accumulated play time, most minutes first.
pub fn player_stats(session: &Session) -> Vec<PlayerTimeStat> {
    let mut stats: Vec<PlayerTimeStat> = session
        .players
        .iter()
        .map(|p| {
            let seconds = session.play_time.get(&p.id).copied().unwrap_or(0);
            PlayerTimeStat {
                id: p.id,
                name: p.name.clone(),
                roles: p.roles.clone(),
                seconds,
                time_formatted: format_time(u64::from(seconds)),
            }
        })
        .collect();
    stats.sort_by(|a, b| b.seconds.cmp(&a.seconds));
    stats
}

/// Time span covered by one substitution interval of a half.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct IntervalWindow {
    /// 1-based interval number.
    pub interval: usize,
    pub start: String,
    pub end: String,
}

/// Windows for every interval of a half, e.g. `Interval 2 (2:30 - 5:00)`.
pub fn interval_windows(config: &GameConfig) -> Vec<IntervalWindow> {
    let step = u64::from(config.substitution_interval_secs);
    (0..config.interval_count())
        .map(|i| {
            let n = i as u64;
            IntervalWindow {
                interval: i + 1,
                start: format_time(n.saturating_mul(step)),
                end: format_time((n + 1).saturating_mul(step)),
            }
        })
        .collect()
}

/// A planned swap with both players resolved, for display.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlannedSwap {
    pub position: Position,
    pub outgoing: String,
    pub incoming: String,
}

/// Planned swaps for the interval the live clock currently points at.
/// Entries with a missing or unknown player are left out.
pub fn planned_substitutions(session: &Session) -> Vec<PlannedSwap> {
    let number = session.clock.current_interval_index + 1;
    let Some(plan) = session.game_plan.interval(session.clock.current_half, number) else {
        return Vec::new();
    };
    plan.subs
        .iter()
        .filter_map(|s| {
            let outgoing = session.get_player(s.outgoing?)?;
            let incoming = session.get_player(s.incoming?)?;
            Some(PlannedSwap {
                position: s.position,
                outgoing: outgoing.name.clone(),
                incoming: incoming.name.clone(),
            })
        })
        .collect()
}

/// Which position each selected starter would take, in selection order.
pub fn lineup_positions(session: &Session) -> Vec<(Position, &Player)> {
    Position::ALL
        .iter()
        .zip(session.starting_lineup.iter())
        .filter_map(|(&pos, &id)| session.get_player(id).map(|p| (pos, p)))
        .collect()
}
