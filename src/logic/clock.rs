//! Live clock: per-second ticks, automatic substitutions at interval boundaries,
//! half changes and reset.

use crate::models::{Half, LiveClock, PlayerId, Position, Session, SessionError, SessionPhase};
use std::collections::BTreeSet;

/// Resume the clock (Live only).
pub fn start_clock(session: &mut Session) -> Result<(), SessionError> {
    session.ensure_live()?;
    session.clock.running = true;
    Ok(())
}

/// Pause the clock (Live only). No tick fires while paused.
pub fn pause_clock(session: &mut Session) -> Result<(), SessionError> {
    session.ensure_live()?;
    session.clock.running = false;
    Ok(())
}

/// Flip between running and paused (Live only). Returns the new running flag.
pub fn toggle_clock(session: &mut Session) -> Result<bool, SessionError> {
    session.ensure_live()?;
    session.clock.running = !session.clock.running;
    Ok(session.clock.running)
}

/// Advance the live game by one second.
///
/// Play time is credited to the current on-court players before any substitution
/// at this boundary, so outgoing players are paid for the boundary second.
/// Does nothing unless the game is live and the clock is running.
pub fn tick(session: &mut Session) {
    if session.phase != SessionPhase::Live || !session.clock.running {
        return;
    }

    // A player planned into two positions is still only on court once.
    let on_court: BTreeSet<PlayerId> = session.active_positions.values().copied().collect();
    for id in on_court {
        *session.play_time.entry(id).or_insert(0) += 1;
    }

    if session.clock.time_until_next_sub <= 1 {
        apply_automatic_substitution(session);
        session.clock.time_until_next_sub = session.config.substitution_interval_secs;
    } else {
        session.clock.time_until_next_sub -= 1;
    }
}

/// Move to the next interval of the current half and apply its complete entries.
///
/// At the last interval nothing changes; the half has to be advanced by hand.
/// Entries missing a side, or whose incoming player is not on the roster, are skipped.
fn apply_automatic_substitution(session: &mut Session) {
    let next_index = session.clock.current_interval_index + 1;
    if next_index >= session.interval_count() {
        log::debug!(
            "Session {}: no interval after {} in half {}",
            session.id,
            next_index,
            session.clock.current_half.number()
        );
        return;
    }
    session.clock.current_interval_index = next_index;

    let half = session.clock.current_half;
    let Some(plan) = session.game_plan.interval(half, next_index + 1) else {
        return;
    };

    let swaps: Vec<(Position, PlayerId)> = plan
        .subs
        .iter()
        .filter(|s| s.is_complete())
        .filter_map(|s| {
            let incoming = session.get_player(s.incoming?)?;
            Some((s.position, incoming.id))
        })
        .collect();

    for &(position, player_id) in &swaps {
        session.active_positions.insert(position, player_id);
    }
    log::info!(
        "Session {}: half {} interval {} started, {} substitution(s) applied",
        session.id,
        half.number(),
        next_index + 1,
        swaps.len()
    );
}

/// Point the live clock at another interval of the current half (Live only).
/// Indices past the last interval are ignored.
pub fn select_interval(session: &mut Session, index: usize) -> Result<(), SessionError> {
    session.ensure_live()?;
    if index < session.interval_count() {
        session.clock.current_interval_index = index;
    }
    Ok(())
}

/// Switch to the second half: back to the first interval, countdown reset, clock paused.
/// Play time and on-court players carry over.
pub fn next_half(session: &mut Session) -> Result<(), SessionError> {
    session.ensure_live()?;
    session.clock.current_half = Half::Second;
    session.clock.current_interval_index = 0;
    session.clock.time_until_next_sub = session.config.substitution_interval_secs;
    session.clock.running = false;
    log::info!("Session {}: second half", session.id);
    Ok(())
}

/// End the live game and return to setup. Play time is wiped; the plan and the
/// last on-court assignment are kept.
pub fn reset_game(session: &mut Session) -> Result<(), SessionError> {
    session.ensure_live()?;
    session.clock = LiveClock::new(session.config.substitution_interval_secs);
    session.play_time.clear();
    session.phase = SessionPhase::Setup;
    session.started_at = None;
    log::info!("Session {} reset to setup", session.id);
    Ok(())
}
