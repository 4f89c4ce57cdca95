//! Game plan editing: planned substitutions keyed by half, interval number and position.
//!
//! No cross-checks happen here; the same player may appear in several entries.
//! Whether an entry can actually be applied is decided by the live clock.

use crate::models::{Half, PlayerId, Position, Session, SessionError};

/// Set who comes off at `position` in the given interval (Setup only).
pub fn set_outgoing(
    session: &mut Session,
    half: Half,
    interval: usize,
    position: Position,
    player_id: Option<PlayerId>,
) -> Result<(), SessionError> {
    session.ensure_setup()?;
    session
        .game_plan
        .set_outgoing(half, interval, position, player_id);
    Ok(())
}

/// Set who goes on at `position` in the given interval (Setup only).
pub fn set_incoming(
    session: &mut Session,
    half: Half,
    interval: usize,
    position: Position,
    player_id: Option<PlayerId>,
) -> Result<(), SessionError> {
    session.ensure_setup()?;
    session
        .game_plan
        .set_incoming(half, interval, position, player_id);
    Ok(())
}

/// Remove the planned substitution at `position` (Setup only).
pub fn clear_entry(
    session: &mut Session,
    half: Half,
    interval: usize,
    position: Position,
) -> Result<(), SessionError> {
    session.ensure_setup()?;
    session.game_plan.clear_entry(half, interval, position);
    Ok(())
}
