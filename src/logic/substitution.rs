//! Manual substitution during the live game, bypassing the plan.

use crate::models::{Position, Session, SessionError};

/// Swap a player off the court by display name (names are assumed unique).
///
/// The outgoing name is looked up among on-court players, the incoming name among the
/// whole roster. If either does not resolve nothing changes and `Ok(None)` is returned;
/// otherwise the position that was swapped is returned. Future automatic substitutions
/// are unaffected.
pub fn manual_substitution(
    session: &mut Session,
    outgoing_name: &str,
    incoming_name: &str,
) -> Result<Option<Position>, SessionError> {
    session.ensure_live()?;
    if outgoing_name.is_empty() || incoming_name.is_empty() {
        return Ok(None);
    }

    let outgoing = session
        .active_positions
        .values()
        .filter_map(|&id| session.get_player(id))
        .find(|p| p.name == outgoing_name)
        .map(|p| p.id);
    let incoming = session
        .players
        .iter()
        .find(|p| p.name == incoming_name)
        .map(|p| p.id);
    let (Some(outgoing_id), Some(incoming_id)) = (outgoing, incoming) else {
        return Ok(None);
    };

    let position = session
        .active_positions
        .iter()
        .find(|(_, id)| **id == outgoing_id)
        .map(|(&pos, _)| pos);
    if let Some(pos) = position {
        session.active_positions.insert(pos, incoming_id);
        log::info!(
            "Session {}: manual substitution at {}: {} -> {}",
            session.id,
            pos,
            outgoing_name,
            incoming_name
        );
    }
    Ok(position)
}
