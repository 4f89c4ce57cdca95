//! Setup phase: wizard navigation, form-input config, and starting the game.

use crate::models::{GameConfig, LiveClock, Position, Session, SessionError, SessionPhase, SetupStep};
use chrono::Utc;

/// Jump straight to any setup step (Setup only). Navigation by tab is never gated.
pub fn select_step(session: &mut Session, step: SetupStep) -> Result<(), SessionError> {
    session.ensure_setup()?;
    session.setup_step = step;
    Ok(())
}

/// Advance to the next setup step, enforcing the roster and lineup minimums.
///
/// - players → roles: at least one player per position.
/// - roles → starting: always allowed (roles are optional).
/// - starting → game plan: lineup fills every position.
pub fn continue_setup(session: &mut Session) -> Result<SetupStep, SessionError> {
    session.ensure_setup()?;
    let required = Position::COUNT;
    match session.setup_step {
        SetupStep::Players if session.players.len() < required => {
            return Err(SessionError::NotEnoughPlayers {
                required,
                current: session.players.len(),
            });
        }
        SetupStep::Starting if session.starting_lineup.len() != required => {
            return Err(SessionError::LineupIncomplete {
                required,
                selected: session.starting_lineup.len(),
            });
        }
        _ => {}
    }
    let next = session.setup_step.next().ok_or(SessionError::NoNextStep)?;
    session.setup_step = next;
    Ok(next)
}

/// Apply the half-length form field (whole minutes; bad input falls back to the default).
pub fn set_half_length_input(session: &mut Session, input: &str) -> Result<(), SessionError> {
    session.set_half_length_minutes(GameConfig::parse_half_length_minutes(input))
}

/// Apply the substitution-interval form field (minutes, decimals allowed; bad input falls back to the default).
pub fn set_substitution_interval_input(session: &mut Session, input: &str) -> Result<(), SessionError> {
    session.set_substitution_interval_secs(GameConfig::parse_substitution_interval_secs(input))
}

/// Start the live game: seat the starting lineup in position order, clear play time,
/// and reset the countdown. The clock stays paused until started.
pub fn start_game(session: &mut Session) -> Result<(), SessionError> {
    session.ensure_setup()?;
    let required = Position::COUNT;
    if session.starting_lineup.len() != required {
        return Err(SessionError::LineupIncomplete {
            required,
            selected: session.starting_lineup.len(),
        });
    }

    session.active_positions = Position::ALL
        .iter()
        .zip(session.starting_lineup.iter())
        .filter(|(_, id)| session.get_player(**id).is_some())
        .map(|(&pos, &id)| (pos, id))
        .collect();
    session.play_time.clear();
    session.clock = LiveClock::new(session.config.substitution_interval_secs);
    session.phase = SessionPhase::Live;
    session.started_at = Some(Utc::now());

    log::info!(
        "Session {} started: {} intervals of {}s per half",
        session.id,
        session.interval_count(),
        session.config.substitution_interval_secs
    );
    Ok(())
}
