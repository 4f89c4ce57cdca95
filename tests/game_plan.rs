//! Integration tests for the game plan editor.

use rotation_planner_web::{
    clear_entry, set_incoming, set_outgoing, start_game, GameConfig, Half, Player, Position,
    Session, SessionError, SubstitutionEntry,
};

fn session_with_players(n: usize) -> Session {
    let players: Vec<Player> = (1..=n).map(|i| Player::new(format!("P{i}"))).collect();
    Session::with_players(players, GameConfig::default())
}

#[test]
fn outgoing_then_incoming_fill_the_same_entry() {
    let mut s = session_with_players(6);
    let (p1, p6) = (s.players[0].id, s.players[5].id);

    set_outgoing(&mut s, Half::First, 3, Position::SF, Some(p1)).unwrap();
    let plan = s.game_plan.interval(Half::First, 3).unwrap();
    assert_eq!(
        plan.subs,
        vec![SubstitutionEntry {
            position: Position::SF,
            outgoing: Some(p1),
            incoming: None,
        }]
    );
    assert!(!plan.subs[0].is_complete());

    set_incoming(&mut s, Half::First, 3, Position::SF, Some(p6)).unwrap();
    let plan = s.game_plan.interval(Half::First, 3).unwrap();
    assert_eq!(plan.subs.len(), 1);
    assert!(plan.subs[0].is_complete());
    assert_eq!(plan.entry(Position::SF).unwrap().incoming, Some(p6));

    // Other half untouched
    assert!(s.game_plan.interval(Half::Second, 3).unwrap().subs.is_empty());
}

#[test]
fn incoming_first_creates_entry_with_empty_outgoing() {
    let mut s = session_with_players(6);
    let p6 = s.players[5].id;
    set_incoming(&mut s, Half::Second, 1, Position::C, Some(p6)).unwrap();
    let entry = s
        .game_plan
        .interval(Half::Second, 1)
        .unwrap()
        .entry(Position::C)
        .unwrap();
    assert_eq!(entry.outgoing, None);
    assert_eq!(entry.incoming, Some(p6));
}

#[test]
fn clear_entry_removes_regardless_of_fill() {
    let mut s = session_with_players(6);
    let p1 = s.players[0].id;
    set_outgoing(&mut s, Half::First, 2, Position::PG, Some(p1)).unwrap();
    set_outgoing(&mut s, Half::First, 2, Position::SG, Some(p1)).unwrap();

    clear_entry(&mut s, Half::First, 2, Position::PG).unwrap();

    let plan = s.game_plan.interval(Half::First, 2).unwrap();
    assert!(plan.entry(Position::PG).is_none());
    assert!(plan.entry(Position::SG).is_some());
}

#[test]
fn unknown_interval_is_ignored() {
    let mut s = session_with_players(6);
    let p1 = s.players[0].id;
    let before = s.game_plan.clone();
    set_outgoing(&mut s, Half::First, 0, Position::PG, Some(p1)).unwrap();
    set_incoming(&mut s, Half::First, 99, Position::PG, Some(p1)).unwrap();
    assert_eq!(s.game_plan, before);
}

#[test]
fn same_player_may_appear_in_several_entries() {
    let mut s = session_with_players(6);
    let p1 = s.players[0].id;
    set_outgoing(&mut s, Half::First, 2, Position::PG, Some(p1)).unwrap();
    set_incoming(&mut s, Half::First, 2, Position::SG, Some(p1)).unwrap();
    set_incoming(&mut s, Half::First, 2, Position::PG, Some(p1)).unwrap();
    assert_eq!(s.game_plan.interval(Half::First, 2).unwrap().subs.len(), 2);
}

#[test]
fn plan_is_locked_while_live() {
    let mut s = session_with_players(5);
    let ids: Vec<_> = s.players.iter().map(|p| p.id).collect();
    for &id in &ids {
        s.toggle_starting(id).unwrap();
    }
    start_game(&mut s).unwrap();
    assert_eq!(
        set_outgoing(&mut s, Half::First, 2, Position::PG, Some(ids[0])),
        Err(SessionError::InvalidState)
    );
}

#[test]
fn half_deserializes_only_from_one_or_two() {
    let half: Half = serde_json::from_str("2").unwrap();
    assert_eq!(half, Half::Second);
    assert_eq!(serde_json::to_string(&Half::First).unwrap(), "1");
    assert!(serde_json::from_str::<Half>("3").is_err());
}
