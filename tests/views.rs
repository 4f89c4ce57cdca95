//! Integration tests for derived views: time formatting, bench, stats, interval windows.

use rotation_planner_web::{
    bench_players, format_time, interval_windows, lineup_positions, planned_substitutions,
    player_stats, select_interval, start_clock, start_game, tick, GameConfig, Half, Player,
    PlayerId, Position, Session,
};

fn started_session(n: usize) -> (Session, Vec<PlayerId>) {
    let players: Vec<Player> = (1..=n).map(|i| Player::new(format!("P{i}"))).collect();
    let mut s = Session::with_players(players, GameConfig::default());
    let ids: Vec<PlayerId> = s.players.iter().map(|p| p.id).collect();
    for &id in ids.iter().take(5) {
        s.toggle_starting(id).unwrap();
    }
    (s, ids)
}

#[test]
fn format_time_pads_seconds() {
    assert_eq!(format_time(125), "2:05");
    assert_eq!(format_time(59), "0:59");
    assert_eq!(format_time(0), "0:00");
    assert_eq!(format_time(3600), "60:00");
}

#[test]
fn bench_is_everyone_off_court() {
    let (mut s, ids) = started_session(7);
    start_game(&mut s).unwrap();
    let bench: Vec<PlayerId> = bench_players(&s).iter().map(|p| p.id).collect();
    assert_eq!(bench, vec![ids[5], ids[6]]);
}

#[test]
fn stats_sorted_by_play_time() {
    let (mut s, ids) = started_session(6);
    start_game(&mut s).unwrap();
    start_clock(&mut s).unwrap();
    for _ in 0..65 {
        tick(&mut s);
    }
    s.play_time.insert(ids[5], 90);

    let stats = player_stats(&s);
    assert_eq!(stats.len(), 6);
    assert_eq!(stats[0].id, ids[5]);
    assert_eq!(stats[0].time_formatted, "1:30");
    assert!(stats[1..].iter().all(|st| st.seconds == 65));
    assert_eq!(stats[1].time_formatted, "1:05");
}

#[test]
fn interval_windows_cover_the_half() {
    let windows = interval_windows(&GameConfig::default());
    assert_eq!(windows.len(), 7);
    assert_eq!(windows[0].interval, 1);
    assert_eq!(windows[0].start, "0:00");
    assert_eq!(windows[0].end, "2:30");
    assert_eq!(windows[6].start, "15:00");
    assert_eq!(windows[6].end, "17:30");
}

#[test]
fn interval_windows_do_not_overflow_for_wide_configs() {
    let config = GameConfig {
        half_length_minutes: u32::MAX,
        substitution_interval_secs: 70_000_000,
    };
    let windows = interval_windows(&config);
    assert_eq!(windows.len(), 3681);
    assert_eq!(windows[3680].end, "4294500000:00");
    assert_eq!(format_time(u64::from(u32::MAX) * 2), "143165576:30");
}

#[test]
fn planned_substitutions_shows_resolved_swaps_for_current_interval() {
    let (mut s, ids) = started_session(6);
    s.game_plan
        .set_outgoing(Half::First, 3, Position::PF, Some(ids[3]));
    s.game_plan
        .set_incoming(Half::First, 3, Position::PF, Some(ids[5]));
    s.game_plan
        .set_outgoing(Half::First, 3, Position::C, Some(ids[4]));
    start_game(&mut s).unwrap();

    assert!(planned_substitutions(&s).is_empty());

    select_interval(&mut s, 2).unwrap();
    let planned = planned_substitutions(&s);
    assert_eq!(planned.len(), 1);
    assert_eq!(planned[0].position, Position::PF);
    assert_eq!(planned[0].outgoing, "P4");
    assert_eq!(planned[0].incoming, "P6");
}

#[test]
fn lineup_preview_follows_selection_order() {
    let (mut s, ids) = started_session(6);
    s.toggle_starting(ids[0]).unwrap();
    s.toggle_starting(ids[5]).unwrap();
    let preview: Vec<(Position, PlayerId)> = lineup_positions(&s)
        .into_iter()
        .map(|(pos, p)| (pos, p.id))
        .collect();
    assert_eq!(
        preview,
        vec![
            (Position::PG, ids[1]),
            (Position::SG, ids[2]),
            (Position::SF, ids[3]),
            (Position::PF, ids[4]),
            (Position::C, ids[5]),
        ]
    );
}
