//! Button payload grammar and roster rendering properties. No live
//! infrastructure.

#![allow(non_snake_case)]

use chrono::{NaiveDate, NaiveTime};

use VolleyBuddy::handlers::callbacks::{parse_id_suffix, parse_two_ids};
use VolleyBuddy::models::game::GamePlayerDetails;
use VolleyBuddy::utils::format::{places_left, render_roster_lines, sort_roster};

fn player(name: &str, confirmed: bool, guest: bool) -> GamePlayerDetails {
    GamePlayerDetails {
        game_id: 1,
        user_db_id: 1,
        telegram_user_id: 100,
        first_name: name.to_string(),
        last_name: None,
        username: None,
        confirmed_attendance: confirmed,
        is_guest: guest,
        game_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        game_starts: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        game_ends: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        place: "Спортзал".to_string(),
        label: "понедельник".to_string(),
        users_limit: 2,
    }
}

#[test]
fn public_payloads_carry_one_game_id() {
    for prefix in ["appointment_", "notconfirmed_", "decline_", "deactivegame_"] {
        let payload = format!("{prefix}42");
        assert_eq!(parse_id_suffix(&payload, prefix), 42);
    }
}

#[test]
fn private_payloads_carry_chat_and_game_id() {
    // group chat ids are negative
    assert_eq!(parse_two_ids("privateAppointment_-1001234_42"), (-1001234, 42));
    assert_eq!(parse_two_ids("privateNotconfirmed_-1001234_42"), (-1001234, 42));
    assert_eq!(parse_two_ids("privateDecline_-1001234_42"), (-1001234, 42));
}

#[test]
fn selection_payloads_carry_game_and_user_row_id() {
    assert_eq!(parse_two_ids("confirmplayer_9_31"), (9, 31));
    assert_eq!(parse_two_ids("unconfirmplayer_9_31"), (9, 31));
    assert_eq!(parse_two_ids("deleteguest_9_31"), (9, 31));
}

#[test]
fn cross_group_selection_payloads_parse_the_target_chat() {
    assert_eq!(
        parse_id_suffix("selectedGroupForStartGame_-1009", "selectedGroupForStartGame_"),
        -1009
    );
    assert_eq!(
        parse_id_suffix("selectedGroupForDeactiveGame_-1009", "selectedGroupForDeactiveGame_"),
        -1009
    );
}

#[test]
fn malformed_numeric_fields_coerce_to_zero() {
    // the router proceeds with id 0 rather than rejecting; real ids start
    // at 1, so the lookup comes back empty
    assert_eq!(parse_id_suffix("appointment_abc", "appointment_"), 0);
    assert_eq!(parse_id_suffix("appointment_", "appointment_"), 0);
    assert_eq!(parse_two_ids("privateAppointment_x_y"), (0, 0));
    assert_eq!(parse_two_ids("privateAppointment_-100"), (-100, 0));
}

#[test]
fn roster_orders_confirmed_first_with_stable_ties() {
    let mut roster = vec![
        player("первый-неточно", false, false),
        player("первый-точно", true, false),
        player("второй-неточно", false, false),
        player("второй-точно", true, false),
    ];
    sort_roster(&mut roster);
    let order: Vec<&str> = roster.iter().map(|p| p.first_name.as_str()).collect();
    assert_eq!(
        order,
        ["первый-точно", "второй-точно", "первый-неточно", "второй-неточно"]
    );
}

#[test]
fn wait_list_marker_lands_exactly_at_the_limit() {
    // five sign-ups against a limit of two: nothing is rejected, the
    // render simply draws the separator after the second line
    let mut roster = vec![
        player("а", true, false),
        player("б", true, false),
        player("в", false, false),
        player("г", true, false),
        player("д", false, false),
    ];
    sort_roster(&mut roster);
    let rendered = render_roster_lines(&roster, 2);
    let lines: Vec<&str> = rendered.lines().collect();

    assert!(lines[0].contains('а'));
    assert!(lines[1].contains('б'));
    assert!(lines[3].contains("Wait list"));
    assert!(lines[4].contains('г'));
    assert_eq!(lines.len(), 7);
}

#[test]
fn under_capacity_roster_has_no_marker_and_positive_remainder() {
    let roster = vec![player("а", true, false), player("б", false, true)];
    let rendered = render_roster_lines(&roster, 10);
    assert!(!rendered.contains("Wait list"));
    assert_eq!(places_left(10, roster.len()), 8);
}

#[test]
fn remaining_places_never_go_negative() {
    assert_eq!(places_left(2, 5), 0);
}
