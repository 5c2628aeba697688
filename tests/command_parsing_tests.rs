//! Command vocabulary and argument parsing, end to end through the
//! normalizer, the registry and the validators. No live infrastructure.

#![allow(non_snake_case)]

use VolleyBuddy::handlers::messages::normalize_text;
use VolleyBuddy::utils::validation::{
    parse_add_guest, parse_add_joke, parse_change_limit, parse_edit_joke, parse_game_args,
    parse_user_edit,
};

const BOT_NAME: &str = "volleybuddybot";

#[test]
fn slash_command_with_botname_suffix_normalizes() {
    assert_eq!(normalize_text("/REGISTER@VolleyBuddyBot", BOT_NAME), "/register");
    assert_eq!(normalize_text("/menu", BOT_NAME), "/menu");
}

#[test]
fn natural_language_trigger_survives_normalization() {
    assert_eq!(normalize_text("Во Сколько игра?", BOT_NAME), "во сколько игра?");
}

#[test]
fn startgame_arguments_parse_through_normalization() {
    let normalized = normalize_text(
        "/startgame@VolleyBuddyBot 01.01.2025/18:00/20:00/2/Gym/понедельник",
        BOT_NAME,
    );
    let args = normalized.strip_prefix("/startgame").unwrap().trim();
    let request = parse_game_args(args).expect("well-formed game arguments");
    assert_eq!(request.users_limit, 2);
    assert_eq!(request.place, "gym");
    assert_eq!(request.label, "понедельник");
}

#[test]
fn startgame_field_count_is_enforced() {
    assert!(parse_game_args("01.01.2025/18:00/20:00/2/Gym").is_none());
    assert!(parse_game_args("01.01.2025/18:00/20:00/2/Gym/среда/лишнее").is_none());
    assert!(parse_game_args("").is_none());
}

#[test]
fn startgame_rejects_malformed_fields_without_state_change() {
    // shapes that must yield a usage message upstream, never a panic
    for bad in [
        "2025.01.01/18:00/20:00/2/Gym/среда",
        "01.01.2025/6pm/20:00/2/Gym/среда",
        "01.01.2025/18:00/20:00/двенадцать/Gym/среда",
        "01.01.2025/18:00/20:00/-3/Gym/среда",
        "01.01.2025/18:00/20:00/2//среда",
        "01.01.2025/18:00/20:00/2/Gym/",
    ] {
        assert!(parse_game_args(bad).is_none(), "accepted malformed: {bad}");
    }
}

#[test]
fn changelimit_distinguishes_shape_from_numeric_errors() {
    assert_eq!(parse_change_limit("среда/8"), Some(("среда".to_string(), 8)));
    // wrong shape
    assert!(parse_change_limit("среда 8").is_none());
    // right shape, non-numeric limit
    assert!(parse_change_limit("среда/восемь").is_none());
}

#[test]
fn addguest_maybe_marker_is_a_trailing_star() {
    let (label, name, confirmed) = parse_add_guest("пятница/анна ким").unwrap();
    assert_eq!((label.as_str(), name.as_str(), confirmed), ("пятница", "анна ким", true));

    let (_, _, confirmed) = parse_add_guest("пятница/анна ким/*").unwrap();
    assert!(!confirmed);
}

#[test]
fn adminedituser_fields_are_optional_past_the_id() {
    let edit = parse_user_edit("12/Иван/Петров/İvan Petrov").unwrap();
    assert_eq!(edit.user_id, 12);
    assert_eq!(edit.first_name.as_deref(), Some("Иван"));
    assert_eq!(edit.last_name.as_deref(), Some("Петров"));
    assert_eq!(edit.fullname_az.as_deref(), Some("İvan Petrov"));

    let partial = parse_user_edit("12/Иван").unwrap();
    assert_eq!(partial.last_name, None);
    assert_eq!(partial.fullname_az, None);
}

#[test]
fn joke_commands_use_the_triple_slash_delimiter() {
    // a single slash inside the joke text must not split it
    let (_, text) = parse_add_joke("LEFT_GAME///ушёл/убежал, неважно").unwrap();
    assert_eq!(text, "ушёл/убежал, неважно");

    let (id, _, text) = parse_edit_joke("7///RANDOM_FACT///факт///с хвостом").unwrap();
    assert_eq!(id, 7);
    assert_eq!(text, "факт///с хвостом");

    assert!(parse_add_joke("LEFT_GAME//одного слэша мало").is_none());
}
