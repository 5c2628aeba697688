//! Message formatting utilities
//!
//! User tagging/listing helpers and the roster rendering with its
//! wait-list separator.

use crate::models::game::GamePlayerDetails;
use crate::models::user::{User, UserWithGameStats};

const WAIT_LIST_SEPARATOR: &str = "--------------Wait list--------------";

/// HTML mention for a user: @handle when one exists, tg:// deep link otherwise
pub fn mention(username: Option<&str>, user_id: i64, first_name: &str) -> String {
    match username {
        Some(handle) if !handle.is_empty() => format!("@{handle}"),
        _ => format!(r#"<a href="tg://user?id={user_id}">{first_name}</a>"#),
    }
}

pub fn mention_user(user: &User) -> String {
    mention(user.username.as_deref(), user.user_id, &user.first_name)
}

/// Numbered mention list, one user per line
pub fn tag_users(users: &[User]) -> String {
    users
        .iter()
        .enumerate()
        .map(|(idx, user)| format!("{}. {}", idx + 1, mention_user(user)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comma-separated mention list
pub fn tag_users_by_commas(users: &[User]) -> String {
    users.iter().map(mention_user).collect::<Vec<_>>().join(", ")
}

/// Comma-separated mentions of roster rows
pub fn tag_players_by_commas(players: &[GamePlayerDetails]) -> String {
    players
        .iter()
        .map(|p| mention(p.username.as_deref(), p.telegram_user_id, &p.first_name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Numbered mention list for inactivity statistics rows
pub fn tag_inactive_users(users: &[UserWithGameStats]) -> String {
    users
        .iter()
        .enumerate()
        .map(|(idx, user)| {
            format!(
                "{}. {}",
                idx + 1,
                mention(user.username.as_deref(), user.user_id, &user.first_name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain numbered list without mentions
pub fn list_users(users: &[User]) -> String {
    users
        .iter()
        .enumerate()
        .map(|(idx, user)| {
            let last_name = user
                .last_name
                .as_deref()
                .filter(|l| !l.is_empty())
                .map(|l| format!(" {l}"))
                .unwrap_or_default();
            let username = user
                .username
                .as_deref()
                .filter(|u| !u.is_empty())
                .map(|u| format!(" (@{u})"))
                .unwrap_or_default();
            format!("{}. {}{}{}", idx + 1, user.first_name, last_name, username)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Uppercase the first letter of every whitespace-separated word
pub fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Order a roster for display: confirmed rows before maybe rows. The sort is
/// stable, so within each group the original participation order survives.
pub fn sort_roster(players: &mut [GamePlayerDetails]) {
    players.sort_by_key(|p| !p.confirmed_attendance);
}

/// Render the player lines of a roster, inserting the wait-list separator
/// exactly at the capacity index. Capacity is advisory: everyone past the
/// limit still renders, below the separator.
pub fn render_roster_lines(players: &[GamePlayerDetails], users_limit: i32) -> String {
    players
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let wait_list = if idx as i32 == users_limit {
                format!("\n{WAIT_LIST_SEPARATOR}\n")
            } else {
                String::new()
            };
            let icon = if p.confirmed_attendance { "✅" } else { "❓" };
            let guest = if p.is_guest { " (гость)" } else { "" };
            let last_name = p
                .last_name
                .as_deref()
                .filter(|l| !l.is_empty())
                .map(|l| format!(" {l}"))
                .unwrap_or_default();
            format!("{wait_list}\t{icon} {}{last_name}{guest}", p.first_name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remaining places, floored at zero for display
pub fn places_left(users_limit: i32, player_count: usize) -> i32 {
    (users_limit - player_count as i32).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

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

    fn user(id: i64, first: &str, username: Option<&str>) -> User {
        User {
            id,
            user_id: id * 100,
            first_name: first.to_string(),
            last_name: None,
            username: username.map(str::to_string),
            is_guest: false,
            chat_id: -1,
            fullname_az: None,
            active: true,
        }
    }

    #[test]
    fn mention_prefers_username() {
        assert_eq!(mention(Some("anna"), 5, "Anna"), "@anna");
        assert_eq!(
            mention(None, 5, "Anna"),
            r#"<a href="tg://user?id=5">Anna</a>"#
        );
    }

    #[test]
    fn roster_sort_is_stable_within_groups() {
        let mut roster = vec![
            player("a", false, false),
            player("b", true, false),
            player("c", false, false),
            player("d", true, false),
        ];
        sort_roster(&mut roster);
        let order: Vec<&str> = roster.iter().map(|p| p.first_name.as_str()).collect();
        assert_eq!(order, ["b", "d", "a", "c"]);
    }

    #[test]
    fn wait_list_marker_sits_at_the_limit_index() {
        let mut roster = vec![
            player("a", true, false),
            player("b", false, false),
            player("c", true, false),
        ];
        sort_roster(&mut roster);
        let rendered = render_roster_lines(&roster, 2);
        let lines: Vec<&str> = rendered.lines().collect();
        // two players, separator, third player
        assert!(lines[0].contains("a"));
        assert!(lines[1].contains("c"));
        assert_eq!(lines[3], WAIT_LIST_SEPARATOR);
        assert!(lines[4].contains("b"));
    }

    #[test]
    fn no_marker_under_the_limit() {
        let roster = vec![player("a", true, false)];
        let rendered = render_roster_lines(&roster, 10);
        assert!(!rendered.contains("Wait list"));
    }

    #[test]
    fn guests_are_labelled() {
        let roster = vec![player("Гость", false, true)];
        let rendered = render_roster_lines(&roster, 10);
        assert!(rendered.contains("(гость)"));
        assert!(rendered.contains('❓'));
    }

    #[test]
    fn places_left_is_floored() {
        assert_eq!(places_left(10, 4), 6);
        assert_eq!(places_left(2, 5), 0);
    }

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize_words("иван петров"), "Иван Петров");
        assert_eq!(capitalize_words("  anna  "), "Anna");
    }

    #[test]
    fn lists_and_tags() {
        let users = vec![user(1, "Anna", Some("anna")), user(2, "Борис", None)];
        assert_eq!(
            tag_users(&users),
            "1. @anna\n2. <a href=\"tg://user?id=200\">Борис</a>"
        );
        assert_eq!(list_users(&users), "1. Anna (@anna)\n2. Борис");
        assert!(tag_users_by_commas(&users).starts_with("@anna, "));
    }
}
