//! Command argument validation and parsing
//!
//! Slash-command arguments are slash-delimited fields; jokes use a `///`
//! delimiter. Malformed arguments produce a usage message upstream, never
//! a state change.

use std::sync::OnceLock;
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use crate::models::game::CreateGameRequest;
use crate::models::joke::JokeType;

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("valid date regex"))
}

fn time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid time regex"))
}

/// Parse `/startgame` arguments: `DD.MM.YYYY/HH:MM/HH:MM/limit/place/label`
pub fn parse_game_args(text: &str) -> Option<CreateGameRequest> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 6 {
        return None;
    }

    let [date, start, end, limit, place, label] =
        [parts[0].trim(), parts[1].trim(), parts[2].trim(), parts[3].trim(), parts[4].trim(), parts[5].trim()];

    if !date_regex().is_match(date) || !time_regex().is_match(start) || !time_regex().is_match(end) {
        return None;
    }

    let users_limit: i32 = limit.parse().ok().filter(|l| *l > 0)?;
    if place.is_empty() || label.is_empty() {
        return None;
    }

    Some(CreateGameRequest {
        date: NaiveDate::parse_from_str(date, "%d.%m.%Y").ok()?,
        start: NaiveTime::parse_from_str(start, "%H:%M").ok()?,
        end: NaiveTime::parse_from_str(end, "%H:%M").ok()?,
        users_limit,
        place: place.to_string(),
        label: label.to_string(),
    })
}

/// Parse `/changelimit` arguments: `label/limit`
pub fn parse_change_limit(text: &str) -> Option<(String, i32)> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 2 {
        return None;
    }
    let limit: i32 = parts[1].trim().parse().ok()?;
    Some((parts[0].trim().to_string(), limit))
}

/// Parsed `/adminedituser` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEditArgs {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub fullname_az: Option<String>,
}

/// Parse `/adminedituser` arguments: `userId/firstName[/lastName[/fullnameAz]]`
pub fn parse_user_edit(text: &str) -> Option<UserEditArgs> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() < 2 {
        return None;
    }
    let user_id: i64 = parts[0].trim().parse().ok()?;

    let field = |idx: usize| {
        parts
            .get(idx)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Some(UserEditArgs {
        user_id,
        first_name: field(1),
        last_name: field(2),
        fullname_az: field(3),
    })
}

/// Parse `/addguest` arguments: `label/Full Name[/*]`. The trailing `*`
/// marks the guest as "maybe" instead of "attending".
pub fn parse_add_guest(text: &str) -> Option<(String, String, bool)> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() < 2 {
        return None;
    }
    let label = parts[0].trim();
    let fullname = parts[1].trim();
    if label.is_empty() || fullname.is_empty() {
        return None;
    }
    let confirmed = !parts.get(2).map(|p| p.contains('*')).unwrap_or(false);
    Some((label.to_string(), fullname.to_string(), confirmed))
}

/// Parse `/adminaddjoke` arguments: `type///text`
pub fn parse_add_joke(text: &str) -> Option<(JokeType, String)> {
    let parts: Vec<&str> = text.splitn(2, "///").collect();
    if parts.len() < 2 {
        return None;
    }
    let joke_type: JokeType = parts[0].trim().parse().ok()?;
    let joke = parts[1].trim();
    if joke.is_empty() {
        return None;
    }
    Some((joke_type, joke.to_string()))
}

/// Parse `/admineditjoke` arguments: `id///type///text`
pub fn parse_edit_joke(text: &str) -> Option<(i64, JokeType, String)> {
    let parts: Vec<&str> = text.splitn(3, "///").collect();
    if parts.len() < 3 {
        return None;
    }
    let id: i64 = parts[0].trim().parse().ok()?;
    let joke_type: JokeType = parts[1].trim().parse().ok()?;
    let joke = parts[2].trim();
    if joke.is_empty() {
        return None;
    }
    Some((id, joke_type, joke.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn parses_well_formed_game() {
        let parsed = parse_game_args("01.01.2025/18:00/20:00/2/Спортзал/понедельник").unwrap();
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(parsed.start, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert_eq!(parsed.end, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
        assert_eq!(parsed.users_limit, 2);
        assert_eq!(parsed.place, "Спортзал");
        assert_eq!(parsed.label, "понедельник");
    }

    #[test]
    fn rejects_malformed_games() {
        // wrong field count
        assert!(parse_game_args("01.01.2025/18:00/20:00/2/Спортзал").is_none());
        // bad date shape
        assert!(parse_game_args("1.1.2025/18:00/20:00/2/Спортзал/среда").is_none());
        // bad time shape
        assert!(parse_game_args("01.01.2025/18/20:00/2/Спортзал/среда").is_none());
        // non-numeric limit
        assert!(parse_game_args("01.01.2025/18:00/20:00/x/Спортзал/среда").is_none());
        // zero limit
        assert!(parse_game_args("01.01.2025/18:00/20:00/0/Спортзал/среда").is_none());
        // impossible calendar date
        assert!(parse_game_args("31.02.2025/18:00/20:00/2/Спортзал/среда").is_none());
    }

    #[test]
    fn parses_change_limit() {
        assert_eq!(
            parse_change_limit("понедельник/14"),
            Some(("понедельник".to_string(), 14))
        );
        assert!(parse_change_limit("понедельник").is_none());
        assert!(parse_change_limit("понедельник/x").is_none());
    }

    #[test]
    fn parses_user_edit_with_optional_fields() {
        let args = parse_user_edit("7/иван//").unwrap();
        assert_eq!(args.user_id, 7);
        assert_eq!(args.first_name.as_deref(), Some("иван"));
        assert_eq!(args.last_name, None);
        assert_eq!(args.fullname_az, None);

        assert!(parse_user_edit("abc/иван").is_none());
    }

    #[test]
    fn parses_add_guest_with_maybe_marker() {
        assert_eq!(
            parse_add_guest("среда/иван петров"),
            Some(("среда".to_string(), "иван петров".to_string(), true))
        );
        assert_eq!(
            parse_add_guest("среда/иван петров/*"),
            Some(("среда".to_string(), "иван петров".to_string(), false))
        );
        assert!(parse_add_guest("среда").is_none());
    }

    #[test]
    fn parses_joke_arguments() {
        let (ty, text) = parse_add_joke("left_game///шутка про уход").unwrap();
        assert_eq!(ty, JokeType::LeftGame);
        assert_eq!(text, "шутка про уход");
        assert!(parse_add_joke("просто текст").is_none());
        assert!(parse_add_joke("NOT_A_TYPE///текст").is_none());

        let (id, ty, text) = parse_edit_joke("3///TAG_UNDECIDED///новый текст").unwrap();
        assert_eq!(id, 3);
        assert_eq!(ty, JokeType::TagUndecided);
        assert_eq!(text, "новый текст");
    }
}
