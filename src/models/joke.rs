//! Joke model and category enumeration

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Categorized flavor text, selected uniformly at random within a category.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Joke {
    pub id: i64,
    pub joke: String,
    #[sqlx(rename = "type")]
    pub joke_type: i32,
}

/// Situations a joke can be attached to. The numeric values are the stored
/// `jokes.type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum JokeType {
    LeftGame = 1,
    TagRegistered = 2,
    StartGame = 3,
    DeactiveGame = 4,
    AddGuest = 5,
    InactiveNudge = 6,
    DeletePlayer = 7,
    TagUndecided = 8,
    RandomFact = 9,
}

impl JokeType {
    pub const ALL: [JokeType; 9] = [
        JokeType::LeftGame,
        JokeType::TagRegistered,
        JokeType::StartGame,
        JokeType::DeactiveGame,
        JokeType::AddGuest,
        JokeType::InactiveNudge,
        JokeType::DeletePlayer,
        JokeType::TagUndecided,
        JokeType::RandomFact,
    ];

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for JokeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JokeType::LeftGame => "LEFT_GAME",
            JokeType::TagRegistered => "TAG_REGISTERED",
            JokeType::StartGame => "START_GAME",
            JokeType::DeactiveGame => "DEACTIVE_GAME",
            JokeType::AddGuest => "ADD_GUEST",
            JokeType::InactiveNudge => "SAY_SOMETHING_TO_INACTIVE",
            JokeType::DeletePlayer => "DELETE_PLAYER",
            JokeType::TagUndecided => "TAG_UNDECIDED",
            JokeType::RandomFact => "RANDOM_FACT",
        };
        f.write_str(name)
    }
}

impl FromStr for JokeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LEFT_GAME" => Ok(JokeType::LeftGame),
            "TAG_REGISTERED" => Ok(JokeType::TagRegistered),
            "START_GAME" => Ok(JokeType::StartGame),
            "DEACTIVE_GAME" => Ok(JokeType::DeactiveGame),
            "ADD_GUEST" => Ok(JokeType::AddGuest),
            "SAY_SOMETHING_TO_INACTIVE" => Ok(JokeType::InactiveNudge),
            "DELETE_PLAYER" => Ok(JokeType::DeletePlayer),
            "TAG_UNDECIDED" => Ok(JokeType::TagUndecided),
            "RANDOM_FACT" => Ok(JokeType::RandomFact),
            other => Err(format!("unknown joke type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_screaming_names_case_insensitively() {
        assert_eq!("left_game".parse::<JokeType>().unwrap(), JokeType::LeftGame);
        assert_eq!(" DEACTIVE_GAME ".parse::<JokeType>().unwrap(), JokeType::DeactiveGame);
        assert!("KNOCK_KNOCK".parse::<JokeType>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for t in JokeType::ALL {
            assert_eq!(t.to_string().parse::<JokeType>().unwrap(), t);
        }
    }

    #[test]
    fn stored_values_are_stable() {
        assert_eq!(JokeType::LeftGame.as_i32(), 1);
        assert_eq!(JokeType::TagUndecided.as_i32(), 8);
        assert_eq!(JokeType::RandomFact.as_i32(), 9);
    }
}
