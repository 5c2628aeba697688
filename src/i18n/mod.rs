//! Localized text module
//!
//! Weekday declension tables and the canned bilingual message texts

pub mod declension;
pub mod messages;

pub use declension::{decline_ru, decline_az, capitalize_first, RuCase, AzCase};
