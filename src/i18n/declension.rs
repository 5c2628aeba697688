//! Weekday declension tables
//!
//! Game labels are weekday names shown inside Russian and Azerbaijani
//! sentences, so they have to be inflected by grammatical case. This is a
//! pure lookup: unknown labels fall back to the input unchanged.

/// Russian grammatical cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuCase {
    Nominative,
    Genitive,
    Dative,
    Accusative,
    Instrumental,
    Prepositional,
}

/// Azerbaijani grammatical cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AzCase {
    Nominative,
    Genitive,
    Dative,
    Accusative,
    Locative,
    Ablative,
}

/// Decline a Russian weekday label
pub fn decline_ru(label: &str, case: RuCase) -> String {
    use RuCase::*;
    let forms: Option<[&str; 6]> = match label.trim().to_lowercase().as_str() {
        "понедельник" => Some([
            "понедельник", "понедельника", "понедельнику",
            "понедельник", "понедельником", "понедельнике",
        ]),
        "вторник" => Some([
            "вторник", "вторника", "вторнику",
            "вторник", "вторником", "вторнике",
        ]),
        "среда" => Some([
            "среда", "среды", "среде",
            "среду", "средой", "среде",
        ]),
        "четверг" => Some([
            "четверг", "четверга", "четвергу",
            "четверг", "четвергом", "четверге",
        ]),
        "пятница" => Some([
            "пятница", "пятницы", "пятнице",
            "пятницу", "пятницей", "пятнице",
        ]),
        "суббота" => Some([
            "суббота", "субботы", "субботе",
            "субботу", "субботой", "субботе",
        ]),
        "воскресенье" => Some([
            "воскресенье", "воскресенья", "воскресенью",
            "воскресенье", "воскресеньем", "воскресенье",
        ]),
        _ => None,
    };

    match forms {
        Some(forms) => {
            let idx = match case {
                Nominative => 0,
                Genitive => 1,
                Dative => 2,
                Accusative => 3,
                Instrumental => 4,
                Prepositional => 5,
            };
            forms[idx].to_string()
        }
        None => label.to_string(),
    }
}

/// Decline an Azerbaijani weekday label (full "günü" forms)
pub fn decline_az(label: &str, case: AzCase) -> String {
    use AzCase::*;
    let forms: Option<[&str; 6]> = match label.trim().to_lowercase().as_str() {
        "понедельник" => Some([
            "bazar ertəsi", "bazar ertəsinin", "bazar ertəsinə",
            "bazar ertəsini", "bazar ertəsində", "bazar ertəsindən",
        ]),
        "вторник" => Some([
            "çərşənbə axşamı", "çərşənbə axşamının", "çərşənbə axşamına",
            "çərşənbə axşamını", "çərşənbə axşamında", "çərşənbə axşamından",
        ]),
        "среда" => Some([
            "çərşənbə günü", "çərşənbə gününün", "çərşənbə gününə",
            "çərşənbə gününü", "çərşənbə günündə", "çərşənbə günündən",
        ]),
        "четверг" => Some([
            "cümə axşamı", "cümə axşamının", "cümə axşamına",
            "cümə axşamını", "cümə axşamında", "cümə axşamından",
        ]),
        "пятница" => Some([
            "cümə günü", "cümə gününün", "cümə gününə",
            "cümə gününü", "cümə günündə", "cümə günündən",
        ]),
        "суббота" => Some([
            "şənbə günü", "şənbə gününün", "şənbə gününə",
            "şənbə gününü", "şənbə günündə", "şənbə günündən",
        ]),
        "воскресенье" => Some([
            "bazar günü", "bazar gününün", "bazar gününə",
            "bazar gününü", "bazar günündə", "bazar günündən",
        ]),
        _ => None,
    };

    match forms {
        Some(forms) => {
            let idx = match case {
                Nominative => 0,
                Genitive => 1,
                Dative => 2,
                Accusative => 3,
                Locative => 4,
                Ablative => 5,
            };
            forms[idx].to_string()
        }
        None => label.to_string(),
    }
}

/// Uppercase the first letter, used when a declined day opens a sentence
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn russian_accusative() {
        assert_eq!(decline_ru("понедельник", RuCase::Accusative), "понедельник");
        assert_eq!(decline_ru("среда", RuCase::Accusative), "среду");
        assert_eq!(decline_ru("ПЯТНИЦА", RuCase::Accusative), "пятницу");
        assert_eq!(decline_ru("воскресенье", RuCase::Accusative), "воскресенье");
    }

    #[test]
    fn azerbaijani_dative() {
        assert_eq!(decline_az("понедельник", AzCase::Dative), "bazar ertəsinə");
        assert_eq!(decline_az("суббота", AzCase::Dative), "şənbə gününə");
    }

    #[test]
    fn unknown_label_falls_back() {
        assert_eq!(decline_ru("финал", RuCase::Accusative), "финал");
        assert_eq!(decline_az("финал", AzCase::Dative), "финал");
    }

    #[test]
    fn capitalizes_cyrillic_and_latin() {
        assert_eq!(capitalize_first("среда"), "Среда");
        assert_eq!(capitalize_first("bazar günü"), "Bazar günü");
        assert_eq!(capitalize_first(""), "");
    }
}
