use serde::{Deserialize, Serialize};

/// Language of report titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    EN,
    DE,
}

impl Language {
    pub fn code(&self) -> &str {
        match self {
            Language::EN => "EN",
            Language::DE => "DE",
        }
    }

    pub fn time_distribution_title(&self) -> &'static str {
        match self {
            Language::EN => "Time distribution in minutes",
            Language::DE => "Zeitverteilung in Minuten",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "EN" => Some(Language::EN),
            "DE" => Some(Language::DE),
            _ => None,
        }
    }
}
