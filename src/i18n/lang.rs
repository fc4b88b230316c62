use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::{Error, Result};

/// Languages the site is published in.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    #[strum(serialize = "en")]
    En,
    #[strum(serialize = "ur")]
    Ur,
    #[strum(serialize = "ar")]
    Ar,
}

/// Writing direction of a language.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[strum(serialize = "ltr")]
    Ltr,
    #[strum(serialize = "rtl")]
    Rtl,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::En, Lang::Ur, Lang::Ar];

    /// The ISO 639-1 code of the language.
    pub const fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ur => "ur",
            Lang::Ar => "ar",
        }
    }

    pub const fn direction(self) -> Direction {
        match self {
            Lang::En => Direction::Ltr,
            Lang::Ur | Lang::Ar => Direction::Rtl,
        }
    }

    /// Matches a stored code exactly. Anything but `en`, `ur` or `ar` is `None`.
    pub fn from_code(code: &str) -> Option<Lang> {
        Lang::ALL.into_iter().find(|lang| lang.code() == code)
    }
}

impl Direction {
    pub fn is_rtl(self) -> bool {
        self == Direction::Rtl
    }
}

impl FromStr for Lang {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "ur" => Ok(Lang::Ur),
            "ar" => Ok(Lang::Ar),
            _ => Err(Error::UnknownLanguage(s.to_string())),
        }
    }
}
