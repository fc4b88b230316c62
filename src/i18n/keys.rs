use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::i18n::Lang;

include!(concat!(env!("OUT_DIR"), "/translation_keys.rs"));

/// Returns the text of `key` in `lang`.
///
/// English and Urdu strings always exist (the build rejects incomplete entries).
/// Arabic falls back to English when the table has no Arabic string for the key.
pub fn translate(key: Key, lang: Lang) -> &'static str {
    let index = key as usize;
    match lang {
        Lang::En => EN[index],
        Lang::Ur => UR[index],
        Lang::Ar => AR[index].unwrap_or(EN[index]),
    }
}

/// Every canonical key resolved for `lang`, keyed by symbolic name.
pub fn dictionary(lang: Lang) -> BTreeMap<&'static str, &'static str> {
    Key::ALL
        .iter()
        .map(|key| (key.as_str(), translate(*key, lang)))
        .collect()
}

impl Key {
    /// Whether the table carries a dedicated Arabic string for this key.
    pub fn has_arabic(self) -> bool {
        AR[self as usize].is_some()
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Key::from_name(s.trim()).ok_or_else(|| Error::UnknownTranslationKey(s.to_string()))
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
