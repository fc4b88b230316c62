use serde::{Deserialize, Serialize};

use crate::i18n::Lang;

/// A piece of copy owned by a data module (course titles, form options, ...) rather than
/// by the canonical translation table.
///
/// Lookups follow the same rules as the locale resolver: Urdu is always present and
/// Arabic falls back to English.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized<S = String> {
    pub en: S,
    pub ur: S,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<S>,
}

impl<S: AsRef<str>> Localized<S> {
    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::En => self.en.as_ref(),
            Lang::Ur => self.ur.as_ref(),
            Lang::Ar => self.ar.as_ref().unwrap_or(&self.en).as_ref(),
        }
    }

    /// The `en / ur` pair used in bilingual WhatsApp messages.
    pub fn bilingual(&self) -> String {
        format!("{} / {}", self.en.as_ref(), self.ur.as_ref())
    }

    pub fn is_blank(&self) -> bool {
        self.en.as_ref().trim().is_empty() && self.ur.as_ref().trim().is_empty()
    }
}

impl Localized<&'static str> {
    pub const fn new(en: &'static str, ur: &'static str) -> Self {
        Localized { en, ur, ar: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_lookup() {
        let title = Localized {
            en: "Arabic Language".to_string(),
            ur: "عربی زبان".to_string(),
            ar: None,
        };
        assert_eq!(title.get(Lang::En), "Arabic Language");
        assert_eq!(title.get(Lang::Ur), "عربی زبان");
        assert_eq!(title.get(Lang::Ar), "Arabic Language");
        assert_eq!(title.bilingual(), "Arabic Language / عربی زبان");
    }

    #[test]
    fn test_localized_arabic_when_present() {
        let label = Localized {
            ar: Some("مساء"),
            ..Localized::new("Evening", "شام")
        };
        assert_eq!(label.get(Lang::Ar), "مساء");
        assert!(!label.is_blank());
    }
}
