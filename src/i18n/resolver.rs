use std::collections::BTreeMap;

use crate::debug;
use crate::i18n::keys::{dictionary, translate};
use crate::i18n::{Direction, DocumentAttributes, DocumentSink, Key, Lang, LanguageStore};
use crate::log;

/// Tracks the active language and resolves canonical keys against it.
///
/// The resolver owns its persistence slot and its document sink. Every language change
/// is mirrored onto both, the sink synchronously and the store on a best-effort basis.
pub struct LocaleResolver<S, D> {
    lang: Lang,
    store: S,
    document: D,
}

impl<S: LanguageStore, D: DocumentSink> LocaleResolver<S, D> {
    /// Restores the persisted language (English when nothing valid is stored) and applies
    /// the matching document attributes.
    pub fn new(store: S, document: D) -> Self {
        Self::with_default(store, document, Lang::default())
    }

    /// Like [`LocaleResolver::new`] but falls back to `default` instead of English.
    pub fn with_default(store: S, mut document: D, default: Lang) -> Self {
        let lang = store
            .load()
            .and_then(|code| Lang::from_code(&code))
            .unwrap_or(default);
        debug!("[i18n] Initial language: {}", lang);
        document.apply(&DocumentAttributes::for_language(lang));
        LocaleResolver {
            lang,
            store,
            document,
        }
    }

    pub fn language(&self) -> Lang {
        self.lang
    }

    pub fn direction(&self) -> Direction {
        self.lang.direction()
    }

    pub fn attributes(&self) -> DocumentAttributes {
        DocumentAttributes::for_language(self.lang)
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the text of `key` in the active language.
    pub fn resolve(&self, key: Key) -> &'static str {
        translate(key, self.lang)
    }

    /// Resolves `key` and substitutes every `{name}` placeholder with its value.
    pub fn resolve_with(&self, key: Key, values: &[(&str, &str)]) -> String {
        values
            .iter()
            .fold(self.resolve(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }

    /// Looks a key up by its symbolic name.
    pub fn lookup(&self, name: &str) -> Option<&'static str> {
        Key::from_name(name).map(|key| self.resolve(key))
    }

    /// Switches the active language.
    ///
    /// The new code is persisted but a failing store only produces a warning: the
    /// in-memory state and the document are already updated at that point.
    pub fn set_language(&mut self, lang: Lang) {
        self.lang = lang;
        self.document.apply(&DocumentAttributes::for_language(lang));
        if let Err(e) = self.store.save(lang.code()) {
            log::warn(format!("unable to persist language \"{}\": {}", lang, e));
        }
        debug!("[i18n] Language set to {} ({})", lang, lang.direction());
    }

    /// Every canonical key resolved for the active language.
    pub fn dictionary(&self) -> BTreeMap<&'static str, &'static str> {
        dictionary(self.lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::i18n::{FileLanguageStore, MemoryLanguageStore, RecordingDocument};
    use tempfile::tempdir;

    struct FailingStore;

    impl LanguageStore for FailingStore {
        fn load(&self) -> Option<String> {
            None
        }

        fn save(&self, _code: &str) -> Result<()> {
            Err(crate::error::Error::Msg("read-only".to_string()))
        }
    }

    fn resolver() -> LocaleResolver<MemoryLanguageStore, RecordingDocument> {
        LocaleResolver::new(MemoryLanguageStore::default(), RecordingDocument::default())
    }

    #[test]
    fn test_nav_home_in_every_language() {
        let mut locale = resolver();
        assert_eq!(locale.resolve(Key::NavHome), "Home");
        locale.set_language(Lang::Ur);
        assert_eq!(locale.resolve(Key::NavHome), "ہوم");
        locale.set_language(Lang::Ar);
        assert_eq!(locale.resolve(Key::NavHome), "الرئيسية");
    }

    #[test]
    fn test_defaults_to_english() {
        let locale = resolver();
        assert_eq!(locale.language(), Lang::En);
        assert_eq!(locale.direction(), Direction::Ltr);
        let applied = locale.document().last().unwrap();
        assert_eq!(applied.lang, Lang::En);
    }

    #[test]
    fn test_invalid_stored_value_defaults_to_english() {
        let locale = LocaleResolver::new(
            MemoryLanguageStore::with_value("klingon"),
            RecordingDocument::default(),
        );
        assert_eq!(locale.language(), Lang::En);
    }

    #[test]
    fn test_stored_code_must_match_exactly() {
        for stored in ["AR", "En", " ur\n"] {
            let locale = LocaleResolver::new(
                MemoryLanguageStore::with_value(stored),
                RecordingDocument::default(),
            );
            assert_eq!(locale.language(), Lang::En, "{:?}", stored);
        }
    }

    #[test]
    fn test_configured_default_language() {
        let locale = LocaleResolver::with_default(
            MemoryLanguageStore::default(),
            RecordingDocument::default(),
            Lang::Ur,
        );
        assert_eq!(locale.language(), Lang::Ur);

        let locale = LocaleResolver::with_default(
            MemoryLanguageStore::with_value("ar"),
            RecordingDocument::default(),
            Lang::Ur,
        );
        assert_eq!(locale.language(), Lang::Ar);
    }

    #[test]
    fn test_restores_persisted_language() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("lang");
        {
            let mut locale =
                LocaleResolver::new(FileLanguageStore::new(&path), RecordingDocument::default());
            locale.set_language(Lang::Ur);
        }
        let locale = LocaleResolver::new(FileLanguageStore::new(&path), RecordingDocument::default());
        assert_eq!(locale.language(), Lang::Ur);
        assert!(locale.document().last().unwrap().has_class("rtl"));
        Ok(())
    }

    #[test]
    fn test_set_language_is_idempotent() {
        let mut locale = resolver();
        locale.set_language(Lang::Ur);
        let first = locale.attributes();
        locale.set_language(Lang::Ur);
        assert_eq!(locale.attributes(), first);
        assert_eq!(locale.document().last(), Some(&first));
        assert_eq!(locale.store().load().as_deref(), Some("ur"));
        assert_eq!(locale.direction(), Direction::Rtl);
    }

    #[test]
    fn test_persistence_failure_keeps_state() {
        let mut locale = LocaleResolver::new(FailingStore, RecordingDocument::default());
        locale.set_language(Lang::Ar);
        assert_eq!(locale.language(), Lang::Ar);
        assert_eq!(locale.document().updates(), 2);
        assert_eq!(locale.resolve(Key::NavCourses), "الدورات");
    }

    #[test]
    fn test_resolve_with_placeholders() {
        let mut locale = resolver();
        assert_eq!(
            locale.resolve_with(Key::AdmissionsWhatsappNote, &[("number", "03353503511")]),
            "Submissions go to WhatsApp: 03353503511"
        );
        locale.set_language(Lang::Ur);
        assert!(locale
            .resolve_with(Key::AdmissionsWhatsappNote, &[("number", "03353503511")])
            .ends_with("03353503511"));
    }

    #[test]
    fn test_lookup_by_name() {
        let locale = resolver();
        assert_eq!(locale.lookup("nav_contact"), Some("Contact"));
        assert_eq!(locale.lookup("nav_unknown"), None);
    }

    #[test]
    fn test_rohani_ilaj_nav_entry() {
        let mut locale = resolver();
        assert_eq!(locale.resolve(Key::NavRohaniIlaj), "Rohani Ilaj");
        locale.set_language(Lang::Ur);
        assert_eq!(locale.lookup("nav_rohani_ilaj"), Some("روحانی علاج"));
        locale.set_language(Lang::Ar);
        assert_eq!(locale.resolve(Key::NavRohaniIlaj), "العلاج الروحاني");
    }

    #[test]
    fn test_dictionary_covers_every_key() {
        let mut locale = resolver();
        locale.set_language(Lang::Ur);
        let dictionary = locale.dictionary();
        assert_eq!(dictionary.len(), Key::COUNT);
        assert_eq!(dictionary["nav_home"], "ہوم");
    }
}
