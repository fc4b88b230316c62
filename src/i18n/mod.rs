//! Localized site copy.
//!
//! The canonical translation table lives in `assets/translations.toml` and is turned
//! into the [`Key`] enum at build time, so every key used by the code is guaranteed to
//! carry an English and an Urdu string. Arabic strings are optional and fall back to
//! English.
//!
//! ```
//! use alafra::i18n::{Key, Lang, LocaleResolver, MemoryLanguageStore, RecordingDocument};
//!
//! let mut locale = LocaleResolver::new(MemoryLanguageStore::default(), RecordingDocument::default());
//! assert_eq!(locale.resolve(Key::NavHome), "Home");
//!
//! locale.set_language(Lang::Ar);
//! assert_eq!(locale.resolve(Key::NavHome), "الرئيسية");
//! assert!(locale.direction().is_rtl());
//! ```

mod document;
mod keys;
mod lang;
mod localized;
mod resolver;
mod storage;

pub use document::{DocumentAttributes, DocumentSink, RecordingDocument};
pub use keys::{dictionary, translate, Key};
pub use lang::{Direction, Lang};
pub use localized::Localized;
pub use resolver::LocaleResolver;
pub use storage::{FileLanguageStore, LanguageStore, MemoryLanguageStore};
