//! `alafra` holds the content and the small services behind the Al Afra Islamic Academy site.
//!
//! The main entry points are `i18n::LocaleResolver`, which picks the active language
//! (English, Urdu or Arabic) and translates the fixed set of site keys, and
//! `cards::TemplateCatalog`, which exposes the built-in ID card templates.
//!
//! Around them live the course catalog, the WhatsApp form helpers, the JSON record
//! stores for donations and contact messages and, behind the `server` feature, an
//! HTTP API serving all of the above.
//!
//! Example:
//! ```
//! use alafra::prelude::*;
//!
//! let mut locale = LocaleResolver::new(MemoryLanguageStore::default(), RecordingDocument::default());
//! locale.set_language(Lang::Ur);
//! assert!(locale.direction().is_rtl());
//!
//! let catalog = TemplateCatalog::builtin().unwrap();
//! assert_eq!(catalog.get("modern-id-1").unwrap().category, TemplateCategory::Student);
//! ```

pub mod cards;
pub mod config;
pub mod constants;
pub mod controller;
pub mod courses;
pub mod error;
pub mod forms;
pub mod i18n;
pub mod log;
pub mod records;
#[cfg(feature = "server")]
pub mod server;
pub mod utils;

/// The alafra prelude
///
/// This module re-exports the most commonly used items from alafra.
/// You can use it with `use alafra::prelude::*;` to bring all common items into scope.
pub mod prelude {
    // Re-export commonly used traits
    pub use crate::i18n::{DocumentSink, LanguageStore};

    // Re-export commonly used types
    pub use crate::cards::{Side, TemplateCatalog, TemplateCategory, TemplateDefinition};
    pub use crate::courses::{CourseCatalog, CourseFilter};
    pub use crate::error::Result;
    pub use crate::i18n::{Key, Lang, LocaleResolver, MemoryLanguageStore, RecordingDocument};

    // Re-export commonly used functions
    pub use crate::forms::whatsapp_link;
    pub use crate::i18n::translate;
}
