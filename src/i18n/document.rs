use std::fmt;

use serde::Serialize;

use crate::i18n::{Direction, Lang};

/// Attributes the active language imposes on the document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentAttributes {
    pub lang: Lang,
    pub dir: Direction,
    pub classes: Vec<String>,
}

impl DocumentAttributes {
    pub fn for_language(lang: Lang) -> Self {
        let dir = lang.direction();
        let mut classes = vec![format!("lang-{}", lang.code())];
        if dir.is_rtl() {
            classes.push("rtl".to_string());
        }
        DocumentAttributes { lang, dir, classes }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Renders the attributes as they would appear on the `<html>` element.
impl fmt::Display for DocumentAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lang=\"{}\" dir=\"{}\" class=\"{}\"",
            self.lang,
            self.dir,
            self.classes.join(" ")
        )
    }
}

/// Receiver of document root attribute updates.
pub trait DocumentSink {
    fn apply(&mut self, attributes: &DocumentAttributes);
}

/// Keeps the last applied attributes and counts the updates.
#[derive(Debug, Default)]
pub struct RecordingDocument {
    last: Option<DocumentAttributes>,
    updates: usize,
}

impl RecordingDocument {
    pub fn last(&self) -> Option<&DocumentAttributes> {
        self.last.as_ref()
    }

    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl DocumentSink for RecordingDocument {
    fn apply(&mut self, attributes: &DocumentAttributes) {
        self.last = Some(attributes.clone());
        self.updates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_for_rtl_language() {
        let attributes = DocumentAttributes::for_language(Lang::Ur);
        assert_eq!(attributes.dir, Direction::Rtl);
        assert!(attributes.has_class("lang-ur"));
        assert!(attributes.has_class("rtl"));
        assert_eq!(
            attributes.to_string(),
            "lang=\"ur\" dir=\"rtl\" class=\"lang-ur rtl\""
        );
    }

    #[test]
    fn test_attributes_for_english() {
        let attributes = DocumentAttributes::for_language(Lang::En);
        assert_eq!(attributes.classes, vec!["lang-en".to_string()]);
        assert!(!attributes.has_class("rtl"));
    }
}
