//! Localized labels for the widget

use crate::dom::Document;
use std::fmt;

/// Returned for keys (or locales) missing from the dictionary
pub const UNDEFINED: &str = "undefined";

/// Language used when the document declares none
pub const DEFAULT_LANG: &str = "de";

/// key -> [(language, label)]
const DICTIONARY: &[(&str, &[(&str, &str)])] = &[(
    "toc",
    &[("de", "Inhaltsverzeichnis"), ("en", "Table Of Contents")],
)];

/// Primary language subtag used for lookups, e.g. `en` for `en-US`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(String);

impl Default for Locale {
    fn default() -> Self {
        Self(DEFAULT_LANG.to_string())
    }
}

impl Locale {
    /// Resolve a language tag; empty tags fall back to the default language
    pub fn new(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if primary.is_empty() {
            Self::default()
        } else {
            Self(primary)
        }
    }

    /// Locale declared by the document's root `lang` attribute
    pub fn from_document(doc: &Document) -> Self {
        doc.lang().map(Self::new).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Look up `key` for `locale`, degrading to [`UNDEFINED`]
pub fn translate(key: &str, locale: &Locale) -> &'static str {
    let label = DICTIONARY
        .iter()
        .find(|(k, _)| *k == key)
        .and_then(|(_, labels)| labels.iter().find(|(lang, _)| *lang == locale.as_str()))
        .map(|(_, label)| *label);

    label.unwrap_or_else(|| {
        log::warn!("No translation for '{}' in '{}'", key, locale);
        UNDEFINED
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_key() {
        assert_eq!(translate("toc", &Locale::new("en")), "Table Of Contents");
        assert_eq!(translate("toc", &Locale::new("de-CH")), "Inhaltsverzeichnis");
    }

    #[test]
    fn test_unknown_key_degrades_to_sentinel() {
        assert_eq!(translate("nope", &Locale::default()), UNDEFINED);
    }

    #[test]
    fn test_unknown_locale_degrades_to_sentinel() {
        assert_eq!(translate("toc", &Locale::new("fr")), UNDEFINED);
    }

    #[test]
    fn test_empty_tag_defaults_to_german() {
        assert_eq!(Locale::new(""), Locale::default());
        assert_eq!(Locale::new("EN-us").as_str(), "en");
    }

    #[test]
    fn test_locale_from_document() {
        let mut doc = Document::new();
        assert_eq!(Locale::from_document(&doc).as_str(), "de");
        doc.set_attribute(doc.root(), "lang", "en");
        assert_eq!(Locale::from_document(&doc).as_str(), "en");
    }
}
