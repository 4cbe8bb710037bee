/*!
 * Fixed registry of supported languages and their translation models.
 *
 * Every supported language maps to a pair of Opus-MT model repositories:
 * one into the pivot language and one out of it. The pivot itself is never
 * a key, which is what makes pivot text pass through untranslated.
 */

use log::warn;
use std::collections::HashMap;

use crate::detection::UNDETERMINED;

/// ISO 639-1 code of the pivot language every query is routed through
pub const PIVOT_LANG: &str = "en";

/// Model pair for one supported language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelPair {
    /// Model translating the language into the pivot
    pub to_pivot: &'static str,
    /// Model translating the pivot into the language
    pub from_pivot: &'static str,
}

/// Declarative table of supported languages.
///
/// Adding a language is an edit here and nowhere else.
const SUPPORTED_MODELS: &[(&str, ModelPair)] = &[
    ("es", ModelPair { to_pivot: "Helsinki-NLP/opus-mt-es-en", from_pivot: "Helsinki-NLP/opus-mt-en-es" }),
    ("fr", ModelPair { to_pivot: "Helsinki-NLP/opus-mt-fr-en", from_pivot: "Helsinki-NLP/opus-mt-en-fr" }),
    ("de", ModelPair { to_pivot: "Helsinki-NLP/opus-mt-de-en", from_pivot: "Helsinki-NLP/opus-mt-en-de" }),
    ("hi", ModelPair { to_pivot: "Helsinki-NLP/opus-mt-hi-en", from_pivot: "Helsinki-NLP/opus-mt-en-hi" }),
    ("pt", ModelPair { to_pivot: "Helsinki-NLP/opus-mt-pt-en", from_pivot: "Helsinki-NLP/opus-mt-en-pt" }),
    ("it", ModelPair { to_pivot: "Helsinki-NLP/opus-mt-it-en", from_pivot: "Helsinki-NLP/opus-mt-en-it" }),
];

/// Lookup table from language code to model pair
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    /// Supported languages keyed by ISO 639-1 code
    models: HashMap<&'static str, ModelPair>,
}

impl ModelRegistry {
    /// Build the registry from the declarative table.
    ///
    /// Rows keyed by the pivot or the undetermined sentinel are reserved
    /// and get skipped with a warning.
    pub fn new() -> Self {
        let mut models = HashMap::new();
        for (lang, pair) in SUPPORTED_MODELS {
            if *lang == PIVOT_LANG || *lang == UNDETERMINED {
                warn!("Ignoring registry row for reserved language code '{}'", lang);
                continue;
            }
            models.insert(*lang, *pair);
        }

        Self { models }
    }

    /// Look up the model pair for a language code
    pub fn lookup(&self, lang: &str) -> Option<&ModelPair> {
        self.models.get(lang)
    }

    /// Whether the language has a registered model pair
    pub fn is_supported(&self, lang: &str) -> bool {
        self.models.contains_key(lang)
    }

    /// Supported language codes, sorted for stable output
    pub fn languages(&self) -> Vec<&'static str> {
        let mut languages: Vec<&'static str> = self.models.keys().copied().collect();
        languages.sort_unstable();
        languages
    }

    /// Every model id in the registry, sorted for stable output
    pub fn model_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.models.values()
            .flat_map(|pair| [pair.to_pivot, pair.from_pivot])
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Number of supported languages
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
