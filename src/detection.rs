/*!
 * Language detection for incoming queries.
 *
 * Detection runs locally through the whatlang classifier, so user text never
 * leaves the process just to find out what language it is in. Detected codes
 * are normalized to ISO 639-1 through isolang; anything the classifier cannot
 * place resolves to the [`UNDETERMINED`] sentinel instead of an error.
 */

use std::fmt::Debug;

/// Sentinel code for text whose language could not be established
pub const UNDETERMINED: &str = "und";

/// Resolves the dominant language of a piece of text.
///
/// Implementations must be infallible: text that cannot be classified maps
/// to [`UNDETERMINED`] rather than an error, so callers can treat the result
/// as a plain routing key.
pub trait LanguageDetector: Send + Sync + Debug {
    /// Detect the language of `text`, returning a lowercase ISO 639-1 code
    /// or [`UNDETERMINED`] when no language can be established
    fn detect_language(&self, text: &str) -> String;
}

/// Detector backed by the whatlang trigram classifier
#[derive(Debug, Default, Clone)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    /// Create a new detector
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect_language(&self, text: &str) -> String {
        let Some(info) = whatlang::detect(text) else {
            return UNDETERMINED.to_string();
        };

        // whatlang reports ISO 639-3 codes; the registry is keyed by 639-1
        let code = isolang::Language::from_639_3(info.lang().code())
            .and_then(|lang| lang.to_639_1());

        match code {
            Some(two_letter) => {
                log::debug!(
                    "Detected language '{}' with confidence {:.2}",
                    two_letter,
                    info.confidence()
                );
                two_letter.to_string()
            }
            None => UNDETERMINED.to_string(),
        }
    }
}
