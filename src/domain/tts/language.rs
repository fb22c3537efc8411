use serde::{Deserialize, Serialize};

/// Backend language identifiers supported by the TTS system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "pt-br")]
    BrazilianPortuguese,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
}

/// Language used when a voice code is not in the catalog
pub const DEFAULT_LANGUAGE: LanguageCode = LanguageCode::English;

/// Voice code used when a request does not name one
pub const DEFAULT_VOICE: &str = "pt-BR";

/// A selectable voice
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Voice {
    pub code: &'static str,
    pub label: &'static str,
    #[serde(skip)]
    pub language: LanguageCode,
}

pub const VOICES: &[Voice] = &[
    Voice {
        code: "pt-BR",
        label: "Português (Brasil)",
        language: LanguageCode::BrazilianPortuguese,
    },
    Voice {
        code: "en-US",
        label: "English (US)",
        language: LanguageCode::English,
    },
    Voice {
        code: "es-ES",
        label: "Español (España)",
        language: LanguageCode::Spanish,
    },
    Voice {
        code: "fr-FR",
        label: "Français",
        language: LanguageCode::French,
    },
    Voice {
        code: "de-DE",
        label: "Deutsch",
        language: LanguageCode::German,
    },
    Voice {
        code: "it-IT",
        label: "Italiano",
        language: LanguageCode::Italian,
    },
    Voice {
        code: "pt-PT",
        label: "Português (Portugal)",
        language: LanguageCode::Portuguese,
    },
];

impl LanguageCode {
    /// Get the backend language identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::BrazilianPortuguese => "pt-br",
            LanguageCode::Portuguese => "pt",
            LanguageCode::Spanish => "es",
            LanguageCode::French => "fr",
            LanguageCode::German => "de",
            LanguageCode::Italian => "it",
        }
    }

    /// Map a voice code (e.g. `en-US`) to its language.
    /// Unknown codes fall back to [`DEFAULT_LANGUAGE`] instead of failing.
    pub fn from_voice(voice: &str) -> Self {
        match find_voice(voice) {
            Some(v) => v.language,
            None => {
                tracing::warn!(voice = voice, fallback = %DEFAULT_LANGUAGE, "Unknown voice code, using default language");
                DEFAULT_LANGUAGE
            }
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn find_voice(code: &str) -> Option<&'static Voice> {
    VOICES.iter().find(|v| v.code == code)
}

/// Display label of a voice, or the code itself when unknown
pub fn voice_label(code: &str) -> &str {
    find_voice(code).map(|v| v.label).unwrap_or(code)
}
