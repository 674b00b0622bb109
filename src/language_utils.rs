use anyhow::{Result, anyhow};
use isolang::Language;

/// Target language utilities
///
/// Translation supports a small closed set of target languages. Callers may
/// pass the English language name ("vietnamese") or an ISO 639-1/639-3 code
/// ("vi", "vie"); anything else is a validation error, surfaced before any
/// network activity.
/// Supported translation target language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLanguage {
    /// English
    English,
    /// Vietnamese
    Vietnamese,
}

impl TargetLanguage {
    /// All supported target languages
    pub fn supported() -> &'static [TargetLanguage] {
        &[TargetLanguage::English, TargetLanguage::Vietnamese]
    }

    /// Capitalized language name, as used in translation prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Vietnamese => "Vietnamese",
        }
    }

    /// ISO 639-1 code for the language
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Vietnamese => "vi",
        }
    }

    /// Parse a user-supplied language selector.
    ///
    /// Accepts the lowercase English name or an ISO 639-1/639-3 code,
    /// resolved through isolang so "vie" and "vi" both map to Vietnamese.
    pub fn parse(input: &str) -> Result<TargetLanguage> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "english" => return Ok(Self::English),
            "vietnamese" => return Ok(Self::Vietnamese),
            _ => {}
        }

        let language = match normalized.len() {
            2 => Language::from_639_1(&normalized),
            3 => Language::from_639_3(&normalized),
            _ => None,
        };

        match language {
            Some(lang) if lang == Language::Eng => Ok(Self::English),
            Some(lang) if lang == Language::Vie => Ok(Self::Vietnamese),
            _ => Err(anyhow!("Unsupported target language: {}", input)),
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name().to_lowercase())
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
