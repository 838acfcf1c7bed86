use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A language tag such as `en`, `pt-BR` or `zh-Hans`.
///
/// Parsing goes through `unic-langid`, so comparison is case-normalized:
/// `EN-us` and `en-US` are the same locale.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Locale(LanguageIdentifier);

impl Locale {
    /// Parses a locale tag, rejecting empty input.
    pub fn parse(tag: &str) -> Result<Self, ConfigError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyLocale);
        }

        trimmed
            .parse::<LanguageIdentifier>()
            .map(Self)
            .map_err(|source| ConfigError::InvalidLocale {
                name: tag.to_string(),
                source,
            })
    }

    pub fn langid(&self) -> &LanguageIdentifier {
        &self.0
    }

    /// Returns `true` when the tag carries script, region or variant subtags.
    pub fn has_subtags(&self) -> bool {
        self.0.script.is_some() || self.0.region.is_some() || self.0.variants().next().is_some()
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<LanguageIdentifier> for Locale {
    fn from(langid: LanguageIdentifier) -> Self {
        Self(langid)
    }
}

impl From<Locale> for LanguageIdentifier {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl AsRef<LanguageIdentifier> for Locale {
    fn as_ref(&self) -> &LanguageIdentifier {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
