use crate::locale::Locale;
use crate::template::TemplateError;
use thiserror::Error;
use unic_langid::LanguageIdentifierError;

/// Invalid startup or runtime configuration.
///
/// These are programmer errors and are expected to abort initialization.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A locale identifier was empty or whitespace.
    #[error("Locale identifier must not be empty")]
    EmptyLocale,
    /// A locale identifier could not be parsed.
    #[error("Invalid locale identifier '{name}'")]
    InvalidLocale {
        /// The rejected identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
    /// The operation requires a bundle for a locale that was never registered.
    #[error("Locale '{0}' has no registered bundle")]
    LocaleNotRegistered(Locale),
    /// A message template is malformed.
    #[error("Invalid template for '{namespace}.{key}': {source}")]
    InvalidTemplate {
        namespace: String,
        key: String,
        #[source]
        source: TemplateError,
    },
    /// The same key was supplied twice for one namespace.
    #[error("Duplicate key '{key}' in namespace '{namespace}'")]
    DuplicateKey { namespace: String, key: String },
    /// The same namespace was supplied twice for one bundle.
    #[error("Duplicate namespace '{0}'")]
    DuplicateNamespace(String),
}

/// A template references a parameter the call site did not supply.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error(
    "Missing parameter '{name}' for message '{namespace}.{key}' (resolved in locale '{locale}')"
)]
pub struct InterpolationError {
    /// The placeholder name without braces.
    pub name: String,
    pub namespace: String,
    pub key: String,
    /// The locale whose template was being rendered.
    pub locale: Locale,
}
