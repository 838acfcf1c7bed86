use es_i18n_core::{ConfigError, Locale};
use es_i18n_toml::I18nConfigError;
use thiserror::Error;

/// Errors raised while reading message bundles and building an engine.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] I18nConfigError),

    #[error(transparent)]
    Bundle(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid UTF-8 in '{path}'")]
    Utf8 {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Message file '{0}' must contain a JSON object")]
    NotAnObject(String),

    #[error("Unsupported value for '{key}' in '{path}': messages must be strings")]
    UnsupportedValue { path: String, key: String },

    #[error("No message files found for locale '{0}'")]
    LocaleNotFound(Locale),
}
