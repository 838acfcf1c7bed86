#![doc = include_str!("../README.md")]

use fs_err as fs;
use path_slash::PathBufExt as _;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{env, io};
use thiserror::Error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

/// File name looked up in a manifest directory.
pub const CONFIG_FILE_NAME: &str = "i18n.toml";

#[derive(Debug, Error)]
pub enum I18nConfigError {
    /// Configuration file not found.
    #[error("i18n.toml configuration file not found")]
    NotFound,
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A locale field was present but empty.
    #[error("The '{field}' locale must not be empty")]
    EmptyLanguageIdentifier {
        /// The configuration field holding the empty value.
        field: &'static str,
    },
    /// Encountered an invalid language identifier.
    #[error("Invalid language identifier '{name}' in '{field}'")]
    InvalidLanguageIdentifier {
        /// Where the identifier came from (a config field or the assets directory).
        field: &'static str,
        /// The invalid identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
    /// Two locale directories normalize to the same language identifier.
    #[error("Locale directories '{first}' and '{second}' both name '{name}'")]
    AmbiguousLanguageDirectory {
        /// The normalized identifier.
        name: String,
        /// The directory found first.
        first: String,
        /// The conflicting directory.
        second: String,
    },
    /// Encountered a language identifier that uses an unsupported subtag combination.
    #[error("Language identifier '{name}' is not supported: {reason}")]
    UnsupportedLanguageIdentifier {
        /// The invalid identifier.
        name: String,
        /// Explanation of why it is not supported.
        reason: String,
    },
}

/// The configuration for `es-i18n`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct I18nConfig {
    /// The default locale (e.g. "en"). Its bundle is required and every
    /// other locale falls back to it.
    pub default_locale: String,
    /// Path to the assets directory containing message files.
    /// Expected structure: {assets_dir}/{locale}/**/*.json
    pub assets_dir: PathBuf,
    /// Locales to register. When absent, every locale directory under
    /// `assets_dir` is registered.
    #[serde(default)]
    pub registered_locales: Option<Vec<String>>,
    /// Locale to activate after loading. Defaults to `default_locale`.
    #[serde(default)]
    pub initial_locale: Option<String>,
    /// Explicit namespace to file mapping, relative to each locale directory.
    /// Files not listed here use their file stem as namespace.
    ///
    /// # Examples
    ///
    /// ```toml
    /// [namespaces]
    /// navbar = "components/navbarComponent.json"
    /// ```
    #[serde(default)]
    pub namespaces: Option<BTreeMap<String, String>>,
}

impl I18nConfig {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, I18nConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(I18nConfigError::NotFound);
        }

        let content = fs::read_to_string(path)?;

        let config: I18nConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// Reads `i18n.toml` from the given directory.
    pub fn from_manifest_dir(manifest_dir: &Path) -> Result<Self, I18nConfigError> {
        Self::read_from_path(manifest_dir.join(CONFIG_FILE_NAME))
    }

    /// Returns the path to the assets directory from a base directory.
    /// If `base_dir` is `None`, uses `CARGO_MANIFEST_DIR` environment variable.
    pub fn assets_dir_from_base(
        &self,
        base_dir: Option<&Path>,
    ) -> Result<PathBuf, I18nConfigError> {
        let base = match base_dir {
            Some(dir) => dir.to_path_buf(),
            None => {
                let manifest_dir =
                    env::var("CARGO_MANIFEST_DIR").map_err(|_| I18nConfigError::NotFound)?;
                PathBuf::from(manifest_dir)
            },
        };

        Ok(base.join(&self.assets_dir))
    }

    /// Checks that the assets directory exists and is a directory.
    pub fn validate_assets_dir_from_base(
        &self,
        base_dir: Option<&Path>,
    ) -> Result<(), I18nConfigError> {
        let assets_path = self.assets_dir_from_base(base_dir)?;

        if !assets_path.exists() {
            return Err(I18nConfigError::ReadError(io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "Assets directory '{}' does not exist",
                    assets_path.display()
                ),
            )));
        }

        if !assets_path.is_dir() {
            return Err(I18nConfigError::ReadError(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Assets path '{}' is not a directory", assets_path.display()),
            )));
        }

        Ok(())
    }

    /// Returns the configured default locale as a `LanguageIdentifier`.
    pub fn default_locale_identifier(&self) -> Result<LanguageIdentifier, I18nConfigError> {
        parse_language_identifier("default_locale", &self.default_locale)
    }

    /// Returns the configured locales, or `None` when they should be
    /// discovered from the assets directory.
    pub fn registered_locale_identifiers(
        &self,
    ) -> Result<Option<Vec<LanguageIdentifier>>, I18nConfigError> {
        self.registered_locales
            .as_ref()
            .map(|locales| {
                locales
                    .iter()
                    .map(|raw| parse_language_identifier("registered_locales", raw))
                    .collect()
            })
            .transpose()
    }

    pub fn initial_locale_identifier(
        &self,
    ) -> Result<Option<LanguageIdentifier>, I18nConfigError> {
        self.initial_locale
            .as_deref()
            .map(|raw| parse_language_identifier("initial_locale", raw))
            .transpose()
    }

    /// Explicit namespace files, with `/` separated paths converted for the
    /// current platform.
    pub fn namespace_paths(&self) -> BTreeMap<String, PathBuf> {
        self.namespaces
            .iter()
            .flatten()
            .map(|(namespace, path)| (namespace.clone(), PathBuf::from_slash(path)))
            .collect()
    }
}

/// A locale directory: the identifier it names and its name on disk.
///
/// The two differ when the directory is not written in canonical form
/// (`pt-br` or `pt_BR` for `pt-BR`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleDir {
    pub language: LanguageIdentifier,
    pub dir_name: String,
}

/// Lists the locale directories directly under `assets_path`, sorted by
/// normalized tag. Plain files are ignored.
pub fn discover_locale_dirs(assets_path: &Path) -> Result<Vec<LocaleDir>, I18nConfigError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(assets_path)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name().into_string().map_err(|raw| {
            I18nConfigError::ReadError(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Assets directory contains a non UTF-8 entry: {:?}", raw),
            ))
        })?;
        names.push(name);
    }

    locale_dirs_from_names(names)
}

/// Parses directory names as locales with the same rules as the config
/// fields, sorted by normalized tag.
///
/// Fails when a name is not a supported locale or when two names normalize
/// to the same locale.
pub fn locale_dirs_from_names<I, S>(names: I) -> Result<Vec<LocaleDir>, I18nConfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut by_tag: BTreeMap<String, LocaleDir> = BTreeMap::new();
    for name in names {
        let dir_name = name.into();
        let language = parse_language_identifier("assets_dir", &dir_name)?;
        let tag = language.to_string();

        if let Some(existing) = by_tag.get(&tag) {
            if existing.dir_name == dir_name {
                continue;
            }
            return Err(I18nConfigError::AmbiguousLanguageDirectory {
                name: tag,
                first: existing.dir_name.clone(),
                second: dir_name,
            });
        }
        by_tag.insert(tag, LocaleDir { language, dir_name });
    }

    Ok(by_tag.into_values().collect())
}

/// Parses a locale tag from the config or the assets directory.
///
/// `field` names where the tag came from in errors. Empty tags and tags with
/// variant subtags are rejected.
pub fn parse_language_identifier(
    field: &'static str,
    raw: &str,
) -> Result<LanguageIdentifier, I18nConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(I18nConfigError::EmptyLanguageIdentifier { field });
    }

    let lang = trimmed.parse::<LanguageIdentifier>().map_err(|source| {
        I18nConfigError::InvalidLanguageIdentifier {
            field,
            name: raw.to_string(),
            source,
        }
    })?;

    ensure_supported_language_identifier(&lang, raw)?;
    Ok(lang)
}

fn ensure_supported_language_identifier(
    lang: &LanguageIdentifier,
    original: &str,
) -> Result<(), I18nConfigError> {
    if lang.variants().next().is_some() {
        return Err(I18nConfigError::UnsupportedLanguageIdentifier {
            name: original.to_string(),
            reason: "variants are not supported".to_string(),
        });
    }

    Ok(())
}
