use super::BundleSource;
use super::json::{bundle_from_json_files, is_json};
use crate::error::LoadError;
use es_i18n_core::{Locale, MessageBundle};
use es_i18n_toml::{LocaleDir, locale_dirs_from_names};
use path_slash::PathBufExt as _;
use rust_embed::RustEmbed;
use std::collections::{BTreeMap, BTreeSet};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Reads message files compiled into the binary with `rust-embed`.
///
/// The embedded folder must follow the `{locale}/**/*.json` layout.
///
/// ```rust,ignore
/// #[derive(rust_embed::RustEmbed)]
/// #[folder = "i18n/"]
/// struct Assets;
///
/// let source = EmbeddedBundleSource::<Assets>::new();
/// ```
pub struct EmbeddedBundleSource<T: RustEmbed> {
    namespaces: BTreeMap<String, PathBuf>,
    _assets: PhantomData<fn() -> T>,
}

impl<T: RustEmbed> EmbeddedBundleSource<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            namespaces: BTreeMap::new(),
            _assets: PhantomData,
        }
    }

    #[must_use]
    pub fn with_namespaces(mut self, namespaces: BTreeMap<String, PathBuf>) -> Self {
        self.namespaces = namespaces;
        self
    }
}

impl<T: RustEmbed> Default for EmbeddedBundleSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RustEmbed> EmbeddedBundleSource<T> {
    fn locale_dirs(&self) -> Result<Vec<LocaleDir>, LoadError> {
        let names: BTreeSet<String> = T::iter()
            .filter_map(|file| {
                let (dir, rest) = file.split_once('/')?;
                is_json(Path::new(rest)).then(|| dir.to_string())
            })
            .collect();
        Ok(locale_dirs_from_names(names)?)
    }
}

impl<T: RustEmbed> BundleSource for EmbeddedBundleSource<T> {
    fn available_locales(&self) -> Result<Vec<Locale>, LoadError> {
        Ok(self
            .locale_dirs()?
            .into_iter()
            .map(|dir| Locale::from(dir.language))
            .collect())
    }

    fn load(&self, locale: &Locale) -> Result<MessageBundle, LoadError> {
        let Some(dir) = self
            .locale_dirs()?
            .into_iter()
            .find(|dir| dir.language == *locale.langid())
        else {
            return Err(LoadError::LocaleNotFound(locale.clone()));
        };

        let prefix = format!("{}/", dir.dir_name);
        let mut files = Vec::new();
        for file in T::iter() {
            let Some(relative) = file.strip_prefix(&prefix) else {
                continue;
            };
            if !is_json(Path::new(relative)) {
                continue;
            }
            if let Some(embedded) = T::get(&file) {
                files.push((PathBuf::from_slash(relative), embedded.data.into_owned()));
            }
        }

        if files.is_empty() {
            return Err(LoadError::LocaleNotFound(locale.clone()));
        }
        bundle_from_json_files(locale, files, &self.namespaces)
    }
}
