use super::BundleSource;
use super::json::{bundle_from_json_files, is_json};
use crate::error::LoadError;
use es_i18n_core::{Locale, MessageBundle};
use es_i18n_toml::discover_locale_dirs;
use fs_err as fs;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Reads message files from `{root}/{locale}/**/*.json` on disk.
#[derive(Clone, Debug)]
pub struct FsBundleSource {
    root: PathBuf,
    namespaces: BTreeMap<String, PathBuf>,
}

impl FsBundleSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            namespaces: BTreeMap::new(),
        }
    }

    /// Sets the explicit namespace to file mapping, paths relative to each
    /// locale directory.
    #[must_use]
    pub fn with_namespaces(mut self, namespaces: BTreeMap<String, PathBuf>) -> Self {
        self.namespaces = namespaces;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collect_files(&self, locale_dir: &Path) -> Result<Vec<(PathBuf, Vec<u8>)>, LoadError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(locale_dir).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_json(path) {
                continue;
            }

            let relative = path
                .strip_prefix(locale_dir)
                .unwrap_or(path)
                .to_path_buf();
            files.push((relative, fs::read(path)?));
        }
        Ok(files)
    }
}

impl BundleSource for FsBundleSource {
    fn available_locales(&self) -> Result<Vec<Locale>, LoadError> {
        Ok(discover_locale_dirs(&self.root)?
            .into_iter()
            .map(|dir| Locale::from(dir.language))
            .collect())
    }

    fn load(&self, locale: &Locale) -> Result<MessageBundle, LoadError> {
        let Some(dir) = discover_locale_dirs(&self.root)?
            .into_iter()
            .find(|dir| dir.language == *locale.langid())
        else {
            return Err(LoadError::LocaleNotFound(locale.clone()));
        };

        let locale_dir = self.root.join(&dir.dir_name);
        let files = self.collect_files(&locale_dir)?;
        if files.is_empty() {
            return Err(LoadError::LocaleNotFound(locale.clone()));
        }

        tracing::debug!(
            "Reading {} message files for locale '{}' from {}",
            files.len(),
            locale,
            locale_dir.display()
        );
        bundle_from_json_files(locale, files, &self.namespaces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use es_i18n_toml::I18nConfigError;
    use std::fs;
    use tempfile::TempDir;
    use unic_langid::langid;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn walks_nested_directories() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "en/homeView.json", r#"{"title": "Home"}"#);
        write(temp.path(), "en/gears/gearView.json", r#"{"title": "Gears"}"#);
        write(temp.path(), "en/notes.txt", "not a message file");

        let source = FsBundleSource::new(temp.path());
        let bundle = source.load(&Locale::from(langid!("en"))).unwrap();

        assert_eq!(bundle.len(), 2);
        assert!(bundle.contains("homeView", "title"));
        assert!(bundle.contains("gearView", "title"));
    }

    #[test]
    fn lists_locale_directories_sorted() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pt/a.json", "{}");
        write(temp.path(), "en/a.json", "{}");
        write(temp.path(), "pt-BR/a.json", "{}");
        write(temp.path(), "README.md", "ignored");

        let locales = FsBundleSource::new(temp.path())
            .available_locales()
            .unwrap();
        let tags: Vec<String> = locales.iter().map(ToString::to_string).collect();
        assert_eq!(tags, vec!["en", "pt", "pt-BR"]);
    }

    #[test]
    fn non_canonical_directory_names_load() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "en/home.json", r#"{"title": "Home"}"#);
        write(temp.path(), "pt-br/home.json", r#"{"title": "Início"}"#);

        let source = FsBundleSource::new(temp.path());
        let pt_br = Locale::from(langid!("pt-BR"));
        assert_eq!(
            source.available_locales().unwrap(),
            vec![Locale::from(langid!("en")), pt_br.clone()]
        );

        let bundle = source.load(&pt_br).unwrap();
        assert_eq!(bundle.get("home", "title").unwrap().as_str(), "Início");
    }

    #[test]
    fn directories_follow_config_locale_rules() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "en/home.json", "{}");
        write(temp.path(), "de-DE-1996/home.json", "{}");

        let err = FsBundleSource::new(temp.path())
            .available_locales()
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Config(I18nConfigError::UnsupportedLanguageIdentifier { .. })
        ));
    }

    #[test]
    fn locale_without_files_is_not_found() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("pt")).unwrap();

        let source = FsBundleSource::new(temp.path());
        for tag in [langid!("pt"), langid!("de")] {
            let err = source.load(&Locale::from(tag)).unwrap_err();
            assert!(matches!(err, LoadError::LocaleNotFound(_)));
        }
    }
}
