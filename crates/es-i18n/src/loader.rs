use crate::error::LoadError;
use crate::source::{BundleSource, FsBundleSource};
use bon::Builder;
use es_i18n_core::{I18n, Locale, ResolutionObserver};
use es_i18n_toml::I18nConfig;
use std::path::PathBuf;
use std::sync::Arc;

/// Builds an [`I18n`] engine from an `i18n.toml` configuration.
#[derive(Builder)]
pub struct I18nLoader<'a> {
    config: &'a I18nConfig,
    /// Directory `assets_dir` is relative to. Defaults to
    /// `CARGO_MANIFEST_DIR`.
    #[builder(into)]
    base_dir: Option<PathBuf>,
    /// Receives every fallback and missing-key event of the built engine.
    observer: Option<Arc<dyn ResolutionObserver>>,
}

impl I18nLoader<'_> {
    /// The filesystem source described by the configuration.
    pub fn fs_source(&self) -> Result<FsBundleSource, LoadError> {
        let base_dir = self.base_dir.as_deref();
        self.config.validate_assets_dir_from_base(base_dir)?;
        let root = self.config.assets_dir_from_base(base_dir)?;
        Ok(FsBundleSource::new(root).with_namespaces(self.config.namespace_paths()))
    }

    /// Loads every configured locale from the assets directory.
    pub fn load(&self) -> Result<I18n, LoadError> {
        let source = self.fs_source()?;
        self.load_from(&source)
    }

    /// Loads every configured locale from `source`.
    ///
    /// The default locale is loaded first and must exist. Then each locale
    /// of `registered_locales`, or each locale the source offers when that
    /// list is absent, is registered. Finally `initial_locale` is activated.
    pub fn load_from<S: BundleSource + ?Sized>(&self, source: &S) -> Result<I18n, LoadError> {
        let default_locale = Locale::from(self.config.default_locale_identifier()?);
        let default_bundle = source.load(&default_locale)?;

        let i18n = I18n::builder()
            .default_locale(default_locale.clone())
            .default_bundle(default_bundle)
            .maybe_observer(self.observer.clone())
            .build();

        let locales: Vec<Locale> = match self.config.registered_locale_identifiers()? {
            Some(identifiers) => identifiers.into_iter().map(Locale::from).collect(),
            None => source.available_locales()?,
        };

        for locale in locales {
            if locale == default_locale {
                continue;
            }
            let bundle = source.load(&locale)?;
            tracing::debug!(
                "Registering locale '{}' ({} messages)",
                locale,
                bundle.len()
            );
            i18n.register(locale, bundle);
        }

        if let Some(initial) = self.config.initial_locale_identifier()? {
            i18n.set_active(&Locale::from(initial))?;
        }

        tracing::info!(
            "Loaded {} locales, active locale '{}'",
            i18n.locales().len(),
            i18n.active()
        );
        Ok(i18n)
    }
}
