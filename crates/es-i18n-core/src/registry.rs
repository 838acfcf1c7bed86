use crate::bundle::{MessageBundle, Namespace};
use crate::error::ConfigError;
use crate::locale::Locale;
use arc_swap::ArcSwap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// One [`MessageBundle`] per locale plus the designated default locale.
///
/// Bundles are stored behind `Arc` and replaced as a whole, so a reader
/// holding a bundle never sees it change underneath it.
#[derive(Debug)]
pub struct BundleRegistry {
    bundles: RwLock<FxHashMap<Locale, Arc<MessageBundle>>>,
    default_locale: ArcSwap<Locale>,
}

impl BundleRegistry {
    /// Creates a registry whose default locale is backed by `default_bundle`.
    pub fn new(default_locale: Locale, default_bundle: MessageBundle) -> Self {
        let mut bundles = FxHashMap::default();
        bundles.insert(default_locale.clone(), Arc::new(default_bundle));
        Self {
            bundles: RwLock::new(bundles),
            default_locale: ArcSwap::from_pointee(default_locale),
        }
    }

    /// Stores or replaces the bundle for `locale`, returning the previous one.
    pub fn register(&self, locale: Locale, bundle: MessageBundle) -> Option<Arc<MessageBundle>> {
        tracing::debug!(
            "Registering bundle for locale '{}' ({} messages)",
            locale,
            bundle.len()
        );
        self.bundles.write().insert(locale, Arc::new(bundle))
    }

    /// Replaces a single namespace of `locale`.
    ///
    /// The rest of the bundle is carried over and the result is swapped in as
    /// a new bundle. An unregistered locale starts from an empty bundle.
    pub fn register_namespace(&self, locale: Locale, name: &str, namespace: Namespace) {
        let mut bundles = self.bundles.write();
        let base = bundles
            .get(&locale)
            .map(|bundle| MessageBundle::clone(bundle))
            .unwrap_or_default();
        tracing::debug!(
            "Registering namespace '{}' for locale '{}' ({} messages)",
            name,
            locale,
            namespace.len()
        );
        bundles.insert(locale, Arc::new(base.with_parsed_namespace(name, namespace)));
    }

    /// Makes `locale` the default locale. It must already have a bundle.
    pub fn set_default(&self, locale: &Locale) -> Result<(), ConfigError> {
        if !self.contains(locale) {
            return Err(ConfigError::LocaleNotRegistered(locale.clone()));
        }
        self.default_locale.store(Arc::new(locale.clone()));
        Ok(())
    }

    pub fn get(&self, locale: &Locale) -> Option<Arc<MessageBundle>> {
        self.bundles.read().get(locale).cloned()
    }

    pub fn contains(&self, locale: &Locale) -> bool {
        self.bundles.read().contains_key(locale)
    }

    pub fn default_locale(&self) -> Locale {
        Locale::clone(&self.default_locale.load())
    }

    /// Registered locales, sorted by tag.
    pub fn locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self.bundles.read().keys().cloned().collect();
        locales.sort_by_key(ToString::to_string);
        locales
    }
}
