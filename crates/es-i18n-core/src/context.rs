use crate::error::ConfigError;
use crate::locale::Locale;
use crate::registry::BundleRegistry;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// The locale used by resolution calls that do not name one explicitly.
#[derive(Debug)]
pub struct ActiveLocale {
    current: ArcSwap<Locale>,
}

impl ActiveLocale {
    pub fn new(initial: Locale) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    pub fn get(&self) -> Locale {
        Locale::clone(&self.current.load())
    }

    /// Switches to `locale`, returning the previously active locale.
    ///
    /// Fails without touching the current value when `registry` holds no
    /// bundle for `locale`.
    pub fn set(&self, registry: &BundleRegistry, locale: &Locale) -> Result<Locale, ConfigError> {
        if !registry.contains(locale) {
            return Err(ConfigError::LocaleNotRegistered(locale.clone()));
        }
        let previous = self.current.swap(Arc::new(locale.clone()));
        Ok(Locale::clone(&previous))
    }
}
