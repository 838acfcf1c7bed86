use crate::bundle::{MessageBundle, Namespace};
use crate::context::ActiveLocale;
use crate::error::{ConfigError, InterpolationError};
use crate::events::{EventCounters, ResolutionEvent, ResolutionObserver, ResolutionStats};
use crate::fallback::resolution_chain;
use crate::locale::Locale;
use crate::registry::BundleRegistry;
use crate::template::{MissingParameter, Template};
use bon::bon;
use fluent_bundle::FluentValue;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Message resolution engine: a [`BundleRegistry`], the active locale and
/// the diagnostics sink, owned together.
///
/// The engine is `Send + Sync`; share it behind an `Arc` when several parts
/// of an application render messages.
pub struct I18n {
    registry: BundleRegistry,
    active: ActiveLocale,
    counters: EventCounters,
    observer: Option<Arc<dyn ResolutionObserver>>,
}

#[bon]
impl I18n {
    /// Creates an engine whose default locale, which is also the initial
    /// active locale, is backed by `default_bundle`.
    #[builder]
    pub fn new(
        default_locale: Locale,
        default_bundle: MessageBundle,
        observer: Option<Arc<dyn ResolutionObserver>>,
    ) -> Self {
        tracing::info!(
            "Initializing i18n with default locale '{}' ({} messages)",
            default_locale,
            default_bundle.len()
        );
        Self {
            active: ActiveLocale::new(default_locale.clone()),
            registry: BundleRegistry::new(default_locale, default_bundle),
            counters: EventCounters::default(),
            observer,
        }
    }
}

impl I18n {
    pub fn registry(&self) -> &BundleRegistry {
        &self.registry
    }

    /// Stores or replaces the whole bundle of `locale`.
    pub fn register(&self, locale: Locale, bundle: MessageBundle) {
        self.registry.register(locale, bundle);
    }

    /// Replaces one namespace of `locale`, keeping the others.
    pub fn register_namespace<I, K, V>(
        &self,
        locale: Locale,
        namespace: &str,
        messages: I,
    ) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let parsed = Namespace::from_messages(namespace, messages)?;
        self.registry.register_namespace(locale, namespace, parsed);
        Ok(())
    }

    pub fn set_default(&self, locale: &Locale) -> Result<(), ConfigError> {
        self.registry.set_default(locale)
    }

    pub fn default_locale(&self) -> Locale {
        self.registry.default_locale()
    }

    pub fn locales(&self) -> Vec<Locale> {
        self.registry.locales()
    }

    pub fn bundle(&self, locale: &Locale) -> Option<Arc<MessageBundle>> {
        self.registry.get(locale)
    }

    /// Switches the active locale. Unregistered locales are refused.
    pub fn set_active(&self, locale: &Locale) -> Result<(), ConfigError> {
        let previous = self.active.set(&self.registry, locale)?;
        tracing::info!("Active locale changed from '{}' to '{}'", previous, locale);
        Ok(())
    }

    pub fn active(&self) -> Locale {
        self.active.get()
    }

    /// Resolves `namespace.key` in the active locale.
    pub fn resolve<'a>(
        &self,
        namespace: &str,
        key: &str,
        args: Option<&HashMap<&str, FluentValue<'a>>>,
    ) -> Result<String, InterpolationError> {
        self.resolve_in(&self.active(), namespace, key, args)
    }

    /// Resolves `namespace.key` in `locale`.
    ///
    /// Falls back along the chain ending at the default locale. When no
    /// locale has the message, `"namespace.key"` is returned as-is.
    pub fn resolve_in<'a>(
        &self,
        locale: &Locale,
        namespace: &str,
        key: &str,
        args: Option<&HashMap<&str, FluentValue<'a>>>,
    ) -> Result<String, InterpolationError> {
        self.with_template(locale, namespace, key, |template, served_by| {
            template
                .render(args, served_by.langid())
                .map_err(|missing| interpolation_error(missing, namespace, key, served_by))
        })
        .unwrap_or_else(|| Ok(placeholder(namespace, key)))
    }

    /// Resolves a `|`-separated plural message in the active locale.
    pub fn resolve_plural<'a>(
        &self,
        namespace: &str,
        key: &str,
        count: i64,
        args: Option<&HashMap<&str, FluentValue<'a>>>,
    ) -> Result<String, InterpolationError> {
        self.resolve_plural_in(&self.active(), namespace, key, count, args)
    }

    /// Resolves a plural message in `locale`.
    ///
    /// `count` and `n` are available to the template unless `args` already
    /// defines them.
    pub fn resolve_plural_in<'a>(
        &self,
        locale: &Locale,
        namespace: &str,
        key: &str,
        count: i64,
        args: Option<&HashMap<&str, FluentValue<'a>>>,
    ) -> Result<String, InterpolationError> {
        let mut merged: HashMap<&str, FluentValue<'a>> = HashMap::new();
        merged.insert("count", FluentValue::from(count));
        merged.insert("n", FluentValue::from(count));
        if let Some(args) = args {
            merged.extend(args.iter().map(|(name, value)| (*name, value.clone())));
        }

        self.with_template(locale, namespace, key, |template, served_by| {
            template
                .render_plural(count, Some(&merged), served_by.langid())
                .map_err(|missing| interpolation_error(missing, namespace, key, served_by))
        })
        .unwrap_or_else(|| Ok(placeholder(namespace, key)))
    }

    pub fn stats(&self) -> ResolutionStats {
        self.counters.snapshot()
    }

    pub fn reset_stats(&self) {
        self.counters.reset();
    }

    /// Messages of the default bundle that `locale` does not define itself,
    /// as sorted `namespace.key` strings.
    pub fn missing_keys(&self, locale: &Locale) -> Vec<String> {
        let Some(reference) = self.registry.get(&self.registry.default_locale()) else {
            return Vec::new();
        };
        let target = self.registry.get(locale);

        let mut missing: Vec<String> = reference
            .keys()
            .filter(|(namespace, key)| {
                !target
                    .as_ref()
                    .is_some_and(|bundle| bundle.contains(namespace, key))
            })
            .map(|(namespace, key)| placeholder(namespace, key))
            .collect();
        missing.sort_unstable();
        missing
    }

    fn with_template<R>(
        &self,
        requested: &Locale,
        namespace: &str,
        key: &str,
        render: impl FnOnce(&Template, &Locale) -> R,
    ) -> Option<R> {
        let default = self.registry.default_locale();

        for (position, candidate) in resolution_chain(requested, &default).iter().enumerate() {
            let Some(bundle) = self.registry.get(candidate) else {
                continue;
            };
            let Some(template) = bundle.get(namespace, key) else {
                continue;
            };

            if position > 0 {
                self.emit(ResolutionEvent::Fallback {
                    requested: requested.clone(),
                    served_by: candidate.clone(),
                    namespace: namespace.to_string(),
                    key: key.to_string(),
                });
            }
            return Some(render(template, candidate));
        }

        self.emit(ResolutionEvent::MissingKey {
            requested: requested.clone(),
            namespace: namespace.to_string(),
            key: key.to_string(),
        });
        None
    }

    fn emit(&self, event: ResolutionEvent) {
        match &event {
            ResolutionEvent::Fallback {
                requested,
                served_by,
                namespace,
                key,
            } => tracing::debug!(
                "Message '{}.{}' not found in '{}', using '{}'",
                namespace,
                key,
                requested,
                served_by
            ),
            ResolutionEvent::MissingKey {
                requested,
                namespace,
                key,
            } => tracing::warn!(
                "Translation for '{}.{}' not found in '{}' or any fallback locale",
                namespace,
                key,
                requested
            ),
        }

        self.counters.record(&event);
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("registry", &self.registry)
            .field("active", &self.active)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

fn placeholder(namespace: &str, key: &str) -> String {
    format!("{}.{}", namespace, key)
}

fn interpolation_error(
    missing: MissingParameter,
    namespace: &str,
    key: &str,
    locale: &Locale,
) -> InterpolationError {
    InterpolationError {
        name: missing.0,
        namespace: namespace.to_string(),
        key: key.to_string(),
        locale: locale.clone(),
    }
}
