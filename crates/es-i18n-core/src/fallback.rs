use crate::locale::Locale;
use fluent_fallback::env::LocalesProvider;
use unic_langid::LanguageIdentifier;

/// The requested locale, followed by its bare language when it carries
/// script, region or variant subtags.
pub fn fallback_locales(requested: &LanguageIdentifier) -> impl LocalesProvider {
    let mut locales = vec![requested.clone()];

    if requested.script.is_some()
        || requested.region.is_some()
        || requested.variants().next().is_some()
    {
        locales.push(LanguageIdentifier::from_parts(
            requested.language,
            None,
            None,
            &[],
        ));
    }

    locales
}

/// The locales consulted, in order, when resolving a message for `requested`.
///
/// The default locale always terminates the chain and no locale appears
/// twice.
pub fn resolution_chain(requested: &Locale, default: &Locale) -> Vec<Locale> {
    let mut chain: Vec<Locale> = fallback_locales(requested.langid())
        .locales()
        .map(Locale::from)
        .collect();

    if !chain.contains(default) {
        chain.push(default.clone());
    }

    chain
}
