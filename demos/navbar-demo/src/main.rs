use es_i18n::{EventLog, FluentValue, I18n, I18nConfig, I18nLoader, Locale};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const NAVBAR_ITEMS: [&str; 5] = ["home", "gear", "settings", "profile", "logout"];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = I18nConfig::from_manifest_dir(manifest_dir)?;
    let events = Arc::new(EventLog::new());
    let i18n = I18nLoader::builder()
        .config(&config)
        .base_dir(manifest_dir)
        .observer(events.clone())
        .build()
        .load()?;

    for tag in ["en", "pt"] {
        i18n.set_active(&tag.parse::<Locale>()?)?;
        run(&i18n, "Ana")?;
    }

    let stats = i18n.stats();
    println!("fallbacks: {}, missing: {}", stats.fallbacks, stats.missing);
    for event in events.take() {
        tracing::debug!("{:?}", event);
    }

    for missing in i18n.missing_keys(&"pt".parse::<Locale>()?) {
        println!("untranslated in pt: {missing}");
    }

    Ok(())
}

fn run(i18n: &I18n, user: &str) -> anyhow::Result<()> {
    println!("Language: {}", i18n.active());

    let items = NAVBAR_ITEMS
        .iter()
        .map(|key| i18n.resolve("navbar", key, None))
        .collect::<Result<Vec<_>, _>>()?;
    println!("| {} |", items.join(" | "));

    let args = HashMap::from([("user", FluentValue::from(user))]);
    println!("{}", i18n.resolve("home", "welcome", Some(&args))?);

    for count in [0, 1, 4] {
        println!("{}", i18n.resolve_plural("home", "activities", count, None)?);
    }

    println!(
        "{}: {}",
        i18n.resolve("gear", "title", None)?,
        i18n.resolve("gear", "gearType.0", None)?
    );
    println!("{}", i18n.resolve("navbar", "search", None)?);
    println!();

    Ok(())
}
