use es_i18n::{
    BundleSource, ConfigError, EmbeddedBundleSource, EventLog, FluentValue, FsBundleSource,
    I18nConfig, I18nConfigError, I18nLoader, LoadError, Locale, ResolutionEvent,
};
use rstest::rstest;
use rust_embed::RustEmbed;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use unic_langid::langid;

#[derive(RustEmbed)]
#[folder = "tests/fixtures/i18n/"]
struct FixtureAssets;

#[derive(RustEmbed)]
#[folder = "tests/fixtures/i18n-regional/"]
struct RegionalAssets;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn en() -> Locale {
    Locale::from(langid!("en"))
}

fn pt() -> Locale {
    Locale::from(langid!("pt"))
}

fn config() -> I18nConfig {
    I18nConfig {
        default_locale: "en".to_string(),
        assets_dir: PathBuf::from("i18n"),
        registered_locales: None,
        initial_locale: None,
        namespaces: Some(BTreeMap::from([
            (
                "navbar".to_string(),
                "components/navbarComponent.json".to_string(),
            ),
            ("home".to_string(), "homeView.json".to_string()),
            ("gear".to_string(), "gears/gearView.json".to_string()),
        ])),
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn loads_every_discovered_locale() {
    let config = config();
    let i18n = I18nLoader::builder()
        .config(&config)
        .base_dir(fixtures_dir())
        .build()
        .load()
        .unwrap();

    assert_eq!(i18n.default_locale(), en());
    assert_eq!(i18n.active(), en());
    assert_eq!(i18n.locales(), vec![en(), pt()]);

    assert_eq!(i18n.resolve_in(&pt(), "navbar", "home", None).unwrap(), "Início");
    assert_eq!(
        i18n.resolve_in(&en(), "home", "stats.thisMonth", None).unwrap(),
        "This month"
    );
    assert_eq!(
        i18n.resolve_in(&en(), "gear", "gearType.1", None).unwrap(),
        "Shoes"
    );
}

#[rstest]
#[case("en", "navbar", "home", "Home")]
#[case("pt", "navbar", "home", "Início")]
#[case("pt", "home", "stats.thisWeek", "Esta semana")]
#[case("pt", "home", "stats.thisMonth", "This month")]
#[case("pt", "gear", "gearType.2", "Wetsuit")]
fn resolves_flattened_keys(
    #[case] locale: &str,
    #[case] namespace: &str,
    #[case] key: &str,
    #[case] expected: &str,
) {
    let config = config();
    let i18n = I18nLoader::builder()
        .config(&config)
        .base_dir(fixtures_dir())
        .build()
        .load()
        .unwrap();

    let locale: Locale = locale.parse().unwrap();
    assert_eq!(i18n.resolve_in(&locale, namespace, key, None).unwrap(), expected);
}

#[test]
fn pt_falls_back_to_en_for_untranslated_keys() {
    let mut config = config();
    config.initial_locale = Some("pt".to_string());

    let i18n = I18nLoader::builder()
        .config(&config)
        .base_dir(fixtures_dir())
        .build()
        .load()
        .unwrap();

    assert_eq!(i18n.active(), pt());
    assert_eq!(i18n.resolve("navbar", "logout", None).unwrap(), "Sair");
    assert_eq!(i18n.resolve("navbar", "settings", None).unwrap(), "Settings");
    assert_eq!(i18n.resolve("gear", "title", None).unwrap(), "Gear");
    assert_eq!(i18n.resolve("navbar", "unknown", None).unwrap(), "navbar.unknown");

    let stats = i18n.stats();
    assert_eq!(stats.fallbacks, 2);
    assert_eq!(stats.missing, 1);

    let missing = i18n.missing_keys(&pt());
    assert!(missing.contains(&"navbar.settings".to_string()));
    assert!(missing.contains(&"home.activities".to_string()));
    assert!(!missing.contains(&"navbar.home".to_string()));
}

#[test]
fn plural_and_placeholders_from_files() {
    let config = config();
    let i18n = I18nLoader::builder()
        .config(&config)
        .base_dir(fixtures_dir())
        .build()
        .load()
        .unwrap();

    let args = HashMap::from([("user", FluentValue::from("Ana"))]);
    assert_eq!(
        i18n.resolve_in(&pt(), "home", "title", Some(&args)).unwrap(),
        "Bem-vindo de volta, Ana"
    );

    assert_eq!(
        i18n.resolve_plural("home", "activities", 0, None).unwrap(),
        "no activities"
    );
    assert_eq!(
        i18n.resolve_plural("home", "activities", 1, None).unwrap(),
        "one activity"
    );
    assert_eq!(
        i18n.resolve_plural("home", "activities", 7, None).unwrap(),
        "7 activities"
    );
}

#[test]
fn registered_locales_limit_what_is_loaded() {
    let mut config = config();
    config.registered_locales = Some(vec!["en".to_string()]);

    let i18n = I18nLoader::builder()
        .config(&config)
        .base_dir(fixtures_dir())
        .build()
        .load()
        .unwrap();

    assert_eq!(i18n.locales(), vec![en()]);
    assert_eq!(i18n.resolve_in(&pt(), "navbar", "home", None).unwrap(), "Home");
}

#[test]
fn observer_sees_engine_events() {
    let config = config();
    let log = Arc::new(EventLog::new());
    let i18n = I18nLoader::builder()
        .config(&config)
        .base_dir(fixtures_dir())
        .observer(log.clone())
        .build()
        .load()
        .unwrap();

    i18n.resolve_in(&pt(), "navbar", "search", None).unwrap();

    let events = log.take();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        ResolutionEvent::Fallback { served_by, .. } if *served_by == en()
    ));
}

#[test]
fn embedded_source_matches_filesystem_source() {
    let config = config();
    let fs_source =
        FsBundleSource::new(fixtures_dir().join("i18n")).with_namespaces(config.namespace_paths());
    let embedded =
        EmbeddedBundleSource::<FixtureAssets>::new().with_namespaces(config.namespace_paths());

    assert_eq!(
        embedded.available_locales().unwrap(),
        fs_source.available_locales().unwrap()
    );

    for locale in [en(), pt()] {
        let from_disk = fs_source.load(&locale).unwrap();
        let from_binary = embedded.load(&locale).unwrap();

        let mut disk_keys: Vec<_> = from_disk.keys().collect();
        let mut binary_keys: Vec<_> = from_binary.keys().collect();
        disk_keys.sort_unstable();
        binary_keys.sort_unstable();
        assert_eq!(disk_keys, binary_keys);
    }

    let i18n = I18nLoader::builder()
        .config(&config)
        .build()
        .load_from(&embedded)
        .unwrap();
    assert_eq!(i18n.resolve_in(&pt(), "navbar", "gear", None).unwrap(), "Equipamento");
}

#[test]
fn reads_config_file_and_assets_from_disk() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "i18n.toml",
        "default_locale = \"en\"\nassets_dir = \"locales\"\ninitial_locale = \"pt-BR\"\n",
    );
    write(temp.path(), "locales/en/navbar.json", r#"{"home": "Home", "logout": "Logout"}"#);
    write(temp.path(), "locales/pt/navbar.json", r#"{"home": "Início"}"#);
    write(temp.path(), "locales/pt-BR/navbar.json", r#"{"logout": "Deslogar"}"#);

    let config = I18nConfig::read_from_path(temp.path().join("i18n.toml")).unwrap();
    let i18n = I18nLoader::builder()
        .config(&config)
        .base_dir(temp.path())
        .build()
        .load()
        .unwrap();

    assert_eq!(i18n.active().to_string(), "pt-BR");
    assert_eq!(i18n.resolve("navbar", "logout", None).unwrap(), "Deslogar");
    assert_eq!(i18n.resolve("navbar", "home", None).unwrap(), "Início");
}

#[test]
fn missing_default_bundle_is_fatal() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "i18n/pt/navbar.json", r#"{"home": "Início"}"#);

    let config = config();
    let err = I18nLoader::builder()
        .config(&config)
        .base_dir(temp.path())
        .build()
        .load()
        .unwrap_err();

    assert!(matches!(err, LoadError::LocaleNotFound(ref locale) if *locale == en()));
    insta::assert_snapshot!(err.to_string(), @"No message files found for locale 'en'");
}

#[test]
fn missing_assets_dir_is_a_config_error() {
    let temp = TempDir::new().unwrap();
    let config = config();
    let err = I18nLoader::builder()
        .config(&config)
        .base_dir(temp.path())
        .build()
        .load()
        .unwrap_err();

    assert!(matches!(err, LoadError::Config(_)));
}

#[test]
fn registered_locale_without_files_is_fatal() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "i18n/en/navbar.json", r#"{"home": "Home"}"#);

    let mut config = config();
    config.registered_locales = Some(vec!["en".to_string(), "fr".to_string()]);
    let err = I18nLoader::builder()
        .config(&config)
        .base_dir(temp.path())
        .build()
        .load()
        .unwrap_err();

    assert!(matches!(err, LoadError::LocaleNotFound(ref locale) if locale.to_string() == "fr"));
}

#[test]
fn unregistered_initial_locale_is_rejected() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "i18n/en/navbar.json", r#"{"home": "Home"}"#);

    let mut config = config();
    config.initial_locale = Some("fr".to_string());
    let err = I18nLoader::builder()
        .config(&config)
        .base_dir(temp.path())
        .build()
        .load()
        .unwrap_err();

    assert!(matches!(
        err,
        LoadError::Bundle(ConfigError::LocaleNotRegistered(_))
    ));
}

#[test]
fn invalid_message_files_report_their_path() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "i18n/en/navbar.json", r#"{"home": {"count": 1}}"#);

    let config = config();
    let err = I18nLoader::builder()
        .config(&config)
        .base_dir(temp.path())
        .build()
        .load()
        .unwrap_err();

    insta::assert_snapshot!(
        err.to_string(),
        @"Unsupported value for 'home.count' in 'en/navbar.json': messages must be strings"
    );
}

#[test]
fn broken_template_is_a_bundle_error() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "i18n/en/navbar.json", r#"{"home": "Home {"}"#);

    let config = config();
    let err = I18nLoader::builder()
        .config(&config)
        .base_dir(temp.path())
        .build()
        .load()
        .unwrap_err();

    assert!(matches!(
        err,
        LoadError::Bundle(ConfigError::InvalidTemplate { ref namespace, ref key, .. })
            if namespace == "navbar" && key == "home"
    ));
}

#[test]
fn lowercase_region_directory_is_discovered_and_loaded() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "i18n/en/home.json", r#"{"title": "Home", "logout": "Logout"}"#);
    write(temp.path(), "i18n/pt-br/home.json", r#"{"logout": "Deslogar"}"#);

    let mut config = config();
    config.namespaces = None;
    config.initial_locale = Some("pt-BR".to_string());
    let i18n = I18nLoader::builder()
        .config(&config)
        .base_dir(temp.path())
        .build()
        .load()
        .unwrap();

    let pt_br = Locale::from(langid!("pt-BR"));
    assert_eq!(i18n.locales(), vec![en(), pt_br.clone()]);
    assert_eq!(i18n.active(), pt_br);
    assert_eq!(i18n.resolve("home", "logout", None).unwrap(), "Deslogar");
    assert_eq!(i18n.resolve("home", "title", None).unwrap(), "Home");
}

#[test]
fn embedded_lowercase_region_prefix_loads() {
    let source = EmbeddedBundleSource::<RegionalAssets>::new();
    let pt_br = Locale::from(langid!("pt-BR"));

    assert_eq!(source.available_locales().unwrap(), vec![en(), pt_br.clone()]);
    let bundle = source.load(&pt_br).unwrap();
    assert_eq!(
        bundle.get("homeView", "logout").unwrap().as_str(),
        "Deslogar"
    );

    let config = config();
    let i18n = I18nLoader::builder()
        .config(&config)
        .build()
        .load_from(&source)
        .unwrap();
    assert_eq!(
        i18n.resolve_in(&pt_br, "homeView", "title", None).unwrap(),
        "Welcome back"
    );
}

#[test]
fn variant_directory_is_rejected_like_config_locales() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "i18n/en/home.json", r#"{"title": "Home"}"#);
    write(temp.path(), "i18n/de-DE-1996/home.json", r#"{"title": "Start"}"#);

    let config = config();
    let err = I18nLoader::builder()
        .config(&config)
        .base_dir(temp.path())
        .build()
        .load()
        .unwrap_err();

    assert!(matches!(
        err,
        LoadError::Config(I18nConfigError::UnsupportedLanguageIdentifier { ref name, .. })
            if name == "de-DE-1996"
    ));
}
