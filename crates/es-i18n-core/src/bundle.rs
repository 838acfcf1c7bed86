use crate::error::ConfigError;
use crate::template::Template;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Messages of one UI area, keyed by message key.
#[derive(Clone, Debug, Default)]
pub struct Namespace {
    messages: FxHashMap<String, Template>,
}

impl Namespace {
    /// Parses every template of a namespace.
    ///
    /// `name` is only used to give errors some context.
    pub fn from_messages<I, K, V>(name: &str, messages: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut parsed = FxHashMap::default();
        for (key, value) in messages {
            let key = key.into();
            let template =
                Template::parse(value).map_err(|source| ConfigError::InvalidTemplate {
                    namespace: name.to_string(),
                    key: key.clone(),
                    source,
                })?;
            if parsed.contains_key(&key) {
                return Err(ConfigError::DuplicateKey {
                    namespace: name.to_string(),
                    key,
                });
            }
            parsed.insert(key, template);
        }
        Ok(Self { messages: parsed })
    }

    pub fn get(&self, key: &str) -> Option<&Template> {
        self.messages.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// All messages of a single locale, grouped by namespace.
///
/// A bundle is never modified once it has been registered; updates build a
/// new bundle and swap it in. Namespaces are shared through `Arc`, so
/// deriving a bundle with [`MessageBundle::with_parsed_namespace`] does not
/// copy the untouched namespaces.
#[derive(Clone, Debug, Default)]
pub struct MessageBundle {
    namespaces: FxHashMap<String, Arc<Namespace>>,
}

impl MessageBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bundle from `(namespace, messages)` pairs.
    pub fn from_namespaces<I, N, M, K, V>(namespaces: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (N, M)>,
        N: Into<String>,
        M: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut bundle = Self::new();
        for (name, messages) in namespaces {
            let name = name.into();
            if bundle.namespaces.contains_key(&name) {
                return Err(ConfigError::DuplicateNamespace(name));
            }
            let namespace = Namespace::from_messages(&name, messages)?;
            bundle.namespaces.insert(name, Arc::new(namespace));
        }
        Ok(bundle)
    }

    /// Returns a copy of this bundle with `name` set to `messages`,
    /// replacing any namespace of the same name.
    pub fn with_namespace<I, K, V>(self, name: &str, messages: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let namespace = Namespace::from_messages(name, messages)?;
        Ok(self.with_parsed_namespace(name, namespace))
    }

    #[must_use]
    pub fn with_parsed_namespace(mut self, name: &str, namespace: Namespace) -> Self {
        self.namespaces
            .insert(name.to_string(), Arc::new(namespace));
        self
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, namespace: &str, key: &str) -> Option<&Template> {
        self.namespaces.get(namespace)?.get(key)
    }

    pub fn contains(&self, namespace: &str, key: &str) -> bool {
        self.get(namespace, key).is_some()
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name).map(Arc::as_ref)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    /// Every `(namespace, key)` pair, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces
            .iter()
            .flat_map(|(name, ns)| ns.keys().map(move |key| (name.as_str(), key)))
    }

    /// Total number of messages across namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.values().map(|ns| ns.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
