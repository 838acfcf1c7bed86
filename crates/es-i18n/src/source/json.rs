use crate::error::LoadError;
use es_i18n_core::{Locale, MessageBundle};
use path_slash::PathExt as _;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Flattens one message file into `(key, template)` pairs.
///
/// Nested objects become dotted keys and array entries indexed keys, so
/// `{"menu": {"items": ["Home"]}}` yields `menu.items.0`. Only strings are
/// accepted as leaves.
pub fn flatten_messages(path: &str, value: Value) -> Result<Vec<(String, String)>, LoadError> {
    let Value::Object(map) = value else {
        return Err(LoadError::NotAnObject(path.to_string()));
    };

    let mut messages = Vec::new();
    for (key, value) in map {
        flatten_into(path, key, value, &mut messages)?;
    }
    Ok(messages)
}

fn flatten_into(
    path: &str,
    key: String,
    value: Value,
    out: &mut Vec<(String, String)>,
) -> Result<(), LoadError> {
    match value {
        Value::String(text) => out.push((key, text)),
        Value::Object(map) => {
            for (child, value) in map {
                flatten_into(path, format!("{key}.{child}"), value, out)?;
            }
        },
        Value::Array(items) => {
            for (index, value) in items.into_iter().enumerate() {
                flatten_into(path, format!("{key}.{index}"), value, out)?;
            }
        },
        _ => {
            return Err(LoadError::UnsupportedValue {
                path: path.to_string(),
                key,
            });
        },
    }
    Ok(())
}

/// Builds the bundle of `locale` from its message files.
///
/// `files` holds paths relative to the locale directory with their raw
/// contents. A file named in `namespaces` is loaded under that name, any
/// other file under its stem.
pub fn bundle_from_json_files(
    locale: &Locale,
    files: Vec<(PathBuf, Vec<u8>)>,
    namespaces: &BTreeMap<String, PathBuf>,
) -> Result<MessageBundle, LoadError> {
    let by_path: BTreeMap<&Path, &str> = namespaces
        .iter()
        .map(|(name, path)| (path.as_path(), name.as_str()))
        .collect();

    let mut files = files;
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut parsed = Vec::with_capacity(files.len());
    for (relative, bytes) in files {
        let label = format!("{}/{}", locale, relative.to_slash_lossy());
        let Some(name) = namespace_name(&relative, &by_path) else {
            tracing::warn!("Skipping message file '{}' without a usable name", label);
            continue;
        };

        let text = String::from_utf8(bytes).map_err(|source| LoadError::Utf8 {
            path: label.clone(),
            source,
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| LoadError::Json {
            path: label.clone(),
            source,
        })?;
        let messages = flatten_messages(&label, value)?;

        tracing::debug!(
            "Loaded namespace '{}' from '{}' ({} messages)",
            name,
            label,
            messages.len()
        );
        parsed.push((name, messages));
    }

    Ok(MessageBundle::from_namespaces(parsed)?)
}

fn namespace_name(relative: &Path, by_path: &BTreeMap<&Path, &str>) -> Option<String> {
    if let Some(name) = by_path.get(relative) {
        return Some((*name).to_string());
    }
    relative
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}
