#![doc = include_str!("../README.md")]

mod error;
mod loader;
pub mod source;

pub use error::LoadError;
pub use loader::I18nLoader;
pub use source::{BundleSource, EmbeddedBundleSource, FsBundleSource};

pub use es_i18n_core::*;
pub use es_i18n_toml::{I18nConfig, I18nConfigError};

pub use fluent_bundle::FluentValue;

#[doc(hidden)]
pub use unic_langid;
