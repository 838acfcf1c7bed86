//! Where message bundles come from.
//!
//! Every source lays its files out the same way, `{locale}/**/*.json`, with
//! one namespace per file.

mod embedded;
mod fs;
mod json;

pub use embedded::EmbeddedBundleSource;
pub use fs::FsBundleSource;
pub use json::{bundle_from_json_files, flatten_messages};

use crate::error::LoadError;
use es_i18n_core::{Locale, MessageBundle};

/// Supplies already parsed bundles, one per locale.
pub trait BundleSource {
    /// Locales this source has files for, sorted by tag.
    fn available_locales(&self) -> Result<Vec<Locale>, LoadError>;

    /// Loads the full bundle of `locale`.
    ///
    /// Fails with [`LoadError::LocaleNotFound`] when the source has nothing
    /// for that locale.
    fn load(&self, locale: &Locale) -> Result<MessageBundle, LoadError>;
}
