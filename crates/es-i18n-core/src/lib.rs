#![doc = include_str!("../README.md")]

pub mod bundle;
pub mod context;
pub mod error;
pub mod events;
pub mod fallback;
pub mod locale;
pub mod localization;
pub mod plural;
pub mod registry;
pub mod template;

pub use bundle::{MessageBundle, Namespace};
pub use context::ActiveLocale;
pub use error::{ConfigError, InterpolationError};
pub use events::{EventCounters, EventLog, ResolutionEvent, ResolutionObserver, ResolutionStats};
pub use locale::Locale;
pub use localization::I18n;
pub use registry::BundleRegistry;
pub use template::{Template, TemplateError};
