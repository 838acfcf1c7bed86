//! Diagnostics emitted while resolving messages.
//!
//! Fallbacks and missing keys are not errors: the caller still gets a string.
//! They are reported here so that an application can log or count them.

use crate::locale::Locale;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionEvent {
    /// The message was missing in the requested locale and served by a
    /// locale further down the fallback chain.
    Fallback {
        requested: Locale,
        served_by: Locale,
        namespace: String,
        key: String,
    },
    /// No locale in the chain had the message; the `namespace.key`
    /// placeholder was returned.
    MissingKey {
        requested: Locale,
        namespace: String,
        key: String,
    },
}

impl ResolutionEvent {
    pub fn requested(&self) -> &Locale {
        match self {
            Self::Fallback { requested, .. } | Self::MissingKey { requested, .. } => requested,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            Self::Fallback { namespace, .. } | Self::MissingKey { namespace, .. } => namespace,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Fallback { key, .. } | Self::MissingKey { key, .. } => key,
        }
    }
}

/// Receives resolution events, e.g. to forward them to a metrics backend.
pub trait ResolutionObserver: Send + Sync {
    fn on_event(&self, event: &ResolutionEvent);
}

/// Running totals of resolution events.
#[derive(Debug, Default)]
pub struct EventCounters {
    fallbacks: AtomicUsize,
    missing: AtomicUsize,
}

impl EventCounters {
    pub fn record(&self, event: &ResolutionEvent) {
        let counter = match event {
            ResolutionEvent::Fallback { .. } => &self.fallbacks,
            ResolutionEvent::MissingKey { .. } => &self.missing,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ResolutionStats {
        ResolutionStats {
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            missing: self.missing.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.fallbacks.store(0, Ordering::Relaxed);
        self.missing.store(0, Ordering::Relaxed);
    }
}

impl ResolutionObserver for EventCounters {
    fn on_event(&self, event: &ResolutionEvent) {
        self.record(event);
    }
}

/// Point-in-time copy of [`EventCounters`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub fallbacks: usize,
    pub missing: usize,
}

/// Keeps every event it receives, in order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<ResolutionEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ResolutionEvent> {
        self.events.lock().clone()
    }

    /// Removes and returns the recorded events.
    pub fn take(&self) -> Vec<ResolutionEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl ResolutionObserver for EventLog {
    fn on_event(&self, event: &ResolutionEvent) {
        self.events.lock().push(event.clone());
    }
}
