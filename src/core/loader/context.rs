use std::{
    fmt::Display,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use dashmap::DashMap;
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    Host,
    Reader,
    Writer,
    Transformer,
}

impl AsRef<str> for PluginKind {
    fn as_ref(&self) -> &str {
        match self {
            PluginKind::Host => "host",
            PluginKind::Reader => "reader",
            PluginKind::Writer => "writer",
            PluginKind::Transformer => "transformer",
        }
    }
}

#[derive(Debug)]
struct Inner {
    id: u64,
    kind: PluginKind,
    name: Arc<str>,
}

/// Opaque handle to a code-loading context.
///
/// Handles compare by identity: two contexts with the same kind and name that
/// were created separately are different contexts.
#[derive(Debug, Clone)]
pub struct LoaderContext(Arc<Inner>);

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(0);

static HOST_CONTEXT: Lazy<LoaderContext> =
    Lazy::new(|| LoaderContext::new(PluginKind::Host, "host"));

impl LoaderContext {
    fn new(kind: PluginKind, name: &str) -> Self {
        Self(Arc::new(Inner {
            id: NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            name: Arc::from(name),
        }))
    }

    /// The process default context.
    pub fn host() -> Self {
        HOST_CONTEXT.clone()
    }

}

impl PartialEq for LoaderContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for LoaderContext {}

impl Display for LoaderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}#{}", self.0.kind.as_ref(), self.0.name, self.0.id)
    }
}

/// Hands out one context per plugin kind and name.
#[derive(Debug, Default)]
pub struct LoaderRegistry {
    contexts: DashMap<(PluginKind, String), LoaderContext>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, kind: PluginKind, name: &str) -> LoaderContext {
        if kind == PluginKind::Host {
            return LoaderContext::host();
        }

        self.contexts
            .entry((kind, name.to_string()))
            .or_insert_with(|| {
                let ctx = LoaderContext::new(kind, name);
                debug!("Registered loader context {}", ctx);
                ctx
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }
}
