//! Per-thread code-loading context.
//!
//! Every thread has exactly one active [`LoaderContext`]; the host context is
//! active until something else is installed. Plugin code is run under its own
//! context either through the manual [`ContextSwapper`] or the scoped
//! [`LoaderScope`] guard.

mod context;
mod scope;
mod swapper;

use std::cell::RefCell;

pub use context::{LoaderContext, LoaderRegistry, PluginKind};
pub use scope::{isolated, LoaderScope};
pub use swapper::ContextSwapper;

thread_local! {
    static ACTIVE: RefCell<LoaderContext> = RefCell::new(LoaderContext::host());
}

/// The context active on the calling thread.
pub fn current() -> LoaderContext {
    ACTIVE.with(|active| active.borrow().clone())
}

/// Installs `ctx` on the calling thread, returning the context it replaced.
fn install(ctx: LoaderContext) -> LoaderContext {
    ACTIVE.with(|active| active.replace(ctx))
}
