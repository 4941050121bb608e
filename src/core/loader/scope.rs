use std::marker::PhantomData;

use super::{ContextSwapper, LoaderContext};

/// Guard that keeps a loader context installed on the current thread until it
/// is dropped.
///
/// Each guard owns its own [`ContextSwapper`], so scopes nest safely as long
/// as they are dropped in reverse order, which lexical scoping gives for free.
/// Dropping restores the context that was active when the guard was created,
/// also while unwinding. The guard is tied to its thread and is not `Send`.
#[must_use = "the previous context is restored as soon as the guard is dropped"]
pub struct LoaderScope {
    swapper: ContextSwapper,
    _not_send: PhantomData<*const ()>,
}

impl LoaderScope {
    pub fn enter(ctx: LoaderContext) -> Self {
        let mut swapper = ContextSwapper::new();
        swapper.enter(ctx);

        Self {
            swapper,
            _not_send: PhantomData,
        }
    }
}

impl Drop for LoaderScope {
    fn drop(&mut self) {
        self.swapper.exit();
    }
}

/// Runs `f` with `ctx` installed, restoring the previous context afterwards.
pub fn isolated<F, R>(ctx: &LoaderContext, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _scope = LoaderScope::enter(ctx.clone());
    f()
}
