use super::{install, LoaderContext};

/// Manual save/swap/restore of the calling thread's loader context.
///
/// The swapper keeps a single saved slot. Callers must pair every
/// [`ContextSwapper::enter`] with an [`ContextSwapper::exit`], including on
/// error paths. Entering twice on one instance before exiting overwrites the
/// slot and the first saved context is lost; use one instance per nesting
/// level, or [`super::LoaderScope`] which nests safely.
///
/// The context being swapped is the one of the thread that calls `enter` or
/// `exit`, not of the thread that created the swapper.
#[derive(Debug, Default)]
pub struct ContextSwapper {
    saved: Option<LoaderContext>,
}

impl ContextSwapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `ctx` and returns the context that was active before.
    pub fn enter(&mut self, ctx: LoaderContext) -> LoaderContext {
        let previous = install(ctx);
        self.saved = Some(previous.clone());
        previous
    }

    /// Reinstalls the saved context and returns the one active just before.
    ///
    /// Without a prior `enter` the host context is restored.
    pub fn exit(&mut self) -> LoaderContext {
        let saved = self.saved.clone().unwrap_or_else(LoaderContext::host);
        install(saved)
    }
}
