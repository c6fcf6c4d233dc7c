//! The handler capability invoked by the emitter.

/// Error returned by a failing handler. It is passed back to the caller of
/// [`Emitter::emit`](crate::Emitter::emit) unchanged.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a single handler invocation.
pub type HandlerResult = Result<(), HandlerError>;

/// A handler registered on a channel.
///
/// Closures of the shape `Fn(&str, &mut E) -> HandlerResult` implement this automatically.
/// Implement it by hand for handlers that carry their own state:
///
/// ```rust,ignore
/// struct Audit {
///     seen: AtomicUsize,
/// }
///
/// impl Callback<Message<String>> for Audit {
///     fn call(&self, channel: &str, event: &mut Message<String>) -> HandlerResult {
///         self.seen.fetch_add(1, Ordering::Relaxed);
///         Ok(())
///     }
/// }
///
/// emitter.register("chat", Audit { seen: AtomicUsize::new(0) }, Priority::Low);
/// ```
///
/// Handlers may be called from any thread that emits, so they must be `Send + Sync`.
pub trait Callback<E>: Send + Sync + 'static {
    /// Handle `event`, emitted on `channel`.
    ///
    /// Returning an error stops dispatch; no lower priority handler sees the event.
    fn call(&self, channel: &str, event: &mut E) -> HandlerResult;
}

impl<E, F> Callback<E> for F
where
    F: Fn(&str, &mut E) -> HandlerResult + Send + Sync + 'static,
{
    #[inline]
    fn call(&self, channel: &str, event: &mut E) -> HandlerResult {
        self(channel, event)
    }
}
