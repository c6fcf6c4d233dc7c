//! The priority-ordered, synchronous event dispatcher.
//!
//! [`Emitter`] owns a registry of channel name -> handlers. Emitting an event on a channel
//! invokes every handler registered there, on the calling thread, highest [`Priority`] first.
//! Handlers of equal priority run in registration order. If a handler cancels the event, the
//! remaining handlers are skipped.
//!
//! # Example
//!
//! ```rust,ignore
//! use rusty_emitter::{Emitter, Event, Message, Priority};
//!
//! let emitter = Emitter::<Message<String>>::new();
//!
//! emitter.on_with_priority("chat", |_: &str, msg: &mut Message<String>| {
//!     if msg.contains("spam") {
//!         msg.cancel();
//!     }
//!     Ok(())
//! }, Priority::High);
//!
//! emitter.on("chat", |channel: &str, msg: &mut Message<String>| {
//!     println!("[{channel}] {}", msg.payload());
//!     Ok(())
//! });
//!
//! let dispatch = emitter.emit("chat", &mut Message::new("hello".into()))?;
//! assert_eq!(dispatch.invoked, 2);
//! ```
//!
//! # Thread Safety
//!
//! `Emitter` is `Send + Sync` and is usually shared behind an `Arc`. The registry is guarded
//! by sharded locks that are released before any handler runs, so handlers may freely call
//! back into the emitter.

use std::{
    any::{Any, type_name},
    fmt,
    sync::Arc,
    time::Duration,
};

use crossbeam::channel::{RecvTimeoutError, bounded};
use log::{debug, trace, warn};

use crate::{
    Callback, Config, Error, Event, HandlerId, HandlerResult, Priority, Result,
    registry::{Registration, Registry},
};

/// Summary of a single [`emit`](Emitter::emit) call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Number of handlers that were invoked.
    pub invoked: usize,
    /// `true` if the event was cancelled when dispatch finished.
    pub cancelled: bool,
}

/// Synchronous publish/subscribe dispatcher for events of type `E`.
pub struct Emitter<E: Event> {
    registry: Registry<E>,
    config: Config,
}

impl<E: Event> Emitter<E> {
    /// Create an emitter with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an emitter with a custom [`Config`].
    pub fn with_config(config: Config) -> Self {
        Self {
            registry: Registry::new(),
            config,
        }
    }

    /// The configuration this emitter was created with.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Registration ====================

    /// Register a handler on `channel` with an explicit priority.
    ///
    /// This accepts anything implementing [`Callback`]; closures are usually easier to pass to
    /// [`on`](Self::on) or [`on_with_priority`](Self::on_with_priority).
    ///
    /// The returned [`HandlerId`] is the only way to remove the handler again.
    pub fn register<C>(
        &self,
        channel: impl Into<String>,
        callback: C,
        priority: Priority,
    ) -> HandlerId
    where
        C: Callback<E>,
    {
        self.insert(channel.into(), Arc::new(callback), priority, false)
    }

    /// Register a closure on `channel` with the default priority.
    pub fn on<F>(&self, channel: impl Into<String>, handler: F) -> HandlerId
    where
        F: Fn(&str, &mut E) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(channel, handler, self.config.default_priority)
    }

    /// Register a closure on `channel` with an explicit priority.
    pub fn on_with_priority<F>(
        &self,
        channel: impl Into<String>,
        handler: F,
        priority: Priority,
    ) -> HandlerId
    where
        F: Fn(&str, &mut E) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(channel, handler, priority)
    }

    /// Register a closure on the default channel (`"global"` unless configured).
    pub fn on_global<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&str, &mut E) -> HandlerResult + Send + Sync + 'static,
    {
        self.on(self.config.default_channel.clone(), handler)
    }

    /// Register a closure on the default channel with an explicit priority.
    pub fn on_global_with_priority<F>(&self, handler: F, priority: Priority) -> HandlerId
    where
        F: Fn(&str, &mut E) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(self.config.default_channel.clone(), handler, priority)
    }

    /// Register a closure that runs at most once.
    ///
    /// The registration is removed from the registry at the moment it is picked for
    /// invocation, so it fires exactly once even if several threads emit concurrently.
    pub fn once<F>(&self, channel: impl Into<String>, handler: F, priority: Priority) -> HandlerId
    where
        F: Fn(&str, &mut E) -> HandlerResult + Send + Sync + 'static,
    {
        self.insert(channel.into(), Arc::new(handler), priority, true)
    }

    /// Remove a handler.
    ///
    /// Returns `true` if a handler was removed. Unknown or already removed identifiers are
    /// ignored.
    pub fn off(&self, id: HandlerId) -> bool {
        let removed = self.registry.remove(id);
        if removed {
            debug!("Removed handler {}", id);
        } else {
            trace!("No handler {} to remove", id);
        }
        removed
    }

    fn insert(
        &self,
        channel: String,
        callback: Arc<dyn Callback<E>>,
        priority: Priority,
        once: bool,
    ) -> HandlerId {
        let registration = Registration::new(callback, priority, once);
        let id = registration.id;
        debug!(
            "Registered handler {} on '{}' at {}{}",
            id,
            channel,
            priority,
            if once { " (once)" } else { "" }
        );
        self.registry.insert(channel, registration);
        id
    }

    // ==================== Dispatch ====================

    /// Invoke every handler on `channel` with `event`, highest priority first.
    ///
    /// Dispatch stops as soon as the event is cancelled; an event that is already cancelled
    /// reaches no handler. A channel without handlers is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Handler`] if a handler fails. Handlers that ran before it keep their
    /// effects and the handlers after it are not invoked.
    pub fn emit(&self, channel: &str, event: &mut E) -> Result<Dispatch> {
        let registrations = self.registry.snapshot(channel);
        trace!(
            "Emitting {} on '{}' to {} handler(s)",
            type_name::<E>(),
            channel,
            registrations.len()
        );

        let mut dispatch = Dispatch::default();
        for registration in registrations {
            if event.is_cancelled() {
                break;
            }
            if registration.once && !self.registry.claim(channel, registration.id) {
                // Another emission got to it first.
                continue;
            }

            dispatch.invoked += 1;
            if let Err(source) = registration.callback.call(channel, event) {
                warn!(
                    "Handler {} failed on '{}', aborting dispatch: {}",
                    registration.id, channel, source
                );
                return Err(Error::Handler {
                    id: registration.id,
                    channel: channel.into(),
                    source,
                });
            }
        }

        dispatch.cancelled = event.is_cancelled();
        if dispatch.cancelled {
            trace!("Dispatch on '{}' cancelled after {} handler(s)", channel, dispatch.invoked);
        }
        Ok(dispatch)
    }

    /// Emit on the default channel. Equivalent to `emit("global", event)`.
    pub fn emit_global(&self, event: &mut E) -> Result<Dispatch> {
        self.emit(&self.config.default_channel, event)
    }

    /// Emit a type-erased event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`], before any handler runs, if `event` is not an `E`.
    pub fn emit_any(&self, channel: &str, event: &mut dyn Any) -> Result<Dispatch> {
        let event = event
            .downcast_mut::<E>()
            .ok_or(Error::TypeMismatch {
                expected: type_name::<E>(),
            })?;
        self.emit(channel, event)
    }

    // ==================== Waiting ====================

    /// Block the calling thread until an event is emitted on `channel`, then return a copy.
    ///
    /// The wait is implemented as a [`Top`](Priority::Top) priority [`once`](Self::once)
    /// handler, so the handler is gone again when this returns. Another thread has to emit on
    /// the channel; otherwise this blocks forever. Prefer
    /// [`wait_for_timeout`](Self::wait_for_timeout) when that is a risk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disconnected`] if the waiting handler is removed before it fires, for
    /// example by [`clear`](Self::clear).
    pub fn wait_for(&self, channel: impl Into<String>) -> Result<E>
    where
        E: Clone,
    {
        self.wait(channel.into(), None)
    }

    /// Like [`wait_for`](Self::wait_for), giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if no event arrived in time. The waiting handler is removed.
    pub fn wait_for_timeout(&self, channel: impl Into<String>, timeout: Duration) -> Result<E>
    where
        E: Clone,
    {
        self.wait(channel.into(), Some(timeout))
    }

    fn wait(&self, channel: String, timeout: Option<Duration>) -> Result<E>
    where
        E: Clone,
    {
        let (sender, receiver) = bounded(1);
        let id = self.once(
            channel.clone(),
            move |_: &str, event: &mut E| -> HandlerResult {
                let _ = sender.try_send(event.clone());
                Ok(())
            },
            Priority::Top,
        );

        let disconnected = |channel: String| Error::Disconnected { channel };
        match timeout {
            None => receiver.recv().map_err(|_| disconnected(channel)),
            Some(timeout) => match receiver.recv_timeout(timeout) {
                Ok(event) => Ok(event),
                Err(RecvTimeoutError::Timeout) => {
                    if self.registry.remove(id) {
                        Err(Error::Timeout { channel, timeout })
                    } else {
                        // Claimed by an emission racing the timeout; the event is on its way.
                        receiver.recv().map_err(|_| disconnected(channel))
                    }
                }
                Err(RecvTimeoutError::Disconnected) => Err(disconnected(channel)),
            },
        }
    }

    // ==================== Introspection ====================

    /// Number of handlers registered on `channel`.
    pub fn listener_count(&self, channel: &str) -> usize {
        self.registry.len(channel)
    }

    /// Names of all channels that currently have handlers.
    pub fn channels(&self) -> Vec<String> {
        self.registry.channels()
    }

    /// Returns `true` if the handler is still registered.
    pub fn contains(&self, id: HandlerId) -> bool {
        self.registry.contains(id)
    }

    /// Returns `true` if no handler is registered on any channel.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Remove every handler from every channel.
    pub fn clear(&self) {
        debug!("Clearing all handlers");
        self.registry.clear();
    }
}

impl<E: Event> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("event", &type_name::<E>())
            .field("channels", &self.registry.channels())
            .field("config", &self.config)
            .finish()
    }
}
