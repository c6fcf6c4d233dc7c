//! Event payloads and their cancellation flag.
//!
//! Every value passed through an [`Emitter`](crate::Emitter) implements [`Event`]. The only
//! state the dispatcher cares about is the [`Cancellation`] flag: once any handler sets it,
//! dispatch for that emission stops before the next handler.
//!
//! # Example
//!
//! ```rust,ignore
//! use rusty_emitter::{Cancellation, Event};
//!
//! #[derive(Event)]
//! struct PlayerJoined {
//!     name: String,
//!     cancellation: Cancellation,
//! }
//! ```
//!
//! For one-off payloads that don't warrant their own type, [`Message`] wraps any value.

use std::ops::{Deref, DerefMut};

/// A one-way cancellation flag.
///
/// Starts out clear. [`cancel()`](Self::cancel) sets it and there is no way to clear it again.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cancellation {
    cancelled: bool,
}

impl Cancellation {
    /// Create a new, uncancelled flag.
    #[inline]
    pub const fn new() -> Self {
        Self { cancelled: false }
    }

    /// Set the flag. Calling this more than once has no further effect.
    #[inline]
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Returns `true` once [`cancel()`](Self::cancel) has been called.
    #[inline]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Trait for values that can be dispatched through an [`Emitter`](crate::Emitter).
///
/// Events must be:
/// - `'static`: No borrowed data
/// - `Send`: May be emitted from any thread
///
/// Implementors only expose their [`Cancellation`]; the cancel/query helpers are provided.
/// Prefer `#[derive(Event)]` over writing the impl by hand.
pub trait Event: Send + 'static {
    /// The cancellation flag carried by this event.
    fn cancellation(&self) -> &Cancellation;

    /// Mutable access to the cancellation flag.
    fn cancellation_mut(&mut self) -> &mut Cancellation;

    /// Stop dispatch of this event after the current handler returns.
    #[inline]
    fn cancel(&mut self) {
        self.cancellation_mut().cancel();
    }

    /// Returns `true` if a handler has cancelled this event.
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.cancellation().is_cancelled()
    }
}

/// Generic event wrapping an arbitrary payload.
///
/// Derefs to the payload, so handlers can read and modify it directly.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Message<T> {
    payload: T,
    cancellation: Cancellation,
}

impl<T> Message<T> {
    /// Wrap a payload in a fresh, uncancelled event.
    pub const fn new(payload: T) -> Self {
        Self {
            payload,
            cancellation: Cancellation::new(),
        }
    }

    /// Borrow the payload.
    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the event, returning the payload.
    #[inline]
    pub fn into_inner(self) -> T {
        self.payload
    }
}

impl<T: Send + 'static> Event for Message<T> {
    fn cancellation(&self) -> &Cancellation {
        &self.cancellation
    }

    fn cancellation_mut(&mut self) -> &mut Cancellation {
        &mut self.cancellation
    }
}

impl<T> Deref for Message<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.payload
    }
}

impl<T> DerefMut for Message<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.payload
    }
}

impl<T> From<T> for Message<T> {
    fn from(payload: T) -> Self {
        Self::new(payload)
    }
}
