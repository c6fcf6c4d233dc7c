//! In-process publish/subscribe with priority-ordered, synchronous dispatch.
//!
//! Handlers are registered on named channels with a [`Priority`]. Emitting an event on a channel
//! runs its handlers on the calling thread, highest priority first, until they are exhausted or
//! one of them cancels the event.
//!
//! - [`Event`] / [`Cancellation`]: the dispatched value and its one-way cancel flag
//! - [`Callback`]: the handler capability
//! - [`Emitter`]: registration, removal, dispatch and blocking waits
//!
//! # Example
//!
//! ```rust,ignore
//! use rusty_emitter::{Cancellation, Emitter, Event, Priority};
//!
//! #[derive(Event, Clone)]
//! struct Damage {
//!     amount: u32,
//!     cancellation: Cancellation,
//! }
//!
//! let emitter = Emitter::<Damage>::new();
//!
//! emitter.on_with_priority("player", |_: &str, hit: &mut Damage| {
//!     if hit.amount == 0 {
//!         hit.cancel();
//!     }
//!     Ok(())
//! }, Priority::High);
//!
//! let id = emitter.on("player", |_: &str, hit: &mut Damage| {
//!     println!("took {} damage", hit.amount);
//!     Ok(())
//! });
//!
//! emitter.emit("player", &mut Damage { amount: 5, cancellation: Cancellation::new() })?;
//! emitter.off(id);
//! ```

// Lets `#[derive(Event)]` expand to `::rusty_emitter::Event` inside this crate too.
extern crate self as rusty_emitter;

pub mod callback;
pub mod config;
pub mod emitter;
pub mod error;
pub mod event;
pub mod priority;
pub(crate) mod registry;

pub use callback::{Callback, HandlerError, HandlerResult};
pub use config::{Config, GLOBAL_CHANNEL};
pub use emitter::{Dispatch, Emitter};
pub use error::{Error, Result};
pub use event::{Cancellation, Event, Message};
pub use priority::Priority;
pub use registry::HandlerId;

pub use rusty_emitter_macros::Event;
