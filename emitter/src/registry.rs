//! Channel registry backing the [`Emitter`](crate::Emitter).
//!
//! The registry maps channel names to the handlers registered on them, in registration order.
//! It is stored in a [`DashMap`], so every operation takes a short, sharded lock and the
//! registry can be shared between threads.
//!
//! # Locking
//!
//! No lock is ever held while a handler runs. Dispatch works on a [`snapshot()`](Registry::snapshot)
//! of the channel, which lets handlers register, remove and emit on the same emitter. One-shot
//! registrations are [`claim`](Registry::claim)ed right before they are invoked: the claim
//! removes the entry under the shard lock, so only one caller can ever win it.

use std::{fmt, str::FromStr, sync::Arc};

use dashmap::DashMap;
use uuid::Uuid;

use crate::{Callback, Priority};

/// Identifier returned when a handler is registered, used to remove it again.
///
/// Identifiers are unique across an emitter, so removal does not need the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(Uuid);

impl HandlerId {
    /// Generate a new random identifier.
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[inline]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for HandlerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A single handler registered on a channel. Never mutated after creation.
pub(crate) struct Registration<E> {
    pub(crate) id: HandlerId,
    pub(crate) callback: Arc<dyn Callback<E>>,
    pub(crate) priority: Priority,
    /// Remove the registration the first time it is invoked.
    pub(crate) once: bool,
}

impl<E> Registration<E> {
    pub(crate) fn new(callback: Arc<dyn Callback<E>>, priority: Priority, once: bool) -> Self {
        Self {
            id: HandlerId::new(),
            callback,
            priority,
            once,
        }
    }
}

// Manual impl, `E` itself need not be `Clone`.
impl<E> Clone for Registration<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Arc::clone(&self.callback),
            priority: self.priority,
            once: self.once,
        }
    }
}

impl<E> fmt::Debug for Registration<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("once", &self.once)
            .finish_non_exhaustive()
    }
}

/// Thread-safe mapping of channel name to its registrations.
pub(crate) struct Registry<E> {
    channels: DashMap<String, Vec<Registration<E>>>,
}

impl<E> Registry<E> {
    /// Create an empty registry.
    pub(crate) fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Append a registration to a channel, creating the channel on first use.
    pub(crate) fn insert(&self, channel: String, registration: Registration<E>) {
        self.channels.entry(channel).or_default().push(registration);
    }

    /// Remove the registration with the given identifier from whichever channel holds it.
    ///
    /// Returns `false` if no registration matched.
    pub(crate) fn remove(&self, id: HandlerId) -> bool {
        let mut emptied = None;
        let mut removed = false;

        for mut entry in self.channels.iter_mut() {
            if let Some(pos) = entry.iter().position(|r| r.id == id) {
                entry.remove(pos);
                removed = true;
                if entry.is_empty() {
                    emptied = Some(entry.key().clone());
                }
                break;
            }
        }

        // The iterator must be dropped before touching the map again.
        if let Some(channel) = emptied {
            self.drop_if_empty(&channel);
        }
        removed
    }

    /// Atomically take a registration out of `channel`.
    ///
    /// Returns `true` only for the single caller that actually removed it.
    pub(crate) fn claim(&self, channel: &str, id: HandlerId) -> bool {
        let emptied = {
            let Some(mut list) = self.channels.get_mut(channel) else {
                return false;
            };
            let Some(pos) = list.iter().position(|r| r.id == id) else {
                return false;
            };
            list.remove(pos);
            list.is_empty()
        };

        if emptied {
            self.drop_if_empty(channel);
        }
        true
    }

    /// Copy of a channel's registrations, sorted by descending priority.
    ///
    /// The sort is stable, so registrations of equal priority keep their registration order.
    /// An unknown channel yields an empty list.
    pub(crate) fn snapshot(&self, channel: &str) -> Vec<Registration<E>> {
        let mut registrations = self
            .channels
            .get(channel)
            .map(|list| list.value().clone())
            .unwrap_or_default();
        registrations.sort_by(|a, b| b.priority.cmp(&a.priority));
        registrations
    }

    /// Number of registrations on a channel.
    pub(crate) fn len(&self, channel: &str) -> usize {
        self.channels.get(channel).map_or(0, |list| list.len())
    }

    /// Names of all channels with at least one registration.
    pub(crate) fn channels(&self) -> Vec<String> {
        self.channels.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Returns `true` if a registration with this identifier exists on any channel.
    pub(crate) fn contains(&self, id: HandlerId) -> bool {
        self.channels
            .iter()
            .any(|entry| entry.value().iter().any(|r| r.id == id))
    }

    /// Returns `true` if nothing is registered.
    pub(crate) fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Remove every registration.
    pub(crate) fn clear(&self) {
        self.channels.clear();
    }

    fn drop_if_empty(&self, channel: &str) {
        self.channels.remove_if(channel, |_, list| list.is_empty());
    }
}
