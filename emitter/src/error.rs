use std::time::Duration;

use crate::{HandlerId, callback::HandlerError};

/// Errors reported by [`Emitter`](crate::Emitter) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A type-erased event did not match the emitter's event type. No handler was invoked.
    #[error("event type does not match the emitter type parameter (expected {expected})")]
    TypeMismatch {
        /// Name of the emitter's event type.
        expected: &'static str,
    },

    /// A handler failed. Handlers before it have already run, handlers after it did not.
    #[error("handler {id} failed on channel '{channel}'")]
    Handler {
        /// The failing registration.
        id: HandlerId,
        /// The channel being dispatched.
        channel: String,
        /// The error returned by the handler.
        #[source]
        source: HandlerError,
    },

    /// No event arrived on the channel within the allotted time.
    #[error("timed out after {timeout:?} waiting for an event on channel '{channel}'")]
    Timeout {
        /// The channel being waited on.
        channel: String,
        /// How long the caller waited.
        timeout: Duration,
    },

    /// The waiting handler was removed before it received an event.
    #[error("wait on channel '{channel}' was abandoned before an event arrived")]
    Disconnected {
        /// The channel being waited on.
        channel: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn handler_error_exposes_source() {
        let error = Error::Handler {
            id: HandlerId::new(),
            channel: "x".into(),
            source: "boom".into(),
        };

        assert!(error.to_string().contains("channel 'x'"));
        assert_eq!(error.source().map(|e| e.to_string()), Some("boom".into()));
    }

    #[test]
    fn type_mismatch_names_expected_type() {
        let error = Error::TypeMismatch { expected: "u32" };

        assert!(error.to_string().contains("expected u32"));
    }
}
