//! Error types produced while dispatching events to handlers.
//!
//! The bus itself never returns errors to publishers: every variant here is
//! caught by the dispatcher, logged with the event key and swallowed.
//!
//! - [`HandlerError`]: why a single handler invocation did not complete.
//! - [`BoxError`]: the erased error type fallible handlers may return.
//!
//! [`HandlerError`] provides helper methods (`as_label`, `as_message`) for logging.

use std::any::Any;

use thiserror::Error;

/// Type-erased error returned by fallible handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Errors produced by a single handler invocation.
///
/// None of these cross the `trigger` boundary; the dispatcher logs them and
/// moves on to the next handler in the pass.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The handler returned an error.
    #[error("handler failed: {error}")]
    Failed {
        /// The underlying error.
        error: BoxError,
    },

    /// The handler panicked; the panic was caught.
    #[error("handler panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },

    /// An async subscriber could not accept the event (queue full or worker gone).
    #[error("subscriber {subscriber:?} dropped event: queue {reason}")]
    Overflow {
        /// Name reported by the subscriber.
        subscriber: &'static str,
        /// `"full"` or `"closed"`.
        reason: &'static str,
    },
}

impl HandlerError {
    /// Wraps any error convertible into [`BoxError`].
    pub fn failed(error: impl Into<BoxError>) -> Self {
        HandlerError::Failed {
            error: error.into(),
        }
    }

    /// Builds a [`HandlerError::Panicked`] from a caught panic payload.
    pub fn panicked(payload: &(dyn Any + Send)) -> Self {
        HandlerError::Panicked {
            info: panic_message(payload),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use eventbus::HandlerError;
    ///
    /// let err = HandlerError::failed("boom");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Failed { .. } => "handler_failed",
            HandlerError::Panicked { .. } => "handler_panicked",
            HandlerError::Overflow { .. } => "subscriber_overflow",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Failed { error } => format!("error: {error}"),
            HandlerError::Panicked { info } => format!("panic: {info}"),
            HandlerError::Overflow { subscriber, reason } => {
                format!("subscriber={subscriber} reason={reason}")
            }
        }
    }
}

/// Renders a panic payload (`&str`, `String`, anything else) as text.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(HandlerError::failed("x").as_label(), "handler_failed");
        assert_eq!(
            HandlerError::Panicked { info: "x".into() }.as_label(),
            "handler_panicked"
        );
        assert_eq!(
            HandlerError::Overflow {
                subscriber: "metrics",
                reason: "full"
            }
            .as_label(),
            "subscriber_overflow"
        );
    }

    #[test]
    fn test_panic_payloads_render() {
        let static_str: Box<dyn Any + Send> = Box::new("static boom");
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        let other: Box<dyn Any + Send> = Box::new(42_u8);

        assert_eq!(panic_message(static_str.as_ref()), "static boom");
        assert_eq!(panic_message(owned.as_ref()), "owned boom");
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }

    #[test]
    fn test_display_and_message() {
        let err = HandlerError::failed("bad payload");
        assert_eq!(err.to_string(), "handler failed: bad payload");
        assert_eq!(err.as_message(), "error: bad payload");

        let err = HandlerError::Overflow {
            subscriber: "audit",
            reason: "closed",
        };
        assert_eq!(err.to_string(), "subscriber \"audit\" dropped event: queue closed");
        assert_eq!(err.as_message(), "subscriber=audit reason=closed");
    }
}
