//! # Error Types
//!
//! ## Overview
//!
//! This module contains the errors returned while attaching to a surface, and the errors that
//! listeners produce while handling notifications.
use crate::listener::ListenerHandle;

/// Failure to start observing a surface.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum AttachError {
    /// The notifier is already observing a surface.
    #[error("Notifier is already attached to a surface")]
    AlreadyAttached,

    /// The surface reported that it cannot currently be observed, or no longer exists.
    #[error("Surface is unavailable")]
    Unavailable,

    /// The surface is being modified by the host and could not be read.
    #[error("Surface is busy")]
    Busy,
}

/// An error returned by a listener while handling a notification.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
#[error("{0}")]
pub struct ListenerError(String);

impl ListenerError {
    /// Create a new error with the given message.
    pub fn new<T: Into<String>>(msg: T) -> Self {
        ListenerError(msg.into())
    }

    /// The error message.
    pub fn message(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for ListenerError {
    fn from(msg: String) -> Self {
        ListenerError(msg)
    }
}

impl From<&str> for ListenerError {
    fn from(msg: &str) -> Self {
        ListenerError(msg.to_string())
    }
}

/// A listener failure caught at the dispatch boundary.
///
/// These never interrupt dispatch. They are logged, and returned in the
/// [Observation](crate::notifier::Observation) for the tick that produced them.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum HandlerError {
    /// The listener returned an error.
    #[error("Listener {0} failed: {1}")]
    Failed(ListenerHandle, ListenerError),

    /// The listener panicked.
    #[error("Listener {0} panicked: {1}")]
    Panicked(ListenerHandle, String),
}

impl HandlerError {
    /// The listener that failed.
    pub fn listener(&self) -> ListenerHandle {
        match self {
            HandlerError::Failed(handle, _) => *handle,
            HandlerError::Panicked(handle, _) => *handle,
        }
    }
}
