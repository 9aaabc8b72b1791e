//! Unified error system for the vitalshell host
//!
//! This module provides a single error type shared by every crate in the
//! workspace. None of these errors is fatal to the process: the worst
//! user-visible outcome anywhere in the host is "no data yet".

use serde::{Deserialize, Serialize};

/// Unified error type for all vitalshell operations
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum ShellError {
    /// A required platform capability was not granted
    #[error("Capability denied: {message}")]
    CapabilityDenied {
        /// Error message describing which capability was denied
        message: String,
    },

    /// A results payload could not be decoded into the vitals schema
    #[error("Decode error: {message}")]
    Decode {
        /// Error message describing the decode failure
        message: String,
    },

    /// The embedded content never published within the configured bound
    #[error("Publish timed out after {timeout_ms}ms")]
    PublishTimeout {
        /// The wait bound that elapsed, in milliseconds
        timeout_ms: u64,
    },

    /// The browser-engine component rejected a load or script evaluation
    #[error("Engine error: {message}")]
    Engine {
        /// Error message describing the engine failure
        message: String,
    },

    /// The inbound channel closed while a delivery was awaited
    #[error("Channel closed: {message}")]
    ChannelClosed {
        /// Error message describing where the channel closed
        message: String,
    },
}

impl ShellError {
    /// Create a capability-denied error
    pub fn capability_denied(message: impl Into<String>) -> Self {
        Self::CapabilityDenied {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a publish-timeout error
    pub fn publish_timeout(timeout_ms: u64) -> Self {
        Self::PublishTimeout { timeout_ms }
    }

    /// Create an engine error
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }

    /// Create a channel-closed error
    pub fn channel_closed(message: impl Into<String>) -> Self {
        Self::ChannelClosed {
            message: message.into(),
        }
    }

    /// Whether this error is recoverable by substituting an empty result list
    pub fn recoverable_with_empty_list(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::PublishTimeout { .. })
    }
}
