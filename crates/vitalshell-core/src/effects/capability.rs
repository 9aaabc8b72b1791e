//! Platform capability effect trait definitions.
//!
//! A capability is a platform-gated permission (camera access, in this
//! deployment) that must be granted before the embedded content may load.
//! Handlers wrap whatever permission API the platform provides; the gate in
//! `vitalshell-host` drives them and owns the prompt-once policy.

use crate::ShellError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A platform-gated permission the host may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Camera access, required by the measurement application
    Camera,
    /// Microphone access
    Microphone,
}

impl Capability {
    /// Human-readable name used in notices and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Microphone => "microphone",
        }
    }
}

/// The outcome of a single permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapabilityOutcome {
    Granted,
    Denied,
}

/// Access to the platform permission system.
///
/// Implementations must not prompt from [`is_granted`](Self::is_granted) -
/// only [`request`](Self::request) may raise a user-facing prompt, and the
/// caller decides how often that happens.
#[async_trait]
pub trait CapabilityEffects: Send + Sync {
    /// Whether the capability is currently granted, without prompting.
    async fn is_granted(&self, capability: Capability) -> Result<bool, ShellError>;

    /// Raise one permission prompt and report its outcome.
    async fn request(&self, capability: Capability) -> Result<CapabilityOutcome, ShellError>;
}
