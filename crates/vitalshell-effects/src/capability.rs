//! Capability effect handlers for platforms without a prompt flow.
//!
//! The fallback handler implements the null object pattern: it reports every
//! capability as unavailable and answers every request with a denial. It is
//! the default for headless environments (servers, CI, development machines
//! without a camera stack) and lets the gate run on any platform without
//! compile-time feature flags.
//!
//! For testing use the scripted handler from `vitalshell-testkit`. For
//! production with a real permission system, implement platform-specific
//! handlers.

use async_trait::async_trait;
use std::collections::HashSet;
use vitalshell_core::effects::{Capability, CapabilityEffects, CapabilityOutcome};
use vitalshell_core::ShellError;

/// Fallback capability handler for platforms without a permission system.
///
/// Every status check reports not-granted and every request is denied, so
/// the gate resolves to a denial and the embedded content stays
/// unconstructed - the same user-visible outcome as a denied prompt.
#[derive(Debug, Clone, Default)]
pub struct FallbackCapabilityHandler;

impl FallbackCapabilityHandler {
    /// Create a new fallback capability handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CapabilityEffects for FallbackCapabilityHandler {
    async fn is_granted(&self, _capability: Capability) -> Result<bool, ShellError> {
        Ok(false)
    }

    async fn request(&self, capability: Capability) -> Result<CapabilityOutcome, ShellError> {
        tracing::debug!(
            capability = capability.label(),
            "no permission system available, denying request"
        );
        Ok(CapabilityOutcome::Denied)
    }
}

/// Capability handler with a fixed pre-authorized set.
///
/// For deployments where permissions are provisioned out of band (kiosks,
/// managed devices): capabilities in the set are already granted, everything
/// else is denied without prompting.
#[derive(Debug, Clone, Default)]
pub struct PreauthorizedCapabilityHandler {
    granted: HashSet<Capability>,
}

impl PreauthorizedCapabilityHandler {
    /// Create a handler pre-authorizing the given capabilities.
    pub fn new(granted: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            granted: granted.into_iter().collect(),
        }
    }

    /// Convenience constructor for the shipped flow: camera only.
    pub fn with_camera() -> Self {
        Self::new([Capability::Camera])
    }
}

#[async_trait]
impl CapabilityEffects for PreauthorizedCapabilityHandler {
    async fn is_granted(&self, capability: Capability) -> Result<bool, ShellError> {
        Ok(self.granted.contains(&capability))
    }

    async fn request(&self, capability: Capability) -> Result<CapabilityOutcome, ShellError> {
        if self.granted.contains(&capability) {
            Ok(CapabilityOutcome::Granted)
        } else {
            Ok(CapabilityOutcome::Denied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fallback_denies_everything() {
        let handler = FallbackCapabilityHandler::new();
        assert!(!handler.is_granted(Capability::Camera).await.expect("status"));
        assert_eq!(
            handler.request(Capability::Camera).await.expect("request"),
            CapabilityOutcome::Denied
        );
    }

    #[tokio::test]
    async fn test_preauthorized_grants_only_the_set() {
        let handler = PreauthorizedCapabilityHandler::with_camera();
        assert!(handler.is_granted(Capability::Camera).await.expect("status"));
        assert!(!handler
            .is_granted(Capability::Microphone)
            .await
            .expect("status"));
        assert_eq!(
            handler
                .request(Capability::Microphone)
                .await
                .expect("request"),
            CapabilityOutcome::Denied
        );
    }
}
