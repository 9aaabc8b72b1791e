//! Capability gate: resolve a platform capability before content loads.
//!
//! One gate guards one capability for one screen visit. It checks the
//! current grant status first and only raises a prompt when the status check
//! comes back negative; whatever single answer the prompt produces is cached
//! for the lifetime of the gate, so a denial is never re-prompted. A fresh
//! visit constructs a fresh gate and starts over.

use std::sync::Arc;
use vitalshell_core::effects::{Capability, CapabilityEffects, CapabilityOutcome};
use vitalshell_core::ShellError;

/// The resolved position of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Granted,
    Denied,
}

/// Per-visit capability gate.
pub struct CapabilityGate {
    capability: Capability,
    handler: Arc<dyn CapabilityEffects>,
    outcome: Option<GateOutcome>,
}

impl CapabilityGate {
    /// Create an unresolved gate for one capability.
    pub fn new(capability: Capability, handler: Arc<dyn CapabilityEffects>) -> Self {
        Self {
            capability,
            handler,
            outcome: None,
        }
    }

    /// Resolve the gate, prompting at most once per gate instance.
    ///
    /// Returns `Ok(())` when the capability is granted; the caller then
    /// constructs the embedded content. Returns the capability-denied error
    /// otherwise, and keeps returning it on later calls without touching the
    /// permission system again. A handler transport failure propagates
    /// without caching, since no outcome was observed.
    pub async fn resolve(&mut self) -> Result<(), ShellError> {
        if let Some(outcome) = self.outcome {
            return self.finish(outcome);
        }

        if self.handler.is_granted(self.capability).await? {
            self.outcome = Some(GateOutcome::Granted);
            return Ok(());
        }

        let outcome = match self.handler.request(self.capability).await? {
            CapabilityOutcome::Granted => GateOutcome::Granted,
            CapabilityOutcome::Denied => GateOutcome::Denied,
        };
        self.outcome = Some(outcome);
        self.finish(outcome)
    }

    /// The cached outcome, if the gate has been resolved.
    pub fn outcome(&self) -> Option<GateOutcome> {
        self.outcome
    }

    fn finish(&self, outcome: GateOutcome) -> Result<(), ShellError> {
        match outcome {
            GateOutcome::Granted => Ok(()),
            GateOutcome::Denied => {
                let notice = format!("the {} is unavailable", self.capability.label());
                tracing::warn!(capability = self.capability.label(), "capability denied");
                Err(ShellError::capability_denied(notice))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Handler that counts prompts and answers from a fixed script.
    struct CountingHandler {
        already_granted: bool,
        answer: CapabilityOutcome,
        requests: AtomicUsize,
    }

    impl CountingHandler {
        fn new(already_granted: bool, answer: CapabilityOutcome) -> Self {
            Self {
                already_granted,
                answer,
                requests: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CapabilityEffects for CountingHandler {
        async fn is_granted(&self, _capability: Capability) -> Result<bool, ShellError> {
            Ok(self.already_granted)
        }

        async fn request(&self, _capability: Capability) -> Result<CapabilityOutcome, ShellError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer)
        }
    }

    #[tokio::test]
    async fn test_already_granted_skips_the_prompt() {
        let handler = Arc::new(CountingHandler::new(true, CapabilityOutcome::Denied));
        let mut gate = CapabilityGate::new(Capability::Camera, handler.clone());

        gate.resolve().await.expect("granted without prompting");
        assert_eq!(gate.outcome(), Some(GateOutcome::Granted));
        assert_eq!(handler.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_denial_is_cached_and_never_reprompted() {
        let handler = Arc::new(CountingHandler::new(false, CapabilityOutcome::Denied));
        let mut gate = CapabilityGate::new(Capability::Camera, handler.clone());

        for _ in 0..3 {
            let err = gate.resolve().await.expect_err("denied");
            assert!(matches!(err, ShellError::CapabilityDenied { .. }));
        }
        // One prompt total, no matter how many times the denial is observed.
        assert_eq!(handler.requests.load(Ordering::SeqCst), 1);
        assert_eq!(gate.outcome(), Some(GateOutcome::Denied));
    }

    #[tokio::test]
    async fn test_prompt_grant_resolves_the_gate() {
        let handler = Arc::new(CountingHandler::new(false, CapabilityOutcome::Granted));
        let mut gate = CapabilityGate::new(Capability::Camera, handler.clone());

        gate.resolve().await.expect("granted by prompt");
        gate.resolve().await.expect("cached grant");
        assert_eq!(handler.requests.load(Ordering::SeqCst), 1);
    }
}
