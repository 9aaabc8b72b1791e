//! Scripted capability handler with request accounting.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use vitalshell_core::effects::{Capability, CapabilityEffects, CapabilityOutcome};
use vitalshell_core::ShellError;

/// Deterministic capability handler for tests.
///
/// The grant status and the prompt answer are fixed at construction; every
/// prompt is counted so tests can assert the prompt-once invariant.
#[derive(Debug, Clone)]
pub struct ScriptedCapabilityHandler {
    state: Arc<Mutex<ScriptedState>>,
}

#[derive(Debug)]
struct ScriptedState {
    already_granted: bool,
    answer: CapabilityOutcome,
    requests: usize,
}

impl ScriptedCapabilityHandler {
    /// Status check reports granted; a prompt would never be reached.
    pub fn already_granted() -> Self {
        Self::with_script(true, CapabilityOutcome::Granted)
    }

    /// Status check reports not granted; the single prompt grants.
    pub fn prompt_grants() -> Self {
        Self::with_script(false, CapabilityOutcome::Granted)
    }

    /// Status check reports not granted; the single prompt denies.
    pub fn prompt_denies() -> Self {
        Self::with_script(false, CapabilityOutcome::Denied)
    }

    fn with_script(already_granted: bool, answer: CapabilityOutcome) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptedState {
                already_granted,
                answer,
                requests: 0,
            })),
        }
    }

    /// How many prompts this handler has raised.
    pub fn request_count(&self) -> usize {
        self.lock_state().requests
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ScriptedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CapabilityEffects for ScriptedCapabilityHandler {
    async fn is_granted(&self, _capability: Capability) -> Result<bool, ShellError> {
        Ok(self.lock_state().already_granted)
    }

    async fn request(&self, _capability: Capability) -> Result<CapabilityOutcome, ShellError> {
        let mut state = self.lock_state();
        state.requests += 1;
        Ok(state.answer)
    }
}
