//! Pure effect interfaces (no implementations)
//!
//! The host touches two platform services: the permission system and the
//! browser-engine component. Both are expressed as trait seams here so the
//! bridge core stays testable without either. Production handlers live in
//! `vitalshell-effects`; scripted mocks live in `vitalshell-testkit`.

mod capability;
mod web_content;

pub use capability::{Capability, CapabilityEffects, CapabilityOutcome};
pub use web_content::{
    ContentEvent, PermissionDecision, WebContentEffects, WebContentSettings,
};
