//! Vitalshell Host - The Host/Embedded-Content Bridge
//!
//! The orchestration layer of the vitalshell workspace, owning one screen
//! visit's worth of state:
//!
//! - [`CapabilityGate`]: resolves the camera capability before any content
//!   is constructed, prompting at most once per visit.
//! - [`EmbeddedContentHost`]: owns one embedded-content instance, seeds the
//!   user profile at first load, pumps engine events, and exposes the
//!   publish request.
//! - [`ExitCoordinator`]: turns the user's exit signal into the
//!   request/decode/handoff exchange, with an optional bounded wait.
//! - [`HandoffSlot`]: the write-once/read-once mailbox carrying the decoded
//!   results to the next screen.
//!
//! Everything here is constructed fresh per screen visit and discarded when
//! the visit ends; there are no process-wide singletons.

#![forbid(unsafe_code)]

mod config;
mod coordinator;
mod gate;
mod handoff;
mod host;

pub use config::{ContentPermissionPolicy, ExitConfig, HostConfig};
pub use coordinator::{CoordinatorState, ExitCoordinator, ExitDisposition};
pub use gate::{CapabilityGate, GateOutcome};
pub use handoff::HandoffSlot;
pub use host::EmbeddedContentHost;
