//! Vitalshell Effects - Production Effect Handlers
//!
//! Implementations of the effect interfaces from `vitalshell-core`:
//!
//! - [`FallbackCapabilityHandler`] / [`PreauthorizedCapabilityHandler`]:
//!   capability handlers for platforms without a prompt flow.
//! - [`MemoryWebContent`]: an in-memory engine that simulates the embedded
//!   content's storage and bridge for local runs and tests.
//!
//! Platform-specific handlers (a real permission prompt, a real webview)
//! implement the same traits in platform crates; nothing in the bridge core
//! depends on which handler is behind the seam.

#![forbid(unsafe_code)]

mod capability;
mod memory;

pub use capability::{FallbackCapabilityHandler, PreauthorizedCapabilityHandler};
pub use memory::MemoryWebContent;
