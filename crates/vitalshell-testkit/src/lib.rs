//! Vitalshell Testkit - Test Infrastructure
//!
//! Scripted effect mocks, canonical wire fixtures, and small helpers shared
//! by the workspace's integration tests. Production code must never depend
//! on this crate.

#![forbid(unsafe_code)]

mod capability;
mod fixtures;

pub use capability::ScriptedCapabilityHandler;
pub use fixtures::{sample_results_list, sample_vitals_result, SAMPLE_RESULTS_JSON};

/// Let spawned host tasks drain their queues on a current-thread runtime.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
