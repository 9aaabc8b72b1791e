//! Browser-engine effect trait definitions.
//!
//! The embedded content runs in its own execution environment; the host only
//! ever drives it through this seam. All operations are asynchronous and
//! unordered relative to host-issued calls made after them. Engines report
//! everything that happens on their side - loads, bridge invocations,
//! content-raised permission prompts - as [`ContentEvent`]s over a channel
//! handed to the host at construction time.

use crate::ShellError;
use async_trait::async_trait;
use tokio::sync::oneshot;

/// Engine settings the host applies before loading any content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebContentSettings {
    /// Whether script execution is enabled
    pub javascript_enabled: bool,
    /// Whether the content's persistent key-value storage is enabled
    pub persistent_storage_enabled: bool,
}

impl Default for WebContentSettings {
    /// The measurement application needs both scripting and storage.
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            persistent_storage_enabled: true,
        }
    }
}

/// Host answer to a content-raised resource prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    Grant,
    Deny,
}

/// Everything the engine reports back to the host.
///
/// Events arrive in the order the content produced them; the host's event
/// pump is the single consumer.
#[derive(Debug)]
pub enum ContentEvent {
    /// A page load started. The first of these is the host's injection point.
    LoadStarted {
        url: String,
    },
    /// A page load finished.
    LoadFinished {
        url: String,
    },
    /// The content invoked the bridge function with a raw string payload.
    BridgeMessage {
        raw: String,
    },
    /// The content asked for access to a platform resource (e.g. its own
    /// camera use). The engine blocks the prompt until `respond` fires.
    PermissionRequest {
        resources: Vec<String>,
        respond: oneshot::Sender<PermissionDecision>,
    },
}

/// The browser-engine component hosting the embedded content.
///
/// Engine constructors return the [`ContentEvent`] receiver alongside the
/// engine; the host owns that receiver for the instance's lifetime, and the
/// engine's storage and execution state are torn down with it.
#[async_trait]
pub trait WebContentEffects: Send + Sync {
    /// Apply engine settings. Called once, before [`load`](Self::load).
    async fn apply_settings(&self, settings: WebContentSettings) -> Result<(), ShellError>;

    /// Begin loading the given URL. Completion is reported as events.
    async fn load(&self, url: &str) -> Result<(), ShellError>;

    /// Execute a script inside the content.
    ///
    /// Returns once the script has been dispatched; any bridge invocation the
    /// script causes arrives later as a [`ContentEvent::BridgeMessage`].
    async fn evaluate_script(&self, script: &str) -> Result<(), ShellError>;
}
