//! Runtime configuration for the host and the exit exchange.

use std::time::Duration;
use vitalshell_core::codec;

/// How the host answers resource prompts raised by the embedded content
/// itself (camera or microphone use inside the page).
///
/// This is a security policy parameter, not UI: the platform capability the
/// gate resolves is a separate concern and is never affected by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentPermissionPolicy {
    /// Grant every content-raised prompt without asking
    #[default]
    GrantAll,
    /// Deny every content-raised prompt
    DenyAll,
}

/// Configuration of one embedded-content instance.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// URL of the measurement application
    pub target_url: String,
    /// Name of the bridge object referenced by injected scripts
    pub bridge_name: String,
    /// Storage key the publish request reads results from
    pub results_key: String,
    /// Policy for content-raised resource prompts
    pub content_permission_policy: ContentPermissionPolicy,
    /// Capacity of the inbound raw-payload queue
    pub inbound_capacity: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            target_url: "https://bp2.re.doctor/".to_string(),
            bridge_name: "VitalsBridge".to_string(),
            results_key: codec::RESULTS_STORAGE_KEY.to_string(),
            content_permission_policy: ContentPermissionPolicy::default(),
            inbound_capacity: 16,
        }
    }
}

/// Configuration of the exit coordinator.
#[derive(Debug, Clone)]
pub struct ExitConfig {
    /// Bound on the wait between the publish request and the inbound
    /// delivery. `None` waits forever, which reproduces the behavior of a
    /// content instance that simply never answers: the exit gesture hangs
    /// until the user abandons the screen another way.
    pub publish_timeout: Option<Duration>,
}

impl Default for ExitConfig {
    fn default() -> Self {
        Self {
            publish_timeout: Some(Duration::from_secs(10)),
        }
    }
}
