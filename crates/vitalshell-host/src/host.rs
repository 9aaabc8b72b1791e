//! Embedded-content host: one content instance per screen visit.
//!
//! The host applies engine settings, loads the measurement application,
//! seeds the user profile on the first load, and pumps engine events for the
//! lifetime of the visit. Bridge payloads are forwarded into a bounded
//! inbound queue in arrival order; the exit coordinator owns the consuming
//! end.

use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use vitalshell_core::codec;
use vitalshell_core::effects::{
    ContentEvent, PermissionDecision, WebContentEffects, WebContentSettings,
};
use vitalshell_core::{ShellError, UserProfile};

use crate::config::{ContentPermissionPolicy, HostConfig};

/// Owner of one embedded-content instance.
pub struct EmbeddedContentHost {
    engine: Arc<dyn WebContentEffects>,
    config: HostConfig,
    inbound: Mutex<Option<mpsc::Receiver<String>>>,
    pump: JoinHandle<()>,
}

impl EmbeddedContentHost {
    /// Construct the content: apply settings, start the event pump, begin
    /// loading the target URL.
    ///
    /// `events` is the receiver paired with `engine` at engine construction.
    /// The profile is injected exactly once, on the first load-start event,
    /// before any user interaction with the content is possible.
    pub async fn initialize(
        config: HostConfig,
        profile: UserProfile,
        engine: Arc<dyn WebContentEffects>,
        events: mpsc::Receiver<ContentEvent>,
    ) -> Result<Self, ShellError> {
        engine.apply_settings(WebContentSettings::default()).await?;

        let (inbound_tx, inbound_rx) = mpsc::channel(config.inbound_capacity);
        let pump = EventPump {
            engine: Arc::clone(&engine),
            injection: codec::encode_profile(&profile),
            policy: config.content_permission_policy,
            inbound: inbound_tx,
            injected: false,
        };
        let pump = tokio::spawn(pump.run(events));

        engine.load(&config.target_url).await?;
        tracing::info!(url = %config.target_url, "embedded content loading");

        Ok(Self {
            engine,
            config,
            inbound: Mutex::new(Some(inbound_rx)),
            pump,
        })
    }

    /// Claim the consuming end of the inbound channel. Yields `Some` exactly
    /// once; the single consumer owns decode and state-transition logic.
    pub fn take_inbound(&self) -> Option<mpsc::Receiver<String>> {
        self.inbound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Ask the content to publish its stored results over the bridge.
    ///
    /// Returns once the script has been dispatched. A delivery follows only
    /// if the results key holds a non-empty value; callers must not assume
    /// one does.
    pub async fn request_publish(&self) -> Result<(), ShellError> {
        let script = codec::publish_script(&self.config.bridge_name, &self.config.results_key);
        tracing::debug!(key = %self.config.results_key, "requesting results publish");
        self.engine.evaluate_script(&script).await
    }

    /// The configuration this instance was constructed with.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}

impl Drop for EmbeddedContentHost {
    fn drop(&mut self) {
        // The engine and its storage die with the screen visit.
        self.pump.abort();
    }
}

/// The host-side consumer of engine events.
struct EventPump {
    engine: Arc<dyn WebContentEffects>,
    injection: String,
    policy: ContentPermissionPolicy,
    inbound: mpsc::Sender<String>,
    injected: bool,
}

impl EventPump {
    async fn run(mut self, mut events: mpsc::Receiver<ContentEvent>) {
        while let Some(event) = events.recv().await {
            self.handle(event).await;
        }
        tracing::debug!("engine event stream ended");
    }

    async fn handle(&mut self, event: ContentEvent) {
        match event {
            ContentEvent::LoadStarted { url } => {
                tracing::debug!(%url, "load started");
                if !self.injected {
                    self.injected = true;
                    if let Err(err) = self.engine.evaluate_script(&self.injection).await {
                        tracing::error!(error = %err, "profile injection failed");
                    }
                }
            }
            ContentEvent::LoadFinished { url } => {
                tracing::info!(%url, "embedded content loaded");
            }
            ContentEvent::BridgeMessage { raw } => {
                // Diagnostic record of every raw payload, best-effort.
                tracing::debug!(payload = %raw, "bridge payload received");
                match self.inbound.try_send(raw) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        tracing::warn!("inbound queue full, dropping bridge payload");
                    }
                    Err(TrySendError::Closed(_)) => {
                        tracing::debug!("no inbound consumer, dropping bridge payload");
                    }
                }
            }
            ContentEvent::PermissionRequest { resources, respond } => {
                let decision = match self.policy {
                    ContentPermissionPolicy::GrantAll => PermissionDecision::Grant,
                    ContentPermissionPolicy::DenyAll => PermissionDecision::Deny,
                };
                tracing::debug!(?resources, ?decision, "content resource prompt answered by policy");
                let _ = respond.send(decision);
            }
        }
    }
}
