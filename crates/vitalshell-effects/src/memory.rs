//! In-memory engine for testing and local runs.
//!
//! Simulates the embedded content at the protocol level: a persistent
//! key-value storage map and the two script shapes the host injects. It does
//! not run JavaScript - a script that is neither a profile write nor a
//! publish request is rejected, which catches protocol drift early.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, oneshot};
use vitalshell_core::effects::{
    ContentEvent, PermissionDecision, WebContentEffects, WebContentSettings,
};
use vitalshell_core::ShellError;

use async_trait::async_trait;

const EVENT_QUEUE_CAPACITY: usize = 32;

/// In-memory browser engine simulating the embedded content.
#[derive(Debug, Clone)]
pub struct MemoryWebContent {
    state: Arc<Mutex<EngineState>>,
    events: mpsc::Sender<ContentEvent>,
}

#[derive(Debug)]
struct EngineState {
    settings: WebContentSettings,
    storage: HashMap<String, String>,
    /// Write counters per storage key, for load-time injection assertions
    writes: HashMap<String, usize>,
    current_url: Option<String>,
}

impl MemoryWebContent {
    /// Create an engine and the event receiver the host will own.
    pub fn new() -> (Self, mpsc::Receiver<ContentEvent>) {
        let (events, receiver) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let engine = Self {
            state: Arc::new(Mutex::new(EngineState {
                // Browser defaults: nothing enabled until the host applies
                // its settings.
                settings: WebContentSettings {
                    javascript_enabled: false,
                    persistent_storage_enabled: false,
                },
                storage: HashMap::new(),
                writes: HashMap::new(),
                current_url: None,
            })),
            events,
        };
        (engine, receiver)
    }

    /// Write a value into the simulated storage, as the embedded application
    /// would after a measurement.
    pub fn seed_storage(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock_state().storage.insert(key.into(), value.into());
    }

    /// Remove a key from the simulated storage.
    pub fn clear_storage(&self, key: &str) {
        self.lock_state().storage.remove(key);
    }

    /// Read back a stored value.
    pub fn storage_get(&self, key: &str) -> Option<String> {
        self.lock_state().storage.get(key).cloned()
    }

    /// How many times a key has been written through injected scripts.
    pub fn write_count(&self, key: &str) -> usize {
        self.lock_state().writes.get(key).copied().unwrap_or(0)
    }

    /// The URL most recently loaded, if any.
    pub fn current_url(&self) -> Option<String> {
        self.lock_state().current_url.clone()
    }

    /// Simulate the content raising a resource prompt (e.g. its own camera
    /// use) and wait for the host's decision. A torn-down host denies.
    pub async fn raise_permission_request(&self, resources: Vec<String>) -> PermissionDecision {
        let (respond, decision) = oneshot::channel();
        self.emit(ContentEvent::PermissionRequest { resources, respond })
            .await;
        decision.await.unwrap_or(PermissionDecision::Deny)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn emit(&self, event: ContentEvent) {
        if self.events.send(event).await.is_err() {
            tracing::debug!("content host detached, dropping engine event");
        }
    }
}

#[async_trait]
impl WebContentEffects for MemoryWebContent {
    async fn apply_settings(&self, settings: WebContentSettings) -> Result<(), ShellError> {
        self.lock_state().settings = settings;
        Ok(())
    }

    async fn load(&self, url: &str) -> Result<(), ShellError> {
        self.lock_state().current_url = Some(url.to_string());
        self.emit(ContentEvent::LoadStarted {
            url: url.to_string(),
        })
        .await;
        self.emit(ContentEvent::LoadFinished {
            url: url.to_string(),
        })
        .await;
        Ok(())
    }

    async fn evaluate_script(&self, script: &str) -> Result<(), ShellError> {
        // Interpret under the lock; emit only after releasing it.
        let publish_value = {
            let mut state = self.lock_state();
            if !state.settings.javascript_enabled {
                return Err(ShellError::engine("script evaluation with JavaScript disabled"));
            }

            if let Some((key, literal)) = parse_set_item(script) {
                if !state.settings.persistent_storage_enabled {
                    return Err(ShellError::engine("persistent storage is disabled"));
                }
                let value: serde_json::Value = serde_json::from_str(&literal).map_err(|err| {
                    ShellError::engine(format!("setItem value is not valid JSON: {err}"))
                })?;
                // JSON.stringify: the object literal is stored as JSON text.
                let raw = value.to_string();
                *state.writes.entry(key.clone()).or_insert(0) += 1;
                state.storage.insert(key, raw);
                None
            } else if let Some(key) = parse_publish(script) {
                state.storage.get(&key).filter(|v| !v.is_empty()).cloned()
            } else {
                return Err(ShellError::engine(
                    "script not understood by the in-memory engine",
                ));
            }
        };

        if let Some(raw) = publish_value {
            self.emit(ContentEvent::BridgeMessage { raw }).await;
        }
        Ok(())
    }
}

/// Recognize `localStorage.setItem("<key>", JSON.stringify(<literal>));`.
fn parse_set_item(script: &str) -> Option<(String, String)> {
    let rest = script.trim().strip_prefix("localStorage.setItem(\"")?;
    let (key, rest) = rest.split_once('"')?;
    let rest = rest.strip_prefix(", JSON.stringify(")?;
    let literal = rest.strip_suffix("));")?;
    Some((key.to_string(), literal.to_string()))
}

/// Recognize the publish request: a `localStorage.getItem("<key>")` read
/// feeding a bridge `sendData(data)` call. Returns the storage key.
fn parse_publish(script: &str) -> Option<String> {
    let idx = script.find("localStorage.getItem(\"")?;
    let rest = &script[idx + "localStorage.getItem(\"".len()..];
    let (key, _) = rest.split_once('"')?;
    script.contains(".sendData(data)").then(|| key.to_string())
}
