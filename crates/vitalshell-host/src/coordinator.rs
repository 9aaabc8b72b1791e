//! Exit coordinator: turn the user's exit signal into a results handoff.
//!
//! The coordinator owns the consuming end of the inbound channel, so decode
//! and state transitions happen in exactly one place. One coordinator serves
//! one screen visit.

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use vitalshell_core::{codec, ShellError, VitalsResultList};

use crate::config::ExitConfig;
use crate::handoff::HandoffSlot;
use crate::host::EmbeddedContentHost;

/// Where the coordinator is in the exit exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Idle,
    AwaitingPublish,
}

/// What the navigation layer should do after an exit signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDisposition {
    /// A payload arrived and the decoded list (or an empty list, on decode
    /// failure) was handed off. Perform the suppressed exit action.
    Completed,
    /// The bounded wait elapsed; an empty list was handed off. Perform the
    /// suppressed exit action.
    TimedOut,
    /// A publish exchange is already in flight; this signal is a no-op.
    AlreadyAwaiting,
}

/// Per-visit exit coordinator.
pub struct ExitCoordinator {
    host: Arc<EmbeddedContentHost>,
    inbound: mpsc::Receiver<String>,
    slot: HandoffSlot<VitalsResultList>,
    config: ExitConfig,
    state: watch::Sender<CoordinatorState>,
}

impl ExitCoordinator {
    /// Build a coordinator over a host, claiming its inbound channel.
    pub fn new(
        host: Arc<EmbeddedContentHost>,
        slot: HandoffSlot<VitalsResultList>,
        config: ExitConfig,
    ) -> Result<Self, ShellError> {
        let inbound = host
            .take_inbound()
            .ok_or_else(|| ShellError::channel_closed("inbound channel already claimed"))?;
        let (state, _) = watch::channel(CoordinatorState::Idle);
        Ok(Self {
            host,
            inbound,
            slot,
            config,
            state,
        })
    }

    /// Current state of the exit exchange.
    pub fn state(&self) -> CoordinatorState {
        *self.state.borrow()
    }

    /// Observe state transitions without holding the coordinator.
    pub fn watch_state(&self) -> watch::Receiver<CoordinatorState> {
        self.state.subscribe()
    }

    /// Drive one exit signal through the publish/decode/handoff exchange.
    ///
    /// The default exit action is always suppressed by calling this; the
    /// returned disposition tells the navigation layer whether to perform it
    /// now. Blank deliveries are ignored and do not extend the bounded wait:
    /// the timeout bounds the whole gesture. A channel-closed error can only
    /// occur when the host is torn down while the wait is in flight.
    pub async fn handle_exit_signal(&mut self) -> Result<ExitDisposition, ShellError> {
        if self.state() == CoordinatorState::AwaitingPublish {
            tracing::debug!("exit signal while a publish exchange is in flight, ignoring");
            return Ok(ExitDisposition::AlreadyAwaiting);
        }
        self.state.send_replace(CoordinatorState::AwaitingPublish);

        if let Err(err) = self.host.request_publish().await {
            self.state.send_replace(CoordinatorState::Idle);
            return Err(err);
        }

        let deadline = self
            .config
            .publish_timeout
            .map(|timeout| tokio::time::Instant::now() + timeout);

        let raw = loop {
            let delivery = match deadline {
                Some(at) => match tokio::time::timeout_at(at, self.inbound.recv()).await {
                    Ok(delivery) => delivery,
                    Err(_) => {
                        let timeout_ms = self
                            .config
                            .publish_timeout
                            .map(|t| t.as_millis() as u64)
                            .unwrap_or(0);
                        tracing::warn!(
                            timeout_ms,
                            "embedded content never published, handing off empty results"
                        );
                        self.finish(Vec::new());
                        return Ok(ExitDisposition::TimedOut);
                    }
                },
                None => self.inbound.recv().await,
            };

            let Some(raw) = delivery else {
                self.state.send_replace(CoordinatorState::Idle);
                return Err(ShellError::channel_closed(
                    "content host torn down during publish wait",
                ));
            };
            if raw.trim().is_empty() {
                tracing::debug!("blank bridge delivery while awaiting publish, ignoring");
                continue;
            }
            break raw;
        };

        let results = match codec::decode_results(&raw) {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!(error = %err, "results payload failed to decode, handing off empty list");
                Vec::new()
            }
        };
        self.finish(results);
        Ok(ExitDisposition::Completed)
    }

    fn finish(&self, results: VitalsResultList) {
        self.state.send_replace(CoordinatorState::Idle);
        self.slot.publish(results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;
    use std::time::Duration;
    use vitalshell_core::UserProfile;
    use vitalshell_effects::MemoryWebContent;

    async fn visit(
        exit_config: ExitConfig,
    ) -> (MemoryWebContent, ExitCoordinator, HandoffSlot<VitalsResultList>) {
        let (engine, events) = MemoryWebContent::new();
        let host = EmbeddedContentHost::initialize(
            HostConfig::default(),
            UserProfile::default(),
            Arc::new(engine.clone()),
            events,
        )
        .await
        .expect("host initializes");
        let slot = HandoffSlot::new();
        let coordinator = ExitCoordinator::new(Arc::new(host), slot.clone(), exit_config)
            .expect("coordinator claims inbound");
        (engine, coordinator, slot)
    }

    #[tokio::test(start_paused = true)]
    async fn test_exit_with_stored_results_hands_them_off() {
        let (engine, mut coordinator, slot) = visit(ExitConfig::default()).await;
        engine.seed_storage(
            codec::RESULTS_STORAGE_KEY,
            r#"[{"timestamp":1700000000000,"result":{"basicVitals":{"bloodOxygen":98,"heartRate":72,"respirationRate":16,"coreBodyTemperature":36.6,"systolicBloodPressure":120,"diastolicBloodPressure":80,"pulsePressure":40.0,"stress":2,"reflectionIndex":3,"lasi":5,"hrv":55},"glucose":{"glucoseMin":80,"glucoseMax":110},"riskLevel":1}}]"#,
        );

        let disposition = coordinator
            .handle_exit_signal()
            .await
            .expect("exchange completes");
        assert_eq!(disposition, ExitDisposition::Completed);
        assert_eq!(coordinator.state(), CoordinatorState::Idle);

        let results = slot.take().expect("handoff written");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].timestamp, 1_700_000_000_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exit_with_malformed_results_hands_off_empty_list() {
        let (engine, mut coordinator, slot) = visit(ExitConfig::default()).await;
        engine.seed_storage(codec::RESULTS_STORAGE_KEY, "{}");

        let disposition = coordinator
            .handle_exit_signal()
            .await
            .expect("exchange completes");
        assert_eq!(disposition, ExitDisposition::Completed);
        assert_eq!(slot.take(), Some(Vec::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exit_with_no_results_times_out_to_empty_handoff() {
        let exit_config = ExitConfig {
            publish_timeout: Some(Duration::from_secs(5)),
        };
        let (_engine, mut coordinator, slot) = visit(exit_config).await;

        let disposition = coordinator
            .handle_exit_signal()
            .await
            .expect("exchange completes");
        assert_eq!(disposition, ExitDisposition::TimedOut);
        assert_eq!(coordinator.state(), CoordinatorState::Idle);
        assert_eq!(slot.take(), Some(Vec::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_wait_stays_awaiting_without_handoff() {
        let exit_config = ExitConfig {
            publish_timeout: None,
        };
        let (_engine, mut coordinator, slot) = visit(exit_config).await;
        let mut state = coordinator.watch_state();

        let exchange = tokio::spawn(async move { coordinator.handle_exit_signal().await });
        state
            .wait_for(|s| *s == CoordinatorState::AwaitingPublish)
            .await
            .expect("coordinator enters the wait");

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(*state.borrow(), CoordinatorState::AwaitingPublish);
        assert!(slot.is_empty());

        exchange.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_delivery_is_ignored_and_wait_continues() {
        let (engine, mut coordinator, slot) = visit(ExitConfig::default()).await;
        // A blank value stored under the key is delivered and must not
        // terminate the wait; with nothing else stored the exchange times out.
        engine.seed_storage(codec::RESULTS_STORAGE_KEY, "   ");

        let disposition = coordinator
            .handle_exit_signal()
            .await
            .expect("exchange completes");
        assert_eq!(disposition, ExitDisposition::TimedOut);
        assert_eq!(slot.take(), Some(Vec::new()));
    }
}
