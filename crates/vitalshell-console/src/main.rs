//! vitalshell console - end-to-end dry run of the vitals bridge.
//!
//! Wires the capability gate, the embedded-content host, and the exit
//! coordinator against the in-memory engine, then renders whatever landed in
//! the handoff slot as text cards. Useful for exercising the whole exchange
//! without a webview or a camera.

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vitalshell_core::codec;
use vitalshell_core::effects::{Capability, CapabilityEffects};
use vitalshell_core::UserProfile;
use vitalshell_effects::{
    FallbackCapabilityHandler, MemoryWebContent, PreauthorizedCapabilityHandler,
};
use vitalshell_host::{
    CapabilityGate, EmbeddedContentHost, ExitConfig, ExitCoordinator, HandoffSlot, HostConfig,
};

mod render;

/// Demo payload seeded when no --seed file is given: two measurements, as
/// the embedded application would have stored them.
const DEMO_RESULTS_JSON: &str = r#"[
  {"timestamp":1700000000000,"result":{"basicVitals":{"bloodOxygen":98,"heartRate":72,"respirationRate":16,"coreBodyTemperature":36.6,"systolicBloodPressure":120,"diastolicBloodPressure":80,"pulsePressure":40.0,"stress":2,"reflectionIndex":3,"lasi":5,"hrv":55},"glucose":{"glucoseMin":80,"glucoseMax":110},"riskLevel":1}},
  {"timestamp":1700000600000,"result":{"basicVitals":{"bloodOxygen":97,"heartRate":76,"respirationRate":17,"coreBodyTemperature":36.7,"systolicBloodPressure":124,"diastolicBloodPressure":82,"pulsePressure":42.0,"stress":3,"reflectionIndex":3,"lasi":6,"hrv":48},"glucose":{"glucoseMin":85,"glucoseMax":112},"riskLevel":1}}
]"#;

#[derive(Debug, Parser)]
#[command(name = "vitalshell", about = "Dry-run the vitals bridge against the in-memory engine")]
struct Options {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file seeded into the simulated results storage
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Deny the camera capability to exercise the gated path
    #[arg(long)]
    deny_camera: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ConsoleConfig {
    /// Override for the measurement application URL
    target_url: Option<String>,
    /// Bound on the publish wait, in seconds; 0 disables the bound
    publish_timeout_secs: Option<u64>,
    profile: Option<ProfileOverrides>,
}

#[derive(Debug, Default, Deserialize)]
struct ProfileOverrides {
    height: Option<f64>,
    weight: Option<f64>,
    age: Option<u32>,
    gender: Option<u32>,
    rest_heart_rate: Option<u32>,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ConsoleConfig> {
    let Some(path) = path else {
        return Ok(ConsoleConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
}

fn build_profile(overrides: Option<ProfileOverrides>) -> UserProfile {
    let overrides = overrides.unwrap_or_default();
    let base = UserProfile::default();
    UserProfile {
        height: overrides.height.unwrap_or(base.height),
        weight: overrides.weight.unwrap_or(base.weight),
        age: overrides.age.unwrap_or(base.age),
        gender: overrides.gender.unwrap_or(base.gender),
        rest_heart_rate: overrides.rest_heart_rate.unwrap_or(base.rest_heart_rate),
    }
}

fn exit_config(config: &ConsoleConfig) -> ExitConfig {
    match config.publish_timeout_secs {
        Some(0) => ExitConfig {
            publish_timeout: None,
        },
        Some(secs) => ExitConfig {
            publish_timeout: Some(Duration::from_secs(secs)),
        },
        None => ExitConfig::default(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = Options::parse();
    let config = load_config(options.config.as_deref())?;

    let handler: Arc<dyn CapabilityEffects> = if options.deny_camera {
        Arc::new(FallbackCapabilityHandler::new())
    } else {
        Arc::new(PreauthorizedCapabilityHandler::with_camera())
    };
    let mut gate = CapabilityGate::new(Capability::Camera, handler);
    if gate.resolve().await.is_err() {
        // Transient notice; the visit ends with no content constructed.
        println!("The camera is unavailable");
        return Ok(());
    }

    let (engine, events) = MemoryWebContent::new();
    let seed = match &options.seed {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?,
        None => DEMO_RESULTS_JSON.to_string(),
    };
    engine.seed_storage(codec::RESULTS_STORAGE_KEY, seed);

    let exit_config = exit_config(&config);
    let mut host_config = HostConfig::default();
    if let Some(url) = config.target_url.clone() {
        host_config.target_url = url;
    }
    let host = EmbeddedContentHost::initialize(
        host_config,
        build_profile(config.profile),
        Arc::new(engine.clone()),
        events,
    )
    .await?;

    let slot = HandoffSlot::new();
    let mut coordinator = ExitCoordinator::new(Arc::new(host), slot.clone(), exit_config)?;

    // The user finishes measuring and backs out of the screen.
    let disposition = coordinator.handle_exit_signal().await?;
    tracing::info!(?disposition, "exit signal handled");

    let results = slot.take().unwrap_or_default();
    if results.is_empty() {
        println!("There is no data yet");
    } else {
        for result in &results {
            println!("{}", render::card(result));
        }
    }
    Ok(())
}
