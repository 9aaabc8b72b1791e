//! Outbound user profile seeded into the embedded content's storage.

use serde::{Deserialize, Serialize};

/// The user profile the embedded measurement application reads at startup.
///
/// Constructed once per embedded-content instance and never mutated. The
/// host writes it into the content's persistent storage under the
/// [`codec::PROFILE_STORAGE_KEY`](crate::codec::PROFILE_STORAGE_KEY) key and
/// never reads it back.
///
/// Field names serialize in the camelCase form the embedded application
/// expects (`restHeartRate`, not `rest_heart_rate`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Height in meters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Age in years
    pub age: u32,
    /// Gender as the integer code the measurement application defines
    pub gender: u32,
    /// Resting heart rate in beats per minute
    pub rest_heart_rate: u32,
}

impl Default for UserProfile {
    /// The fixed profile of this deployment.
    fn default() -> Self {
        Self {
            height: 1.8,
            weight: 75.0,
            age: 41,
            gender: 1,
            rest_heart_rate: 72,
        }
    }
}
