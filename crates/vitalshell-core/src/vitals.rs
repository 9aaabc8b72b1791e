//! Inbound measurement results pulled out of the embedded content.
//!
//! These types mirror the JSON the measurement application writes into its
//! own storage. Every field is required: a record missing any field fails to
//! decode as a whole unit, so the host never sees partial measurements.
//! Unknown extra fields are tolerated so the remote application can add
//! metrics without breaking older hosts.

use serde::{Deserialize, Serialize};

/// One completed measurement, as stored by the embedded application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsResult {
    /// Measurement time, epoch milliseconds
    pub timestamp: i64,
    /// The measured values
    pub result: ResultData,
}

/// The measured values of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultData {
    pub basic_vitals: BasicVitals,
    pub glucose: GlucoseRange,
    /// Overall risk classification as the integer code the application defines
    pub risk_level: i32,
}

/// Core vital signs of one measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicVitals {
    /// Blood oxygen saturation, percent
    pub blood_oxygen: i32,
    /// Heart rate, beats per minute
    pub heart_rate: i32,
    /// Respiration rate, breaths per minute
    pub respiration_rate: i32,
    /// Core body temperature, degrees Celsius
    pub core_body_temperature: f64,
    /// Systolic blood pressure, mmHg
    pub systolic_blood_pressure: i32,
    /// Diastolic blood pressure, mmHg
    pub diastolic_blood_pressure: i32,
    /// Pulse pressure, mmHg
    pub pulse_pressure: f64,
    /// Stress index
    pub stress: i32,
    /// Reflection index
    pub reflection_index: i32,
    /// Large artery stiffness index
    pub lasi: i32,
    /// Heart rate variability
    pub hrv: i32,
}

/// Estimated glucose range of one measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlucoseRange {
    /// Lower bound, mg/dL
    pub glucose_min: i32,
    /// Upper bound, mg/dL
    pub glucose_max: i32,
}

/// An ordered list of measurements, in the order the embedded application
/// serialized them. The host never re-sorts, filters, or deduplicates it.
pub type VitalsResultList = Vec<VitalsResult>;
