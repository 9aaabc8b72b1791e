//! Canonical wire fixtures.

use vitalshell_core::{BasicVitals, GlucoseRange, ResultData, VitalsResult, VitalsResultList};

/// One stored measurement, exactly as the embedded application serializes it.
pub const SAMPLE_RESULTS_JSON: &str = r#"[{"timestamp":1700000000000,"result":{"basicVitals":{"bloodOxygen":98,"heartRate":72,"respirationRate":16,"coreBodyTemperature":36.6,"systolicBloodPressure":120,"diastolicBloodPressure":80,"pulsePressure":40.0,"stress":2,"reflectionIndex":3,"lasi":5,"hrv":55},"glucose":{"glucoseMin":80,"glucoseMax":110},"riskLevel":1}}]"#;

/// The typed form of [`SAMPLE_RESULTS_JSON`]'s single record.
pub fn sample_vitals_result() -> VitalsResult {
    VitalsResult {
        timestamp: 1_700_000_000_000,
        result: ResultData {
            basic_vitals: BasicVitals {
                blood_oxygen: 98,
                heart_rate: 72,
                respiration_rate: 16,
                core_body_temperature: 36.6,
                systolic_blood_pressure: 120,
                diastolic_blood_pressure: 80,
                pulse_pressure: 40.0,
                stress: 2,
                reflection_index: 3,
                lasi: 5,
                hrv: 55,
            },
            glucose: GlucoseRange {
                glucose_min: 80,
                glucose_max: 110,
            },
            risk_level: 1,
        },
    }
}

/// The typed form of [`SAMPLE_RESULTS_JSON`].
pub fn sample_results_list() -> VitalsResultList {
    vec![sample_vitals_result()]
}
