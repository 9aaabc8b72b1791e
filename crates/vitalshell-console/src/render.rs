//! Text cards for decoded measurements.

use std::fmt::Write as _;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use vitalshell_core::VitalsResult;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[day].[month].[year] [hour]:[minute]:[second]");

fn format_timestamp(epoch_ms: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(epoch_ms) * 1_000_000)
        .ok()
        .and_then(|t| t.format(TIMESTAMP_FORMAT).ok())
        .unwrap_or_else(|| epoch_ms.to_string())
}

/// Render one measurement the way the results screen lays it out.
pub fn card(result: &VitalsResult) -> String {
    let vitals = &result.result.basic_vitals;
    let glucose = &result.result.glucose;

    let mut card = String::new();
    let _ = writeln!(card, "Measurement time: {}", format_timestamp(result.timestamp));
    let _ = writeln!(card, "  Heart rate: {} bpm", vitals.heart_rate);
    let _ = writeln!(
        card,
        "  Respiration rate: {} breaths/min",
        vitals.respiration_rate
    );
    let _ = writeln!(card, "  Blood oxygen: {}%", vitals.blood_oxygen);
    let _ = writeln!(card, "  Temperature: {:.1}°C", vitals.core_body_temperature);
    let _ = writeln!(
        card,
        "  Blood pressure: {} / {} mmHg",
        vitals.systolic_blood_pressure, vitals.diastolic_blood_pressure
    );
    let _ = writeln!(card, "  Pulse pressure: {:.1} mmHg", vitals.pulse_pressure);
    let _ = writeln!(card, "  Stress level: {}", vitals.stress);
    let _ = writeln!(card, "  HRV: {}", vitals.hrv);
    let _ = writeln!(card, "  Reflection Index: {}", vitals.reflection_index);
    let _ = writeln!(card, "  LASI: {}", vitals.lasi);
    let _ = writeln!(
        card,
        "  Glucose: {} - {} mg/dL",
        glucose.glucose_min, glucose.glucose_max
    );
    let _ = write!(card, "  Risk level: {}", result.result.risk_level);
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalshell_testkit::sample_vitals_result;

    #[test]
    fn test_card_lays_out_every_metric() {
        let card = card(&sample_vitals_result());
        assert!(card.starts_with("Measurement time: 14.11.2023"));
        assert!(card.contains("Heart rate: 72 bpm"));
        assert!(card.contains("Temperature: 36.6°C"));
        assert!(card.contains("Blood pressure: 120 / 80 mmHg"));
        assert!(card.contains("Glucose: 80 - 110 mg/dL"));
        assert!(card.ends_with("Risk level: 1"));
    }

    #[test]
    fn test_unrepresentable_timestamp_falls_back_to_raw_millis() {
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }
}
