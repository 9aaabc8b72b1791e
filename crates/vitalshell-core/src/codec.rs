//! Injected-script payload codec.
//!
//! Both halves of the host/embedded-content protocol live here: the script
//! that seeds the user profile into the content's storage, the script that
//! asks the content to publish its stored results over the bridge, and the
//! decoder for the payload that comes back.
//!
//! Script text is the wire format. The embedded application only ever sees
//! what these functions produce, so any change here is a protocol change.

use crate::{ShellError, UserProfile, VitalsResultList};

/// Storage key the embedded application reads the user profile from.
pub const PROFILE_STORAGE_KEY: &str = "userData";

/// Storage key the embedded application writes measurement results to.
pub const RESULTS_STORAGE_KEY: &str = "redoctor/vitals-results";

/// Render the profile-seeding statement executed once at content load.
///
/// The statement writes the profile under [`PROFILE_STORAGE_KEY`] in the
/// content's persistent storage. Profile serialization cannot fail (a plain
/// struct of numbers), so this function is infallible.
pub fn encode_profile(profile: &UserProfile) -> String {
    let json = serde_json::to_string(profile).unwrap_or_default();
    format!("localStorage.setItem(\"{PROFILE_STORAGE_KEY}\", JSON.stringify({json}));")
}

/// Render the publish-request script executed on the user's exit signal.
///
/// The script reads `storage_key` and, only if a non-empty value is stored,
/// invokes `sendData` on the named bridge object with the raw string. When
/// the key is absent the script completes without any observable effect, so
/// callers must not assume an inbound delivery follows.
pub fn publish_script(bridge_name: &str, storage_key: &str) -> String {
    format!(
        r#"(function() {{
    const data = localStorage.getItem("{storage_key}");
    if (data) {{
        {bridge_name}.sendData(data);
    }}
}})();"#
    )
}

/// Decode a raw bridge payload into a list of measurements.
///
/// Fails when `raw` is blank, is not valid JSON, or does not match the
/// measurement array shape. On success the list is returned verbatim: no
/// filtering, no sorting, no deduplication.
pub fn decode_results(raw: &str) -> Result<VitalsResultList, ShellError> {
    if raw.trim().is_empty() {
        return Err(ShellError::decode("blank results payload"));
    }
    serde_json::from_str::<VitalsResultList>(raw)
        .map_err(|err| ShellError::decode(format!("payload does not match the vitals schema: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_profile_statement_shape() {
        let script = encode_profile(&UserProfile::default());
        assert!(script.starts_with("localStorage.setItem(\"userData\", JSON.stringify({"));
        assert!(script.ends_with("}));"));
        assert!(script.contains("\"restHeartRate\":72"));
    }

    #[test]
    fn test_encode_profile_round_trips() {
        // The JSON object embedded in the statement must decode back into an
        // equal profile.
        let profile = UserProfile::default();
        let script = encode_profile(&profile);
        let start = script.find('{').expect("object literal present");
        let end = script.rfind('}').expect("object literal present");
        let back: UserProfile =
            serde_json::from_str(&script[start..=end]).expect("embedded JSON decodes");
        assert_eq!(profile, back);
    }

    #[test]
    fn test_publish_script_reads_configured_key() {
        let script = publish_script("VitalsBridge", RESULTS_STORAGE_KEY);
        assert!(script.contains("localStorage.getItem(\"redoctor/vitals-results\")"));
        assert!(script.contains("VitalsBridge.sendData(data)"));
    }

    #[test]
    fn test_decode_rejects_malformed_payloads() {
        for raw in ["", "   ", "null", "{}", "not json", "[{\"timestamp\":1}]"] {
            assert!(
                matches!(decode_results(raw), Err(ShellError::Decode { .. })),
                "payload {raw:?} must fail to decode"
            );
        }
    }

    #[test]
    fn test_decode_rejects_record_missing_risk_level() {
        let raw = r#"[{"timestamp":1700000000000,"result":{"basicVitals":{"bloodOxygen":98,"heartRate":72,"respirationRate":16,"coreBodyTemperature":36.6,"systolicBloodPressure":120,"diastolicBloodPressure":80,"pulsePressure":40.0,"stress":2,"reflectionIndex":3,"lasi":5,"hrv":55},"glucose":{"glucoseMin":80,"glucoseMax":110}}}]"#;
        assert!(matches!(decode_results(raw), Err(ShellError::Decode { .. })));
    }

    #[test]
    fn test_decode_empty_array_is_valid() {
        let list = decode_results("[]").expect("empty array decodes");
        assert!(list.is_empty());
    }

    #[test]
    fn test_decode_preserves_order() {
        let raw = r#"[
            {"timestamp":2,"result":{"basicVitals":{"bloodOxygen":97,"heartRate":70,"respirationRate":15,"coreBodyTemperature":36.5,"systolicBloodPressure":118,"diastolicBloodPressure":79,"pulsePressure":39.0,"stress":1,"reflectionIndex":2,"lasi":4,"hrv":60},"glucose":{"glucoseMin":82,"glucoseMax":105},"riskLevel":0}},
            {"timestamp":1,"result":{"basicVitals":{"bloodOxygen":98,"heartRate":72,"respirationRate":16,"coreBodyTemperature":36.6,"systolicBloodPressure":120,"diastolicBloodPressure":80,"pulsePressure":40.0,"stress":2,"reflectionIndex":3,"lasi":5,"hrv":55},"glucose":{"glucoseMin":80,"glucoseMax":110},"riskLevel":1}}
        ]"#;
        let list = decode_results(raw).expect("two-record payload decodes");
        // Not re-sorted: the out-of-order timestamps stay as serialized.
        assert_eq!(list[0].timestamp, 2);
        assert_eq!(list[1].timestamp, 1);
    }

    proptest! {
        // Total over arbitrary input: Ok or Decode error, never a panic.
        #[test]
        fn prop_decode_is_total(raw in ".{0,256}") {
            match decode_results(&raw) {
                Ok(_) => {}
                Err(ShellError::Decode { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error variant: {other:?}"),
            }
        }
    }
}
