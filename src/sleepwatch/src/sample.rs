use serde::{Deserialize, Serialize};
use sleepwatch_types::EnvironmentReading;

/// One reading pushed by a sensor collaborator.
///
/// Serialized as `{"kind": "motion", "magnitude": 0.4}`,
/// `{"kind": "audio", "decibels": 64.0}` or
/// `{"kind": "environment", "room_temperature": 21.0}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sample {
    Motion { magnitude: f64 },
    Audio { decibels: f64 },
    Environment(EnvironmentReading),
}

#[cfg(test)]
mod tests {
    use super::Sample;

    #[test]
    fn parses_tagged_lines() {
        let motion: Sample = serde_json::from_str(r#"{"kind":"motion","magnitude":0.4}"#).unwrap();
        assert_eq!(motion, Sample::Motion { magnitude: 0.4 });

        let env: Sample =
            serde_json::from_str(r#"{"kind":"environment","room_temperature":30.0}"#).unwrap();
        let Sample::Environment(reading) = env else {
            panic!("expected environment reading");
        };
        assert_eq!(reading.room_temperature, Some(30.0));
        assert_eq!(reading.heart_rate, None);
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(serde_json::from_str::<Sample>(r#"{"kind":"light","lux":3}"#).is_err());
    }
}
