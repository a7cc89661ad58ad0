/// Signals observed over one session.
///
/// `snoring` and `movement` are accumulated by the signal aggregator and stay
/// within `[0, 1]`. The environmental readings are optional; an absent reading
/// is left out of scoring and recommendations rather than treated as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityFactors {
    pub snoring: f64,
    pub movement: f64,
    /// Celsius
    pub room_temperature: Option<f64>,
    /// Decibels
    pub room_noise: Option<f64>,
    pub room_light: Option<f64>,
    /// Beats per minute
    pub heart_rate: Option<f64>,
    /// Breaths per minute
    pub respiratory_rate: Option<f64>,
}

/// Partial update of the optional factors. `None` fields keep the stored value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentReading {
    #[serde(default)]
    pub room_temperature: Option<f64>,
    #[serde(default)]
    pub room_noise: Option<f64>,
    #[serde(default)]
    pub room_light: Option<f64>,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub respiratory_rate: Option<f64>,
}

impl QualityFactors {
    pub fn apply(&mut self, reading: EnvironmentReading) {
        fn merge(slot: &mut Option<f64>, value: Option<f64>) {
            if let Some(value) = value.filter(|v| v.is_finite()) {
                *slot = Some(value);
            }
        }

        merge(&mut self.room_temperature, reading.room_temperature);
        merge(&mut self.room_noise, reading.room_noise);
        merge(&mut self.room_light, reading.room_light);
        merge(&mut self.heart_rate, reading.heart_rate);
        merge(&mut self.respiratory_rate, reading.respiratory_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_keeps_absent_fields() {
        let mut factors = QualityFactors {
            room_temperature: Some(19.0),
            ..Default::default()
        };
        factors.apply(EnvironmentReading {
            heart_rate: Some(58.0),
            ..Default::default()
        });

        assert_eq!(factors.room_temperature, Some(19.0));
        assert_eq!(factors.heart_rate, Some(58.0));
        assert_eq!(factors.room_noise, None);
    }

    #[test]
    fn apply_ignores_non_finite_values() {
        let mut factors = QualityFactors::default();
        factors.apply(EnvironmentReading {
            room_temperature: Some(f64::NAN),
            room_light: Some(f64::INFINITY),
            ..Default::default()
        });

        assert_eq!(factors.room_temperature, None);
        assert_eq!(factors.room_light, None);
    }

    #[test]
    fn reading_deserializes_with_missing_fields() {
        let reading: EnvironmentReading =
            serde_json::from_str(r#"{"room_temperature": 21.5}"#).unwrap();
        assert_eq!(reading.room_temperature, Some(21.5));
        assert_eq!(reading.respiratory_rate, None);
    }
}
