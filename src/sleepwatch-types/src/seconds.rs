//! Serializes a `TimeDelta` as whole seconds.

use chrono::TimeDelta;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(value.num_seconds())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<TimeDelta, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = i64::deserialize(deserializer)?;
    TimeDelta::try_seconds(seconds)
        .ok_or_else(|| serde::de::Error::custom("duration out of range"))
}
