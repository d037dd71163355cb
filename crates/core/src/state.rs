use serde::{Deserialize, Serialize};

/// A single sensor reading, in whole degrees.
pub type Sample = i32;

/// A point-in-time copy of the rolling store.
///
/// All four fields are taken under one lock acquisition, so `current` always
/// agrees with the last element of `history` when the history is non-empty.
/// Before the first sample every field is zero and `history` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Most recently recorded sample.
    #[serde(rename = "currentTemp")]
    pub current: Sample,
    /// Running minimum, updated on insertion only (see
    /// [`RollingTemperatureStore`]).
    ///
    /// [`RollingTemperatureStore`]: crate::store::RollingTemperatureStore
    #[serde(rename = "minTemp")]
    pub minimum: Sample,
    /// Running maximum, updated on insertion only.
    #[serde(rename = "maxTemp")]
    pub maximum: Sample,
    /// Retained window, oldest first.
    #[serde(rename = "temperatures")]
    pub history: Vec<Sample>,
}
