use std::collections::VecDeque;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::EngineError;

/// One acquired sample as the dashboard backend reports it.
///
/// Deserializes straight from the wire record `{ id, timestamp, value_uv }`.
/// `sequence_id` is display/dedup metadata only; the math never reads it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(rename = "id")]
    pub sequence_id: u64,
    #[serde(deserialize_with = "timestamp_from_wire")]
    pub timestamp: DateTime<Utc>,
    pub value_uv: f64,
}

impl Sample {
    pub fn new(sequence_id: u64, timestamp: DateTime<Utc>, value_uv: f64) -> Self {
        Self {
            sequence_id,
            timestamp,
            value_uv,
        }
    }
}

/// Wire timestamps arrive either as epoch milliseconds or as ISO-8601 text.
fn timestamp_from_wire<'de, D>(de: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        EpochMillis(i64),
        Text(String),
    }
    match Wire::deserialize(de)? {
        Wire::EpochMillis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| serde::de::Error::custom(format!("epoch millis out of range: {ms}"))),
        Wire::Text(text) => text
            .parse::<DateTime<Utc>>()
            .map_err(serde::de::Error::custom),
    }
}

/// Whole-buffer fetch result, replaced wholesale every cycle and never
/// merged.
///
/// Samples are assumed uniformly spaced at `sample_rate_hz`; dropped or
/// irregular samples are not detected here and skew the frequency axis.
/// Known limitation inherited from the acquisition side: correcting for it
/// would change every downstream power value, so it stays uncorrected.
#[derive(Clone, Debug)]
pub struct SampleBatch {
    pub sample_rate_hz: f64,
    pub samples: Vec<Sample>,
}

impl SampleBatch {
    pub fn new(sample_rate_hz: f64, samples: Vec<Sample>) -> Self {
        Self {
            sample_rate_hz,
            samples,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.sample_rate_hz > 0.0) {
            return Err(EngineError::InvalidSampleRate);
        }
        if self.samples.is_empty() {
            return Err(EngineError::EmptyBatch);
        }
        Ok(())
    }

    /// Reorders newest-first payloads to oldest-first and drops repeated
    /// `sequence_id` runs. All windowing assumes the normalized order.
    pub fn normalize(&mut self) {
        if let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) {
            if first.timestamp > last.timestamp {
                self.samples.reverse();
            }
        }
        self.samples.dedup_by_key(|s| s.sequence_id);
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz
    }
}

/// Something that can produce a fresh buffer on demand.
///
/// `limit` is the desired sample count (`span_secs * fs`); the
/// implementation owns the actual I/O and may return `Ok(None)` when no new
/// data is available this cycle.
pub trait SampleSource {
    fn fetch(&mut self, limit: usize) -> Result<Option<SampleBatch>, EngineError>;
}

/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<SampleBatch>,
}

impl ManualSource {
    pub fn new(batches: impl IntoIterator<Item = SampleBatch>) -> Self {
        Self {
            queue: batches.into_iter().collect(),
        }
    }
}

impl SampleSource for ManualSource {
    fn fetch(&mut self, _limit: usize) -> Result<Option<SampleBatch>, EngineError> {
        Ok(self.queue.pop_front())
    }
}
