//! Core engine for a polling EEG dashboard: a pure periodogram band-power
//! estimator plus a scrollable/zoomable window controller over a retained
//! sample buffer. Transport, scheduling and rendering stay with the caller.

pub mod bands;
pub mod error;
pub mod pipeline;
pub mod source;
pub mod spectral;
pub mod view;
pub mod window;

pub use bands::{BandPower, FrequencyBand, BAND_CATALOG};
pub use error::EngineError;
pub use pipeline::{AnalysisFrame, AnalysisPipeline};
pub use source::{ManualSource, Sample, SampleBatch, SampleSource};
pub use spectral::{SpectralEstimator, MIN_SAMPLES};
pub use view::{ViewMode, ViewWindow, CLINIC_SPANS_SECS, DEFAULT_WINDOW_SECS, LIVE_SPAN_SECS};
pub use window::WindowController;
