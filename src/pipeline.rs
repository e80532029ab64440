use crate::bands::BandPower;
use crate::error::EngineError;
use crate::source::{Sample, SampleBatch, SampleSource};
use crate::spectral::SpectralEstimator;
use crate::view::{ViewMode, ViewWindow};
use crate::window::WindowController;

/// Display-ready result of one recomputation: the clipped time-domain slice
/// plus its band-power table.
#[derive(Clone, Debug)]
pub struct AnalysisFrame {
    pub view: ViewWindow,
    pub samples: Vec<Sample>,
    pub band_powers: Vec<BandPower>,
}

/// High level pipeline tying a sample source, the window controller and the
/// estimator together.
///
/// The retained batch is swapped wholesale on every successful fetch, with
/// no merging and no out-of-order rejection, so a failed or cancelled fetch
/// leaves the last-known-good buffer and view untouched. Derived output is
/// never cached: every mutation path ends in [`Self::recompute`].
pub struct AnalysisPipeline<S: SampleSource> {
    source: S,
    estimator: SpectralEstimator,
    controller: WindowController,
    batch: Option<SampleBatch>,
}

impl<S: SampleSource> AnalysisPipeline<S> {
    pub fn new(source: S, controller: WindowController, estimator: SpectralEstimator) -> Self {
        Self {
            source,
            estimator,
            controller,
            batch: None,
        }
    }

    pub fn controller(&self) -> &WindowController {
        &self.controller
    }

    pub fn view(&self) -> ViewWindow {
        self.controller.view()
    }

    pub fn mode(&self) -> ViewMode {
        self.controller.mode()
    }

    /// Polls the source once. `Ok(None)` means no new data this cycle; the
    /// retained buffer stays authoritative.
    pub fn refresh(&mut self) -> Result<Option<AnalysisFrame>, EngineError> {
        let Some(mut batch) = self.source.fetch(self.controller.fetch_limit())? else {
            return Ok(None);
        };
        batch.validate()?;
        let expected = self.controller.fs_hz();
        if batch.sample_rate_hz != expected {
            return Err(EngineError::SampleRateMismatch {
                expected,
                actual: batch.sample_rate_hz,
            });
        }
        batch.normalize();
        log::debug!(
            "installed batch of {} samples ({:.1}s)",
            batch.samples.len(),
            batch.duration_seconds()
        );
        self.batch = Some(batch);
        self.recompute().map(Some)
    }

    /// Selects a new retrospective span and re-fetches the backing buffer.
    pub fn set_total_duration(&mut self, secs: f64) -> Result<Option<AnalysisFrame>, EngineError> {
        self.controller.set_total_duration(secs);
        self.refresh()
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.controller.set_mode(mode);
    }

    /// Zooms in and recomputes. No re-fetch: the span is unchanged.
    pub fn zoom_in(&mut self) -> Result<AnalysisFrame, EngineError> {
        self.controller.zoom_in();
        self.recompute()
    }

    pub fn zoom_out(&mut self) -> Result<AnalysisFrame, EngineError> {
        self.controller.zoom_out();
        self.recompute()
    }

    pub fn scroll_to(&mut self, start_secs: f64) -> Result<AnalysisFrame, EngineError> {
        self.controller.scroll_to(start_secs);
        self.recompute()
    }

    /// Recomputes the visible slice and its band powers from current state.
    pub fn recompute(&self) -> Result<AnalysisFrame, EngineError> {
        let batch = self.batch.as_ref().ok_or(EngineError::BufferUninitialized)?;
        let visible = self.controller.visible_slice(&batch.samples);
        let values: Vec<f64> = visible.iter().map(|s| s.value_uv).collect();
        let band_powers = self.estimator.estimate(&values, batch.sample_rate_hz);
        Ok(AnalysisFrame {
            view: self.controller.view(),
            samples: visible.to_vec(),
            band_powers,
        })
    }
}
