//! Headless walkthrough of the engine against a simulated EEG feed: a few
//! live poll cycles, then a clinic span with zooming and scrolling. Band
//! tables are printed as JSON, the way the dashboard consumes them.

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

use neuroscope::{
    AnalysisFrame, AnalysisPipeline, EngineError, Sample, SampleBatch, SampleSource,
    SpectralEstimator, ViewMode, WindowController, CLINIC_SPANS_SECS,
};

const SAMPLE_RATE_HZ: f64 = 250.0;
const POLL_SECS: f64 = 5.0;

/// Alpha-dominant synthetic EEG: 10 Hz carrier plus seeded noise.
struct SignalGen {
    freq_hz: f64,
    amp_uv: f64,
    noise_uv: f64,
    rng: StdRng,
}

impl SignalGen {
    fn sample(&mut self, t: f64) -> f64 {
        let base = (2.0 * std::f64::consts::PI * self.freq_hz * t).sin() * self.amp_uv;
        base + self.rng.gen_range(-self.noise_uv..self.noise_uv)
    }
}

/// Grows a synthetic record on every poll and serves the most recent
/// `limit` samples newest-first, like the dashboard backend does.
struct SimulatedSource {
    gen: SignalGen,
    history: Vec<Sample>,
    started_at: DateTime<Utc>,
}

impl SimulatedSource {
    fn new(seed: u64) -> Self {
        Self {
            gen: SignalGen {
                freq_hz: 10.0,
                amp_uv: 40.0,
                noise_uv: 8.0,
                rng: StdRng::seed_from_u64(seed),
            },
            history: Vec::new(),
            started_at: Utc
                .timestamp_millis_opt(1_700_000_000_000)
                .single()
                .expect("fixed epoch is valid"),
        }
    }

    fn advance(&mut self, seconds: f64) {
        let count = (seconds * SAMPLE_RATE_HZ) as usize;
        for _ in 0..count {
            let idx = self.history.len();
            let t = idx as f64 / SAMPLE_RATE_HZ;
            let timestamp = self.started_at + Duration::milliseconds((t * 1000.0) as i64);
            self.history
                .push(Sample::new(idx as u64, timestamp, self.gen.sample(t)));
        }
    }
}

impl SampleSource for SimulatedSource {
    fn fetch(&mut self, limit: usize) -> Result<Option<SampleBatch>, EngineError> {
        self.advance(POLL_SECS);
        let tail_start = self.history.len().saturating_sub(limit);
        let mut recent: Vec<Sample> = self.history[tail_start..].to_vec();
        recent.reverse();
        Ok(Some(SampleBatch::new(SAMPLE_RATE_HZ, recent)))
    }
}

fn print_frame(label: &str, frame: &AnalysisFrame) -> Result<()> {
    let view = frame.view;
    println!(
        "{label}: window {:.0}s at {:.0}s of {:.0}s, {} samples",
        view.window_secs(),
        view.start_secs(),
        view.total_secs(),
        frame.samples.len()
    );
    println!("{}", serde_json::to_string_pretty(&frame.band_powers)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    // Display in µV²/Hz, the dashboard's unit convention.
    let estimator = SpectralEstimator::with_power_scale(1e6);
    let mut pipeline = AnalysisPipeline::new(
        SimulatedSource::new(7),
        WindowController::live(SAMPLE_RATE_HZ),
        estimator,
    );

    info!("live mode: three poll cycles over the rolling span");
    for cycle in 1..=3 {
        if let Some(frame) = pipeline.refresh()? {
            print_frame(&format!("live cycle {cycle}"), &frame)?;
        }
    }

    info!("clinic mode: shortest catalog span");
    pipeline.set_mode(ViewMode::Clinic);
    if let Some(frame) = pipeline.set_total_duration(CLINIC_SPANS_SECS[0])? {
        print_frame("clinic span", &frame)?;
    }

    let frame = pipeline.zoom_in()?;
    print_frame("zoomed", &frame)?;
    let frame = pipeline.scroll_to(10.0)?;
    print_frame("scrolled", &frame)?;
    let frame = pipeline.zoom_out()?;
    print_frame("zoomed back out", &frame)?;

    Ok(())
}
