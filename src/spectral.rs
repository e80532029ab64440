use rustfft::{num_complex::Complex64, FftPlanner};

use crate::bands::{BandPower, BAND_CATALOG};

/// Fewest samples that still yield a meaningful estimate. Fixed floor, not a tunable.
pub const MIN_SAMPLES: usize = 8;

/// Single-segment periodogram estimator reduced to per-band average power.
///
/// Stateless: each call plans its own transform, so identical input always
/// produces bit-identical output. Inputs are truncated to the largest power
/// of two, never zero-padded. The truncation is lossy: up to ~50% of the
/// trailing samples are discarded when the input length sits just above a
/// power of two.
#[derive(Clone, Copy, Debug)]
pub struct SpectralEstimator {
    power_scale: f64,
}

impl Default for SpectralEstimator {
    fn default() -> Self {
        Self { power_scale: 1.0 }
    }
}

impl SpectralEstimator {
    /// `power_scale` multiplies every bin power before band averaging.
    /// Callers displaying µV²/Hz from volt-denominated input pass `1e6`;
    /// the default of 1.0 leaves the raw periodogram units untouched.
    pub fn with_power_scale(power_scale: f64) -> Self {
        Self { power_scale }
    }

    pub fn power_scale(&self) -> f64 {
        self.power_scale
    }

    /// Estimates per-band average power of `samples` at rate `fs_hz`.
    ///
    /// Returns the five catalog bands in order, or an empty vec for inputs
    /// under [`MIN_SAMPLES`]. A band whose width is finer than the bin
    /// spacing reports 0.0 rather than NaN.
    pub fn estimate(&self, samples: &[f64], fs_hz: f64) -> Vec<BandPower> {
        if samples.len() < MIN_SAMPLES {
            return Vec::new();
        }
        let n = floor_pow2(samples.len());
        if n < samples.len() {
            log::trace!("truncating {} samples to transform length {}", samples.len(), n);
        }

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(n);
        let mut buffer: Vec<Complex64> = samples[..n]
            .iter()
            .map(|&v| Complex64::new(v, 0.0))
            .collect();
        fft.process(&mut buffer);

        // Raw periodogram over the non-negative bins: P_i = |X_i|^2 / (N * fs).
        let norm = n as f64 * fs_hz;
        let bin_hz = fs_hz / n as f64;
        let powers: Vec<f64> = buffer[..n / 2]
            .iter()
            .map(|c| self.power_scale * (c.re * c.re + c.im * c.im) / norm)
            .collect();

        BAND_CATALOG
            .iter()
            .map(|band| {
                let mut sum = 0.0;
                let mut hits = 0usize;
                for (i, &p) in powers.iter().enumerate() {
                    if band.contains(i as f64 * bin_hz) {
                        sum += p;
                        hits += 1;
                    }
                }
                BandPower {
                    band: *band,
                    power: sum / hits.max(1) as f64,
                }
            })
            .collect()
    }
}

/// Largest power of two `<= len`. Caller guarantees `len > 0`.
fn floor_pow2(len: usize) -> usize {
    1 << (usize::BITS - 1 - len.leading_zeros())
}
