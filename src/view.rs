use serde::Serialize;

/// How the caller drives the window: rolling live view or retrospective
/// clinic review. The mode is caller policy; the controller only gates
/// which mutations apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Live,
    Clinic,
}

/// Rolling span shown in live mode.
pub const LIVE_SPAN_SECS: f64 = 5.0;
/// Clinic window width before any zooming.
pub const DEFAULT_WINDOW_SECS: f64 = 60.0;
/// Shortest window a zoom-in can reach.
pub const MIN_WINDOW_SECS: f64 = 1.0;
/// Retrospective spans selectable in clinic mode.
pub const CLINIC_SPANS_SECS: [f64; 6] = [30.0, 60.0, 600.0, 900.0, 1800.0, 3600.0];

/// Visible sub-window over the retained buffer.
///
/// Invariants, maintained by clamping: `MIN_WINDOW_SECS <= window_secs <=
/// total_secs` and `0 <= start_secs <= total_secs - window_secs`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ViewWindow {
    total_secs: f64,
    window_secs: f64,
    start_secs: f64,
}

impl ViewWindow {
    pub(crate) fn new(total_secs: f64, window_secs: f64) -> Self {
        let total = total_secs.max(MIN_WINDOW_SECS);
        Self {
            total_secs: total,
            window_secs: window_secs.clamp(MIN_WINDOW_SECS, total),
            start_secs: 0.0,
        }
    }

    pub fn total_secs(&self) -> f64 {
        self.total_secs
    }

    pub fn window_secs(&self) -> f64 {
        self.window_secs
    }

    pub fn start_secs(&self) -> f64 {
        self.start_secs
    }

    /// Upper bound for `start_secs` at the current zoom.
    pub fn max_start_secs(&self) -> f64 {
        (self.total_secs - self.window_secs).max(0.0)
    }

    pub(crate) fn set_total(&mut self, secs: f64) {
        self.total_secs = secs.max(MIN_WINDOW_SECS);
        self.window_secs = self.window_secs.min(self.total_secs);
        self.start_secs = 0.0;
    }

    pub(crate) fn pin_full(&mut self) {
        self.window_secs = self.total_secs;
        self.start_secs = 0.0;
    }

    pub(crate) fn zoom_in(&mut self) {
        self.window_secs = (self.window_secs / 2.0).max(MIN_WINDOW_SECS);
        self.clamp_start();
    }

    pub(crate) fn zoom_out(&mut self) {
        self.window_secs = (self.window_secs * 2.0).min(self.total_secs);
        self.clamp_start();
    }

    pub(crate) fn scroll_to(&mut self, start_secs: f64) {
        self.start_secs = start_secs.clamp(0.0, self.max_start_secs());
    }

    fn clamp_start(&mut self) {
        self.start_secs = self.start_secs.min(self.max_start_secs());
    }
}
