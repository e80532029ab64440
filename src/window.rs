use crate::source::Sample;
use crate::view::{ViewMode, ViewWindow, DEFAULT_WINDOW_SECS};

/// Scroll/zoom bookkeeping over a retained sample buffer.
///
/// The buffer itself stays with the caller; the controller only borrows
/// read-only slices. Not thread-safe: one logical owner, and callers
/// serialize access if they must share it.
#[derive(Clone, Debug)]
pub struct WindowController {
    mode: ViewMode,
    fs_hz: f64,
    view: ViewWindow,
}

impl WindowController {
    pub fn new(mode: ViewMode, fs_hz: f64, total_secs: f64) -> Self {
        let window_secs = match mode {
            ViewMode::Live => total_secs,
            ViewMode::Clinic => DEFAULT_WINDOW_SECS,
        };
        Self {
            mode,
            fs_hz,
            view: ViewWindow::new(total_secs, window_secs),
        }
    }

    /// Live controller over the default rolling span.
    pub fn live(fs_hz: f64) -> Self {
        Self::new(ViewMode::Live, fs_hz, crate::view::LIVE_SPAN_SECS)
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn fs_hz(&self) -> f64 {
        self.fs_hz
    }

    pub fn view(&self) -> ViewWindow {
        self.view
    }

    /// Sample count the source should be asked for to cover the full span.
    pub fn fetch_limit(&self) -> usize {
        ((self.view.total_secs() * self.fs_hz).ceil() as usize).max(1)
    }

    /// Switching to live pins the window back onto the whole span.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        if mode == ViewMode::Live {
            self.view.pin_full();
        }
    }

    /// Selects a new retrospective span. The window is clamped into the new
    /// span immediately and the scroll position restarts at zero. The caller
    /// must re-fetch the backing buffer afterwards (see
    /// [`Self::fetch_limit`]).
    pub fn set_total_duration(&mut self, secs: f64) {
        self.view.set_total(secs);
        if self.mode == ViewMode::Live {
            self.view.pin_full();
        }
        log::debug!(
            "total span set to {:.1}s, window {:.1}s",
            self.view.total_secs(),
            self.view.window_secs()
        );
    }

    /// Halves the window, never below the 1 s floor. Clinic only.
    pub fn zoom_in(&mut self) {
        if self.mode == ViewMode::Live {
            log::debug!("zoom_in ignored in live mode");
            return;
        }
        self.view.zoom_in();
    }

    /// Doubles the window, never beyond the current span. Clinic only.
    pub fn zoom_out(&mut self) {
        if self.mode == ViewMode::Live {
            log::debug!("zoom_out ignored in live mode");
            return;
        }
        self.view.zoom_out();
    }

    /// Moves the window start, silently clamped into range. Clinic only.
    pub fn scroll_to(&mut self, start_secs: f64) {
        if self.mode == ViewMode::Live {
            log::debug!("scroll_to ignored in live mode");
            return;
        }
        self.view.scroll_to(start_secs);
    }

    /// Clips an oldest-first buffer to the visible window.
    ///
    /// Index range is `[floor(start * fs), floor((start + window) * fs))`,
    /// bounds-clamped, so a buffer shorter than the span yields whatever it
    /// has.
    pub fn visible_slice<'a>(&self, samples: &'a [Sample]) -> &'a [Sample] {
        let start = (self.view.start_secs() * self.fs_hz).floor() as usize;
        let end = ((self.view.start_secs() + self.view.window_secs()) * self.fs_hz).floor() as usize;
        let start = start.min(samples.len());
        let end = end.clamp(start, samples.len());
        &samples[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MIN_WINDOW_SECS;
    use chrono::{Duration, TimeZone, Utc};

    const FS: f64 = 250.0;

    fn buffer(seconds: f64) -> Vec<Sample> {
        let base = Utc.timestamp_millis_opt(1_700_000_000_000).single().unwrap();
        let count = (seconds * FS) as usize;
        (0..count)
            .map(|i| {
                Sample::new(
                    i as u64,
                    base + Duration::milliseconds(i as i64 * 4),
                    (i as f64 * 0.1).sin(),
                )
            })
            .collect()
    }

    fn clinic(total_secs: f64) -> WindowController {
        WindowController::new(ViewMode::Clinic, FS, total_secs)
    }

    #[test]
    fn zoom_in_then_out_restores_the_window() {
        let mut ctl = clinic(600.0);
        let before = ctl.view().window_secs();
        ctl.zoom_in();
        ctl.zoom_out();
        assert_eq!(ctl.view().window_secs(), before);
    }

    #[test]
    fn zoom_never_leaves_bounds() {
        let mut ctl = clinic(600.0);
        for _ in 0..20 {
            ctl.zoom_in();
        }
        assert_eq!(ctl.view().window_secs(), MIN_WINDOW_SECS);
        for _ in 0..20 {
            ctl.zoom_out();
        }
        assert_eq!(ctl.view().window_secs(), 600.0);
    }

    #[test]
    fn scroll_clamps_to_valid_range() {
        let mut ctl = clinic(600.0);
        ctl.scroll_to(1e6);
        assert_eq!(ctl.view().start_secs(), 540.0);
        ctl.scroll_to(-3.0);
        assert_eq!(ctl.view().start_secs(), 0.0);
        ctl.scroll_to(123.0);
        assert_eq!(ctl.view().start_secs(), 123.0);
    }

    #[test]
    fn shrinking_the_span_clamps_the_next_slice() {
        // Regression: 60 s window, then a 30 s span selection. The very next
        // slice must not exceed 30 s of samples.
        let mut ctl = clinic(600.0);
        assert_eq!(ctl.view().window_secs(), 60.0);
        ctl.set_total_duration(30.0);
        let buf = buffer(30.0);
        let slice = ctl.visible_slice(&buf);
        assert!(slice.len() as f64 <= 30.0 * FS);
        assert_eq!(slice.len(), buf.len());
    }

    #[test]
    fn visible_slice_indexes_by_window_position() {
        let mut ctl = clinic(60.0);
        ctl.set_total_duration(60.0);
        ctl.zoom_in();
        ctl.zoom_in();
        // 15 s window starting at 10 s.
        ctl.scroll_to(10.0);
        let buf = buffer(60.0);
        let slice = ctl.visible_slice(&buf);
        assert_eq!(slice.first().unwrap().sequence_id, 2500);
        assert_eq!(slice.len(), (15.0 * FS) as usize);
    }

    #[test]
    fn visible_slice_survives_short_buffers() {
        let ctl = clinic(600.0);
        let buf = buffer(2.0);
        assert_eq!(ctl.visible_slice(&buf).len(), buf.len());
        let empty: Vec<Sample> = Vec::new();
        assert!(ctl.visible_slice(&empty).is_empty());
    }

    #[test]
    fn live_mode_ignores_scroll_and_zoom() {
        let mut ctl = WindowController::live(FS);
        let before = ctl.view();
        ctl.zoom_in();
        ctl.zoom_out();
        ctl.scroll_to(2.0);
        let after = ctl.view();
        assert_eq!(after.window_secs(), before.window_secs());
        assert_eq!(after.start_secs(), 0.0);
        assert_eq!(after.window_secs(), after.total_secs());
    }

    #[test]
    fn entering_live_mode_pins_the_window() {
        let mut ctl = clinic(600.0);
        ctl.zoom_in();
        ctl.scroll_to(100.0);
        ctl.set_mode(ViewMode::Live);
        assert_eq!(ctl.view().window_secs(), 600.0);
        assert_eq!(ctl.view().start_secs(), 0.0);
    }

    #[test]
    fn fetch_limit_covers_the_span() {
        let ctl = clinic(30.0);
        assert_eq!(ctl.fetch_limit(), 7500);
    }
}
