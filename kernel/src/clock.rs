//! Wall-clock and thread CPU-time markers for a search run.

use std::time::{Duration, Instant};

use cpu_time::ThreadTime;

/// Start/stop markers; elapsed times are computed when read.
///
/// CPU time is the calling thread's CPU time. On platforms where it is not
/// available the CPU reading is `None`.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    wall_start: Option<Instant>,
    wall_stop: Option<Instant>,
    cpu_start: Option<Duration>,
    cpu_stop: Option<Duration>,
}

fn thread_cpu_now() -> Option<Duration> {
    ThreadTime::try_now().ok().map(|t| t.as_duration())
}

impl Stopwatch {
    /// Record the start markers (and clear any previous stop markers).
    pub fn start(&mut self) {
        self.wall_start = Some(Instant::now());
        self.cpu_start = thread_cpu_now();
        self.wall_stop = None;
        self.cpu_stop = None;
    }

    /// Record the stop markers.
    pub fn stop(&mut self) {
        self.wall_stop = Some(Instant::now());
        self.cpu_stop = thread_cpu_now();
    }

    /// Elapsed wall time between start and stop (zero if either is missing).
    #[must_use]
    pub fn wall(&self) -> Duration {
        match (self.wall_start, self.wall_stop) {
            (Some(start), Some(stop)) => stop.saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }

    /// Elapsed thread CPU time between start and stop.
    #[must_use]
    pub fn cpu(&self) -> Option<Duration> {
        match (self.cpu_start, self.cpu_stop) {
            (Some(start), Some(stop)) => Some(stop.saturating_sub(start)),
            _ => None,
        }
    }
}
