//! Step timing for build output.

use std::time::{Duration, Instant};

/// Measures one build step and reports it on stdout when finished.
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer with the given step name.
    pub fn start(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Finish the timer and print the elapsed time.
    pub fn finish(self) {
        println!("  {} {}", format_elapsed(self.elapsed()), self.name);
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs >= 60.0 {
        format!("[{:.1}m]", secs / 60.0)
    } else {
        format!("[{:.1}s]", secs)
    }
}
