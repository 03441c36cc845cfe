// Scoped phase timer: logs elapsed time when dropped. Wraps core calls from
// the outside; the core stages carry no timing of their own.

use std::time::Instant;

pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        tracing::info!(
            phase = self.name,
            elapsed_ms = self.start.elapsed().as_millis() as u64,
            "phase complete"
        );
    }
}
