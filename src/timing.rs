//! Per-stage timing.

use std::time::{Duration, Instant};

use crate::action::Stage;

/// Measures one stage and logs its duration when finished.
pub struct StageTimer {
    stage: Stage,
    start: Instant,
}

impl StageTimer {
    pub fn start(stage: Stage) -> Self {
        tracing::info!(%stage, "{}...", stage.description());
        Self {
            stage,
            start: Instant::now(),
        }
    }

    /// Log the elapsed time and return it.
    pub fn finish(self) -> Duration {
        let elapsed = self.start.elapsed();
        tracing::info!(
            stage = %self.stage,
            elapsed = ?elapsed,
            "done"
        );
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reports_elapsed() {
        let timer = StageTimer::start(Stage::Layout);
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.finish() >= Duration::from_millis(5));
    }
}
