// Path: crates/telemetry/src/time.rs
use crate::sinks::PipelineMetricsSink;
use std::time::Instant;

/// Reports the time between its creation and drop as one stage duration.
pub struct StageTimer<'a> {
    sink: &'a dyn PipelineMetricsSink,
    stage: &'static str,
    start: Instant,
}

impl<'a> StageTimer<'a> {
    /// Starts timing `stage`.
    pub fn new(sink: &'a dyn PipelineMetricsSink, stage: &'static str) -> Self {
        Self {
            sink,
            stage,
            start: Instant::now(),
        }
    }
}

impl Drop for StageTimer<'_> {
    fn drop(&mut self) {
        self.sink
            .observe_stage_duration(self.stage, self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Recording(Mutex<Vec<&'static str>>);

    impl PipelineMetricsSink for Recording {
        fn inc_verdict(&self, _verdict: &'static str) {}
        fn observe_stage_duration(&self, stage: &'static str, duration_secs: f64) {
            assert!(duration_secs >= 0.0);
            self.0.lock().unwrap().push(stage);
        }
    }

    #[test]
    fn timer_reports_on_drop() {
        let sink = Recording::default();
        {
            let _t = StageTimer::new(&sink, "sign");
            assert!(sink.0.lock().unwrap().is_empty());
        }
        assert_eq!(*sink.0.lock().unwrap(), vec!["sign"]);
    }
}
