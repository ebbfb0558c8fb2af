use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives the extract → transform → load phases of a workload pipeline,
/// with optional system monitoring between phases.
pub struct WorkloadEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> WorkloadEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting workload report run");

        let extractions = self.pipeline.extract().await?;
        let raw_count: usize = extractions.iter().map(|e| e.packages.len()).sum();
        tracing::info!(
            "Extracted {} teams ({} raw package records)",
            extractions.len(),
            raw_count
        );
        self.monitor.log_stats("extract");

        let reports = self.pipeline.transform(extractions).await?;
        tracing::info!("Transformed {} team reports", reports.len());
        self.monitor.log_stats("transform");

        let output_path = self.pipeline.load(reports).await?;
        tracing::info!("Reports written to {}", output_path);
        self.monitor.log_stats("load");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
