use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
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
        tracing::info!("Starting résumé ETL process");
        self.monitor.log_stats("start");

        // Extract
        tracing::info!("Discovering documents...");
        let documents = self.pipeline.extract().await?;
        tracing::info!("Found {} document(s)", documents.len());
        self.monitor.log_stats("extract");

        // Transform
        tracing::info!("Parsing documents...");
        let batch = self.pipeline.transform(documents).await?;
        tracing::info!(
            parsed = batch.parsed,
            failed = batch.failed,
            "Parsed {} of {} document(s)",
            batch.parsed,
            batch.documents.len()
        );
        self.monitor.log_stats("transform");

        // Load
        tracing::info!("Writing results...");
        let output_path = self.pipeline.load(batch).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
