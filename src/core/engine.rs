use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ConvertEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ConvertEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::default(),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting Kindle → Cosense conversion...");

        tracing::info!("Extracting book records...");
        let books = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", books.len());
        self.monitor.log_phase("Extract");

        tracing::info!("Transforming records into pages...");
        let result = self.pipeline.transform(books).await?;
        tracing::info!(
            "Converted {} books ({} skipped), {} pages total",
            result.converted,
            result.skipped,
            result.export.pages.len()
        );
        self.monitor.log_phase("Transform");

        tracing::info!("Writing Cosense import file...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_phase("Load");

        self.monitor.log_summary();
        Ok(output_path)
    }
}
