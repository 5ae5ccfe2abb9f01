use crate::core::Pipeline;
use crate::domain::model::ReportPaths;
use crate::utils::error::Result;

/// Sequences the pipeline: fetch, then format, then write. Returns `None`
/// when the fetch yields no repositories, in which case no report is written.
pub struct InventoryEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> InventoryEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<Option<ReportPaths>> {
        let repos = self.pipeline.extract().await?;
        if repos.is_empty() {
            tracing::info!("No repositories fetched; skipping report generation.");
            return Ok(None);
        }

        let bundle = self.pipeline.transform(repos).await?;
        let paths = self.pipeline.load(bundle).await?;

        Ok(Some(paths))
    }
}
