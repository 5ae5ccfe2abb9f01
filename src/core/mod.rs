pub mod engine;
pub mod pipeline;
pub mod rate_limit;
pub mod report;

pub use crate::domain::model::{
    InventoryReport, RateLimitStatus, ReportBundle, ReportPaths, RepositoryRecord,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
