use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One repository as returned by the GitHub list endpoint. Field names follow
/// the API payload; records are never mutated after deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub description: Option<String>,
    pub private: bool,
    pub html_url: String,
}

impl RepositoryRecord {
    pub fn visibility(&self) -> &'static str {
        if self.private {
            "Private"
        } else {
            "Public"
        }
    }
}

/// Snapshot of the core API quota, decoded from the `rate` object of
/// `GET /rate_limit`. Re-queried before every page request, never persisted.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RateLimitStatus {
    pub remaining: u32,
    /// Unix timestamp (seconds) at which the quota resets.
    pub reset: i64,
}

#[derive(Debug, Clone)]
pub struct InventoryReport {
    pub total_count: usize,
    pub public_count: usize,
    pub private_count: usize,
    pub generated_at: DateTime<Local>,
    /// Entry order is fetch order.
    pub entries: Vec<RepositoryRecord>,
}

impl InventoryReport {
    /// Builds a report from fetched records, stamped with the given time.
    /// Counts are derived from the entries, so total = public + private
    /// = entries.len() holds for every constructed report.
    pub fn from_records(entries: Vec<RepositoryRecord>, generated_at: DateTime<Local>) -> Self {
        let total_count = entries.len();
        let private_count = entries.iter().filter(|repo| repo.private).count();
        Self {
            total_count,
            public_count: total_count - private_count,
            private_count,
            generated_at,
            entries,
        }
    }

    /// Seconds-resolution timestamp embedded in output filenames.
    pub fn timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d_%H-%M-%S").to_string()
    }
}

/// Transform output: the summarized report plus both rendered documents.
#[derive(Debug, Clone)]
pub struct ReportBundle {
    pub summary: InventoryReport,
    pub text_output: String,
    pub markdown_output: String,
}

/// Load output: where the two rendered documents were written.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub text: String,
    pub markdown: String,
}
