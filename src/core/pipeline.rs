use crate::core::rate_limit::RateLimitGuard;
use crate::core::report;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{InventoryReport, ReportBundle, ReportPaths, RepositoryRecord};
use crate::utils::error::Result;
use chrono::Local;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::Client;

const USER_AGENT_VALUE: &str = concat!("repo-inventory/", env!("CARGO_PKG_VERSION"));

pub struct InventoryPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
    guard: RateLimitGuard,
}

impl<S: Storage, C: ConfigProvider> InventoryPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let client = Client::new();
        let guard = RateLimitGuard::new(
            client.clone(),
            config.api_base().to_string(),
            config.token().to_string(),
            config.request_timeout(),
        );

        Self {
            storage,
            config,
            client,
            guard,
        }
    }

    async fn fetch_page(&self, page: u32) -> Result<reqwest::Response> {
        let url = format!(
            "{}/users/{}/repos",
            self.config.api_base(),
            self.config.username()
        );

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("token {}", self.config.token()))
            .header(USER_AGENT, USER_AGENT_VALUE)
            .query(&[
                ("per_page", self.config.page_size().to_string()),
                ("type", "all".to_string()),
                ("page", page.to_string()),
            ])
            .timeout(self.config.request_timeout())
            .send()
            .await?;

        Ok(response)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for InventoryPipeline<S, C> {
    /// Walks the list endpoint page by page until an empty page. A non-success
    /// status aborts the whole fetch and yields an empty collection; previously
    /// accumulated pages are discarded rather than reported partially.
    async fn extract(&self) -> Result<Vec<RepositoryRecord>> {
        tracing::info!("Fetching repositories from GitHub...");

        let mut repos = Vec::new();
        let mut page = 1u32;

        loop {
            self.guard.wait_if_exhausted().await;

            tracing::debug!("Requesting repository page {}", page);
            let response = self.fetch_page(page).await?;
            tracing::debug!("Page {} response status: {}", page, response.status());

            if !response.status().is_success() {
                tracing::error!(
                    "Failed to fetch repositories. Status code: {}",
                    response.status()
                );
                return Ok(Vec::new());
            }

            let page_repos: Vec<RepositoryRecord> = response.json().await?;
            if page_repos.is_empty() {
                break;
            }

            repos.extend(page_repos);
            page += 1;
        }

        tracing::info!("Retrieved {} repositories.", repos.len());
        Ok(repos)
    }

    async fn transform(&self, repos: Vec<RepositoryRecord>) -> Result<ReportBundle> {
        tracing::info!("Formatting repository data...");

        let summary = InventoryReport::from_records(repos, Local::now());
        let text_output = report::render_text(&summary);
        let markdown_output = report::render_markdown(&summary);

        Ok(ReportBundle {
            summary,
            text_output,
            markdown_output,
        })
    }

    async fn load(&self, bundle: ReportBundle) -> Result<ReportPaths> {
        let timestamp = bundle.summary.timestamp();
        let text_file = format!("text/text_output_{}.txt", timestamp);
        let markdown_file = format!("markdown/markdown_output_{}.md", timestamp);

        self.storage
            .write_file(&text_file, bundle.text_output.as_bytes())
            .await?;
        let text = format!("{}/{}", self.config.output_path(), text_file);
        tracing::info!("Text report generated: {}", text);

        self.storage
            .write_file(&markdown_file, bundle.markdown_output.as_bytes())
            .await?;
        let markdown = format!("{}/{}", self.config.output_path(), markdown_file);
        tracing::info!("Markdown report generated: {}", markdown);

        Ok(ReportPaths { text, markdown })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::InventoryError;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        api_base: String,
        page_size: u32,
    }

    impl MockConfig {
        fn new(api_base: String) -> Self {
            Self {
                api_base,
                page_size: 100,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_base(&self) -> &str {
            &self.api_base
        }

        fn username(&self) -> &str {
            "octocat"
        }

        fn token(&self) -> &str {
            "test-token"
        }

        fn page_size(&self) -> u32 {
            self.page_size
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(5)
        }

        fn output_path(&self) -> &str {
            "output"
        }
    }

    fn repo_json(index: usize) -> serde_json::Value {
        serde_json::json!({
            "name": format!("repo-{}", index),
            "description": format!("Repository number {}", index),
            "private": index % 2 == 0,
            "html_url": format!("https://github.com/octocat/repo-{}", index)
        })
    }

    fn repo_page(range: std::ops::Range<usize>) -> serde_json::Value {
        serde_json::Value::Array(range.map(repo_json).collect())
    }

    fn mock_rate_limit(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET).path("/rate_limit");
            then.status(200).json_body(serde_json::json!({
                "rate": {"limit": 5000, "used": 1, "remaining": 4999, "reset": 0}
            }));
        })
    }

    fn pipeline_for(server: &MockServer) -> InventoryPipeline<MockStorage, MockConfig> {
        InventoryPipeline::new(MockStorage::new(), MockConfig::new(server.base_url()))
    }

    #[tokio::test]
    async fn test_extract_walks_all_pages_in_order() {
        let server = MockServer::start();
        let rate_mock = mock_rate_limit(&server);

        let page1 = server.mock(|when, then| {
            when.method(GET)
                .path("/users/octocat/repos")
                .query_param("page", "1");
            then.status(200).json_body(repo_page(0..100));
        });
        let page2 = server.mock(|when, then| {
            when.method(GET)
                .path("/users/octocat/repos")
                .query_param("page", "2");
            then.status(200).json_body(repo_page(100..137));
        });
        let page3 = server.mock(|when, then| {
            when.method(GET)
                .path("/users/octocat/repos")
                .query_param("page", "3");
            then.status(200).json_body(serde_json::json!([]));
        });

        let repos = pipeline_for(&server).extract().await.unwrap();

        page1.assert();
        page2.assert();
        page3.assert();
        rate_mock.assert_hits(3);

        assert_eq!(repos.len(), 137);
        assert_eq!(repos[0].name, "repo-0");
        assert_eq!(repos[99].name, "repo-99");
        assert_eq!(repos[136].name, "repo-136");
    }

    #[tokio::test]
    async fn test_extract_aborts_on_failed_page() {
        let server = MockServer::start();
        mock_rate_limit(&server);

        let page1 = server.mock(|when, then| {
            when.method(GET)
                .path("/users/octocat/repos")
                .query_param("page", "1");
            then.status(200).json_body(repo_page(0..3));
        });
        let page2 = server.mock(|when, then| {
            when.method(GET)
                .path("/users/octocat/repos")
                .query_param("page", "2");
            then.status(403);
        });

        let repos = pipeline_for(&server).extract().await.unwrap();

        page1.assert();
        page2.assert();
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_extract_sends_auth_and_pagination_params() {
        let server = MockServer::start();
        mock_rate_limit(&server);

        let page1 = server.mock(|when, then| {
            when.method(GET)
                .path("/users/octocat/repos")
                .header("authorization", "token test-token")
                .query_param("per_page", "100")
                .query_param("type", "all")
                .query_param("page", "1");
            then.status(200).json_body(serde_json::json!([]));
        });

        let repos = pipeline_for(&server).extract().await.unwrap();

        page1.assert();
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_extract_keeps_null_description() {
        let server = MockServer::start();
        mock_rate_limit(&server);

        server.mock(|when, then| {
            when.method(GET)
                .path("/users/octocat/repos")
                .query_param("page", "1");
            then.status(200).json_body(serde_json::json!([
                {"name": "bare", "description": null, "private": false,
                 "html_url": "https://github.com/octocat/bare"}
            ]));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/users/octocat/repos")
                .query_param("page", "2");
            then.status(200).json_body(serde_json::json!([]));
        });

        let repos = pipeline_for(&server).extract().await.unwrap();

        assert_eq!(repos.len(), 1);
        assert!(repos[0].description.is_none());
    }

    #[tokio::test]
    async fn test_extract_propagates_transport_error() {
        let server = MockServer::start();
        mock_rate_limit(&server);

        // Malformed page body: decoding fails after a successful status.
        server.mock(|when, then| {
            when.method(GET)
                .path("/users/octocat/repos")
                .query_param("page", "1");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("{not json");
        });

        let result = pipeline_for(&server).extract().await;
        assert!(matches!(result, Err(InventoryError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_transform_builds_summary_and_documents() {
        let server = MockServer::start();
        let pipeline = pipeline_for(&server);

        let repos = vec![
            RepositoryRecord {
                name: "alpha".to_string(),
                description: Some("First".to_string()),
                private: false,
                html_url: "https://github.com/octocat/alpha".to_string(),
            },
            RepositoryRecord {
                name: "beta".to_string(),
                description: None,
                private: true,
                html_url: "https://github.com/octocat/beta".to_string(),
            },
        ];

        let bundle = pipeline.transform(repos).await.unwrap();

        assert_eq!(bundle.summary.total_count, 2);
        assert_eq!(bundle.summary.public_count, 1);
        assert_eq!(bundle.summary.private_count, 1);
        assert!(bundle.text_output.contains("Total Repositories: 2"));
        assert!(bundle
            .markdown_output
            .contains("[alpha](https://github.com/octocat/alpha)"));
    }

    #[tokio::test]
    async fn test_load_writes_both_reports() {
        let server = MockServer::start();
        let storage = MockStorage::new();
        let pipeline =
            InventoryPipeline::new(storage.clone(), MockConfig::new(server.base_url()));

        let summary = InventoryReport::from_records(vec![], Local::now());
        let timestamp = summary.timestamp();
        let bundle = ReportBundle {
            summary,
            text_output: "text report".to_string(),
            markdown_output: "markdown report".to_string(),
        };

        let paths = pipeline.load(bundle).await.unwrap();

        assert_eq!(
            paths.text,
            format!("output/text/text_output_{}.txt", timestamp)
        );
        assert_eq!(
            paths.markdown,
            format!("output/markdown/markdown_output_{}.md", timestamp)
        );

        let text = storage
            .get_file(&format!("text/text_output_{}.txt", timestamp))
            .await;
        assert_eq!(text, Some(b"text report".to_vec()));

        let markdown = storage
            .get_file(&format!("markdown/markdown_output_{}.md", timestamp))
            .await;
        assert_eq!(markdown, Some(b"markdown report".to_vec()));
    }
}
