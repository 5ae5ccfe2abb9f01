use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "repo-inventory")]
#[command(about = "Inventories a user's GitHub repositories into text and markdown reports")]
pub struct CliConfig {
    /// Personal access token, normally supplied via the environment.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Account whose repositories are inventoried.
    #[arg(long, env = "GITHUB_USERNAME")]
    pub username: String,

    #[arg(long, default_value = "https://api.github.com")]
    pub api_base: String,

    #[arg(long, default_value = "output")]
    pub output_path: String,

    #[arg(long, default_value = "logs")]
    pub logs_path: String,

    #[arg(long, default_value = "100")]
    pub page_size: u32,

    #[arg(long, default_value = "30")]
    pub request_timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("token", &self.token)?;
        validate_non_empty_string("username", &self.username)?;
        validate_url("api_base", &self.api_base)?;
        validate_positive_number("page_size", self.page_size, 1)?;
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn token(&self) -> &str {
        &self.token
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CliConfig {
        CliConfig {
            token: "ghp_abc123".to_string(),
            username: "octocat".to_string(),
            api_base: "https://api.github.com".to_string(),
            output_path: "output".to_string(),
            logs_path: "logs".to_string(),
            page_size: 100,
            request_timeout_secs: 30,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_missing_token_fails() {
        let mut cfg = config();
        cfg.token = "".to_string();
        assert!(cfg.validate().is_err());

        cfg.token = "   ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_missing_username_fails() {
        let mut cfg = config();
        cfg.username = "".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_invalid_api_base_fails() {
        let mut cfg = config();
        cfg.api_base = "not-a-url".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_page_size_fails() {
        let mut cfg = config();
        cfg.page_size = 0;
        assert!(cfg.validate().is_err());
    }
}
