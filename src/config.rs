use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError};
use crate::models::Language;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 内容服务地址
    pub service_base_url: String,
    /// 提交等待上限（秒）
    pub submit_timeout_secs: u64,
    /// 默认提交语言
    pub default_language: Language,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_base_url: "http://localhost:5001".to_string(),
            submit_timeout_secs: 60,
            default_language: Language::Python,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取，未设置的字段使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 读取配置：默认值 → TOML 文件（可选）→ 环境变量
    pub async fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(path) => Self::from_toml_file(path).await?,
            None => Self::default(),
        };
        let config = base.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    async fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// 解析 TOML 配置内容
    pub fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            ConfigError::TomlParseFailed {
                path: origin.to_string(),
                source,
            }
            .into()
        })
    }

    fn with_env_overrides(self) -> Self {
        Self {
            service_base_url: std::env::var("PROBLEM_BROWSER_BASE_URL")
                .unwrap_or(self.service_base_url),
            submit_timeout_secs: std::env::var("PROBLEM_BROWSER_SUBMIT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.submit_timeout_secs),
            default_language: std::env::var("PROBLEM_BROWSER_LANGUAGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.default_language),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.submit_timeout_secs == 0 {
            return Err(ConfigError::EnvVarParseFailed {
                var_name: "submit_timeout_secs".to_string(),
                value: "0".to_string(),
                expected_type: "正整数".to_string(),
            });
        }
        Ok(())
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }
}
