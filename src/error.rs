use std::time::Duration;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误 ({path}): {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 资源获取错误
///
/// `NotFound` 是预期内的结果（页面显示 "not available"），
/// 其余失败统一归为 `Transport`。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// 服务返回 404
    #[error("资源不存在: {path}")]
    NotFound { path: String },
    /// 非 404 的错误状态码、连接失败或响应解析失败
    #[error("{0}")]
    Transport(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }

    /// 用于错误横幅的消息
    pub fn message(&self) -> String {
        match self {
            FetchError::NotFound { path } => format!("resource not found: {}", path),
            FetchError::Transport(msg) => msg.clone(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Transport(format!("invalid response payload: {}", err))
    }
}

/// 提交错误
///
/// 不会向上抛出，而是写入结果面板的 `error` 字段。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// 服务返回错误状态或网络失败
    #[error("An error occurred during submission: {0}")]
    Service(String),
    /// 服务在 2xx 响应里返回了 error 字段
    #[error("{0}")]
    Rejected(String),
    /// 响应无法解析为评测结果
    #[error("Unexpected submission response: {0}")]
    InvalidResponse(String),
    /// 等待超时
    #[error("Submission timed out after {0:?}")]
    TimedOut(Duration),
    /// 用户取消
    #[error("Submission cancelled")]
    Cancelled,
}

impl From<FetchError> for SubmissionError {
    fn from(err: FetchError) -> Self {
        SubmissionError::Service(err.message())
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 不支持的语言
    #[error("不支持的语言: {0}")]
    UnknownLanguage(String),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
