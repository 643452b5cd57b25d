//! 资源获取 - 基础设施层
//!
//! 只负责发出一次请求并分类结果，不缓存、不重试、不做 schema 校验。

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// 资源获取能力
///
/// - 404 → `FetchError::NotFound`
/// - 其他非 2xx、连接失败、JSON 解析失败 → `FetchError::Transport`
/// - 成功 → 原样返回解析后的 JSON
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// GET 一个资源
    async fn fetch(&self, path: &str) -> Result<Value, FetchError>;

    /// POST JSON 请求体，分类规则与 `fetch` 相同
    async fn post(&self, path: &str, body: &Value) -> Result<Value, FetchError>;
}

/// 按状态码分类响应
pub fn classify_status(status: u16, path: &str) -> Result<(), FetchError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(FetchError::NotFound {
            path: path.to_string(),
        }),
        other => Err(FetchError::Transport(format!(
            "HTTP error! status: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_404_is_not_found() {
        let err = classify_status(404, "/problems/P404").unwrap_err();
        assert_eq!(
            err,
            FetchError::NotFound {
                path: "/problems/P404".to_string()
            }
        );
    }

    #[test]
    fn test_other_failures_are_transport() {
        assert_eq!(
            classify_status(500, "/problems").unwrap_err(),
            FetchError::Transport("HTTP error! status: 500".to_string())
        );
        assert!(matches!(
            classify_status(403, "/contests/C1"),
            Err(FetchError::Transport(_))
        ));
    }

    #[test]
    fn test_success_range() {
        assert!(classify_status(200, "/problems").is_ok());
        assert!(classify_status(204, "/problems").is_ok());
    }
}
