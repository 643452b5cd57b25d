use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::de::{null_as_empty, string_or_number};
use crate::models::status::VerdictStatus;

/// 提交语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "c++")]
    Cpp,
}

impl Language {
    /// 服务端使用的语言标识
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Cpp => "c++",
        }
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" | "py" | "python3" => Ok(Language::Python),
            "c++" | "cpp" | "cxx" => Ok(Language::Cpp),
            _ => Err(ConfigError::UnknownLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 提交请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRequest {
    #[serde(skip)]
    pub problem_id: String,
    pub code: String,
    pub language: Language,
}

impl SubmissionRequest {
    pub fn new(problem_id: impl Into<String>, code: impl Into<String>, language: Language) -> Self {
        Self {
            problem_id: problem_id.into(),
            code: code.into(),
            language,
        }
    }

    /// 请求体只包含 code 和 language
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code,
            "language": self.language,
        })
    }
}

/// 单个测试点的评测结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseVerdict {
    #[serde(deserialize_with = "string_or_number")]
    pub case: String,
    pub status: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub stdout: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub stderr: String,
}

impl CaseVerdict {
    pub fn verdict_status(&self) -> VerdictStatus {
        VerdictStatus::from_service(&self.status)
    }

    pub fn style_class(&self) -> &'static str {
        self.verdict_status().style_class()
    }
}

/// 一次提交的结果：错误信息或逐点评测结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmissionResult {
    Error { error: String },
    Verdicts { results: Vec<CaseVerdict> },
}

impl SubmissionResult {
    pub fn error(message: impl Into<String>) -> Self {
        SubmissionResult::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SubmissionResult::Error { .. })
    }

    pub fn verdicts(&self) -> &[CaseVerdict] {
        match self {
            SubmissionResult::Verdicts { results } => results,
            SubmissionResult::Error { .. } => &[],
        }
    }
}

/// `/submissions` 中的提交记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub problem_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub language: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<CaseVerdict>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionRecord {
    /// 记录中保存的评测结果，error 优先
    pub fn verdict(&self) -> Option<SubmissionResult> {
        if let Some(error) = &self.error {
            return Some(SubmissionResult::error(error.clone()));
        }
        self.results
            .as_ref()
            .map(|results| SubmissionResult::Verdicts {
                results: results.clone(),
            })
    }
}
