use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::bundle::ContentSection;
use crate::models::de::{null_as_empty, string_or_number};

/// 题目列表项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Value>,
}

impl ProblemSummary {
    pub fn difficulty_label(&self) -> String {
        match &self.difficulty {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => "N/A".to_string(),
        }
    }
}

/// 比赛列表项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// 题解
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionDoc {
    pub content: ContentSection,
    pub authors: Vec<String>,
}

impl SolutionDoc {
    /// 从 `{solution: {content, file_path, authors[]}}` 构建，字段缺失时为空
    pub fn from_payload(payload: &Value) -> Self {
        let Some(solution) = payload.get("solution") else {
            return Self::default();
        };
        let authors = solution
            .get("authors")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            content: ContentSection::from_value(solution),
            authors,
        }
    }
}
