//! 内容包模型
//!
//! 把服务端返回的 JSON 归一化为 `{分区名: {文本, 来源路径}}`，
//! 外加 meta 记录、存储路径和样例数组。缺失的分区读作空分区，不视为错误。

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::models::test_case::SampleCase;

/// 页面上总会查询的分区，缺失时补空
pub const WELL_KNOWN_SECTIONS: [&str; 8] = [
    "description",
    "input",
    "output",
    "constraints",
    "notes",
    "contest",
    "theory",
    "rules",
];

static EMPTY_SECTION: ContentSection = ContentSection {
    text: None,
    source_path: None,
};

/// 单个内容分区
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSection {
    /// `None` 表示分区不存在或为空，不渲染
    pub text: Option<String>,
    /// 来源文件路径，只用于展示
    pub source_path: Option<String>,
}

impl ContentSection {
    pub fn new(text: impl Into<String>, source_path: Option<String>) -> Self {
        Self {
            text: Some(text.into()),
            source_path,
        }
    }

    /// 从 `{content, file_path}` 对象构建
    ///
    /// 非字符串的 content（排行榜等 JSON 文档）转为格式化后的 JSON 文本。
    pub fn from_value(value: &Value) -> Self {
        let text = match value.get("content") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => serde_json::to_string_pretty(other).ok(),
        };
        let source_path = value
            .get("file_path")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Self { text, source_path }
    }

    pub fn is_present(&self) -> bool {
        self.text.is_some()
    }
}

/// 归一化后的内容包，创建后不可变
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentBundle {
    sections: BTreeMap<String, ContentSection>,
    meta: Map<String, Value>,
    meta_path: Option<String>,
    absolute_path: Option<String>,
    samples: Vec<SampleCase>,
}

impl ContentBundle {
    /// 归一化服务端响应，只借用原始 payload
    pub fn normalize(payload: &Value) -> Self {
        let Some(obj) = payload.as_object() else {
            return Self::with_well_known_sections(BTreeMap::new());
        };

        let sections = obj
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "meta" | "absolute_path" | "samples_data"))
            .filter(|(_, value)| is_section_object(value))
            .map(|(key, value)| (key.clone(), ContentSection::from_value(value)))
            .collect();

        let meta_obj = obj.get("meta");
        let meta = meta_obj
            .and_then(|m| m.get("content"))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let meta_path = meta_obj
            .and_then(|m| m.get("file_path"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let samples = obj
            .get("samples_data")
            .and_then(Value::as_array)
            .map(|items| items.iter().enumerate().map(|(i, v)| sample_from(i, v)).collect())
            .unwrap_or_default();

        Self {
            meta,
            meta_path,
            absolute_path: obj
                .get("absolute_path")
                .and_then(Value::as_str)
                .map(str::to_string),
            samples,
            ..Self::with_well_known_sections(sections)
        }
    }

    fn with_well_known_sections(mut sections: BTreeMap<String, ContentSection>) -> Self {
        for name in WELL_KNOWN_SECTIONS {
            sections.entry(name.to_string()).or_default();
        }
        Self {
            sections,
            ..Self::default()
        }
    }

    /// 按名称取分区，未知名称返回空分区
    pub fn section(&self, name: &str) -> &ContentSection {
        self.sections.get(name).unwrap_or(&EMPTY_SECTION)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_present()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    /// 取 meta 中的标量字段，数字也转为字符串
    pub fn meta_str(&self, key: &str) -> Option<String> {
        match self.meta.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// 取 meta 中的列表字段（authors、tags、problems）
    pub fn meta_list(&self, key: &str) -> Vec<String> {
        self.meta
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn meta_path(&self) -> Option<&str> {
        self.meta_path.as_deref()
    }

    pub fn absolute_path(&self) -> Option<&str> {
        self.absolute_path.as_deref()
    }

    pub fn samples(&self) -> &[SampleCase] {
        &self.samples
    }
}

fn is_section_object(value: &Value) -> bool {
    value
        .as_object()
        .map(|o| o.contains_key("content") || o.contains_key("file_path"))
        .unwrap_or(false)
}

/// 样例没有名称时按序号（从 1 开始）命名
fn sample_from(index: usize, value: &Value) -> SampleCase {
    let mut sample: SampleCase = serde_json::from_value(value.clone()).unwrap_or_default();
    if sample.name.is_empty() {
        sample.name = (index + 1).to_string();
    }
    sample
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn problem_payload() -> Value {
        json!({
            "meta": {
                "content": {
                    "title": "A + B",
                    "timeLimit": 1000,
                    "memoryLimit": 256,
                    "authors": ["alice", "bob"],
                    "tags": ["math"]
                },
                "file_path": "/data/problems/P1/meta.json"
            },
            "description": {"content": "Add two numbers.", "file_path": "/data/problems/P1/details/description.md"},
            "input": {"content": "Two integers.", "file_path": "/data/problems/P1/details/input.md"},
            "output": {"content": null, "file_path": null},
            "absolute_path": "/data/problems/P1",
            "samples_data": [
                {"input": "1 2", "output": "3", "description": null},
                {"input": "5 5", "output": "10", "description": "Equal numbers."}
            ]
        })
    }

    #[test]
    fn test_missing_section_normalizes_to_none() {
        let bundle = ContentBundle::normalize(&problem_payload());

        assert_eq!(bundle.section("notes").text, None);
        assert_eq!(bundle.section("notes").source_path, None);
        assert!(!bundle.has_section("output"));
        assert!(bundle.section_names().any(|n| n == "notes"));
        assert_eq!(bundle.section("never-heard-of-it"), &ContentSection::default());
    }

    #[test]
    fn test_present_sections_keep_provenance() {
        let bundle = ContentBundle::normalize(&problem_payload());
        let description = bundle.section("description");

        assert_eq!(description.text.as_deref(), Some("Add two numbers."));
        assert_eq!(
            description.source_path.as_deref(),
            Some("/data/problems/P1/details/description.md")
        );
        assert_eq!(bundle.absolute_path(), Some("/data/problems/P1"));
        assert_eq!(bundle.meta_path(), Some("/data/problems/P1/meta.json"));
    }

    #[test]
    fn test_meta_accessors() {
        let bundle = ContentBundle::normalize(&problem_payload());

        assert_eq!(bundle.meta_str("title").as_deref(), Some("A + B"));
        assert_eq!(bundle.meta_str("timeLimit").as_deref(), Some("1000"));
        assert_eq!(bundle.meta_list("authors"), vec!["alice", "bob"]);
        assert!(bundle.meta_list("problems").is_empty());
        assert_eq!(bundle.meta_str("difficulty"), None);
    }

    #[test]
    fn test_samples_named_by_position() {
        let bundle = ContentBundle::normalize(&problem_payload());
        let samples = bundle.samples();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].name, "1");
        assert_eq!(samples[1].name, "2");
        assert_eq!(samples[1].description.as_deref(), Some("Equal numbers."));
    }

    #[test]
    fn test_json_content_is_pretty_printed() {
        let payload = json!({
            "leaderboard": {"content": [{"user": "alice", "score": 300}], "file_path": "/c/leaderboard.json"}
        });
        let bundle = ContentBundle::normalize(&payload);
        let text = bundle.section("leaderboard").text.clone().unwrap();

        assert!(text.contains("\"user\": \"alice\""));
    }

    #[test]
    fn test_normalize_does_not_touch_payload() {
        let payload = problem_payload();
        let before = payload.clone();
        let _ = ContentBundle::normalize(&payload);
        assert_eq!(payload, before);
    }

    #[test]
    fn test_non_object_payload_is_empty_bundle() {
        let bundle = ContentBundle::normalize(&json!(["P1", "P2"]));
        assert!(!bundle.has_section("description"));
        assert!(bundle.meta().is_empty());
        assert!(bundle.samples().is_empty());
    }
}
