use serde::{Deserialize, Serialize};

use crate::models::de::null_as_empty;

/// 单个测试点
///
/// 服务端可能对缺失的文件返回 `null`，读作空字符串。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub input: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 样例与测试点结构相同
pub type SampleCase = TestCase;

impl TestCase {
    pub fn new(name: impl Into<String>, input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            output: output.into(),
            ..Self::default()
        }
    }
}

/// `/problems/{id}/testcases` 的响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseSet {
    #[serde(default)]
    pub sample_cases: Vec<TestCase>,
    #[serde(default)]
    pub normal_cases: Vec<TestCase>,
}

impl TestCaseSet {
    /// 所有测试点名称（样例在前），用作折叠状态的键
    pub fn case_names(&self) -> impl Iterator<Item = &str> {
        self.sample_cases
            .iter()
            .chain(self.normal_cases.iter())
            .map(|tc| tc.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sample_cases.len() + self.normal_cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
