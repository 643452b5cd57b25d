//! 测试点排序
//!
//! 排序键是名称最后一个 `/` 之后、第一个 `.` 之前的前导整数：
//! `"3.txt"` → 3，`"10.in"` → 10，`"2a.txt"` → 2，`"testcases/4"` → 4。
//! 没有前导整数的名称排在所有数字名称之后。排序稳定，键相同时保持输入顺序。

use std::sync::OnceLock;

use regex::Regex;

use crate::models::TestCase;

fn leading_digits() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+").ok()).as_ref()
}

/// 数字排序键：去掉前导零后的数字串，先比长度再逐位比较，任意长度都不会溢出
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NumericKey {
    len: usize,
    digits: String,
}

impl NumericKey {
    fn from_digits(raw: &str) -> Self {
        let trimmed = raw.trim_start_matches('0');
        Self {
            len: trimmed.len(),
            digits: trimmed.to_string(),
        }
    }

    /// 能放进 `u64` 时返回数值
    pub fn value(&self) -> Option<u64> {
        if self.digits.is_empty() {
            return Some(0);
        }
        self.digits.parse().ok()
    }
}

/// 名称的数字排序键，没有前导整数时为 `None`
pub fn numeric_key(name: &str) -> Option<NumericKey> {
    let base = name.rsplit('/').next().unwrap_or(name);
    let stem = base.split('.').next().unwrap_or(base);
    leading_digits()?
        .find(stem.trim_start())
        .map(|m| NumericKey::from_digits(m.as_str()))
}

/// 对测试点排序（稳定）
pub fn order(mut cases: Vec<TestCase>) -> Vec<TestCase> {
    // Vec::sort_by_cached_key 是稳定排序
    cases.sort_by_cached_key(|tc| match numeric_key(&tc.name) {
        Some(key) => (false, Some(key)),
        None => (true, None),
    });
    cases
}
