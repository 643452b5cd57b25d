//! 折叠状态 - 业务能力层
//!
//! 键为内容标识（样例序号、测试点名称），值为是否折叠。所有更新都返回新状态。

use std::collections::BTreeMap;

/// 折叠状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseState {
    flags: BTreeMap<String, bool>,
}

impl CollapseState {
    /// 所有键默认折叠
    pub fn initialize<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            flags: keys.into_iter().map(|k| (k.into(), true)).collect(),
        }
    }

    /// 翻转一个键，原状态不变；未知键不产生变化
    pub fn toggle(&self, key: &str) -> Self {
        let mut flags = self.flags.clone();
        if let Some(flag) = flags.get_mut(key) {
            *flag = !*flag;
        }
        Self { flags }
    }

    /// 未知键视为折叠
    pub fn is_collapsed(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(true)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.flags.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.flags.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// 展开的键
    pub fn expanded(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, collapsed)| !**collapsed)
            .map(|(k, _)| k.as_str())
    }
}
