//! 评测状态与样式类
//!
//! 状态字符串到样式类的映射是一张固定的表，表外的状态统一落到 `status-unknown`。

use phf::phf_map;
use std::fmt;

/// 评测状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictStatus {
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompilationError,
    OutputLimitExceeded,
    PresentationError,
    InternalError,
    Pending,
    Running,
    Skipped,
    Unknown,
}

/// 小写、单空格分隔后的状态名 → 状态
static STATUS_TABLE: phf::Map<&'static str, VerdictStatus> = phf_map! {
    "accepted" => VerdictStatus::Accepted,
    "ac" => VerdictStatus::Accepted,
    "wrong answer" => VerdictStatus::WrongAnswer,
    "wa" => VerdictStatus::WrongAnswer,
    "time limit exceeded" => VerdictStatus::TimeLimitExceeded,
    "tle" => VerdictStatus::TimeLimitExceeded,
    "memory limit exceeded" => VerdictStatus::MemoryLimitExceeded,
    "mle" => VerdictStatus::MemoryLimitExceeded,
    "runtime error" => VerdictStatus::RuntimeError,
    "re" => VerdictStatus::RuntimeError,
    "compilation error" => VerdictStatus::CompilationError,
    "compile error" => VerdictStatus::CompilationError,
    "ce" => VerdictStatus::CompilationError,
    "output limit exceeded" => VerdictStatus::OutputLimitExceeded,
    "ole" => VerdictStatus::OutputLimitExceeded,
    "presentation error" => VerdictStatus::PresentationError,
    "pe" => VerdictStatus::PresentationError,
    "internal error" => VerdictStatus::InternalError,
    "system error" => VerdictStatus::InternalError,
    "pending" => VerdictStatus::Pending,
    "running" => VerdictStatus::Running,
    "skipped" => VerdictStatus::Skipped,
};

impl VerdictStatus {
    pub const ALL: [VerdictStatus; 13] = [
        VerdictStatus::Accepted,
        VerdictStatus::WrongAnswer,
        VerdictStatus::TimeLimitExceeded,
        VerdictStatus::MemoryLimitExceeded,
        VerdictStatus::RuntimeError,
        VerdictStatus::CompilationError,
        VerdictStatus::OutputLimitExceeded,
        VerdictStatus::PresentationError,
        VerdictStatus::InternalError,
        VerdictStatus::Pending,
        VerdictStatus::Running,
        VerdictStatus::Skipped,
        VerdictStatus::Unknown,
    ];

    /// 解析服务端返回的状态字符串，大小写和多余空白不敏感
    pub fn from_service(status: &str) -> Self {
        let normalized = status
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        STATUS_TABLE
            .get(normalized.as_str())
            .copied()
            .unwrap_or(VerdictStatus::Unknown)
    }

    /// 结果行的样式类
    pub fn style_class(self) -> &'static str {
        match self {
            VerdictStatus::Accepted => "status-accepted",
            VerdictStatus::WrongAnswer => "status-wrong-answer",
            VerdictStatus::TimeLimitExceeded => "status-time-limit-exceeded",
            VerdictStatus::MemoryLimitExceeded => "status-memory-limit-exceeded",
            VerdictStatus::RuntimeError => "status-runtime-error",
            VerdictStatus::CompilationError => "status-compilation-error",
            VerdictStatus::OutputLimitExceeded => "status-output-limit-exceeded",
            VerdictStatus::PresentationError => "status-presentation-error",
            VerdictStatus::InternalError => "status-internal-error",
            VerdictStatus::Pending => "status-pending",
            VerdictStatus::Running => "status-running",
            VerdictStatus::Skipped => "status-skipped",
            VerdictStatus::Unknown => "status-unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VerdictStatus::Accepted => "Accepted",
            VerdictStatus::WrongAnswer => "Wrong Answer",
            VerdictStatus::TimeLimitExceeded => "Time Limit Exceeded",
            VerdictStatus::MemoryLimitExceeded => "Memory Limit Exceeded",
            VerdictStatus::RuntimeError => "Runtime Error",
            VerdictStatus::CompilationError => "Compilation Error",
            VerdictStatus::OutputLimitExceeded => "Output Limit Exceeded",
            VerdictStatus::PresentationError => "Presentation Error",
            VerdictStatus::InternalError => "Internal Error",
            VerdictStatus::Pending => "Pending",
            VerdictStatus::Running => "Running",
            VerdictStatus::Skipped => "Skipped",
            VerdictStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_style_classes() {
        assert_eq!(
            VerdictStatus::from_service("Wrong Answer").style_class(),
            "status-wrong-answer"
        );
        assert_eq!(
            VerdictStatus::from_service("Time Limit Exceeded").style_class(),
            "status-time-limit-exceeded"
        );
        assert_eq!(
            VerdictStatus::from_service("  ACCEPTED ").style_class(),
            "status-accepted"
        );
    }

    #[test]
    fn test_unknown_status_falls_back() {
        assert_eq!(VerdictStatus::from_service("Judging Crashed"), VerdictStatus::Unknown);
        assert_eq!(VerdictStatus::from_service("").style_class(), "status-unknown");
    }

    #[test]
    fn test_style_classes_are_collision_free() {
        let classes: HashSet<_> = VerdictStatus::ALL.iter().map(|s| s.style_class()).collect();
        assert_eq!(classes.len(), VerdictStatus::ALL.len());
    }

    #[test]
    fn test_labels_round_trip_through_table() {
        for status in VerdictStatus::ALL {
            assert_eq!(VerdictStatus::from_service(status.label()), status);
        }
    }
}
