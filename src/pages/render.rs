//! 纯文本渲染
//!
//! 分区文本原样输出，不解析 Markdown。

use std::fmt::Write;

use chrono::{DateTime, Local, TimeZone};

use crate::models::{ContentSection, SubmissionResult, TestCase};
use crate::workflow::{LoadState, SubmissionState};

/// 按加载状态渲染页面主体
///
/// - `subject`: 资源名称，用于 "Problem not available."
/// - `failure`: 错误前缀，用于 "Failed to fetch problem data: ..."
pub fn render_load_state<T>(
    state: &LoadState<T>,
    subject: &str,
    failure: &str,
    loaded: impl FnOnce(&T) -> String,
) -> String {
    match state {
        LoadState::Idle => String::new(),
        LoadState::Loading => format!("Loading {}...\n", subject.to_lowercase()),
        LoadState::Loaded(data) => loaded(data),
        LoadState::NotAvailable => format!("{} not available.\n", subject),
        LoadState::Failed(message) => error_banner(&format!("{}: {}", failure, message)),
    }
}

pub fn error_banner(message: &str) -> String {
    format!("[error] {}\n", message)
}

pub fn heading(out: &mut String, level: usize, title: &str) {
    let _ = writeln!(out, "{} {}", "#".repeat(level), title);
}

/// `label: value`，值为空时不输出
pub fn field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        let _ = writeln!(out, "{}: {}", label, value);
    }
}

/// 列表字段，缺失时显示 "N/A"
pub fn list_field(out: &mut String, label: &str, items: &[String]) {
    let value = if items.is_empty() {
        "N/A".to_string()
    } else {
        items.join(", ")
    };
    let _ = writeln!(out, "{}: {}", label, value);
}

/// 渲染一个内容分区，文本为空时整个分区都不输出
pub fn section(out: &mut String, title: &str, section: &ContentSection) {
    let Some(text) = &section.text else {
        return;
    };
    out.push('\n');
    heading(out, 2, title);
    if let Some(path) = &section.source_path {
        let _ = writeln!(out, "  ({})", path);
    }
    out.push_str(text.trim_end());
    out.push('\n');
}

/// 折叠标记
pub fn toggle_marker(collapsed: bool) -> &'static str {
    if collapsed {
        "▶"
    } else {
        "▼"
    }
}

/// 渲染输入输出块
pub fn io_block(out: &mut String, label: &str, file: Option<&str>, body: &str) {
    match file {
        Some(file) => {
            let _ = writeln!(out, "    {} ({}):", label, file);
        }
        None => {
            let _ = writeln!(out, "    {}:", label);
        }
    }
    for line in body.lines() {
        let _ = writeln!(out, "      {}", line);
    }
}

/// 渲染一个测试点或样例
pub fn test_case(out: &mut String, title: &str, case: &TestCase, collapsed: bool) {
    let _ = writeln!(out, "{} {}", toggle_marker(collapsed), title);
    if collapsed {
        return;
    }
    if let Some(description) = case.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "    {}", description);
    }
    if let Some(path) = &case.absolute_path {
        let _ = writeln!(out, "    Path: {}", path);
    }
    io_block(out, "Input", case.input_file.as_deref(), &case.input);
    io_block(out, "Output", case.output_file.as_deref(), &case.output);
}

/// 渲染评测结果面板
pub fn submission_result(result: &SubmissionResult) -> String {
    let mut out = String::new();
    match result {
        SubmissionResult::Error { error } => {
            heading(&mut out, 3, "Submission Error");
            let _ = writeln!(out, "[status-error] {}", error);
        }
        SubmissionResult::Verdicts { results } => {
            heading(&mut out, 3, "Submission Results");
            for verdict in results {
                let _ = writeln!(
                    out,
                    "[{}] Case {}: {}",
                    verdict.style_class(),
                    verdict.case,
                    verdict.status
                );
                if !verdict.stdout.is_empty() {
                    io_block(&mut out, "stdout", None, &verdict.stdout);
                }
                if !verdict.stderr.is_empty() {
                    io_block(&mut out, "stderr", None, &verdict.stderr);
                }
            }
        }
    }
    out
}

/// 渲染提交面板：进行中提示或最近一次结果
pub fn submission_panel(state: &SubmissionState) -> String {
    match state {
        SubmissionState::Idle => String::new(),
        SubmissionState::Submitting => "Submitting...\n".to_string(),
        SubmissionState::Completed(_) | SubmissionState::Failed(_) => state
            .result()
            .map(|result| submission_result(&result))
            .unwrap_or_default(),
    }
}

/// 把服务端时间转为本地时间
///
/// 支持 RFC 3339 与秒/毫秒级时间戳，无法识别时原样返回。
pub fn format_timestamp(raw: &str) -> String {
    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(FORMAT).to_string();
    }
    if let Ok(number) = raw.parse::<f64>() {
        // 大于 1e11 的视为毫秒
        let millis = if number.abs() > 1e11 {
            number as i64
        } else {
            (number * 1000.0) as i64
        };
        if let Some(dt) = Local.timestamp_millis_opt(millis).single() {
            return dt.format(FORMAT).to_string();
        }
    }
    raw.to_string()
}
