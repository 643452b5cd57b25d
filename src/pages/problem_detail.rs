use std::fmt::Write;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::FetchError;
use crate::pages::{render, Page};
use crate::services::{CollapseState, ContentService, ProblemDetail};
use crate::workflow::{SubmissionWorkflow, ViewState};

/// 题目详情页
///
/// 样例按序号折叠；提交流程跟随当前题目 id，切换题目时重建。
pub struct ProblemDetailPage {
    service: ContentService,
    submit_timeout: Duration,
    view: ViewState<ProblemDetail>,
    samples: CollapseState,
    submission: Option<SubmissionWorkflow>,
}

impl ProblemDetailPage {
    pub fn new(service: ContentService, submit_timeout: Duration) -> Self {
        Self {
            service,
            submit_timeout,
            view: ViewState::new(),
            samples: CollapseState::default(),
            submission: None,
        }
    }

    pub fn problem_id(&self) -> Option<&str> {
        self.view.key()
    }

    pub fn detail(&self) -> Option<&ProblemDetail> {
        self.view.loaded()
    }

    pub fn samples(&self) -> &CollapseState {
        &self.samples
    }

    /// 展开或折叠第 `index` 个样例（从 0 开始）
    pub fn toggle_sample(&mut self, index: usize) {
        self.samples = self.samples.toggle(&index.to_string());
    }

    /// 当前题目的提交流程
    pub fn submission(&self) -> Option<&SubmissionWorkflow> {
        self.submission.as_ref()
    }

    fn render_detail(&self, detail: &ProblemDetail) -> String {
        let bundle = &detail.bundle;
        let meta = |key: &str| bundle.meta_str(key).unwrap_or_default();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "# {} (ID: {})",
            meta("title"),
            self.problem_id().unwrap_or_default()
        );
        if let Some(path) = bundle.absolute_path() {
            let _ = writeln!(out, "  {}", path);
        }
        render::field(
            &mut out,
            "Difficulty",
            &bundle
                .meta_str("difficulty")
                .unwrap_or_else(|| "N/A".to_string()),
        );
        render::field(&mut out, "Time Limit", &with_unit(meta("timeLimit"), "ms"));
        render::field(&mut out, "Memory Limit", &with_unit(meta("memoryLimit"), "MB"));
        render::list_field(&mut out, "Authors", &bundle.meta_list("authors"));
        render::list_field(&mut out, "Tags", &bundle.meta_list("tags"));

        if !detail.contests.is_empty() {
            out.push_str("Part of Contests:\n");
            for contest in &detail.contests {
                let _ = writeln!(out, "  - {} ({})", contest.name, contest.id);
            }
        }

        render::section(&mut out, "Description", bundle.section("description"));

        let id = self.problem_id().unwrap_or_default();
        out.push('\n');
        let _ = writeln!(out, "View Solution: problem_browser solution {}", id);
        let _ = writeln!(out, "View Test Cases: problem_browser testcases {}", id);

        for (name, title) in [
            ("input", "Input"),
            ("output", "Output"),
            ("constraints", "Constraints"),
            ("notes", "Notes"),
        ] {
            render::section(&mut out, title, bundle.section(name));
        }

        out.push('\n');
        render::heading(&mut out, 2, "Sample Cases");
        if bundle.samples().is_empty() {
            out.push_str("No sample cases available.\n");
        }
        for (index, sample) in bundle.samples().iter().enumerate() {
            let collapsed = self.samples.is_collapsed(&index.to_string());
            render::test_case(
                &mut out,
                &format!("Sample {}", index + 1),
                sample,
                collapsed,
            );
        }

        if let Some(workflow) = &self.submission {
            let panel = render::submission_panel(&workflow.state());
            if !panel.is_empty() {
                out.push('\n');
                out.push_str(&panel);
            }
        }
        out
    }
}

fn with_unit(value: String, unit: &str) -> String {
    if value.is_empty() {
        value
    } else {
        format!("{} {}", value, unit)
    }
}

impl Page for ProblemDetailPage {
    type Data = ProblemDetail;

    fn view_state(&self) -> &ViewState<ProblemDetail> {
        &self.view
    }

    fn view_state_mut(&mut self) -> &mut ViewState<ProblemDetail> {
        &mut self.view
    }

    fn loader(&self, key: &str) -> BoxFuture<'static, Result<ProblemDetail, FetchError>> {
        let service = self.service.clone();
        let id = key.to_string();
        async move { service.problem(&id).await }.boxed()
    }

    fn on_navigate(&mut self, key: &str) {
        self.samples = CollapseState::default();
        let rebind = self
            .submission
            .as_ref()
            .map_or(true, |workflow| workflow.problem_id() != key);
        if rebind {
            self.submission = Some(SubmissionWorkflow::new(
                self.service.fetcher(),
                key,
                self.submit_timeout,
            ));
        }
    }

    fn on_settled(&mut self) {
        let count = self.detail().map_or(0, |d| d.bundle.samples().len());
        self.samples = CollapseState::initialize((0..count).map(|i| i.to_string()));
    }

    fn title(&self) -> String {
        match self.detail().and_then(|d| d.bundle.meta_str("title")) {
            Some(title) => format!("Problem: {}", title),
            None => "Problem Detail".to_string(),
        }
    }

    fn render(&self) -> String {
        render::render_load_state(
            self.view.state(),
            "Problem",
            "Failed to fetch problem data",
            |detail| self.render_detail(detail),
        )
    }
}
