//! 列表页：题目、比赛、题解、提交记录与测试点浏览

use std::fmt::Write;
use std::marker::PhantomData;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::FetchError;
use crate::models::{ContestSummary, ProblemSummary, SubmissionRecord};
use crate::pages::{render, Page};
use crate::services::ContentService;
use crate::workflow::ViewState;

/// 列表页只有一个资源，使用固定的 key
pub const INDEX_KEY: &str = "index";

/// 列表中的一行
pub trait ListingRow: Sized + Send + 'static {
    /// 页面标题
    const HEADING: &'static str;
    /// 列表为空时的提示
    const EMPTY: &'static str;
    /// 加载失败时的错误前缀
    const FAILURE: &'static str;

    fn fetch(service: ContentService) -> BoxFuture<'static, Result<Vec<Self>, FetchError>>;

    fn render_row(&self) -> String;
}

impl ListingRow for ProblemSummary {
    const HEADING: &'static str = "Problems";
    const EMPTY: &'static str = "No problems found.";
    const FAILURE: &'static str = "Failed to fetch problems";

    fn fetch(service: ContentService) -> BoxFuture<'static, Result<Vec<Self>, FetchError>> {
        async move { service.list_problems().await }.boxed()
    }

    fn render_row(&self) -> String {
        format!("{}  {}  [{}]", self.id, self.title, self.difficulty_label())
    }
}

impl ListingRow for ContestSummary {
    const HEADING: &'static str = "Contests";
    const EMPTY: &'static str = "No contests found.";
    const FAILURE: &'static str = "Failed to fetch contests";

    fn fetch(service: ContentService) -> BoxFuture<'static, Result<Vec<Self>, FetchError>> {
        async move { service.list_contests().await }.boxed()
    }

    fn render_row(&self) -> String {
        format!("{}  {}", self.id, self.name)
    }
}

/// 有题解的题目 id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionEntry(pub String);

impl ListingRow for SolutionEntry {
    const HEADING: &'static str = "Solutions";
    const EMPTY: &'static str = "No solutions found.";
    const FAILURE: &'static str = "Failed to fetch solutions";

    fn fetch(service: ContentService) -> BoxFuture<'static, Result<Vec<Self>, FetchError>> {
        async move {
            let ids = service.list_solutions().await?;
            Ok(ids.into_iter().map(SolutionEntry).collect())
        }
        .boxed()
    }

    fn render_row(&self) -> String {
        format!("Solution for Problem {}", self.0)
    }
}

impl ListingRow for SubmissionRecord {
    const HEADING: &'static str = "Submissions";
    const EMPTY: &'static str = "No submissions found.";
    const FAILURE: &'static str = "Failed to fetch submissions";

    fn fetch(service: ContentService) -> BoxFuture<'static, Result<Vec<Self>, FetchError>> {
        async move { service.list_submissions().await }.boxed()
    }

    fn render_row(&self) -> String {
        format!(
            "{}  {}  {}  {}",
            self.id,
            self.problem_id,
            self.language,
            render::format_timestamp(&self.timestamp)
        )
    }
}

/// 测试点浏览：题目列表，每行指向该题的测试点
#[derive(Debug, Clone, PartialEq)]
pub struct TestCaseEntry(pub ProblemSummary);

impl ListingRow for TestCaseEntry {
    const HEADING: &'static str = "Test Cases Explorer";
    const EMPTY: &'static str = "No problems found.";
    const FAILURE: &'static str = "Failed to fetch problems";

    fn fetch(service: ContentService) -> BoxFuture<'static, Result<Vec<Self>, FetchError>> {
        async move {
            let problems = service.list_problems().await?;
            Ok(problems.into_iter().map(TestCaseEntry).collect())
        }
        .boxed()
    }

    fn render_row(&self) -> String {
        format!(
            "{}  {}  -> testcases {}",
            self.0.id, self.0.title, self.0.id
        )
    }
}

/// 通用列表页
pub struct ListingPage<R> {
    service: ContentService,
    view: ViewState<Vec<R>>,
    _row: PhantomData<fn() -> R>,
}

pub type ProblemListPage = ListingPage<ProblemSummary>;
pub type ContestListPage = ListingPage<ContestSummary>;
pub type SolutionListPage = ListingPage<SolutionEntry>;
pub type SubmissionListPage = ListingPage<SubmissionRecord>;
pub type TestCaseExplorerPage = ListingPage<TestCaseEntry>;

impl<R: ListingRow> ListingPage<R> {
    pub fn new(service: ContentService) -> Self {
        Self {
            service,
            view: ViewState::new(),
            _row: PhantomData,
        }
    }

    pub fn rows(&self) -> &[R] {
        self.view.loaded().map(Vec::as_slice).unwrap_or_default()
    }

    fn render_rows(rows: &[R]) -> String {
        let mut out = String::new();
        render::heading(&mut out, 1, R::HEADING);
        if rows.is_empty() {
            let _ = writeln!(out, "{}", R::EMPTY);
        }
        for row in rows {
            let _ = writeln!(out, "  {}", row.render_row());
        }
        out
    }
}

impl<R: ListingRow> Page for ListingPage<R> {
    type Data = Vec<R>;

    fn view_state(&self) -> &ViewState<Vec<R>> {
        &self.view
    }

    fn view_state_mut(&mut self) -> &mut ViewState<Vec<R>> {
        &mut self.view
    }

    fn loader(&self, _key: &str) -> BoxFuture<'static, Result<Vec<R>, FetchError>> {
        R::fetch(self.service.clone())
    }

    fn title(&self) -> String {
        R::HEADING.to_string()
    }

    fn render(&self) -> String {
        render::render_load_state(self.view.state(), R::HEADING, R::FAILURE, |rows| {
            Self::render_rows(rows)
        })
    }
}
