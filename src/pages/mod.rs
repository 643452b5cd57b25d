//! 页面视图 - 编排层
//!
//! 每个页面独占自己的加载状态、折叠状态和提交流程。导航分两步：
//! `navigate` 发出请求并拿到票据，`apply` 把完成的响应写回页面，
//! 过期响应在 `apply` 中被丢弃。

pub mod contest_detail;
pub mod listings;
pub mod problem_detail;
pub mod render;
pub mod solution_detail;
pub mod submission_detail;
pub mod test_cases;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::FetchError;
use crate::workflow::{PendingLoad, Settled, ViewState};

pub use contest_detail::ContestDetailPage;
pub use listings::{
    ContestListPage, ListingPage, ListingRow, ProblemListPage, SolutionEntry, SolutionListPage,
    SubmissionListPage, TestCaseEntry, TestCaseExplorerPage, INDEX_KEY,
};
pub use problem_detail::ProblemDetailPage;
pub use solution_detail::SolutionDetailPage;
pub use submission_detail::SubmissionDetailPage;
pub use test_cases::TestCasesPage;

/// 页面视图
#[async_trait]
pub trait Page: Send {
    /// 页面加载的数据
    type Data: Send + 'static;

    fn view_state(&self) -> &ViewState<Self::Data>;

    fn view_state_mut(&mut self) -> &mut ViewState<Self::Data>;

    /// 加载 `key` 对应资源的 future，不持有页面引用
    fn loader(&self, key: &str) -> BoxFuture<'static, Result<Self::Data, FetchError>>;

    /// 导航开始后调用，用于重置页面状态
    fn on_navigate(&mut self, _key: &str) {}

    /// 最新响应写入后调用
    fn on_settled(&mut self) {}

    /// 窗口标题
    fn title(&self) -> String;

    fn render(&self) -> String;

    /// 导航到 `key`，同一个 key 已在加载中时返回 `None`
    fn navigate(&mut self, key: &str) -> Option<PendingLoad<Self::Data>> {
        let ticket = self.view_state_mut().begin(key)?;
        self.on_navigate(key);
        Some(PendingLoad::new(ticket, self.loader(key)))
    }

    /// 写回响应，过期响应返回 `false`
    fn apply(&mut self, settled: Settled<Self::Data>) -> bool {
        let applied = self
            .view_state_mut()
            .settle(&settled.ticket, settled.outcome);
        if applied {
            self.on_settled();
        }
        applied
    }

    /// 导航并等待加载完成
    async fn load(&mut self, key: &str) -> bool {
        match self.navigate(key) {
            Some(pending) => {
                let settled = pending.resolve().await;
                self.apply(settled)
            }
            None => false,
        }
    }
}
