use std::fmt::Write;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::FetchError;
use crate::models::ContentBundle;
use crate::pages::{render, Page};
use crate::services::{CollapseState, ContentService};
use crate::workflow::ViewState;

/// 题目列表的折叠键
pub const PROBLEMS_KEY: &str = "problems";

/// 比赛详情页
pub struct ContestDetailPage {
    service: ContentService,
    view: ViewState<ContentBundle>,
    collapse: CollapseState,
}

impl ContestDetailPage {
    pub fn new(service: ContentService) -> Self {
        Self {
            service,
            view: ViewState::new(),
            collapse: CollapseState::default(),
        }
    }

    pub fn bundle(&self) -> Option<&ContentBundle> {
        self.view.loaded()
    }

    pub fn collapse(&self) -> &CollapseState {
        &self.collapse
    }

    pub fn toggle_problems(&mut self) {
        self.collapse = self.collapse.toggle(PROBLEMS_KEY);
    }

    fn render_bundle(&self, bundle: &ContentBundle) -> String {
        let meta = |key: &str| bundle.meta_str(key).unwrap_or_default();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "# {} (ID: {})",
            meta("name"),
            self.view.key().unwrap_or_default()
        );
        if let Some(path) = bundle.absolute_path() {
            let _ = writeln!(out, "  {}", path);
        }
        render::field(&mut out, "Description", &meta("description"));
        render::field(&mut out, "Start Time", &render::format_timestamp(&meta("startTime")));
        render::field(&mut out, "End Time", &render::format_timestamp(&meta("endTime")));
        render::list_field(&mut out, "Authors", &bundle.meta_list("authors"));

        for (name, title) in [
            ("contest", "Contest Details"),
            ("theory", "Theory"),
            ("rules", "Rules"),
            ("leaderboard", "Leaderboard"),
            ("participants", "Participants"),
        ] {
            render::section(&mut out, title, bundle.section(name));
        }

        let problems = bundle.meta_list("problems");
        let collapsed = self.collapse.is_collapsed(PROBLEMS_KEY);
        out.push('\n');
        let _ = writeln!(
            out,
            "{} Problems ({})",
            render::toggle_marker(collapsed),
            problems.len()
        );
        if !collapsed {
            for id in &problems {
                let _ = writeln!(out, "  - {}", id);
            }
        }
        out
    }
}

impl Page for ContestDetailPage {
    type Data = ContentBundle;

    fn view_state(&self) -> &ViewState<ContentBundle> {
        &self.view
    }

    fn view_state_mut(&mut self) -> &mut ViewState<ContentBundle> {
        &mut self.view
    }

    fn loader(&self, key: &str) -> BoxFuture<'static, Result<ContentBundle, FetchError>> {
        let service = self.service.clone();
        let id = key.to_string();
        async move { service.contest(&id).await }.boxed()
    }

    fn on_navigate(&mut self, _key: &str) {
        self.collapse = CollapseState::default();
    }

    fn on_settled(&mut self) {
        self.collapse = CollapseState::initialize([PROBLEMS_KEY]);
    }

    fn title(&self) -> String {
        match self.bundle().and_then(|b| b.meta_str("name")) {
            Some(name) => format!("Contest: {}", name),
            None => "Contest Detail".to_string(),
        }
    }

    fn render(&self) -> String {
        render::render_load_state(
            self.view.state(),
            "Contest",
            "Failed to fetch contest details",
            |bundle| self.render_bundle(bundle),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockResourceFetcher;
    use serde_json::json;
    use std::sync::Arc;

    fn page() -> ContestDetailPage {
        let mut mock = MockResourceFetcher::new();
        mock.expect_fetch()
            .withf(|path| path == "/contests/C1")
            .returning(|_| {
                Ok(json!({
                    "meta": {"content": {
                        "name": "Round 1",
                        "description": "Warmup round",
                        "startTime": "not scheduled",
                        "authors": ["alice", "bob"],
                        "problems": ["P1", "P2"]
                    }},
                    "contest": {"content": "Welcome.", "file_path": "/data/contests/C1/contest.md"},
                    "leaderboard": {"content": {"alice": 300}, "file_path": "/data/contests/C1/leaderboard.json"}
                }))
            });
        ContestDetailPage::new(ContentService::new(Arc::new(mock)))
    }

    #[tokio::test]
    async fn test_render_contest() {
        let mut page = page();
        assert!(page.load("C1").await);

        let text = page.render();
        assert!(text.starts_with("# Round 1 (ID: C1)\n"));
        assert!(text.contains("Description: Warmup round"));
        assert!(text.contains("Start Time: not scheduled"));
        assert!(!text.contains("End Time"));
        assert!(text.contains("Authors: alice, bob"));
        assert!(text.contains("## Contest Details"));
        assert!(text.contains("## Leaderboard"));
        assert!(text.contains("\"alice\": 300"));
        assert!(!text.contains("## Theory"));
        assert_eq!(page.title(), "Contest: Round 1");
    }

    #[tokio::test]
    async fn test_problem_list_collapse() {
        let mut page = page();
        page.load("C1").await;

        assert!(page.collapse().is_collapsed(PROBLEMS_KEY));
        assert!(page.render().contains("▶ Problems (2)"));
        assert!(!page.render().contains("  - P1"));

        page.toggle_problems();
        let text = page.render();
        assert!(text.contains("▼ Problems (2)"));
        assert!(text.contains("  - P1\n  - P2\n"));
    }
}
