use std::fmt::Write;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::FetchError;
use crate::models::{TestCase, TestCaseSet};
use crate::pages::{render, Page};
use crate::services::{CollapseState, ContentService};
use crate::workflow::ViewState;

/// 测试点查看页，每个测试点按名称折叠
pub struct TestCasesPage {
    service: ContentService,
    view: ViewState<TestCaseSet>,
    collapse: CollapseState,
}

impl TestCasesPage {
    pub fn new(service: ContentService) -> Self {
        Self {
            service,
            view: ViewState::new(),
            collapse: CollapseState::default(),
        }
    }

    pub fn cases(&self) -> Option<&TestCaseSet> {
        self.view.loaded()
    }

    pub fn collapse(&self) -> &CollapseState {
        &self.collapse
    }

    pub fn toggle(&mut self, name: &str) {
        self.collapse = self.collapse.toggle(name);
    }

    /// 展开所有仍折叠的测试点
    pub fn expand_all(&mut self) {
        let collapsed: Vec<String> = self
            .collapse
            .keys()
            .filter(|key| self.collapse.is_collapsed(key))
            .map(str::to_string)
            .collect();
        for key in collapsed {
            self.toggle(&key);
        }
    }

    fn render_group(&self, out: &mut String, title: &str, cases: &[TestCase], empty: &str) {
        out.push('\n');
        render::heading(out, 2, title);
        if cases.is_empty() {
            let _ = writeln!(out, "{}", empty);
        }
        for case in cases {
            render::test_case(out, &case.name, case, self.collapse.is_collapsed(&case.name));
        }
    }

    fn render_set(&self, set: &TestCaseSet) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "# Test Cases for {}",
            self.view.key().unwrap_or_default()
        );
        self.render_group(
            &mut out,
            "Sample Cases",
            &set.sample_cases,
            "No sample cases found.",
        );
        self.render_group(
            &mut out,
            "Normal Test Cases",
            &set.normal_cases,
            "No normal test cases found.",
        );
        out
    }
}

impl Page for TestCasesPage {
    type Data = TestCaseSet;

    fn view_state(&self) -> &ViewState<TestCaseSet> {
        &self.view
    }

    fn view_state_mut(&mut self) -> &mut ViewState<TestCaseSet> {
        &mut self.view
    }

    fn loader(&self, key: &str) -> BoxFuture<'static, Result<TestCaseSet, FetchError>> {
        let service = self.service.clone();
        let id = key.to_string();
        async move { service.test_cases(&id).await }.boxed()
    }

    fn on_navigate(&mut self, _key: &str) {
        self.collapse = CollapseState::default();
    }

    fn on_settled(&mut self) {
        let names: Vec<String> = self
            .cases()
            .map(|set| set.case_names().map(str::to_string).collect())
            .unwrap_or_default();
        self.collapse = CollapseState::initialize(names);
    }

    fn title(&self) -> String {
        format!("Test Cases for {}", self.view.key().unwrap_or_default())
    }

    fn render(&self) -> String {
        render::render_load_state(
            self.view.state(),
            "Test cases",
            "Failed to fetch test cases",
            |set| self.render_set(set),
        )
    }
}
