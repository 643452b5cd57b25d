use std::fmt::Write;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::FetchError;
use crate::models::SubmissionRecord;
use crate::pages::{render, Page};
use crate::services::ContentService;
use crate::workflow::ViewState;

/// 提交详情页，保存的评测结果与提交面板使用同一套渲染
pub struct SubmissionDetailPage {
    service: ContentService,
    view: ViewState<SubmissionRecord>,
}

impl SubmissionDetailPage {
    pub fn new(service: ContentService) -> Self {
        Self {
            service,
            view: ViewState::new(),
        }
    }

    fn render_record(record: &SubmissionRecord) -> String {
        let mut out = String::new();
        render::heading(&mut out, 1, "Submission Details");
        render::field(&mut out, "ID", &record.id);
        render::field(&mut out, "Problem ID", &record.problem_id);
        render::field(&mut out, "Language", &record.language);
        render::field(
            &mut out,
            "Timestamp",
            &render::format_timestamp(&record.timestamp),
        );

        out.push('\n');
        render::heading(&mut out, 2, "Code");
        for line in record.code.lines() {
            let _ = writeln!(out, "    {}", line);
        }

        if let Some(result) = record.verdict() {
            out.push('\n');
            out.push_str(&render::submission_result(&result));
        }
        out
    }
}

impl Page for SubmissionDetailPage {
    type Data = SubmissionRecord;

    fn view_state(&self) -> &ViewState<SubmissionRecord> {
        &self.view
    }

    fn view_state_mut(&mut self) -> &mut ViewState<SubmissionRecord> {
        &mut self.view
    }

    fn loader(&self, key: &str) -> BoxFuture<'static, Result<SubmissionRecord, FetchError>> {
        let service = self.service.clone();
        let id = key.to_string();
        async move { service.submission(&id).await }.boxed()
    }

    fn title(&self) -> String {
        format!("Submission: {}", self.view.key().unwrap_or_default())
    }

    fn render(&self) -> String {
        render::render_load_state(
            self.view.state(),
            "Submission",
            "Failed to fetch submission",
            Self::render_record,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockResourceFetcher;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_render_stored_verdict() {
        let mut mock = MockResourceFetcher::new();
        mock.expect_fetch()
            .withf(|path| path == "/submissions/42")
            .returning(|_| {
                Ok(json!({
                    "id": 42,
                    "problem_id": "P1",
                    "language": "python",
                    "timestamp": "garbage",
                    "code": "a, b = map(int, input().split())\nprint(a + b)",
                    "results": [{"case": 1, "status": "Time Limit Exceeded", "stdout": "", "stderr": ""}]
                }))
            });
        let mut page = SubmissionDetailPage::new(ContentService::new(Arc::new(mock)));
        page.load("42").await;

        let text = page.render();
        assert!(text.contains("ID: 42"));
        assert!(text.contains("Problem ID: P1"));
        assert!(text.contains("Timestamp: garbage"));
        assert!(text.contains("    print(a + b)"));
        assert!(text.contains("[status-time-limit-exceeded] Case 1: Time Limit Exceeded"));
        assert_eq!(page.title(), "Submission: 42");
    }
}
