use std::fmt::Write;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::FetchError;
use crate::models::SolutionDoc;
use crate::pages::{render, Page};
use crate::services::ContentService;
use crate::workflow::ViewState;

/// 题解页，key 为题目 id
pub struct SolutionDetailPage {
    service: ContentService,
    view: ViewState<SolutionDoc>,
}

impl SolutionDetailPage {
    pub fn new(service: ContentService) -> Self {
        Self {
            service,
            view: ViewState::new(),
        }
    }

    fn render_doc(&self, doc: &SolutionDoc) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "# Solution for Problem {}",
            self.view.key().unwrap_or_default()
        );
        if let Some(path) = &doc.content.source_path {
            let _ = writeln!(out, "  {}", path);
        }
        if !doc.authors.is_empty() {
            render::field(&mut out, "Author(s)", &doc.authors.join(", "));
        }
        match &doc.content.text {
            Some(text) => {
                out.push('\n');
                out.push_str(text.trim_end());
                out.push('\n');
            }
            None => out.push_str("Solution not available.\n"),
        }
        out
    }
}

impl Page for SolutionDetailPage {
    type Data = SolutionDoc;

    fn view_state(&self) -> &ViewState<SolutionDoc> {
        &self.view
    }

    fn view_state_mut(&mut self) -> &mut ViewState<SolutionDoc> {
        &mut self.view
    }

    fn loader(&self, key: &str) -> BoxFuture<'static, Result<SolutionDoc, FetchError>> {
        let service = self.service.clone();
        let id = key.to_string();
        async move { service.solution(&id).await }.boxed()
    }

    fn title(&self) -> String {
        match (self.view.loaded(), self.view.key()) {
            (Some(_), Some(id)) => format!("Solution: {}", id),
            _ => "Solution Detail".to_string(),
        }
    }

    fn render(&self) -> String {
        render::render_load_state(
            self.view.state(),
            "Solution",
            "Failed to fetch solution details",
            |doc| self.render_doc(doc),
        )
    }
}
