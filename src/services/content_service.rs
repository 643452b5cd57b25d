//! 内容加载服务 - 业务能力层
//!
//! 把资源路径、获取和归一化组合成按资源类型划分的加载函数。
//! 错误原样返回，由页面转换为页面状态。

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::clients::{endpoints, ResourceFetcher};
use crate::error::FetchError;
use crate::models::{
    ContentBundle, ContestSummary, ProblemSummary, SolutionDoc, SubmissionRecord, TestCaseSet,
};
use crate::services::test_case_orderer;

/// 题目详情页的数据
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemDetail {
    pub bundle: ContentBundle,
    /// 包含该题的比赛，获取失败时为空
    pub contests: Vec<ContestSummary>,
}

/// 内容加载服务
#[derive(Clone)]
pub struct ContentService {
    fetcher: Arc<dyn ResourceFetcher>,
}

impl ContentService {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> Arc<dyn ResourceFetcher> {
        Arc::clone(&self.fetcher)
    }

    async fn fetch_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let payload = self.fetcher.fetch(path).await?;
        Ok(serde_json::from_value(payload)?)
    }

    async fn fetch_bundle(&self, path: &str) -> Result<ContentBundle, FetchError> {
        let payload = self.fetcher.fetch(path).await?;
        let bundle = ContentBundle::normalize(&payload);
        debug!(
            "归一化完成 {}: {} 个分区, {} 个样例",
            path,
            bundle.section_names().count(),
            bundle.samples().len()
        );
        Ok(bundle)
    }

    pub async fn list_problems(&self) -> Result<Vec<ProblemSummary>, FetchError> {
        self.fetch_as(&endpoints::problems()).await
    }

    /// 题目详情，附带所属比赛
    pub async fn problem(&self, id: &str) -> Result<ProblemDetail, FetchError> {
        let bundle = self.fetch_bundle(&endpoints::problem(id)).await?;

        let contests = match self.problem_contests(id).await {
            Ok(contests) => contests,
            Err(e) => {
                warn!("⚠️ 获取题目 {} 所属比赛失败: {}", id, e);
                Vec::new()
            }
        };

        Ok(ProblemDetail { bundle, contests })
    }

    pub async fn problem_contests(&self, id: &str) -> Result<Vec<ContestSummary>, FetchError> {
        self.fetch_as(&endpoints::problem_contests(id)).await
    }

    /// 测试点，样例和普通测试点分别排序
    pub async fn test_cases(&self, id: &str) -> Result<TestCaseSet, FetchError> {
        let set: TestCaseSet = self.fetch_as(&endpoints::problem_testcases(id)).await?;
        Ok(TestCaseSet {
            sample_cases: test_case_orderer::order(set.sample_cases),
            normal_cases: test_case_orderer::order(set.normal_cases),
        })
    }

    pub async fn list_contests(&self) -> Result<Vec<ContestSummary>, FetchError> {
        self.fetch_as(&endpoints::contests()).await
    }

    pub async fn contest(&self, id: &str) -> Result<ContentBundle, FetchError> {
        self.fetch_bundle(&endpoints::contest(id)).await
    }

    pub async fn list_solutions(&self) -> Result<Vec<String>, FetchError> {
        self.fetch_as(&endpoints::solutions()).await
    }

    pub async fn solution(&self, id: &str) -> Result<SolutionDoc, FetchError> {
        let payload = self.fetcher.fetch(&endpoints::solution(id)).await?;
        Ok(SolutionDoc::from_payload(&payload))
    }

    pub async fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, FetchError> {
        self.fetch_as(&endpoints::submissions()).await
    }

    pub async fn submission(&self, id: &str) -> Result<SubmissionRecord, FetchError> {
        self.fetch_as(&endpoints::submission(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockResourceFetcher;
    use serde_json::json;

    fn service(mock: MockResourceFetcher) -> ContentService {
        ContentService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_problem_with_contests() {
        let mut mock = MockResourceFetcher::new();
        mock.expect_fetch()
            .withf(|path| path == "/problems/P1")
            .times(1)
            .returning(|_| {
                Ok(json!({
                    "meta": {"content": {"title": "A + B"}, "file_path": "/d/P1/meta.json"},
                    "description": {"content": "Add.", "file_path": "/d/P1/description.md"}
                }))
            });
        mock.expect_fetch()
            .withf(|path| path == "/problems/P1/contests")
            .times(1)
            .returning(|_| Ok(json!([{"id": "C1", "name": "Round 1"}])));

        let detail = service(mock).problem("P1").await.unwrap();
        assert_eq!(detail.bundle.meta_str("title").as_deref(), Some("A + B"));
        assert_eq!(detail.contests.len(), 1);
        assert_eq!(detail.contests[0].name, "Round 1");
    }

    #[tokio::test]
    async fn test_problem_contests_failure_is_tolerated() {
        let mut mock = MockResourceFetcher::new();
        mock.expect_fetch()
            .withf(|path| path == "/problems/P2")
            .returning(|_| Ok(json!({"meta": {"content": {"title": "B"}}})));
        mock.expect_fetch()
            .withf(|path| path == "/problems/P2/contests")
            .returning(|_| Err(FetchError::Transport("HTTP error! status: 500".into())));

        let detail = service(mock).problem("P2").await.unwrap();
        assert!(detail.contests.is_empty());
    }

    #[tokio::test]
    async fn test_problem_not_found_propagates() {
        let mut mock = MockResourceFetcher::new();
        mock.expect_fetch().times(1).returning(|path| {
            Err(FetchError::NotFound {
                path: path.to_string(),
            })
        });

        let err = service(mock).problem("P404").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_test_cases_are_ordered() {
        let mut mock = MockResourceFetcher::new();
        mock.expect_fetch().returning(|_| {
            Ok(json!({
                "sample_cases": [
                    {"name": "samples/2", "input": "b", "output": "B"},
                    {"name": "samples/1", "input": "a", "output": "A"}
                ],
                "normal_cases": [
                    {"name": "10.in", "input": "", "output": ""},
                    {"name": "9.in", "input": "", "output": ""},
                    {"name": "extra.in", "input": "", "output": ""}
                ]
            }))
        });

        let set = service(mock).test_cases("P1").await.unwrap();
        let samples: Vec<_> = set.sample_cases.iter().map(|c| c.name.as_str()).collect();
        let normal: Vec<_> = set.normal_cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(samples, vec!["samples/1", "samples/2"]);
        assert_eq!(normal, vec!["9.in", "10.in", "extra.in"]);
    }

    #[tokio::test]
    async fn test_malformed_listing_is_transport_error() {
        let mut mock = MockResourceFetcher::new();
        mock.expect_fetch()
            .returning(|_| Ok(json!({"error": "problems/index.json not found"})));

        let err = service(mock).list_problems().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
