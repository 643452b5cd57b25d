//! 代码提交流程 - 流程层
//!
//! 状态机：`Idle → Submitting → {Completed, Failed}`，
//! 只有用户再次提交才会离开 Completed / Failed。
//!
//! - 进入 Submitting 是同步的，同时清除上一次的结果
//! - Submitting 期间的提交直接忽略，不会发出第二个请求
//! - 等待有上限（TimedOut），也可以主动取消（Cancelled）

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clients::{endpoints, ResourceFetcher};
use crate::error::SubmissionError;
use crate::models::{Language, SubmissionRequest, SubmissionResult};
use crate::utils::logging::truncate_text;

/// 提交状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// 空闲，尚未提交
    Idle,
    /// 请求进行中
    Submitting,
    /// 收到逐点评测结果
    Completed(SubmissionResult),
    /// 提交失败
    Failed(SubmissionError),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// 结果面板显示的内容，失败时为 `{error}`
    pub fn result(&self) -> Option<SubmissionResult> {
        match self {
            SubmissionState::Completed(result) => Some(result.clone()),
            SubmissionState::Failed(err) => Some(SubmissionResult::error(err.to_string())),
            SubmissionState::Idle | SubmissionState::Submitting => None,
        }
    }
}

/// `submit` 的返回值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 本次提交已结束，附带最终状态
    Finished(SubmissionState),
    /// 已有提交在进行中，本次被忽略
    AlreadySubmitting,
    /// 代码为空，未发出请求
    EmptyCode,
}

/// 代码提交流程，绑定一个题目
pub struct SubmissionWorkflow {
    fetcher: Arc<dyn ResourceFetcher>,
    problem_id: String,
    timeout: Duration,
    state: watch::Sender<SubmissionState>,
    inflight: Mutex<Option<CancellationToken>>,
}

impl SubmissionWorkflow {
    /// 创建新的提交流程
    pub fn new(
        fetcher: Arc<dyn ResourceFetcher>,
        problem_id: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            fetcher,
            problem_id: problem_id.into(),
            timeout,
            state,
            inflight: Mutex::new(None),
        }
    }

    pub fn problem_id(&self) -> &str {
        &self.problem_id
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// 订阅状态变化
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.borrow().is_submitting()
    }

    /// 提交代码并等待评测结果
    pub async fn submit(&self, code: &str, language: Language) -> SubmitOutcome {
        if code.trim().is_empty() {
            warn!("[题目 {}] ⚠️ 代码为空，未提交", self.problem_id);
            return SubmitOutcome::EmptyCode;
        }

        let token = CancellationToken::new();
        {
            // 令牌与状态同时生效，cancel() 看到 Submitting 时一定能取到令牌
            let mut inflight = self.lock_inflight();
            let started = self.state.send_if_modified(|state| {
                if state.is_submitting() {
                    false
                } else {
                    *state = SubmissionState::Submitting;
                    true
                }
            });
            if !started {
                info!("[题目 {}] 已有提交在进行中，忽略本次提交", self.problem_id);
                return SubmitOutcome::AlreadySubmitting;
            }
            *inflight = Some(token.clone());
        }
        let mut guard = InflightGuard {
            workflow: self,
            finished: false,
        };

        let request = SubmissionRequest::new(self.problem_id.clone(), code, language);
        info!(
            "[题目 {}] 📤 正在提交 ({}): {}",
            self.problem_id,
            language,
            truncate_text(code.trim(), 40)
        );

        let next = match self.run(&request, &token).await {
            Ok(result) => {
                info!(
                    "[题目 {}] ✓ 评测完成，共 {} 个测试点",
                    self.problem_id,
                    result.verdicts().len()
                );
                SubmissionState::Completed(result)
            }
            Err(e) => {
                warn!("[题目 {}] ⚠️ 提交失败: {}", self.problem_id, e);
                SubmissionState::Failed(e)
            }
        };

        guard.finished = true;
        *self.lock_inflight() = None;
        self.state.send_replace(next.clone());
        SubmitOutcome::Finished(next)
    }

    async fn run(
        &self,
        request: &SubmissionRequest,
        token: &CancellationToken,
    ) -> Result<SubmissionResult, SubmissionError> {
        let path = endpoints::problem_submit(&request.problem_id);
        let body = request.body();

        let response = tokio::select! {
            _ = token.cancelled() => return Err(SubmissionError::Cancelled),
            outcome = tokio::time::timeout(self.timeout, self.fetcher.post(&path, &body)) => outcome,
        };

        let payload = response.map_err(|_| SubmissionError::TimedOut(self.timeout))??;
        debug!("提交结果: {}", payload);

        match serde_json::from_value::<SubmissionResult>(payload) {
            Ok(SubmissionResult::Error { error }) => Err(SubmissionError::Rejected(error)),
            Ok(result) => Ok(result),
            Err(e) => Err(SubmissionError::InvalidResponse(e.to_string())),
        }
    }

    /// 取消进行中的提交，没有进行中的提交时返回 `false`
    pub fn cancel(&self) -> bool {
        match self.lock_inflight().as_ref() {
            Some(token) => {
                info!("[题目 {}] 取消提交", self.problem_id);
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn lock_inflight(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.inflight.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// `submit` 的 future 在完成前被丢弃时，把状态落到 Failed(Cancelled)
struct InflightGuard<'a> {
    workflow: &'a SubmissionWorkflow,
    finished: bool,
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            *self.workflow.lock_inflight() = None;
            self.workflow
                .state
                .send_replace(SubmissionState::Failed(SubmissionError::Cancelled));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockResourceFetcher;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;
    use tokio_test::{assert_pending, assert_ready};

    /// 收到 notify 之前一直挂起的 fetcher
    struct GatedFetcher {
        calls: AtomicUsize,
        gate: Notify,
        response: Value,
    }

    impl GatedFetcher {
        fn new(response: Value) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                gate: Notify::new(),
                response,
            }
        }
    }

    #[async_trait]
    impl ResourceFetcher for GatedFetcher {
        async fn fetch(&self, path: &str) -> Result<Value, FetchError> {
            Err(FetchError::NotFound {
                path: path.to_string(),
            })
        }

        async fn post(&self, _path: &str, _body: &Value) -> Result<Value, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(self.response.clone())
        }
    }

    fn wrong_answer() -> Value {
        json!({"results": [
            {"case": "1", "status": "Accepted", "stdout": "3\n", "stderr": ""},
            {"case": "2", "status": "Wrong Answer", "stdout": "5\n", "stderr": ""}
        ]})
    }

    fn workflow_with(mock: MockResourceFetcher) -> SubmissionWorkflow {
        SubmissionWorkflow::new(Arc::new(mock), "P1", Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let mut mock = MockResourceFetcher::new();
        mock.expect_post()
            .withf(|path, body| {
                path == "/problems/P1/submit"
                    && body == &json!({"code": "print(1)", "language": "python"})
            })
            .times(1)
            .returning(|_, _| Ok(wrong_answer()));

        let workflow = workflow_with(mock);
        let outcome = workflow.submit("print(1)", Language::Python).await;

        let SubmitOutcome::Finished(SubmissionState::Completed(result)) = outcome else {
            panic!("unexpected outcome: {:?}", outcome);
        };
        assert_eq!(result.verdicts()[1].style_class(), "status-wrong-answer");
        assert_eq!(workflow.state(), SubmissionState::Completed(result));
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_error_result() {
        let mut mock = MockResourceFetcher::new();
        mock.expect_post()
            .times(1)
            .returning(|_, _| Err(FetchError::Transport("HTTP error! status: 500".into())));

        let workflow = workflow_with(mock);
        workflow.submit("int main() {}", Language::Cpp).await;

        let result = workflow.state().result().unwrap();
        assert_eq!(
            result,
            SubmissionResult::error("An error occurred during submission: HTTP error! status: 500")
        );
    }

    #[tokio::test]
    async fn test_error_body_on_success_is_failure() {
        let mut mock = MockResourceFetcher::new();
        mock.expect_post()
            .returning(|_, _| Ok(json!({"error": "Unsupported language"})));

        let workflow = workflow_with(mock);
        workflow.submit("x", Language::Python).await;

        assert_eq!(
            workflow.state(),
            SubmissionState::Failed(SubmissionError::Rejected("Unsupported language".into()))
        );
    }

    #[tokio::test]
    async fn test_unparseable_body_is_failure() {
        let mut mock = MockResourceFetcher::new();
        mock.expect_post().returning(|_, _| Ok(json!({"verdict": 1})));

        let workflow = workflow_with(mock);
        workflow.submit("x", Language::Python).await;

        assert!(matches!(
            workflow.state(),
            SubmissionState::Failed(SubmissionError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_code_is_not_sent() {
        let mut mock = MockResourceFetcher::new();
        mock.expect_post().times(0);

        let workflow = workflow_with(mock);
        assert_eq!(
            workflow.submit("   \n", Language::Python).await,
            SubmitOutcome::EmptyCode
        );
        assert_eq!(workflow.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_second_submit_while_submitting_is_ignored() {
        let fetcher = Arc::new(GatedFetcher::new(wrong_answer()));
        let workflow = Arc::new(SubmissionWorkflow::new(
            fetcher.clone(),
            "P1",
            Duration::from_secs(5),
        ));
        let mut rx = workflow.subscribe();

        let first = tokio::spawn({
            let workflow = workflow.clone();
            async move { workflow.submit("print(1)", Language::Python).await }
        });

        rx.wait_for(|s| s.is_submitting()).await.unwrap();
        assert_eq!(
            workflow.submit("print(2)", Language::Python).await,
            SubmitOutcome::AlreadySubmitting
        );

        fetcher.gate.notify_one();
        let outcome = first.await.unwrap();

        assert!(matches!(
            outcome,
            SubmitOutcome::Finished(SubmissionState::Completed(_))
        ));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_new_submit_clears_previous_result_synchronously() {
        let fetcher = Arc::new(GatedFetcher::new(wrong_answer()));
        let workflow = SubmissionWorkflow::new(fetcher.clone(), "P1", Duration::from_secs(5));

        fetcher.gate.notify_one();
        workflow.submit("print(1)", Language::Python).await;
        assert!(workflow.state().result().is_some());

        let mut second = tokio_test::task::spawn(workflow.submit("print(2)", Language::Python));
        assert_pending!(second.poll());
        assert_eq!(workflow.state(), SubmissionState::Submitting);
        assert_eq!(workflow.state().result(), None);

        fetcher.gate.notify_one();
        let outcome = assert_ready!(second.poll());
        assert!(matches!(
            outcome,
            SubmitOutcome::Finished(SubmissionState::Completed(_))
        ));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_hung_service_times_out() {
        let fetcher = Arc::new(GatedFetcher::new(wrong_answer()));
        let workflow = SubmissionWorkflow::new(fetcher, "P1", Duration::from_millis(20));

        let outcome = workflow.submit("print(1)", Language::Python).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Finished(SubmissionState::Failed(SubmissionError::TimedOut(
                Duration::from_millis(20)
            )))
        );
        assert!(!workflow.is_submitting());
    }

    #[tokio::test]
    async fn test_cancel_in_flight_submission() {
        let fetcher = Arc::new(GatedFetcher::new(wrong_answer()));
        let workflow = Arc::new(SubmissionWorkflow::new(fetcher, "P1", Duration::from_secs(30)));
        let mut rx = workflow.subscribe();

        assert!(!workflow.cancel());

        let task = tokio::spawn({
            let workflow = workflow.clone();
            async move { workflow.submit("print(1)", Language::Python).await }
        });
        rx.wait_for(|s| s.is_submitting()).await.unwrap();
        assert!(workflow.cancel());

        assert_eq!(
            task.await.unwrap(),
            SubmitOutcome::Finished(SubmissionState::Failed(SubmissionError::Cancelled))
        );
        assert_eq!(
            workflow.state().result(),
            Some(SubmissionResult::error("Submission cancelled"))
        );
    }

    #[tokio::test]
    async fn test_dropped_submission_does_not_stay_submitting() {
        let fetcher = Arc::new(GatedFetcher::new(wrong_answer()));
        let workflow = SubmissionWorkflow::new(fetcher, "P1", Duration::from_secs(30));

        {
            let mut pending = tokio_test::task::spawn(workflow.submit("print(1)", Language::Python));
            assert_pending!(pending.poll());
            assert!(workflow.is_submitting());
        }

        assert_eq!(
            workflow.state(),
            SubmissionState::Failed(SubmissionError::Cancelled)
        );
    }
}
