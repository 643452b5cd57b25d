use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::{info, warn};

use crate::clients::{HttpFetcher, ResourceFetcher};
use crate::config::Config;
use crate::models::Language;
use crate::pages::{
    ContestDetailPage, ContestListPage, Page, ProblemDetailPage, ProblemListPage,
    SolutionDetailPage, SolutionListPage, SubmissionDetailPage, SubmissionListPage,
    TestCaseExplorerPage, TestCasesPage, INDEX_KEY,
};
use crate::services::ContentService;
use crate::utils::logging::log_startup;
use crate::workflow::SubmitOutcome;

/// 子命令，对应各个页面
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 题目列表
    Problems,
    /// 题目详情
    Problem {
        id: String,
        /// 展开的样例序号（从 1 开始），可重复
        #[arg(long = "expand-sample")]
        expand_samples: Vec<usize>,
    },
    /// 比赛列表
    Contests,
    /// 比赛详情
    Contest {
        id: String,
        /// 展开题目列表
        #[arg(long)]
        expand: bool,
    },
    /// 题解列表
    Solutions,
    /// 题解详情
    Solution { id: String },
    /// 某道题的测试点
    Testcases {
        id: String,
        /// 展开的测试点名称，可重复
        #[arg(long)]
        expand: Vec<String>,
        /// 展开全部测试点
        #[arg(long)]
        expand_all: bool,
    },
    /// 测试点浏览（题目列表）
    Explorer,
    /// 提交记录列表
    Submissions,
    /// 提交详情
    Submission { id: String },
    /// 提交代码并等待评测结果
    Submit {
        id: String,
        /// 源代码文件
        #[arg(long, short)]
        file: PathBuf,
        /// 提交语言（python / c++），默认取配置
        #[arg(long, short)]
        lang: Option<Language>,
    },
}

/// 应用主结构
pub struct App {
    config: Config,
    service: ContentService,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let fetcher = HttpFetcher::from_config(&config);
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// 使用指定的 fetcher 创建应用
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self {
            service: ContentService::new(fetcher),
            config,
        }
    }

    /// 执行子命令，返回渲染后的页面
    pub async fn run(&self, command: Command) -> Result<String> {
        let service = self.service.clone();

        let text = match command {
            Command::Problems => show(ProblemListPage::new(service), INDEX_KEY).await,
            Command::Contests => show(ContestListPage::new(service), INDEX_KEY).await,
            Command::Solutions => show(SolutionListPage::new(service), INDEX_KEY).await,
            Command::Submissions => show(SubmissionListPage::new(service), INDEX_KEY).await,
            Command::Explorer => show(TestCaseExplorerPage::new(service), INDEX_KEY).await,
            Command::Solution { id } => show(SolutionDetailPage::new(service), &id).await,
            Command::Submission { id } => show(SubmissionDetailPage::new(service), &id).await,
            Command::Problem { id, expand_samples } => {
                let mut page = ProblemDetailPage::new(service, self.config.submit_timeout());
                page.load(&id).await;
                for index in expand_samples.into_iter().filter(|i| *i > 0) {
                    page.toggle_sample(index - 1);
                }
                framed(&page)
            }
            Command::Contest { id, expand } => {
                let mut page = ContestDetailPage::new(service);
                page.load(&id).await;
                if expand {
                    page.toggle_problems();
                }
                framed(&page)
            }
            Command::Testcases {
                id,
                expand,
                expand_all,
            } => {
                let mut page = TestCasesPage::new(service);
                page.load(&id).await;
                if expand_all {
                    page.expand_all();
                } else {
                    for name in &expand {
                        page.toggle(name);
                    }
                }
                framed(&page)
            }
            Command::Submit { id, file, lang } => {
                let language = lang.unwrap_or(self.config.default_language);
                self.submit(&id, &file, language).await?
            }
        };

        Ok(text)
    }

    async fn submit(&self, id: &str, file: &Path, language: Language) -> Result<String> {
        let code = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("读取代码文件失败: {}", file.display()))?;

        self.submit_code(id, &code, language, &file.display().to_string())
            .await
    }

    /// 加载题目并提交代码，题目未成功加载时不提交
    pub async fn submit_code(
        &self,
        id: &str,
        code: &str,
        language: Language,
        source: &str,
    ) -> Result<String> {
        let mut page = ProblemDetailPage::new(self.service.clone(), self.config.submit_timeout());
        page.load(id).await;

        if page.detail().is_none() {
            warn!("[题目 {}] ⚠️ 题目未加载成功，未提交", id);
            return Ok(format!("{}Nothing submitted.\n", framed(&page)));
        }

        let workflow = page
            .submission()
            .with_context(|| format!("题目 {} 没有可用的提交流程", id))?;

        let submit = workflow.submit(code, language);
        tokio::pin!(submit);
        let outcome = tokio::select! {
            outcome = &mut submit => outcome,
            _ = tokio::signal::ctrl_c() => {
                warn!("收到中断信号，取消提交");
                workflow.cancel();
                submit.await
            }
        };

        match outcome {
            SubmitOutcome::Finished(_) => info!("[题目 {}] 提交流程结束", id),
            SubmitOutcome::EmptyCode => {
                return Ok(format!("{} is empty, nothing submitted.\n", source))
            }
            SubmitOutcome::AlreadySubmitting => {}
        }

        Ok(framed(&page))
    }
}

async fn show<P: Page>(mut page: P, key: &str) -> String {
    page.load(key).await;
    framed(&page)
}

fn framed<P: Page>(page: &P) -> String {
    format!("=== {} ===\n{}", page.title(), page.render())
}
