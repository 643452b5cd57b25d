//! # Problem Browser
//!
//! 本地竞赛题目内容服务的终端客户端：浏览题目、比赛、题解和测试点，并提交代码评测。
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 唯一接触网络的一层
//! - `ResourceFetcher` - 单次请求能力，区分成功 / 404 / 其他失败
//! - `HttpFetcher` - 基于 reqwest 的实现
//!
//! ### ② 业务能力层（Services）
//! - `ContentService` - 按资源类型加载并归一化内容
//! - `CollapseState` - 折叠状态，默认全部折叠
//! - `test_case_orderer` - 测试点的确定性排序
//!
//! ### ③ 流程层（Workflow）
//! - `ViewState` - 页面加载状态，丢弃过期响应
//! - `SubmissionWorkflow` - 提交状态机
//!
//! ### ④ 编排层（Pages / App）
//! - `pages/` - 页面视图，持有各自的状态并渲染为文本
//! - `App` - 把子命令映射到页面

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod pages;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{HttpFetcher, ResourceFetcher};
pub use config::Config;
pub use error::{AppError, AppResult, FetchError, SubmissionError};
pub use pages::Page;
pub use services::ContentService;
pub use workflow::{SubmissionState, SubmissionWorkflow, SubmitOutcome, ViewState};
