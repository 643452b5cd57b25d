//! 页面加载状态
//!
//! 每次导航生成一个递增的票据，只有最新票据对应的响应才会写入页面状态，
//! 过期响应直接丢弃。

use futures::future::BoxFuture;
use tracing::{debug, warn};

use crate::error::FetchError;

/// 页面数据的加载状态
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// 尚未加载
    Idle,
    /// 请求进行中
    Loading,
    /// 加载完成
    Loaded(T),
    /// 服务返回 404
    NotAvailable,
    /// 其他失败，附带错误消息
    Failed(String),
}

/// 一次导航的票据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    key: String,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// 单个页面独占的加载状态
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    seq: u64,
    key: Option<String>,
    state: LoadState<T>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            seq: 0,
            key: None,
            state: LoadState::Idle,
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始加载 `key`
    ///
    /// 同一个 key 已在加载中时返回 `None`，不发起第二个请求。
    pub fn begin(&mut self, key: &str) -> Option<Ticket> {
        if self.key.as_deref() == Some(key) && matches!(self.state, LoadState::Loading) {
            debug!("{} 已在加载中，忽略重复请求", key);
            return None;
        }

        self.seq += 1;
        self.key = Some(key.to_string());
        self.state = LoadState::Loading;

        Some(Ticket {
            seq: self.seq,
            key: key.to_string(),
        })
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.seq == self.seq
    }

    /// 写入响应结果，票据过期时丢弃并返回 `false`
    pub fn settle(&mut self, ticket: &Ticket, outcome: Result<T, FetchError>) -> bool {
        if !self.is_current(ticket) {
            warn!(
                "丢弃过期响应: {} (票据 #{}, 当前 #{})",
                ticket.key, ticket.seq, self.seq
            );
            return false;
        }

        self.state = match outcome {
            Ok(data) => LoadState::Loaded(data),
            Err(FetchError::NotFound { path }) => {
                debug!("资源不存在: {}", path);
                LoadState::NotAvailable
            }
            Err(FetchError::Transport(message)) => LoadState::Failed(message),
        };
        true
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn loaded(&self) -> Option<&T> {
        match &self.state {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// 当前（最新导航的）资源标识
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }
}

/// 已发出、尚未完成的加载
pub struct PendingLoad<T> {
    ticket: Ticket,
    future: BoxFuture<'static, Result<T, FetchError>>,
}

impl<T> PendingLoad<T> {
    pub fn new(ticket: Ticket, future: BoxFuture<'static, Result<T, FetchError>>) -> Self {
        Self { ticket, future }
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    /// 等待响应，不触碰页面状态
    pub async fn resolve(self) -> Settled<T> {
        let outcome = self.future.await;
        Settled {
            ticket: self.ticket,
            outcome,
        }
    }
}

/// 已完成的加载，等待写回页面
pub struct Settled<T> {
    pub ticket: Ticket,
    pub outcome: Result<T, FetchError>,
}
