//! 事件广播核心实现
//!
//! # 消息流
//!
//! ```text
//! DispatchService ──▶ publish() ──▶ broadcast::Sender<DispatchEvent>
//!                                          │
//!                              ┌───────────┼───────────┐
//!                              ▼           ▼           ▼
//!                          WS client   WS client   WS client
//! ```
//!
//! Fire-and-forget: publishing succeeds whether or not anyone is
//! listening, and a slow consumer lags (drops old events) instead of
//! back-pressuring the dispatch path.

use shared::event::DispatchEvent;
use tokio::sync::broadcast;

/// Capacity of the broadcast channel (default: 1024)
const DEFAULT_CAPACITY: usize = 1024;

/// 事件广播器 - 服务器到所有订阅者的单向通知
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<DispatchEvent>,
}

impl EventBroadcaster {
    /// 创建默认容量的广播器
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// 创建指定容量的广播器
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// 发布事件 (服务器 -> 所有订阅者)
    ///
    /// Never fails: with zero subscribers the event is simply dropped.
    pub fn publish(&self, event: DispatchEvent) {
        match self.tx.send(event) {
            Ok(n) => tracing::debug!(subscribers = n, "dispatch event published"),
            Err(_) => tracing::debug!("dispatch event dropped (no subscribers)"),
        }
    }

    /// 订阅服务器广播 (客户端专用)
    pub fn subscribe(&self) -> broadcast::Receiver<DispatchEvent> {
        self.tx.subscribe()
    }

    /// 当前订阅者数量
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
