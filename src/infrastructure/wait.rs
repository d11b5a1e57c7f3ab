//! 轮询等待 - 基础设施层
//!
//! 所有"等页面准备好"的逻辑都建立在 `await_condition` 之上：
//! 按固定间隔检查条件，直到条件满足、超时或被取消。

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{SurfaceError, SurfaceResult, WaitError};
use crate::infrastructure::surface::{Selector, UiSurface};

/// 等待策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// 总等待预算
    pub timeout: Duration,
    /// 两次检查之间的间隔
    pub poll_interval: Duration,
}

impl WaitPolicy {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    pub fn from_millis(timeout_ms: u64, poll_interval_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(timeout_ms),
            Duration::from_millis(poll_interval_ms),
        )
    }
}

/// 轮询直到 `predicate` 返回 `Some`
///
/// - 至少检查一次，即使 `timeout` 为零
/// - 两次检查之间至少间隔 `poll_interval`（最后一次间隔会截断到剩余预算）
/// - `cancel` 被触发时立即返回 `WaitError::Cancelled`
/// - `predicate` 返回的页面错误原样向上传递
pub async fn await_condition<T, F, Fut>(
    mut predicate: F,
    policy: WaitPolicy,
    cancel: &CancellationToken,
) -> Result<T, WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SurfaceResult<Option<T>>>,
{
    let started = Instant::now();
    let deadline = started + policy.timeout;
    let mut attempts = 0usize;

    loop {
        if cancel.is_cancelled() {
            return Err(WaitError::Cancelled);
        }

        attempts += 1;
        if let Some(value) = cancellable(predicate(), cancel).await? {
            return Ok(value);
        }

        let now = Instant::now();
        if now >= deadline {
            debug!("轮询 {} 次后超时", attempts);
            return Err(WaitError::Timeout {
                waited: now - started,
            });
        }

        let nap = policy.poll_interval.min(deadline - now);
        tokio::select! {
            _ = cancel.cancelled() => return Err(WaitError::Cancelled),
            _ = sleep(nap) => {}
        }
    }
}

/// 等待第一个匹配 `selector` 的元素出现
pub async fn wait_for_element<S: UiSurface>(
    surface: &S,
    selector: &Selector,
    policy: WaitPolicy,
    cancel: &CancellationToken,
) -> Result<S::Element, WaitError> {
    debug!("等待元素 {}", selector);
    await_condition(move || surface.find_first(selector), policy, cancel).await
}

/// 等待至少 `min_count` 个匹配 `selector` 的元素出现
pub async fn wait_for_elements<S: UiSurface>(
    surface: &S,
    selector: &Selector,
    min_count: usize,
    policy: WaitPolicy,
    cancel: &CancellationToken,
) -> Result<Vec<S::Element>, WaitError> {
    debug!("等待至少 {} 个元素 {}", min_count, selector);
    let min_count = min_count.max(1);
    await_condition(
        move || async move {
            let elements = surface.find_all(selector).await?;
            Ok::<_, SurfaceError>((elements.len() >= min_count).then_some(elements))
        },
        policy,
        cancel,
    )
    .await
}

/// 让一次页面操作可以被取消
///
/// 页面卡住时操作本身可能永远不返回，取消信号先到就直接放弃这次调用
pub async fn cancellable<T, Fut>(operation: Fut, cancel: &CancellationToken) -> Result<T, WaitError>
where
    Fut: Future<Output = SurfaceResult<T>>,
{
    tokio::select! {
        _ = cancel.cancelled() => Err(WaitError::Cancelled),
        result = operation => Ok(result?),
    }
}

/// 可取消的暂停
pub async fn pause(duration: Duration, cancel: &CancellationToken) -> Result<(), WaitError> {
    tokio::select! {
        _ = cancel.cancelled() => Err(WaitError::Cancelled),
        _ = sleep(duration) => Ok(()),
    }
}
