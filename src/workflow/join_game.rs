//! 加入游戏流程
//!
//! 页面已经打开游戏首页后：输入 PIN → 回车 → 输入昵称 → 回车

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::{BrowserError, SurfaceError};
use crate::infrastructure::{wait_for_element, Key, Selector, UiSurface, WaitPolicy};
use crate::services::selectors;

/// 加入游戏
pub async fn join_game<S: UiSurface>(
    surface: &S,
    game_pin: &str,
    nickname: &str,
    policy: WaitPolicy,
    cancel: &CancellationToken,
) -> Result<(), BrowserError> {
    info!("🔑 正在输入游戏 PIN...");
    submit_field(surface, &selectors::game_pin_input(), game_pin, "游戏 PIN", policy, cancel).await?;

    info!("👤 正在输入昵称: {}", nickname);
    submit_field(surface, &selectors::nickname_input(), nickname, "昵称", policy, cancel).await?;

    info!("✓ 已加入游戏");
    Ok(())
}

async fn submit_field<S: UiSurface>(
    surface: &S,
    selector: &Selector,
    value: &str,
    step: &'static str,
    policy: WaitPolicy,
    cancel: &CancellationToken,
) -> Result<(), BrowserError> {
    let input = wait_for_element(surface, selector, policy, cancel)
        .await
        .map_err(|source| BrowserError::JoinFailed { step, source })?;
    let to_join_error = |e: SurfaceError| BrowserError::JoinFailed {
        step,
        source: e.into(),
    };
    surface.type_text(&input, value).await.map_err(to_join_error)?;
    surface.send_keys(&[Key::Enter]).await.map_err(to_join_error)?;
    Ok(())
}
