use async_trait::async_trait;
use tracing::debug;

use super::{AnswerContext, AnswerStrategy};
use crate::error::AnswerError;
use crate::infrastructure::{wait_for_element, Key, UiSurface};
use crate::services::selectors;

/// 填空题：覆盖输入框内容后回车提交
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenEnded<'a> {
    text: &'a str,
}

impl<'a> OpenEnded<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

#[async_trait]
impl<'a> AnswerStrategy for OpenEnded<'a> {
    async fn answer<S: UiSurface>(&self, surface: &S, ctx: &AnswerContext) -> Result<(), AnswerError> {
        let input = wait_for_element(
            surface,
            &selectors::open_ended_input(),
            ctx.element_wait,
            &ctx.cancel,
        )
        .await
        .map_err(|e| AnswerError::from_wait(e, "填空输入框"))?;

        debug!("输入答案: {}", self.text);
        surface.type_text(&input, self.text).await?;
        surface.send_keys(&[Key::Enter]).await?;
        Ok(())
    }
}
