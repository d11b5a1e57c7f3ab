use async_trait::async_trait;
use tracing::debug;

use super::{AnswerContext, AnswerStrategy};
use crate::error::{AnswerError, WaitError};
use crate::infrastructure::{wait_for_elements, UiSurface};
use crate::services::selectors;

/// 单选题：点击正确下标对应的按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleChoice {
    index: usize,
}

impl SingleChoice {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

#[async_trait]
impl AnswerStrategy for SingleChoice {
    async fn answer<S: UiSurface>(&self, surface: &S, ctx: &AnswerContext) -> Result<(), AnswerError> {
        // 按钮可能分批渲染，等到正确下标出现为止
        let selector = selectors::answer_buttons();
        let buttons = match wait_for_elements(
            surface,
            &selector,
            self.index + 1,
            ctx.element_wait,
            &ctx.cancel,
        )
        .await
        {
            Ok(buttons) => buttons,
            Err(WaitError::Timeout { waited }) => {
                let rendered = surface.find_all(&selector).await?;
                if rendered.is_empty() {
                    return Err(AnswerError::ElementNotFound {
                        element: "答案按钮",
                        waited,
                    });
                }
                return Err(AnswerError::OptionOutOfRange {
                    index: self.index,
                    available: rendered.len(),
                });
            }
            Err(e) => return Err(AnswerError::from_wait(e, "答案按钮")),
        };

        let button = buttons.get(self.index).ok_or(AnswerError::OptionOutOfRange {
            index: self.index,
            available: buttons.len(),
        })?;

        debug!("点击第 {} 个按钮 (共 {} 个)", self.index, buttons.len());
        surface.activate(button).await?;
        Ok(())
    }
}
