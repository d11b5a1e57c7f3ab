use async_trait::async_trait;
use tracing::debug;

use super::{AnswerContext, AnswerStrategy};
use crate::error::{AnswerError, SurfaceError};
use crate::infrastructure::{await_condition, UiSurface};
use crate::services::selectors::{self, MULTI_SELECT_BUTTON_STRIDE};

/// 多选题：依次点击所有正确选项，最后点一次提交
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiSelect<'a> {
    indices: &'a [usize],
}

impl<'a> MultiSelect<'a> {
    pub fn new(indices: &'a [usize]) -> Self {
        Self { indices }
    }

    /// 正确选项在按钮列表中的位置
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().map(|i| i * MULTI_SELECT_BUTTON_STRIDE)
    }
}

#[async_trait]
impl<'a> AnswerStrategy for MultiSelect<'a> {
    async fn answer<S: UiSurface>(&self, surface: &S, ctx: &AnswerContext) -> Result<(), AnswerError> {
        let option_selector = selectors::answer_buttons();
        let submit_selector = selectors::multi_select_submit();
        let (option_selector, submit_selector) = (&option_selector, &submit_selector);

        // 选项和提交按钮必须同时出现
        let (buttons, submit) = await_condition(
            move || async move {
                let buttons = surface.find_all(option_selector).await?;
                if buttons.is_empty() {
                    return Ok::<_, SurfaceError>(None);
                }
                let submit = surface.find_first(submit_selector).await?;
                Ok(submit.map(|submit| (buttons, submit)))
            },
            ctx.element_wait,
            &ctx.cancel,
        )
        .await
        .map_err(|e| AnswerError::from_wait(e, "多选按钮和提交按钮"))?;

        // 先确认所有位置都存在，避免只选了一部分就提交
        let positions: Vec<usize> = self.positions().collect();
        if let Some(&position) = positions.iter().find(|&&p| p >= buttons.len()) {
            return Err(AnswerError::OptionOutOfRange {
                index: position / MULTI_SELECT_BUTTON_STRIDE,
                available: buttons.len() / MULTI_SELECT_BUTTON_STRIDE,
            });
        }

        for position in positions {
            debug!("选中第 {} 个按钮", position);
            surface.activate(&buttons[position]).await?;
        }

        debug!("提交多选答案");
        surface.activate(&submit).await?;
        Ok(())
    }
}
