//! 答题流程 - 流程层
//!
//! 核心职责：定义"一道题"怎么答
//!
//! 1. 按题型选择策略
//! 2. `Unknown` 题型直接跳过，不调用任何策略
//! 3. 执行策略，失败原样返回，不重试

use tracing::{info, warn};

use crate::error::AnswerError;
use crate::infrastructure::UiSurface;
use crate::models::Question;
use crate::services::{AnswerContext, AnswerStrategy, Strategy};
use crate::workflow::question_ctx::QuestionCtx;

/// 题目处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// 已提交答案
    Answered,
    /// 跳过（不支持的题型）
    Skipped,
}

/// 答题流程
///
/// - 不持有任何资源（page）
/// - 不等待题目开始 / 结果页，这些由编排层负责
pub struct AnswerFlow {
    answer_ctx: AnswerContext,
}

impl AnswerFlow {
    /// 创建新的答题流程
    pub fn new(answer_ctx: AnswerContext) -> Self {
        Self { answer_ctx }
    }

    pub async fn run<S: UiSurface>(
        &self,
        surface: &S,
        question: &Question,
        ctx: &QuestionCtx,
    ) -> Result<ProcessResult, AnswerError> {
        info!("{} 题干: {}", ctx, question.prompt_preview(80));

        let Some(strategy) = Strategy::for_question(question) else {
            warn!("{} ⚠️ 不支持的题型，跳过", ctx);
            return Ok(ProcessResult::Skipped);
        };

        strategy.answer(surface, &self.answer_ctx).await?;
        info!("{} ✓ 答案已提交", ctx);
        Ok(ProcessResult::Answered)
    }
}
