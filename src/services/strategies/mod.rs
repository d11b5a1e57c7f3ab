//! 答题策略 - 业务能力层
//!
//! 每种题型一个策略，只负责"在页面上提交这一道题的答案"：
//! - 通过 `UiSurface` 查找控件并操作
//! - 所有等待都走 `infrastructure::wait`
//! - 不关心题目顺序，不等待题目开始 / 结果页

pub mod multi_select;
pub mod open_ended;
pub mod single_choice;
pub mod slider;

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::config::TimingConfig;
use crate::error::AnswerError;
use crate::infrastructure::{UiSurface, WaitPolicy};
use crate::models::{Answer, Question};

pub use multi_select::MultiSelect;
pub use open_ended::OpenEnded;
pub use single_choice::SingleChoice;
pub use slider::{parse_reference_value, Slider};

/// 策略执行时需要的公共参数
#[derive(Debug, Clone)]
pub struct AnswerContext {
    /// 等待答题控件的策略
    pub element_wait: WaitPolicy,
    /// 滑块每轮按键后的停顿
    pub slider_step_pause: Duration,
    /// 点击刻度后、提交前的停顿
    pub slider_commit_pause: Duration,
    /// 滑块搜索最大轮数
    pub slider_max_rounds: usize,
    /// 滑块每轮发送的方向键数量
    pub slider_keys_per_round: usize,
    /// 取消信号
    pub cancel: CancellationToken,
}

impl AnswerContext {
    pub fn new(timing: &TimingConfig, cancel: CancellationToken) -> Self {
        Self {
            element_wait: timing.element_wait(),
            slider_step_pause: timing.slider_step_pause(),
            slider_commit_pause: timing.slider_commit_pause(),
            slider_max_rounds: timing.slider_max_rounds,
            slider_keys_per_round: timing.slider_keys_per_round,
            cancel,
        }
    }
}

/// 答题能力
#[async_trait]
pub trait AnswerStrategy: Send + Sync {
    /// 在页面上提交答案，成功返回时答案已经提交
    async fn answer<S: UiSurface>(&self, surface: &S, ctx: &AnswerContext) -> Result<(), AnswerError>;
}

/// 按题型选出的策略
#[derive(Debug, Clone)]
pub enum Strategy<'a> {
    SingleChoice(SingleChoice),
    MultiSelect(MultiSelect<'a>),
    OpenEnded(OpenEnded<'a>),
    Slider(Slider<'a>),
}

impl<'a> Strategy<'a> {
    /// 为题目选择策略，`Unknown` 题型没有策略
    pub fn for_question(question: &'a Question) -> Option<Self> {
        match question.answer() {
            Answer::Index(index) => Some(Strategy::SingleChoice(SingleChoice::new(*index))),
            Answer::Indices(indices) => Some(Strategy::MultiSelect(MultiSelect::new(indices))),
            Answer::Text(text) => Some(Strategy::OpenEnded(OpenEnded::new(text))),
            Answer::Slider(target) => Some(Strategy::Slider(Slider::new(target))),
            Answer::None => None,
        }
    }
}

#[async_trait]
impl<'a> AnswerStrategy for Strategy<'a> {
    async fn answer<S: UiSurface>(&self, surface: &S, ctx: &AnswerContext) -> Result<(), AnswerError> {
        match self {
            Strategy::SingleChoice(s) => s.answer(surface, ctx).await,
            Strategy::MultiSelect(s) => s.answer(surface, ctx).await,
            Strategy::OpenEnded(s) => s.answer(surface, ctx).await,
            Strategy::Slider(s) => s.answer(surface, ctx).await,
        }
    }
}
