//! 答题会话执行器 - 编排层
//!
//! ## 职责
//!
//! 按出场顺序遍历题目，每道题经历固定的状态转换：
//!
//! ```text
//! WaitingActive(i) → Answering(i) → WaitingResult(i) → WaitingActive(i+1) | Done
//! ```
//!
//! - 没看到"题目开始"信号前绝不调用策略
//! - 没看到"结果页"信号前绝不进入下一题
//! - 等待题目开始 / 结果页超时视为会话丢失，直接终止
//! - 策略失败不重试；非致命错误按配置决定跳过还是终止

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::{Config, TimingConfig};
use crate::error::{AnswerError, SessionError, WaitError};
use crate::infrastructure::{wait_for_element, Selector, UiSurface, WaitPolicy};
use crate::models::Question;
use crate::services::{selectors, AnswerContext};
use crate::workflow::{AnswerFlow, ProcessResult, QuestionCtx};

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 等待第 i 题开始（下标从 0 开始）
    WaitingActive(usize),
    /// 正在作答第 i 题
    Answering(usize),
    /// 等待第 i 题的结果页
    WaitingResult(usize),
    /// 所有题目已完成
    Done,
}

/// 单题结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionOutcome {
    /// 已提交答案
    Answered,
    /// 不支持的题型，已跳过
    Skipped,
    /// 答题失败但会话继续
    Failed(String),
}

/// 会话统计
#[derive(Debug, Default)]
pub struct SessionReport {
    pub outcomes: Vec<(QuestionCtx, QuestionOutcome)>,
}

impl SessionReport {
    pub fn answered(&self) -> usize {
        self.count(|o| matches!(o, QuestionOutcome::Answered))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, QuestionOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, QuestionOutcome::Failed(_)))
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    fn count(&self, pred: impl Fn(&QuestionOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// 会话执行器
pub struct SessionRunner {
    flow: AnswerFlow,
    phase_wait: WaitPolicy,
    continue_on_answer_error: bool,
    cancel: CancellationToken,
}

impl SessionRunner {
    pub fn new(timing: &TimingConfig, continue_on_answer_error: bool, cancel: CancellationToken) -> Self {
        Self {
            flow: AnswerFlow::new(AnswerContext::new(timing, cancel.clone())),
            phase_wait: timing.phase_wait(),
            continue_on_answer_error,
            cancel,
        }
    }

    pub fn from_config(config: &Config, cancel: CancellationToken) -> Self {
        Self::new(&config.timing, config.continue_on_answer_error, cancel)
    }

    /// 执行整个答题会话，直到所有题目完成或遇到不可恢复的错误
    pub async fn run<S: UiSurface>(
        &self,
        questions: &[Question],
        surface: &S,
    ) -> Result<SessionReport, SessionError> {
        let total = questions.len();
        let mut report = SessionReport::default();
        let mut state = if total == 0 {
            SessionState::Done
        } else {
            SessionState::WaitingActive(0)
        };

        log_session_start(total);

        loop {
            debug!("会话状态: {:?}", state);
            state = match state {
                SessionState::WaitingActive(i) => {
                    let ctx = question_ctx(questions, i);
                    log_question_start(&ctx);
                    self.wait_phase(surface, &selectors::question_active(), &ctx, "题目开始")
                        .await?;
                    SessionState::Answering(i)
                }
                SessionState::Answering(i) => {
                    let ctx = question_ctx(questions, i);
                    let outcome = self.answer(surface, &questions[i], &ctx).await?;
                    report.outcomes.push((ctx, outcome));
                    SessionState::WaitingResult(i)
                }
                SessionState::WaitingResult(i) => {
                    let ctx = question_ctx(questions, i);
                    self.wait_phase(surface, &selectors::result_shown(), &ctx, "结果页")
                        .await?;
                    if i + 1 < total {
                        SessionState::WaitingActive(i + 1)
                    } else {
                        SessionState::Done
                    }
                }
                SessionState::Done => break,
            };
        }

        log_session_complete(&report);
        Ok(report)
    }

    /// 作答一道题，决定失败是否终止会话
    async fn answer<S: UiSurface>(
        &self,
        surface: &S,
        question: &Question,
        ctx: &QuestionCtx,
    ) -> Result<QuestionOutcome, SessionError> {
        match self.flow.run(surface, question, ctx).await {
            Ok(ProcessResult::Answered) => Ok(QuestionOutcome::Answered),
            Ok(ProcessResult::Skipped) => Ok(QuestionOutcome::Skipped),
            Err(AnswerError::Cancelled) => Err(SessionError::Cancelled),
            Err(e) if e.is_fatal() || !self.continue_on_answer_error => {
                error!("{} ❌ 答题失败，终止会话: {}", ctx, e);
                Err(SessionError::Answer {
                    question: ctx.question_index,
                    source: e,
                })
            }
            Err(e) => {
                warn!("{} ⚠️ 答题失败，继续下一题: {}", ctx, e);
                Ok(QuestionOutcome::Failed(e.to_string()))
            }
        }
    }

    async fn wait_phase<S: UiSurface>(
        &self,
        surface: &S,
        selector: &Selector,
        ctx: &QuestionCtx,
        phase: &'static str,
    ) -> Result<(), SessionError> {
        debug!("{} 等待{}", ctx, phase);
        match wait_for_element(surface, selector, self.phase_wait, &self.cancel).await {
            Ok(_) => {
                debug!("{} ✓ {}", ctx, phase);
                Ok(())
            }
            Err(WaitError::Timeout { waited }) => {
                error!("{} ❌ 等待{}超时，会话可能已断开", ctx, phase);
                Err(SessionError::Timeout {
                    question: ctx.question_index,
                    phase,
                    waited,
                })
            }
            Err(WaitError::Cancelled) => Err(SessionError::Cancelled),
            Err(WaitError::Surface(e)) => Err(SessionError::Surface(e)),
        }
    }
}

fn question_ctx(questions: &[Question], index: usize) -> QuestionCtx {
    QuestionCtx::new(index + 1, questions.len(), questions[index].kind())
}

// ========== 日志辅助函数 ==========

fn log_session_start(total: usize) {
    info!("{}", "=".repeat(60));
    info!("🎮 开始答题，共 {} 道题", total);
    info!("{}", "=".repeat(60));
}

fn log_question_start(ctx: &QuestionCtx) {
    info!("\n{}", "─".repeat(30));
    info!("{} 等待题目开始...", ctx);
}

fn log_session_complete(report: &SessionReport) {
    info!(
        "题目统计: 作答 {}, 跳过 {}, 失败 {}, 总计 {}",
        report.answered(),
        report.skipped(),
        report.failed(),
        report.total()
    );
    info!("✅ 答题会话完成");
}
