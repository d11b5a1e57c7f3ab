//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **收集输入**：题库 ID、游戏 PIN、昵称（配置或终端）
//! 2. **获取题库**：通过 `KahootClient` 得到题目列表
//! 3. **管理浏览器**：启动或连接浏览器，持有 Browser 和 PageSurface
//! 4. **加入游戏**：输入 PIN 和昵称
//! 5. **执行会话**：委托 `SessionRunner` 逐题作答
//! 6. **输出统计**：写入答题日志并打印汇总

use anyhow::{Context, Result};
use chromiumoxide::{Browser, Page};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::browser;
use crate::clients::KahootClient;
use crate::config::{BrowserMode, Config};
use crate::error::AppError;
use crate::infrastructure::PageSurface;
use crate::models::Question;
use crate::orchestrator::session_runner::{QuestionOutcome, SessionReport, SessionRunner};
use crate::services::AnswerLog;
use crate::utils::logging::{log_startup, print_final_stats};
use crate::utils::prompt::value_or_prompt;
use crate::workflow::join_game;

/// 本次会话的输入
#[derive(Debug, Clone)]
pub struct SessionInputs {
    pub quiz_id: String,
    pub game_pin: String,
    pub nickname: String,
}

impl SessionInputs {
    /// 配置中缺少的项从终端读取
    ///
    /// 终端读取是阻塞调用，放到 blocking 线程池里执行
    pub async fn resolve(config: &Config) -> Result<Self> {
        let quiz_id = config.quiz_id.clone();
        let game_pin = config.game_pin.clone();
        let nickname = config.nickname.clone();

        tokio::task::spawn_blocking(move || -> Result<Self> {
            Ok(Self {
                quiz_id: value_or_prompt(quiz_id.as_deref(), "题库 ID", "quiz id")?,
                game_pin: value_or_prompt(game_pin.as_deref(), "游戏 PIN", "game pin")?,
                nickname: value_or_prompt(nickname.as_deref(), "昵称", "nickname")?,
            })
        })
        .await
        .context("终端输入任务异常退出")?
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    cancel: CancellationToken,
}

impl App {
    /// 初始化应用
    pub fn new(config: Config, cancel: CancellationToken) -> Self {
        Self { config, cancel }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let inputs = SessionInputs::resolve(&self.config).await?;

        // 先获取题库，私有 kahoot 在这里就会失败
        let questions = KahootClient::new(&self.config)
            .fetch_questions(&inputs.quiz_id)
            .await
            .with_context(|| format!("无法获取题库 {}", inputs.quiz_id))?;

        if questions.is_empty() {
            warn!("⚠️ 题库中没有可作答的题目，程序结束");
            return Ok(());
        }

        log_startup(&inputs.nickname, questions.len());

        let answer_log = AnswerLog::with_path(self.config.output_log_file.clone());
        answer_log.init(&inputs.quiz_id)?;

        let (mut browser, page) = self.open_browser().await?;
        let surface = PageSurface::new(page);

        let result = self.play(&surface, &inputs, &questions, &answer_log).await;

        self.close_browser(&mut browser).await;
        result
    }

    async fn play(
        &self,
        surface: &PageSurface,
        inputs: &SessionInputs,
        questions: &[Question],
        answer_log: &AnswerLog,
    ) -> Result<()> {
        join_game(
            surface,
            &inputs.game_pin,
            &inputs.nickname,
            self.config.timing.join_wait(),
            &self.cancel,
        )
        .await
        .map_err(AppError::from)?;

        let runner = SessionRunner::from_config(&self.config, self.cancel.clone());
        match runner.run(questions, surface).await {
            Ok(report) => {
                write_report(answer_log, &report)?;
                print_final_stats(&report, answer_log.path());
                Ok(())
            }
            Err(e) => {
                answer_log.write(&format!("会话终止: {}", e))?;
                Err(AppError::from(e).into())
            }
        }
    }

    /// 按配置启动或连接浏览器
    async fn open_browser(&self) -> Result<(Browser, Page)> {
        match self.config.browser_mode {
            BrowserMode::Launch => {
                browser::launch_browser(
                    &self.config.game_url,
                    self.config.browser_executable.as_deref(),
                    self.config.headless,
                )
                .await
            }
            BrowserMode::Connect => {
                browser::connect_to_browser(self.config.browser_debug_port, &self.config.game_url)
                    .await
            }
        }
    }

    /// 只关闭自己启动的浏览器
    async fn close_browser(&self, browser: &mut Browser) {
        if self.config.browser_mode != BrowserMode::Launch {
            return;
        }
        info!("🧹 正在关闭浏览器...");
        if let Err(e) = browser.close().await {
            warn!("关闭浏览器失败: {}", e);
        }
    }
}

fn write_report(answer_log: &AnswerLog, report: &SessionReport) -> Result<()> {
    for (ctx, outcome) in &report.outcomes {
        let line = match outcome {
            QuestionOutcome::Answered => format!("{} 已作答", ctx),
            QuestionOutcome::Skipped => format!("{} 已跳过", ctx),
            QuestionOutcome::Failed(reason) => format!("{} 失败: {}", ctx, reason),
        };
        answer_log.write(&line)?;
    }
    answer_log.write(&format!(
        "统计: 作答 {}, 跳过 {}, 失败 {}, 总计 {}",
        report.answered(),
        report.skipped(),
        report.failed(),
        report.total()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_configured_inputs_skip_the_terminal() {
        let config = Config {
            quiz_id: Some("quiz-1".to_string()),
            game_pin: Some("123456".to_string()),
            nickname: Some("机器人".to_string()),
            ..Config::default()
        };

        let inputs = SessionInputs::resolve(&config).await.unwrap();

        assert_eq!(inputs.quiz_id, "quiz-1");
        assert_eq!(inputs.game_pin, "123456");
        assert_eq!(inputs.nickname, "机器人");
    }
}
