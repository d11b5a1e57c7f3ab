//! # Kahoot Autoplay
//!
//! 一个根据公开题库自动参加 Kahoot 游戏并作答的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `UiSurface` - 查找 / 点击 / 输入 / 按键 / 读文本
//! - `PageSurface` - 唯一的 page owner，基于 chromiumoxide 实现 `UiSurface`
//! - `wait` - 有上限、可取消的轮询等待
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个 Question
//! - `strategies` - 单选 / 多选 / 填空 / 滑块四种答题策略
//! - `AnswerLog` - 写答题日志能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整处理流程
//! - `QuestionCtx` - 上下文封装（题号 + 题型）
//! - `AnswerFlow` - 流程编排（选策略 → 作答 / 跳过）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/session_runner` - 答题会话执行器，逐题等待开始 → 作答 → 等待结果
//! - `orchestrator/app` - 应用入口，管理浏览器和题库
//!
//! ## 模块结构

pub mod browser;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AnswerError, AppError, AppResult, SessionError, WaitError};
pub use infrastructure::{PageSurface, UiSurface};
pub use models::{Question, QuestionKind};
pub use orchestrator::{App, SessionReport, SessionRunner};
pub use workflow::{AnswerFlow, ProcessResult, QuestionCtx};
