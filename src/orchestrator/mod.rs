//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 收集输入、获取题库
//! - 管理浏览器资源（Browser、PageSurface）
//! - 加入游戏、输出统计
//!
//! ### `session_runner` - 答题会话执行器
//! - 按顺序遍历题目（`&[Question]`）
//! - 等待题目开始 → 作答 → 等待结果页
//! - 决定单题失败是跳过还是终止
//!
//! ## 层次关系
//!
//! ```text
//! app (浏览器 + 题库)
//!     ↓
//! session_runner (处理 &[Question])
//!     ↓
//! workflow::AnswerFlow (处理单个 Question)
//!     ↓
//! services::strategies (能力层：单选 / 多选 / 填空 / 滑块)
//!     ↓
//! infrastructure (基础设施：UiSurface + 轮询等待)
//! ```

pub mod app;
pub mod session_runner;

// 重新导出主要类型
pub use app::{App, SessionInputs};
pub use session_runner::{QuestionOutcome, SessionReport, SessionRunner, SessionState};
